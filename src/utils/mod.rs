pub mod booking;
pub mod jwt;
pub mod response;
