pub mod auth;
pub mod booking;
pub mod movie;
pub mod payment_method;
pub mod seat;
pub mod showtime;
