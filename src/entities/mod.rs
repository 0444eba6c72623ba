pub mod movie;
pub mod payment_method;
pub mod seat;
pub mod seat_pricing;
pub mod seat_type;
pub mod showtime;
pub mod studio;
pub mod theater;
pub mod transaction;
pub mod transaction_item;
pub mod user;
