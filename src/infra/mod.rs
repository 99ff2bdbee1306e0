//! Clock, logging setup, phone-number normalization

mod clock;
pub mod logging;
mod phone;

pub use clock::{format_millis, now_millis};
pub use phone::{normalize_phone_number, phone_numbers_equal};
