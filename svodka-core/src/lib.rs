//! svodka-core: transaction model, error taxonomy and date/greeting/masking
//! utilities shared by the loader and report layers.

pub mod error;
pub mod mask;
pub mod time;
pub mod transaction;

pub use error::Error;
pub use mask::mask_card_number;
pub use time::{greeting, greeting_for_hour, parse_datetime, DATETIME_FORMAT, DATE_FORMAT};
pub use transaction::{Status, Transaction};
