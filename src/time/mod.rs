mod month;
pub use month::*;
mod date;
pub use date::*;
mod week_day;
pub use week_day::*;
mod year;
pub use year::*;
mod month_key;
pub use month_key::*;

pub mod holiday;
pub use holiday::{HolidayClassifier, HolidaySource};
