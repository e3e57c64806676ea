//! Keeps track of where every workday of a month was spent (office, home or leave)
//! and checks whether at least half of the workdays were spent in the office.

mod utils;

pub mod config;
pub mod session;
pub mod stats;
pub mod status;
pub mod store;
pub mod time;

pub use crate::session::{Session, SessionError};
pub use crate::stats::Stats;
pub use crate::status::StatusCode;
