use std::collections::BTreeMap;

use log::warn;
use serde::Serialize;

use crate::status::StatusCode;
use crate::time::MonthKey;

/// The statuses of the days in one month.
///
/// Days without an entry are [`StatusCode::Empty`]. On disk the days are keyed by
/// their number as a string (`"1"`, `"2"`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MonthRecord {
    days: BTreeMap<usize, StatusCode>,
}

impl MonthRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from the raw day entries of a data file.
    ///
    /// Keys that are not a day of the month `key` are dropped.
    #[must_use]
    pub fn from_raw(key: MonthKey, raw: BTreeMap<String, StatusCode>) -> Self {
        let mut days = BTreeMap::new();

        for (day, status) in raw {
            match day.trim().parse::<usize>() {
                Ok(number) if (1..=key.number_of_days()).contains(&number) => {
                    days.insert(number, status);
                }
                _ => warn!("dropping invalid day \"{}\" in month {}", day, key),
            }
        }

        Self { days }
    }

    #[must_use]
    pub fn get(&self, day: usize) -> StatusCode {
        self.days.get(&day).copied().unwrap_or_default()
    }

    /// Overwrites the status of a day.
    ///
    /// A day that is set to [`StatusCode::Empty`] stays in the record.
    pub fn set(&mut self, day: usize, status: StatusCode) {
        self.days.insert(day, status);
    }

    /// Adds the days of `other`, its statuses win for days that are in both records.
    pub fn merge(&mut self, other: Self) {
        self.days.extend(other.days);
    }

    /// Applies the next status of the cycle to the day and returns it.
    pub fn toggle(&mut self, day: usize) -> StatusCode {
        let next = self.get(day).next();
        self.set(day, next);
        next
    }

    /// Iterates over the stored days in ascending order, including the ones set to empty.
    pub fn iter(&self) -> impl Iterator<Item = (usize, StatusCode)> + '_ {
        self.days.iter().map(|(day, status)| (*day, *status))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
