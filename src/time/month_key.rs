use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::time::{Date, Month, Year};

/// Identifies the record of one month, serialized as `"{year}-{month}"` (for example `"2024-3"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(try_from = "String")]
#[serde(into = "String")]
pub struct MonthKey {
    year: Year,
    month: Month,
}

impl MonthKey {
    #[must_use]
    pub const fn new(year: Year, month: Month) -> Self {
        Self { year, month }
    }

    pub fn from_numbers(year: i32, month: usize) -> Result<Self, InvalidMonthKey> {
        let month = Month::try_from(month).map_err(|_| InvalidMonthKey::Month {
            input: format!("{}-{}", year, month),
        })?;

        Ok(Self::new(Year::new(year), month))
    }

    #[must_use]
    pub const fn year(&self) -> Year {
        self.year
    }

    #[must_use]
    pub const fn month(&self) -> Month {
        self.month
    }

    #[must_use]
    pub const fn number_of_days(&self) -> usize {
        self.year.number_of_days_in_month(self.month)
    }

    /// Returns the date of `day` in this month, if the month has such a day.
    pub fn date(&self, day: usize) -> Result<Date, crate::time::InvalidDate> {
        Date::new(self.year, self.month, day)
    }

    pub fn days(&self) -> impl Iterator<Item = Date> + Clone {
        self.year.iter_days_in(self.month)
    }

    /// Moves the key by `delta` months, carrying into the year.
    ///
    /// The year saturates at the bounds of `i32`.
    #[must_use]
    pub fn shifted(&self, delta: i64) -> Self {
        let index = i64::from(self.year.as_i32()) * 12 + (self.month.as_usize() as i64 - 1);
        let target = index.saturating_add(delta);

        let year = target
            .div_euclid(12)
            .clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
        let month = Month::new(target.rem_euclid(12) as usize + 1);

        Self::new(Year::new(year), month)
    }
}

impl From<Date> for MonthKey {
    fn from(date: Date) -> Self {
        Self::new(date.year(), date.month())
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year.as_i32(), self.month.as_usize())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidMonthKey {
    #[error("\"{input}\" is not a valid month. Expected format: \"YYYY-M\"")]
    Format { input: String },
    #[error("\"{input}\" has an invalid month number, expected 1 to 12")]
    Month { input: String },
}

impl FromStr for MonthKey {
    type Err = InvalidMonthKey;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let format_error = || InvalidMonthKey::Format {
            input: string.to_string(),
        };

        // split at the last `-`, so that negative years are supported
        let (year, month) = string.rsplit_once('-').ok_or_else(format_error)?;

        let year = year.parse::<i32>().map_err(|_| format_error())?;
        let month = month.parse::<usize>().map_err(|_| format_error())?;

        Month::try_from(month)
            .map(|month| Self::new(Year::new(year), month))
            .map_err(|_| InvalidMonthKey::Month {
                input: string.to_string(),
            })
    }
}

impl TryFrom<String> for MonthKey {
    type Error = InvalidMonthKey;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}
