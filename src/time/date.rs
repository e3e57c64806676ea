use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::time::{Month, WeekDay, Year};

#[macro_export]
macro_rules! date {
    ($year:literal : $month:literal : $day:literal) => {{
        const _YEAR: $crate::time::Year = $crate::time::Year::new($year);
        static_assertions::const_assert!($month >= 1 && $month <= 12);

        const _MONTH: $crate::time::Month = $crate::time::Month::new($month);

        // validate the day
        static_assertions::const_assert!($day != 0);
        static_assertions::const_assert!($day <= _YEAR.number_of_days_in_month(_MONTH));

        unsafe { $crate::time::Date::new_unchecked(_YEAR, _MONTH, $day) }
    }};
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(try_from = "String")]
#[serde(into = "String")]
pub struct Date {
    year: Year,
    month: Month,
    day: usize,
}

impl Date {
    pub fn new(year: impl Into<Year>, month: Month, day: usize) -> Result<Self, InvalidDate> {
        let year = year.into();
        if year.number_of_days_in_month(month) < day || day == 0 {
            return Err(InvalidDate::InvalidDay { year, month, day });
        }

        Ok(Self { year, month, day })
    }

    /// # Safety
    ///
    /// The day must exist in the given month of the year.
    #[doc(hidden)]
    #[must_use]
    pub const unsafe fn new_unchecked(year: Year, month: Month, day: usize) -> Self {
        Self { year, month, day }
    }

    /// Returns the date of the first day as a date in the month.
    #[must_use]
    pub const fn first_day(year: Year, month: Month) -> Self {
        Self {
            year,
            month,
            day: 1,
        }
    }

    #[must_use]
    pub(super) const fn with_day_unchecked(self, day: usize) -> Self {
        Self { day, ..self }
    }

    pub const fn week_day(&self) -> WeekDay {
        self.year().week_day(self.month(), self.day())
    }

    pub const fn year(&self) -> Year {
        self.year
    }

    pub const fn month(&self) -> Month {
        self.month
    }

    pub const fn day(&self) -> usize {
        self.day
    }

    #[must_use]
    pub const fn is_weekend(&self) -> bool {
        self.week_day().is_weekend()
    }

    /// Returns the number of days that have passed between `self` and `other`,
    /// negative if `other` is before `self`.
    #[must_use]
    pub const fn days_until(&self, other: Self) -> i64 {
        other.year.days_since_epoch(other.month, other.day)
            - self.year.days_since_epoch(self.month, self.day)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidDate {
    #[error("\"{input}\" is not valid date. Expected format: \"YYYY-MM-DD\"")]
    ParseDateError { input: String },
    #[error("{day:02} is not a valid day for {year:04}-{month:02}")]
    InvalidDay {
        year: Year,
        month: Month,
        day: usize,
    },
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.year.as_i32(),
            self.month.as_usize(),
            self.day
        )
    }
}

impl FromStr for Date {
    type Err = InvalidDate;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let error = || InvalidDate::ParseDateError {
            input: string.to_string(),
        };

        let mut parts = string.splitn(3, '-');
        let (Some(year), Some(month), Some(day)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(error());
        };

        let year = year.parse::<i32>().map_err(|_| error())?;
        let month = month
            .parse::<usize>()
            .ok()
            .and_then(|month| Month::try_from(month).ok())
            .ok_or_else(error)?;
        let day = day.parse::<usize>().map_err(|_| error())?;

        Self::new(year, month, day)
    }
}

impl TryFrom<String> for Date {
    type Error = <Self as FromStr>::Err;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(value.as_str())
    }
}

impl From<Date> for String {
    fn from(date: Date) -> Self {
        date.to_string()
    }
}
