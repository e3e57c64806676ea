use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::time::{Date, Month, WeekDay};

#[derive(
    Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash, Deserialize, Serialize, Display,
)]
#[serde(from = "i32")]
#[serde(into = "i32")]
pub struct Year(i32);

impl Year {
    /// 1970-01-01 was a thursday, all week days are counted relative to it.
    const EPOCH_WEEK_DAY: WeekDay = WeekDay::Thursday;

    #[must_use]
    pub const fn new(year: i32) -> Self {
        Self(year)
    }

    #[must_use]
    pub const fn as_i32(&self) -> i32 {
        self.0
    }

    /// A leap year is a calendar year that contains an additional day added to February, so
    /// it has 29 days instead of the regular 28 days.
    #[must_use]
    pub const fn is_leap_year(&self) -> bool {
        // https://en.wikipedia.org/wiki/Leap_year#Algorithm
        let year = self.0;
        year.rem_euclid(4) == 0 && (year.rem_euclid(100) != 0 || year.rem_euclid(400) == 0)
    }

    #[must_use]
    pub const fn number_of_days_in_month(&self, month: Month) -> usize {
        match month {
            Month::January => 31,
            Month::February => {
                if self.is_leap_year() {
                    29
                } else {
                    28
                }
            }
            Month::March => 31,
            Month::April => 30,
            Month::May => 31,
            Month::June => 30,
            Month::July => 31,
            Month::August => 31,
            Month::September => 30,
            Month::October => 31,
            Month::November => 30,
            Month::December => 31,
        }
    }

    /// Number of days between 1970-01-01 and the given day of this year,
    /// negative for days before it.
    ///
    /// Based on <https://howardhinnant.github.io/date_algorithms.html#days_from_civil>
    pub(super) const fn days_since_epoch(&self, month: Month, day: usize) -> i64 {
        let month = month.as_usize() as i64;
        let year = if month <= 2 {
            self.0 as i64 - 1
        } else {
            self.0 as i64
        };

        let era = year.div_euclid(400);
        let year_of_era = year - era * 400;
        // march is the first month, so that the leap day is the last day of the year
        let shifted_month = (month + 9) % 12;
        let day_of_year = (153 * shifted_month + 2) / 5 + day as i64 - 1;
        let day_of_era =
            year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;

        era * 146_097 + day_of_era - 719_468
    }

    /// Calculate the weekday of this year and the specified month and day.
    ///
    /// # Note
    ///
    /// This function assumes that the day is valid.
    #[must_use]
    pub const fn week_day(&self, month: Month, day: usize) -> WeekDay {
        let days = self.days_since_epoch(month, day).rem_euclid(7) as usize;

        Self::EPOCH_WEEK_DAY.add_days(days)
    }

    /// Iterates over every day of the month in this year.
    pub fn iter_days_in(&self, month: Month) -> impl Iterator<Item = Date> + Clone {
        let year = *self;

        (1..=self.number_of_days_in_month(month))
            .map(move |day| Date::first_day(year, month).with_day_unchecked(day))
    }
}

impl From<i32> for Year {
    fn from(value: i32) -> Self {
        Self::new(value)
    }
}

impl From<Year> for i32 {
    fn from(value: Year) -> Self {
        value.as_i32()
    }
}
