use core::fmt;

use crate::status::StatusCode;
use crate::store::MonthRecord;
use crate::time::{HolidayClassifier, MonthKey};

/// Share of the effective workdays that have to be spent in the office, in percent.
pub const OFFICE_QUOTA_PERCENT: usize = 50;

/// The attendance numbers of one month.
///
/// Only workdays are counted, statuses on weekends and holidays are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub total_workdays: usize,
    /// Workdays that are not marked as leave.
    pub effective_workdays: usize,
    pub office_days: usize,
    pub home_days: usize,
    pub leave_days: usize,
    /// The number of office days needed to meet the quota.
    pub required_minimum: usize,
    pub quota_met: bool,
}

/// Rounds up, a required half day is a whole day in the office.
const fn required_office_days(effective_workdays: usize) -> usize {
    (effective_workdays * OFFICE_QUOTA_PERCENT).div_ceil(100)
}

impl Stats {
    #[must_use]
    pub fn compute(key: MonthKey, record: &MonthRecord, classifier: &HolidayClassifier) -> Self {
        let mut total_workdays = 0;
        let mut office_days = 0;
        let mut home_days = 0;
        let mut leave_days = 0;

        for date in key.days().filter(|date| classifier.is_workday(*date)) {
            total_workdays += 1;

            match record.get(date.day()) {
                StatusCode::Office => office_days += 1,
                StatusCode::Home => home_days += 1,
                StatusCode::Leave => leave_days += 1,
                StatusCode::Empty => {}
            }
        }

        let effective_workdays = total_workdays - leave_days;
        let required_minimum = required_office_days(effective_workdays);

        Self {
            total_workdays,
            effective_workdays,
            office_days,
            home_days,
            leave_days,
            required_minimum,
            quota_met: office_days >= required_minimum,
        }
    }

    /// The numbers shown to the user: workdays, workdays after leave, office days
    /// and the required minimum.
    #[must_use]
    pub const fn summary(&self) -> (usize, usize, usize, usize) {
        (
            self.total_workdays,
            self.effective_workdays,
            self.office_days,
            self.required_minimum,
        )
    }

    /// How many more days have to be spent in the office to meet the quota.
    #[must_use]
    pub const fn missing_office_days(&self) -> usize {
        self.required_minimum.saturating_sub(self.office_days)
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Workdays: {} | After leave: {} | Office days: {} | Min {}%: {} | Status: {}",
            self.total_workdays,
            self.effective_workdays,
            self.office_days,
            OFFICE_QUOTA_PERCENT,
            self.required_minimum,
            if self.quota_met { "met" } else { "not met" }
        )
    }
}
