use core::fmt;
use std::collections::BTreeSet;

use crate::time::{Date, Month, WeekDay};

/// Something that knows the public holidays of a country or region.
pub trait HolidaySource: fmt::Debug {
    /// Human readable name of the source, for example `"Turkey"`.
    fn name(&self) -> &str;

    fn is_holiday(&self, date: Date) -> bool;
}

/// Decides whether a date is a working day.
///
/// Weekends are always non-working. Public holidays are only known when a
/// [`HolidaySource`] has been configured, otherwise only weekends are detected.
#[derive(Debug, Default)]
pub struct HolidayClassifier {
    source: Option<Box<dyn HolidaySource>>,
}

impl HolidayClassifier {
    #[must_use]
    pub fn weekends_only() -> Self {
        Self { source: None }
    }

    #[must_use]
    pub fn new(source: Option<Box<dyn HolidaySource>>) -> Self {
        Self { source }
    }

    #[must_use]
    pub fn with_source(source: impl HolidaySource + 'static) -> Self {
        Self::new(Some(Box::new(source)))
    }

    #[must_use]
    pub fn source(&self) -> Option<&dyn HolidaySource> {
        self.source.as_deref()
    }

    #[must_use]
    pub fn is_holiday(&self, date: Date) -> bool {
        self.source
            .as_ref()
            .is_some_and(|source| source.is_holiday(date))
    }

    #[must_use]
    pub fn is_non_working(&self, date: Date) -> bool {
        date.is_weekend() || self.is_holiday(date)
    }

    #[must_use]
    pub fn is_workday(&self, date: Date) -> bool {
        !self.is_non_working(date)
    }
}

/// First days of Ramadan Feast and Feast of Sacrifice in Turkey, as announced by the
/// Presidency of Religious Affairs.
const TURKISH_FEASTS: [(i32, (Month, usize), (Month, usize)); 10] = [
    (2017, (Month::June, 25), (Month::September, 1)),
    (2018, (Month::June, 15), (Month::August, 21)),
    (2019, (Month::June, 4), (Month::August, 11)),
    (2020, (Month::May, 24), (Month::July, 31)),
    (2021, (Month::May, 13), (Month::July, 20)),
    (2022, (Month::May, 2), (Month::July, 9)),
    (2023, (Month::April, 21), (Month::June, 28)),
    (2024, (Month::April, 10), (Month::June, 16)),
    (2025, (Month::March, 30), (Month::June, 6)),
    (2026, (Month::March, 20), (Month::May, 27)),
];

/// Ramadan Feast lasts three days, Feast of Sacrifice four. The half day on the eve is
/// a workday.
fn is_turkish_feast(date: Date) -> bool {
    let year = date.year().as_i32();
    let Some((_, ramadan, sacrifice)) = TURKISH_FEASTS.iter().find(|(known, ..)| *known == year)
    else {
        return false;
    };

    [(ramadan, 3), (sacrifice, 4)]
        .into_iter()
        .any(|(&(month, day), length)| {
            Date::new(year, month, day)
                .is_ok_and(|first| (0..length).contains(&first.days_until(date)))
        })
}

/// The national holidays of Turkey.
///
/// The religious feasts follow the islamic calendar and are only known for 2017 to 2026,
/// other years have to supply them through a [`HolidayList`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Turkey;

impl HolidaySource for Turkey {
    fn name(&self) -> &str {
        "Turkey"
    }

    fn is_holiday(&self, date: Date) -> bool {
        let (day, month) = (date.day(), date.month());

        matches!(
            (day, month),
            // New Year's Day
            (1, Month::January)
            // National Sovereignty and Children's Day
            | (23, Month::April)
            // Labour and Solidarity Day
            | (1, Month::May)
            // Commemoration of Atatürk, Youth and Sports Day
            | (19, Month::May)
            // Victory Day
            | (30, Month::August)
            // Republic Day
            | (29, Month::October)
        ) || (day == 15 && month == Month::July && date.year().as_i32() >= 2017)
            || is_turkish_feast(date)
    }
}

/// Returns `true` when the given date is on easter sunday.
///
/// The algorithm is based on <https://en.wikipedia.org/wiki/Date_of_Easter#Anonymous_Gregorian_algorithm>
fn is_easter_sunday(date: Date) -> bool {
    let year = date.year().as_i32();

    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let n = (h + l - 7 * m + 114) / 31;
    let o = (h + l - 7 * m + 114) % 31;

    date.month().as_usize() == n as usize && date.day() == (o + 1) as usize
}

/// Returns `true` if `date` lies exactly `offset` days after easter sunday.
fn is_days_after_easter(date: Date, offset: i64) -> bool {
    let candidates = [Month::March, Month::April];

    candidates.into_iter().any(|month| {
        date.year()
            .iter_days_in(month)
            .filter(|day| is_easter_sunday(*day))
            .any(|easter| easter.days_until(date) == offset)
    })
}

/// The public holidays of Baden-Württemberg, Germany.
#[derive(Debug, Clone, Copy, Default)]
pub struct BadenWuerttemberg;

impl HolidaySource for BadenWuerttemberg {
    fn name(&self) -> &str {
        "Baden-Württemberg"
    }

    fn is_holiday(&self, date: Date) -> bool {
        let fixed_holidays = [
            (1, Month::January),   // Neujahr
            (6, Month::January),   // Heilige Drei Könige
            (1, Month::May),       // Tag der Arbeit
            (3, Month::October),   // Tag der deutschen Einheit
            (1, Month::November),  // Allerheiligen
            (25, Month::December), // 1. Weihnachtsfeiertag
            (26, Month::December), // 2. Weihnachtsfeiertag
        ];

        if fixed_holidays.contains(&(date.day(), date.month())) {
            return true;
        }

        // only march to june can contain a holiday relative to easter
        if !(Month::March..=Month::June).contains(&date.month()) {
            return false;
        }

        match date.week_day() {
            // Karfreitag
            WeekDay::Friday => is_days_after_easter(date, -2),
            // Ostermontag, Pfingstmontag
            WeekDay::Monday => is_days_after_easter(date, 1) || is_days_after_easter(date, 50),
            // Christi Himmelfahrt, Fronleichnam
            WeekDay::Thursday => {
                is_days_after_easter(date, 39) || is_days_after_easter(date, 60)
            }
            _ => false,
        }
    }
}

/// An explicit list of holidays, for example the moving religious holidays of a year.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayList {
    name: String,
    dates: BTreeSet<Date>,
}

impl HolidayList {
    #[must_use]
    pub fn new(name: impl Into<String>, dates: impl IntoIterator<Item = Date>) -> Self {
        Self {
            name: name.into(),
            dates: dates.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl HolidaySource for HolidayList {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_holiday(&self, date: Date) -> bool {
        self.dates.contains(&date)
    }
}

/// A date is a holiday if any of the contained sources reports it as one.
#[derive(Debug, Default)]
pub struct JointHolidays {
    sources: Vec<Box<dyn HolidaySource>>,
    name: String,
}

impl JointHolidays {
    #[must_use]
    pub fn new(sources: Vec<Box<dyn HolidaySource>>) -> Self {
        let name = sources
            .iter()
            .map(|source| source.name())
            .collect::<Vec<_>>()
            .join(", ");

        Self { sources, name }
    }
}

impl HolidaySource for JointHolidays {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_holiday(&self, date: Date) -> bool {
        self.sources.iter().any(|source| source.is_holiday(date))
    }
}
