use log::{debug, info};
use thiserror::Error;

use crate::stats::Stats;
use crate::status::StatusCode;
use crate::store::{AttendanceStore, Color, Document, MonthRecord, StoreError};
use crate::time::{HolidayClassifier, MonthKey};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("{day} is not a day of {month}")]
    InvalidDay { day: usize, month: MonthKey },
    #[error("the status {0} can not have a color")]
    Uncolored(StatusCode),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The state of a running tracker: the attendance data, the month that is looked at
/// and where the data is persisted to.
///
/// Every method that changes the data writes the whole store to the document before it
/// returns.
#[derive(Debug)]
pub struct Session {
    store: AttendanceStore,
    cursor: MonthKey,
    classifier: HolidayClassifier,
    document: Document,
}

impl Session {
    /// Loads the store from the document and opens the month `cursor`.
    ///
    /// A missing or corrupt document starts with a fresh store.
    pub fn open(
        document: Document,
        classifier: HolidayClassifier,
        cursor: MonthKey,
    ) -> Result<Self, SessionError> {
        let store = document.load()?;

        Self::with_store(store, document, classifier, cursor)
    }

    /// Starts a session on an already loaded store.
    pub fn with_store(
        store: AttendanceStore,
        document: Document,
        classifier: HolidayClassifier,
        cursor: MonthKey,
    ) -> Result<Self, SessionError> {
        if let Some(source) = classifier.source() {
            debug!("using holidays of {}", source.name());
        } else {
            debug!("no holiday source, only weekends are days off");
        }

        let mut session = Self {
            store,
            cursor,
            classifier,
            document,
        };
        session.materialize_cursor()?;

        Ok(session)
    }

    /// Creates the record of the current month if it does not exist yet.
    fn materialize_cursor(&mut self) -> Result<(), SessionError> {
        if !self.store.contains_month(self.cursor) {
            self.store.get_or_create_month(self.cursor);
            self.persist()?;
        }

        Ok(())
    }

    fn persist(&self) -> Result<(), SessionError> {
        self.document.save(&self.store)?;
        debug!("saved to \"{}\"", self.document.path().display());
        Ok(())
    }

    #[must_use]
    pub fn cursor(&self) -> MonthKey {
        self.cursor
    }

    #[must_use]
    pub fn store(&self) -> &AttendanceStore {
        &self.store
    }

    #[must_use]
    pub fn classifier(&self) -> &HolidayClassifier {
        &self.classifier
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The record of the current month.
    #[must_use]
    pub fn record(&self) -> Option<&MonthRecord> {
        self.store.month(self.cursor)
    }

    #[must_use]
    pub fn status_of(&self, day: usize) -> StatusCode {
        self.record()
            .map(|record| record.get(day))
            .unwrap_or_default()
    }

    /// Moves the current month by `delta` months and creates its record if necessary.
    pub fn change_month(&mut self, delta: i64) -> Result<MonthKey, SessionError> {
        self.cursor = self.cursor.shifted(delta);
        self.materialize_cursor()?;

        info!("switched to {}", self.cursor);
        Ok(self.cursor)
    }

    /// Advances the status of a day in the current month to the next one of the cycle.
    pub fn toggle_status(&mut self, day: usize) -> Result<StatusCode, SessionError> {
        if !(1..=self.cursor.number_of_days()).contains(&day) {
            return Err(SessionError::InvalidDay {
                day,
                month: self.cursor,
            });
        }

        let status = self.store.get_or_create_month(self.cursor).toggle(day);
        self.persist()?;

        info!("{} day {} is now {}", self.cursor, day, status);
        Ok(status)
    }

    #[must_use]
    pub fn calculate_stats(&self) -> Stats {
        self.calculate_stats_for(self.cursor)
    }

    /// Computes the stats of any month, months without a record count as unmarked.
    #[must_use]
    pub fn calculate_stats_for(&self, key: MonthKey) -> Stats {
        match self.store.month(key) {
            Some(record) => Stats::compute(key, record, &self.classifier),
            None => Stats::compute(key, &MonthRecord::new(), &self.classifier),
        }
    }

    #[must_use]
    pub fn get_color_for(&self, code: &str) -> Color {
        self.store.get_color(code)
    }

    /// Applies the color picked for a status.
    ///
    /// `None` means that the selection was cancelled, nothing changes and `false` is returned.
    pub fn choose_color_for(
        &mut self,
        status: StatusCode,
        picked: Option<Color>,
    ) -> Result<bool, SessionError> {
        let Some(color) = picked else {
            debug!("color selection for {} cancelled", status);
            return Ok(false);
        };

        if !self.store.set_color(status, color.clone()) {
            return Err(SessionError::Uncolored(status));
        }
        self.persist()?;

        info!("{} is now shown in {}", status, color);
        Ok(true)
    }
}
