#![allow(dead_code)]

use std::path::PathBuf;

use office_quota::store::Document;
use office_quota::time::{HolidayClassifier, MonthKey};
use office_quota::Session;

/// A data file in its own temporary directory, removed on drop.
pub struct Workspace {
    dir: tempfile::TempDir,
}

impl Workspace {
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("should be able to create a temporary directory"),
        }
    }

    #[must_use]
    pub fn data_file(&self) -> PathBuf {
        self.dir.path().join("monthly.json")
    }

    #[must_use]
    pub fn document(&self) -> Document {
        Document::new(self.data_file())
    }

    pub fn write(&self, content: impl AsRef<[u8]>) {
        std::fs::write(self.data_file(), content).expect("should be able to write the data file");
    }

    #[must_use]
    pub fn read(&self) -> String {
        std::fs::read_to_string(self.data_file()).expect("should be able to read the data file")
    }

    #[must_use]
    pub fn open(&self, cursor: MonthKey) -> Session {
        self.open_with(HolidayClassifier::weekends_only(), cursor)
    }

    #[must_use]
    pub fn open_with(&self, classifier: HolidayClassifier, cursor: MonthKey) -> Session {
        Session::open(self.document(), classifier, cursor).expect("session should open")
    }
}

#[must_use]
pub fn month(year: i32, month: usize) -> MonthKey {
    MonthKey::from_numbers(year, month).expect("month should be valid")
}

pub fn debug_setup() {
    std::env::set_var("RUST_BACKTRACE", "1");
    std::env::set_var("OFFICE_QUOTA_LOG", "trace");
    color_backtrace::install();
    let _ = pretty_env_logger::try_init_custom_env("OFFICE_QUOTA_LOG");
}
