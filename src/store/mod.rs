use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::status::StatusCode;
use crate::time::MonthKey;

mod color;
mod document;
mod record;

pub use color::*;
pub use document::*;
pub use record::*;

/// Key of the color preferences in the data file, next to the month keys.
pub const COLORS_KEY: &str = "__colors__";

/// Everything that is persisted: the color preferences and one record per visited month.
///
/// Top level entries that are neither colors nor a month are kept as they are and written
/// back on save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceStore {
    colors: ColorPreferences,
    months: BTreeMap<MonthKey, MonthRecord>,
    others: BTreeMap<String, serde_json::Value>,
}

impl Default for AttendanceStore {
    /// A store for the first run, with the built-in colors and no months.
    fn default() -> Self {
        Self::new(ColorPreferences::default())
    }
}

#[derive(Serialize)]
struct DocumentRef<'a> {
    #[serde(rename = "__colors__")]
    colors: &'a ColorPreferences,
    #[serde(flatten)]
    months: &'a BTreeMap<MonthKey, MonthRecord>,
    #[serde(flatten)]
    others: &'a BTreeMap<String, serde_json::Value>,
}

#[derive(Deserialize)]
struct RawDocument {
    #[serde(rename = "__colors__")]
    colors: Option<serde_json::Value>,
    #[serde(flatten)]
    entries: BTreeMap<String, serde_json::Value>,
}

impl AttendanceStore {
    #[must_use]
    pub fn new(colors: ColorPreferences) -> Self {
        Self {
            colors,
            months: BTreeMap::new(),
            others: BTreeMap::new(),
        }
    }

    /// Parses the content of a data file.
    ///
    /// Fails only if the document is not a JSON object. Invalid colors and days are
    /// dropped, entries that are not a month are kept in [`AttendanceStore::others`].
    /// Entries of the same month, like `"2024-03"` and `"2024-3"`, are merged.
    pub fn from_json(input: &[u8]) -> Result<Self, serde_json::Error> {
        let raw: RawDocument = serde_json::from_slice(input)?;

        // an existing file without colors keeps using the built-in ones
        let colors = raw
            .colors
            .map_or_else(ColorPreferences::empty, ColorPreferences::from_raw);
        let mut months = BTreeMap::new();
        let mut others = BTreeMap::new();

        for (key, value) in raw.entries {
            let month_key = match key.parse::<MonthKey>() {
                Ok(month_key) if value.is_object() => month_key,
                Ok(_) => {
                    warn!("keeping month \"{}\" as is, its days are not an object", key);
                    others.insert(key, value);
                    continue;
                }
                Err(error) => {
                    warn!("keeping unknown entry \"{}\": {}", key, error);
                    others.insert(key, value);
                    continue;
                }
            };

            let days = match serde_json::from_value::<BTreeMap<String, StatusCode>>(value) {
                Ok(days) => days,
                Err(error) => {
                    warn!("dropping month \"{}\": {}", key, error);
                    continue;
                }
            };
            let record = MonthRecord::from_raw(month_key, days);

            match months.entry(month_key) {
                Entry::Vacant(entry) => {
                    entry.insert(record);
                }
                Entry::Occupied(mut entry) => {
                    warn!("merging duplicate entries of month {}", month_key);
                    entry.get_mut().merge(record);
                }
            }
        }

        debug!("decoded {} months", months.len());

        Ok(Self {
            colors,
            months,
            others,
        })
    }

    /// Serializes the store as a pretty printed JSON document.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&DocumentRef {
            colors: &self.colors,
            months: &self.months,
            others: &self.others,
        })
    }

    #[must_use]
    pub fn colors(&self) -> &ColorPreferences {
        &self.colors
    }

    /// Returns the color of a status code, see [`ColorPreferences::get`].
    #[must_use]
    pub fn get_color(&self, code: &str) -> Color {
        self.colors.get(code)
    }

    /// Changes the color of a status, returns `false` if the status has no color.
    ///
    /// The caller is responsible for persisting the store.
    pub fn set_color(&mut self, status: StatusCode, color: Color) -> bool {
        self.colors.set(status, color)
    }

    #[must_use]
    pub fn month(&self, key: MonthKey) -> Option<&MonthRecord> {
        self.months.get(&key)
    }

    #[must_use]
    pub fn contains_month(&self, key: MonthKey) -> bool {
        self.months.contains_key(&key)
    }

    /// Returns the record of the month, inserting an empty one if there is none.
    ///
    /// A new record replaces a kept entry with the same key, which could not be read as a month.
    pub fn get_or_create_month(&mut self, key: MonthKey) -> &mut MonthRecord {
        let others = &mut self.others;

        self.months.entry(key).or_insert_with(|| {
            debug!("creating record for {}", key);
            if let Some(value) = others.remove(&key.to_string()) {
                warn!("replacing {} of month {} with an empty record", value, key);
            }
            MonthRecord::new()
        })
    }

    pub fn months(&self) -> impl Iterator<Item = (MonthKey, &MonthRecord)> {
        self.months.iter().map(|(key, record)| (*key, record))
    }

    /// The top level entries of the data file that are neither colors nor a month.
    pub fn others(&self) -> impl Iterator<Item = (&str, &serde_json::Value)> {
        self.others.iter().map(|(key, value)| (key.as_str(), value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    fn key(year: i32, month: usize) -> MonthKey {
        MonthKey::from_numbers(year, month).unwrap()
    }

    #[test]
    fn test_default() {
        let store = AttendanceStore::default();

        assert_eq!(store.colors(), &ColorPreferences::default());
        assert_eq!(store.months().count(), 0);
    }

    #[test]
    fn test_get_or_create_month() {
        let mut store = AttendanceStore::default();
        assert!(!store.contains_month(key(2024, 3)));

        store.get_or_create_month(key(2024, 3)).set(4, StatusCode::Office);
        assert!(store.contains_month(key(2024, 3)));

        // the existing record is returned
        assert_eq!(
            store.get_or_create_month(key(2024, 3)).get(4),
            StatusCode::Office
        );
        assert_eq!(store.months().count(), 1);
    }

    #[test]
    fn test_to_json() {
        let mut store = AttendanceStore::default();
        store.get_or_create_month(key(2024, 10)).set(1, StatusCode::Home);
        store.get_or_create_month(key(2024, 3)).set(15, StatusCode::Office);
        store.get_or_create_month(key(2024, 3)).set(2, StatusCode::Empty);

        assert_eq!(
            store.to_json().unwrap(),
            concat!(
                "{\n",
                "  \"__colors__\": {\n",
                "    \"E\": \"#ffd54f\",\n",
                "    \"I\": \"#8ecae6\",\n",
                "    \"O\": \"#66bb6a\"\n",
                "  },\n",
                "  \"2024-3\": {\n",
                "    \"2\": \"\",\n",
                "    \"15\": \"O\"\n",
                "  },\n",
                "  \"2024-10\": {\n",
                "    \"1\": \"E\"\n",
                "  }\n",
                "}"
            )
        );
    }

    #[test]
    fn test_from_json() {
        let store = AttendanceStore::from_json(
            br##"{
                "__colors__": {"O": "#000000"},
                "2024-3": {"1": "O", "2": "bogus", "40": "E"},
                "2024-13": {"1": "O"},
                "notes": {"1": "O"},
                "2024-4": "not a month"
            }"##,
        )
        .unwrap();

        assert_eq!(store.get_color("O").as_str(), "#000000");
        assert_eq!(store.get_color("E").as_str(), "#ffd54f");

        let months = store.months().collect::<Vec<_>>();
        assert_eq!(months.len(), 1);

        let (month_key, record) = months[0];
        assert_eq!(month_key, key(2024, 3));
        assert_eq!(
            record.iter().collect::<Vec<_>>(),
            vec![(1, StatusCode::Office), (2, StatusCode::Empty)]
        );

        assert_eq!(
            store.others().map(|(key, _)| key).collect::<Vec<_>>(),
            vec!["2024-13", "2024-4", "notes"]
        );
    }

    #[test]
    fn test_from_json_keeps_days_next_to_nested_values() {
        let store =
            AttendanceStore::from_json(br#"{"2024-3": {"1": "O", "4": "I", "5": ["E"], "6": {}}}"#)
                .unwrap();

        let record = store.month(key(2024, 3)).expect("month should be kept");
        assert_eq!(
            record.iter().collect::<Vec<_>>(),
            vec![
                (1, StatusCode::Office),
                (4, StatusCode::Leave),
                (5, StatusCode::Empty),
                (6, StatusCode::Empty),
            ]
        );
    }

    #[test]
    fn test_from_json_with_invalid_colors() {
        let store =
            AttendanceStore::from_json(br#"{"__colors__": {"O": null}, "2024-3": {"1": "O"}}"#)
                .unwrap();
        assert_eq!(store.colors(), &ColorPreferences::empty());
        assert_eq!(store.get_color("O").as_str(), "#66bb6a");
        assert_eq!(store.month(key(2024, 3)).unwrap().get(1), StatusCode::Office);

        let store =
            AttendanceStore::from_json(br#"{"__colors__": "red", "2024-3": {"2": "E"}}"#).unwrap();
        assert_eq!(store.colors(), &ColorPreferences::empty());
        assert_eq!(store.month(key(2024, 3)).unwrap().get(2), StatusCode::Home);
    }

    #[test]
    fn test_from_json_merges_duplicate_months() {
        let store = AttendanceStore::from_json(
            br#"{"2024-03": {"1": "O", "2": "E"}, "2024-3": {"2": "I", "3": "O"}}"#,
        )
        .unwrap();

        assert_eq!(store.months().count(), 1);
        // "2024-3" is read after "2024-03"
        assert_eq!(
            store.month(key(2024, 3)).unwrap().iter().collect::<Vec<_>>(),
            vec![
                (1, StatusCode::Office),
                (2, StatusCode::Leave),
                (3, StatusCode::Office),
            ]
        );
    }

    #[test]
    fn test_unknown_entries_are_written_back() {
        let store = AttendanceStore::from_json(
            br#"{"__colors__": {}, "notes": {"a": "b"}, "2024-13": [1, 2], "2024-3": {}}"#,
        )
        .unwrap();

        let json: serde_json::Value = serde_json::from_str(&store.to_json().unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "__colors__": {},
                "2024-3": {},
                "2024-13": [1, 2],
                "notes": {"a": "b"},
            })
        );
        assert_eq!(AttendanceStore::from_json(store.to_json().unwrap().as_bytes()).unwrap(), store);
    }

    #[test]
    fn test_created_month_replaces_unreadable_entry() {
        let mut store = AttendanceStore::from_json(br#"{"2024-4": "not a month"}"#).unwrap();
        assert_eq!(store.others().count(), 1);

        store.get_or_create_month(key(2024, 4)).set(1, StatusCode::Office);

        assert_eq!(store.others().count(), 0);
        let json: serde_json::Value = serde_json::from_str(&store.to_json().unwrap()).unwrap();
        assert_eq!(json["2024-4"], serde_json::json!({"1": "O"}));
    }

    #[test]
    fn test_from_json_without_colors() {
        let store = AttendanceStore::from_json(br#"{"2024-3": {}}"#).unwrap();

        assert_eq!(store.colors(), &ColorPreferences::empty());
        assert_eq!(store.get_color("I").as_str(), "#8ecae6");
        assert_eq!(store.month(key(2024, 3)), Some(&MonthRecord::new()));
    }

    #[test]
    fn test_from_json_rejects_malformed_documents() {
        let inputs: [&[u8]; 5] = [
            b"",
            b"[]",
            b"42",
            b"\"__colors__\"",
            b"{\"2024-3\": {\"1\": \"O\"}",
        ];

        for input in inputs {
            assert!(
                AttendanceStore::from_json(input).is_err(),
                "{:?} should be rejected",
                String::from_utf8_lossy(input)
            );
        }
    }

    #[test]
    fn test_json_round_trip() {
        let mut store = AttendanceStore::default();
        store.set_color(StatusCode::Leave, "#010203".parse().unwrap());
        let record = store.get_or_create_month(key(2023, 12));
        record.set(1, StatusCode::Office);
        record.set(2, StatusCode::Home);
        record.set(3, StatusCode::Leave);
        record.set(4, StatusCode::Empty);
        store.get_or_create_month(key(2024, 1));

        let json = store.to_json().unwrap();
        assert_eq!(AttendanceStore::from_json(json.as_bytes()).unwrap(), store);
    }
}
