use core::fmt;
use core::str::FromStr;

use log::warn;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Where the work of a single day happened.
///
/// On disk every status is stored as a short code: `""`, `"O"`, `"E"` or `"I"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum StatusCode {
    /// Not marked yet.
    #[default]
    Empty,
    Office,
    Home,
    Leave,
}

impl StatusCode {
    pub const fn statuses() -> [Self; 4] {
        [Self::Empty, Self::Office, Self::Home, Self::Leave]
    }

    /// The statuses that can be assigned a color.
    pub const fn colored() -> [Self; 3] {
        [Self::Office, Self::Home, Self::Leave]
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Empty => "",
            Self::Office => "O",
            Self::Home => "E",
            Self::Leave => "I",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Empty => "Empty",
            Self::Office => "Office",
            Self::Home => "Home",
            Self::Leave => "Leave",
        }
    }

    /// Returns the status for a stored code, or `None` for anything that is not a known code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::statuses()
            .into_iter()
            .find(|status| status.code() == code)
    }

    /// Decodes a stored code, unknown codes are treated as [`StatusCode::Empty`].
    #[must_use]
    pub fn decode(code: &str) -> Self {
        Self::from_code(code).unwrap_or_else(|| {
            warn!("unknown status code \"{}\", treating it as empty", code);
            Self::Empty
        })
    }

    /// The next status in the cycle `Empty -> Office -> Home -> Leave -> Empty`.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Empty => Self::Office,
            Self::Office => Self::Home,
            Self::Home => Self::Leave,
            Self::Leave => Self::Empty,
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Advances a stored status code, corrupted codes restart the cycle.
#[must_use]
pub fn next_status(stored: &str) -> StatusCode {
    StatusCode::decode(stored).next()
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("\"{input}\" is not a status, expected one of O, E, I, office, home or leave")]
pub struct InvalidStatus {
    input: String,
}

impl FromStr for StatusCode {
    type Err = InvalidStatus;

    /// Parses user input, which can either be a code or a label.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();

        Self::statuses()
            .into_iter()
            .find(|status| {
                (!status.is_empty() && status.code().eq_ignore_ascii_case(trimmed))
                    || status.label().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| InvalidStatus {
                input: input.to_string(),
            })
    }
}

impl Serialize for StatusCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

struct StatusVisitor;

impl<'de> de::Visitor<'de> for StatusVisitor {
    type Value = StatusCode;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a status code")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(StatusCode::decode(value))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(StatusCode::Empty)
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
        warn!("unexpected status {}, treating it as empty", value);
        Ok(StatusCode::Empty)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        warn!("unexpected status {}, treating it as empty", value);
        Ok(StatusCode::Empty)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        warn!("unexpected status {}, treating it as empty", value);
        Ok(StatusCode::Empty)
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        warn!("unexpected status {}, treating it as empty", value);
        Ok(StatusCode::Empty)
    }

    fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<de::IgnoredAny>()?.is_some() {}

        warn!("unexpected list as status, treating it as empty");
        Ok(StatusCode::Empty)
    }

    fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map
            .next_entry::<de::IgnoredAny, de::IgnoredAny>()?
            .is_some()
        {}

        warn!("unexpected object as status, treating it as empty");
        Ok(StatusCode::Empty)
    }
}

impl<'de> Deserialize<'de> for StatusCode {
    /// Never fails on valid JSON: anything that is not a known code becomes [`StatusCode::Empty`].
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(StatusVisitor)
    }
}
