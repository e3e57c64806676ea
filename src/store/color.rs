use std::collections::BTreeMap;
use std::str::FromStr;

use derive_more::Display;
use log::warn;
use serde::Serialize;
use thiserror::Error;

use crate::status::StatusCode;

/// A display color, usually a hex string like `#66bb6a`.
///
/// Colors read from the data file are kept verbatim, only user input is validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    const WHITE: &'static str = "#ffffff";

    #[must_use]
    pub fn white() -> Self {
        Self(Self::WHITE.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the built-in color of a status, `None` for [`StatusCode::Empty`].
    #[must_use]
    pub fn default_for(status: StatusCode) -> Option<Self> {
        let hex = match status {
            StatusCode::Empty => return None,
            // green
            StatusCode::Office => "#66bb6a",
            // yellow
            StatusCode::Home => "#ffd54f",
            // blue
            StatusCode::Leave => "#8ecae6",
        };

        Some(Self(hex.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("\"{input}\" is not a color, expected a hex color like \"#66bb6a\"")]
pub struct InvalidColor {
    input: String,
}

impl FromStr for Color {
    type Err = InvalidColor;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let is_valid = input
            .strip_prefix('#')
            .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()));

        if !is_valid {
            return Err(InvalidColor {
                input: input.to_string(),
            });
        }

        Ok(Self(input.to_ascii_lowercase()))
    }
}

/// The colors the user picked for the statuses, keyed by status code.
///
/// Entries with codes this program does not know are preserved when saving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ColorPreferences(BTreeMap<String, Color>);

impl ColorPreferences {
    /// Preferences without any entry, every lookup falls back to the built-in colors.
    #[must_use]
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Reads the colors section of a data file.
    ///
    /// String entries are kept as they are, other values are dropped. Anything but an
    /// object results in empty preferences.
    #[must_use]
    pub fn from_raw(raw: serde_json::Value) -> Self {
        let serde_json::Value::Object(entries) = raw else {
            warn!("colors are not an object, using the built-in ones");
            return Self::empty();
        };

        let mut result = Self::empty();
        for (code, value) in entries {
            match value {
                serde_json::Value::String(color) => {
                    result.0.insert(code, Color(color));
                }
                other => warn!("dropping color {} of \"{}\"", other, code),
            }
        }

        result
    }

    /// Looks up the color for a status code.
    ///
    /// Falls back to the built-in color of the status and to white if the code is unknown.
    #[must_use]
    pub fn get(&self, code: &str) -> Color {
        if let Some(color) = self.0.get(code) {
            return color.clone();
        }

        StatusCode::from_code(code)
            .and_then(Color::default_for)
            .unwrap_or_else(Color::white)
    }

    #[must_use]
    pub fn color_for(&self, status: StatusCode) -> Color {
        self.get(status.code())
    }

    /// Sets the color of a status. Returns `false` for [`StatusCode::Empty`], which has no color.
    pub fn set(&mut self, status: StatusCode, color: Color) -> bool {
        if status.is_empty() {
            return false;
        }

        self.0.insert(status.code().to_string(), color);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Color)> {
        self.0.iter().map(|(code, color)| (code.as_str(), color))
    }
}

impl Default for ColorPreferences {
    /// The built-in colors for office, home and leave.
    fn default() -> Self {
        let mut result = Self::empty();

        for status in StatusCode::colored() {
            if let Some(color) = Color::default_for(status) {
                result.set(status, color);
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn color(hex: &str) -> Color {
        hex.parse().unwrap()
    }

    #[test]
    fn test_defaults() {
        let colors = ColorPreferences::default();

        assert_eq!(colors.get("O"), color("#66bb6a"));
        assert_eq!(colors.get("E"), color("#ffd54f"));
        assert_eq!(colors.get("I"), color("#8ecae6"));
        assert_eq!(colors.iter().count(), 3);
    }

    #[test]
    fn test_fallbacks() {
        let colors = ColorPreferences::empty();

        // unset but known
        assert_eq!(colors.color_for(StatusCode::Home), color("#ffd54f"));
        // unknown codes and the empty status are white
        assert_eq!(colors.get("X"), Color::white());
        assert_eq!(colors.get(""), Color::white());
    }

    #[test]
    fn test_set() {
        let mut colors = ColorPreferences::default();

        assert!(colors.set(StatusCode::Office, color("#123456")));
        assert_eq!(colors.color_for(StatusCode::Office), color("#123456"));

        assert!(!colors.set(StatusCode::Empty, color("#000000")));
        assert_eq!(colors.get(""), Color::white());
    }

    #[test]
    fn test_parse() {
        assert_eq!(color("#ABCDEF").as_str(), "#abcdef");

        for input in ["", "#fff", "123456", "#12345g", "#1234567", "red"] {
            assert!(
                input.parse::<Color>().is_err(),
                "\"{}\" should not be a color",
                input
            );
        }
    }

    #[test]
    fn test_unknown_entries_are_kept() {
        let colors = ColorPreferences::from_raw(json!({"O": "green", "X": "#000000"}));

        assert_eq!(colors.get("O").as_str(), "green");
        assert_eq!(colors.get("X").as_str(), "#000000");
        assert_eq!(
            serde_json::to_string(&colors).unwrap(),
            r##"{"O":"green","X":"#000000"}"##
        );
    }

    #[test]
    fn test_from_raw_drops_invalid_entries() {
        let colors = ColorPreferences::from_raw(json!({
            "O": null,
            "E": 42,
            "I": "#010101",
            "X": {"nested": "#020202"},
        }));

        assert_eq!(
            colors.iter().collect::<Vec<_>>(),
            vec![("I", &color("#010101"))]
        );
        // dropped entries fall back to the built-in colors
        assert_eq!(colors.get("O"), color("#66bb6a"));
        assert_eq!(colors.get("E"), color("#ffd54f"));
    }

    #[test]
    fn test_from_raw_of_non_objects() {
        for raw in [json!("red"), json!(["#000000"]), json!(null), json!(1)] {
            assert_eq!(ColorPreferences::from_raw(raw), ColorPreferences::empty());
        }
    }
}
