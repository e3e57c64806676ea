use std::fs::File;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;
use log::debug;
use serde::Deserialize;
use thiserror::Error;

use crate::store::Document;
use crate::time::holiday::{BadenWuerttemberg, HolidayList, JointHolidays, Turkey};
use crate::time::{Date, HolidayClassifier, HolidaySource};
use crate::utils;

/// The countries or regions whose public holidays are known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Region {
    Turkey,
    BadenWuerttemberg,
}

impl Region {
    #[must_use]
    pub fn source(&self) -> Box<dyn HolidaySource> {
        match self {
            Self::Turkey => Box::new(Turkey),
            Self::BadenWuerttemberg => Box::new(BadenWuerttemberg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown holiday region \"{input}\", expected \"TR\" or \"DE-BW\"")]
pub struct UnknownRegion {
    input: String,
}

impl FromStr for Region {
    type Err = UnknownRegion;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_uppercase().as_str() {
            "TR" => Ok(Self::Turkey),
            "DE-BW" => Ok(Self::BadenWuerttemberg),
            _ => Err(UnknownRegion {
                input: input.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Region {
    type Error = UnknownRegion;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}

/// The `[holidays]` section of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HolidayConfig {
    region: Option<Region>,
    /// Additional days off, for example bridge days or feasts of years without built-in dates.
    #[serde(default)]
    extra: Vec<Date>,
}

impl HolidayConfig {
    #[must_use]
    pub fn new(region: Option<Region>, extra: Vec<Date>) -> Self {
        Self { region, extra }
    }

    #[must_use]
    pub fn region(&self) -> Option<Region> {
        self.region
    }

    #[must_use]
    pub fn extra(&self) -> &[Date] {
        &self.extra
    }

    /// Builds the classifier, without region and extra days only weekends are days off.
    #[must_use]
    pub fn classifier(&self) -> HolidayClassifier {
        let mut sources = Vec::new();

        if let Some(region) = self.region {
            sources.push(region.source());
        }

        if !self.extra.is_empty() {
            sources.push(Box::new(HolidayList::new(
                "configured days off",
                self.extra.iter().copied(),
            )) as Box<dyn HolidaySource>);
        }

        match sources.len() {
            0 => HolidayClassifier::weekends_only(),
            1 => HolidayClassifier::new(sources.pop()),
            _ => HolidayClassifier::with_source(JointHolidays::new(sources)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    data_file: Option<PathBuf>,
    holidays: Option<HolidayConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    data_file: PathBuf,
    holidays: HolidayConfig,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    workspace: Option<PathBuf>,
    data_file: Option<PathBuf>,
    holidays: Option<HolidayConfig>,
}

impl ConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn from_file(file: ConfigFile) -> Self {
        Self {
            workspace: None,
            data_file: file.data_file,
            holidays: file.holidays,
        }
    }

    pub fn data_file(&mut self, data_file: impl Into<PathBuf>) -> &mut Self {
        self.data_file = Some(data_file.into());
        self
    }

    /// Replaces the region of the holiday section, keeping the extra days.
    pub fn region(&mut self, region: Region) -> &mut Self {
        self.holidays.get_or_insert_with(Default::default).region = Some(region);
        self
    }

    pub fn holidays(&mut self, holidays: HolidayConfig) -> &mut Self {
        self.holidays = Some(holidays);
        self
    }

    /// The directory relative data file paths are resolved against.
    pub fn workspace(&mut self, workspace: impl Into<PathBuf>) -> &mut Self {
        self.workspace = Some(workspace.into());
        self
    }

    #[must_use]
    pub fn build(self) -> Config {
        let data_file = self
            .data_file
            .unwrap_or_else(|| PathBuf::from(Document::DEFAULT_FILE_NAME));

        let data_file = match &self.workspace {
            Some(workspace) if data_file.is_relative() => workspace.join(data_file),
            _ => data_file,
        };

        Config {
            data_file,
            holidays: self.holidays.unwrap_or_default(),
        }
    }
}

impl Config {
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Reads a config file, relative paths in it are resolved against its directory.
    pub fn try_from_toml_file(path: impl AsRef<Path>) -> anyhow::Result<ConfigBuilder> {
        let path = path.as_ref();
        debug!("reading config from \"{}\"", path.display());

        let file = File::open(path)
            .with_context(|| format!("failed to open config \"{}\"", path.display()))?;
        let config_file: ConfigFile = utils::toml_from_reader(file)
            .with_context(|| format!("invalid config \"{}\"", path.display()))?;

        let mut builder = ConfigBuilder::from_file(config_file);
        if let Some(parent) = path.parent() {
            builder.workspace(parent);
        }

        Ok(builder)
    }

    pub fn try_from_toml(input: &str) -> anyhow::Result<ConfigBuilder> {
        let config_file: ConfigFile = toml::from_str(input)?;

        Ok(ConfigBuilder::from_file(config_file))
    }

    #[must_use]
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    #[must_use]
    pub fn document(&self) -> Document {
        Document::new(&self.data_file)
    }

    #[must_use]
    pub fn holidays(&self) -> &HolidayConfig {
        &self.holidays
    }
}
