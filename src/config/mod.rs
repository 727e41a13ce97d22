use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};
use uuid::Uuid;

use crate::domain::CalendarPolicy;
use crate::errors::PapayaError;
use crate::utils::paths;

const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub locale: String,
    pub base_currency: String,
    #[serde(default = "Config::default_fiscal_start_month")]
    pub fiscal_start_month: u32,
    #[serde(default = "Config::default_week_start")]
    pub week_start: Weekday,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_opened_journal: Option<Uuid>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            base_currency: "USD".into(),
            fiscal_start_month: Self::default_fiscal_start_month(),
            week_start: Self::default_week_start(),
            last_opened_journal: None,
        }
    }
}

impl Config {
    /// Calendar conventions derived from the configuration. An out-of-range
    /// fiscal start month from a hand-edited file clamps into 1-12.
    pub fn calendar(&self) -> CalendarPolicy {
        CalendarPolicy {
            week_start: self.week_start,
            fiscal_start_month: self.fiscal_start_month.clamp(1, 12),
        }
    }

    fn default_fiscal_start_month() -> u32 {
        1
    }

    fn default_week_start() -> Weekday {
        Weekday::Mon
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Manages the config file inside the default data directory.
    pub fn new() -> Result<Self, PapayaError> {
        Self::from_base(paths::data_dir())
    }

    pub fn from_base(base: PathBuf) -> Result<Self, PapayaError> {
        paths::ensure_dir(&base)?;
        Ok(Self {
            path: paths::config_file_in(&base),
        })
    }

    /// Loads the active configuration; a missing file yields the defaults.
    pub fn load(&self) -> Result<Config, PapayaError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), PapayaError> {
        if let Some(parent) = self.path.parent() {
            paths::ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), PapayaError> {
    if let Some(parent) = path.parent() {
        paths::ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
