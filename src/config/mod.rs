use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use crate::core::{
    finance_store::{SeedPolicy, DEFAULT_SLOT},
    utils::{ensure_dir, PathResolver},
};
use crate::errors::FinanceError;

const TMP_SUFFIX: &str = "tmp";
/// Upper bound for the list and chart length settings.
pub const MAX_COUNT: usize = 120;
const COUNT_HINT: &str = "expected a number from 1 to 120";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub slot: String,
    pub currency: String,
    pub locale: String,
    pub recent_transactions: usize,
    pub chart_months: usize,
    pub month_picker_len: usize,
    pub seed_sample_data: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            slot: DEFAULT_SLOT.into(),
            currency: "USD".into(),
            locale: "en-US".into(),
            recent_transactions: 5,
            chart_months: 6,
            month_picker_len: 12,
            seed_sample_data: true,
        }
    }
}

impl Config {
    pub fn seed_policy(&self) -> SeedPolicy {
        if self.seed_sample_data {
            SeedPolicy::Sample
        } else {
            SeedPolicy::CategoriesOnly
        }
    }

    /// Updates a single setting from its textual form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), FinanceError> {
        let invalid = |message: &str| FinanceError::Config(format!("{key}: {message}"));
        match key.to_ascii_lowercase().as_str() {
            "slot" => {
                if value.trim().is_empty() {
                    return Err(invalid("slot name cannot be empty"));
                }
                self.slot = value.trim().to_string();
            }
            "currency" => self.currency = value.trim().to_uppercase(),
            "locale" => self.locale = value.trim().to_string(),
            "recent_transactions" => {
                self.recent_transactions = parse_count(value).ok_or_else(|| invalid(COUNT_HINT))?
            }
            "chart_months" => {
                self.chart_months = parse_count(value).ok_or_else(|| invalid(COUNT_HINT))?
            }
            "month_picker_len" => {
                self.month_picker_len = parse_count(value).ok_or_else(|| invalid(COUNT_HINT))?
            }
            "seed_sample_data" => {
                self.seed_sample_data = match value.trim().to_ascii_lowercase().as_str() {
                    "true" | "on" | "yes" => true,
                    "false" | "off" | "no" => false,
                    _ => return Err(invalid("expected true or false")),
                }
            }
            other => {
                return Err(FinanceError::Config(format!(
                    "unknown config key `{}`",
                    other
                )))
            }
        }
        Ok(())
    }

    /// Pulls hand-edited counts back into `1..=MAX_COUNT`.
    fn clamp_counts(mut self) -> Self {
        let defaults = Config::default();
        for (key, value, fallback) in [
            (
                "recent_transactions",
                &mut self.recent_transactions,
                defaults.recent_transactions,
            ),
            ("chart_months", &mut self.chart_months, defaults.chart_months),
            (
                "month_picker_len",
                &mut self.month_picker_len,
                defaults.month_picker_len,
            ),
        ] {
            let clamped = if *value == 0 {
                fallback
            } else {
                (*value).min(MAX_COUNT)
            };
            if clamped != *value {
                tracing::warn!(key, value = *value, clamped, "config count out of range");
                *value = clamped;
            }
        }
        self
    }

    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("slot", self.slot.clone()),
            ("currency", self.currency.clone()),
            ("locale", self.locale.clone()),
            ("recent_transactions", self.recent_transactions.to_string()),
            ("chart_months", self.chart_months.to_string()),
            ("month_picker_len", self.month_picker_len.to_string()),
            ("seed_sample_data", self.seed_sample_data.to_string()),
        ]
    }
}

fn parse_count(value: &str) -> Option<usize> {
    value
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|count| (1..=MAX_COUNT).contains(count))
}

/// Loads and saves [`Config`] as JSON inside the application directory.
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, FinanceError> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, FinanceError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
            base,
        })
    }

    /// Returns defaults when no configuration file exists yet.
    pub fn load(&self) -> Result<Config, FinanceError> {
        match fs::read_to_string(&self.path) {
            Ok(data) => Ok(serde_json::from_str::<Config>(&data)?.clamp_counts()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Config::default()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), FinanceError> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        let mut file = File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.flush()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    tmp.set_extension(format!("json.{}", TMP_SUFFIX));
    tmp
}
