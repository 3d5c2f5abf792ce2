use dirs::home_dir;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::errors::FinanceError;

const DEFAULT_DIR_NAME: &str = ".finance_core";
const HOME_ENV: &str = "FINANCE_CORE_HOME";
const STORE_DIR: &str = "store";
const CONFIG_FILE: &str = "config.json";

/// Resolves the on-disk layout of the application directory.
pub struct PathResolver;

impl PathResolver {
    /// `$FINANCE_CORE_HOME`, falling back to `~/.finance_core`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn resolve_base(custom: Option<PathBuf>) -> PathBuf {
        custom.unwrap_or_else(Self::base_dir)
    }

    pub fn store_dir_in(base: &Path) -> PathBuf {
        base.join(STORE_DIR)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        base.join(CONFIG_FILE)
    }
}

pub fn ensure_dir(path: &Path) -> Result<(), FinanceError> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
