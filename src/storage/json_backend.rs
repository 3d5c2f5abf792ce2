use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use crate::core::utils::{ensure_dir, PathResolver};

use super::{Result, StorageBackend};

const SLOT_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Stores each slot as `<root>/<slot>.json`.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = root.unwrap_or_else(|| PathResolver::store_dir_in(&PathResolver::base_dir()));
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    pub fn slot_path(&self, slot: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_name(slot), SLOT_EXTENSION))
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }
}

impl StorageBackend for JsonStorage {
    fn read_slot(&self, slot: &str) -> Result<Option<String>> {
        let path = self.slot_path(slot);
        match fs::read_to_string(&path) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write_slot(&self, slot: &str, contents: &str) -> Result<()> {
        let path = self.slot_path(slot);
        let tmp = tmp_path(&path);
        write_atomic(&tmp, contents)?;
        fs::rename(&tmp, &path)?;
        tracing::trace!(path = %path.display(), "slot written");
        Ok(())
    }

    fn clear_slot(&self, slot: &str) -> Result<()> {
        match fs::remove_file(self.slot_path(slot)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches(|c| c == '_' || c == '-').is_empty() {
        "store".into()
    } else {
        sanitized
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

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
