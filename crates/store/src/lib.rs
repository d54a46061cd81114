//! High score persistence backed by a JSON file
//!
//! File layout:
//!
//! ```json
//! { "version": 1, "scores": { "easy": 58, "hard": 84 } }
//! ```
//!
//! A missing file reads as all zeros. Writes go to a sibling temp file
//! that is then renamed over the target, so a crash mid-write leaves the
//! previous file intact.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use memory_match_core::{PersistenceStore, StoreError};

pub use memory_match_core as core;

pub const FILE_VERSION: u32 = 1;

const APP_DIR: &str = "memory-match";
const FILE_NAME: &str = "high_scores.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ScoreFile {
    version: u32,
    #[serde(default)]
    scores: BTreeMap<String, u32>,
}

impl Default for ScoreFile {
    fn default() -> Self {
        Self {
            version: FILE_VERSION,
            scores: BTreeMap::new(),
        }
    }
}

/// `$HOME/.config/memory-match/high_scores.json`
pub fn default_path() -> Option<PathBuf> {
    let home = std::env::var("HOME").ok()?;
    Some(PathBuf::from(home).join(".config").join(APP_DIR).join(FILE_NAME))
}

/// High score table stored at a fixed path
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at [`default_path`]
    pub fn open_default() -> Result<Self, StoreError> {
        default_path()
            .map(Self::new)
            .ok_or_else(|| StoreError::Backend("HOME is not set".to_string()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<ScoreFile, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(ScoreFile::default()),
            Err(err) => return Err(err.into()),
        };
        let file: ScoreFile = serde_json::from_str(&raw)?;
        if file.version != FILE_VERSION {
            return Err(StoreError::Backend(format!(
                "unsupported high score file version {}",
                file.version
            )));
        }
        Ok(file)
    }

    fn write(&self, file: &ScoreFile) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(file)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// All stored scores, by scope
    pub fn scores(&self) -> Result<BTreeMap<String, u32>, StoreError> {
        Ok(self.read()?.scores)
    }
}

impl PersistenceStore for JsonFileStore {
    fn get_high_score(&self, scope: &str) -> Result<u32, StoreError> {
        Ok(self.read()?.scores.get(scope).copied().unwrap_or(0))
    }

    fn set_high_score(&mut self, scope: &str, value: u32) -> Result<(), StoreError> {
        let mut file = self.read()?;
        file.scores.insert(scope.to_string(), value);
        self.write(&file)?;
        debug!("stored high score {value} for {scope} in {}", self.path.display());
        Ok(())
    }
}
