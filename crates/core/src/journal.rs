//! Input journal: the seed, layout, and every accepted player input, enough to
//! rebuild a session exactly.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::SessionConfig;
use crate::types::Direction;

pub const JOURNAL_FORMAT_VERSION: u16 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputJournal {
    pub format_version: u16,
    pub seed: u64,
    pub config: SessionConfig,
    pub inputs: Vec<InputRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    pub seq: u64,
    pub payload: InputPayload,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputPayload {
    Move { direction: Direction },
    Accuse { weapon: String },
}

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("journal I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("journal is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported journal format version {found} (expected {})", JOURNAL_FORMAT_VERSION)]
    UnsupportedVersion { found: u16 },
}

impl InputJournal {
    pub fn new(seed: u64, config: SessionConfig) -> Self {
        Self { format_version: JOURNAL_FORMAT_VERSION, seed, config, inputs: Vec::new() }
    }

    pub fn append_move(&mut self, direction: Direction) {
        self.push(InputPayload::Move { direction });
    }

    pub fn append_accusation(&mut self, weapon: &str) {
        self.push(InputPayload::Accuse { weapon: weapon.to_string() });
    }

    fn push(&mut self, payload: InputPayload) {
        let seq = self.inputs.len() as u64;
        self.inputs.push(InputRecord { seq, payload });
    }

    /// Writes through a temporary sibling file and renames it into place.
    pub fn save(&self, path: &Path) -> Result<(), JournalError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, JournalError> {
        let content = fs::read_to_string(path)?;
        let journal: Self = serde_json::from_str(&content)?;
        if journal.format_version != JOURNAL_FORMAT_VERSION {
            return Err(JournalError::UnsupportedVersion { found: journal.format_version });
        }
        Ok(journal)
    }
}
