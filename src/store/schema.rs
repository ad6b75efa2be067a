use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::engine::scoring::Title;
use crate::session::mode::GameMode;
use crate::session::result::GameResult;

pub const SCHEMA_VERSION: u32 = 1;
pub const HISTORY_LIMIT: usize = 200;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProgressData {
    pub schema_version: u32,
    #[serde(default, rename = "keyUnlockCleared")]
    pub key_unlock_cleared: bool,
    #[serde(default)]
    pub titles: BTreeMap<GameMode, Title>,
}

impl Default for ProgressData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            key_unlock_cleared: false,
            titles: BTreeMap::new(),
        }
    }
}

impl ProgressData {
    /// Check if loaded data has a stale schema version and needs reset.
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryData {
    pub schema_version: u32,
    pub results: Vec<GameResult>,
}

impl Default for HistoryData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            results: Vec::new(),
        }
    }
}
