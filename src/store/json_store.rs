use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Serialize, de::DeserializeOwned};
use tracing::warn;

use crate::store::schema::{HistoryData, ProgressData};

const PROGRESS_FILE: &str = "progress.json";
const HISTORY_FILE: &str = "history.json";

pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("nanji-attack");
        Self::with_base_dir(base_dir)
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    /// Missing files and unreadable or corrupt ones all come back as `None`;
    /// corrupt ones are logged.
    fn load<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        let path = self.file_path(name);
        let content = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&content) {
            Ok(data) => Some(data),
            Err(e) => {
                warn!(file = %path.display(), error = %e, "ignoring unreadable save file");
                None
            }
        }
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    /// Progress with a stale schema version is treated as absent.
    pub fn load_progress(&self) -> ProgressData {
        match self.load::<ProgressData>(PROGRESS_FILE) {
            Some(pd) if !pd.needs_reset() => pd,
            Some(pd) => {
                warn!(
                    found = pd.schema_version,
                    "progress schema changed, starting fresh"
                );
                ProgressData::default()
            }
            None => ProgressData::default(),
        }
    }

    pub fn save_progress(&self, data: &ProgressData) -> Result<()> {
        self.save(PROGRESS_FILE, data)
    }

    pub fn load_history(&self) -> HistoryData {
        self.load(HISTORY_FILE).unwrap_or_default()
    }

    pub fn save_history(&self, data: &HistoryData) -> Result<()> {
        self.save(HISTORY_FILE, data)
    }

    /// Delete all saved progress and history.
    pub fn reset(&self) -> Result<()> {
        for name in [PROGRESS_FILE, HISTORY_FILE] {
            let path = self.file_path(name);
            if path.exists() {
                fs::remove_file(&path)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scoring::Title;
    use crate::session::mode::GameMode;
    use crate::session::result::GameResult;
    use tempfile::TempDir;

    fn make_test_store() -> (TempDir, JsonStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_fresh_store_has_defaults() {
        let (_dir, store) = make_test_store();
        let progress = store.load_progress();
        assert!(!progress.key_unlock_cleared);
        assert!(progress.titles.is_empty());
        assert!(store.load_history().results.is_empty());
    }

    #[test]
    fn test_progress_round_trip() {
        let (_dir, store) = make_test_store();
        let mut progress = ProgressData::default();
        progress.key_unlock_cleared = true;
        progress.titles.insert(GameMode::ClockSet, Title::Super);
        store.save_progress(&progress).unwrap();

        assert_eq!(store.load_progress(), progress);
    }

    #[test]
    fn test_progress_file_uses_storage_keys() {
        let (_dir, store) = make_test_store();
        let mut progress = ProgressData::default();
        progress.key_unlock_cleared = true;
        progress.titles.insert(GameMode::AnswerWithMemory, Title::Master);
        store.save_progress(&progress).unwrap();

        let raw = fs::read_to_string(store.file_path(PROGRESS_FILE)).unwrap();
        assert!(raw.contains("\"keyUnlockCleared\": true"));
        assert!(raw.contains("\"answerWithMemory\": \"マスター\""));
    }

    #[test]
    fn test_corrupt_progress_falls_back_to_default() {
        let (_dir, store) = make_test_store();
        fs::write(store.file_path(PROGRESS_FILE), "{ not json").unwrap();
        assert_eq!(store.load_progress(), ProgressData::default());

        fs::write(
            store.file_path(PROGRESS_FILE),
            r#"{"schema_version": 1, "keyUnlockCleared": "yes"}"#,
        )
        .unwrap();
        assert_eq!(store.load_progress(), ProgressData::default());
    }

    #[test]
    fn test_stale_schema_resets() {
        let (_dir, store) = make_test_store();
        fs::write(
            store.file_path(PROGRESS_FILE),
            r#"{"schema_version": 99, "keyUnlockCleared": true}"#,
        )
        .unwrap();
        assert!(!store.load_progress().key_unlock_cleared);
    }

    #[test]
    fn test_save_leaves_no_tmp_file() {
        let (dir, store) = make_test_store();
        store.save_progress(&ProgressData::default()).unwrap();
        let tmp_files: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("tmp"))
            .collect();
        assert!(tmp_files.is_empty(), "no residual .tmp files");
    }

    #[test]
    fn test_reset_removes_files() {
        let (_dir, store) = make_test_store();
        store.save_progress(&ProgressData::default()).unwrap();
        let mut history = HistoryData::default();
        history
            .results
            .push(GameResult::new(GameMode::KeyUnlock, 10, 10, 30, false));
        store.save_history(&history).unwrap();

        store.reset().unwrap();
        assert!(!store.file_path(PROGRESS_FILE).exists());
        assert!(!store.file_path(HISTORY_FILE).exists());
        assert!(store.load_history().results.is_empty());
    }
}
