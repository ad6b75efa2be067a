use tracing::info;

use crate::engine::scoring::Title;
use crate::session::mode::GameMode;
use crate::session::result::GameResult;
use crate::store::schema::{HISTORY_LIMIT, ProgressData};

/// What changed in the player's progress after recording a result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub unlocked: bool,
    pub new_title: Option<Title>,
}

impl ProgressData {
    pub fn is_unlocked(&self, mode: GameMode) -> bool {
        !mode.requires_unlock() || self.key_unlock_cleared
    }

    pub fn title(&self, mode: GameMode) -> Option<Title> {
        self.titles.get(&mode).copied()
    }

    /// Fold a finished game into the gate flag and title map. The gate never
    /// closes again and a title is only replaced by a strictly higher one.
    pub fn record(&mut self, result: &GameResult) -> ProgressUpdate {
        let mut update = ProgressUpdate::default();

        if result.mode == GameMode::KeyUnlock && !self.key_unlock_cleared {
            self.key_unlock_cleared = true;
            update.unlocked = true;
            info!("unlock gate cleared");
        }

        let upgrade = match self.titles.get(&result.mode) {
            Some(current) => result.title.rank() > current.rank(),
            None => true,
        };
        if upgrade {
            self.titles.insert(result.mode, result.title);
            update.new_title = Some(result.title);
            info!(mode = result.mode.as_str(), title = result.title.key(), "title upgraded");
        }

        update
    }
}

/// Append to history, dropping the oldest entries past the limit.
pub fn push_history(history: &mut Vec<GameResult>, result: GameResult) {
    history.push(result);
    if history.len() > HISTORY_LIMIT {
        let excess = history.len() - HISTORY_LIMIT;
        history.drain(..excess);
    }
}

pub fn best_score(history: &[GameResult], mode: GameMode) -> Option<u32> {
    history
        .iter()
        .filter(|r| r.mode == mode)
        .map(|r| r.score)
        .max()
}
