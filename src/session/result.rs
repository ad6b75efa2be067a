use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::scoring::{self, Title};
use crate::session::mode::GameMode;

/// Outcome of one finished quiz. Built once when the session ends and never
/// modified afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub mode: GameMode,
    pub correct_count: u32,
    pub total_questions: u32,
    pub time_spent: u64,
    pub score: u32,
    pub title: Title,
    #[serde(default)]
    pub timed_out: bool,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl GameResult {
    pub fn new(
        mode: GameMode,
        correct_count: u32,
        total_questions: u32,
        time_spent: u64,
        timed_out: bool,
    ) -> Self {
        let correct_count = correct_count.min(total_questions);
        let score = scoring::compute_score(correct_count, total_questions, time_spent);
        Self {
            mode,
            correct_count,
            total_questions,
            time_spent,
            score,
            title: Title::from_score(score),
            timed_out,
            timestamp: Utc::now(),
        }
    }

    /// Accuracy rounded to a whole percent, as the result screen shows it.
    pub fn accuracy_percent(&self) -> u32 {
        scoring::accuracy_percent(self.correct_count, self.total_questions).round() as u32
    }
}
