use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Title {
    #[serde(rename = "ノーマル")]
    Normal,
    #[serde(rename = "スーパー")]
    Super,
    #[serde(rename = "ハイパー")]
    Hyper,
    #[serde(rename = "マスター")]
    Master,
}

impl Title {
    pub fn from_score(score: u32) -> Self {
        if score >= 1000 {
            Title::Master
        } else if score >= 700 {
            Title::Hyper
        } else if score >= 400 {
            Title::Super
        } else {
            Title::Normal
        }
    }

    pub fn rank(self) -> u8 {
        match self {
            Title::Normal => 1,
            Title::Super => 2,
            Title::Hyper => 3,
            Title::Master => 4,
        }
    }

    /// The label shown in game and written to the progress file.
    pub fn label(self) -> &'static str {
        match self {
            Title::Normal => "ノーマル",
            Title::Super => "スーパー",
            Title::Hyper => "ハイパー",
            Title::Master => "マスター",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Title::Normal => "normal",
            Title::Super => "super",
            Title::Hyper => "hyper",
            Title::Master => "master",
        }
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn accuracy_percent(correct_count: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    correct_count as f64 / total as f64 * 100.0
}

pub fn compute_score(correct_count: u32, total: u32, time_spent_secs: u64) -> u32 {
    let accuracy = accuracy_percent(correct_count, total);
    let time_bonus = (1000.0 - time_spent_secs as f64 * 10.0).max(0.0);
    (accuracy * 5.0 + time_bonus).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_instant_run_is_master() {
        let score = compute_score(10, 10, 0);
        assert_eq!(score, 1500);
        assert_eq!(Title::from_score(score), Title::Master);
        assert_eq!(Title::from_score(score).label(), "マスター");
    }

    #[test]
    fn test_time_bonus_floors_at_zero() {
        assert_eq!(compute_score(10, 10, 100), 500);
        assert_eq!(compute_score(10, 10, 5000), 500);
        assert_eq!(compute_score(0, 10, 5000), 0);
    }

    #[test]
    fn test_score_never_rises_with_time() {
        for correct in 0..=10 {
            let mut prev = compute_score(correct, 10, 0);
            for secs in 1..200 {
                let score = compute_score(correct, 10, secs);
                assert!(score <= prev, "correct={correct} secs={secs}");
                prev = score;
            }
        }
    }

    #[test]
    fn test_title_never_falls_with_score() {
        let mut prev = Title::from_score(0);
        for score in 1..2000 {
            let title = Title::from_score(score);
            assert!(title.rank() >= prev.rank(), "score={score}");
            prev = title;
        }
    }

    #[test]
    fn test_title_thresholds() {
        assert_eq!(Title::from_score(399), Title::Normal);
        assert_eq!(Title::from_score(400), Title::Super);
        assert_eq!(Title::from_score(699), Title::Super);
        assert_eq!(Title::from_score(700), Title::Hyper);
        assert_eq!(Title::from_score(999), Title::Hyper);
        assert_eq!(Title::from_score(1000), Title::Master);
    }

    #[test]
    fn test_title_serializes_as_japanese_label() {
        let json = serde_json::to_string(&Title::Hyper).unwrap();
        assert_eq!(json, "\"ハイパー\"");
    }
}
