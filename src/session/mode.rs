use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameMode {
    KeyUnlock,
    ClockSet,
    AnswerWithMemory,
    AnswerWithoutMemory,
}

impl GameMode {
    pub const ALL: [GameMode; 4] = [
        GameMode::KeyUnlock,
        GameMode::ClockSet,
        GameMode::AnswerWithMemory,
        GameMode::AnswerWithoutMemory,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GameMode::KeyUnlock => "keyUnlock",
            GameMode::ClockSet => "clockSet",
            GameMode::AnswerWithMemory => "answerWithMemory",
            GameMode::AnswerWithoutMemory => "answerWithoutMemory",
        }
    }

    /// Locale key prefix for this mode's labels.
    pub fn i18n_key(self) -> &'static str {
        match self {
            GameMode::KeyUnlock => "mode.key_unlock",
            GameMode::ClockSet => "mode.clock_set",
            GameMode::AnswerWithMemory => "mode.answer_with_memory",
            GameMode::AnswerWithoutMemory => "mode.answer_without_memory",
        }
    }

    /// Every mode other than the unlock gate stays locked until it is cleared.
    pub fn requires_unlock(self) -> bool {
        self != GameMode::KeyUnlock
    }

    /// Player moves the hands instead of reading them.
    pub fn is_interactive(self) -> bool {
        matches!(self, GameMode::KeyUnlock | GameMode::ClockSet)
    }

    pub fn shows_readout(self) -> bool {
        self == GameMode::KeyUnlock
    }

    pub fn shows_minute_numbers(self) -> bool {
        matches!(self, GameMode::KeyUnlock | GameMode::AnswerWithMemory)
    }

    pub fn stars(self) -> usize {
        match self {
            GameMode::KeyUnlock => 0,
            GameMode::ClockSet => 1,
            GameMode::AnswerWithMemory => 2,
            GameMode::AnswerWithoutMemory => 3,
        }
    }
}
