use std::time::Instant;

use rand::rngs::SmallRng;

use crate::clock::{ClockTime, DragState, Hand};
use crate::session::answer_pad::AnswerPad;
use crate::session::mode::GameMode;
use crate::session::result::GameResult;

pub const TOTAL_QUESTIONS: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizPhase {
    /// Waiting for the player to match the target.
    Question,
    /// Current answer matches; waiting for "next".
    Correct,
    Complete,
    TimedOut,
}

impl QuizPhase {
    pub fn is_finished(self) -> bool {
        matches!(self, QuizPhase::Complete | QuizPhase::TimedOut)
    }
}

/// How the player answers: by moving the hands, or by picking numbers.
#[derive(Clone, Debug)]
pub enum AnswerInput {
    Dial { time: ClockTime, drag: DragState },
    Pad(AnswerPad),
}

impl AnswerInput {
    fn for_mode(mode: GameMode) -> Self {
        if mode.is_interactive() {
            AnswerInput::Dial {
                time: ClockTime::noon(),
                drag: DragState::default(),
            }
        } else {
            AnswerInput::Pad(AnswerPad::default())
        }
    }

    pub fn current(&self) -> Option<ClockTime> {
        match self {
            AnswerInput::Dial { time, .. } => Some(*time),
            AnswerInput::Pad(pad) => pad.answer(),
        }
    }
}

/// One ten-question session of any mode.
///
/// `Question(i) -> Correct(i) -> Question(i + 1) | Complete`, with an
/// optional countdown that can end the session early as `TimedOut`.
pub struct QuizState {
    pub mode: GameMode,
    pub question: u32,
    pub target: ClockTime,
    pub answer: AnswerInput,
    pub correct_count: u32,
    pub phase: QuizPhase,
    pub started_at: Instant,
    pub time_limit: Option<u32>,
    pub time_left: Option<u32>,
    rng: SmallRng,
}

impl QuizState {
    pub fn new(mode: GameMode, time_limit: Option<u32>, mut rng: SmallRng) -> Self {
        let target = ClockTime::random(&mut rng);
        Self {
            mode,
            question: 0,
            target,
            answer: AnswerInput::for_mode(mode),
            correct_count: 0,
            phase: QuizPhase::Question,
            started_at: Instant::now(),
            time_limit,
            time_left: time_limit,
            rng,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    pub fn is_correct(&self) -> bool {
        self.phase == QuizPhase::Correct
    }

    /// Position of the player's dial, for modes that have one.
    pub fn dial_time(&self) -> Option<ClockTime> {
        match &self.answer {
            AnswerInput::Dial { time, .. } => Some(*time),
            AnswerInput::Pad(_) => None,
        }
    }

    pub fn pad(&self) -> Option<&AnswerPad> {
        match &self.answer {
            AnswerInput::Pad(pad) => Some(pad),
            AnswerInput::Dial { .. } => None,
        }
    }

    pub fn dragging(&self) -> Option<Hand> {
        match &self.answer {
            AnswerInput::Dial { drag, .. } => drag.active(),
            AnswerInput::Pad(_) => None,
        }
    }

    /// Move the player's dial to `time` (interactive modes only).
    pub fn set_dial_time(&mut self, new_time: ClockTime) {
        if self.is_finished() {
            return;
        }
        if let AnswerInput::Dial { time, .. } = &mut self.answer {
            *time = new_time;
            self.check_answer();
        }
    }

    pub fn step_hour(&mut self, delta: i32) {
        if let Some(t) = self.dial_time() {
            self.set_dial_time(t.step_hour(delta));
        }
    }

    pub fn step_minute(&mut self, delta: i32) {
        if let Some(t) = self.dial_time() {
            self.set_dial_time(t.step_minute(delta));
        }
    }

    /// Pointer pressed at a dial-relative offset (dial radius = 1).
    pub fn press_dial(&mut self, dx: f64, dy: f64) -> Option<Hand> {
        if self.is_finished() {
            return None;
        }
        match &mut self.answer {
            AnswerInput::Dial { time, drag } => drag.press(*time, dx, dy),
            AnswerInput::Pad(_) => None,
        }
    }

    pub fn drag_dial(&mut self, dx: f64, dy: f64) {
        let moved = match &self.answer {
            AnswerInput::Dial { time, drag } => drag.drag(*time, dx, dy),
            AnswerInput::Pad(_) => None,
        };
        if let Some(t) = moved {
            self.set_dial_time(t);
        }
    }

    pub fn release_dial(&mut self) {
        if let AnswerInput::Dial { drag, .. } = &mut self.answer {
            drag.release();
        }
    }

    /// Apply `f` to the answer pad (reading modes only) and re-check.
    pub fn update_pad(&mut self, f: impl FnOnce(&mut AnswerPad)) {
        if self.is_finished() {
            return;
        }
        if let AnswerInput::Pad(pad) = &mut self.answer {
            f(pad);
            self.check_answer();
        }
    }

    fn check_answer(&mut self) {
        let correct = self
            .answer
            .current()
            .is_some_and(|answer| answer.matches(self.target));
        self.phase = if correct {
            QuizPhase::Correct
        } else {
            QuizPhase::Question
        };
    }

    pub fn next(&mut self) -> Option<GameResult> {
        self.next_at(Instant::now())
    }

    /// Advance past a correctly answered question. Ignored unless the
    /// current answer is correct. Returns the result after the last question.
    pub fn next_at(&mut self, now: Instant) -> Option<GameResult> {
        if self.phase != QuizPhase::Correct {
            return None;
        }
        self.correct_count += 1;

        if self.question + 1 >= TOTAL_QUESTIONS {
            self.phase = QuizPhase::Complete;
            let time_spent = now.saturating_duration_since(self.started_at).as_secs();
            return Some(GameResult::new(
                self.mode,
                self.correct_count,
                TOTAL_QUESTIONS,
                time_spent,
                false,
            ));
        }

        self.question += 1;
        self.target = ClockTime::random(&mut self.rng);
        self.answer = AnswerInput::for_mode(self.mode);
        self.phase = QuizPhase::Question;
        None
    }

    /// One second of the countdown. Returns the result when it hits zero.
    pub fn tick_second(&mut self) -> Option<GameResult> {
        if self.is_finished() {
            return None;
        }
        let left = self.time_left.as_mut()?;
        *left = left.saturating_sub(1);
        if *left > 0 {
            return None;
        }

        self.phase = QuizPhase::TimedOut;
        self.release_dial();
        let time_spent = self.time_limit.unwrap_or(0) as u64;
        Some(GameResult::new(
            self.mode,
            self.correct_count,
            TOTAL_QUESTIONS,
            time_spent,
            true,
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rand::SeedableRng;

    use super::*;
    use crate::engine::scoring::Title;

    fn quiz(mode: GameMode, limit: Option<u32>) -> QuizState {
        QuizState::new(mode, limit, SmallRng::seed_from_u64(42))
    }

    fn answer_correctly(q: &mut QuizState) {
        let target = q.target;
        if q.mode.is_interactive() {
            q.set_dial_time(target);
        } else {
            q.update_pad(|pad| {
                pad.select_hour(target.hour);
                pad.select_minute(target.minute);
            });
        }
    }

    #[test]
    fn test_interactive_dial_starts_at_noon() {
        let q = quiz(GameMode::ClockSet, None);
        assert_eq!(q.dial_time(), Some(ClockTime::noon()));
        assert!(q.pad().is_none());
        assert_eq!(q.phase, QuizPhase::Question);
    }

    #[test]
    fn test_next_ignored_until_correct() {
        let mut q = quiz(GameMode::ClockSet, None);
        let wrong = q.target.step_minute(1);
        q.set_dial_time(wrong);
        assert_eq!(q.next(), None);
        assert_eq!(q.question, 0);
        assert_eq!(q.correct_count, 0);
    }

    #[test]
    fn test_correct_can_revert_before_next() {
        let mut q = quiz(GameMode::ClockSet, None);
        answer_correctly(&mut q);
        assert!(q.is_correct());
        q.step_minute(1);
        assert_eq!(q.phase, QuizPhase::Question);
        assert_eq!(q.next(), None);
    }

    #[test]
    fn test_pad_answer_with_twelve_matches_zero_target() {
        let mut q = quiz(GameMode::AnswerWithoutMemory, None);
        q.target = ClockTime { hour: 0, minute: 15 };
        q.update_pad(|pad| {
            pad.select_hour(12);
            pad.select_minute(15);
        });
        assert!(q.is_correct());
    }

    #[test]
    fn test_full_run_completes_after_ten() {
        let mut q = quiz(GameMode::AnswerWithMemory, None);
        let start = q.started_at;
        for i in 0..TOTAL_QUESTIONS - 1 {
            assert_eq!(q.question, i);
            answer_correctly(&mut q);
            assert_eq!(q.next_at(start), None);
            assert!(q.pad().unwrap().answer().is_none(), "pad clears between questions");
        }
        answer_correctly(&mut q);
        let result = q.next_at(start + Duration::from_millis(42_900)).unwrap();
        assert_eq!(result.correct_count, 10);
        assert_eq!(result.total_questions, 10);
        assert_eq!(result.time_spent, 42);
        assert_eq!(result.score, 1080);
        assert_eq!(result.title, Title::Master);
        assert!(!result.timed_out);
        assert!(q.is_finished());
    }

    #[test]
    fn test_dial_resets_between_questions() {
        let mut q = quiz(GameMode::KeyUnlock, None);
        answer_correctly(&mut q);
        q.next();
        assert_eq!(q.question, 1);
        assert_eq!(q.dial_time(), Some(ClockTime::noon()));
    }

    #[test]
    fn test_countdown_times_out_with_partial_score() {
        let mut q = quiz(GameMode::ClockSet, Some(20));
        answer_correctly(&mut q);
        q.next();
        answer_correctly(&mut q);
        q.next();

        for _ in 0..19 {
            assert_eq!(q.tick_second(), None);
        }
        assert_eq!(q.time_left, Some(1));
        let result = q.tick_second().unwrap();
        assert!(result.timed_out);
        assert_eq!(result.correct_count, 2);
        assert_eq!(result.time_spent, 20);
        // 20% * 5 + (1000 - 200)
        assert_eq!(result.score, 900);
        assert_eq!(q.phase, QuizPhase::TimedOut);
    }

    #[test]
    fn test_nothing_happens_after_finish() {
        let mut q = quiz(GameMode::ClockSet, Some(1));
        assert!(q.tick_second().is_some());
        assert_eq!(q.tick_second(), None);
        answer_correctly(&mut q);
        assert_eq!(q.phase, QuizPhase::TimedOut);
        assert_eq!(q.next(), None);
    }

    #[test]
    fn test_no_limit_never_times_out() {
        let mut q = quiz(GameMode::ClockSet, None);
        for _ in 0..1000 {
            assert_eq!(q.tick_second(), None);
        }
        assert_eq!(q.phase, QuizPhase::Question);
    }

    #[test]
    fn test_drag_sets_minute_hand() {
        let mut q = quiz(GameMode::ClockSet, None);
        assert_eq!(q.press_dial(0.0, -0.8), Some(Hand::Minute));
        q.drag_dial(1.0, 0.0);
        assert_eq!(q.dial_time(), Some(ClockTime { hour: 12, minute: 15 }));
        q.release_dial();
        assert_eq!(q.dragging(), None);
        q.drag_dial(0.0, 1.0);
        assert_eq!(q.dial_time(), Some(ClockTime { hour: 12, minute: 15 }));
    }
}
