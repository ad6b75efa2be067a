use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::KeyCode;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use ratatui::layout::Rect;
use tracing::{debug, info, warn};

use crate::config::{Config, ConfigOverrides};
use crate::engine::progress::{self, ProgressUpdate};
use crate::session::mode::GameMode;
use crate::session::quiz::QuizState;
use crate::session::result::GameResult;
use crate::store::json_store::JsonStore;
use crate::store::schema::{HistoryData, ProgressData};
use crate::ui::components::clock_face::cell_to_dial;
use crate::ui::components::menu::{Menu, MenuAction};
use crate::ui::components::number_pad::button_at;
use crate::ui::layout::QuizLayout;
use crate::ui::theme::Theme;

pub const SETTINGS_FIELDS: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Menu,
    Quiz,
    Result,
    Settings,
}

/// Blocking popup; any key dismisses it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alert {
    Locked,
}

pub struct App {
    pub screen: AppScreen,
    pub menu: Menu,
    pub theme: &'static Theme,
    /// Settings in effect, including command-line overrides.
    pub config: Config,
    pub progress: ProgressData,
    pub history: Vec<GameResult>,
    pub store: Option<JsonStore>,
    pub quiz: Option<QuizState>,
    pub last_result: Option<GameResult>,
    pub last_update: ProgressUpdate,
    pub alert: Option<Alert>,
    pub settings_selected: usize,
    pub should_quit: bool,
    /// Terminal area of the last frame, for mouse hit-testing.
    pub viewport: Rect,
    last_second: Instant,
    /// Settings as they are on disk; only settings-screen edits reach it.
    saved_config: Config,
    config_path: Option<PathBuf>,
}

impl App {
    pub fn new(config: Config, overrides: &ConfigOverrides) -> Self {
        let store = match JsonStore::new() {
            Ok(store) => Some(store),
            Err(e) => {
                warn!(error = %e, "save directory unavailable, progress will not be kept");
                None
            }
        };
        Self::with_store(config, store)
            .with_overrides(overrides)
            .with_config_file(Config::config_path())
    }

    pub fn with_store(config: Config, store: Option<JsonStore>) -> Self {
        let theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(theme));
        rust_i18n::set_locale(&config.language);

        let (progress, history) = match store {
            Some(ref s) => (s.load_progress(), s.load_history().results),
            None => (ProgressData::default(), Vec::new()),
        };
        info!(
            unlocked = progress.key_unlock_cleared,
            titles = progress.titles.len(),
            history = history.len(),
            "progress loaded"
        );

        let config_snapshot = config.clone();
        Self {
            screen: AppScreen::Menu,
            menu: Menu::new(),
            theme,
            config,
            progress,
            history,
            store,
            quiz: None,
            last_result: None,
            last_update: ProgressUpdate::default(),
            alert: None,
            settings_selected: 0,
            should_quit: false,
            viewport: Rect::default(),
            last_second: Instant::now(),
            saved_config: config_snapshot,
            config_path: None,
        }
    }

    /// Apply run-only settings on top of the loaded ones.
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if overrides.is_empty() {
            return self;
        }
        overrides.apply(&mut self.config);
        if let Some(theme) = Theme::load(&self.config.theme) {
            self.theme = Box::leak(Box::new(theme));
        }
        rust_i18n::set_locale(&self.config.language);
        info!(?overrides, "command-line overrides applied");
        self
    }

    /// Write settings-screen changes to `path`.
    pub fn with_config_file(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    pub fn activate(&mut self, action: MenuAction) {
        match action {
            MenuAction::Play(mode) => self.select_mode(mode),
            MenuAction::Settings => self.go_to_settings(),
            MenuAction::Quit => self.should_quit = true,
        }
    }

    /// Start `mode`, or raise the locked alert if the gate is still closed.
    pub fn select_mode(&mut self, mode: GameMode) {
        if !self.progress.is_unlocked(mode) {
            debug!(mode = mode.as_str(), "mode locked");
            self.alert = Some(Alert::Locked);
            return;
        }
        self.start_quiz(mode);
    }

    pub fn start_quiz(&mut self, mode: GameMode) {
        info!(
            mode = mode.as_str(),
            time_limit = ?self.config.time_limit,
            "quiz started"
        );
        self.quiz = Some(QuizState::new(
            mode,
            self.config.time_limit,
            SmallRng::from_entropy(),
        ));
        self.last_second = Instant::now();
        self.screen = AppScreen::Quiz;
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn quiz_next(&mut self) {
        let finished = self.quiz.as_mut().and_then(|q| q.next());
        if let Some(result) = finished {
            self.finish_quiz(result);
        }
    }

    /// Feed elapsed wall-clock seconds into the quiz countdown.
    pub fn advance_clock(&mut self, now: Instant) {
        if self.screen != AppScreen::Quiz {
            return;
        }
        while now.saturating_duration_since(self.last_second) >= Duration::from_secs(1) {
            self.last_second += Duration::from_secs(1);
            let finished = self.quiz.as_mut().and_then(|q| q.tick_second());
            if let Some(result) = finished {
                self.finish_quiz(result);
                return;
            }
        }
    }

    fn finish_quiz(&mut self, result: GameResult) {
        info!(
            mode = result.mode.as_str(),
            correct = result.correct_count,
            time_spent = result.time_spent,
            score = result.score,
            title = result.title.key(),
            timed_out = result.timed_out,
            "quiz finished"
        );
        self.last_update = self.progress.record(&result);
        progress::push_history(&mut self.history, result.clone());
        self.last_result = Some(result);
        self.quiz = None;
        self.screen = AppScreen::Result;
        self.save_data();
    }

    fn save_data(&self) {
        let Some(ref store) = self.store else {
            return;
        };
        if let Err(e) = store.save_progress(&self.progress) {
            warn!(error = %e, "failed to save progress");
        }
        let history = HistoryData {
            results: self.history.clone(),
            ..HistoryData::default()
        };
        if let Err(e) = store.save_history(&history) {
            warn!(error = %e, "failed to save history");
        }
    }

    pub fn best_score(&self, mode: GameMode) -> Option<u32> {
        progress::best_score(&self.history, mode)
    }

    pub fn retry(&mut self) {
        if let Some(mode) = self.last_result.as_ref().map(|r| r.mode) {
            self.start_quiz(mode);
        }
    }

    pub fn go_to_menu(&mut self) {
        if self.quiz.take().is_some() {
            debug!("quiz abandoned");
        }
        self.screen = AppScreen::Menu;
    }

    pub fn go_to_settings(&mut self) {
        self.settings_selected = 0;
        self.screen = AppScreen::Settings;
    }

    pub fn settings_cycle_forward(&mut self) {
        match self.settings_selected {
            0 => self.config.cycle_time_limit_forward(),
            1 => self.cycle_theme(1),
            2 => self.cycle_language(),
            _ => return,
        }
        self.save_setting();
    }

    pub fn settings_cycle_backward(&mut self) {
        match self.settings_selected {
            0 => self.config.cycle_time_limit_backward(),
            1 => self.cycle_theme(-1),
            2 => self.cycle_language(),
            _ => return,
        }
        self.save_setting();
    }

    /// Copy the edited field to the on-disk settings and write them. Other
    /// fields keep their saved values, so command-line overrides stay
    /// out of the file.
    fn save_setting(&mut self) {
        match self.settings_selected {
            0 => self.saved_config.time_limit = self.config.time_limit,
            1 => self.saved_config.theme = self.config.theme.clone(),
            2 => self.saved_config.language = self.config.language.clone(),
            _ => return,
        }
        let Some(ref path) = self.config_path else {
            return;
        };
        if let Err(e) = self.saved_config.save_to(path) {
            warn!(error = %e, "failed to save config");
        }
    }

    fn cycle_theme(&mut self, delta: isize) {
        let themes = Theme::available_themes();
        if themes.is_empty() {
            return;
        }
        let idx = themes
            .iter()
            .position(|t| *t == self.config.theme)
            .unwrap_or(0) as isize;
        let next = (idx + delta).rem_euclid(themes.len() as isize) as usize;
        self.config.theme = themes[next].clone();
        if let Some(new_theme) = Theme::load(&self.config.theme) {
            let theme: &'static Theme = Box::leak(Box::new(new_theme));
            self.theme = theme;
        }
    }

    fn cycle_language(&mut self) {
        self.config.cycle_language();
        rust_i18n::set_locale(&self.config.language);
    }

    pub fn reset_progress(&mut self) {
        if let Some(ref store) = self.store
            && let Err(e) = store.reset()
        {
            warn!(error = %e, "failed to reset progress");
        }
        self.progress = ProgressData::default();
        self.history.clear();
        info!("progress reset");
    }

    fn quiz_layout(&self) -> Option<QuizLayout> {
        let quiz = self.quiz.as_ref()?;
        Some(QuizLayout::new(self.viewport, quiz.mode))
    }

    /// Keys on the quiz screen. Dial modes step the hands; pad modes move
    /// the cursor, confirm, or take typed digits.
    pub fn quiz_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.go_to_menu();
                return;
            }
            KeyCode::Enter => {
                self.quiz_next();
                return;
            }
            _ => {}
        }
        let Some(quiz) = self.quiz.as_mut() else {
            return;
        };

        if quiz.pad().is_some() {
            match code {
                KeyCode::Left | KeyCode::Char('h') => quiz.update_pad(|p| p.move_left()),
                KeyCode::Right | KeyCode::Char('l') => quiz.update_pad(|p| p.move_right()),
                KeyCode::Tab
                | KeyCode::Up
                | KeyCode::Down
                | KeyCode::Char('k')
                | KeyCode::Char('j') => quiz.update_pad(|p| p.switch_row()),
                KeyCode::Char(' ') => quiz.update_pad(|p| p.confirm()),
                KeyCode::Char(ch) => {
                    if let Some(digit) = ch.to_digit(10) {
                        quiz.update_pad(|p| p.select_digit(digit as u8));
                    }
                }
                _ => {}
            }
        } else {
            match code {
                KeyCode::Left | KeyCode::Char('h') => quiz.step_hour(-1),
                KeyCode::Right | KeyCode::Char('l') => quiz.step_hour(1),
                KeyCode::Up | KeyCode::Char('k') => quiz.step_minute(1),
                KeyCode::Down | KeyCode::Char('j') => quiz.step_minute(-1),
                _ => {}
            }
        }
    }

    /// A press grabs the nearest hand without moving it, or clicks a pad button.
    pub fn mouse_down(&mut self, column: u16, row: u16) {
        let Some(layout) = self.quiz_layout() else {
            return;
        };
        let Some(quiz) = self.quiz.as_mut() else {
            return;
        };

        if quiz.pad().is_some() {
            if let Some((pad_row, index)) = button_at(layout.pad, column, row) {
                quiz.update_pad(|p| p.press(pad_row, index));
            }
            return;
        }

        let (dx, dy) = cell_to_dial(layout.dial, column, row);
        if let Some(hand) = quiz.press_dial(dx, dy) {
            debug!(?hand, "hand grabbed");
        }
    }

    pub fn mouse_drag(&mut self, column: u16, row: u16) {
        let Some(layout) = self.quiz_layout() else {
            return;
        };
        let (dx, dy) = cell_to_dial(layout.dial, column, row);
        if let Some(quiz) = self.quiz.as_mut() {
            quiz.drag_dial(dx, dy);
        }
    }

    pub fn mouse_up(&mut self) {
        if let Some(quiz) = self.quiz.as_mut() {
            quiz.release_dial();
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::clock::ClockTime;
    use crate::engine::scoring::Title;
    use crate::session::answer_pad::PadRow;

    fn make_app() -> (TempDir, App) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        (dir, App::with_store(Config::default(), Some(store)))
    }

    fn solve_current(app: &mut App) {
        let quiz = app.quiz.as_mut().unwrap();
        let target = quiz.target;
        if quiz.mode.is_interactive() {
            quiz.set_dial_time(target);
        } else {
            quiz.update_pad(|pad| {
                pad.select_hour(target.hour);
                pad.select_minute(target.minute);
            });
        }
        app.quiz_next();
    }

    #[test]
    fn test_locked_mode_raises_alert() {
        let (_dir, mut app) = make_app();
        app.select_mode(GameMode::ClockSet);
        assert_eq!(app.alert, Some(Alert::Locked));
        assert_eq!(app.screen, AppScreen::Menu);
        assert!(app.quiz.is_none());
        app.dismiss_alert();
        assert_eq!(app.alert, None);
    }

    #[test]
    fn test_clearing_unlock_opens_other_modes() {
        let (dir, mut app) = make_app();
        app.select_mode(GameMode::KeyUnlock);
        assert_eq!(app.screen, AppScreen::Quiz);
        for _ in 0..10 {
            solve_current(&mut app);
        }
        assert_eq!(app.screen, AppScreen::Result);
        assert!(app.last_update.unlocked);
        assert!(app.progress.key_unlock_cleared);
        assert_eq!(app.progress.title(GameMode::KeyUnlock), Some(Title::Master));

        app.go_to_menu();
        app.select_mode(GameMode::AnswerWithoutMemory);
        assert_eq!(app.alert, None);
        assert_eq!(app.screen, AppScreen::Quiz);

        // Persisted for the next launch.
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        let reloaded = App::with_store(Config::default(), Some(store));
        assert!(reloaded.progress.key_unlock_cleared);
        assert_eq!(reloaded.history.len(), 1);
    }

    #[test]
    fn test_countdown_ends_quiz_from_wall_clock() {
        let (_dir, mut app) = make_app();
        app.config.time_limit = Some(20);
        app.select_mode(GameMode::KeyUnlock);
        let start = app.last_second;

        app.advance_clock(start + Duration::from_millis(19_500));
        assert_eq!(app.screen, AppScreen::Quiz);
        assert_eq!(app.quiz.as_ref().unwrap().time_left, Some(1));

        app.advance_clock(start + Duration::from_secs(20));
        assert_eq!(app.screen, AppScreen::Result);
        let result = app.last_result.as_ref().unwrap();
        assert!(result.timed_out);
        assert_eq!(result.time_spent, 20);
        assert_eq!(result.correct_count, 0);
        // The unlock quiz opens the gate even when it runs out of time.
        assert!(app.progress.key_unlock_cleared);
    }

    #[test]
    fn test_back_abandons_without_result() {
        let (_dir, mut app) = make_app();
        app.select_mode(GameMode::KeyUnlock);
        app.go_to_menu();
        assert!(app.quiz.is_none());
        assert!(app.last_result.is_none());
        assert!(app.history.is_empty());
    }

    #[test]
    fn test_retry_restarts_same_mode() {
        let (_dir, mut app) = make_app();
        app.config.time_limit = Some(1);
        app.select_mode(GameMode::KeyUnlock);
        let start = app.last_second;
        app.advance_clock(start + Duration::from_secs(1));
        assert_eq!(app.screen, AppScreen::Result);

        app.retry();
        assert_eq!(app.screen, AppScreen::Quiz);
        assert_eq!(app.quiz.as_ref().unwrap().mode, GameMode::KeyUnlock);
    }

    #[test]
    fn test_mouse_drag_moves_minute_hand() {
        let (_dir, mut app) = make_app();
        app.viewport = Rect::new(0, 0, 120, 40);
        app.select_mode(GameMode::KeyUnlock);
        let dial = QuizLayout::new(app.viewport, GameMode::KeyUnlock).dial;
        let cx = dial.x + dial.width / 2;
        let cy = dial.y + dial.height / 2;

        // Grab near the top (minute hand tip at noon), drag to the right.
        app.mouse_down(cx, dial.y + dial.height / 5);
        assert!(app.quiz.as_ref().unwrap().dragging().is_some());
        // Pressing alone leaves the hands where they were.
        assert_eq!(
            app.quiz.as_ref().unwrap().dial_time(),
            Some(ClockTime::noon())
        );
        app.mouse_drag(dial.x + dial.width - 2, cy);
        app.mouse_up();

        let time = app.quiz.as_ref().unwrap().dial_time().unwrap();
        assert_eq!(time.hour, 12);
        assert!((13..=17).contains(&time.minute), "minute {}", time.minute);
        assert_eq!(app.quiz.as_ref().unwrap().dragging(), None);
    }

    fn unlock(app: &mut App) {
        app.progress.key_unlock_cleared = true;
    }

    #[test]
    fn test_arrow_keys_set_dial_to_target() {
        let (_dir, mut app) = make_app();
        app.select_mode(GameMode::KeyUnlock);
        let target = app.quiz.as_ref().unwrap().target;

        for _ in 0..target.dial_hour() % 12 {
            app.quiz_key(KeyCode::Right);
        }
        for _ in 0..target.minute / 5 {
            app.quiz_key(KeyCode::Up);
        }
        assert!(app.quiz.as_ref().unwrap().is_correct(), "target {target}");

        app.quiz_key(KeyCode::Char('j'));
        assert!(!app.quiz.as_ref().unwrap().is_correct());
        app.quiz_key(KeyCode::Char('k'));
        app.quiz_key(KeyCode::Enter);
        assert_eq!(app.quiz.as_ref().unwrap().question, 1);

        app.quiz_key(KeyCode::Esc);
        assert_eq!(app.screen, AppScreen::Menu);
        assert!(app.quiz.is_none());
    }

    #[test]
    fn test_hour_keys_wrap_around_dial() {
        let (_dir, mut app) = make_app();
        app.select_mode(GameMode::KeyUnlock);
        app.quiz_key(KeyCode::Right);
        assert_eq!(
            app.quiz.as_ref().unwrap().dial_time(),
            Some(ClockTime { hour: 1, minute: 0 })
        );
        app.quiz_key(KeyCode::Left);
        app.quiz_key(KeyCode::Char('h'));
        app.quiz_key(KeyCode::Down);
        assert_eq!(
            app.quiz.as_ref().unwrap().dial_time(),
            Some(ClockTime { hour: 11, minute: 55 })
        );
    }

    #[test]
    fn test_typed_digits_answer_pad_question() {
        let (_dir, mut app) = make_app();
        unlock(&mut app);
        app.select_mode(GameMode::AnswerWithMemory);
        let quiz = app.quiz.as_mut().unwrap();
        quiz.target = ClockTime { hour: 11, minute: 55 };

        for ch in ['1', '1', '5', '5'] {
            app.quiz_key(KeyCode::Char(ch));
        }
        let quiz = app.quiz.as_ref().unwrap();
        assert_eq!(quiz.pad().unwrap().answer(), Some(quiz.target));
        assert!(quiz.is_correct());
    }

    #[test]
    fn test_clicking_pad_buttons_answers() {
        let (_dir, mut app) = make_app();
        unlock(&mut app);
        app.viewport = Rect::new(0, 0, 120, 40);
        app.select_mode(GameMode::AnswerWithoutMemory);
        app.quiz.as_mut().unwrap().target = ClockTime { hour: 3, minute: 20 };
        let pad = QuizLayout::new(app.viewport, GameMode::AnswerWithoutMemory).pad;

        let hit = |row: PadRow, index: u16| {
            (0..pad.width)
                .map(|dx| pad.x + dx)
                .find(|&col| {
                    let y = if row == PadRow::Hour { pad.y } else { pad.y + 2 };
                    button_at(pad, col, y) == Some((row, index as usize))
                })
                .unwrap()
        };

        app.mouse_down(hit(PadRow::Hour, 2), pad.y);
        app.mouse_up();
        app.mouse_down(hit(PadRow::Minute, 4), pad.y + 2);
        app.mouse_up();

        let quiz = app.quiz.as_ref().unwrap();
        assert_eq!(
            quiz.pad().unwrap().answer(),
            Some(ClockTime { hour: 3, minute: 20 })
        );
        assert!(quiz.is_correct());
    }

    #[test]
    fn test_settings_cycle_time_limit() {
        let (_dir, mut app) = make_app();
        app.go_to_settings();
        app.settings_cycle_forward();
        assert_eq!(app.config.time_limit, Some(20));
        app.settings_cycle_backward();
        app.settings_cycle_backward();
        assert_eq!(app.config.time_limit, Some(60));
    }

    #[test]
    fn test_settings_written_on_each_change() {
        let (dir, app) = make_app();
        let path = dir.path().join("config.toml");
        let mut app = app.with_config_file(path.clone());
        app.go_to_settings();

        app.settings_cycle_forward();
        assert_eq!(Config::load_from(&path).unwrap().time_limit, Some(20));

        app.settings_selected = 2;
        app.settings_cycle_forward();
        let saved = Config::load_from(&path).unwrap();
        assert_eq!(saved.language, "en");
        assert_eq!(saved.time_limit, Some(20));
        rust_i18n::set_locale("ja");
    }

    #[test]
    fn test_command_line_overrides_are_not_saved() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        let overrides = ConfigOverrides {
            time_limit: Some(Some(45)),
            ..ConfigOverrides::default()
        };
        let mut app = App::with_store(Config::default(), Some(store))
            .with_overrides(&overrides)
            .with_config_file(path.clone());
        assert_eq!(app.config.time_limit, Some(45));

        app.go_to_settings();
        app.settings_selected = 1;
        app.settings_cycle_forward();
        let saved = Config::load_from(&path).unwrap();
        assert_eq!(saved.theme, app.config.theme);
        assert_ne!(saved.theme, "daylight");
        assert_eq!(saved.time_limit, None);

        app.go_to_menu();
        assert_eq!(Config::load_from(&path).unwrap().time_limit, None);
        assert_eq!(app.config.time_limit, Some(45));
    }

    #[test]
    fn test_reset_progress_clears_everything() {
        let (_dir, mut app) = make_app();
        app.progress.key_unlock_cleared = true;
        app.progress
            .titles
            .insert(GameMode::ClockSet, Title::Super);
        app.reset_progress();
        assert_eq!(app.progress, ProgressData::default());
        assert!(app.history.is_empty());
    }
}
