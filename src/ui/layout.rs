use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::session::mode::GameMode;

/// Rows taken by the answer pad (two labelled button rows plus status).
const PAD_HEIGHT: u16 = 8;
const STATUS_HEIGHT: u16 = 3;
const PAD_ROWS_HEIGHT: u16 = 4;

/// Screen regions of a running quiz. Rendering and mouse hit-testing both
/// derive from this so the dial a click lands on is the dial that was drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuizLayout {
    pub header: Rect,
    pub progress: Rect,
    pub prompt: Rect,
    pub dial: Rect,
    pub answer: Rect,
    /// Number pad buttons; empty for dial modes.
    pub pad: Rect,
    /// Answer readout and correct/next line below the pad.
    pub status: Rect,
    pub footer: Rect,
}

impl QuizLayout {
    pub fn new(area: Rect, mode: GameMode) -> Self {
        let answer_height = if mode.is_interactive() {
            STATUS_HEIGHT
        } else {
            PAD_HEIGHT
        };

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Min(6),
                Constraint::Length(answer_height),
                Constraint::Length(1),
            ])
            .split(area);

        let answer = vertical[4];
        let (pad, status) = if mode.is_interactive() {
            (Rect::default(), answer)
        } else {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(PAD_ROWS_HEIGHT), Constraint::Min(0)])
                .split(answer);
            (centered_rect(80, 100, rows[0]), rows[1])
        };

        Self {
            header: vertical[0],
            progress: vertical[1],
            prompt: vertical[2],
            dial: dial_rect(vertical[3]),
            answer,
            pad,
            status,
            footer: vertical[5],
        }
    }
}

/// Largest rect inside `area` that draws a round dial. Terminal cells are
/// about twice as tall as they are wide, so the dial spans two columns per row.
pub fn dial_rect(area: Rect) -> Rect {
    let height = area.height.min(area.width / 2);
    let width = height * 2;
    let left = area.x + (area.width - width) / 2;
    let top = area.y + (area.height - height) / 2;
    Rect::new(left, top, width, height)
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_POPUP_WIDTH: u16 = 40;
    const MIN_POPUP_HEIGHT: u16 = 7;

    let requested_w = area.width.saturating_mul(percent_x.min(100)) / 100;
    let requested_h = area.height.saturating_mul(percent_y.min(100)) / 100;

    let target_w = requested_w.max(MIN_POPUP_WIDTH).min(area.width);
    let target_h = requested_h.max(MIN_POPUP_HEIGHT).min(area.height);

    let left = area
        .x
        .saturating_add((area.width.saturating_sub(target_w)) / 2);
    let top = area
        .y
        .saturating_add((area.height.saturating_sub(target_h)) / 2);

    Rect::new(left, top, target_w, target_h)
}
