use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};
use rust_i18n::t;

use crate::session::answer_pad::{AnswerPad, PadRow};
use crate::ui::theme::Theme;

/// Columns before the first button, holding the cursor marker and row label.
const LABEL_WIDTH: u16 = 10;
const BUTTON_WIDTH: u16 = 4;
/// Terminal rows per button row.
const ROW_HEIGHT: u16 = 2;

/// The button under a terminal cell of a pad drawn into `area`.
pub fn button_at(area: Rect, column: u16, row: u16) -> Option<(PadRow, usize)> {
    if area.is_empty() || row < area.y || column < area.x + LABEL_WIDTH {
        return None;
    }
    let pad_row = match (row - area.y) / ROW_HEIGHT {
        0 => PadRow::Hour,
        1 => PadRow::Minute,
        _ => return None,
    };
    let offset = column - area.x - LABEL_WIDTH;
    let index = (offset / BUTTON_WIDTH) as usize;
    // The trailing gap column belongs to no button.
    if offset % BUTTON_WIDTH == BUTTON_WIDTH - 1 || index >= AnswerPad::choices(pad_row).len() {
        return None;
    }
    Some((pad_row, index))
}

/// Two rows of number buttons for the reading modes.
pub struct NumberPad<'a> {
    pad: &'a AnswerPad,
    theme: &'a Theme,
}

impl<'a> NumberPad<'a> {
    pub fn new(pad: &'a AnswerPad, theme: &'a Theme) -> Self {
        Self { pad, theme }
    }

    fn row_line(&self, row: PadRow) -> Line<'static> {
        let colors = &self.theme.colors;
        let caption = match row {
            PadRow::Hour => t!("quiz.hour"),
            PadRow::Minute => t!("quiz.minute"),
        };
        let row_active = self.pad.row == row;
        let mut label = format!(" {} {caption}", if row_active { ">" } else { " " });
        let label_width = Line::from(label.as_str()).width();
        label.push_str(&" ".repeat((LABEL_WIDTH as usize).saturating_sub(label_width)));

        let mut spans = vec![Span::styled(
            label,
            Style::default().fg(if row_active {
                colors.accent()
            } else {
                colors.fg()
            }),
        )];

        for (col, &value) in AnswerPad::choices(row).iter().enumerate() {
            let under_cursor = row_active && self.pad.column == col;
            let mut style = if self.pad.is_selected(row, value) {
                Style::default()
                    .fg(colors.selected_fg())
                    .bg(colors.selected_bg())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };
            if under_cursor {
                style = style.add_modifier(Modifier::REVERSED | Modifier::UNDERLINED);
            }
            spans.push(Span::styled(format!("{value:>3}"), style));
            spans.push(Span::raw(" "));
        }
        Line::from(spans)
    }
}

impl Widget for NumberPad<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (i, row) in [PadRow::Hour, PadRow::Minute].into_iter().enumerate() {
            let y = area.y + i as u16 * ROW_HEIGHT;
            if y >= area.bottom() {
                break;
            }
            let line_area = Rect::new(area.x, y, area.width, 1);
            Paragraph::new(self.row_line(row)).render(line_area, buf);
        }
    }
}
