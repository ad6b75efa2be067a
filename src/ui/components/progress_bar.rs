use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Widget};

use crate::ui::theme::Theme;

/// Bordered one-row bar with a centred caption, used for question progress.
pub struct ProgressBar<'a> {
    pub caption: String,
    pub ratio: f64,
    pub theme: &'a Theme,
}

impl<'a> ProgressBar<'a> {
    pub fn new(caption: impl Into<String>, ratio: f64, theme: &'a Theme) -> Self {
        Self {
            caption: caption.into(),
            ratio: ratio.clamp(0.0, 1.0),
            theme,
        }
    }
}

impl Widget for ProgressBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered().border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let filled_width = (self.ratio * inner.width as f64).round() as u16;

        for x in inner.x..inner.x + inner.width {
            let style = if x < inner.x + filled_width {
                Style::default().fg(colors.bg()).bg(colors.bar_filled())
            } else {
                Style::default().fg(colors.fg()).bg(colors.bar_empty())
            };
            buf[(x, inner.y)].set_style(style);
        }

        // Display width, not byte length: captions may be Japanese.
        let caption_width = Line::from(self.caption.as_str()).width() as u16;
        let label_x = inner.x + (inner.width.saturating_sub(caption_width)) / 2;
        buf.set_stringn(
            label_x,
            inner.y,
            &self.caption,
            inner.width as usize,
            Style::default().add_modifier(Modifier::BOLD),
        );
    }
}
