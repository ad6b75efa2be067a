use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use crate::engine::progress::ProgressUpdate;
use crate::engine::scoring::Title;
use crate::session::result::GameResult;
use crate::ui::theme::Theme;

pub struct ResultCard<'a> {
    pub result: &'a GameResult,
    pub update: ProgressUpdate,
    pub best_score: Option<u32>,
    pub theme: &'a Theme,
}

impl<'a> ResultCard<'a> {
    pub fn new(
        result: &'a GameResult,
        update: ProgressUpdate,
        best_score: Option<u32>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            result,
            update,
            best_score,
            theme,
        }
    }
}

impl Widget for ResultCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let heading = if self.result.timed_out {
            t!("result.time_up")
        } else {
            t!("result.clear")
        };
        let block = Block::bordered()
            .title(format!(" {heading} "))
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        let label = |text: String| Span::styled(format!("  {text:<10}"), Style::default().fg(colors.fg()));
        let value_style = Style::default()
            .fg(colors.accent())
            .add_modifier(Modifier::BOLD);

        let accuracy = self.result.accuracy_percent();
        let acc_color = if accuracy >= 100 {
            colors.success()
        } else if accuracy >= 50 {
            colors.warning()
        } else {
            colors.error()
        };
        let acc_detail = t!(
            "result.correct_detail",
            correct = self.result.correct_count,
            total = self.result.total_questions
        );
        Paragraph::new(Line::from(vec![
            label(t!("result.accuracy").to_string()),
            Span::styled(
                format!("{accuracy}%"),
                Style::default().fg(acc_color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ({acc_detail})"),
                Style::default().fg(colors.text_dim()),
            ),
        ]))
        .render(layout[1], buf);

        Paragraph::new(Line::from(vec![
            label(t!("result.time").to_string()),
            Span::styled(
                t!("result.seconds", seconds = self.result.time_spent).to_string(),
                Style::default().fg(colors.fg()),
            ),
        ]))
        .render(layout[2], buf);

        let mut score_spans = vec![
            label(t!("result.score").to_string()),
            Span::styled(self.result.score.to_string(), value_style),
        ];
        if let Some(best) = self.best_score {
            score_spans.push(Span::styled(
                format!("  {}", t!("result.best", score = best)),
                Style::default().fg(colors.text_dim()),
            ));
        }
        Paragraph::new(Line::from(score_spans)).render(layout[3], buf);

        let title_color = match self.result.title {
            Title::Master => colors.error(),
            Title::Hyper => colors.warning(),
            Title::Super => colors.accent(),
            Title::Normal => colors.fg(),
        };
        let mut title_spans = vec![
            label(t!("result.title").to_string()),
            Span::styled(
                t!(format!("title.{}", self.result.title.key())).to_string(),
                Style::default()
                    .fg(title_color)
                    .add_modifier(Modifier::BOLD),
            ),
        ];
        if self.update.new_title.is_some() {
            title_spans.push(Span::styled(
                format!("  {}", t!("result.new_title")),
                Style::default().fg(colors.success()),
            ));
        }
        Paragraph::new(Line::from(title_spans)).render(layout[4], buf);

        if self.update.unlocked {
            Paragraph::new(Line::from(Span::styled(
                t!("result.unlocked").to_string(),
                Style::default()
                    .fg(colors.success())
                    .add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center)
            .render(layout[5], buf);
        }

        Paragraph::new(Line::from(Span::styled(
            format!("  {}", t!("result.help")),
            Style::default().fg(colors.accent()),
        )))
        .render(layout[6], buf);
    }
}
