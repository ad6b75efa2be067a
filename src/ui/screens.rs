use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget, Wrap};
use rust_i18n::t;

use crate::app::{Alert, App, AppScreen};
use crate::session::quiz::{QuizState, TOTAL_QUESTIONS};
use crate::ui::components::clock_face::ClockFace;
use crate::ui::components::menu::MenuView;
use crate::ui::components::number_pad::NumberPad;
use crate::ui::components::progress_bar::ProgressBar;
use crate::ui::components::result_card::ResultCard;
use crate::ui::layout::{QuizLayout, centered_rect};

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()).fg(colors.fg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Menu => render_menu(frame, app),
        AppScreen::Quiz => render_quiz(frame, app),
        AppScreen::Result => render_result(frame, app),
        AppScreen::Settings => render_settings(frame, app),
    }

    if let Some(alert) = app.alert {
        render_alert(frame, app, alert);
    }
}

fn render_menu(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let menu_area = centered_rect(60, 90, layout[0]);
    frame.render_widget(MenuView::new(&app.menu, &app.progress, app.theme), menu_area);

    let footer = Paragraph::new(Line::from(Span::styled(
        format!(" {}", t!("menu.help")),
        Style::default().fg(colors.text_dim()),
    )));
    frame.render_widget(footer, layout[1]);
}

fn render_quiz(frame: &mut Frame, app: &App) {
    let Some(ref quiz) = app.quiz else {
        return;
    };
    let colors = &app.theme.colors;
    let layout = QuizLayout::new(frame.area(), quiz.mode);

    let mode_name = t!(format!("{}.name", quiz.mode.i18n_key()));
    let stars = "★".repeat(quiz.mode.stars());
    let mut header_spans = vec![Span::styled(
        format!(" {mode_name}{stars} "),
        Style::default()
            .fg(colors.header_fg())
            .bg(colors.header_bg())
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(left) = quiz.time_left {
        let style = if left <= 5 {
            Style::default().fg(colors.error()).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.header_fg())
        };
        header_spans.push(Span::styled(
            format!(" | {}", t!("quiz.time_left", seconds = left)),
            style.bg(colors.header_bg()),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(header_spans)).style(Style::default().bg(colors.header_bg())),
        layout.header,
    );

    let caption = t!(
        "quiz.progress",
        current = quiz.question + 1,
        total = TOTAL_QUESTIONS
    );
    let ratio = quiz.question as f64 / TOTAL_QUESTIONS as f64;
    frame.render_widget(ProgressBar::new(caption, ratio, app.theme), layout.progress);

    frame.render_widget(prompt(quiz, app), layout.prompt);

    let dial_time = quiz.dial_time().unwrap_or(quiz.target);
    let clock = ClockFace::new(dial_time, app.theme)
        .minute_numbers(quiz.mode.shows_minute_numbers())
        .active_hand(quiz.dragging());
    frame.render_widget(clock, layout.dial);

    render_answer(frame, app, quiz, layout);

    let help = match quiz.pad() {
        Some(_) => t!("quiz.help_pad"),
        None => t!("quiz.help_dial"),
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!(" {help}"),
            Style::default().fg(colors.text_dim()),
        ))),
        layout.footer,
    );
}

fn prompt<'a>(quiz: &QuizState, app: &App) -> Paragraph<'a> {
    let colors = &app.theme.colors;
    let bold = Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD);
    let mut lines = Vec::new();

    if quiz.mode.is_interactive() {
        lines.push(Line::from(Span::styled(t!("quiz.prompt_set").to_string(), bold)));
        let mut target = vec![Span::styled(
            quiz.target.to_string(),
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )];
        if quiz.mode.shows_readout()
            && let Some(t) = quiz.dial_time()
        {
            target.push(Span::styled(
                format!("   (🕒 {t})"),
                Style::default().fg(colors.text_dim()),
            ));
        }
        lines.push(Line::from(target));
    } else {
        lines.push(Line::from(Span::styled(t!("quiz.prompt_read").to_string(), bold)));
    }

    Paragraph::new(lines).alignment(Alignment::Center)
}

fn render_answer(frame: &mut Frame, app: &App, quiz: &QuizState, layout: QuizLayout) {
    let colors = &app.theme.colors;

    if let Some(pad) = quiz.pad() {
        NumberPad::new(pad, app.theme).render(layout.pad, frame.buffer_mut());
    }

    let mut lines = Vec::new();
    if let Some(answer) = quiz.pad().and_then(|p| p.answer()) {
        lines.push(Line::from(Span::styled(
            t!("quiz.your_answer", answer = answer).to_string(),
            Style::default().fg(colors.fg()),
        )));
    }
    if quiz.is_correct() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{}  ", t!("quiz.correct")),
                Style::default()
                    .fg(colors.success())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                t!("quiz.next").to_string(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
    }
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        layout.status,
    );
}

fn render_result(frame: &mut Frame, app: &App) {
    let Some(ref result) = app.last_result else {
        return;
    };
    let area = centered_rect(60, 60, frame.area());
    let card = ResultCard::new(
        result,
        app.last_update,
        app.best_score(result.mode),
        app.theme,
    );
    frame.render_widget(card, area);
}

fn time_limit_label(limit: Option<u32>) -> String {
    match limit {
        Some(seconds) => t!("settings.seconds", seconds = seconds).to_string(),
        None => t!("settings.none").to_string(),
    }
}

fn render_settings(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let centered = centered_rect(60, 70, area);

    let block = Block::bordered()
        .title(format!(" {} ", t!("settings.title")))
        .border_style(Style::default().fg(colors.accent()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(centered);
    block.render(centered, frame.buffer_mut());

    let fields: Vec<(String, String)> = vec![
        (
            t!("settings.time_limit").to_string(),
            time_limit_label(app.config.time_limit),
        ),
        (t!("settings.theme").to_string(), app.config.theme.clone()),
        (
            t!("settings.language").to_string(),
            app.config.language.clone(),
        ),
    ];

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(fields.len() as u16 * 3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

    let field_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(fields.iter().map(|_| Constraint::Length(3)).collect::<Vec<_>>())
        .split(layout[1]);

    for (i, (label, value)) in fields.iter().enumerate() {
        let is_selected = i == app.settings_selected;
        let indicator = if is_selected { " > " } else { "   " };

        let label_style = Style::default()
            .fg(if is_selected { colors.accent() } else { colors.fg() })
            .add_modifier(if is_selected {
                Modifier::BOLD
            } else {
                Modifier::empty()
            });
        let value_style = Style::default().fg(if is_selected {
            colors.warning()
        } else {
            colors.text_dim()
        });

        let lines = vec![
            Line::from(Span::styled(format!("{indicator}{label}:"), label_style)),
            Line::from(Span::styled(format!("     < {value} >"), value_style)),
        ];
        Paragraph::new(lines).render(field_layout[i], frame.buffer_mut());
    }

    let footer = Paragraph::new(Line::from(Span::styled(
        format!("  {}", t!("settings.help")),
        Style::default().fg(colors.accent()),
    )));
    footer.render(layout[3], frame.buffer_mut());
}

fn render_alert(frame: &mut Frame, app: &App, alert: Alert) {
    let colors = &app.theme.colors;
    let message = match alert {
        Alert::Locked => t!("alert.locked"),
    };

    let area = centered_rect(40, 20, frame.area());
    frame.render_widget(Clear, area);
    let block = Block::bordered()
        .title(format!(" {} ", t!("alert.title")))
        .border_style(Style::default().fg(colors.error()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default()
                .fg(colors.error())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            t!("alert.dismiss").to_string(),
            Style::default().fg(colors.text_dim()),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        inner,
    );
}
