use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use crate::session::mode::GameMode;
use crate::store::schema::ProgressData;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Play(GameMode),
    Settings,
    Quit,
}

pub struct MenuItem {
    pub key: char,
    pub action: MenuAction,
}

pub struct Menu {
    pub items: Vec<MenuItem>,
    pub selected: usize,
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}

impl Menu {
    pub fn new() -> Self {
        let mut items: Vec<MenuItem> = GameMode::ALL
            .iter()
            .enumerate()
            .map(|(i, &mode)| MenuItem {
                key: char::from(b'1' + i as u8),
                action: MenuAction::Play(mode),
            })
            .collect();
        items.push(MenuItem {
            key: 'c',
            action: MenuAction::Settings,
        });
        items.push(MenuItem {
            key: 'q',
            action: MenuAction::Quit,
        });
        Self { items, selected: 0 }
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % self.items.len();
    }

    pub fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = self.items.len() - 1;
        }
    }

    pub fn selected_action(&self) -> MenuAction {
        self.items[self.selected].action
    }

    pub fn action_for_key(&self, key: char) -> Option<MenuAction> {
        self.items.iter().find(|i| i.key == key).map(|i| i.action)
    }
}

/// The menu drawn against the player's progress: locked modes are dimmed and
/// earned titles shown as badges.
pub struct MenuView<'a> {
    menu: &'a Menu,
    progress: &'a ProgressData,
    theme: &'a Theme,
}

impl<'a> MenuView<'a> {
    pub fn new(menu: &'a Menu, progress: &'a ProgressData, theme: &'a Theme) -> Self {
        Self {
            menu,
            progress,
            theme,
        }
    }

    fn item_lines(&self, item: &MenuItem, is_selected: bool) -> Vec<Line<'static>> {
        let colors = &self.theme.colors;
        let indicator = if is_selected { ">" } else { " " };
        let label_style = |enabled: bool| {
            let fg = if !enabled {
                colors.locked()
            } else if is_selected {
                colors.accent()
            } else {
                colors.fg()
            };
            Style::default().fg(fg).add_modifier(if is_selected {
                Modifier::BOLD
            } else {
                Modifier::empty()
            })
        };
        let dim = Style::default().fg(colors.text_dim());

        match item.action {
            MenuAction::Play(mode) => {
                let unlocked = self.progress.is_unlocked(mode);
                let stars = "★".repeat(mode.stars());
                let name = t!(format!("{}.name", mode.i18n_key()));
                let mut label = vec![Span::styled(
                    format!(" {indicator} [{}] {name}{stars}", item.key),
                    label_style(unlocked),
                )];
                if let Some(title) = self.progress.title(mode) {
                    label.push(Span::styled(
                        format!("  〔{}〕", t!(format!("title.{}", title.key()))),
                        Style::default()
                            .fg(colors.warning())
                            .add_modifier(Modifier::BOLD),
                    ));
                }

                let desc = if !unlocked {
                    Span::styled(
                        format!("     {}", t!("menu.locked")),
                        Style::default().fg(colors.locked()),
                    )
                } else if mode == GameMode::KeyUnlock && !self.progress.key_unlock_cleared {
                    Span::styled(
                        format!("     {}", t!("menu.first_clear")),
                        Style::default().fg(colors.error()),
                    )
                } else {
                    Span::styled(
                        format!("     {}", t!(format!("{}.desc", mode.i18n_key()))),
                        dim,
                    )
                };
                vec![Line::from(label), Line::from(desc)]
            }
            MenuAction::Settings => vec![
                Line::from(Span::styled(
                    format!(" {indicator} [{}] {}", item.key, t!("menu.settings")),
                    label_style(true),
                )),
                Line::from(Span::styled(
                    format!("     {}", t!("menu.settings_desc")),
                    dim,
                )),
            ],
            MenuAction::Quit => vec![
                Line::from(Span::styled(
                    format!(" {indicator} [{}] {}", item.key, t!("menu.quit")),
                    label_style(true),
                )),
                Line::from(Span::styled(format!("     {}", t!("menu.quit_desc")), dim)),
            ],
        }
    }
}

impl Widget for MenuView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let title_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                t!("app.title").to_string(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                t!("app.subtitle").to_string(),
                Style::default().fg(colors.fg()),
            )),
        ];
        Paragraph::new(title_lines)
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        let menu_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                self.menu
                    .items
                    .iter()
                    .map(|_| Constraint::Length(3))
                    .collect::<Vec<_>>(),
            )
            .split(layout[2]);

        for (i, item) in self.menu.items.iter().enumerate() {
            if i >= menu_layout.len() {
                break;
            }
            let lines = self.item_lines(item, i == self.menu.selected);
            Paragraph::new(lines).render(menu_layout[i], buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_lists_modes_then_settings_and_quit() {
        let menu = Menu::new();
        assert_eq!(menu.items.len(), 6);
        assert_eq!(menu.action_for_key('1'), Some(MenuAction::Play(GameMode::KeyUnlock)));
        assert_eq!(
            menu.action_for_key('4'),
            Some(MenuAction::Play(GameMode::AnswerWithoutMemory))
        );
        assert_eq!(menu.action_for_key('c'), Some(MenuAction::Settings));
        assert_eq!(menu.action_for_key('z'), None);
    }

    #[test]
    fn test_selection_wraps() {
        let mut menu = Menu::new();
        menu.prev();
        assert_eq!(menu.selected_action(), MenuAction::Quit);
        menu.next();
        assert_eq!(menu.selected_action(), MenuAction::Play(GameMode::KeyUnlock));
    }
}
