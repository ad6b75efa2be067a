use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::Widget;
use ratatui::widgets::canvas::{Canvas, Circle, Context, Line as CanvasLine};

use crate::clock::angle::{self, hand_tip};
use crate::clock::drag::{HOUR_HAND_LENGTH, MINUTE_HAND_LENGTH};
use crate::clock::time::MINUTE_STEPS;
use crate::clock::{ClockTime, Hand};
use crate::ui::theme::Theme;

/// Canvas half-extent in dial radii; leaves room for the minute ring.
pub const DIAL_EXTENT: f64 = 1.35;
const HOUR_NUMBER_RADIUS: f64 = 0.78;
const MINUTE_NUMBER_RADIUS: f64 = 1.18;

/// Convert a terminal cell inside `area` to an offset from the dial centre
/// in dial radii, y growing downwards.
pub fn cell_to_dial(area: Rect, column: u16, row: u16) -> (f64, f64) {
    let half_w = area.width as f64 / 2.0;
    let half_h = area.height as f64 / 2.0;
    if half_w == 0.0 || half_h == 0.0 {
        return (0.0, 0.0);
    }
    let px = column as f64 + 0.5 - (area.x as f64 + half_w);
    let py = row as f64 + 0.5 - (area.y as f64 + half_h);
    (px / half_w * DIAL_EXTENT, py / half_h * DIAL_EXTENT)
}

pub struct ClockFace<'a> {
    time: ClockTime,
    show_minute_numbers: bool,
    active_hand: Option<Hand>,
    theme: &'a Theme,
}

impl<'a> ClockFace<'a> {
    pub fn new(time: ClockTime, theme: &'a Theme) -> Self {
        Self {
            time,
            show_minute_numbers: false,
            active_hand: None,
            theme,
        }
    }

    pub fn minute_numbers(mut self, show: bool) -> Self {
        self.show_minute_numbers = show;
        self
    }

    pub fn active_hand(mut self, hand: Option<Hand>) -> Self {
        self.active_hand = hand;
        self
    }

    fn hand_color(&self, hand: Hand) -> Color {
        let colors = &self.theme.colors;
        if self.active_hand == Some(hand) {
            return colors.hand_active();
        }
        match hand {
            Hand::Hour => colors.hour_hand(),
            Hand::Minute => colors.minute_hand(),
        }
    }
}

/// Canvas y points up, dial math has y pointing down.
fn to_canvas((x, y): (f64, f64)) -> (f64, f64) {
    (x, -y)
}

fn draw_hand(ctx: &mut Context, angle_deg: f64, length: f64, thickness: f64, color: Color) {
    let (x, y) = to_canvas(hand_tip(angle_deg, length));
    // Offset copies along the normal to fake a wider stroke.
    let (nx, ny) = to_canvas(hand_tip(angle_deg + 90.0, thickness));
    let strokes: &[f64] = if thickness > 0.0 { &[-1.0, 0.0, 1.0] } else { &[0.0] };
    for &k in strokes {
        ctx.draw(&CanvasLine::new(
            nx * k,
            ny * k,
            x + nx * k,
            y + ny * k,
            color,
        ));
    }
}

impl Widget for ClockFace<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 2 {
            return;
        }
        let colors = &self.theme.colors;
        let angles = angle::hand_angles(self.time);
        // Canvas units per terminal column, for centring labels.
        let cell_w = 2.0 * DIAL_EXTENT / area.width as f64;

        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .background_color(colors.bg())
            .x_bounds([-DIAL_EXTENT, DIAL_EXTENT])
            .y_bounds([-DIAL_EXTENT, DIAL_EXTENT])
            .paint(|ctx| {
                ctx.draw(&Circle {
                    x: 0.0,
                    y: 0.0,
                    radius: 1.0,
                    color: colors.dial_rim(),
                });

                draw_hand(
                    ctx,
                    angles.minute,
                    MINUTE_HAND_LENGTH,
                    0.0,
                    self.hand_color(Hand::Minute),
                );
                draw_hand(
                    ctx,
                    angles.hour,
                    HOUR_HAND_LENGTH,
                    0.015,
                    self.hand_color(Hand::Hour),
                );
                ctx.draw(&Circle {
                    x: 0.0,
                    y: 0.0,
                    radius: 0.04,
                    color: colors.fg(),
                });

                ctx.layer();
                for hour in 1..=12u8 {
                    let angle = hour as f64 * 30.0 - 90.0;
                    let (x, y) = to_canvas(hand_tip(angle, HOUR_NUMBER_RADIUS));
                    let label = hour.to_string();
                    let offset = label.len() as f64 * cell_w / 2.0;
                    ctx.print(
                        x - offset,
                        y,
                        Span::styled(
                            label,
                            Style::default()
                                .fg(colors.dial_numbers())
                                .add_modifier(Modifier::BOLD),
                        ),
                    );
                }
                if self.show_minute_numbers {
                    for minute in MINUTE_STEPS {
                        let angle = minute as f64 * 6.0 - 90.0;
                        let (x, y) = to_canvas(hand_tip(angle, MINUTE_NUMBER_RADIUS));
                        let label = minute.to_string();
                        let offset = label.len() as f64 * cell_w / 2.0;
                        ctx.print(
                            x - offset,
                            y,
                            Span::styled(label, Style::default().fg(colors.dial_minutes())),
                        );
                    }
                }
            });
        canvas.render(area, buf);
    }
}
