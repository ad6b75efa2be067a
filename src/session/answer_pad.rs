use crate::clock::time::{ClockTime, MINUTE_STEPS};

pub const HOUR_CHOICES: [u8; 12] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PadRow {
    Hour,
    Minute,
}

/// Two rows of number buttons (hours 1-12, minutes 0-55) with a keyboard
/// cursor. An answer exists once one button from each row is selected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerPad {
    pub selected_hour: Option<u8>,
    pub selected_minute: Option<u8>,
    pub row: PadRow,
    pub column: usize,
    /// First digit of a two-digit number typed on the keyboard.
    pending_digit: Option<u8>,
}

impl Default for AnswerPad {
    fn default() -> Self {
        Self {
            selected_hour: None,
            selected_minute: None,
            row: PadRow::Hour,
            column: 0,
            pending_digit: None,
        }
    }
}

impl AnswerPad {
    pub fn choices(row: PadRow) -> &'static [u8; 12] {
        match row {
            PadRow::Hour => &HOUR_CHOICES,
            PadRow::Minute => &MINUTE_STEPS,
        }
    }

    pub fn answer(&self) -> Option<ClockTime> {
        Some(ClockTime {
            hour: self.selected_hour?,
            minute: self.selected_minute?,
        })
    }

    pub fn select_hour(&mut self, hour: u8) {
        if let Some(idx) = HOUR_CHOICES.iter().position(|&h| h == hour) {
            self.selected_hour = Some(hour);
            self.row = PadRow::Hour;
            self.column = idx;
        }
    }

    pub fn select_minute(&mut self, minute: u8) {
        if let Some(idx) = MINUTE_STEPS.iter().position(|&m| m == minute) {
            self.selected_minute = Some(minute);
            self.row = PadRow::Minute;
            self.column = idx;
        }
    }

    pub fn move_left(&mut self) {
        self.pending_digit = None;
        self.column = if self.column == 0 { 11 } else { self.column - 1 };
    }

    pub fn move_right(&mut self) {
        self.pending_digit = None;
        self.column = (self.column + 1) % 12;
    }

    pub fn switch_row(&mut self) {
        self.pending_digit = None;
        self.row = match self.row {
            PadRow::Hour => PadRow::Minute,
            PadRow::Minute => PadRow::Hour,
        };
    }

    /// Select the button under the cursor. Picking an hour moves the cursor
    /// to the minute row so two presses give a full answer.
    pub fn confirm(&mut self) {
        self.pending_digit = None;
        let value = Self::choices(self.row)[self.column];
        match self.row {
            PadRow::Hour => {
                self.selected_hour = Some(value);
                if self.selected_minute.is_none() {
                    self.row = PadRow::Minute;
                    self.column = 0;
                }
            }
            PadRow::Minute => self.selected_minute = Some(value),
        }
    }

    /// A click on button `index` of `row`.
    pub fn press(&mut self, row: PadRow, index: usize) {
        if index >= Self::choices(row).len() {
            return;
        }
        self.row = row;
        self.column = index;
        self.confirm();
    }

    /// Typed digits. Hours: `2`-`9` pick that hour, `1` then `0`-`2` picks
    /// 10-12. Minutes: the first digit picks its tens (`3` -> 30) and a second
    /// digit completes the number (`5`, `5` -> 55). Numbers off the grid are
    /// ignored.
    pub fn select_digit(&mut self, digit: u8) {
        let pending = self.pending_digit.take();
        match self.row {
            PadRow::Hour => {
                let hour = match pending {
                    Some(1) if digit <= 2 => 10 + digit,
                    _ if digit == 0 || digit > 9 => return,
                    _ => digit,
                };
                self.select_hour(hour);
                if hour == 1 {
                    self.pending_digit = Some(1);
                } else {
                    self.enter_minute_row();
                }
            }
            PadRow::Minute => match pending {
                Some(tens) => self.select_minute(tens * 10 + digit),
                None if digit <= 5 => {
                    self.select_minute(digit * 10);
                    self.pending_digit = Some(digit);
                }
                None => {}
            },
        }
    }

    fn enter_minute_row(&mut self) {
        self.row = PadRow::Minute;
        self.column = self
            .selected_minute
            .and_then(|m| MINUTE_STEPS.iter().position(|&s| s == m))
            .unwrap_or(0);
    }

    pub fn is_selected(&self, row: PadRow, value: u8) -> bool {
        match row {
            PadRow::Hour => self.selected_hour == Some(value),
            PadRow::Minute => self.selected_minute == Some(value),
        }
    }
}
