use crate::clock::angle::{self, hand_tip};
use crate::clock::time::ClockTime;

/// Hand lengths as a fraction of the dial radius.
pub const HOUR_HAND_LENGTH: f64 = 0.5;
pub const MINUTE_HAND_LENGTH: f64 = 0.8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hand {
    Hour,
    Minute,
}

/// Which hand, if any, the pointer is currently holding. Only one hand can be
/// dragged at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DragState {
    active: Option<Hand>,
}

impl DragState {
    pub fn active(&self) -> Option<Hand> {
        self.active
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Grab whichever hand tip is closest to the pointer. `dx`/`dy` are in
    /// dial-radius units; presses outside the dial are ignored.
    pub fn press(&mut self, time: ClockTime, dx: f64, dy: f64) -> Option<Hand> {
        if dx.hypot(dy) > 1.0 {
            return None;
        }
        let hand = nearest_hand(time, dx, dy);
        self.active = Some(hand);
        Some(hand)
    }

    /// Apply pointer movement to the held hand. Returns the new time when a
    /// hand is held, `None` otherwise.
    pub fn drag(&self, time: ClockTime, dx: f64, dy: f64) -> Option<ClockTime> {
        let hand = self.active?;
        // The exact centre has no direction.
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        let angle = angle::pointer_angle(dx, dy);
        Some(match hand {
            Hand::Minute => time.with_minute(angle::minute_from_angle(angle)),
            Hand::Hour => time.with_hour(angle::hour_from_angle(angle)),
        })
    }

    /// Pointer released anywhere ends the drag.
    pub fn release(&mut self) {
        self.active = None;
    }
}

fn nearest_hand(time: ClockTime, dx: f64, dy: f64) -> Hand {
    let angles = angle::hand_angles(time);
    let (hx, hy) = hand_tip(angles.hour, HOUR_HAND_LENGTH);
    let (mx, my) = hand_tip(angles.minute, MINUTE_HAND_LENGTH);
    let to_hour = (dx - hx).hypot(dy - hy);
    let to_minute = (dx - mx).hypot(dy - my);
    if to_hour < to_minute {
        Hand::Hour
    } else {
        Hand::Minute
    }
}
