use crate::clock::time::ClockTime;

/// Hand angles in degrees, screen convention: 0 points right, angles grow
/// clockwise (y down), so -90 is straight up at 12.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandAngles {
    pub hour: f64,
    pub minute: f64,
}

pub fn hand_angles(time: ClockTime) -> HandAngles {
    HandAngles {
        hour: hour_hand_angle(time),
        minute: minute_hand_angle(time),
    }
}

pub fn hour_hand_angle(time: ClockTime) -> f64 {
    (time.hour % 12) as f64 * 30.0 + time.minute as f64 * 0.5 - 90.0
}

pub fn minute_hand_angle(time: ClockTime) -> f64 {
    time.minute as f64 * 6.0 - 90.0
}

/// Dial angle of a pointer offset from the centre, in `[0, 360)` with 0 at 12.
pub fn pointer_angle(dx: f64, dy: f64) -> f64 {
    let angle = dy.atan2(dx).to_degrees() + 90.0;
    let normalized = if angle < 0.0 { angle + 360.0 } else { angle };
    // atan2 tops out at 180, so +90 can reach exactly 270 but never 360.
    normalized % 360.0
}

pub fn minute_from_angle(angle: f64) -> u8 {
    ((angle / 6.0).round() as i64).rem_euclid(60) as u8
}

pub fn hour_from_angle(angle: f64) -> u8 {
    match ((angle / 30.0).round() as i64).rem_euclid(12) {
        0 => 12,
        h => h as u8,
    }
}

/// End point of a hand of length `radius` at `angle_deg`, in screen space.
pub fn hand_tip(angle_deg: f64, radius: f64) -> (f64, f64) {
    let rad = angle_deg.to_radians();
    (radius * rad.cos(), radius * rad.sin())
}
