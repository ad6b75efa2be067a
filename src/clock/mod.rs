pub mod angle;
pub mod drag;
pub mod time;

pub use drag::{DragState, Hand};
pub use time::ClockTime;
