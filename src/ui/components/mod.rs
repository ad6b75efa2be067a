pub mod clock_face;
pub mod menu;
pub mod number_pad;
pub mod progress_bar;
pub mod result_card;
