pub mod answer_pad;
pub mod mode;
pub mod quiz;
pub mod result;
