pub mod components;
pub mod layout;
pub mod screens;
pub mod theme;

pub use screens::render;
