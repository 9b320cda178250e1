//! User interface module.
//!
//! This module handles all UI rendering using the `ratatui` library, including:
//! - Panel view models and the renderers that fill them
//! - Terminal rendering and layout
//! - Theme management
//! - Widget components (spinner, styling)

type Frame<'a> = ratatui::Frame<'a>;

pub mod panels;
mod render;
mod theme;
mod widgets;

pub const SPINNER_FRAME_COUNT: usize = widgets::spinner::FRAMES.len();

pub use render::render;
pub use theme::Theme;
