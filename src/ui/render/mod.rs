mod alert;
mod all;
mod auth;
mod dashboard;
mod footer;
mod log;
mod news;
mod weather;

use super::Frame;
use ratatui::layout::Rect;

pub use all::all as render;

/// Return a rectangle of `percent_x` width and fixed `height` centered in
/// `area`, clamped to fit.
///
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let width = (area.width as u32 * percent_x.min(100) as u32 / 100) as u16;
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
