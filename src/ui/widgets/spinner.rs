use crate::state::State;
use ratatui::{
    style::Style,
    text::Span,
};

/// Braille frames cycled once per tick.
pub const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Return the current spinner frame as a styled span.
///
pub fn span(state: &State, style: Style) -> Span<'static> {
    let frame = FRAMES
        .get(*state.get_spinner_index())
        .copied()
        .unwrap_or(FRAMES[0]);
    Span::styled(frame, style)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_follows_spinner_index() {
        let mut state = State::default();
        assert_eq!(span(&state, Style::default()).content, FRAMES[0]);
        state.advance_spinner_index();
        assert_eq!(span(&state, Style::default()).content, FRAMES[1]);
    }
}
