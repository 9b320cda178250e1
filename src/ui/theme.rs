use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Theme color palette defining all colors used in the application.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    // Primary colors
    pub accent: ColorSpec,
    pub banner: ColorSpec,

    // Text colors
    pub text: ColorSpec,
    pub text_muted: ColorSpec,

    // Status colors
    pub error: ColorSpec,

    // UI element colors
    pub border_active: ColorSpec,
    pub border_normal: ColorSpec,
    pub highlight_bg: ColorSpec,
    pub highlight_fg: ColorSpec,
}

/// Color specification that can be serialized/deserialized.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorSpec {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        ColorSpec { r, g, b }
    }

    pub fn to_color(&self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::pulse_dark()
    }
}

impl Theme {
    /// Dark palette with green accents.
    ///
    pub fn pulse_dark() -> Self {
        Theme {
            name: "pulse-dark".to_string(),
            accent: ColorSpec::rgb(139, 233, 253),
            banner: ColorSpec::rgb(80, 250, 123),
            text: ColorSpec::rgb(230, 230, 225),
            text_muted: ColorSpec::rgb(128, 132, 150),
            error: ColorSpec::rgb(255, 85, 85),
            border_active: ColorSpec::rgb(80, 250, 123),
            border_normal: ColorSpec::rgb(98, 114, 164),
            highlight_bg: ColorSpec::rgb(68, 71, 90),
            highlight_fg: ColorSpec::rgb(248, 248, 242),
        }
    }

    /// Light palette for bright terminals.
    ///
    pub fn pulse_light() -> Self {
        Theme {
            name: "pulse-light".to_string(),
            accent: ColorSpec::rgb(0, 92, 175),
            banner: ColorSpec::rgb(0, 122, 94),
            text: ColorSpec::rgb(40, 42, 54),
            text_muted: ColorSpec::rgb(120, 120, 130),
            error: ColorSpec::rgb(200, 40, 40),
            border_active: ColorSpec::rgb(0, 122, 94),
            border_normal: ColorSpec::rgb(160, 160, 170),
            highlight_bg: ColorSpec::rgb(220, 235, 230),
            highlight_fg: ColorSpec::rgb(20, 20, 30),
        }
    }

    /// Return all available themes.
    ///
    pub fn available_themes() -> Vec<Theme> {
        vec![Self::pulse_dark(), Self::pulse_light()]
    }

    /// Look a theme up by its configured name.
    ///
    pub fn from_name(name: &str) -> Option<Theme> {
        Self::available_themes()
            .into_iter()
            .find(|theme| theme.name == name.trim())
    }
}
