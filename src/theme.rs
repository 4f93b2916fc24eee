use iced::Color;
use serde::{Deserialize, Serialize};

/// Dark or light presentation. Selects a palette only, no behavioral branching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Dark,
    Light,
}

impl Mode {
    pub fn is_dark(&self) -> bool {
        matches!(self, Mode::Dark)
    }

    pub fn toggle(&self) -> Self {
        match self {
            Mode::Dark => Mode::Light,
            Mode::Light => Mode::Dark,
        }
    }
}

/// The named gradient themes offered to the user, ordered warm to cool to neutral.
/// Each entry is (name, gradient start hex, gradient end hex).
pub const GRADIENT_THEMES: [(&str, &str, &str); 12] = [
    ("peach", "#FF8B88", "#FF6A88"),
    ("rose", "#FF7676", "#F54EA2"),
    ("cherry", "#EB3349", "#F45C43"),
    ("honey", "#E58E26", "#EEA23C"),
    ("berry", "#B76CD9", "#D67DB8"),
    ("mint", "#1D976C", "#2F8A69"),
    ("twilight", "#6157FF", "#7E6AFD"),
    ("ocean", "#2193b0", "#52B1CC"),
    ("cosmic", "#614385", "#5B5B8F"),
    ("silver", "#E9E9E9", "#E9E9E9"),
    ("shadow", "#2C3E50", "#2C3E50"),
    ("midnight", "#1E1E1E", "#1E1E1E"),
];

/// The theme a chat view renders with: a dark/light mode plus the two gradient
/// endpoint colors applied to the sender's message bubbles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeConfiguration {
    pub mode: Mode,
    pub start: Color,
    pub end: Color,
}

impl Default for ThemeConfiguration {
    fn default() -> Self {
        Self::named(GRADIENT_THEMES[0].0, Mode::default())
    }
}

impl ThemeConfiguration {
    /// Look a theme up by name, falling back to the first theme in the table
    /// when the name is unknown
    pub fn named(name: &str, mode: Mode) -> Self {
        let (_, start_hex, end_hex) = GRADIENT_THEMES
            .iter()
            .find(|(theme_name, _, _)| *theme_name == name)
            .unwrap_or(&GRADIENT_THEMES[0]);

        Self {
            mode,
            start: parse_hex_color(start_hex).unwrap_or(Color::BLACK),
            end: parse_hex_color(end_hex).unwrap_or(Color::BLACK),
        }
    }

    /// The accent color used for read receipts and reaction badges
    pub fn accent(&self) -> Color {
        self.end
    }
}

/// Return the name of the theme after `name` in the table, wrapping around,
/// so the user can step through all of them
pub fn next_theme(name: &str) -> &'static str {
    let index = GRADIENT_THEMES
        .iter()
        .position(|(theme_name, _, _)| *theme_name == name)
        .unwrap_or(GRADIENT_THEMES.len() - 1);
    GRADIENT_THEMES[(index + 1) % GRADIENT_THEMES.len()].0
}

/// Parse a "#RRGGBB" hex string into a [Color]. Returns None for any other form.
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;

    Some(Color::from_rgb8(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        let color = parse_hex_color("#FF8B88").expect("Could not parse hex color");
        assert_eq!(color, Color::from_rgb8(0xFF, 0x8B, 0x88));
    }

    #[test]
    fn test_parse_hex_color_lowercase() {
        let color = parse_hex_color("#2193b0").expect("Could not parse hex color");
        assert_eq!(color, Color::from_rgb8(0x21, 0x93, 0xB0));
    }

    #[test]
    fn test_parse_hex_color_rejects_missing_hash() {
        assert!(parse_hex_color("FF8B88").is_none());
    }

    #[test]
    fn test_parse_hex_color_rejects_short() {
        assert!(parse_hex_color("#FFF").is_none());
    }

    #[test]
    fn test_parse_hex_color_rejects_non_hex() {
        assert!(parse_hex_color("#GGGGGG").is_none());
    }

    #[test]
    fn test_all_theme_table_entries_parse() {
        for (name, start, end) in GRADIENT_THEMES {
            assert!(parse_hex_color(start).is_some(), "bad start hex in {name}");
            assert!(parse_hex_color(end).is_some(), "bad end hex in {name}");
        }
    }

    #[test]
    fn test_named_theme_lookup() {
        let theme = ThemeConfiguration::named("ocean", Mode::Dark);
        assert_eq!(theme.start, Color::from_rgb8(0x21, 0x93, 0xB0));
        assert_eq!(theme.end, Color::from_rgb8(0x52, 0xB1, 0xCC));
    }

    #[test]
    fn test_named_theme_unknown_falls_back_to_first() {
        let theme = ThemeConfiguration::named("no-such-theme", Mode::Light);
        let first = ThemeConfiguration::named(GRADIENT_THEMES[0].0, Mode::Light);
        assert_eq!(theme, first);
    }

    #[test]
    fn test_next_theme_steps_and_wraps() {
        let mut name = GRADIENT_THEMES[0].0;
        for _ in 0..GRADIENT_THEMES.len() {
            name = next_theme(name);
        }
        assert_eq!(name, GRADIENT_THEMES[0].0);
    }

    #[test]
    fn test_next_theme_unknown_name_starts_over() {
        assert_eq!(next_theme("no-such-theme"), GRADIENT_THEMES[0].0);
    }

    #[test]
    fn test_mode_toggle() {
        assert_eq!(Mode::Dark.toggle(), Mode::Light);
        assert_eq!(Mode::Light.toggle(), Mode::Dark);
        assert!(Mode::Dark.is_dark());
        assert!(!Mode::Light.is_dark());
    }

    #[test]
    fn test_accent_is_gradient_end() {
        let theme = ThemeConfiguration::named("rose", Mode::Dark);
        assert_eq!(theme.accent(), theme.end);
    }
}
