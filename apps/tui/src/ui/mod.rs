// UI module for radioactive-tui
// One render function per phase, plus shared widgets

pub mod screens;
pub mod widgets;

use crate::app::App;
use crate::domain::MeshPhase;
use ratatui::style::Color;
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    match app.phase {
        MeshPhase::Setup => screens::setup::render_setup(app, f),
        MeshPhase::Scanning => screens::scanning::render_scanning(app, f),
        MeshPhase::Chat => screens::chat::render_chat(app, f),
    }

    if app.show_help {
        widgets::overlay::render_help(f);
    }
}

/// Map a `#rrggbb` palette entry onto a terminal color. Anything unreadable
/// falls back to the mesh green.
pub fn hex_color(hex: &str) -> Color {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    // Stored colors come from the kv table, so the string is untrusted;
    // multibyte input must not reach the byte slices below.
    if digits.len() != 6 || !digits.is_ascii() {
        return Color::Green;
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();

    match (channel(0..2), channel(2..4), channel(4..6)) {
        (Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
        _ => Color::Green,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_entries_map_to_rgb() {
        assert_eq!(hex_color("#4ade80"), Color::Rgb(0x4a, 0xde, 0x80));
        assert_eq!(hex_color("f87171"), Color::Rgb(0xf8, 0x71, 0x71));
    }

    #[test]
    fn garbage_falls_back_to_green() {
        assert_eq!(hex_color("#zzzzzz"), Color::Green);
        assert_eq!(hex_color("#fff"), Color::Green);
        assert_eq!(hex_color(""), Color::Green);
    }

    #[test]
    fn multibyte_input_falls_back_without_panicking() {
        // Six bytes but not six ASCII digits; byte-slicing this would land
        // inside the multibyte character
        assert_eq!(hex_color("#a\u{20ac}cd"), Color::Green);
        assert_eq!(hex_color("\u{4eba}\u{4eba}"), Color::Green);
    }
}
