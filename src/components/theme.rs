//! Panel palette and fade helpers

use artbox::Color as ArtColor;
use ratatui::style::{Color, Style};
use ratatui::text::Text;

pub const BACKDROP_TOP: Color = Color::Rgb(243, 232, 255);
pub const BACKDROP_BOTTOM: Color = Color::Rgb(199, 210, 254);
pub const CARD_BG: Color = Color::Rgb(59, 50, 160);
pub const INPUT_BG: Color = Color::Rgb(255, 255, 255);
pub const ACCENT: Color = Color::Rgb(234, 179, 8);
pub const STAT_VALUE: Color = Color::Rgb(253, 224, 71);
pub const TEXT: Color = Color::Rgb(255, 255, 255);
pub const TEXT_DIM: Color = Color::Rgb(150, 145, 210);

fn rgb(color: Color) -> Option<(u8, u8, u8)> {
    match color {
        Color::Rgb(r, g, b) => Some((r, g, b)),
        _ => None,
    }
}

pub fn lerp(from: Color, to: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    match (rgb(from), rgb(to)) {
        (Some(a), Some(b)) => {
            let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
            Color::Rgb(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
        }
        // Named colors can't be blended
        _ => {
            if t < 0.5 {
                from
            } else {
                to
            }
        }
    }
}

/// `color` as seen at `opacity` over `background`.
pub fn fade(color: Color, background: Color, opacity: f32) -> Color {
    lerp(background, color, opacity)
}

pub fn fade_style(style: Style, background: Color, opacity: f32) -> Style {
    match style.fg {
        Some(fg) => style.fg(fade(fg, background, opacity)),
        None => style,
    }
}

/// Fade every span of `text`; full opacity returns it untouched.
pub fn fade_text(mut text: Text<'static>, background: Color, opacity: f32) -> Text<'static> {
    if opacity >= 1.0 {
        return text;
    }
    for line in text.lines.iter_mut() {
        for span in line.spans.iter_mut() {
            span.style = fade_style(span.style, background, opacity);
        }
    }
    text
}

pub fn art_color(color: Color) -> ArtColor {
    let (r, g, b) = rgb(color).unwrap_or((255, 255, 255));
    ArtColor::rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_endpoints() {
        assert_eq!(fade(TEXT, CARD_BG, 0.0), CARD_BG);
        assert_eq!(fade(TEXT, CARD_BG, 1.0), TEXT);
    }

    #[test]
    fn test_lerp_midpoint() {
        assert_eq!(
            lerp(Color::Rgb(0, 0, 0), Color::Rgb(200, 100, 50), 0.5),
            Color::Rgb(100, 50, 25)
        );
    }

    #[test]
    fn test_named_colors_snap() {
        assert_eq!(lerp(Color::Red, Color::Blue, 0.2), Color::Red);
        assert_eq!(lerp(Color::Red, Color::Blue, 0.8), Color::Blue);
    }
}
