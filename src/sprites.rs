//! Condition sprites with multi-color layer support
//!
//! Each icon has a Small and a Large variant. Multi-layer sprites (cloud
//! body + precipitation) are composited with different colors, spaces
//! being transparent.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};

use crate::icons::Icon;

// ============================================================================
// Sprite data
// ============================================================================

mod sprite_data {
    pub mod small {
        pub const SUN: &[&str] = &[
            r"   \  |  /   ",
            r"    .---.    ",
            r" --(     )-- ",
            r"    `---'    ",
            r"   /  |  \   ",
        ];
        pub const CLOUD: &[&str] = &[
            r"     .--.    ",
            r"  .-(    ).  ",
            r" (___.__)__) ",
        ];
        pub const RAIN: &[&str] = &[
            r"",
            r"",
            r"",
            r"  / / / / /  ",
            r" / / / / /   ",
        ];
        pub const DRIZZLE: &[&str] = &[
            r"",
            r"",
            r"",
            r"  ' . ' . '  ",
            r"  . ' . ' .  ",
        ];
        pub const SNOW: &[&str] = &[
            r"",
            r"",
            r"",
            r"  *  *  *  * ",
            r"   *  *  *   ",
        ];
        pub const CLOUD_BACK: &[&str] = &[
            r"       .--.  ",
            r"    .-(    ) ",
        ];
        pub const CLOUD_FRONT: &[&str] = &[
            r"",
            r"",
            r"   .--.      ",
            r".-(    ).    ",
            r"(___.__)_)   ",
        ];
    }

    pub mod large {
        pub const SUN: &[&str] = &[
            r"      \    |    /      ",
            r"   `.  \   |   /  .'   ",
            r"        .-----.        ",
            r" -----(         )----- ",
            r"        `-----'        ",
            r"   .'  /   |   \  `.   ",
            r"      /    |    \      ",
        ];
        pub const CLOUD: &[&str] = &[
            r"          .--.         ",
            r"       .-(    ).       ",
            r"    .-(          )-.   ",
            r"   (___.____.____)__)  ",
        ];
        pub const RAIN: &[&str] = &[
            r"",
            r"",
            r"",
            r"",
            r"     /   /   /   /     ",
            r"    /   /   /   /      ",
            r"   /   /   /   /       ",
        ];
        pub const DRIZZLE: &[&str] = &[
            r"",
            r"",
            r"",
            r"",
            r"     '   .   '   .     ",
            r"    .   '   .   '      ",
            r"     '   .   '   .     ",
        ];
        pub const SNOW: &[&str] = &[
            r"",
            r"",
            r"",
            r"",
            r"     *    *    *       ",
            r"   *    *    *    *    ",
            r"     *    *    *       ",
        ];
        pub const CLOUD_BACK: &[&str] = &[
            r"              .--.     ",
            r"           .-(    ).   ",
        ];
        pub const CLOUD_FRONT: &[&str] = &[
            r"",
            r"",
            r"        .--.           ",
            r"     .-(    ).         ",
            r"  .-(          )-.     ",
            r" (___.____.____)__)    ",
            r"",
        ];
    }
}

// ============================================================================
// Layer compositing
// ============================================================================

/// A single sprite layer with its content and color
struct SpriteLayer {
    lines: &'static [&'static str],
    color: Color,
}

/// Composite multiple layers into Text, treating spaces as transparent
fn composite_layers(layers: &[SpriteLayer]) -> Text<'static> {
    if layers.is_empty() {
        return Text::default();
    }

    let layer_chars: Vec<Vec<Vec<char>>> = layers
        .iter()
        .map(|l| l.lines.iter().map(|line| line.chars().collect()).collect())
        .collect();

    let max_lines = layer_chars.iter().map(|l| l.len()).max().unwrap_or(0);
    let max_width = layer_chars
        .iter()
        .flat_map(|lines| lines.iter())
        .map(|line| line.len())
        .max()
        .unwrap_or(0);

    let mut result_lines = Vec::with_capacity(max_lines);

    for line_idx in 0..max_lines {
        let mut spans = Vec::with_capacity(max_width);

        for col_idx in 0..max_width {
            // Last layer is the foreground
            let mut found_char = ' ';
            let mut found_color = Color::Reset;

            for (layer_idx, layer) in layers.iter().enumerate().rev() {
                let ch = layer_chars[layer_idx]
                    .get(line_idx)
                    .and_then(|line| line.get(col_idx));
                if let Some(&ch) = ch {
                    if ch != ' ' {
                        found_char = ch;
                        found_color = layer.color;
                        break;
                    }
                }
            }

            spans.push(Span::styled(
                found_char.to_string(),
                Style::default().fg(found_color),
            ));
        }

        result_lines.push(Line::from(spans));
    }

    Text::from(result_lines)
}

// ============================================================================
// Types
// ============================================================================

/// Sprite size categories
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SpriteSize {
    /// 5 rows
    Small,
    /// 7 rows
    Large,
}

impl SpriteSize {
    pub fn rows(self) -> u16 {
        match self {
            SpriteSize::Small => sprite_data::small::SUN.len() as u16,
            SpriteSize::Large => sprite_data::large::SUN.len() as u16,
        }
    }

    /// Largest sprite that fits the available height.
    /// Returns `None` if even Small won't fit.
    pub fn for_height(available: u16) -> Option<Self> {
        if available >= SpriteSize::Large.rows() {
            Some(SpriteSize::Large)
        } else if available >= SpriteSize::Small.rows() {
            Some(SpriteSize::Small)
        } else {
            None
        }
    }

    /// The preferred size, shrunk to what the available height allows.
    pub fn fit(preferred: SpriteSize, available: u16) -> Option<Self> {
        SpriteSize::for_height(available).map(|size| size.min(preferred))
    }
}

const SUN_YELLOW: Color = Color::Rgb(250, 204, 21);
const CLOUD_GRAY: Color = Color::Rgb(200, 200, 215);
const CLOUD_DARK: Color = Color::Rgb(120, 120, 140);
const CLOUD_LIGHT: Color = Color::Rgb(170, 170, 185);
const RAIN_BLUE: Color = Color::Rgb(80, 140, 200);
const DRIZZLE_BLUE: Color = Color::Rgb(130, 170, 200);
const SNOW_WHITE: Color = Color::Rgb(200, 220, 255);

// ============================================================================
// Public API
// ============================================================================

/// Get sprite art for the given icon and size
pub fn get_sprite(icon: Icon, size: SpriteSize) -> Text<'static> {
    use self::sprite_data::{large, small};

    let pick = |s: &'static [&'static str], l: &'static [&'static str]| match size {
        SpriteSize::Small => s,
        SpriteSize::Large => l,
    };

    let cloud = SpriteLayer {
        lines: pick(small::CLOUD, large::CLOUD),
        color: CLOUD_GRAY,
    };

    let layers = match icon {
        Icon::Clear => vec![SpriteLayer {
            lines: pick(small::SUN, large::SUN),
            color: SUN_YELLOW,
        }],
        Icon::Rain => vec![
            cloud,
            SpriteLayer {
                lines: pick(small::RAIN, large::RAIN),
                color: RAIN_BLUE,
            },
        ],
        Icon::Drizzle => vec![
            cloud,
            SpriteLayer {
                lines: pick(small::DRIZZLE, large::DRIZZLE),
                color: DRIZZLE_BLUE,
            },
        ],
        Icon::Snow => vec![
            cloud,
            SpriteLayer {
                lines: pick(small::SNOW, large::SNOW),
                color: SNOW_WHITE,
            },
        ],
        Icon::Cloud => vec![
            SpriteLayer {
                lines: pick(small::CLOUD_BACK, large::CLOUD_BACK),
                color: CLOUD_DARK,
            },
            SpriteLayer {
                lines: pick(small::CLOUD_FRONT, large::CLOUD_FRONT),
                color: CLOUD_LIGHT,
            },
        ],
    };

    composite_layers(&layers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprite_size_for_height() {
        assert_eq!(SpriteSize::for_height(0), None);
        assert_eq!(SpriteSize::for_height(4), None);
        assert_eq!(SpriteSize::for_height(5), Some(SpriteSize::Small));
        assert_eq!(SpriteSize::for_height(6), Some(SpriteSize::Small));
        assert_eq!(SpriteSize::for_height(7), Some(SpriteSize::Large));
        assert_eq!(SpriteSize::for_height(40), Some(SpriteSize::Large));
    }

    #[test]
    fn test_fit_never_grows_past_preferred() {
        assert_eq!(
            SpriteSize::fit(SpriteSize::Small, 40),
            Some(SpriteSize::Small)
        );
        assert_eq!(
            SpriteSize::fit(SpriteSize::Large, 6),
            Some(SpriteSize::Small)
        );
        assert_eq!(SpriteSize::fit(SpriteSize::Large, 3), None);
    }

    #[test]
    fn test_sprites_have_declared_height() {
        for icon in Icon::ALL {
            for size in [SpriteSize::Small, SpriteSize::Large] {
                let text = get_sprite(icon, size);
                assert_eq!(
                    text.lines.len() as u16,
                    size.rows(),
                    "Sprite {:?}/{:?} has wrong height",
                    icon,
                    size
                );
            }
        }
    }

    #[test]
    fn test_foreground_layer_wins() {
        // Rain drops sit below the cloud body, both colors must be present
        let text = get_sprite(Icon::Rain, SpriteSize::Small);
        let colors: Vec<_> = text
            .lines
            .iter()
            .flat_map(|l| l.spans.iter())
            .filter(|s| s.content != " ")
            .filter_map(|s| s.style.fg)
            .collect();
        assert!(colors.contains(&CLOUD_GRAY));
        assert!(colors.contains(&RAIN_BLUE));
    }
}
