//! Condition text → icon mapping
//!
//! The provider describes conditions in free text ("Patchy rain nearby",
//! "Partly cloudy", ...). The panel only knows five icons, picked by
//! case-insensitive substring match in a fixed priority order.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One of the five fixed condition icons
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Icon {
    Clear,
    Rain,
    /// Drizzle-labeled asset. Cloud and overcast text lands here.
    Drizzle,
    Snow,
    Cloud,
}

/// Keyword groups checked in order; the first group with a hit wins.
const RULES: [(&[&str], Icon); 4] = [
    (&["sun", "clear"], Icon::Clear),
    (&["rain", "drizzle"], Icon::Rain),
    (&["cloud", "overcast"], Icon::Drizzle),
    (&["snow", "blizzard"], Icon::Snow),
];

impl Icon {
    pub const ALL: [Icon; 5] = [Icon::Clear, Icon::Rain, Icon::Drizzle, Icon::Snow, Icon::Cloud];

    /// Asset identifier of the icon image
    pub fn asset_path(self) -> &'static str {
        match self {
            Icon::Clear => "/assets/clear.png",
            Icon::Rain => "/assets/rain.png",
            Icon::Drizzle => "/assets/drizzle.png",
            Icon::Snow => "/assets/snow.png",
            Icon::Cloud => "/assets/cloud.png",
        }
    }

    /// Short name used in logs
    pub fn label(self) -> &'static str {
        match self {
            Icon::Clear => "clear",
            Icon::Rain => "rain",
            Icon::Drizzle => "drizzle",
            Icon::Snow => "snow",
            Icon::Cloud => "cloud",
        }
    }

    /// Single-cell fallback when no sprite fits
    pub fn emoji(self) -> &'static str {
        match self {
            Icon::Clear => "\u{2600}\u{fe0f}",
            Icon::Rain => "\u{1f327}\u{fe0f}",
            Icon::Drizzle => "\u{1f326}\u{fe0f}",
            Icon::Snow => "\u{2744}\u{fe0f}",
            Icon::Cloud => "\u{2601}\u{fe0f}",
        }
    }
}

/// Small glyphs shown next to the humidity and wind values
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatGlyph {
    Humidity,
    Wind,
}

impl StatGlyph {
    pub fn symbol(self) -> &'static str {
        match self {
            StatGlyph::Humidity => "\u{1f4a7}",
            StatGlyph::Wind => "\u{1f32c}\u{fe0f}",
        }
    }

    pub fn caption(self) -> &'static str {
        match self {
            StatGlyph::Humidity => "Humidity",
            StatGlyph::Wind => "Wind Speed",
        }
    }
}

/// Pick the icon for a condition description.
///
/// Total: absent or empty text gives [`Icon::Clear`], text matching no rule
/// gives [`Icon::Cloud`].
pub fn icon_for_condition(condition: Option<&str>) -> Icon {
    let Some(condition) = condition.filter(|c| !c.is_empty()) else {
        return Icon::Clear;
    };

    let condition = condition.to_lowercase();
    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| condition.contains(k)))
        .map(|(_, icon)| *icon)
        .unwrap_or(Icon::Cloud)
}
