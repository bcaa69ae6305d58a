//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::sprites::SpriteSize;

/// Location queried once at startup when no `--city` is given.
pub const DEFAULT_CITY: &str = "India";

/// Fixed text of the failure notice.
pub const QUERY_FAILED_NOTICE: &str = "City not found. Please try again.";

/// Animation clock resolution.
pub const ANIM_TICK_MS: u64 = 30;

/// Current conditions as reported by the provider, with no conversion applied
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Reading {
    pub temperature_c: f64,
    pub humidity: u8,
    pub wind_kph: f64,
    pub city: String,
    pub condition: String,
}

impl Reading {
    pub fn temperature_label(&self) -> String {
        format!("{}°C", self.temperature_c)
    }

    pub fn humidity_label(&self) -> String {
        format!("{}%", self.humidity)
    }

    pub fn wind_label(&self) -> String {
        format!("{} km/h", self.wind_kph)
    }
}

/// Layout preset for the panel
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum PanelLayout {
    /// Narrow card, plain-text temperature
    #[default]
    Compact,
    /// Wide card, large sprite and FIGlet temperature
    Wide,
}

/// Concrete sizes for a [`PanelLayout`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelMetrics {
    /// Card width in columns (clamped to the terminal)
    pub width: u16,
    /// Inner horizontal padding
    pub padding: u16,
    /// Share of the search row taken by the input, in percent
    pub input_percent: u16,
    pub sprite_size: SpriteSize,
    pub big_temperature: bool,
}

impl PanelLayout {
    pub fn toggle(&self) -> Self {
        match self {
            PanelLayout::Compact => PanelLayout::Wide,
            PanelLayout::Wide => PanelLayout::Compact,
        }
    }

    pub fn metrics(&self) -> PanelMetrics {
        match self {
            PanelLayout::Compact => PanelMetrics {
                width: 40,
                padding: 2,
                input_percent: 70,
                sprite_size: SpriteSize::Small,
                big_temperature: false,
            },
            PanelLayout::Wide => PanelMetrics {
                width: 56,
                padding: 3,
                input_percent: 70,
                sprite_size: SpriteSize::Large,
                big_temperature: true,
            },
        }
    }
}

/// What the panel shows below the search bar
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanelView<'a> {
    Empty,
    Loaded(&'a Reading),
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// Pending city-name input
    #[debug(section = "Query", label = "Text")]
    pub query: String,

    /// Location queried on startup
    #[debug(section = "Query", label = "Default city")]
    pub default_city: String,

    /// Current reading; replaced in full by each successful query
    #[debug(section = "Weather", label = "Reading", debug_fmt)]
    pub reading: Option<Reading>,

    /// Failure notice awaiting dismissal
    #[debug(section = "Weather", label = "Notice", debug_fmt)]
    pub notice: Option<String>,

    #[debug(section = "UI", label = "Layout", debug_fmt)]
    pub layout: PanelLayout,

    /// Run entrance animations; when off, elements appear fully shown
    #[debug(section = "UI", label = "Animate")]
    pub animate: bool,

    // --- Request bookkeeping ---
    #[debug(section = "Requests", label = "Initialized")]
    pub initialized: bool,

    #[debug(section = "Requests", label = "Next id")]
    pub next_request_id: u64,

    #[debug(section = "Requests", label = "In flight")]
    pub in_flight: u32,

    // --- Animation clocks (skipped) ---
    /// Search button pop-in clock, `None` once settled
    #[debug(skip)]
    pub intro_ms: Option<u64>,

    /// Panel reveal clock, `None` once settled
    #[debug(skip)]
    pub reveal_ms: Option<u64>,
}

impl AppState {
    pub fn new(default_city: impl Into<String>, layout: PanelLayout) -> Self {
        Self {
            query: String::new(),
            default_city: default_city.into(),
            reading: None,
            notice: None,
            layout,
            animate: true,
            initialized: false,
            next_request_id: 0,
            in_flight: 0,
            intro_ms: None,
            reveal_ms: None,
        }
    }

    pub fn view(&self) -> PanelView<'_> {
        match &self.reading {
            Some(reading) => PanelView::Loaded(reading),
            None => PanelView::Empty,
        }
    }

    pub fn notice_open(&self) -> bool {
        self.notice.is_some()
    }

    pub fn animating(&self) -> bool {
        self.intro_ms.is_some() || self.reveal_ms.is_some()
    }

    /// Hand out the id for the next outgoing query.
    pub fn take_request_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id = self.next_request_id.wrapping_add(1);
        id
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_CITY, PanelLayout::default())
    }
}
