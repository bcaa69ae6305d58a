//! Actions: user intents and async query results

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::Reading;

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    /// Startup: issue the default-location query once
    Init,

    // ===== Query category =====
    /// City input text changed
    QueryChange(String),

    /// Search triggered (Enter or button click) for the current input
    QuerySubmit,

    /// Result: provider answered with a reading
    QueryDidLoad { request_id: u64, reading: Reading },

    /// Result: query failed; carries the diagnostic cause
    QueryDidFail { request_id: u64, error: String },

    // ===== Notice category =====
    /// Close the failure notice
    NoticeDismiss,

    // ===== UI category =====
    /// Switch between compact and wide layouts
    UiToggleLayout,

    /// Force a re-render (for cursor movement, etc.)
    Render,

    // ===== Uncategorized (global) =====
    /// Animation clock
    Tick,

    /// Exit the application
    Quit,
}
