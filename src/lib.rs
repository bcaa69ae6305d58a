//! Weather panel - single-card weather lookup on tui-dispatch
//!
//! The library exposes every module so integration tests can drive the
//! store, the components and the provider client directly.

pub mod action;
pub mod api;
pub mod components;
pub mod effect;
pub mod icons;
pub mod reducer;
pub mod reveal;
pub mod sprites;
pub mod state;
