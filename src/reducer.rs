//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::reveal::RevealSchedule;
use crate::state::{AppState, ANIM_TICK_MS, QUERY_FAILED_NOTICE};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            if state.initialized {
                return DispatchResult::unchanged();
            }
            state.initialized = true;
            if state.animate {
                state.intro_ms = Some(0);
            }
            let city = state.default_city.clone();
            DispatchResult::changed_with(fetch(state, city))
        }

        // ===== Query actions =====
        Action::QueryChange(text) => {
            if text == state.query {
                return DispatchResult::unchanged();
            }
            state.query = text;
            DispatchResult::changed()
        }

        Action::QuerySubmit => {
            let city = state.query.clone();
            DispatchResult::changed_with(fetch(state, city))
        }

        Action::QueryDidLoad { reading, .. } => {
            state.in_flight = state.in_flight.saturating_sub(1);
            if state.reading.is_none() && state.animate {
                state.reveal_ms = Some(0);
            }
            state.reading = Some(reading);
            DispatchResult::changed()
        }

        Action::QueryDidFail { .. } => {
            state.in_flight = state.in_flight.saturating_sub(1);
            state.notice = Some(QUERY_FAILED_NOTICE.to_string());
            DispatchResult::changed()
        }

        // ===== Notice actions =====
        Action::NoticeDismiss => {
            if state.notice.take().is_some() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== UI actions =====
        Action::UiToggleLayout => {
            state.layout = state.layout.toggle();
            DispatchResult::changed()
        }

        Action::Render => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Tick => {
            if !state.animating() {
                return DispatchResult::unchanged();
            }
            state.intro_ms = advance(state.intro_ms, RevealSchedule::intro().settle_ms());
            state.reveal_ms = advance(state.reveal_ms, RevealSchedule::panel().settle_ms());
            DispatchResult::changed()
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Record an outgoing query and build its effect.
fn fetch(state: &mut AppState, city: String) -> Effect {
    state.in_flight = state.in_flight.saturating_add(1);
    Effect::FetchCurrent {
        request_id: state.take_request_id(),
        city,
    }
}

/// Step an animation clock, stopping it once it passes `settle_ms`.
fn advance(clock: Option<u64>, settle_ms: u64) -> Option<u64> {
    let next = clock?.saturating_add(ANIM_TICK_MS);
    (next < settle_ms).then_some(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{PanelLayout, Reading};

    fn reading(city: &str) -> Reading {
        Reading {
            temperature_c: 22.5,
            humidity: 40,
            wind_kph: 9.0,
            city: city.into(),
            condition: "Sunny".into(),
        }
    }

    #[test]
    fn test_init_issues_one_default_query() {
        let mut state = AppState::default();

        let result = reducer(&mut state, Action::Init);

        assert!(result.changed);
        assert_eq!(
            result.effects,
            vec![Effect::FetchCurrent {
                request_id: 0,
                city: "India".into(),
            }]
        );
        assert_eq!(state.in_flight, 1);
        assert_eq!(state.intro_ms, Some(0));

        // Second init is ignored
        let result = reducer(&mut state, Action::Init);
        assert!(!result.changed);
        assert!(result.effects.is_empty());
    }

    #[test]
    fn test_query_change_only_edits_text() {
        let mut state = AppState::default();

        let result = reducer(&mut state, Action::QueryChange("Paris".into()));

        assert!(result.changed);
        assert!(result.effects.is_empty());
        assert_eq!(state.query, "Paris");
        assert!(state.reading.is_none());
    }

    #[test]
    fn test_submit_uses_query_text_without_mutating_it() {
        let mut state = AppState {
            query: "Lima".into(),
            ..Default::default()
        };

        let result = reducer(&mut state, Action::QuerySubmit);

        assert_eq!(
            result.effects,
            vec![Effect::FetchCurrent {
                request_id: 0,
                city: "Lima".into(),
            }]
        );
        assert_eq!(state.query, "Lima");
    }

    #[test]
    fn test_first_load_starts_reveal() {
        let mut state = AppState::default();

        reducer(
            &mut state,
            Action::QueryDidLoad {
                request_id: 0,
                reading: reading("Delhi"),
            },
        );

        assert_eq!(state.reading, Some(reading("Delhi")));
        assert_eq!(state.reveal_ms, Some(0));
    }

    #[test]
    fn test_later_load_replaces_without_reveal() {
        let mut state = AppState {
            reading: Some(reading("Delhi")),
            ..Default::default()
        };

        reducer(
            &mut state,
            Action::QueryDidLoad {
                request_id: 3,
                reading: reading("Oslo"),
            },
        );

        assert_eq!(state.reading, Some(reading("Oslo")));
        assert_eq!(state.reveal_ms, None);
    }

    #[test]
    fn test_failure_raises_notice_and_keeps_reading() {
        let mut state = AppState {
            reading: Some(reading("Delhi")),
            in_flight: 1,
            ..Default::default()
        };

        let result = reducer(
            &mut state,
            Action::QueryDidFail {
                request_id: 0,
                error: "provider error 1006".into(),
            },
        );

        assert!(result.changed);
        assert_eq!(state.notice.as_deref(), Some(QUERY_FAILED_NOTICE));
        assert_eq!(state.reading, Some(reading("Delhi")));
        assert_eq!(state.in_flight, 0);

        assert!(reducer(&mut state, Action::NoticeDismiss).changed);
        assert!(state.notice.is_none());
        assert!(!reducer(&mut state, Action::NoticeDismiss).changed);
    }

    #[test]
    fn test_tick_runs_clocks_until_settled() {
        let mut state = AppState::default();

        // Nothing animating - no re-render
        assert!(!reducer(&mut state, Action::Tick).changed);

        state.reveal_ms = Some(0);
        assert!(reducer(&mut state, Action::Tick).changed);
        assert_eq!(state.reveal_ms, Some(ANIM_TICK_MS));

        let settle = RevealSchedule::panel().settle_ms();
        let mut ticks = 0;
        while state.reveal_ms.is_some() {
            reducer(&mut state, Action::Tick);
            ticks += 1;
            assert!(ticks * ANIM_TICK_MS <= settle + ANIM_TICK_MS);
        }
        assert!(!reducer(&mut state, Action::Tick).changed);
    }

    #[test]
    fn test_without_animation_clocks_stay_idle() {
        let mut state = AppState {
            animate: false,
            ..Default::default()
        };

        reducer(&mut state, Action::Init);
        assert_eq!(state.intro_ms, None);

        reducer(
            &mut state,
            Action::QueryDidLoad {
                request_id: 0,
                reading: reading("Delhi"),
            },
        );
        assert_eq!(state.reading, Some(reading("Delhi")));
        assert_eq!(state.reveal_ms, None);
        assert!(!state.animating());
    }

    #[test]
    fn test_toggle_layout() {
        let mut state = AppState::default();
        assert_eq!(state.layout, PanelLayout::Compact);

        reducer(&mut state, Action::UiToggleLayout);
        assert_eq!(state.layout, PanelLayout::Wide);

        reducer(&mut state, Action::UiToggleLayout);
        assert_eq!(state.layout, PanelLayout::Compact);
    }
}
