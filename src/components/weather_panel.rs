use crossterm::event::{KeyCode, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Flex, Layout};
use ratatui::prelude::{Frame, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::reading_view::required_height;
use super::{theme, Component, ReadingView, ReadingViewProps, SearchBar, SearchBarProps};
use crate::action::Action;
use crate::reveal::{PanelElement, RevealSchedule};
use crate::state::{AppState, PanelView};

const SEARCH_ROWS: u16 = 3;

/// Props for WeatherPanel - read-only view of state
pub struct WeatherPanelProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The whole card: search row on top, reading underneath once loaded
#[derive(Default)]
pub struct WeatherPanel {
    search: SearchBar,
}

/// Card rectangle for `state`, centered in `area`.
pub fn card_area(state: &AppState, area: Rect) -> Rect {
    let metrics = state.layout.metrics();
    let body = match state.view() {
        PanelView::Empty => 0,
        PanelView::Loaded(_) => required_height(&metrics, Some(metrics.sprite_size)),
    };
    // top pad, search row, body, bottom pad
    let height = (1 + SEARCH_ROWS + body + 1).min(area.height);
    let width = metrics.width.min(area.width);

    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [card] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    card
}

fn render_backdrop(frame: &mut Frame, area: Rect) {
    let span = area.height.saturating_sub(1).max(1) as f32;
    for offset in 0..area.height {
        let color = theme::lerp(
            theme::BACKDROP_TOP,
            theme::BACKDROP_BOTTOM,
            offset as f32 / span,
        );
        let row = Rect {
            y: area.y + offset,
            height: 1,
            ..area
        };
        frame.render_widget(Block::default().style(Style::default().bg(color)), row);
    }
}

impl WeatherPanel {
    pub fn new() -> Self {
        Self::default()
    }

    fn search_props<'a>(state: &'a AppState, is_focused: bool) -> SearchBarProps<'a> {
        SearchBarProps {
            query: &state.query,
            is_focused,
            input_percent: state.layout.metrics().input_percent,
            button: RevealSchedule::intro().reveal(PanelElement::SearchButton, state.intro_ms),
        }
    }
}

impl Component<Action> for WeatherPanel {
    type Props<'a> = WeatherPanelProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        if let EventKind::Key(key) = event {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Esc => return vec![Action::Quit],
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return vec![Action::Quit];
                    }
                    KeyCode::Tab => return vec![Action::UiToggleLayout],
                    _ => {}
                }
            }
        }

        self.search
            .handle_event(event, Self::search_props(props.state, true))
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: WeatherPanelProps<'_>) {
        let state = props.state;
        let chunks = Layout::vertical([
            Constraint::Min(1),    // Backdrop + card
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        render_backdrop(frame, chunks[0]);

        let metrics = state.layout.metrics();
        let card = card_area(state, chunks[0]);
        frame.render_widget(
            Block::default().style(Style::default().bg(theme::CARD_BG).fg(theme::TEXT)),
            card,
        );
        let inner = Rect {
            x: card.x + metrics.padding.min(card.width / 2),
            y: card.y + 1.min(card.height),
            width: card.width.saturating_sub(metrics.padding * 2),
            height: card.height.saturating_sub(2),
        };

        let [search_area, body_area] =
            Layout::vertical([Constraint::Length(SEARCH_ROWS), Constraint::Fill(1)])
                .areas(inner);
        self.search.render(
            frame,
            search_area,
            Self::search_props(state, props.is_focused),
        );

        if let PanelView::Loaded(reading) = state.view() {
            let mut view = ReadingView;
            view.render(
                frame,
                body_area,
                ReadingViewProps {
                    reading,
                    metrics,
                    reveal_ms: state.reveal_ms,
                },
            );
        }

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[1],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("Enter", "search"),
                    StatusBarHint::new("Tab", "layout"),
                    StatusBarHint::new("Esc", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}
