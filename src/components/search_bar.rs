use crossterm::event::{KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Position, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle};

use super::theme;
use super::Component;
use crate::action::Action;
use crate::reveal::Reveal;

pub const SEARCH_PLACEHOLDER: &str = "Search city";
const BUTTON_LABEL: &str = " \u{1f50d} ";
const BUTTON_WIDTH: u16 = 6;
const GAP: u16 = 2;
/// Rows the padded input needs; shorter rows drop the vertical padding.
const INPUT_ROWS: u16 = 3;
/// Horizontal padding plus one cell for text and cursor
const INPUT_MIN_WIDTH: u16 = 3;

/// City input plus the search button
pub struct SearchBar {
    input: TextInput,
    button_area: Option<Rect>,
}

pub struct SearchBarProps<'a> {
    pub query: &'a str,
    pub is_focused: bool,
    /// Share of the row given to the input, in percent
    pub input_percent: u16,
    /// Pop-in state of the search button
    pub button: Reveal,
}

fn submit_query(_: String) -> Action {
    Action::QuerySubmit
}

fn input_style(height: u16) -> TextInputStyle {
    let padding = if height >= INPUT_ROWS {
        Padding::all(1)
    } else {
        Padding::xy(1, 0)
    };
    TextInputStyle {
        base: BaseStyle {
            border: None,
            padding,
            bg: Some(theme::INPUT_BG),
            fg: Some(theme::ACCENT),
        },
        placeholder_style: Some(Style::default().fg(theme::TEXT_DIM)),
        cursor_style: Some(Style::default().bg(theme::ACCENT).fg(theme::INPUT_BG)),
    }
}

impl Default for SearchBar {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
            button_area: None,
        }
    }
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Where the button was last drawn
    pub fn button_area(&self) -> Option<Rect> {
        self.button_area
    }

    fn split(area: Rect, input_percent: u16) -> (Rect, Rect) {
        let input_w = (area.width.saturating_sub(GAP) as u32 * input_percent as u32 / 100) as u16;
        let [input, _, button] = Layout::horizontal([
            Constraint::Length(input_w),
            Constraint::Length(GAP),
            Constraint::Length(BUTTON_WIDTH),
        ])
        .flex(Flex::Center)
        .areas(area);
        (input, button)
    }
}

impl Component<Action> for SearchBar {
    type Props<'a> = SearchBarProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        match event {
            EventKind::Key(key) if key.kind == KeyEventKind::Press => {
                if key.code == KeyCode::Enter {
                    return vec![Action::QuerySubmit];
                }
            }
            EventKind::Mouse(mouse) => {
                let clicked = matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left))
                    && self
                        .button_area
                        .is_some_and(|r| r.contains(Position::new(mouse.column, mouse.row)));
                return if clicked {
                    vec![Action::QuerySubmit]
                } else {
                    Vec::new()
                };
            }
            _ => {}
        }

        let input_props = TextInputProps {
            value: props.query,
            placeholder: SEARCH_PLACEHOLDER,
            is_focused: true,
            style: input_style(INPUT_ROWS),
            on_change: Action::QueryChange,
            on_submit: submit_query,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if area.is_empty() {
            self.button_area = None;
            return;
        }
        let (input_area, button_area) = Self::split(area, props.input_percent);

        if input_area.height > 0 && input_area.width >= INPUT_MIN_WIDTH {
            let input_props = TextInputProps {
                value: props.query,
                placeholder: SEARCH_PLACEHOLDER,
                is_focused: props.is_focused,
                style: input_style(input_area.height),
                on_change: Action::QueryChange,
                on_submit: submit_query,
                on_cursor_move: Some(|_| Action::Render),
            };
            self.input.render(frame, input_area, input_props);
        }

        if props.button.is_hidden() || button_area.is_empty() {
            self.button_area = None;
            return;
        }

        let bg = theme::fade(theme::INPUT_BG, theme::CARD_BG, props.button.opacity);
        let fg = theme::fade(theme::ACCENT, theme::CARD_BG, props.button.opacity);
        let label_row = Rect {
            y: button_area.y + button_area.height / 2,
            height: button_area.height.min(1),
            ..button_area
        };
        frame.render_widget(Block::default().style(Style::default().bg(bg)), button_area);
        frame.render_widget(
            Paragraph::new(Line::from(BUTTON_LABEL))
                .alignment(Alignment::Center)
                .style(Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD)),
            label_row,
        );
        self.button_area = Some(button_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseEvent};
    use tui_dispatch::testing::*;

    fn props(query: &str) -> SearchBarProps<'_> {
        SearchBarProps {
            query,
            is_focused: true,
            input_percent: 70,
            button: Reveal::SHOWN,
        }
    }

    fn click(column: u16, row: u16) -> EventKind {
        EventKind::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_enter_submits() {
        let mut bar = SearchBar::new();
        let actions: Vec<_> = bar
            .handle_event(&EventKind::Key(key("enter")), props("Rome"))
            .into_iter()
            .collect();
        actions.assert_count(1);
        actions.assert_first(Action::QuerySubmit);
    }

    #[test]
    fn test_typing_changes_query() {
        let mut bar = SearchBar::new();
        let actions: Vec<_> = bar
            .handle_event(&EventKind::Key(key("a")), props(""))
            .into_iter()
            .collect();
        assert!(actions.contains(&Action::QueryChange("a".into())));
        assert!(!actions.contains(&Action::QuerySubmit));
    }

    #[test]
    fn test_click_on_button_submits() {
        let mut render = RenderHarness::new(40, 3);
        let mut bar = SearchBar::new();
        render.render_to_string_plain(|frame| bar.render(frame, frame.area(), props("Rome")));

        let button = bar.button_area().unwrap();
        let actions: Vec<_> = bar
            .handle_event(&click(button.x + 1, button.y + 1), props("Rome"))
            .into_iter()
            .collect();
        actions.assert_first(Action::QuerySubmit);

        let actions: Vec<_> = bar
            .handle_event(&click(0, 0), props("Rome"))
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_short_rows_render_without_vertical_padding() {
        for height in 0..=2 {
            let mut render = RenderHarness::new(40, height.max(1));
            let mut bar = SearchBar::new();
            let output = render.render_to_string_plain(|frame| {
                let area = Rect {
                    height,
                    ..frame.area()
                };
                bar.render(frame, area, props("Paris"))
            });
            if height > 0 {
                assert!(output.contains("Paris"), "height {height}:\n{output}");
                assert!(bar.button_area().is_some());
            } else {
                assert!(bar.button_area().is_none());
            }
        }
    }

    #[test]
    fn test_hidden_button_is_not_clickable() {
        let mut render = RenderHarness::new(40, 3);
        let mut bar = SearchBar::new();
        render.render_to_string_plain(|frame| {
            let props = SearchBarProps {
                button: Reveal::from_progress(0.0),
                ..props("")
            };
            bar.render(frame, frame.area(), props)
        });
        assert!(bar.button_area().is_none());
    }

    #[test]
    fn test_unfocused_ignores() {
        let mut bar = SearchBar::new();
        let props = SearchBarProps {
            is_focused: false,
            ..props("")
        };
        let actions: Vec<_> = bar
            .handle_event(&EventKind::Key(key("enter")), props)
            .into_iter()
            .collect();
        actions.assert_empty();
    }
}
