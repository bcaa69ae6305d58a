use crossterm::event::{KeyCode, KeyEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Borders, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, BorderStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding,
};

use super::theme;
use super::Component;
use crate::action::Action;

const NOTICE_WIDTH: u16 = 44;
const NOTICE_HEIGHT: u16 = 7;
/// Border plus one line of text
const NOTICE_MIN_HEIGHT: u16 = 3;
const NOTICE_MIN_WIDTH: u16 = 4;

/// Blocking failure notice
pub struct Notice {
    modal: Modal,
}

pub struct NoticeProps<'a> {
    pub message: &'a str,
    pub is_focused: bool,
}

/// Centered notice box, clamped to `area`
pub fn notice_area(area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(NOTICE_HEIGHT.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(NOTICE_WIDTH.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

fn notice_style() -> ModalStyle {
    ModalStyle {
        dim_factor: 0.6,
        base: BaseStyle {
            border: Some(BorderStyle {
                borders: Borders::ALL,
                style: Style::default().fg(theme::TEXT_DIM),
                focused_style: Some(Style::default().fg(theme::ACCENT)),
            }),
            padding: Padding::xy(1, 0),
            bg: Some(theme::CARD_BG),
            fg: Some(theme::TEXT),
        },
    }
}

fn notice_close() -> Action {
    Action::NoticeDismiss
}

impl Default for Notice {
    fn default() -> Self {
        Self {
            modal: Modal::new(),
        }
    }
}

impl Notice {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for Notice {
    type Props<'a> = NoticeProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        match event {
            EventKind::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Enter | KeyCode::Esc => Some(Action::NoticeDismiss),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if area.height < NOTICE_MIN_HEIGHT || area.width < NOTICE_MIN_WIDTH {
            return;
        }
        let mut render_content = |frame: &mut Frame, inner: Rect| {
            let [message, _, hint] = Layout::vertical([
                Constraint::Length(2),
                Constraint::Fill(1),
                Constraint::Length(1),
            ])
            .areas(inner);

            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    props.message.to_string(),
                    Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD),
                )))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
                message,
            );
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled("Enter", Style::default().fg(theme::ACCENT)),
                    Span::styled(" to dismiss", Style::default().fg(theme::TEXT_DIM)),
                ]))
                .alignment(Alignment::Center),
                hint,
            );
        };

        self.modal.render(
            frame,
            area,
            ModalProps {
                is_open: true,
                is_focused: props.is_focused,
                area: notice_area(area),
                style: notice_style(),
                behavior: ModalBehavior {
                    close_on_esc: true,
                    close_on_backdrop: false,
                },
                on_close: notice_close,
                render_content: &mut render_content,
            },
        );
    }
}
