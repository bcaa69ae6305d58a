use artbox::{
    fonts, integrations::ratatui::ArtBox, Alignment as ArtAlignment, Fill, LinearGradient, Renderer,
};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::Paragraph,
    Frame,
};

use super::theme;
use super::Component;
use crate::action::Action;
use crate::icons::{icon_for_condition, StatGlyph};
use crate::reveal::{PanelElement, Reveal, RevealSchedule};
use crate::sprites::{self, SpriteSize};
use crate::state::{PanelMetrics, Reading};

/// Rows used by the FIGlet temperature (terminus font height).
pub const BIG_TEMPERATURE_ROWS: u16 = 6;
const STAT_ROWS: u16 = 3;

/// The loaded half of the panel: icon, temperature, city and stats
pub struct ReadingView;

pub struct ReadingViewProps<'a> {
    pub reading: &'a Reading,
    pub metrics: PanelMetrics,
    /// Reveal clock, `None` when settled
    pub reveal_ms: Option<u64>,
}

fn temperature_rows(metrics: &PanelMetrics) -> u16 {
    if metrics.big_temperature {
        BIG_TEMPERATURE_ROWS
    } else {
        1
    }
}

/// Rows the view asks for with the given sprite
pub fn required_height(metrics: &PanelMetrics, sprite: Option<SpriteSize>) -> u16 {
    let icon = sprite.map_or(1, SpriteSize::rows);
    // gap, icon, gap, temperature, city, gap, stats
    1 + icon + 1 + temperature_rows(metrics) + 1 + 1 + STAT_ROWS
}

/// Sprite size for `area_height`, shrinking from the preferred size.
fn fit_sprite(metrics: &PanelMetrics, area_height: u16) -> Option<SpriteSize> {
    let fixed = required_height(metrics, None) - 1;
    SpriteSize::fit(metrics.sprite_size, area_height.saturating_sub(fixed))
}

/// Move `slot` down by the reveal offset, keeping it inside `bounds`.
fn shifted(slot: Rect, reveal: Reveal, bounds: Rect) -> Rect {
    let y = slot.y.saturating_add(reveal.offset_rows);
    let bottom = bounds.y.saturating_add(bounds.height);
    Rect {
        y,
        height: slot.height.min(bottom.saturating_sub(y)),
        ..slot
    }
}

impl Component<Action> for ReadingView {
    type Props<'a> = ReadingViewProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let metrics = &props.metrics;
        let sprite = fit_sprite(metrics, area.height);
        let chunks = Layout::vertical([
            Constraint::Length(1), // gap
            Constraint::Length(sprite.map_or(1, SpriteSize::rows)), // icon
            Constraint::Length(1), // gap
            Constraint::Length(temperature_rows(metrics)), // temperature
            Constraint::Length(1), // city
            Constraint::Length(1), // gap
            Constraint::Length(STAT_ROWS), // stats
        ])
        .split(area);

        let schedule = RevealSchedule::panel();
        let reveal = |element| schedule.reveal(element, props.reveal_ms);
        let reading = props.reading;

        // Icon
        let icon_reveal = reveal(PanelElement::Icon);
        if !icon_reveal.is_hidden() {
            let icon = icon_for_condition(Some(&reading.condition));
            let art = match sprite {
                Some(size) => sprites::get_sprite(icon, size),
                None => Text::from(icon.emoji()),
            };
            let art = theme::fade_text(art, theme::CARD_BG, icon_reveal.opacity);
            frame.render_widget(
                Paragraph::new(art).alignment(Alignment::Center),
                shifted(chunks[1], icon_reveal, area),
            );
        }

        // Temperature
        let temp_reveal = reveal(PanelElement::Temperature);
        let slot = shifted(chunks[3], temp_reveal, area);
        if !temp_reveal.is_hidden() && !slot.is_empty() {
            let label = reading.temperature_label();
            if metrics.big_temperature {
                let start = theme::fade(theme::TEXT, theme::CARD_BG, temp_reveal.opacity);
                let end = theme::fade(theme::STAT_VALUE, theme::CARD_BG, temp_reveal.opacity);
                let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
                    .with_plain_fallback()
                    .with_alignment(ArtAlignment::Center)
                    .with_fill(Fill::Linear(LinearGradient::horizontal(
                        theme::art_color(start),
                        theme::art_color(end),
                    )));
                frame.render_widget(ArtBox::new(&renderer, &label), slot);
            } else {
                let style = Style::default()
                    .fg(theme::fade(theme::TEXT, theme::CARD_BG, temp_reveal.opacity))
                    .add_modifier(Modifier::BOLD);
                frame.render_widget(
                    Paragraph::new(Line::from(Span::styled(label, style)))
                        .alignment(Alignment::Center),
                    slot,
                );
            }
        }

        // City
        let city_reveal = reveal(PanelElement::City);
        if !city_reveal.is_hidden() {
            let style =
                Style::default().fg(theme::fade(theme::TEXT, theme::CARD_BG, city_reveal.opacity));
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(reading.city.clone(), style)))
                    .alignment(Alignment::Center),
                shifted(chunks[4], city_reveal, area),
            );
        }

        // Stats
        let [humidity_area, wind_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(chunks[6]);
        render_stat(
            frame,
            shifted(humidity_area, reveal(PanelElement::Humidity), area),
            StatGlyph::Humidity,
            reading.humidity_label(),
            reveal(PanelElement::Humidity),
        );
        render_stat(
            frame,
            shifted(wind_area, reveal(PanelElement::Wind), area),
            StatGlyph::Wind,
            reading.wind_label(),
            reveal(PanelElement::Wind),
        );
    }
}

fn render_stat(frame: &mut Frame, area: Rect, glyph: StatGlyph, value: String, reveal: Reveal) {
    if reveal.is_hidden() {
        return;
    }
    let fade = |color| theme::fade(color, theme::CARD_BG, reveal.opacity);
    let lines = vec![
        Line::from(glyph.symbol()),
        Line::from(Span::styled(
            value,
            Style::default()
                .fg(fade(theme::STAT_VALUE))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            glyph.caption(),
            Style::default().fg(fade(theme::TEXT)),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
