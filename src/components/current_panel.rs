use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};
use tui_dispatch::DataResource;

use super::Component;
use crate::action::Action;
use crate::conditions::classify;
use crate::forecast::{CurrentConditions, ForecastBundle};
use crate::state::TempUnit;

pub const ERROR_ICON: &str = "\u{26a0}\u{fe0f}";

/// Current-conditions panel: glyph, FIGlet temperature, label, wind line.
pub struct CurrentPanel;

pub struct CurrentPanelProps<'a> {
    pub forecast: &'a DataResource<ForecastBundle>,
    pub unit: TempUnit,
}

fn font_stack() -> Vec<artbox::Font> {
    fonts::stack(&["terminus", "miniwi"])
}

impl Component<Action> for CurrentPanel {
    type Props<'a> = CurrentPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        match props.forecast {
            DataResource::Failed(error) => render_error(frame, area, error),
            DataResource::Loaded(bundle) => {
                render_current(frame, area, &bundle.current, props.unit);
            }
            DataResource::Loading => render_message(frame, area, "Loading..."),
            DataResource::Empty => render_hint(frame, area),
        }
    }
}

fn make_layout(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::vertical([
        Constraint::Length(1), // Glyph
        Constraint::Length(1), // Blank
        Constraint::Max(6),    // Temperature
        Constraint::Length(1), // Condition label
        Constraint::Length(1), // Wind
    ])
    .flex(Flex::Center)
    .split(area)
}

fn render_current(frame: &mut Frame, area: Rect, current: &CurrentConditions, unit: TempUnit) {
    let chunks = make_layout(area);
    let condition = classify(current.weather_code);

    frame.render_widget(
        Paragraph::new(Line::from(condition.glyph).centered()),
        chunks[0],
    );

    let temp_text = unit.format(current.temperature);
    let renderer = Renderer::new(font_stack())
        .with_plain_fallback()
        .with_alignment(ArtAlignment::Center)
        .with_fill(temperature_gradient(current.temperature));
    frame.render_widget(ArtBox::new(&renderer, &temp_text), chunks[2]);

    let label = Line::from(vec![Span::styled(
        condition.label,
        Style::default().fg(Color::Gray),
    )])
    .centered();
    frame.render_widget(Paragraph::new(label), chunks[3]);

    let wind = Line::from(vec![Span::styled(
        format!("Wind {:.1} km/h", current.wind_speed),
        Style::default().fg(Color::DarkGray),
    )])
    .centered();
    frame.render_widget(Paragraph::new(wind), chunks[4]);
}

fn render_message(frame: &mut Frame, area: Rect, message: &str) {
    let chunks = make_layout(area);
    let msg = Line::from(vec![Span::styled(
        message,
        Style::default().fg(Color::DarkGray),
    )])
    .centered();
    frame.render_widget(Paragraph::new(msg), chunks[3]);
}

fn render_hint(frame: &mut Frame, area: Rect) {
    let chunks = make_layout(area);
    let hint = Line::from(vec![
        Span::styled("Press ", Style::default().fg(Color::DarkGray)),
        Span::styled("/", Style::default().fg(Color::Cyan).bold()),
        Span::styled(
            " to look up a city or coordinates, ",
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled("l", Style::default().fg(Color::Cyan).bold()),
        Span::styled(" for your location", Style::default().fg(Color::DarkGray)),
    ])
    .centered();
    frame.render_widget(Paragraph::new(hint), chunks[3]);
}

fn render_error(frame: &mut Frame, area: Rect, error: &str) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // icon
        Constraint::Length(1), // "Error"
        Constraint::Length(1), // message
        Constraint::Length(1), // blank
        Constraint::Length(1), // hint
    ])
    .flex(Flex::Center)
    .split(area);

    frame.render_widget(Paragraph::new(Line::from(ERROR_ICON).centered()), chunks[0]);
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![Span::styled(
                "Error",
                Style::default().fg(Color::Red).bold(),
            )])
            .centered(),
        ),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![Span::styled(
                error.to_string(),
                Style::default().fg(Color::Rgb(200, 100, 100)),
            )])
            .centered(),
        ),
        chunks[2],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::DarkGray)),
                Span::styled("/", Style::default().fg(Color::Cyan).bold()),
                Span::styled(" to try another lookup", Style::default().fg(Color::DarkGray)),
            ])
            .centered(),
        ),
        chunks[4],
    );
}

fn temperature_gradient(celsius: f32) -> Fill {
    let (start, end) = match celsius {
        t if t < 0.0 => (ArtColor::rgb(150, 200, 255), ArtColor::rgb(200, 230, 255)),
        t if t < 15.0 => (ArtColor::rgb(100, 180, 255), ArtColor::rgb(150, 220, 200)),
        t if t < 25.0 => (ArtColor::rgb(100, 200, 150), ArtColor::rgb(255, 220, 100)),
        t if t < 35.0 => (ArtColor::rgb(255, 180, 80), ArtColor::rgb(255, 120, 80)),
        _ => (ArtColor::rgb(255, 100, 80), ArtColor::rgb(255, 60, 60)),
    };
    Fill::Linear(LinearGradient::horizontal(start, end))
}
