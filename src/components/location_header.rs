use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, ColorStop, Fill, LinearGradient, Renderer,
    fonts, integrations::ratatui::ArtBox,
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use crate::action::Action;
use crate::state::{LOADING_ANIM_CYCLE_TICKS, Location};

pub struct LocationHeader;

pub struct LocationHeaderProps<'a> {
    pub location: Option<&'a Location>,
    pub temperature: Option<f32>,
    pub is_animating: bool,
    pub tick_count: u32,
}

fn gradient_colors(temp: Option<f32>) -> (ArtColor, ArtColor) {
    match temp {
        Some(t) if t < 0.0 => (ArtColor::rgb(150, 200, 255), ArtColor::rgb(200, 230, 255)),
        Some(t) if t < 15.0 => (ArtColor::rgb(100, 180, 255), ArtColor::rgb(150, 220, 200)),
        Some(t) if t < 25.0 => (ArtColor::rgb(100, 200, 150), ArtColor::rgb(255, 220, 100)),
        Some(t) if t < 35.0 => (ArtColor::rgb(255, 180, 80), ArtColor::rgb(255, 120, 80)),
        Some(_) => (ArtColor::rgb(255, 100, 80), ArtColor::rgb(255, 60, 60)),
        None => (ArtColor::rgb(180, 180, 180), ArtColor::rgb(220, 220, 220)),
    }
}

/// Sliding midpoint gradient; `phase` in [0,1) moves the seam across the
/// text while an attempt is in flight.
fn make_gradient(colors: (ArtColor, ArtColor), phase: f32) -> Fill {
    let mid = colors.0.interpolate(colors.1, 0.5);
    let seam = 0.15 + 0.7 * phase.rem_euclid(1.0);
    let stops = vec![
        ColorStop::new(0.0, colors.0),
        ColorStop::new(seam, mid),
        ColorStop::new(1.0, colors.1),
    ];
    Fill::Linear(LinearGradient::new(5.0, stops))
}

fn animated_phase(tick_count: u32) -> f32 {
    let steps = LOADING_ANIM_CYCLE_TICKS.max(1);
    (tick_count % steps) as f32 / steps as f32
}

impl Component<Action> for LocationHeader {
    type Props<'a> = LocationHeaderProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([
            Constraint::Fill(1),   // FIGlet location name
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Coordinates
        ])
        .split(area);

        let colors = gradient_colors(props.temperature);
        let phase = if props.is_animating {
            animated_phase(props.tick_count)
        } else {
            0.5
        };
        let fill = make_gradient(colors, phase);

        let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
            .with_plain_fallback()
            .with_alignment(ArtAlignment::Center)
            .with_fill(fill);

        let title = props.location.map_or("skycast", |loc| loc.name.as_str());
        frame.render_widget(ArtBox::new(&renderer, title), chunks[0]);

        if let Some(loc) = props.location {
            let coords_line = Line::from(vec![Span::styled(
                format!("{:.2}°N, {:.2}°E", loc.lat, loc.lon),
                Style::default().fg(Color::DarkGray),
            )])
            .centered();
            frame.render_widget(Paragraph::new(coords_line), chunks[2]);
        }
    }
}
