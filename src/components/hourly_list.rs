use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Padding, ScrollbarStyle, SelectList, SelectListBehavior, SelectListProps,
    SelectListStyle, SelectionStyle,
};

use super::Component;
use crate::action::Action;
use crate::conditions::classify;
use crate::forecast::HourlyEntry;
use crate::state::TempUnit;

/// Hour picker: the upcoming hours as a single-selection list, with a
/// detail panel for the picked hour.
pub struct HourlyList {
    list: SelectList,
}

pub struct HourlyListProps<'a> {
    pub entries: &'a [HourlyEntry],
    pub selected: Option<usize>,
    pub unit: TempUnit,
    pub is_focused: bool,
    pub on_select: fn(usize) -> Action,
}

impl Default for HourlyList {
    fn default() -> Self {
        Self {
            list: SelectList::new(),
        }
    }
}

impl HourlyList {
    pub fn new() -> Self {
        Self::default()
    }

    fn row_items(entries: &[HourlyEntry], unit: TempUnit) -> Vec<Line<'static>> {
        entries
            .iter()
            .map(|entry| {
                let condition = classify(entry.weather_code);
                Line::from(format!(
                    "{}  {:>7}  {}",
                    entry.time.format("%H:%M"),
                    unit.format(entry.temperature),
                    condition.glyph,
                ))
            })
            .collect()
    }
}

impl Component<Action> for HourlyList {
    type Props<'a> = HourlyListProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused || props.entries.is_empty() {
            return None;
        }

        let EventKind::Key(key) = event else {
            return None;
        };

        let last = props.entries.len() - 1;
        let next = match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                props.selected.map_or(0, |i| (i + 1).min(last))
            }
            KeyCode::Up | KeyCode::Char('k') => props.selected.map_or(0, |i| i.saturating_sub(1)),
            KeyCode::Home => 0,
            KeyCode::End => last,
            _ => return None,
        };
        Some((props.on_select)(next))
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([
            Constraint::Length(1), // Title
            Constraint::Min(3),    // List
            Constraint::Length(4), // Detail
        ])
        .split(area);

        let title = Line::from(vec![Span::styled(
            format!("Next {} hours", props.entries.len()),
            Style::default().fg(Color::Gray).bold(),
        )]);
        frame.render_widget(Paragraph::new(title), chunks[0]);

        if props.entries.is_empty() {
            let empty = Line::from(vec![Span::styled(
                "No upcoming hours",
                Style::default().fg(Color::DarkGray),
            )]);
            frame.render_widget(Paragraph::new(empty), chunks[1]);
            return;
        }

        let items = Self::row_items(props.entries, props.unit);
        let list_props = SelectListProps {
            items: &items,
            count: items.len(),
            selected: props.selected.unwrap_or(0),
            is_focused: props.is_focused && props.selected.is_some(),
            style: SelectListStyle {
                base: BaseStyle {
                    border: None,
                    padding: Padding::xy(1, 0),
                    bg: None,
                    fg: None,
                },
                selection: SelectionStyle::default(),
                scrollbar: ScrollbarStyle::default(),
            },
            behavior: SelectListBehavior::default(),
            on_select: props.on_select,
            render_item: &|item| item.clone(),
        };
        self.list.render(frame, chunks[1], list_props);

        render_detail(frame, chunks[2], &props);
    }
}

fn render_detail(frame: &mut Frame, area: Rect, props: &HourlyListProps<'_>) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(area);

    let Some(entry) = props.selected.and_then(|i| props.entries.get(i)) else {
        let hint = Line::from(vec![Span::styled(
            "\u{2191}/\u{2193} to pick an hour",
            Style::default().fg(Color::DarkGray),
        )]);
        frame.render_widget(Paragraph::new(hint), chunks[1]);
        return;
    };

    let condition = classify(entry.weather_code);
    frame.render_widget(
        Paragraph::new(Line::from(vec![Span::styled(
            entry.time.format("%a %d %b, %H:%M").to_string(),
            Style::default().fg(Color::Cyan),
        )])),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(Line::from(format!(
            "{}  \u{00b7}  wind {:.1} km/h",
            props.unit.format(entry.temperature),
            entry.wind_speed,
        ))),
        chunks[2],
    );
    frame.render_widget(
        Paragraph::new(Line::from(format!("{} {}", condition.glyph, condition.label))),
        chunks[3],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crossterm::event::KeyEvent;
    use tui_dispatch::testing::*;

    fn down() -> EventKind {
        EventKind::Key(KeyEvent::from(KeyCode::Down))
    }

    fn entries(n: u32) -> Vec<HourlyEntry> {
        (0..n)
            .map(|h| HourlyEntry {
                time: NaiveDate::from_ymd_opt(2024, 6, 1)
                    .unwrap()
                    .and_hms_opt(h, 0, 0)
                    .unwrap(),
                temperature: 10.0 + h as f32,
                wind_speed: 5.0,
                weather_code: 0,
            })
            .collect()
    }

    #[test]
    fn test_down_selects_first_entry() {
        let mut component = HourlyList::new();
        let entries = entries(12);
        let props = HourlyListProps {
            entries: &entries,
            selected: None,
            unit: TempUnit::Celsius,
            is_focused: true,
            on_select: Action::HourSelect,
        };

        let actions: Vec<_> = component
            .handle_event(&down(), props)
            .into_iter()
            .collect();
        actions.assert_first(Action::HourSelect(0));
    }

    #[test]
    fn test_down_clamps_at_end() {
        let mut component = HourlyList::new();
        let entries = entries(3);
        let props = HourlyListProps {
            entries: &entries,
            selected: Some(2),
            unit: TempUnit::Celsius,
            is_focused: true,
            on_select: Action::HourSelect,
        };

        let actions: Vec<_> = component
            .handle_event(&down(), props)
            .into_iter()
            .collect();
        actions.assert_first(Action::HourSelect(2));
    }

    #[test]
    fn test_no_actions_when_empty() {
        let mut component = HourlyList::new();
        let props = HourlyListProps {
            entries: &[],
            selected: None,
            unit: TempUnit::Celsius,
            is_focused: true,
            on_select: Action::HourSelect,
        };

        let actions: Vec<_> = component
            .handle_event(&down(), props)
            .into_iter()
            .collect();
        actions.assert_empty();
    }
}
