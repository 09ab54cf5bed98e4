use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{
    Component, CurrentPanel, CurrentPanelProps, HourlyList, HourlyListProps, LocationHeader,
    LocationHeaderProps,
};
use crate::action::Action;
use crate::state::AppState;

/// Props for ForecastDisplay - read-only view of state
pub struct ForecastDisplayProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The main screen: location header, current conditions, hour picker.
pub struct ForecastDisplay {
    hourly: HourlyList,
}

impl Default for ForecastDisplay {
    fn default() -> Self {
        Self {
            hourly: HourlyList::new(),
        }
    }
}

impl ForecastDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for ForecastDisplay {
    type Props<'a> = ForecastDisplayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        if let EventKind::Key(key) = event {
            match key.code {
                KeyCode::Char('r') | KeyCode::F(5) => return vec![Action::ForecastFetch],
                KeyCode::Char('/') => return vec![Action::SearchOpen],
                KeyCode::Char('l') => return vec![Action::LocateRequest],
                KeyCode::Char('u') => return vec![Action::UiToggleUnits],
                KeyCode::Char('q') | KeyCode::Esc => return vec![Action::Quit],
                _ => {}
            }
        }

        // Remaining keys drive the hour picker
        let entries = props
            .state
            .forecast
            .data()
            .map(|bundle| bundle.hourly.as_slice())
            .unwrap_or_default();
        let hourly_props = HourlyListProps {
            entries,
            selected: props.state.selected_hour,
            unit: props.state.unit,
            is_focused: true,
            on_select: Action::HourSelect,
        };
        self.hourly
            .handle_event(event, hourly_props)
            .into_iter()
            .collect::<Vec<_>>()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: ForecastDisplayProps<'_>) {
        let chunks = Layout::vertical([
            Constraint::Max(8),    // Location header
            Constraint::Min(7),    // Current conditions + hour picker
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        let state = props.state;

        let mut header = LocationHeader;
        header.render(
            frame,
            chunks[0],
            LocationHeaderProps {
                location: state.location.as_ref(),
                temperature: state.forecast.data().map(|b| b.current.temperature),
                is_animating: state.loading_anim_active(),
                tick_count: state.tick_count,
            },
        );

        let entries = state
            .forecast
            .data()
            .map(|bundle| bundle.hourly.as_slice())
            .unwrap_or_default();

        let mut current = CurrentPanel;
        if entries.is_empty() {
            current.render(
                frame,
                chunks[1],
                CurrentPanelProps {
                    forecast: &state.forecast,
                    unit: state.unit,
                },
            );
        } else {
            let columns =
                Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                    .split(chunks[1]);
            current.render(
                frame,
                columns[0],
                CurrentPanelProps {
                    forecast: &state.forecast,
                    unit: state.unit,
                },
            );
            self.hourly.render(
                frame,
                columns[1],
                HourlyListProps {
                    entries,
                    selected: state.selected_hour,
                    unit: state.unit,
                    is_focused: props.is_focused && !state.search_mode,
                    on_select: Action::HourSelect,
                },
            );
        }

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[2],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("/", "lookup"),
                    StatusBarHint::new("l", "locate"),
                    StatusBarHint::new("r", "refresh"),
                    StatusBarHint::new("\u{2191}\u{2193}", "hours"),
                    StatusBarHint::new("u", "units"),
                    StatusBarHint::new("q", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}
