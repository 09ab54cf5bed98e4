//! Skycast - terminal weather lookup

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use skycast::action::Action;
use skycast::api;
use skycast::api::ApiError;
use skycast::components::{
    Component, ForecastDisplay, ForecastDisplayProps, LookupOverlay, LookupOverlayProps,
};
use skycast::effect::Effect;
use skycast::reducer::reducer;
use skycast::state::{AppState, LOADING_ANIM_TICK_MS};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_components::centered_rect;
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

/// Skycast - look up current conditions and the next twelve hours
#[derive(Parser, Debug)]
#[command(name = "skycast")]
#[command(about = "A terminal weather lookup for any city or coordinate pair")]
struct Args {
    /// City to resolve before the first fetch (optional; the in-app
    /// lookup overlay works without it)
    #[arg(long, short)]
    city: Option<String>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum SkycastComponentId {
    Display,
    Lookup,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum SkycastContext {
    Main,
    Lookup,
}

impl EventRoutingState<SkycastComponentId, SkycastContext> for AppState {
    fn focused(&self) -> Option<SkycastComponentId> {
        if self.search_mode {
            Some(SkycastComponentId::Lookup)
        } else {
            Some(SkycastComponentId::Display)
        }
    }

    fn modal(&self) -> Option<SkycastComponentId> {
        if self.search_mode {
            Some(SkycastComponentId::Lookup)
        } else {
            None
        }
    }

    fn binding_context(&self, id: SkycastComponentId) -> SkycastContext {
        match id {
            SkycastComponentId::Display => SkycastContext::Main,
            SkycastComponentId::Lookup => SkycastContext::Lookup,
        }
    }

    fn default_context(&self) -> SkycastContext {
        SkycastContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        city,
        debug: debug_args,
    } = Args::parse();

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(move || async move {
            let mut state = AppState::new();
            if let Some(city) = city {
                match api::geocode_city(&city).await {
                    Ok(location) => state.location = Some(location),
                    Err(ApiError::NotFound(city)) => {
                        eprintln!("Error: City '{}' not found. Please check the spelling.", city);
                        eprintln!("Examples: 'London', 'Tokyo', 'New York'");
                        std::process::exit(1);
                    }
                    Err(e) => {
                        eprintln!("Error: Could not resolve '{}': {}", city, e);
                        std::process::exit(1);
                    }
                }
            }
            Ok::<AppState, io::Error>(state)
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

struct SkycastUi {
    display: ForecastDisplay,
    lookup: LookupOverlay,
}

impl SkycastUi {
    fn new() -> Self {
        Self {
            display: ForecastDisplay::new(),
            lookup: LookupOverlay::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<SkycastComponentId>,
    ) {
        event_ctx.set_component_area(SkycastComponentId::Display, area);

        let props = ForecastDisplayProps {
            state,
            is_focused: render_ctx.is_focused() && !state.search_mode,
        };
        self.display.render(frame, area, props);

        self.lookup.set_open(state.search_mode);
        if state.search_mode {
            let modal_area = centered_rect(60, 7, area);
            event_ctx.set_component_area(SkycastComponentId::Lookup, modal_area);
            let props = LookupOverlayProps {
                query: &state.search_query,
                is_focused: render_ctx.is_focused(),
                on_query_change: Action::SearchQueryChange,
                on_query_submit: Action::SearchSubmit,
            };
            self.lookup.render(frame, area, props);
        } else {
            event_ctx.component_areas.remove(&SkycastComponentId::Lookup);
        }
    }

    fn handle_display_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = ForecastDisplayProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .display
            .handle_event(event, props)
            .into_iter()
            .collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }

    fn handle_lookup_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        self.lookup.set_open(state.search_mode);
        let props = LookupOverlayProps {
            query: &state.search_query,
            is_focused: true,
            on_query_change: Action::SearchQueryChange,
            on_query_submit: Action::SearchSubmit,
        };
        let actions: Vec<_> = self.lookup.handle_event(event, props).into_iter().collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(SkycastUi::new()));
    let mut bus: EventBus<AppState, Action, SkycastComponentId, SkycastContext> = EventBus::new();
    let keybindings: Keybindings<SkycastContext> = Keybindings::new();

    let ui_display = Rc::clone(&ui);
    bus.register(SkycastComponentId::Display, move |event, state| {
        ui_display
            .borrow_mut()
            .handle_display_event(&event.kind, state)
    });

    let ui_lookup = Rc::clone(&ui);
    bus.register(SkycastComponentId::Lookup, move |event, state| {
        ui_lookup
            .borrow_mut()
            .handle_lookup_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::ForecastFetch),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(LOADING_ANIM_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

/// Handle effects by spawning tasks. All three effects share the
/// "forecast" task key, so a newer attempt replaces whatever is in
/// flight for the old one.
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::FetchForecast { seq, location } => {
            ctx.tasks().spawn("forecast", async move {
                let now = chrono::Local::now().naive_local();
                match api::fetch_forecast(location.lat, location.lon).await {
                    Ok(bundle) => Action::ForecastDidLoad {
                        seq,
                        bundle: bundle.windowed(now),
                    },
                    Err(e) => Action::ForecastDidError {
                        seq,
                        message: e.to_string(),
                    },
                }
            });
        }
        Effect::Geocode { seq, city } => {
            ctx.tasks().spawn("forecast", async move {
                match api::geocode_city(&city).await {
                    Ok(location) => Action::LocationDidResolve { seq, location },
                    Err(e) => Action::ForecastDidError {
                        seq,
                        message: e.to_string(),
                    },
                }
            });
        }
        Effect::Locate { seq } => {
            ctx.tasks().spawn("forecast", async move {
                match api::locate_device().await {
                    Ok(location) => Action::LocationDidResolve { seq, location },
                    Err(e) => Action::ForecastDidError {
                        seq,
                        message: e.to_string(),
                    },
                }
            });
        }
    }
}
