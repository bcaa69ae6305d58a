//! Weather panel - look up current conditions for a city

use std::cell::RefCell;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};
use weather_panel::action::Action;
use weather_panel::api::{ProviderConfig, WeatherApiClient, DEFAULT_BASE_URL};
use weather_panel::components::notice::notice_area;
use weather_panel::components::{
    Component, Notice, NoticeProps, WeatherPanel, WeatherPanelProps,
};
use weather_panel::effect::Effect;
use weather_panel::icons::icon_for_condition;
use weather_panel::reducer::reducer;
use weather_panel::state::{AppState, PanelLayout, ANIM_TICK_MS, DEFAULT_CITY};

/// Weather panel - single-card weather lookup
#[derive(Parser, Debug)]
#[command(name = "weather-panel")]
#[command(about = "Look up current weather for a city (weatherapi.com)")]
struct Args {
    /// City queried on startup
    #[arg(long, short, default_value = DEFAULT_CITY)]
    city: String,

    /// weatherapi.com API key
    #[arg(long, env = "WEATHER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Provider base URL
    #[arg(long, env = "WEATHER_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds (minimum 1)
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,

    /// Starting layout
    #[arg(long, value_enum, default_value_t = PanelLayout::Compact)]
    layout: PanelLayout,

    /// Write logs to this file (the terminal is owned by the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum PanelComponentId {
    Panel,
    Notice,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum PanelContext {
    Main,
    Notice,
}

impl EventRoutingState<PanelComponentId, PanelContext> for AppState {
    fn focused(&self) -> Option<PanelComponentId> {
        if self.notice_open() {
            Some(PanelComponentId::Notice)
        } else {
            Some(PanelComponentId::Panel)
        }
    }

    fn modal(&self) -> Option<PanelComponentId> {
        if self.notice_open() {
            Some(PanelComponentId::Notice)
        } else {
            None
        }
    }

    fn binding_context(&self, id: PanelComponentId) -> PanelContext {
        match id {
            PanelComponentId::Panel => PanelContext::Main,
            PanelComponentId::Notice => PanelContext::Notice,
        }
    }

    fn default_context(&self) -> PanelContext {
        PanelContext::Main
    }
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("weather_panel=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        city,
        api_key,
        base_url,
        timeout,
        layout,
        log_file,
        debug: debug_args,
    } = Args::parse();

    if let Some(path) = &log_file {
        init_logging(path)?;
    }

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let client = WeatherApiClient::new(ProviderConfig {
        base_url,
        api_key,
        timeout_secs: timeout,
    })
    .map_err(|e| io::Error::other(format!("http client setup failed: {e}")))?;
    let client = Arc::new(client);

    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(city, layout))
        })
        .await
        .map_err(debug_error)?;
    // A single captured frame has no ticks to finish an entrance
    let state = AppState {
        animate: !debug.render_once(),
        ..state
    };
    info!(city = %state.default_city, layout = ?state.layout, "starting");

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

    let result = run_app(&mut terminal, &debug, store, client, replay_actions).await;

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

struct PanelUi {
    panel: WeatherPanel,
    notice: Notice,
}

impl PanelUi {
    fn new() -> Self {
        Self {
            panel: WeatherPanel::new(),
            notice: Notice::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<PanelComponentId>,
    ) {
        event_ctx.set_component_area(PanelComponentId::Panel, area);

        let props = WeatherPanelProps {
            state,
            is_focused: render_ctx.is_focused() && !state.notice_open(),
        };
        self.panel.render(frame, area, props);

        match &state.notice {
            Some(message) => {
                event_ctx.set_component_area(PanelComponentId::Notice, notice_area(area));
                let props = NoticeProps {
                    message,
                    is_focused: render_ctx.is_focused(),
                };
                self.notice.render(frame, area, props);
            }
            None => {
                event_ctx
                    .component_areas
                    .remove(&PanelComponentId::Notice);
            }
        }
    }

    fn handle_panel_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = WeatherPanelProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self.panel.handle_event(event, props).into_iter().collect();
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

    fn handle_notice_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let Some(message) = state.notice.as_deref() else {
            return HandlerResponse::ignored();
        };
        let props = NoticeProps {
            message,
            is_focused: true,
        };
        let actions: Vec<_> = self.notice.handle_event(event, props).into_iter().collect();
        // The notice blocks everything underneath it
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
    client: Arc<WeatherApiClient>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(PanelUi::new()));
    let mut bus: EventBus<AppState, Action, PanelComponentId, PanelContext> = EventBus::new();
    let keybindings: Keybindings<PanelContext> = Keybindings::new();

    let ui_panel = Rc::clone(&ui);
    bus.register(PanelComponentId::Panel, move |event, state| {
        ui_panel
            .borrow_mut()
            .handle_panel_event(&event.kind, state)
    });

    let ui_notice = Rc::clone(&ui);
    bus.register(PanelComponentId::Notice, move |event, state| {
        ui_notice
            .borrow_mut()
            .handle_notice_event(&event.kind, state)
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
            Some(Action::Init),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(ANIM_TICK_MS),
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
            move |effect, ctx| handle_effect(effect, ctx, Arc::clone(&client)),
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, client: Arc<WeatherApiClient>) {
    match effect {
        Effect::FetchCurrent { request_id, city } => {
            // One key per request: queries run side by side, none is cancelled
            let key = TaskKey::new(format!("query-{request_id}"));
            ctx.tasks().spawn(key, async move {
                info!(request_id, %city, "querying current conditions");
                match client.current(&city).await {
                    Ok(reading) => {
                        let icon = icon_for_condition(Some(&reading.condition));
                        info!(
                            request_id,
                            city = %reading.city,
                            icon = icon.label(),
                            asset = icon.asset_path(),
                            "reading loaded"
                        );
                        Action::QueryDidLoad {
                            request_id,
                            reading,
                        }
                    }
                    Err(e) => {
                        warn!(request_id, %city, error = %e, "query failed");
                        Action::QueryDidFail {
                            request_id,
                            error: e.to_string(),
                        }
                    }
                }
            });
        }
    }
}
