//! Terminal runtime and entry point.
//!
//! This binary is the thin integration layer between the dashboard library
//! and a real terminal. It owns everything with side effects: the terminal
//! itself, HTTP requests, and timers. All decisions are made by
//! [`handle_event`].
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │   tokio current-thread runtime           │
//! │  ┌────────────────────────────────────┐  │
//! │  │  event loop (AppState, ToastQueue) │  │  ← input, redraw
//! │  └────────────────────────────────────┘  │
//! │      │ spawn            ▲ Inbound        │
//! │      ▼                  │ (channel)      │
//! │  ┌────────────────────────────────────┐  │
//! │  │  request tasks · toast timers      │  │  ← reqwest, sleep
//! │  └────────────────────────────────────┘  │
//! └──────────────────────────────────────────┘
//! ```
//!
//! # Lifecycle
//!
//! 1. **Load**: Parse flags, load config, initialize logging, build `AppState`
//! 2. **Enter**: Raw mode, alternate screen, hidden cursor
//! 3. **Mount**: Send `Event::Mount`, which fetches the vehicle list
//! 4. **Loop**: Translate input and request outcomes to events, execute actions
//! 5. **Exit**: `Event::Quit` unmounts; the terminal is restored on every path
//!
//! # Keybindings
//!
//! Global (all modes):
//! - `Ctrl+c`: Quit
//!
//! In browse mode:
//! - `j`/`Down`: Move down
//! - `k`/`Up`: Move up
//! - `a`/`i`/`m`: Set selected vehicle Active/Inactive/Maintenance
//! - `f`/`F`: Next/previous status filter
//! - `n`/`Tab`: Focus the add form
//! - `r`: Reload (remount)
//! - `q`: Quit
//!
//! In form mode:
//! - Characters: Type the vehicle name
//! - `Backspace`: Delete last character
//! - `Tab`/`Shift+Tab`: Cycle draft status
//! - `Enter`: Add vehicle
//! - `Esc`: Back to browse mode

#![allow(clippy::multiple_crate_versions)]

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{Event as TermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, queue, terminal};
use futures_util::StreamExt;
use tokio::sync::mpsc;

use vehicle_dashboard::api::{ApiRequest, ApiResponse, HttpTransport, RequestContext};
use vehicle_dashboard::app::state::MAX_VISIBLE_TOASTS;
use vehicle_dashboard::notify::ToastQueue;
use vehicle_dashboard::{
    handle_event, Action, AppState, Config, ConfigOverrides, DashboardError, Event, InputMode,
    VehicleStatus,
};

/// Terminal dashboard for a remote vehicle collection.
#[derive(Debug, Parser)]
#[command(name = "vehicle-dashboard", version, about)]
struct Cli {
    /// Config file (default: <config dir>/vehicle-dashboard/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Origin of the vehicle service
    #[arg(long, env = "VEHICLE_DASHBOARD_BASE_URL", value_name = "URL")]
    base_url: Option<String>,

    /// Built-in theme (catppuccin-mocha, catppuccin-latte)
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// Custom TOML theme file
    #[arg(long, value_name = "PATH")]
    theme_file: Option<PathBuf>,

    /// Log filter directive, e.g. "debug"
    #[arg(long, value_name = "FILTER")]
    trace_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.base_url.clone(),
            theme_name: self.theme.clone(),
            theme_file: self.theme_file.clone(),
            trace_level: self.trace_level.clone(),
        }
    }
}

/// Messages from spawned tasks back to the event loop.
#[derive(Debug)]
enum Inbound {
    Response {
        context: RequestContext,
        response: ApiResponse,
    },
    ToastExpired,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()).and_then(|c| c.with_overrides(cli.overrides())) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("vehicle-dashboard: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(log_file) = vehicle_dashboard::observability::init_logging(&config) {
        tracing::debug!(log_file = %log_file.display(), "logging initialized");
    }

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("vehicle-dashboard: failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = runtime.block_on(run(&config));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "dashboard exited with error");
            eprintln!("vehicle-dashboard: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Raw mode and alternate screen, undone on drop.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> vehicle_dashboard::Result<Self> {
        terminal::enable_raw_mode().map_err(terminal_error)?;
        let guard = Self;
        execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide).map_err(terminal_error)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen) {
            tracing::warn!(error = %e, "failed to leave alternate screen");
        }
        if let Err(e) = terminal::disable_raw_mode() {
            tracing::warn!(error = %e, "failed to disable raw mode");
        }
    }
}

/// Writes one rendered frame. Components pad every row to full width, so the
/// screen is only wiped when `clear` is set.
fn write_frame(out: &mut impl Write, output: &str, clear: bool) -> io::Result<()> {
    if clear {
        queue!(out, terminal::Clear(terminal::ClearType::All))?;
    }
    out.write_all(output.as_bytes())?;
    out.flush()
}

fn terminal_error(e: io::Error) -> DashboardError {
    DashboardError::Terminal(e.to_string())
}

/// Event loop state owned by the runtime.
struct Runtime {
    app: AppState,
    toasts: ToastQueue,
    transport: HttpTransport,
    toast_duration: Duration,
    inbound: mpsc::UnboundedSender<Inbound>,
    rows: usize,
    cols: usize,
    /// Set on resize; the next redraw wipes the screen first.
    clear_pending: bool,
}

#[tracing::instrument(level = "debug", skip(config), fields(base_url = %config.base_url))]
async fn run(config: &Config) -> vehicle_dashboard::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let (cols, rows) = terminal::size().map_err(terminal_error)?;

    let mut runtime = Runtime {
        app: vehicle_dashboard::initialize(config),
        toasts: ToastQueue::new(),
        transport: HttpTransport::default(),
        toast_duration: config.toast_duration(),
        inbound: tx,
        rows: usize::from(rows),
        cols: usize::from(cols),
        clear_pending: true,
    };

    let _terminal = TerminalGuard::enter()?;
    let mut input = EventStream::new();

    if runtime.dispatch(&Event::Mount) {
        return Ok(());
    }
    runtime.draw()?;

    loop {
        let quit = tokio::select! {
            maybe_input = input.next() => match maybe_input {
                Some(Ok(term_event)) => match runtime.map_terminal_event(&term_event) {
                    Some(event) => runtime.dispatch(&event),
                    None => continue,
                },
                Some(Err(e)) => return Err(terminal_error(e)),
                None => {
                    tracing::debug!("input stream closed");
                    runtime.dispatch(&Event::Quit);
                    true
                }
            },
            Some(message) = rx.recv() => match message {
                Inbound::Response { context, response } => {
                    runtime.dispatch(&Event::Response { context, response })
                }
                Inbound::ToastExpired => {
                    runtime.toasts.expire_oldest();
                    false
                }
            },
        };

        if quit {
            tracing::debug!("quitting");
            return Ok(());
        }
        runtime.draw()?;
    }
}

impl Runtime {
    /// Runs an event through the handler and executes the resulting actions.
    /// Returns `true` when the dashboard should exit.
    fn dispatch(&mut self, event: &Event) -> bool {
        let span = tracing::debug_span!("dispatch", event = event_name(event));
        let _guard = span.entered();

        let mut quit = false;
        match handle_event(&mut self.app, event, &mut self.toasts) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in actions {
                    match action {
                        Action::Send(request) => self.send(request),
                        Action::Quit => quit = true,
                    }
                }
            }
            Err(e) => tracing::debug!(error = %e, "error handling event"),
        }

        self.schedule_toast_timers();
        quit
    }

    fn send(&self, request: ApiRequest) {
        tracing::debug!(
            request_id = request.context.request_id,
            operation = %request.context.operation,
            "sending request"
        );
        let transport = self.transport.clone();
        let inbound = self.inbound.clone();
        tokio::spawn(async move {
            let response = transport.execute(&request).await;
            let _ = inbound.send(Inbound::Response {
                context: request.context,
                response,
            });
        });
    }

    fn schedule_toast_timers(&mut self) {
        for _ in 0..self.toasts.take_unscheduled() {
            let inbound = self.inbound.clone();
            let duration = self.toast_duration;
            tokio::spawn(async move {
                tokio::time::sleep(duration).await;
                let _ = inbound.send(Inbound::ToastExpired);
            });
        }
    }

    fn draw(&mut self) -> vehicle_dashboard::Result<()> {
        let output = vehicle_dashboard::ui::render(
            &self.app,
            self.toasts.visible(MAX_VISIBLE_TOASTS),
            self.rows,
            self.cols,
        );
        let clear = std::mem::take(&mut self.clear_pending);
        write_frame(&mut io::stdout().lock(), &output, clear).map_err(terminal_error)
    }

    fn map_terminal_event(&mut self, event: &TermEvent) -> Option<Event> {
        match event {
            TermEvent::Key(key) if key.kind != KeyEventKind::Release => self.map_key_event(key),
            TermEvent::Resize(cols, rows) => {
                self.cols = usize::from(*cols);
                self.rows = usize::from(*rows);
                self.clear_pending = true;
                Some(Event::Resize)
            }
            _ => None,
        }
    }

    /// Maps keyboard events to dashboard events.
    fn map_key_event(&self, key: &KeyEvent) -> Option<Event> {
        tracing::debug!(code = ?key.code, modifiers = ?key.modifiers, "key event");

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Event::Quit);
        }

        match self.app.input_mode {
            InputMode::Browse => Some(match key.code {
                KeyCode::Down | KeyCode::Char('j') => Event::KeyDown,
                KeyCode::Up | KeyCode::Char('k') => Event::KeyUp,
                KeyCode::Char('a') => Event::SetStatus(VehicleStatus::Active),
                KeyCode::Char('i') => Event::SetStatus(VehicleStatus::Inactive),
                KeyCode::Char('m') => Event::SetStatus(VehicleStatus::Maintenance),
                KeyCode::Char('f') => Event::NextFilter,
                KeyCode::Char('F') => Event::PrevFilter,
                KeyCode::Char('n') | KeyCode::Tab => Event::FocusForm,
                KeyCode::Char('r') => Event::Mount,
                KeyCode::Char('q') => Event::Quit,
                KeyCode::Esc => Event::Escape,
                _ => return None,
            }),
            InputMode::Form => Some(match key.code {
                KeyCode::Esc => Event::Escape,
                KeyCode::Enter => Event::Submit,
                KeyCode::Tab => Event::NextDraftStatus,
                KeyCode::BackTab => Event::PrevDraftStatus,
                KeyCode::Backspace => Event::Backspace,
                KeyCode::Char(c) => Event::Char(c),
                _ => return None,
            }),
        }
    }
}

/// Short event name for spans.
const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Mount => "Mount",
        Event::Unmount => "Unmount",
        Event::Resize => "Resize",
        Event::Quit => "Quit",
        Event::KeyDown => "KeyDown",
        Event::KeyUp => "KeyUp",
        Event::SetStatus(_) => "SetStatus",
        Event::NextFilter => "NextFilter",
        Event::PrevFilter => "PrevFilter",
        Event::FocusForm => "FocusForm",
        Event::Escape => "Escape",
        Event::Char(_) => "Char",
        Event::Backspace => "Backspace",
        Event::NextDraftStatus => "NextDraftStatus",
        Event::PrevDraftStatus => "PrevDraftStatus",
        Event::Submit => "Submit",
        Event::Response { .. } => "Response",
    }
}
