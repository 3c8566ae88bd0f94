//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::auditor::spawn_analysis;
use crate::backend::AnalysisBackend;
use crate::environment::Environment;
use crate::ui::dashboard::{DashboardState, render_dashboard};
use crate::ui::splash::render_splash;
use crate::updates::WidgetUpdate;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use ratatui::{Frame, Terminal, backend::Backend};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, mpsc};

/// The different screens in the application.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Splash screen shown at the start of the application.
    Splash,
    /// Dashboard screen displaying the live widgets.
    Dashboard,
}

/// Application state
pub struct App {
    /// The current screen being displayed in the application.
    current_screen: Screen,

    /// Dashboard state; receives widget updates from the very first poll,
    /// even while the splash screen is still up.
    dashboard: Box<DashboardState>,

    /// Receives updates from poller and auditor tasks.
    update_receiver: mpsc::Receiver<WidgetUpdate>,

    /// Cloned into each spawned analysis request.
    update_sender: mpsc::Sender<WidgetUpdate>,

    /// Broadcasts shutdown signal to poller tasks.
    shutdown_sender: broadcast::Sender<()>,

    /// Backend used for on-demand code analysis requests.
    backend: Arc<dyn AnalysisBackend>,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(
        backend: Arc<dyn AnalysisBackend>,
        update_receiver: mpsc::Receiver<WidgetUpdate>,
        update_sender: mpsc::Sender<WidgetUpdate>,
        shutdown_sender: broadcast::Sender<()>,
        with_background_color: bool,
    ) -> Self {
        let environment: Environment = backend.environment().clone();
        Self {
            current_screen: Screen::Splash,
            dashboard: Box::new(DashboardState::new(
                environment,
                Instant::now(),
                with_background_color,
            )),
            update_receiver,
            update_sender,
            shutdown_sender,
            backend,
        }
    }

    /// Arm a code analysis request if the auditor allows it right now.
    fn trigger_analysis(&mut self) {
        if let Some((generation, code)) = self.dashboard.auditor.begin_analysis() {
            let _ = spawn_analysis(
                self.backend.clone(),
                code,
                generation,
                self.update_sender.clone(),
            );
        }
    }
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let splash_start = Instant::now();
    let splash_duration = Duration::from_secs(2);

    // UI event loop
    loop {
        // Queue all incoming updates; they are applied once per frame.
        while let Ok(update) = app.update_receiver.try_recv() {
            app.dashboard.queue_update(update);
        }
        app.dashboard.update();

        terminal.draw(|f| render(f, app.current_screen, &app.dashboard))?;

        // Handle splash-to-dashboard transition
        if app.current_screen == Screen::Splash && splash_start.elapsed() >= splash_duration {
            app.current_screen = Screen::Dashboard;
            continue;
        }

        // Poll for key events
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Skip events that are not KeyEventKind::Press
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }

                match app.current_screen {
                    Screen::Splash => {
                        // Esc and q quit from the splash; anything else skips it.
                        if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                            let _ = app.shutdown_sender.send(());
                            return Ok(());
                        }
                        app.current_screen = Screen::Dashboard;
                    }
                    Screen::Dashboard if app.dashboard.input_focused => {
                        let control = key.modifiers.contains(KeyModifiers::CONTROL);
                        match key.code {
                            KeyCode::Esc | KeyCode::Tab => {
                                app.dashboard.input_focused = false;
                            }
                            KeyCode::Char('r') if control => app.trigger_analysis(),
                            KeyCode::Char('u') if control => {
                                app.dashboard.auditor.clear_input();
                            }
                            KeyCode::Char(c) => app.dashboard.auditor.push_char(c),
                            KeyCode::Enter => app.dashboard.auditor.push_char('\n'),
                            KeyCode::Backspace => app.dashboard.auditor.pop_char(),
                            _ => {}
                        }
                    }
                    Screen::Dashboard => {
                        let control = key.modifiers.contains(KeyModifiers::CONTROL);
                        match key.code {
                            KeyCode::Esc | KeyCode::Char('q') => {
                                // Stop the pollers; any response still in
                                // flight dies with the update channel.
                                let _ = app.shutdown_sender.send(());
                                return Ok(());
                            }
                            KeyCode::Tab => app.dashboard.input_focused = true,
                            KeyCode::Char('r') if control => app.trigger_analysis(),
                            _ => {}
                        }
                    }
                }
            }
        }
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, screen: Screen, dashboard: &DashboardState) {
    match screen {
        Screen::Splash => render_splash(f),
        Screen::Dashboard => render_dashboard(f, dashboard),
    }
}
