//! The top-level session object.
//!
//! A `Session` is explicitly constructed and explicitly owned by the
//! embedding host; there are no ambient globals. It holds the timer
//! engine, the host surface handles, and the one periodic-driver
//! handle, and it releases all of them on teardown.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use pomobar_core::{now_ms, render, DisplayModel, Event, TimerEngine};
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::driver;
use crate::notify::Notifier;
use crate::panel::{PanelInbound, PanelOutbound, PanelState};
use crate::settings::SettingsStore;

/// Status indicator widget owned by the host (status bar item, tray
/// title). Receives a fresh display model after every state mutation.
pub trait StatusIndicator: Send + Sync {
    fn update(&self, model: &DisplayModel);
}

/// Detail panel owned by the host; receives host-to-panel protocol
/// messages as JSON.
pub trait PanelSink: Send + Sync {
    fn post(&self, message: Value);
}

/// The named commands a host binds (command palette entries,
/// status-bar click).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start if idle or paused, stop if running.
    Toggle,
    Start,
    Stop,
    Reset,
    ShowPanel,
}

impl Command {
    pub const ALL: [Command; 5] = [
        Command::Toggle,
        Command::Start,
        Command::Stop,
        Command::Reset,
        Command::ShowPanel,
    ];

    /// Host-facing identifier for registration.
    pub fn id(self) -> &'static str {
        match self {
            Command::Toggle => "pomobar.toggle",
            Command::Start => "pomobar.start",
            Command::Stop => "pomobar.stop",
            Command::Reset => "pomobar.reset",
            Command::ShowPanel => "pomobar.showPanel",
        }
    }
}

/// State shared between the session and its driver task.
pub(crate) struct Inner {
    engine: Mutex<TimerEngine>,
    settings: Arc<dyn SettingsStore>,
    notifier: Arc<dyn Notifier>,
    status: Arc<dyn StatusIndicator>,
    panel: Mutex<Option<Arc<dyn PanelSink>>>,
}

impl Inner {
    /// Push the current state to the status indicator and, when
    /// attached, the panel.
    fn rerender(&self) {
        let Ok(engine) = self.engine.lock() else {
            return;
        };
        let snapshot = engine.snapshot();
        drop(engine);

        let settings = self.settings.snapshot();
        let display = render(&snapshot, &settings);
        self.status.update(&display);

        let Ok(panel) = self.panel.lock() else {
            return;
        };
        if let Some(panel) = panel.as_ref() {
            let update = PanelOutbound::Update {
                state: PanelState {
                    display,
                    timer: snapshot,
                    settings,
                },
            };
            match serde_json::to_value(&update) {
                Ok(message) => panel.post(message),
                Err(error) => warn!(%error, "failed to encode panel update"),
            }
        }
    }

    /// One driver step. Returns `false` once the countdown is no
    /// longer running and the driver should exit.
    pub(crate) fn advance(&self, now_ms: u64) -> bool {
        let (changed, completion, still_running) = {
            let Ok(mut engine) = self.engine.lock() else {
                return false;
            };
            let before = engine.remaining_secs();
            let completion = engine.tick(now_ms);
            (
                engine.remaining_secs() != before,
                completion,
                engine.is_running(),
            )
        };
        if let Some(event) = &completion {
            self.announce(event);
        }
        if changed || completion.is_some() {
            self.rerender();
        }
        still_running
    }

    /// Session-end cues. Notification or sound failures are handled
    /// inside the notifier; the timer state has already moved on.
    fn announce(&self, event: &Event) {
        let message = match event {
            Event::WorkCompleted {
                completed_work_sessions,
                ..
            } => format!(
                "Work session {completed_work_sessions} complete! Time for a break."
            ),
            Event::BreakCompleted { .. } => {
                "Break is over! Ready for the next work session.".to_string()
            }
            _ => return,
        };
        self.notifier.notify(&message);
        self.notifier.chime();
    }
}

/// An activated timer instance: engine, host surfaces, and the
/// periodic-driver handle.
pub struct Session {
    inner: Arc<Inner>,
    driver: Mutex<Option<JoinHandle<()>>>,
}

impl Session {
    /// Build a session and render its initial (idle) state.
    pub fn new(
        settings: Arc<dyn SettingsStore>,
        notifier: Arc<dyn Notifier>,
        status: Arc<dyn StatusIndicator>,
    ) -> Self {
        let session = Self {
            inner: Arc::new(Inner {
                engine: Mutex::new(TimerEngine::new()),
                settings,
                notifier,
                status,
                panel: Mutex::new(None),
            }),
            driver: Mutex::new(None),
        };
        session.inner.rerender();
        session
    }

    /// Attach the detail panel and push it the current state.
    pub fn attach_panel(&self, panel: Arc<dyn PanelSink>) {
        if let Ok(mut slot) = self.inner.panel.lock() {
            *slot = Some(panel);
        }
        self.inner.rerender();
    }

    /// Dispatch a named host command.
    pub fn dispatch(&self, command: Command) {
        debug!(command = command.id(), "dispatching command");
        match command {
            Command::Toggle => self.toggle(),
            Command::Start => self.start(),
            Command::Stop => self.stop(),
            Command::Reset => self.reset(),
            Command::ShowPanel => self.show_panel(),
        }
    }

    /// Start (or resume) the countdown and ensure the periodic driver
    /// is running. No-op while already counting.
    pub fn start(&self) {
        let started = {
            let Ok(mut engine) = self.inner.engine.lock() else {
                return;
            };
            let settings = self.inner.settings.snapshot();
            engine.start(&settings, now_ms())
        };
        let Some(event) = started else {
            debug!("start ignored, timer already running");
            return;
        };
        debug!(?event, "timer started");
        self.spawn_driver();
        self.inner.rerender();
    }

    /// Pause the countdown, cancelling the periodic driver. No-op while
    /// not running.
    pub fn stop(&self) {
        self.cancel_driver();
        let stopped = {
            let Ok(mut engine) = self.inner.engine.lock() else {
                return;
            };
            engine.stop()
        };
        if let Some(event) = stopped {
            debug!(?event, "timer stopped");
            self.inner.rerender();
        }
    }

    /// Stop and clear everything back to a fresh Work phase.
    pub fn reset(&self) {
        self.cancel_driver();
        {
            let Ok(mut engine) = self.inner.engine.lock() else {
                return;
            };
            engine.reset();
        }
        debug!("timer reset");
        self.inner.rerender();
    }

    /// Start if idle or paused, stop if running.
    pub fn toggle(&self) {
        let running = self
            .inner
            .engine
            .lock()
            .map(|engine| engine.is_running())
            .unwrap_or(false);
        if running {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Refresh the panel content. The host owns making the panel
    /// visible; this pushes it the state to show.
    pub fn show_panel(&self) {
        self.inner.rerender();
    }

    /// Entry point for panel-to-host messages.
    pub fn handle_panel_message(&self, message: Value) {
        let inbound = match serde_json::from_value::<PanelInbound>(message) {
            Ok(inbound) => inbound,
            Err(error) => {
                warn!(%error, "discarding malformed panel message");
                return;
            }
        };
        match inbound {
            PanelInbound::Start => self.start(),
            PanelInbound::Stop => self.stop(),
            PanelInbound::Reset => self.reset(),
            PanelInbound::UpdateSettings { settings } => self.update_settings(settings),
        }
    }

    /// Release the driver so no callback runs after teardown.
    pub fn shutdown(&self) {
        self.cancel_driver();
    }

    fn update_settings(&self, changes: BTreeMap<String, Value>) {
        if let Err(error) = self.inner.settings.apply(&changes) {
            warn!(%error, "settings update not persisted");
        }
        // Changed durations apply at the next phase start; the panel
        // still sees the new values immediately.
        self.inner.rerender();
    }

    fn spawn_driver(&self) {
        let Ok(mut slot) = self.driver.lock() else {
            return;
        };
        if let Some(handle) = slot.take() {
            // A driver that exited at expiry can linger here; a live
            // one must not be duplicated.
            if !handle.is_finished() {
                *slot = Some(handle);
                return;
            }
        }
        *slot = Some(driver::spawn(Arc::clone(&self.inner)));
    }

    fn cancel_driver(&self) {
        let Ok(mut slot) = self.driver.lock() else {
            return;
        };
        if let Some(handle) = slot.take() {
            handle.abort();
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.cancel_driver();
    }
}
