//! # Pomobar Host Adapter
//!
//! Wires [`pomobar_core`] into an embedding host: a [`Session`] owns
//! the timer engine, the periodic tick driver, and handles to the
//! host-provided surfaces (status indicator, detail panel, settings
//! store, notifier), all modeled as traits so the core runs the same
//! under a real host and under test.
//!
//! A host activates by constructing a [`Session`], registering its
//! [`Command`]s, and routing panel messages to
//! [`Session::handle_panel_message`]; it deactivates by dropping the
//! session (or calling [`Session::shutdown`]), which cancels any
//! outstanding driver.

pub mod driver;
pub mod notify;
pub mod panel;
pub mod session;
pub mod settings;

pub use notify::{DesktopNotifier, Notifier};
pub use panel::{PanelInbound, PanelOutbound, PanelState};
pub use session::{Command, PanelSink, Session, StatusIndicator};
pub use settings::{FileSettings, SettingsStore};
