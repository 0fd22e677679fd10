//! # Pomobar Core Library
//!
//! Core logic for the Pomobar interval timer: a wall-clock-based state
//! machine plus the pure presentation and settings plumbing around it.
//! The host-facing layer (`pomobar-host`) wires this into status
//! widgets, a detail panel, and desktop notifications.
//!
//! ## Key components
//!
//! - [`TimerEngine`]: the state machine; the caller invokes
//!   `tick(now_ms)` periodically, and elapsed time is derived from the
//!   wall clock so callback jitter never slows the countdown
//! - [`render`]: pure snapshot-to-display-model function
//! - [`Settings`]: TOML-backed configuration with dotted-key access
//! - [`Event`]: serde-tagged state-change events

pub mod config;
pub mod display;
pub mod error;
pub mod events;
pub mod timer;

pub use config::{NotificationSettings, Settings, TimerSettings};
pub use display::{render, DisplayModel};
pub use error::ConfigError;
pub use events::Event;
pub use timer::{now_ms, Phase, TimerEngine, TimerSnapshot};
