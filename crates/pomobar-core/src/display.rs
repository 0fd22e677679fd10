//! Presentation adapter: timer state in, display strings out.
//!
//! Pure functions of the snapshot and settings; called after every
//! state mutation. The host decides where the strings end up (status
//! bar item, tray title, panel header).

use serde::Serialize;

use crate::config::Settings;
use crate::timer::{Phase, TimerSnapshot};

/// What the host widgets show. `compact_label` goes to the status
/// indicator, `tooltip` to its hover text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayModel {
    pub compact_label: String,
    pub tooltip: String,
    pub running: bool,
}

fn phase_icon(phase: Phase) -> &'static str {
    match phase {
        Phase::Work => "🍅",
        Phase::Break => "☕",
    }
}

/// `MM:SS`, both halves zero-padded; minutes widen past two digits for
/// long intervals.
fn format_clock(remaining_secs: u64) -> String {
    format!("{:02}:{:02}", remaining_secs / 60, remaining_secs % 60)
}

/// Render the current state into the display model.
pub fn render(snapshot: &TimerSnapshot, settings: &Settings) -> DisplayModel {
    let indicator = if snapshot.running { "▶" } else { "⏸" };
    let compact_label = format!(
        "{} {} {} {}",
        phase_icon(snapshot.phase),
        snapshot.phase.label(),
        format_clock(snapshot.remaining_secs),
        indicator,
    );

    let state = if snapshot.running {
        "counting down"
    } else if snapshot.remaining_secs > 0 {
        "paused"
    } else {
        "idle"
    };
    let tooltip = format!(
        "{}: {} remaining ({}) · {} work sessions completed · long break every {}",
        snapshot.phase.label(),
        format_clock(snapshot.remaining_secs),
        state,
        snapshot.completed_work_sessions,
        settings.timer.sessions_before_long_break,
    );

    DisplayModel {
        compact_label,
        tooltip,
        running: snapshot.running,
    }
}
