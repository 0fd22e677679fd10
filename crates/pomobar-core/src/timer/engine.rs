//! Timer state machine.
//!
//! The engine is wall-clock based and has no internal threads or
//! timers. The caller invokes `tick()` periodically with the current
//! epoch milliseconds; elapsed time is derived from the clock rather
//! than the callback cadence, so a late or coalesced tick still
//! advances the countdown by the true wall-clock amount.
//!
//! ## State transitions
//!
//! ```text
//! Idle -> Counting -> (Paused | expiry)
//! ```
//!
//! Expiry flips the phase (Work <-> Break) and stops the countdown;
//! the next phase is never auto-started.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Work,
    Break,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Work => "Work",
            Phase::Break => "Break",
        }
    }
}

/// Read-only view of the engine state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub running: bool,
    pub remaining_secs: u64,
    pub completed_work_sessions: u32,
}

/// Core timer state machine.
///
/// `remaining_secs` changes only while running, and only downward; the
/// exception is `start()`, which refills it from settings when it is
/// zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    phase: Phase,
    running: bool,
    remaining_secs: u64,
    completed_work_sessions: u32,
    /// Epoch-ms reference for elapsed-time computation; `Some` only
    /// while running.
    #[serde(default)]
    last_tick_epoch_ms: Option<u64>,
}

impl TimerEngine {
    /// Idle in the Work phase with nothing on the clock.
    pub fn new() -> Self {
        Self {
            phase: Phase::Work,
            running: false,
            remaining_secs: 0,
            completed_work_sessions: 0,
            last_tick_epoch_ms: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn completed_work_sessions(&self) -> u32 {
        self.completed_work_sessions
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            running: self.running,
            remaining_secs: self.remaining_secs,
            completed_work_sessions: self.completed_work_sessions,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start or resume the countdown. No-op while already running.
    ///
    /// With no time left on the clock this begins the next interval,
    /// reading durations from `settings` at this moment, so a live
    /// settings change applies from the next phase start. A break is a
    /// long break when the completed-session count is a positive
    /// multiple of `sessions_before_long_break`, evaluated here rather
    /// than when the preceding work session finished.
    pub fn start(&mut self, settings: &Settings, now_ms: u64) -> Option<Event> {
        if self.running {
            return None;
        }
        if self.remaining_secs == 0 {
            self.remaining_secs = self.next_interval_secs(settings);
        }
        self.running = true;
        self.last_tick_epoch_ms = Some(now_ms);
        Some(Event::TimerStarted {
            phase: self.phase,
            duration_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Stop the countdown, keeping the remaining time (pause
    /// semantics). No-op while not running.
    pub fn stop(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        self.last_tick_epoch_ms = None;
        Some(Event::TimerStopped {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Back to a fresh Work phase with nothing on the clock and the
    /// session count cleared. Always succeeds.
    pub fn reset(&mut self) -> Event {
        self.running = false;
        self.last_tick_epoch_ms = None;
        self.remaining_secs = 0;
        self.phase = Phase::Work;
        self.completed_work_sessions = 0;
        Event::TimerReset { at: Utc::now() }
    }

    /// Advance the countdown by the whole seconds elapsed since the
    /// tick reference. Returns the completion event when the current
    /// interval expires; `None` otherwise, including while stopped.
    pub fn tick(&mut self, now_ms: u64) -> Option<Event> {
        if !self.running {
            return None;
        }
        let last = self.last_tick_epoch_ms?;
        let elapsed_secs = now_ms.saturating_sub(last) / 1000;
        if elapsed_secs == 0 {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(elapsed_secs);
        // Advance by the consumed whole seconds, not to `now_ms`: the
        // sub-second remainder stays in the reference so repeated late
        // ticks cannot make the countdown lag real time.
        self.last_tick_epoch_ms = Some(last + elapsed_secs * 1000);
        if self.remaining_secs == 0 {
            return Some(self.complete_phase());
        }
        None
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn next_interval_secs(&self, settings: &Settings) -> u64 {
        let timer = &settings.timer;
        let minutes = match self.phase {
            Phase::Work => timer.work_minutes,
            Phase::Break => {
                let cadence = timer.sessions_before_long_break.max(1);
                if self.completed_work_sessions > 0 && self.completed_work_sessions % cadence == 0 {
                    timer.long_break_minutes
                } else {
                    timer.break_minutes
                }
            }
        };
        u64::from(minutes).saturating_mul(60)
    }

    fn complete_phase(&mut self) -> Event {
        self.running = false;
        self.last_tick_epoch_ms = None;
        self.remaining_secs = 0;
        match self.phase {
            Phase::Work => {
                self.completed_work_sessions += 1;
                self.phase = Phase::Break;
                Event::WorkCompleted {
                    completed_work_sessions: self.completed_work_sessions,
                    at: Utc::now(),
                }
            }
            Phase::Break => {
                self.phase = Phase::Work;
                Event::BreakCompleted { at: Utc::now() }
            }
        }
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}
