use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// Every state change in the timer produces an `Event`.
/// The host layer turns completions into notifications and re-renders
/// the UI on all of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    TimerStopped {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    /// A work interval ran out; the engine is now idle in the Break
    /// phase, waiting for the next start.
    WorkCompleted {
        completed_work_sessions: u32,
        at: DateTime<Utc>,
    },
    /// A break interval ran out; the engine is now idle in the Work
    /// phase, waiting for the next start.
    BreakCompleted {
        at: DateTime<Utc>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_tagged_on_type() {
        let event = Event::WorkCompleted {
            completed_work_sessions: 3,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "WorkCompleted");
        assert_eq!(json["completed_work_sessions"], 3);
    }
}
