//! Host <-> panel message protocol.
//!
//! JSON messages tagged on `"command"`. The host pushes `update` after
//! every state mutation; the panel sends control commands and
//! dotted-key settings updates back.

use std::collections::BTreeMap;

use pomobar_core::{DisplayModel, Settings, TimerSnapshot};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payload of a host-to-panel `update`.
#[derive(Debug, Clone, Serialize)]
pub struct PanelState {
    pub display: DisplayModel,
    pub timer: TimerSnapshot,
    pub settings: Settings,
}

/// Host-to-panel messages.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum PanelOutbound {
    Update { state: PanelState },
}

/// Panel-to-host messages.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum PanelInbound {
    Start,
    Stop,
    Reset,
    UpdateSettings {
        /// Dotted keys, e.g. `timer.work_minutes`, passed through to
        /// the settings store.
        settings: BTreeMap<String, Value>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pomobar_core::{render, Phase};
    use serde_json::json;

    fn sample_state() -> PanelState {
        let settings = Settings::default();
        let timer = TimerSnapshot {
            phase: Phase::Work,
            running: true,
            remaining_secs: 1499,
            completed_work_sessions: 2,
        };
        PanelState {
            display: render(&timer, &settings),
            timer,
            settings,
        }
    }

    #[test]
    fn update_is_tagged_with_the_command_name() {
        let json = serde_json::to_value(PanelOutbound::Update {
            state: sample_state(),
        })
        .unwrap();
        assert_eq!(json["command"], "update");
        assert_eq!(json["state"]["timer"]["remaining_secs"], 1499);
        assert_eq!(json["state"]["display"]["running"], true);
        assert_eq!(json["state"]["settings"]["timer"]["work_minutes"], 25);
    }

    #[test]
    fn control_commands_parse() {
        let start: PanelInbound = serde_json::from_value(json!({"command": "start"})).unwrap();
        assert!(matches!(start, PanelInbound::Start));
        let stop: PanelInbound = serde_json::from_value(json!({"command": "stop"})).unwrap();
        assert!(matches!(stop, PanelInbound::Stop));
        let reset: PanelInbound = serde_json::from_value(json!({"command": "reset"})).unwrap();
        assert!(matches!(reset, PanelInbound::Reset));
    }

    #[test]
    fn update_settings_carries_dotted_keys() {
        let message: PanelInbound = serde_json::from_value(json!({
            "command": "updateSettings",
            "settings": {"timer.work_minutes": 30, "notifications.sound": false},
        }))
        .unwrap();
        match message {
            PanelInbound::UpdateSettings { settings } => {
                assert_eq!(settings["timer.work_minutes"], json!(30));
                assert_eq!(settings["notifications.sound"], json!(false));
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn unknown_command_is_rejected() {
        let result = serde_json::from_value::<PanelInbound>(json!({"command": "selfDestruct"}));
        assert!(result.is_err());
    }
}
