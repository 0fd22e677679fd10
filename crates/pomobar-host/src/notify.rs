//! End-of-interval notifications.
//!
//! Both cues are best-effort: a machine with no notification daemon or
//! no audio command stays silent, and the timer never notices.

use std::sync::Arc;

use notify_rust::Notification;
use tracing::warn;

use crate::settings::SettingsStore;

/// Session-end cues. `notify` is gated on `notifications.enabled`,
/// `chime` on `notifications.sound`; neither propagates failures into
/// the timer path.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
    fn chime(&self);
}

/// Desktop notification plus a platform sound.
pub struct DesktopNotifier {
    settings: Arc<dyn SettingsStore>,
}

impl DesktopNotifier {
    pub fn new(settings: Arc<dyn SettingsStore>) -> Self {
        Self { settings }
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, message: &str) {
        if !self.settings.snapshot().notifications.enabled {
            return;
        }
        let result = Notification::new()
            .summary("Pomobar")
            .body(message)
            .show();
        if let Err(error) = result {
            warn!(%error, "failed to show desktop notification");
        }
    }

    fn chime(&self) {
        if !self.settings.snapshot().notifications.sound {
            return;
        }
        play_system_sound();
    }
}

/// Fire-and-forget platform sound.
fn play_system_sound() {
    #[cfg(target_os = "macos")]
    spawn_silent("afplay", &["/System/Library/Sounds/Glass.aiff"]);

    #[cfg(target_os = "linux")]
    {
        let played = spawn_silent(
            "paplay",
            &["/usr/share/sounds/freedesktop/stereo/complete.oga"],
        );
        if !played {
            spawn_silent("canberra-gtk-play", &["-i", "complete"]);
        }
    }

    #[cfg(target_os = "windows")]
    spawn_silent(
        "powershell",
        &["-NoProfile", "-Command", "[console]::beep(880, 300)"],
    );
}

#[cfg(any(target_os = "macos", target_os = "linux", target_os = "windows"))]
fn spawn_silent(program: &str, args: &[&str]) -> bool {
    match std::process::Command::new(program)
        .args(args)
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn()
    {
        Ok(_) => true,
        Err(error) => {
            warn!(%error, program, "audible cue unavailable");
            false
        }
    }
}
