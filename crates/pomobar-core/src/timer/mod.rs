mod engine;

pub use engine::{Phase, TimerEngine, TimerSnapshot};

/// Current wall-clock time in milliseconds since the Unix epoch.
///
/// The engine never reads the clock itself; drivers pass this in so
/// tests can substitute simulated time.
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
