//! End-to-end countdown scenarios against the public engine API.
//!
//! Time is simulated: every call passes an explicit epoch-ms value, so
//! a full work/break cycle runs in microseconds.

use pomobar_core::{Event, Phase, Settings, TimerEngine, TimerSettings};

fn classic_settings() -> Settings {
    Settings {
        timer: TimerSettings {
            work_minutes: 25,
            break_minutes: 5,
            long_break_minutes: 15,
            sessions_before_long_break: 4,
        },
        ..Settings::default()
    }
}

/// Run one full interval: start, then a single tick past its end.
fn run_interval(engine: &mut TimerEngine, settings: &Settings, now: &mut u64) -> Option<Event> {
    let started = engine.start(settings, *now).expect("interval should start");
    let duration_secs = match started {
        Event::TimerStarted { duration_secs, .. } => duration_secs,
        other => panic!("unexpected start event: {other:?}"),
    };
    *now += duration_secs * 1000;
    engine.tick(*now)
}

#[test]
fn work_then_short_break_cycle() {
    let settings = classic_settings();
    let mut engine = TimerEngine::new();
    let mut now = 0;

    engine.start(&settings, now);
    assert_eq!(engine.remaining_secs(), 1500);

    now += 1_500_000;
    let completed = engine.tick(now);
    assert!(matches!(
        completed,
        Some(Event::WorkCompleted {
            completed_work_sessions: 1,
            ..
        })
    ));
    assert_eq!(engine.phase(), Phase::Break);
    assert_eq!(engine.remaining_secs(), 0);
    assert!(!engine.is_running());

    // 1 % 4 != 0, so this is the short break.
    engine.start(&settings, now);
    assert_eq!(engine.remaining_secs(), 300);
}

#[test]
fn long_break_after_four_sessions() {
    let settings = classic_settings();
    let mut engine = TimerEngine::new();
    let mut now = 0;

    for _ in 0..3 {
        assert!(matches!(
            run_interval(&mut engine, &settings, &mut now),
            Some(Event::WorkCompleted { .. })
        ));
        let started = engine.start(&settings, now).unwrap();
        assert!(matches!(
            started,
            Event::TimerStarted {
                duration_secs: 300,
                ..
            }
        ));
        now += 300_000;
        engine.tick(now);
    }

    assert!(matches!(
        run_interval(&mut engine, &settings, &mut now),
        Some(Event::WorkCompleted {
            completed_work_sessions: 4,
            ..
        })
    ));
    let started = engine.start(&settings, now).unwrap();
    assert!(matches!(
        started,
        Event::TimerStarted {
            phase: Phase::Break,
            duration_secs: 900,
            ..
        }
    ));
}

#[test]
fn cadence_keeps_cycling_past_the_first_long_break() {
    let settings = classic_settings();
    let mut engine = TimerEngine::new();
    let mut now = 0;

    // Eight work sessions with their breaks: long breaks at 4 and 8.
    let mut long_breaks = 0;
    for _ in 0..8 {
        run_interval(&mut engine, &settings, &mut now);
        let started = engine.start(&settings, now).unwrap();
        if let Event::TimerStarted { duration_secs, .. } = started {
            if duration_secs == 900 {
                long_breaks += 1;
            }
        }
        let remaining = engine.remaining_secs();
        now += remaining * 1000;
        engine.tick(now);
    }
    assert_eq!(long_breaks, 2);
    assert_eq!(engine.completed_work_sessions(), 8);
}

#[test]
fn jittery_callbacks_do_not_slow_the_countdown() {
    let settings = classic_settings();
    let mut engine = TimerEngine::new();
    engine.start(&settings, 0);

    // Ticks arrive at awkward offsets: 333 ms cadence for 30 s of wall
    // time. The countdown must have consumed exactly 30 whole seconds.
    let mut now = 0;
    while now < 30_000 {
        now += 333;
        engine.tick(now);
    }
    // now = 30_303; 30 whole seconds elapsed.
    assert_eq!(engine.remaining_secs(), 1500 - 30);
}

#[test]
fn pause_resume_preserves_the_clock_across_idle_time() {
    let settings = classic_settings();
    let mut engine = TimerEngine::new();
    engine.start(&settings, 0);
    engine.tick(600_000);
    assert_eq!(engine.remaining_secs(), 900);

    engine.stop();
    // A long pause: nothing elapses while stopped.
    engine.start(&settings, 2_000_000);
    engine.tick(2_001_000);
    assert_eq!(engine.remaining_secs(), 899);
}

#[test]
fn reset_mid_break_returns_to_a_fresh_work_phase() {
    let settings = classic_settings();
    let mut engine = TimerEngine::new();
    let mut now = 0;

    run_interval(&mut engine, &settings, &mut now);
    engine.start(&settings, now);
    now += 10_000;
    engine.tick(now);
    assert_eq!(engine.phase(), Phase::Break);

    engine.reset();
    assert_eq!(engine.phase(), Phase::Work);
    assert_eq!(engine.remaining_secs(), 0);
    assert_eq!(engine.completed_work_sessions(), 0);
    assert!(!engine.is_running());

    // The next start is a plain work interval again.
    engine.start(&settings, now);
    assert_eq!(engine.remaining_secs(), 1500);
}
