//! State-machine properties of the interval timer, driven by a manual clock

use std::{sync::Arc, time::Duration};
use tokio::sync::broadcast;

use fitmate::{
    clock::ManualClock,
    state::{SessionKind, SessionLog, SessionSummary, TimerStatus},
    timer::{IntervalTimer, TimerEvent, TimerSettings, COMPLETION_MESSAGE},
    TimerError,
};

fn setup() -> (IntervalTimer, Arc<ManualClock>, SessionLog) {
    let clock = Arc::new(ManualClock::new());
    let log = SessionLog::new();
    let timer = IntervalTimer::new(clock.clone(), log.clone(), TimerSettings::default());
    (timer, clock, log)
}

fn drain(rx: &mut broadcast::Receiver<TimerEvent>) -> Vec<TimerEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[test]
fn remaining_drops_by_exactly_one_per_tick() {
    let (timer, clock, _log) = setup();
    timer.start(0.25).expect("start");

    let mut previous = timer.snapshot().remaining_seconds;
    assert_eq!(previous, 15);
    for _ in 0..14 {
        clock.advance(1);
        let state = timer.snapshot();
        assert_eq!(state.status, TimerStatus::Running);
        assert_eq!(state.remaining_seconds, previous - 1);
        previous = state.remaining_seconds;
    }

    clock.advance(1);
    assert_eq!(timer.snapshot().remaining_seconds, 0);
    assert_eq!(timer.snapshot().status, TimerStatus::Completed);

    // Nothing is left ticking, so further time changes nothing.
    clock.advance(5);
    assert_eq!(timer.snapshot().remaining_seconds, 0);
}

#[test]
fn double_start_keeps_a_single_tick_source() {
    let (timer, clock, log) = setup();
    timer.start(1.0).expect("first start");
    timer.start(1.0).expect("second start");

    assert_eq!(clock.active_sources(), 1);
    assert_eq!(clock.scheduled_total(), 2);

    clock.advance(1);
    assert_eq!(timer.snapshot().remaining_seconds, 59);
    clock.advance(4);
    assert_eq!(timer.snapshot().remaining_seconds, 55);

    // Restarting a running timer is not an interruption.
    assert!(log.is_empty());
}

#[test]
fn log_only_grows_with_pauses_and_completions() {
    let (timer, clock, log) = setup();
    let mut last_len = 0;
    let mut check = |expected: usize| {
        let len = log.all().len();
        assert!(len >= last_len, "log shrank from {} to {}", last_len, len);
        assert_eq!(len, expected);
        last_len = len;
    };

    timer.start(0.5).expect("start");
    clock.advance(5);
    check(0);
    timer.pause().expect("pause");
    check(1);
    timer.pause().expect("second pause is a no-op");
    check(1);
    timer.reset().expect("reset");
    check(1);
    timer.start(0.05).expect("start");
    clock.advance(3);
    check(2);
    let _ = timer.start(0.0);
    check(2);
    timer.start(0.5).expect("start");
    clock.advance(2);
    timer.pause().expect("pause");
    check(3);
}

#[test]
fn three_ticks_complete_a_three_second_run() {
    let (timer, clock, log) = setup();
    let mut events = timer.subscribe();
    timer.start(0.05).expect("start");
    clock.advance(3);

    let state = timer.snapshot();
    assert_eq!(state.status, TimerStatus::Completed);
    assert_eq!(state.remaining_seconds, 0);

    let records = log.all();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status(), "completed");
    assert_eq!(records[0].duration_seconds(), 3);

    let names: Vec<&str> = drain(&mut events).iter().map(|e| e.name()).collect();
    assert_eq!(names, vec!["started", "tick", "tick", "completed", "announce"]);
}

#[test]
fn completion_emits_elapsed_and_announcement() {
    let (timer, clock, _log) = setup();
    let mut events = timer.subscribe();
    timer.start(0.05).expect("start");
    clock.advance(3);

    let events = drain(&mut events);
    match &events[3] {
        TimerEvent::Completed {
            elapsed_seconds,
            record,
            state,
        } => {
            assert_eq!(*elapsed_seconds, 3);
            assert_eq!(record.kind(), SessionKind::Completed);
            assert_eq!(state.status, TimerStatus::Completed);
        }
        other => panic!("expected completion, got {:?}", other),
    }
    match &events[4] {
        TimerEvent::Announce { message, .. } => assert_eq!(message, COMPLETION_MESSAGE),
        other => panic!("expected announcement, got {:?}", other),
    }
}

#[test]
fn critical_flag_covers_last_ten_seconds() {
    let (timer, clock, _log) = setup();
    let mut events = timer.subscribe();
    timer.start(0.25).expect("start");
    clock.advance(15);

    let flags: Vec<(u64, bool)> = drain(&mut events)
        .into_iter()
        .filter_map(|e| match e {
            TimerEvent::Tick { state, critical } => Some((state.remaining_seconds, critical)),
            _ => None,
        })
        .collect();

    assert_eq!(flags.len(), 14);
    assert_eq!(flags[0], (14, false));
    assert_eq!(flags[3], (11, false));
    assert_eq!(flags[4], (10, true));
    assert_eq!(flags[13], (1, true));
}

#[test]
fn resume_with_same_duration_keeps_remaining_time() {
    let (timer, clock, log) = setup();
    let mut events = timer.subscribe();
    timer.start(1.0).expect("start");
    clock.advance(10);
    timer.pause().expect("pause");

    let resumed = timer.start(1.0).expect("resume");
    assert_eq!(resumed.status, TimerStatus::Running);
    assert_eq!(resumed.remaining_seconds, 50);
    assert_eq!(resumed.full_duration_seconds, 60);
    assert_eq!(log.len(), 1);

    let started: Vec<bool> = drain(&mut events)
        .into_iter()
        .filter_map(|e| match e {
            TimerEvent::Started { resumed, .. } => Some(resumed),
            _ => None,
        })
        .collect();
    assert_eq!(started, vec![false, true]);
}

#[test]
fn changed_duration_after_pause_is_a_fresh_start() {
    let (timer, clock, log) = setup();
    timer.start(1.0).expect("start");
    clock.advance(10);
    timer.pause().expect("pause");

    let records = log.all();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kind(), SessionKind::Paused);
    assert_eq!(records[0].duration_seconds(), 10);

    let fresh = timer.start(1.5).expect("fresh start");
    assert_eq!(fresh.remaining_seconds, 90);
    assert_eq!(fresh.full_duration_seconds, 90);
    assert_eq!(log.len(), 1);
}

#[test]
fn paused_duration_accumulates_across_segments() {
    let (timer, clock, log) = setup();
    timer.start(1.0).expect("start");
    clock.advance(10);
    timer.pause().expect("pause");
    timer.start(1.0).expect("resume");
    clock.advance(5);
    timer.pause().expect("pause again");

    let durations: Vec<u64> = log.all().iter().map(|r| r.duration_seconds()).collect();
    assert_eq!(durations, vec![10, 15]);
}

#[test]
fn resume_is_not_offered_after_reset_or_completion() {
    let (timer, clock, _log) = setup();
    timer.start(0.5).expect("start");
    clock.advance(5);
    timer.pause().expect("pause");
    timer.reset().expect("reset");
    assert_eq!(timer.start(0.5).expect("start").remaining_seconds, 30);

    clock.advance(30);
    assert_eq!(timer.snapshot().status, TimerStatus::Completed);
    assert_eq!(timer.start(0.5).expect("restart").remaining_seconds, 30);
}

#[test]
fn invalid_durations_change_nothing() {
    let (timer, clock, log) = setup();
    let mut events = timer.subscribe();

    let check_rejections = |expected: TimerStatus, events: &mut broadcast::Receiver<TimerEvent>| {
        for bad in [0.0, -5.0, f64::NAN] {
            let before = log.len();
            let result = timer.start(bad);
            assert!(
                matches!(result, Err(TimerError::InvalidDuration { .. })),
                "{} accepted",
                bad
            );
            assert_eq!(timer.snapshot().status, expected);
            assert_eq!(log.len(), before);

            let emitted = drain(events);
            assert_eq!(emitted.len(), 1);
            assert_eq!(emitted[0].name(), "invalid_input");
        }
    };

    check_rejections(TimerStatus::Idle, &mut events);

    timer.start(1.0).expect("start");
    drain(&mut events);
    check_rejections(TimerStatus::Running, &mut events);

    // A rejected start must not disturb the live tick source.
    clock.advance(1);
    assert_eq!(timer.snapshot().remaining_seconds, 59);

    timer.pause().expect("pause");
    drain(&mut events);
    check_rejections(TimerStatus::Paused, &mut events);
    assert_eq!(timer.snapshot().remaining_seconds, 59);
}

#[test]
fn one_second_run_completes_on_first_tick() {
    let (timer, clock, log) = setup();
    timer.start(1.0 / 60.0).expect("start");
    assert_eq!(timer.snapshot().remaining_seconds, 1);

    clock.advance(1);
    assert_eq!(timer.snapshot().status, TimerStatus::Completed);

    let records = log.all();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status(), "completed");
    assert_eq!(records[0].duration_seconds(), 1);
}

#[test]
fn completion_reports_clock_time_not_tick_count() {
    let (timer, clock, log) = setup();
    timer.start(0.05).expect("start");
    clock.advance(2);
    clock.skew(Duration::from_secs(2));
    clock.advance(1);

    assert_eq!(timer.snapshot().status, TimerStatus::Completed);
    assert_eq!(log.all()[0].duration_seconds(), 5);
}

#[test]
fn reset_returns_to_default_and_stops_ticking() {
    let (timer, clock, log) = setup();
    let mut events = timer.subscribe();
    timer.start(2.0).expect("start");
    clock.advance(7);
    let state = timer.reset().expect("reset");

    assert_eq!(state.status, TimerStatus::Idle);
    assert_eq!(state.remaining_seconds, 30);
    assert_eq!(state.full_duration_seconds, 30);
    assert_eq!(clock.active_sources(), 0);
    assert!(log.is_empty());

    clock.advance(3);
    assert_eq!(timer.snapshot().remaining_seconds, 30);
    assert_eq!(drain(&mut events).last().map(|e| e.name()), Some("reset"));
}

#[test]
fn summary_tracks_the_latest_record() {
    let (timer, clock, log) = setup();
    assert_eq!(log.summary(), SessionSummary::Empty);

    timer.start(0.5).expect("start");
    clock.advance(4);
    timer.pause().expect("pause");
    timer.start(0.05).expect("start");
    let second_start = timer.snapshot().started_at.expect("started");
    clock.advance(3);

    match log.summary() {
        SessionSummary::Recorded {
            count,
            last_started_at,
            completed,
            paused,
            total_active_seconds,
        } => {
            assert_eq!(count, 2);
            assert_eq!(last_started_at, second_start);
            assert_eq!(completed, 1);
            assert_eq!(paused, 1);
            assert_eq!(total_active_seconds, 7);
        }
        SessionSummary::Empty => panic!("log should not be empty"),
    }
}

#[test]
fn logged_records_serialize_status_and_label() {
    let (timer, clock, log) = setup();
    timer.start(1.0).expect("start");
    clock.advance(10);
    timer.pause().expect("pause");
    timer.start(1.0).expect("resume");
    clock.advance(50);

    let json = serde_json::to_value(log.all()).expect("serialize");
    assert_eq!(json[0]["status"], "paused");
    assert_eq!(json[0]["label"], "Interval (Paused)");
    assert_eq!(json[0]["durationSeconds"], 10);
    assert_eq!(json[1]["status"], "completed");
    assert_eq!(json[1]["label"], "Interval (Complete)");
    assert_eq!(json[1]["type"], "completed");
}
