// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;

#[test]
fn manual_clock_starts_where_told() {
    let clock = ManualClock::at_millis(1_000);
    assert_eq!(clock.now().timestamp_millis(), 1_000);
}

#[test]
fn manual_clock_advance_is_shared_between_clones() {
    let clock = ManualClock::at_millis(1_000);
    let other = clock.clone();

    clock.advance(Duration::milliseconds(250));

    assert_eq!(other.now().timestamp_millis(), 1_250);
}

#[test]
fn manual_clock_set_overrides() {
    let clock = ManualClock::at_millis(5_000);
    clock.set(DateTime::from_timestamp_millis(42).unwrap());
    assert_eq!(clock.now().timestamp_millis(), 42);
}

#[test]
fn system_clock_is_recent() {
    let before = Utc::now();
    let now = SystemClock.now();
    assert!(now >= before);
}

#[test]
fn arc_clock_delegates() {
    let clock: Arc<dyn ClockSource> = Arc::new(ManualClock::at_millis(7));
    assert_eq!(clock.now().timestamp_millis(), 7);
}
