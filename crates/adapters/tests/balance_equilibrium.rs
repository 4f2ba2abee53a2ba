// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

//! End-to-end scenario: two queues hand a single flag back and forth.
//!
//! `balance` runs while `sys.balance` is set. Its first action consumes the
//! flag and kicks `equilibrium`, which is gated on the inverse flag, sets it
//! again and kicks `balance` back. The 101 echo actions behind the first
//! one then drain, and the consumption check re-runs the first action once
//! because `equilibrium` restored the flag before the check fired.

use gateq_adapters::ScriptSink;
use gateq_core::{
    Action, Code, HostDeps, ManualScheduler, Queue, Registry, RegistryConfig, SharedState,
    StateResolver, Value, DEFAULT_RETRY_DELAY,
};
use serde_json::json;
use std::io::Write;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Output(Arc<Mutex<Vec<u8>>>);

impl Output {
    fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.0.lock().unwrap())
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

struct Scenario {
    registry: Registry,
    scheduler: ManualScheduler,
    state: SharedState,
    output: Output,
    balance: Queue,
    equilibrium: Queue,
}

fn scenario(echo_count: usize) -> Scenario {
    let state = SharedState::from_value(json!({ "sys": { "balance": true } }));
    let output = Output::default();
    let sink = ScriptSink::with_output(state.clone(), output.clone());
    let scheduler = ManualScheduler::new();
    let registry = Registry::new(
        HostDeps::new(state.clone(), sink.clone(), scheduler.clone()),
        RegistryConfig::default(),
    );
    sink.attach(&registry);

    let balance = registry
        .create("balance", "sys.balance", "strict_order")
        .unwrap();
    balance
        .add(
            Action::new(Code::sequence([
                "echo balance".into(),
                "set sys.balance false".into(),
                "run equilibrium".into(),
            ]))
            .consumes("sys.balance"),
        )
        .unwrap();
    for i in 0..echo_count {
        balance.add(format!("echo tick {i}")).unwrap();
    }

    let flags = state.clone();
    let equilibrium = registry
        .create(
            "equilibrium",
            Value::predicate(move || !flags.get_bool("sys.balance")),
            None::<&str>,
        )
        .unwrap();
    equilibrium
        .add(Value::list([
            "echo equilibrium",
            "set sys.balance true",
            "run balance",
        ]))
        .unwrap();

    Scenario {
        registry,
        scheduler,
        state,
        output,
        balance,
        equilibrium,
    }
}

#[test]
fn queues_alternate_until_both_drain() {
    let s = scenario(101);

    s.registry.run(Some("balance")).unwrap();

    let mut expected = vec!["balance".to_string(), "equilibrium".to_string()];
    expected.extend((0..101).map(|i| format!("tick {i}")));
    assert_eq!(s.output.lines(), expected);
    assert!(s.balance.is_empty());
    assert!(s.equilibrium.is_empty());
    assert_eq!(s.scheduler.pending(), 1);
}

#[test]
fn consumption_check_retries_once_then_settles() {
    let s = scenario(101);
    s.registry.run(Some("balance")).unwrap();

    let fired = s.scheduler.run_until_idle(10);

    // First check sees the flag restored and retries; the retry leaves it
    // cleared, so the second check settles.
    assert_eq!(fired, 2);
    assert_eq!(s.scheduler.pending(), 0);
    assert_eq!(s.output.lines().len(), 2 + 101 + 1);
    assert_eq!(s.output.lines().last().map(String::as_str), Some("balance"));
    assert_eq!(s.state.get("sys.balance"), Some(json!(false)));
    assert!(s.balance.is_empty());
    assert!(s.equilibrium.is_empty());
}

#[test]
fn run_all_reaches_the_same_end_state() {
    let s = scenario(101);

    s.registry.run_all();
    s.scheduler.run_until_idle(10);

    assert!(s.balance.is_empty());
    assert!(s.equilibrium.is_empty());
    assert_eq!(s.scheduler.pending(), 0);
}

#[test]
fn reset_before_the_check_stops_the_retry() {
    let s = scenario(3);
    s.registry.run(Some("balance")).unwrap();

    s.balance.reset();
    s.scheduler.advance(DEFAULT_RETRY_DELAY);

    assert_eq!(s.output.lines().len(), 2 + 3);
    assert!(s.balance.is_empty());
    assert_eq!(s.state.get("sys.balance"), Some(json!(true)));
}
