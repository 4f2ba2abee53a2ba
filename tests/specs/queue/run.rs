//! `gateq run` executes queues against the file's initial state

use crate::prelude::*;
use crate::prelude::assert_eq;

const HANDOFF: &str = r#"
retry_delay = "20ms"

[state]
sys = { balance = true, idle = false }

[[queue]]
name = "balance"
conditions = "sys.balance"
options = ["strict_order"]
actions = [
  { code = ["echo balance", "set sys.balance false", "set sys.idle true", "run equilibrium"], consumed = "sys.balance" },
  "echo tick 0",
  "echo tick 1",
]

[[queue]]
name = "equilibrium"
conditions = "sys.idle"
actions = [
  ["echo equilibrium", "set sys.idle false", "set sys.balance true", "run balance"],
]
"#;

fn summary(rows: &[(&str, usize)]) -> String {
    rows.iter()
        .map(|(name, remaining)| format!("{:<20} {} remaining\n", name, remaining))
        .collect()
}

#[test]
fn queues_hand_off_and_drain() {
    let project = Project::empty();
    project.file("handoff.toml", HANDOFF);

    let output = project.gateq().args(["run", "handoff.toml"]).output().unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    // The consumption check re-runs the first action once because
    // equilibrium restored the flag before the check fired.
    assert_eq!(
        stdout(&output),
        format!(
            "balance\nequilibrium\ntick 0\ntick 1\nbalance\n{}",
            summary(&[("balance", 0), ("equilibrium", 0)])
        )
    );
}

#[test]
fn single_queue_can_be_selected() {
    let project = Project::empty();
    project.file(
        "two.toml",
        r#"
[[queue]]
name = "a"
conditions = true
actions = ["echo a"]

[[queue]]
name = "b"
conditions = true
actions = ["echo b"]
"#,
    );

    let output = project
        .gateq()
        .args(["run", "two.toml", "--queue", "b"])
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        format!("b\n{}", summary(&[("a", 1), ("b", 0)]))
    );
}

#[test]
fn unknown_queue_lists_defined_ones() {
    let project = Project::empty();
    project.file("one.toml", "[[queue]]\nname = \"a\"\nconditions = true\n");

    let output = project
        .gateq()
        .args(["run", "one.toml", "--queue", "ghost"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let text = stderr(&output);
    assert!(text.contains("Queue 'ghost' not found"), "{text}");
    assert!(text.contains("Defined queues: a"), "{text}");
}

#[test]
fn gated_actions_stay_queued() {
    let project = Project::empty();
    project.file(
        "gated.toml",
        r#"
[state]
sys = { ready = false }

[[queue]]
name = "q"
conditions = true
actions = [
  "echo free",
  { code = "echo gated", required = "sys.ready" },
]
"#,
    );

    let output = project.gateq().args(["run", "gated.toml"]).output().unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), format!("free\n{}", summary(&[("q", 1)])));
}

#[test]
fn never_consumed_resource_times_out() {
    let project = Project::empty();
    project.file(
        "stuck.toml",
        r#"
retry_delay = "10ms"

[state]
sys = { flag = true }

[[queue]]
name = "stuck"
conditions = true
actions = [{ code = "echo try", consumed = "sys.flag" }]
"#,
    );

    let output = project
        .gateq()
        .args(["run", "stuck.toml", "--timeout", "150ms"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).lines().filter(|l| *l == "try").count() > 1);
    let text = stderr(&output);
    assert!(text.contains("still pending after 150ms"), "{text}");
}
