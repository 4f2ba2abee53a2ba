//! `gateq check` validates queue files without executing anything

use crate::prelude::*;
use crate::prelude::assert_eq;

const VALID: &str = r#"
retry_delay = "250ms"

[state]
sys = { balance = true }

[[queue]]
name = "balance"
conditions = "sys.balance"
options = ["strict_order"]
actions = [
  { code = "set sys.balance false", consumed = "sys.balance" },
  "echo tick",
]

[[queue]]
name = "idle"
conditions = false
"#;

#[test]
fn valid_file_prints_summary() {
    let project = Project::empty();
    project.file("queues.toml", VALID);

    let output = project.gateq().args(["check", "queues.toml"]).output().unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        format!(
            "queues.toml: 2 queue(s), retry delay 250ms\n  {:<20} actions={:<4} options=[strict_order] conditions=sys.balance\n  {:<20} actions={:<4} options=[] conditions=false\n",
            "balance", 2, "idle", 0
        )
    );
}

#[test]
fn check_does_not_execute_actions() {
    let project = Project::empty();
    project.file(
        "queues.toml",
        "[[queue]]\nname = \"q\"\nconditions = true\nactions = [\"echo should not print\"]\n",
    );

    let output = project.gateq().args(["check", "queues.toml"]).output().unwrap();

    assert!(output.status.success());
    assert!(!stdout(&output).contains("should not print"));
}

#[test]
fn bare_number_condition_is_rejected() {
    let project = Project::empty();
    project.file("queues.toml", "[[queue]]\nname = \"q\"\nconditions = 1\n");

    let output = project.gateq().args(["check", "queues.toml"]).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let text = stderr(&output);
    assert!(text.contains("queue \"q\": invalid argument"), "{text}");
}

#[test]
fn bad_action_is_located() {
    let project = Project::empty();
    project.file(
        "queues.toml",
        "[[queue]]\nname = \"q\"\nconditions = true\nactions = [\"ok\", { required = \"sys.x\" }]\n",
    );

    let output = project.gateq().args(["check", "queues.toml"]).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let text = stderr(&output);
    assert!(text.contains("queue \"q\", actions[1]: invalid action"), "{text}");
    assert!(text.contains("gateq check queues.toml"), "{text}");
}
