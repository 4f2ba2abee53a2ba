//! Help and version output

use crate::prelude::*;

#[test]
fn help_lists_subcommands() {
    let output = gateq().arg("--help").output().unwrap();

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("check"), "{text}");
    assert!(text.contains("run"), "{text}");
    assert!(text.contains("--verbose"), "{text}");
}

#[test]
fn run_help_documents_timeout_default() {
    let output = gateq().args(["run", "--help"]).output().unwrap();

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("--timeout"), "{text}");
    assert!(text.contains("30s"), "{text}");
}

#[test]
fn version_is_printed() {
    let output = gateq().arg("--version").output().unwrap();

    assert!(output.status.success());
    assert!(stdout(&output).starts_with("gateq "));
}
