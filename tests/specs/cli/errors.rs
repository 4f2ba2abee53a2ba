//! Error reporting for bad invocations and unreadable files

use crate::prelude::*;
use crate::prelude::assert_eq;

#[test]
fn missing_subcommand_is_a_usage_error() {
    let output = gateq().output().unwrap();

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Usage"));
}

#[test]
fn missing_file_is_reported_with_suggestion() {
    let project = Project::empty();

    let output = project.gateq().args(["check", "nope.toml"]).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let text = stderr(&output);
    assert!(text.starts_with("error: Cannot read queue file 'nope.toml'"), "{text}");
    assert!(text.contains("suggestions:"), "{text}");
}

#[test]
fn malformed_toml_is_reported() {
    let project = Project::empty();
    project.file("bad.toml", "[[queue]\nname = ");

    let output = project.gateq().args(["run", "bad.toml"]).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let text = stderr(&output);
    assert!(text.contains("Invalid queue file 'bad.toml'"), "{text}");
    assert!(text.contains("TOML parse error"), "{text}");
}
