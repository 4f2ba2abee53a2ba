//! Shared helpers for CLI specs

pub use similar_asserts::assert_eq;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary directory holding queue files
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the project root and return its path
    pub fn file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    /// `gateq` invocation rooted in this project
    pub fn gateq(&self) -> assert_cmd::Command {
        let mut cmd = gateq();
        cmd.current_dir(self.path());
        cmd
    }
}

/// `gateq` invocation with logging silenced
pub fn gateq() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("gateq").unwrap();
    cmd.env("RUST_LOG", "off");
    cmd
}

pub fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
