#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::{TempDir, tempdir};

/// Returns the absolute path to a fixture under `tests/data`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// `infer-ddl` binary with logging silenced so stdout holds only the output.
pub fn infer_ddl() -> Command {
    let mut cmd = Command::cargo_bin("infer-ddl").expect("binary exists");
    cmd.env("RUST_LOG", "off");
    cmd
}

/// Scratch directory for input files and dialect profiles, removed on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        self.write_bytes(name, contents.as_bytes())
    }

    pub fn write_bytes(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, contents).expect("write temp file");
        path
    }

    /// Writes rows joined by `delimiter`, one line per row.
    pub fn write_rows(&self, name: &str, delimiter: char, rows: &[&[&str]]) -> PathBuf {
        let text = rows
            .iter()
            .map(|row| row.join(&delimiter.to_string()))
            .collect::<Vec<_>>()
            .join("\n");
        self.write(name, &format!("{text}\n"))
    }
}
