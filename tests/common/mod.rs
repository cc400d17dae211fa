//! Shared test infrastructure for integration tests.

use serde_json::json;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Environment variables that would change resolution if inherited.
const SCRUBBED_ENV: &[&str] = &[
    "FDESK_CONFIG",
    "FDESK_DATA",
    "OPENAI_API_KEY",
    "OPENROUTER_API_KEY",
    "RUST_LOG",
];

/// A throwaway desk: its own config, data file, and working directory.
///
/// The config names credential variables that are never set, so every run
/// stays offline and uses the fallback text.
pub struct TestDesk {
    pub root: TempDir,
    pub config_path: PathBuf,
    pub data_path: PathBuf,
}

impl TestDesk {
    pub fn new() -> anyhow::Result<Self> {
        let root = TempDir::new()?;
        let config_path = root.path().join("config.json");
        let data_path = root.path().join("data").join("submissions.csv");
        let config = json!({
            "schema_version": 1,
            "business": "restaurant",
            "timeout_secs": 2,
            "primary": provider("primary", "FDESK_IT_UNSET_PRIMARY_KEY"),
            "secondary": provider("secondary", "FDESK_IT_UNSET_SECONDARY_KEY"),
        });
        std::fs::write(&config_path, serde_json::to_vec_pretty(&config)?)?;
        Ok(Self {
            root,
            config_path,
            data_path,
        })
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Run `fdesk` with this desk's config and data file.
    pub fn run(&self, args: &[&str]) -> Output {
        self.run_with_stdin(args, "")
    }

    pub fn run_with_stdin(&self, args: &[&str], stdin: &str) -> Output {
        let mut command = Command::new(env!("CARGO_BIN_EXE_fdesk"));
        command
            .arg("--config")
            .arg(&self.config_path)
            .arg("--data")
            .arg(&self.data_path)
            .args(args)
            .current_dir(self.root.path())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        for name in SCRUBBED_ENV {
            command.env_remove(name);
        }
        let mut child = command.spawn().expect("spawn fdesk");
        if let Some(mut pipe) = child.stdin.take() {
            pipe.write_all(stdin.as_bytes()).expect("write stdin");
        }
        child.wait_with_output().expect("wait for fdesk")
    }

    /// Submit one review and assert it was accepted.
    pub fn submit(&self, rating: u8, review: &str) {
        let rating = rating.to_string();
        let output = self.run(&["submit", "--rating", &rating, "--review", review]);
        assert_success(&output);
    }
}

fn provider(name: &str, key_env: &str) -> serde_json::Value {
    json!({
        "name": name,
        "url": "http://127.0.0.1:9/v1/chat/completions",
        "model": "test-model",
        "api_key_env": key_env,
        "schema": "openai_chat",
    })
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

pub fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "fdesk failed ({}):\nstdout: {}\nstderr: {}",
        output.status,
        stdout(output),
        stderr(output)
    );
}

pub fn stdout_json(output: &Output) -> serde_json::Value {
    assert_success(output);
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}
