//! External command execution
//!
//! Resolvers never spawn processes directly. They go through a
//! [`CommandExecutor`], so tests can swap in [`TestCommandExecutor`] with
//! canned responses instead of shelling out.

use stackparams_core::{Error, Result};
use std::collections::{HashMap, HashSet};
use std::process::{Command, ExitStatus, Output};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Trait for executing external commands
pub trait CommandExecutor: Send + Sync {
    /// Run `cmd` with `args` and capture its output
    fn execute(&self, cmd: &str, args: &[String]) -> Result<Output>;

    /// Whether `cmd` can be found on the search path
    fn command_exists(&self, cmd: &str) -> bool;
}

/// Production implementation that executes real commands
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandExecutor;

impl CommandExecutor for SystemCommandExecutor {
    fn execute(&self, cmd: &str, args: &[String]) -> Result<Output> {
        debug!(command = cmd, ?args, "executing command");
        Command::new(cmd).args(args).output().map_err(|e| {
            Error::command_execution(
                cmd,
                args.to_vec(),
                format!("failed to execute command: {e}"),
                None,
            )
        })
    }

    fn command_exists(&self, cmd: &str) -> bool {
        which::which(cmd).is_ok()
    }
}

/// Canned output for one command line
#[derive(Debug, Clone)]
pub struct TestResponse {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub status_code: i32,
}

/// Executor that replays configured responses instead of spawning processes
#[derive(Debug, Default, Clone)]
pub struct TestCommandExecutor {
    responses: Arc<Mutex<HashMap<String, TestResponse>>>,
    missing: Arc<Mutex<HashSet<String>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl TestCommandExecutor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_response(&self, cmd: &str, args: &[&str], response: TestResponse) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.insert(command_line(cmd, args), response);
        }
    }

    pub fn add_simple_response(&self, cmd: &str, args: &[&str], stdout: &str) {
        self.add_response(
            cmd,
            args,
            TestResponse {
                stdout: stdout.as_bytes().to_vec(),
                stderr: Vec::new(),
                status_code: 0,
            },
        );
    }

    pub fn add_error_response(&self, cmd: &str, args: &[&str], stderr: &str) {
        self.add_response(
            cmd,
            args,
            TestResponse {
                stdout: Vec::new(),
                stderr: stderr.as_bytes().to_vec(),
                status_code: 1,
            },
        );
    }

    /// Make `command_exists` report `cmd` as absent
    pub fn mark_missing(&self, cmd: &str) {
        if let Ok(mut missing) = self.missing.lock() {
            missing.insert(cmd.to_string());
        }
    }

    /// Command lines executed so far, in order
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl CommandExecutor for TestCommandExecutor {
    fn execute(&self, cmd: &str, args: &[String]) -> Result<Output> {
        let key = command_line(cmd, args);
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(key.clone());
        }

        let response = self
            .responses
            .lock()
            .ok()
            .and_then(|responses| responses.get(&key).cloned());

        match response {
            Some(response) => Ok(Output {
                status: exit_status(response.status_code),
                stdout: response.stdout,
                stderr: response.stderr,
            }),
            None => Err(Error::command_execution(
                cmd,
                args.to_vec(),
                format!("no test response configured for command: {key}"),
                None,
            )),
        }
    }

    fn command_exists(&self, cmd: &str) -> bool {
        self.missing
            .lock()
            .map(|missing| !missing.contains(cmd))
            .unwrap_or(true)
    }
}

fn command_line<S: AsRef<str>>(cmd: &str, args: &[S]) -> String {
    let mut line = cmd.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(arg.as_ref());
    }
    line
}

#[cfg(unix)]
fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    ExitStatus::from_raw(code as u32)
}
