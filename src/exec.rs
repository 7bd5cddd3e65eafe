//! Bounded subprocess execution.
//!
//! Every component that shells out funnels through [`run_captured`]: spawn
//! with piped output, poll against a deadline, kill on expiry, classify the
//! result. Callers treat a timeout exactly like a failing exit.

use std::io::Read;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Outcome of one bounded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Exit 0 with non-empty trimmed stdout
    Output(String),
    /// Exit 0 but nothing usable on stdout
    Empty,
    /// Non-zero exit, timeout, or spawn failure
    Failed(String),
}

/// Run a command to completion within `timeout`, capturing trimmed stdout.
pub fn run_captured(cmd: &mut Command, timeout: Duration) -> CaptureOutcome {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => return CaptureOutcome::Failed(format!("failed to spawn: {}", e)),
    };

    let Some(stdout) = child.stdout.take() else {
        let _ = child.kill();
        let _ = child.wait();
        return CaptureOutcome::Failed("failed to capture stdout".to_string());
    };
    let Some(stderr) = child.stderr.take() else {
        let _ = child.kill();
        let _ = child.wait();
        return CaptureOutcome::Failed("failed to capture stderr".to_string());
    };

    // Drain both pipes off-thread so a chatty child cannot deadlock the poll loop.
    let stdout_thread = thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = std::io::BufReader::new(stdout).read_to_end(&mut buf);
        buf
    });
    let stderr_thread = thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = std::io::BufReader::new(stderr).read_to_end(&mut buf);
        buf
    });

    let start = Instant::now();
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if start.elapsed() > timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    let _ = stdout_thread.join();
                    let _ = stderr_thread.join();
                    return CaptureOutcome::Failed(format!(
                        "timed out after {} seconds",
                        timeout.as_secs()
                    ));
                }
                thread::sleep(Duration::from_millis(50));
            }
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                let _ = stdout_thread.join();
                let _ = stderr_thread.join();
                return CaptureOutcome::Failed(e.to_string());
            }
        }
    };

    let stdout = stdout_thread.join().unwrap_or_default();
    let _ = stderr_thread.join();

    if !status.success() {
        return CaptureOutcome::Failed(match status.code() {
            Some(code) => format!("exited with status {}", code),
            None => "terminated by signal".to_string(),
        });
    }

    let text = String::from_utf8_lossy(&stdout);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        CaptureOutcome::Empty
    } else {
        CaptureOutcome::Output(trimmed.to_string())
    }
}

/// Boolean probe: did the command exit 0 within the timeout?
/// Every failure mode counts as "no", never as an error.
pub fn probe(cmd: &mut Command, timeout: Duration) -> bool {
    !matches!(run_captured(cmd, timeout), CaptureOutcome::Failed(_))
}
