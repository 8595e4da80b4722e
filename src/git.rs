//! # Git Invocation
//!
//! All interaction with version control goes through the
//! [`HistoryProvider`] trait. The real implementation, [`GitCli`], runs the
//! system `git` binary, which automatically picks up:
//! - SSH keys from ~/.ssh/
//! - Git credential helpers
//! - Any authentication configured in ~/.gitconfig
//!
//! Tests substitute fake providers so that the synchronization and scraping
//! logic can be exercised without a network or a `git` install.
//!
//! Every invocation is bounded by a timeout. A process that outlives it is
//! killed and reported as [`GitFailure::Timeout`]; there are no retries.

use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use log::debug;

use crate::config::RevRange;
use crate::error::{Error, GitFailure, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Operations the pipeline needs from version control.
pub trait HistoryProvider {
    /// Clone `url` into the existing, empty directory `target`.
    fn clone_repo(&self, url: &str, target: &Path) -> Result<()>;

    /// Fetch all remotes of the clone at `repo`.
    fn fetch(&self, repo: &Path) -> Result<()>;

    /// One-line history of `repo`, newest first, one commit per line in the
    /// form `<abbrev-hash> <subject>`.
    fn log(&self, repo: &Path, range: Option<&RevRange>) -> Result<Vec<String>>;
}

/// [`HistoryProvider`] backed by the system `git` command.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
    timeout: Duration,
}

impl GitCli {
    pub fn new(timeout: Duration) -> Self {
        Self {
            program: "git".to_string(),
            timeout,
        }
    }

    /// Use a different executable in place of `git`.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        run_with_timeout(self.command(args), self.timeout)
    }

    /// Run `args` inside the clone at `repo`.
    ///
    /// Repository discovery stops at `repo`'s parent, so a directory that is
    /// not a clone fails instead of resolving to an enclosing repository.
    fn run_in(&self, repo: &Path, args: &[&str]) -> Result<String> {
        let mut cmd = self.command(&[]);
        cmd.arg("-C").arg(repo).args(args);
        if let Some(parent) = repo.parent() {
            cmd.env("GIT_CEILING_DIRECTORIES", parent);
        }
        run_with_timeout(cmd, self.timeout)
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(args)
            // never block on a credential prompt; fail instead
            .env("GIT_TERMINAL_PROMPT", "0");
        cmd
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new(crate::defaults::default_git_timeout())
    }
}

impl HistoryProvider for GitCli {
    fn clone_repo(&self, url: &str, target: &Path) -> Result<()> {
        let target = target.to_string_lossy().into_owned();
        self.run(&["clone", url, target.as_str()]).map(|_| ())
    }

    fn fetch(&self, repo: &Path) -> Result<()> {
        self.run_in(repo, &["fetch", "-a"]).map(|_| ())
    }

    fn log(&self, repo: &Path, range: Option<&RevRange>) -> Result<Vec<String>> {
        let range_arg = range.map(RevRange::to_git_arg);
        let mut args: Vec<&str> = vec!["log", "--oneline", "--no-color"];
        if let Some(range_arg) = range_arg.as_deref() {
            args.push(range_arg);
        }
        let stdout = self.run_in(repo, &args)?;
        Ok(stdout.lines().map(str::to_string).collect())
    }
}

/// Render a command line for diagnostics.
pub fn display_command(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|s| s.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run `cmd` to completion, killing it once `timeout` has elapsed.
///
/// Returns stdout on success. On any failure the error carries the combined
/// stdout and stderr of the process.
pub fn run_with_timeout(mut cmd: Command, timeout: Duration) -> Result<String> {
    let command = display_command(&cmd);
    debug!("running {}", command);

    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| Error::GitCommand {
            command: command.clone(),
            output: String::new(),
            reason: GitFailure::Spawn(e.to_string()),
        })?;

    // Drain both pipes off-thread so a chatty child never blocks on a full pipe.
    let stdout = child.stdout.take().map(Capture::start);
    let stderr = child.stderr.take().map(Capture::start);

    let start = Instant::now();
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break Ok(status),
            Ok(None) => {
                if start.elapsed() >= timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    break Err(GitFailure::Timeout(timeout));
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                break Err(GitFailure::Spawn(e.to_string()));
            }
        }
    };

    // A killed git may leave helpers holding the pipes open, so only wait
    // for the readers when the process exited on its own.
    let exited = status.is_ok();
    let stdout = stdout.map(|c| c.finish(exited)).unwrap_or_default();
    let stderr = stderr.map(|c| c.finish(exited)).unwrap_or_default();

    let reason = match status {
        Ok(status) if status.success() => return Ok(stdout),
        Ok(status) => GitFailure::ExitCode(status.code()),
        Err(reason) => reason,
    };

    let mut output = stdout;
    output.push_str(&stderr);
    Err(Error::GitCommand {
        command,
        output: output.trim().to_string(),
        reason,
    })
}

/// Output of one child pipe, collected on a reader thread.
struct Capture {
    buf: Arc<Mutex<Vec<u8>>>,
    reader: thread::JoinHandle<()>,
}

impl Capture {
    fn start<R: Read + Send + 'static>(mut pipe: R) -> Self {
        let buf = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&buf);
        let reader = thread::spawn(move || {
            let mut chunk = [0u8; 8192];
            loop {
                match pipe.read(&mut chunk) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => sink
                        .lock()
                        .unwrap_or_else(|e| e.into_inner())
                        .extend_from_slice(&chunk[..n]),
                }
            }
        });
        Self { buf, reader }
    }

    /// Whatever was read so far, after waiting for end of stream if `wait`.
    fn finish(self, wait: bool) -> String {
        if wait {
            let _ = self.reader.join();
        }
        let buf = self.buf.lock().unwrap_or_else(|e| e.into_inner());
        let text = String::from_utf8_lossy(&buf).into_owned();
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(script: &str) -> Command {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", script]);
        cmd
    }

    #[test]
    fn test_display_command() {
        let mut cmd = Command::new("git");
        cmd.args(["-C", "/tmp/repo", "fetch", "-a"]);
        assert_eq!(display_command(&cmd), "git -C /tmp/repo fetch -a");
    }

    #[cfg(unix)]
    #[test]
    fn test_run_with_timeout_returns_stdout() {
        let out = run_with_timeout(sh("echo hello"), Duration::from_secs(10)).unwrap();
        assert_eq!(out.trim(), "hello");
    }

    #[cfg(unix)]
    #[test]
    fn test_run_with_timeout_captures_combined_output_on_failure() {
        let err = run_with_timeout(
            sh("echo to-stdout; echo to-stderr 1>&2; exit 3"),
            Duration::from_secs(10),
        )
        .unwrap_err();
        match err {
            Error::GitCommand {
                command,
                output,
                reason,
            } => {
                assert!(command.starts_with("sh -c"));
                assert!(output.contains("to-stdout"));
                assert!(output.contains("to-stderr"));
                assert_eq!(reason, GitFailure::ExitCode(Some(3)));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_run_with_timeout_kills_slow_process() {
        let start = Instant::now();
        let err = run_with_timeout(sh("exec sleep 5"), Duration::from_millis(200)).unwrap_err();
        assert!(start.elapsed() < Duration::from_secs(4));
        match err {
            Error::GitCommand { reason, .. } => {
                assert_eq!(reason, GitFailure::Timeout(Duration::from_millis(200)))
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_run_with_timeout_large_output_does_not_block() {
        let out = run_with_timeout(
            sh("i=0; while [ $i -lt 20000 ]; do echo line-$i; i=$((i+1)); done"),
            Duration::from_secs(30),
        )
        .unwrap();
        assert_eq!(out.lines().count(), 20000);
    }

    #[test]
    fn test_missing_program_is_spawn_failure() {
        let cli = GitCli::new(Duration::from_secs(5)).with_program("definitely-not-a-real-git-binary");
        let err = cli.fetch(Path::new("/tmp")).unwrap_err();
        match err {
            Error::GitCommand { command, reason, .. } => {
                assert!(command.contains("fetch -a"));
                assert!(matches!(reason, GitFailure::Spawn(_)));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_git_cli_default_timeout() {
        assert_eq!(GitCli::default().timeout(), Duration::from_secs(100));
    }

    // Clone/fetch/log against real repositories are covered by
    // tests/integration_git.rs, which builds local repositories on the fly.
}
