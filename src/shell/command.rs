//! External command execution.
//!
//! Every call spawns exactly one OS process. Piped streams are drained by a
//! reader thread each, and the collected bytes are joined once the process
//! exits, so a chatty child can never block on a full pipe.

use crate::error::{BmtError, Result};
use std::collections::HashMap;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use super::tokenize::{join_command, split_command};

/// How long `wait_timeout` sleeps between exit checks.
const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Read size for the stream collectors.
const READ_CHUNK: usize = 8 * 1024;

/// What to connect a child's standard stream to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdioMode {
    /// Share the parent's stream.
    Inherit,
    /// Capture through a pipe.
    Piped,
    /// Discard (or, for stdin, provide nothing).
    Null,
}

impl StdioMode {
    fn to_stdio(self) -> Stdio {
        match self {
            Self::Inherit => Stdio::inherit(),
            Self::Piped => Stdio::piped(),
            Self::Null => Stdio::null(),
        }
    }
}

/// Options for command execution.
#[derive(Debug, Clone)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Standard input mode.
    pub stdin: StdioMode,

    /// Standard output mode. Only `Piped` output is captured.
    pub stdout: StdioMode,

    /// Standard error mode. Only `Piped` output is captured.
    pub stderr: StdioMode,

    /// Environment variables (merged with system env).
    pub env: HashMap<String, String>,

    /// Kill the process if it runs longer than this.
    pub timeout: Option<Duration>,

    /// Keep only this many trailing bytes of each captured stream.
    pub capture_limit: Option<usize>,
}

impl Default for CommandOptions {
    fn default() -> Self {
        Self {
            cwd: None,
            stdin: StdioMode::Null,
            stdout: StdioMode::Piped,
            stderr: StdioMode::Piped,
            env: HashMap::new(),
            timeout: None,
            capture_limit: None,
        }
    }
}

impl CommandOptions {
    /// Capture both output streams and run in `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            cwd: Some(dir.as_ref().to_path_buf()),
            ..Default::default()
        }
    }

    /// Set the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// A single request to run an external program.
#[derive(Debug, Clone)]
pub struct CommandInvocation {
    program: String,
    args: Vec<String>,
    options: CommandOptions,
    via_shell: bool,
}

impl CommandInvocation {
    /// Create an invocation from a program and its arguments.
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            options: CommandOptions::default(),
            via_shell: false,
        }
    }

    /// Parse a full command line, honoring double quotes.
    pub fn parse(line: &str) -> Result<Self> {
        let mut tokens = split_command(line).into_iter();
        let program = tokens
            .next()
            .ok_or_else(|| BmtError::ConfigValidationError {
                message: "command is empty".to_string(),
            })?;
        Ok(Self::new(program, tokens))
    }

    /// Replace the execution options.
    pub fn with_options(mut self, options: CommandOptions) -> Self {
        self.options = options;
        self
    }

    /// Start the program through the platform shell.
    ///
    /// Only meant for user-configured tool lines: on Windows the arguments
    /// are then interpreted by `cmd.exe`.
    pub fn through_shell(mut self) -> Self {
        self.via_shell = true;
        self
    }

    /// Append extra arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// The program to run.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The arguments, in order.
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// Whether the program is started through the platform shell.
    pub fn runs_through_shell(&self) -> bool {
        self.via_shell
    }

    /// The execution options.
    pub fn options(&self) -> &CommandOptions {
        &self.options
    }

    /// Human-readable command line.
    pub fn display(&self) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 1);
        parts.push(self.program.as_str());
        parts.extend(self.args.iter().map(String::as_str));
        join_command(&parts)
    }

    fn build(&self) -> Command {
        let mut cmd = super::platform::program_command(&self.program, self.via_shell);
        cmd.args(&self.args);

        if let Some(cwd) = &self.options.cwd {
            cmd.current_dir(cwd);
        }

        for (key, value) in &self.options.env {
            cmd.env(key, value);
        }

        cmd.stdin(self.options.stdin.to_stdio());
        cmd.stdout(self.options.stdout.to_stdio());
        cmd.stderr(self.options.stderr.to_stdio());
        cmd
    }
}

/// Output of a command that exited successfully.
#[derive(Debug, Clone)]
pub struct ExecOutput {
    /// Captured standard output (empty unless piped).
    pub stdout: String,

    /// Captured standard error (empty unless piped).
    pub stderr: String,

    /// Exit code. Always 0 for a value returned by [`exec`].
    pub exit_code: i32,

    /// Wall time from spawn to exit.
    pub duration: Duration,
}

/// A spawned process whose output is being collected.
pub struct RunningProcess {
    command: String,
    child: Child,
    stdout: Option<JoinHandle<Vec<u8>>>,
    stderr: Option<JoinHandle<Vec<u8>>>,
    started: Instant,
}

impl std::fmt::Debug for RunningProcess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunningProcess")
            .field("command", &self.command)
            .field("pid", &self.child.id())
            .finish()
    }
}

impl RunningProcess {
    /// The command line this process was started with.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// OS process id.
    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// Check for exit without blocking.
    ///
    /// Returns `None` while the process is still running. Once it has
    /// exited, returns its result; later calls see empty captured output.
    pub fn try_finish(&mut self) -> Option<Result<ExecOutput>> {
        match self.child.try_wait() {
            Ok(Some(status)) => Some(self.finish(status)),
            Ok(None) => None,
            Err(e) => Some(Err(e.into())),
        }
    }

    /// Block until the process exits.
    pub fn wait(mut self) -> Result<ExecOutput> {
        let status = self.child.wait()?;
        self.finish(status)
    }

    /// Block until the process exits or `timeout` elapses.
    ///
    /// On timeout the process is killed and [`BmtError::Timeout`] returned.
    pub fn wait_timeout(mut self, timeout: Duration) -> Result<ExecOutput> {
        loop {
            if let Some(status) = self.child.try_wait()? {
                return self.finish(status);
            }
            if self.started.elapsed() >= timeout {
                tracing::debug!(command = %self.command, "timed out, killing");
                self.kill()?;
                // Grandchildren may still hold the pipes open; leave the
                // readers detached instead of joining them.
                self.stdout.take();
                self.stderr.take();
                return Err(BmtError::Timeout {
                    command: self.command.clone(),
                    seconds: timeout.as_secs(),
                });
            }
            thread::sleep(EXIT_POLL_INTERVAL);
        }
    }

    /// Kill the process and reap it. Killing an exited process is a no-op.
    pub fn kill(&mut self) -> Result<()> {
        match self.child.kill() {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::InvalidInput => {}
            Err(e) => return Err(e.into()),
        }
        self.child.wait()?;
        Ok(())
    }

    fn drain(&mut self) -> (Vec<u8>, Vec<u8>) {
        let stdout = join_reader(self.stdout.take());
        let stderr = join_reader(self.stderr.take());
        (stdout, stderr)
    }

    fn finish(&mut self, status: ExitStatus) -> Result<ExecOutput> {
        let (stdout, stderr) = self.drain();
        let stdout = String::from_utf8_lossy(&stdout).into_owned();
        let stderr = String::from_utf8_lossy(&stderr).into_owned();
        let duration = self.started.elapsed();

        tracing::debug!(
            command = %self.command,
            code = ?status.code(),
            elapsed_ms = duration.as_millis() as u64,
            "process exited"
        );

        if status.success() {
            Ok(ExecOutput {
                stdout,
                stderr,
                exit_code: 0,
                duration,
            })
        } else {
            Err(BmtError::CommandFailed {
                command: self.command.clone(),
                code: status.code(),
                stderr,
            })
        }
    }
}

fn collect_stream<R: Read + Send + 'static>(
    mut reader: R,
    limit: Option<usize>,
) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            match reader.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => {
                    buf.extend_from_slice(&chunk[..n]);
                    if let Some(limit) = limit {
                        if buf.len() > limit {
                            let excess = buf.len() - limit;
                            buf.drain(..excess);
                        }
                    }
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => {
                    tracing::debug!(error = %e, "stopped reading child output");
                    break;
                }
            }
        }
        buf
    })
}

fn join_reader(handle: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    match handle.map(JoinHandle::join) {
        Some(Ok(buf)) => buf,
        Some(Err(_)) => {
            tracing::debug!("output reader panicked, captured output lost");
            Vec::new()
        }
        None => Vec::new(),
    }
}

/// Start a process without waiting for it.
pub fn spawn(invocation: &CommandInvocation) -> Result<RunningProcess> {
    let command = invocation.display();
    tracing::debug!(
        command = %command,
        cwd = ?invocation.options.cwd,
        "spawning process"
    );

    let mut child = invocation
        .build()
        .spawn()
        .map_err(|source| BmtError::Launch {
            program: invocation.program.clone(),
            source,
        })?;

    let limit = invocation.options.capture_limit;
    let stdout = child.stdout.take().map(|out| collect_stream(out, limit));
    let stderr = child.stderr.take().map(|err| collect_stream(err, limit));

    Ok(RunningProcess {
        command,
        child,
        stdout,
        stderr,
        started: Instant::now(),
    })
}

/// Run a process to completion.
///
/// Succeeds with the captured output if the exit status is zero. Honors
/// the invocation's timeout, if any.
pub fn exec(invocation: &CommandInvocation) -> Result<ExecOutput> {
    let process = spawn(invocation)?;
    match invocation.options.timeout {
        Some(timeout) => process.wait_timeout(timeout),
        None => process.wait(),
    }
}

/// Parse a command line and run it with `options`.
pub fn exec_line(line: &str, options: CommandOptions) -> Result<ExecOutput> {
    exec(&CommandInvocation::parse(line)?.with_options(options))
}
