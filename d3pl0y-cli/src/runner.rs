//! Command runner
//!
//! Spawns external tools, optionally relays their merged output line by line,
//! and turns a failed checked command into a `DeployError` carrying the
//! child's exit code.

use crate::error::{CommandFailedSnafu, ProgramNotFoundSnafu, RelaySnafu, Result, SpawnSnafu};
use snafu::{IntoError, ResultExt};
use std::fmt;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Program plus its arguments, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// How a command is run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Relay merged stdout/stderr as it arrives instead of capturing it
    pub stream: bool,
    /// Abort with the child's exit code when it is non-zero
    pub check: bool,
}

impl RunOptions {
    /// Streamed, aborts on failure
    pub const CHECKED: Self = Self {
        stream: true,
        check: true,
    };
    /// Streamed, failure tolerated
    pub const BEST_EFFORT: Self = Self {
        stream: true,
        check: false,
    };
    /// Silent existence check, failure is the answer
    pub const QUERY: Self = Self {
        stream: false,
        check: false,
    };
}

/// What came back from a finished child
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutcome {
    pub code: i32,
    /// Captured stderr; empty when the output was streamed
    pub stderr: String,
}

/// Process seam: spawning children and resolving programs on PATH
pub trait Executor {
    fn execute(&mut self, command: &CommandLine, stream: bool) -> Result<ExecOutcome>;

    fn locate(&self, program: &str) -> Option<PathBuf>;
}

/// Executor backed by real child processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn execute(&mut self, command: &CommandLine, stream: bool) -> Result<ExecOutcome> {
        let expr = duct::cmd(command.program.as_str(), &command.args).unchecked();
        if stream {
            let reader = expr
                .stderr_to_stdout()
                .reader()
                .map_err(|e| spawn_error(&command.program, e))?;

            {
                let mut lines = BufReader::new(&reader);
                let stdout = std::io::stdout();
                let mut buf = Vec::new();
                loop {
                    buf.clear();
                    let read = lines
                        .read_until(b'\n', &mut buf)
                        .context(RelaySnafu {
                            program: &command.program,
                        })?;
                    if read == 0 {
                        break;
                    }
                    let mut out = stdout.lock();
                    out.write_all(&buf)
                        .and_then(|()| out.flush())
                        .context(RelaySnafu {
                            program: &command.program,
                        })?;
                }
            }

            // EOF means duct has already reaped the child
            let code = match reader.try_wait().context(RelaySnafu {
                program: &command.program,
            })? {
                Some(output) => exit_code(&output.status),
                None => {
                    tracing::warn!("{} closed its output but is still running", command.program);
                    1
                }
            };
            Ok(ExecOutcome {
                code,
                stderr: String::new(),
            })
        } else {
            let output = expr
                .stdout_capture()
                .stderr_capture()
                .run()
                .map_err(|e| spawn_error(&command.program, e))?;
            Ok(ExecOutcome {
                code: exit_code(&output.status),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        }
    }

    fn locate(&self, program: &str) -> Option<PathBuf> {
        find_in_path(program)
    }
}

fn spawn_error(program: &str, err: std::io::Error) -> crate::error::DeployError {
    if err.kind() == std::io::ErrorKind::NotFound {
        ProgramNotFoundSnafu { program }.build()
    } else {
        SpawnSnafu { program }.into_error(err)
    }
}

/// Killed by a signal counts as a plain failure
fn exit_code(status: &std::process::ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}

/// What gets printed when a checked command fails
///
/// Streamed output has already been shown, so only captured stderr is echoed.
fn failure_report(outcome: &ExecOutcome, streamed: bool) -> String {
    let mut report = format!("\n❌ Command failed with exit code {}", outcome.code);
    if !streamed {
        report.push_str(&format!("\nStderr: {}", outcome.stderr.trim()));
    }
    report
}

/// Resolve a program name against PATH the way a shell would
pub fn find_in_path(program: &str) -> Option<PathBuf> {
    if program.contains(std::path::MAIN_SEPARATOR) {
        let direct = PathBuf::from(program);
        return is_executable(&direct).then_some(direct);
    }
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .flat_map(|dir| candidates(&dir, program))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn candidates(dir: &Path, program: &str) -> Vec<PathBuf> {
    vec![dir.join(program)]
}

#[cfg(not(unix))]
fn candidates(dir: &Path, program: &str) -> Vec<PathBuf> {
    vec![dir.join(program), dir.join(format!("{program}.exe"))]
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Runs commands through an executor and applies the check policy
#[derive(Debug)]
pub struct Runner<E> {
    executor: E,
}

impl<E: Executor> Runner<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Run a command and return its exit code
    ///
    /// With `check` set, a non-zero exit becomes `CommandFailed` carrying the
    /// child's code. A missing program is always an error.
    pub fn run(&mut self, command: &CommandLine, options: RunOptions) -> Result<i32> {
        println!("\n🚀 Executing: {command}");
        tracing::debug!(?options, "spawning {}", command.program);

        let outcome = match self.executor.execute(command, options.stream) {
            Ok(outcome) => outcome,
            Err(e) => {
                println!("❌ Error: {e}");
                return Err(e);
            }
        };
        tracing::debug!("{} exited with {}", command.program, outcome.code);

        if options.check && outcome.code != 0 {
            println!("{}", failure_report(&outcome, options.stream));
            return CommandFailedSnafu {
                command: command.to_string(),
                code: outcome.code,
            }
            .fail();
        }

        Ok(outcome.code)
    }

    /// Silent existence check; the exit code is the answer
    pub fn query(&mut self, command: &CommandLine) -> Result<i32> {
        self.run(command, RunOptions::QUERY)
    }

    pub fn run_checked(&mut self, command: &CommandLine) -> Result<i32> {
        self.run(command, RunOptions::CHECKED)
    }

    pub fn run_best_effort(&mut self, command: &CommandLine) -> Result<i32> {
        self.run(command, RunOptions::BEST_EFFORT)
    }

    pub fn locate(&self, program: &str) -> Option<PathBuf> {
        self.executor.locate(program)
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }
}
