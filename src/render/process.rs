use crate::foundation::error::LyrResult;
use anyhow::Context as _;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// A program invocation: executable name plus arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolCommand {
    /// Executable, resolved through `PATH`.
    pub program: String,
    /// Arguments in order, passed without a shell.
    pub args: Vec<String>,
}

impl ToolCommand {
    /// Invocation of `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Where a child's standard output goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputCapture {
    /// Share the parent's stdout.
    Inherit,
    /// Truncate and write stdout to this file.
    LogFile(PathBuf),
}

/// Exit status of a finished invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunStatus {
    code: Option<i32>,
}

impl RunStatus {
    /// Status of a process that exited with `code`.
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    /// Status of a process killed before exiting.
    pub fn terminated() -> Self {
        Self { code: None }
    }

    /// True for a zero exit code.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Exit code; `None` when the process was killed.
    pub fn code(&self) -> Option<i32> {
        self.code
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit status {code}"),
            None => f.write_str("termination by signal"),
        }
    }
}

/// Capability to run an external program to completion.
///
/// Every external collaborator (typesetter, converter, merger) is reached through this trait.
/// A non-zero exit is reported through [`RunStatus`]; `Err` is reserved for failures to start or
/// wait on the process.
pub trait ProcessRunner {
    /// Run `command` in `working_dir` until it exits, sending its stdout to `capture`.
    fn run(
        &mut self,
        command: &ToolCommand,
        working_dir: &Path,
        capture: &OutputCapture,
    ) -> LyrResult<RunStatus>;
}

/// Runs commands as real child processes and waits for them.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(
        &mut self,
        command: &ToolCommand,
        working_dir: &Path,
        capture: &OutputCapture,
    ) -> LyrResult<RunStatus> {
        tracing::debug!(%command, dir = %working_dir.display(), "spawn");

        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .current_dir(working_dir)
            .stdin(Stdio::null());

        if let OutputCapture::LogFile(path) = capture {
            let log = File::create(path)
                .with_context(|| format!("create log file '{}'", path.display()))?;
            cmd.stdout(Stdio::from(log));
        }

        let status = cmd.status().with_context(|| {
            format!(
                "failed to run {} (is it installed and on PATH?)",
                command.program
            )
        })?;

        Ok(match status.code() {
            Some(code) => RunStatus::from_code(code),
            None => RunStatus::terminated(),
        })
    }
}

/// One call seen by [`RecordingRunner`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    /// Command as requested.
    pub command: ToolCommand,
    /// Directory it would have run in.
    pub working_dir: PathBuf,
    /// Requested stdout destination.
    pub capture: OutputCapture,
}

/// In-memory runner for tests and dry runs: records every call and never spawns anything.
///
/// Programs registered with [`fail_program`](Self::fail_program) report the given exit code.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    invocations: Vec<Invocation>,
    failures: Vec<(String, i32)>,
}

impl RecordingRunner {
    /// Runner where every program succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later call of `program` exit with `code`.
    pub fn fail_program(mut self, program: impl Into<String>, code: i32) -> Self {
        self.failures.push((program.into(), code));
        self
    }

    /// Calls in the order they were made.
    pub fn invocations(&self) -> &[Invocation] {
        &self.invocations
    }

    /// Program names in call order.
    pub fn programs(&self) -> Vec<&str> {
        self.invocations
            .iter()
            .map(|i| i.command.program.as_str())
            .collect()
    }
}

impl ProcessRunner for RecordingRunner {
    fn run(
        &mut self,
        command: &ToolCommand,
        working_dir: &Path,
        capture: &OutputCapture,
    ) -> LyrResult<RunStatus> {
        self.invocations.push(Invocation {
            command: command.clone(),
            working_dir: working_dir.to_path_buf(),
            capture: capture.clone(),
        });
        let code = self
            .failures
            .iter()
            .find(|(program, _)| *program == command.program)
            .map_or(0, |(_, code)| *code);
        Ok(RunStatus::from_code(code))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/process.rs"]
mod tests;
