//! External command execution and transcript framing.
//!
//! Commands are built token by token as an [`Invocation`] and handed to a
//! [`CommandRunner`]. Every invocation is echoed to the transcript as a fenced
//! block holding the command line and its combined output.

use std::ffi::{OsStr, OsString};
use std::io::{self, Write};
use std::process::{Command, Stdio};

use tracing::debug;

// ============================================================================
// Invocation
// ============================================================================

/// A single external command with an optional extra environment binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: OsString,
    args: Vec<OsString>,
    env: Option<(String, OsString)>,
}

impl Invocation {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: None,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Append an argument only when present
    pub fn arg_opt(self, arg: Option<impl AsRef<OsStr>>) -> Self {
        match arg {
            Some(arg) => self.arg(arg),
            None => self,
        }
    }

    /// Set one environment variable on top of the inherited environment
    pub fn env(mut self, key: impl Into<String>, value: impl AsRef<OsStr>) -> Self {
        self.env = Some((key.into(), value.as_ref().to_os_string()));
        self
    }

    pub fn program(&self) -> &OsStr {
        &self.program
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    pub fn env_binding(&self) -> Option<(&str, &OsStr)> {
        self.env.as_ref().map(|(k, v)| (k.as_str(), v.as_os_str()))
    }

    /// Command without the environment prefix, e.g. `ipfs repo stat`
    pub fn command_line(&self) -> String {
        let mut line = self.program.to_string_lossy().into_owned();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }

    /// Command as echoed to the transcript, e.g. `IPFS_PATH=repo ipfs init`
    pub fn display_line(&self) -> String {
        match &self.env {
            Some((key, value)) => {
                format!("{}={} {}", key, value.to_string_lossy(), self.command_line())
            }
            None => self.command_line(),
        }
    }
}

// ============================================================================
// Runners
// ============================================================================

/// Output captured from a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captured {
    /// Standard output followed by standard error
    pub output: Vec<u8>,

    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,

    pub success: bool,
}

impl Captured {
    pub fn ok(output: impl Into<Vec<u8>>) -> Self {
        Self {
            output: output.into(),
            code: Some(0),
            success: true,
        }
    }

    pub fn failed(code: i32, output: impl Into<Vec<u8>>) -> Self {
        Self {
            output: output.into(),
            code: Some(code),
            success: false,
        }
    }
}

/// Executes invocations synchronously.
///
/// An `Err` means the process could not be launched at all; a non-zero exit
/// is reported through [`Captured::success`].
pub trait CommandRunner {
    fn run(&mut self, invocation: &Invocation) -> io::Result<Captured>;
}

/// Runs commands as real child processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, invocation: &Invocation) -> io::Result<Captured> {
        let mut cmd = Command::new(invocation.program());
        cmd.args(invocation.args());

        if let Some((key, value)) = invocation.env_binding() {
            cmd.env(key, value);
        }

        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        debug!(command = %invocation.display_line(), "launching");
        let output = cmd.output()?;

        let mut combined = output.stdout;
        combined.extend_from_slice(&output.stderr);

        Ok(Captured {
            output: combined,
            code: output.status.code(),
            success: output.status.success(),
        })
    }
}

/// Pretends every command succeeds without output
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunner;

impl CommandRunner for DryRunner {
    fn run(&mut self, invocation: &Invocation) -> io::Result<Captured> {
        debug!(command = %invocation.display_line(), "dry run");
        Ok(Captured::ok(Vec::new()))
    }
}

// ============================================================================
// Transcript framing
// ============================================================================

/// Write one fenced block: the `> command` line followed by its output
pub fn write_block<W: Write>(
    out: &mut W,
    invocation: &Invocation,
    output: &[u8],
) -> io::Result<()> {
    writeln!(out, "```")?;
    writeln!(out, "> {}", invocation.display_line())?;
    out.write_all(output)?;
    if output.last().is_some_and(|&b| b != b'\n') {
        writeln!(out)?;
    }
    writeln!(out, "```")
}
