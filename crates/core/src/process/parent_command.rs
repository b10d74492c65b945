use std::ffi::OsStr;
use std::io;
use std::process::{Child, Command, Stdio};

/// Handle to the transcoder process before it is launched.
///
/// Wraps a `Command` and keeps the standard-input attachment in a slot of
/// its own, so a source can attach a channel, inspect whether one is
/// attached, and detach it again if its own setup fails. The slot is only
/// applied to the underlying `Command` at `spawn()`.
pub struct ParentCommand {
    command: Command,
    stdin: Option<Stdio>,
}

impl ParentCommand {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            command: Command::new(program),
            stdin: None,
        }
    }

    pub fn arg(&mut self, arg: impl AsRef<OsStr>) -> &mut Self {
        self.command.arg(arg);
        self
    }

    pub fn args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.command.args(args);
        self
    }

    pub fn stdout(&mut self, cfg: impl Into<Stdio>) -> &mut Self {
        self.command.stdout(cfg);
        self
    }

    pub fn program(&self) -> &OsStr {
        self.command.get_program()
    }

    /// Arguments added so far, lossily converted for display and checks.
    pub fn arguments(&self) -> Vec<String> {
        self.command
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    /// Sets the channel the process will read as standard input.
    /// Replaces (and closes) any previous attachment.
    pub fn attach_stdin(&mut self, input: impl Into<Stdio>) {
        self.stdin = Some(input.into());
    }

    /// Removes the attached standard input, if any.
    pub fn detach_stdin(&mut self) -> Option<Stdio> {
        self.stdin.take()
    }

    pub fn has_stdin(&self) -> bool {
        self.stdin.is_some()
    }

    /// Launches the process.
    ///
    /// The attached standard input is handed to the child and the parent's
    /// copy is released once the launch attempt returns, successful or not.
    /// Without an attachment the child inherits standard input.
    pub fn spawn(&mut self) -> io::Result<Child> {
        if let Some(stdin) = self.stdin.take() {
            self.command.stdin(stdin);
        }
        let result = self.command.spawn();
        self.command.stdin(Stdio::inherit());
        result
    }
}

impl std::fmt::Debug for ParentCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParentCommand")
            .field("program", &self.program())
            .field("args", &self.arguments())
            .field("has_stdin", &self.has_stdin())
            .finish()
    }
}
