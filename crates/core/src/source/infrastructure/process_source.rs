use std::process::{Child, Command, Stdio};

use crate::process::parent_command::ParentCommand;
use crate::shared::constants::{INPUT_FLAG, STDIN_SENTINEL};
use crate::source::domain::pipe_factory::PipeFactory;
use crate::source::domain::source::Source;
use crate::source::domain::source_error::SourceError;
use crate::source::infrastructure::os_pipe_factory::OsPipeFactory;

/// Input produced by a helper process whose standard output is piped into
/// the transcoder's standard input.
///
/// The helper is only spawned by `start`, and `child` is set only between
/// a successful `start` and the matching `done`.
pub struct ProcessSource {
    command: String,
    args: Vec<String>,
    pipes: Box<dyn PipeFactory>,
    child: Option<Child>,
}

impl ProcessSource {
    pub fn new<I, S>(command: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_pipe_factory(command, args, Box::new(OsPipeFactory))
    }

    pub fn with_pipe_factory<I, S>(
        command: impl Into<String>,
        args: I,
        pipes: Box<dyn PipeFactory>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            command: command.into(),
            args: args.into_iter().map(Into::into).collect(),
            pipes,
            child: None,
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// OS process id of the running helper, if any.
    pub fn helper_id(&self) -> Option<u32> {
        self.child.as_ref().map(Child::id)
    }

    pub fn is_running(&self) -> bool {
        self.child.is_some()
    }
}

impl Source for ProcessSource {
    fn arguments(&self) -> Vec<String> {
        vec![INPUT_FLAG.to_string(), STDIN_SENTINEL.to_string()]
    }

    fn start(&mut self, parent: &mut ParentCommand) -> Result<(), SourceError> {
        if self.child.is_some() {
            return Err(SourceError::AlreadyStarted);
        }

        let mut helper = Command::new(&self.command);
        helper
            .args(&self.args)
            .stdin(Stdio::null())
            .stderr(Stdio::null());

        let (reader, writer) = self.pipes.open().map_err(SourceError::Pipe)?;
        helper.stdout(writer);

        // Provisional until the helper is running; restored on failure.
        let previous = parent.detach_stdin();
        parent.attach_stdin(reader);

        let spawned = helper.spawn();
        // Drop our write end so the transcoder sees EOF when the helper exits.
        drop(helper);

        match spawned {
            Ok(child) => {
                log::debug!(
                    "Started helper process {} (pid {})",
                    self.command,
                    child.id()
                );
                self.child = Some(child);
                Ok(())
            }
            Err(source) => {
                parent.detach_stdin();
                if let Some(stdin) = previous {
                    parent.attach_stdin(stdin);
                }
                Err(SourceError::Launch {
                    command: self.command.clone(),
                    source,
                })
            }
        }
    }

    fn done(&mut self) {
        let Some(mut child) = self.child.take() else {
            return;
        };
        // Killing a helper that already exited is not an error worth reporting.
        if let Err(e) = child.kill() {
            log::debug!("Failed to kill helper process {}: {e}", self.command);
        }
        match child.wait() {
            Ok(status) => log::debug!("Helper process {} exited: {status}", self.command),
            Err(e) => log::warn!("Failed to reap helper process {}: {e}", self.command),
        }
    }
}

impl std::fmt::Debug for ProcessSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessSource")
            .field("command", &self.command)
            .field("args", &self.args)
            .field("helper_id", &self.helper_id())
            .finish()
    }
}
