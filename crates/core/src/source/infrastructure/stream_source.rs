use std::process::Stdio;

use crate::process::parent_command::ParentCommand;
use crate::shared::constants::{INPUT_FLAG, STDIN_SENTINEL};
use crate::source::domain::source::Source;
use crate::source::domain::source_error::SourceError;

enum StreamState {
    Owned(Stdio),
    Attached,
    Released,
}

/// Input read from an already-open handle (file, pipe read end, child
/// stdout) that becomes the transcoder's standard input.
///
/// `start` moves the handle into the parent command, which then closes it
/// once the transcoder has been launched. A handle that was never attached
/// is closed by `done`.
pub struct StreamSource {
    state: StreamState,
}

impl StreamSource {
    pub fn new(stream: impl Into<Stdio>) -> Self {
        Self {
            state: StreamState::Owned(stream.into()),
        }
    }

    pub fn is_attached(&self) -> bool {
        matches!(self.state, StreamState::Attached)
    }

    pub fn is_released(&self) -> bool {
        matches!(self.state, StreamState::Released)
    }
}

impl Source for StreamSource {
    fn arguments(&self) -> Vec<String> {
        vec![INPUT_FLAG.to_string(), STDIN_SENTINEL.to_string()]
    }

    fn start(&mut self, parent: &mut ParentCommand) -> Result<(), SourceError> {
        match std::mem::replace(&mut self.state, StreamState::Attached) {
            StreamState::Owned(stream) => {
                parent.attach_stdin(stream);
                log::debug!("Attached input stream as transcoder stdin");
                Ok(())
            }
            previous => {
                self.state = previous;
                Err(SourceError::Consumed)
            }
        }
    }

    fn done(&mut self) {
        if let StreamState::Owned(stream) = std::mem::replace(&mut self.state, StreamState::Released)
        {
            drop(stream);
            log::debug!("Closed unattached input stream");
        }
    }
}

impl std::fmt::Debug for StreamSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self.state {
            StreamState::Owned(_) => "owned",
            StreamState::Attached => "attached",
            StreamState::Released => "released",
        };
        f.debug_struct("StreamSource").field("state", &state).finish()
    }
}
