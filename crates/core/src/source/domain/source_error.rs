use thiserror::Error;

/// Reasons a source could not be made ready for the transcoder.
///
/// Only `start` reports errors. Cleanup failures are logged and absorbed.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("failed to open helper output pipe: {0}")]
    Pipe(#[source] std::io::Error),
    #[error("failed to launch helper process {command}: {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("helper process is already running")]
    AlreadyStarted,
    #[error("input stream was already attached or released")]
    Consumed,
}
