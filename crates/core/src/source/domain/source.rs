use crate::process::parent_command::ParentCommand;
use crate::source::domain::source_error::SourceError;

/// Supplies input media to a transcoder invocation.
///
/// The owner asks for `arguments()` while building the command line, calls
/// `start()` once before launching the transcoder, and calls `done()`
/// exactly once afterwards, whether or not `start()` ran or succeeded.
pub trait Source: Send {
    /// Command-line tokens telling the transcoder where to read input.
    /// Pure; may be called at any point in the lifecycle.
    fn arguments(&self) -> Vec<String>;

    /// Wires the input channel into `parent` before it is launched.
    ///
    /// On error the caller must not launch `parent`, and `parent` is left
    /// exactly as it was before the call.
    fn start(&mut self, parent: &mut ParentCommand) -> Result<(), SourceError>;

    /// Releases everything the source acquired. Never fails and never
    /// blocks indefinitely; a no-op if `start()` never succeeded.
    fn done(&mut self);
}

impl<S: Source + ?Sized> Source for Box<S> {
    fn arguments(&self) -> Vec<String> {
        (**self).arguments()
    }

    fn start(&mut self, parent: &mut ParentCommand) -> Result<(), SourceError> {
        (**self).start(parent)
    }

    fn done(&mut self) {
        (**self).done()
    }
}
