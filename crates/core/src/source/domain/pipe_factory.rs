use std::io::{self, PipeReader, PipeWriter};

/// Opens the anonymous pipe a helper process writes its output into.
pub trait PipeFactory: Send {
    fn open(&self) -> io::Result<(PipeReader, PipeWriter)>;
}
