use std::io::{self, PipeReader, PipeWriter};

use crate::source::domain::pipe_factory::PipeFactory;

/// Opens a pipe with the operating system's anonymous pipe primitive.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsPipeFactory;

impl PipeFactory for OsPipeFactory {
    fn open(&self) -> io::Result<(PipeReader, PipeWriter)> {
        io::pipe()
    }
}
