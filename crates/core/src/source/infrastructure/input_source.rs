use std::process::Stdio;

use crate::process::parent_command::ParentCommand;
use crate::source::domain::source::Source;
use crate::source::domain::source_error::SourceError;
use crate::source::infrastructure::file_source::FileSource;
use crate::source::infrastructure::process_source::ProcessSource;
use crate::source::infrastructure::stream_source::StreamSource;

/// Any of the built-in sources, dispatched without boxing.
#[derive(Debug)]
pub enum InputSource {
    File(FileSource),
    Stream(StreamSource),
    Process(ProcessSource),
}

impl InputSource {
    pub fn file(path: impl Into<String>) -> Self {
        Self::File(FileSource::new(path))
    }

    pub fn stream(stream: impl Into<Stdio>) -> Self {
        Self::Stream(StreamSource::new(stream))
    }

    pub fn process<I, S>(command: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Process(ProcessSource::new(command, args))
    }

    fn as_source(&self) -> &dyn Source {
        match self {
            Self::File(s) => s,
            Self::Stream(s) => s,
            Self::Process(s) => s,
        }
    }

    fn as_source_mut(&mut self) -> &mut dyn Source {
        match self {
            Self::File(s) => s,
            Self::Stream(s) => s,
            Self::Process(s) => s,
        }
    }
}

impl Source for InputSource {
    fn arguments(&self) -> Vec<String> {
        self.as_source().arguments()
    }

    fn start(&mut self, parent: &mut ParentCommand) -> Result<(), SourceError> {
        self.as_source_mut().start(parent)
    }

    fn done(&mut self) {
        self.as_source_mut().done()
    }
}

impl From<FileSource> for InputSource {
    fn from(source: FileSource) -> Self {
        Self::File(source)
    }
}

impl From<StreamSource> for InputSource {
    fn from(source: StreamSource) -> Self {
        Self::Stream(source)
    }
}

impl From<ProcessSource> for InputSource {
    fn from(source: ProcessSource) -> Self {
        Self::Process(source)
    }
}
