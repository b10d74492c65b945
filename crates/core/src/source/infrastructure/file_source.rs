use crate::process::parent_command::ParentCommand;
use crate::shared::constants::INPUT_FLAG;
use crate::source::domain::source::Source;
use crate::source::domain::source_error::SourceError;

/// Input already resident at a filesystem path. Owns no resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    path: String,
}

impl FileSource {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Source for FileSource {
    fn arguments(&self) -> Vec<String> {
        vec![INPUT_FLAG.to_string(), self.path.clone()]
    }

    fn start(&mut self, _parent: &mut ParentCommand) -> Result<(), SourceError> {
        Ok(())
    }

    fn done(&mut self) {}
}
