use std::process::{ExitStatus, Stdio};

use thiserror::Error;

use crate::process::parent_command::ParentCommand;
use crate::source::domain::source::Source;
use crate::source::domain::source_error::SourceError;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("input source failed to start: {0}")]
    Source(#[from] SourceError),
    #[error("failed to launch transcoder {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed waiting for transcoder {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// One transcoder invocation fed by a single source.
///
/// Drives the source lifecycle: arguments while building the command line,
/// `start` before launch, `done` exactly once after the transcoder exits or
/// as soon as any step fails. Dropping a session that never ran still
/// releases its source.
pub struct TranscodeSession {
    transcoder: String,
    source: Box<dyn Source>,
    input_args: Vec<String>,
    output_args: Vec<String>,
    stdout: Option<Stdio>,
    finished: bool,
}

impl TranscodeSession {
    pub fn new(transcoder: impl Into<String>, source: impl Source + 'static) -> Self {
        Self {
            transcoder: transcoder.into(),
            source: Box::new(source),
            input_args: Vec::new(),
            output_args: Vec::new(),
            stdout: None,
            finished: false,
        }
    }

    /// Arguments placed before the source's input tokens (e.g. `-hide_banner`).
    pub fn input_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.input_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Arguments placed after the source's input tokens (codecs, output).
    pub fn output_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output_args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn stdout(mut self, cfg: impl Into<Stdio>) -> Self {
        self.stdout = Some(cfg.into());
        self
    }

    /// Builds the transcoder command line without touching the source's
    /// resources.
    pub fn command(&self) -> ParentCommand {
        let mut cmd = ParentCommand::new(&self.transcoder);
        cmd.args(&self.input_args)
            .args(self.source.arguments())
            .args(&self.output_args);
        cmd
    }

    /// Launches the transcoder and blocks until it exits.
    pub fn run(mut self) -> Result<ExitStatus, SessionError> {
        let result = self.execute();
        self.finish();
        result
    }

    fn execute(&mut self) -> Result<ExitStatus, SessionError> {
        let mut cmd = self.command();
        if let Some(stdout) = self.stdout.take() {
            cmd.stdout(stdout);
        }
        log::debug!("Transcoder command: {cmd:?}");

        self.source.start(&mut cmd)?;

        let mut child = cmd.spawn().map_err(|source| SessionError::Launch {
            program: self.transcoder.clone(),
            source,
        })?;
        log::info!("Started {} (pid {})", self.transcoder, child.id());

        let status = child.wait().map_err(|source| SessionError::Wait {
            program: self.transcoder.clone(),
            source,
        })?;
        log::info!("{} exited: {status}", self.transcoder);
        Ok(status)
    }

    fn finish(&mut self) {
        if !self.finished {
            self.finished = true;
            self.source.done();
        }
    }
}

impl Drop for TranscodeSession {
    fn drop(&mut self) {
        self.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::infrastructure::file_source::FileSource;
    use crate::source::infrastructure::process_source::ProcessSource;
    use crate::source::infrastructure::stream_source::StreamSource;
    use std::fs::{self, File};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Records lifecycle calls; optionally fails `start`.
    struct CountingSource {
        starts: Arc<AtomicUsize>,
        dones: Arc<AtomicUsize>,
        fail_start: bool,
    }

    impl CountingSource {
        fn new(fail_start: bool) -> (Self, Arc<AtomicUsize>, Arc<AtomicUsize>) {
            let starts = Arc::new(AtomicUsize::new(0));
            let dones = Arc::new(AtomicUsize::new(0));
            let source = Self {
                starts: starts.clone(),
                dones: dones.clone(),
                fail_start,
            };
            (source, starts, dones)
        }
    }

    impl Source for CountingSource {
        fn arguments(&self) -> Vec<String> {
            vec!["-i".into(), "counted.ogg".into()]
        }

        fn start(&mut self, _parent: &mut ParentCommand) -> Result<(), SourceError> {
            self.starts.fetch_add(1, Ordering::SeqCst);
            if self.fail_start {
                Err(SourceError::Consumed)
            } else {
                Ok(())
            }
        }

        fn done(&mut self) {
            self.dones.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Fake transcoder: `sh -c 'cat "$2"' transcoder -i <input>` copies the
    /// input (a path, or stdin for "-") to stdout.
    #[cfg(unix)]
    fn cat_session(source: impl Source + 'static, out: File) -> TranscodeSession {
        TranscodeSession::new("sh", source)
            .input_args(["-c", "cat \"$2\"", "transcoder"])
            .stdout(out)
    }

    #[test]
    fn test_command_places_source_arguments_between_input_and_output() {
        let session = TranscodeSession::new("ffmpeg", FileSource::new("clip.ogg"))
            .input_args(["-hide_banner"])
            .output_args(["-f", "s16le", "-"]);
        let cmd = session.command();
        assert_eq!(cmd.program(), "ffmpeg");
        assert_eq!(
            cmd.arguments(),
            vec!["-hide_banner", "-i", "clip.ogg", "-f", "s16le", "-"]
        );
        assert!(!cmd.has_stdin());
    }

    #[test]
    fn test_start_failure_skips_launch_and_calls_done_once() {
        let (source, starts, dones) = CountingSource::new(true);
        let result = TranscodeSession::new("/nonexistent/transcoder", source).run();
        assert!(matches!(result, Err(SessionError::Source(SourceError::Consumed))));
        assert_eq!(starts.load(Ordering::SeqCst), 1);
        assert_eq!(dones.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_launch_failure_calls_done_once() {
        let (source, starts, dones) = CountingSource::new(false);
        let result = TranscodeSession::new("/nonexistent/transcoder", source).run();
        match result {
            Err(SessionError::Launch { program, .. }) => {
                assert_eq!(program, "/nonexistent/transcoder");
            }
            other => panic!("expected launch failure, got {other:?}"),
        }
        assert_eq!(starts.load(Ordering::SeqCst), 1);
        assert_eq!(dones.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_boxed_source_forwards_lifecycle() {
        let (source, starts, dones) = CountingSource::new(false);
        let boxed: Box<dyn Source> = Box::new(source);
        let session = TranscodeSession::new("/nonexistent/transcoder", boxed);
        assert_eq!(
            session.command().arguments(),
            vec!["-i", "counted.ogg"]
        );
        assert!(matches!(session.run(), Err(SessionError::Launch { .. })));
        assert_eq!(starts.load(Ordering::SeqCst), 1);
        assert_eq!(dones.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dropping_unrun_session_calls_done_once() {
        let (source, starts, dones) = CountingSource::new(false);
        let session = TranscodeSession::new("ffmpeg", source);
        let _ = session.command();
        drop(session);
        assert_eq!(starts.load(Ordering::SeqCst), 0);
        assert_eq!(dones.load(Ordering::SeqCst), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_run_with_file_source() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("clip.ogg");
        let output = dir.path().join("out.raw");
        fs::write(&input, b"file payload").unwrap();

        let source = FileSource::new(input.to_string_lossy());
        let status = cat_session(source, File::create(&output).unwrap())
            .run()
            .unwrap();
        assert!(status.success());
        assert_eq!(fs::read(&output).unwrap(), b"file payload");
    }

    #[cfg(unix)]
    #[test]
    fn test_run_with_stream_source() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("clip.ogg");
        let output = dir.path().join("out.raw");
        fs::write(&input, b"stream payload").unwrap();

        let source = StreamSource::new(File::open(&input).unwrap());
        let status = cat_session(source, File::create(&output).unwrap())
            .run()
            .unwrap();
        assert!(status.success());
        assert_eq!(fs::read(&output).unwrap(), b"stream payload");
    }

    #[cfg(unix)]
    #[test]
    fn test_run_with_process_source() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.raw");

        let source = ProcessSource::new("echo", ["hello"]);
        let status = cat_session(source, File::create(&output).unwrap())
            .run()
            .unwrap();
        assert!(status.success());
        assert_eq!(fs::read(&output).unwrap(), b"hello\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_returned_not_raised() {
        let status = TranscodeSession::new("sh", FileSource::new("clip.ogg"))
            .input_args(["-c", "exit 3", "transcoder"])
            .run()
            .unwrap();
        assert_eq!(status.code(), Some(3));
    }

    #[cfg(unix)]
    #[test]
    fn test_helper_launch_failure_surfaces_as_source_error() {
        let source = ProcessSource::new("/nonexistent/helper", Vec::<String>::new());
        let result = TranscodeSession::new("cat", source).run();
        assert!(matches!(
            result,
            Err(SessionError::Source(SourceError::Launch { .. }))
        ));
    }
}
