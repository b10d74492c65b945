use std::process::{self, Stdio};

use clap::Parser;

use pipefeed_core::pipeline::transcode_session::TranscodeSession;
use pipefeed_core::shared::constants::DEFAULT_TRANSCODER;
use pipefeed_core::source::infrastructure::input_source::InputSource;

/// Run a transcoder fed from a file, this process's stdin, or a helper command.
#[derive(Parser, Debug)]
#[command(name = "pipefeed")]
struct Cli {
    /// Input file handed to the transcoder by path.
    #[arg(long)]
    file: Option<String>,

    /// Forward this process's standard input to the transcoder.
    #[arg(long)]
    stdin: bool,

    /// Helper command whose standard output feeds the transcoder.
    #[arg(long)]
    exec: Option<String>,

    /// Argument for the --exec helper (repeatable).
    #[arg(long = "exec-arg", allow_hyphen_values = true)]
    exec_args: Vec<String>,

    /// Transcoder program.
    #[arg(long, default_value = DEFAULT_TRANSCODER)]
    transcoder: String,

    /// Transcoder argument placed before the input (repeatable).
    #[arg(long = "input-arg", allow_hyphen_values = true)]
    input_args: Vec<String>,

    /// Transcoder arguments placed after the input, given after `--`.
    #[arg(last = true)]
    output_args: Vec<String>,
}

fn main() {
    env_logger::init();

    match run() {
        Ok(0) => {}
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

/// Returns the exit code to report.
fn run() -> Result<i32, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let source = build_source(&cli);
    let session = TranscodeSession::new(cli.transcoder.clone(), source)
        .input_args(cli.input_args)
        .output_args(cli.output_args)
        .stdout(Stdio::inherit());

    let status = session.run()?;
    if status.success() {
        Ok(0)
    } else {
        log::warn!("{} exited with {status}", cli.transcoder);
        Ok(status.code().unwrap_or(1))
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let chosen = [cli.file.is_some(), cli.stdin, cli.exec.is_some()]
        .iter()
        .filter(|&&set| set)
        .count();
    if chosen != 1 {
        return Err("Exactly one of --file, --stdin or --exec is required".into());
    }
    if !cli.exec_args.is_empty() && cli.exec.is_none() {
        return Err("--exec-arg requires --exec".into());
    }
    if let Some(file) = &cli.file {
        if file.is_empty() {
            return Err("--file must not be empty".into());
        }
    }
    if cli.exec.as_deref() == Some("") {
        return Err("--exec must not be empty".into());
    }
    if cli.transcoder.is_empty() {
        return Err("--transcoder must not be empty".into());
    }
    Ok(())
}

fn build_source(cli: &Cli) -> InputSource {
    if let Some(file) = &cli.file {
        InputSource::file(file.clone())
    } else if let Some(exec) = &cli.exec {
        InputSource::process(exec.clone(), cli.exec_args.clone())
    } else {
        InputSource::stream(Stdio::inherit())
    }
}
