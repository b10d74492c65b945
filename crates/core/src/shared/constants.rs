/// Transcoder flag announcing that the next token names the input.
pub const INPUT_FLAG: &str = "-i";

/// Input name telling the transcoder to read its own standard input.
pub const STDIN_SENTINEL: &str = "-";

pub const DEFAULT_TRANSCODER: &str = "ffmpeg";
