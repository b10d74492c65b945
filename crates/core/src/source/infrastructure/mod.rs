pub mod file_source;
pub mod input_source;
pub mod os_pipe_factory;
pub mod process_source;
pub mod stream_source;
