pub mod transcode_session;
