//! FFmpeg CLI wrapper for the shotchain pipeline.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building
//! - Frame counting via FFprobe
//! - Last-frame extraction for continuity chaining
//! - Stream-copy concatenation of ordered clips
//!
//! Tool absence is a recoverable condition throughout: every operation
//! probes for its binary first and reports a tagged error (or, for
//! continuity extraction, degrades to "no frame") instead of crashing.

pub mod command;
pub mod concat;
pub mod error;
pub mod frame;
pub mod probe;
pub mod transcoder;

pub use command::FfmpegCommand;
pub use concat::{DEFAULT_OUTPUT_NAME, MANIFEST_NAME};
pub use error::{MediaError, MediaResult};
pub use frame::last_frame_path;
pub use transcoder::Transcoder;
