//! Shared data models for the shotchain pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Generation jobs and their status snapshots
//! - Generation requests, continuity modes, and duration constraints
//! - Filename sanitization and clip naming
//! - Structured generation outcomes

pub mod job;
pub mod outcome;
pub mod request;

// Re-export common types
pub use job::{JobSnapshot, JobStatus, VideoJobId};
pub use outcome::GenerationOutcome;
pub use request::{
    clip_filename, sanitize_filename_hint, ContinuityMode, DurationConstraint, GenerationRequest,
    RequestError, FALLBACK_FILENAME_HINT, MAX_FILENAME_HINT_LEN,
};
