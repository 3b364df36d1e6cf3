//! Generation request parameters and their validation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Fallback used when sanitization leaves nothing of the filename hint.
pub const FALLBACK_FILENAME_HINT: &str = "shot";

/// Maximum accepted length for a filename hint, longer hints are truncated.
pub const MAX_FILENAME_HINT_LEN: usize = 64;

/// Errors produced by request validation.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("prompt must not be empty")]
    InvalidPrompt,

    #[error("duration of {seconds}s is not allowed ({allowed})")]
    InvalidDuration { seconds: u32, allowed: String },
}

/// How a generation call links to the previous clip in the sequence.
///
/// The two chaining protocols are mutually exclusive evolutions of the same
/// idea; a session picks one per call rather than inferring it from flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContinuityMode {
    /// Standalone clip, no link to prior output
    #[default]
    None,
    /// Derive from the previous completed job by id
    Remix,
    /// Anchor on a frame extracted from the end of the previous clip
    ReferenceFrame,
}

impl ContinuityMode {
    pub fn is_remix(&self) -> bool {
        matches!(self, ContinuityMode::Remix)
    }
}

/// Allowed clip durations for the active service.
///
/// Earlier service generations accept any duration in a range; later ones
/// only a fixed set of lengths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationConstraint {
    /// Only the listed durations are accepted
    FixedSet(Vec<u32>),
    /// Any duration in the inclusive range is accepted
    Range { min: u32, max: u32 },
}

impl Default for DurationConstraint {
    fn default() -> Self {
        Self::FixedSet(vec![4, 8, 12])
    }
}

impl DurationConstraint {
    /// Check whether a duration in seconds satisfies the constraint.
    pub fn allows(&self, seconds: u32) -> bool {
        match self {
            DurationConstraint::FixedSet(set) => set.contains(&seconds),
            DurationConstraint::Range { min, max } => (*min..=*max).contains(&seconds),
        }
    }
}

impl fmt::Display for DurationConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationConstraint::FixedSet(set) => {
                let listed: Vec<String> = set.iter().map(|s| s.to_string()).collect();
                write!(f, "one of {{{}}} seconds", listed.join(", "))
            }
            DurationConstraint::Range { min, max } => {
                write!(f, "between {} and {} seconds", min, max)
            }
        }
    }
}

/// Parameters for one generation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Scene description, or for chained shots the change from the prior shot
    pub prompt: String,

    /// Desired clip length in seconds
    pub seconds: u32,

    /// Continuity protocol for this call
    #[serde(default)]
    pub mode: ContinuityMode,

    /// Seconds between status checks; the pipeline clamps this to its bounds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll_interval: Option<Duration>,

    /// Prefix for the generated file name
    #[serde(default)]
    pub filename_hint: String,
}

impl GenerationRequest {
    /// Create a request with default continuity and polling settings.
    pub fn new(prompt: impl Into<String>, seconds: u32) -> Self {
        Self {
            prompt: prompt.into(),
            seconds,
            mode: ContinuityMode::default(),
            poll_interval: None,
            filename_hint: String::new(),
        }
    }

    /// Set the continuity mode.
    pub fn with_mode(mut self, mode: ContinuityMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    /// Set the filename hint.
    pub fn with_filename_hint(mut self, hint: impl Into<String>) -> Self {
        self.filename_hint = hint.into();
        self
    }

    /// Prompt with surrounding whitespace removed.
    pub fn trimmed_prompt(&self) -> &str {
        self.prompt.trim()
    }

    /// Validate prompt and duration against the active constraint.
    pub fn validate(&self, constraint: &DurationConstraint) -> Result<(), RequestError> {
        if self.trimmed_prompt().is_empty() {
            return Err(RequestError::InvalidPrompt);
        }
        if !constraint.allows(self.seconds) {
            return Err(RequestError::InvalidDuration {
                seconds: self.seconds,
                allowed: constraint.to_string(),
            });
        }
        Ok(())
    }
}

/// Reduce a filename hint to a safe identifier fragment.
///
/// Keeps alphanumerics, hyphens, and underscores; everything else becomes an
/// underscore. An empty result falls back to [`FALLBACK_FILENAME_HINT`].
pub fn sanitize_filename_hint(hint: &str) -> String {
    let cleaned: String = hint
        .trim()
        .chars()
        .take(MAX_FILENAME_HINT_LEN)
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() {
        FALLBACK_FILENAME_HINT.to_string()
    } else {
        cleaned
    }
}

/// Compose a unique clip file name from a hint.
///
/// The UTC timestamp approximates chronological order under lexicographic
/// sorting; the random suffix disambiguates calls within the same second.
pub fn clip_filename(hint: &str, remix: bool) -> String {
    let sanitized = sanitize_filename_hint(hint);
    let timestamp = chrono::Utc::now().format("%Y%m%d-%H%M%S");
    let disambiguator = &uuid::Uuid::new_v4().simple().to_string()[..6];
    let prefix = if remix { "remix_" } else { "" };
    format!("{prefix}{sanitized}-{timestamp}-{disambiguator}.mp4")
}
