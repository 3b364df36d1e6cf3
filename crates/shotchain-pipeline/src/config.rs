//! Pipeline configuration.

use std::time::Duration;

use shotchain_models::DurationConstraint;

/// Lower bound on the poll interval in seconds.
pub const MIN_POLL_INTERVAL_SECS: u64 = 1;

/// Upper bound on the poll interval in seconds.
pub const MAX_POLL_INTERVAL_SECS: u64 = 30;

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Clip durations the active service accepts
    pub duration_constraint: DurationConstraint,
    /// Poll interval used when a request does not supply one
    pub default_poll_interval: Duration,
    /// Hard cap on status checks per job before giving up
    pub max_polls: u32,
    /// Output frame size requested from the service
    pub output_size: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            duration_constraint: DurationConstraint::default(),
            default_poll_interval: Duration::from_secs(5),
            max_polls: 60,
            output_size: "1280x720".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Create config from environment variables.
    ///
    /// `SHOT_DURATIONS` accepts either a comma-separated list of allowed
    /// clip lengths ("4,8,12") or an inclusive range ("1-60").
    pub fn from_env() -> Self {
        Self {
            duration_constraint: std::env::var("SHOT_DURATIONS")
                .ok()
                .and_then(|s| parse_duration_constraint(&s))
                .unwrap_or_default(),
            default_poll_interval: Duration::from_secs(
                std::env::var("SHOT_POLL_INTERVAL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            ),
            max_polls: std::env::var("SHOT_MAX_POLLS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(60),
            output_size: std::env::var("SHOT_OUTPUT_SIZE")
                .unwrap_or_else(|_| "1280x720".to_string()),
        }
    }

    /// Clamp a poll interval into the supported bounds.
    pub fn clamp_poll_interval(&self, interval: Duration) -> Duration {
        let secs = interval
            .as_secs()
            .clamp(MIN_POLL_INTERVAL_SECS, MAX_POLL_INTERVAL_SECS);
        Duration::from_secs(secs)
    }
}

/// Parse a duration constraint spec: "4,8,12" or "1-60".
///
/// Malformed input yields `None` so callers fall back to the default
/// rather than silently accepting a partial constraint.
fn parse_duration_constraint(raw: &str) -> Option<DurationConstraint> {
    let raw = raw.trim();
    if let Some((min, max)) = raw.split_once('-') {
        let min: u32 = min.trim().parse().ok()?;
        let max: u32 = max.trim().parse().ok()?;
        if min > max {
            return None;
        }
        return Some(DurationConstraint::Range { min, max });
    }

    let set = raw
        .split(',')
        .map(|s| s.trim().parse::<u32>().ok())
        .collect::<Option<Vec<u32>>>()?;
    if set.is_empty() {
        None
    } else {
        Some(DurationConstraint::FixedSet(set))
    }
}
