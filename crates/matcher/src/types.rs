use records::FoundItemRecord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Points for equal item types.
pub const TYPE_WEIGHT: u8 = 50;
/// Points for equal colors.
pub const COLOR_WEIGHT: u8 = 20;
/// Points when either location contains the other.
pub const LOCATION_WEIGHT: u8 = 20;
/// Points when the found time falls inside the lost window.
pub const TIME_WEIGHT: u8 = 10;
/// Minimum total score for a found item to be returned as a candidate.
pub const MATCH_THRESHOLD: u8 = 60;
/// Highest attainable score.
pub const MAX_SCORE: u8 = TYPE_WEIGHT + COLOR_WEIGHT + LOCATION_WEIGHT + TIME_WEIGHT;

/// Configuration for a single match request.
///
/// Weights and the acceptance threshold are fixed constants; the knobs here
/// only shape the response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct MatchConfig {
    /// Maximum number of candidates to return. `None` returns every candidate
    /// at or above [`MATCH_THRESHOLD`].
    #[serde(default)]
    pub max_results: Option<usize>,
    /// Attach the per-factor [`MatchExplanation`] to each result.
    #[serde(default)]
    pub explain: bool,
}

impl MatchConfig {
    /// Validate the configuration for a single request.
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.max_results == Some(0) {
            return Err(MatchError::InvalidConfig(
                "max_results must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

/// Which scoring factors were satisfied for one lost/found pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct MatchExplanation {
    pub type_match: bool,
    pub color_match: bool,
    pub location_match: bool,
    pub time_overlap: bool,
}

impl MatchExplanation {
    /// Additive score in `[0, MAX_SCORE]`.
    pub fn score(&self) -> u8 {
        let mut score = 0;
        if self.type_match {
            score += TYPE_WEIGHT;
        }
        if self.color_match {
            score += COLOR_WEIGHT;
        }
        if self.location_match {
            score += LOCATION_WEIGHT;
        }
        if self.time_overlap {
            score += TIME_WEIGHT;
        }
        score
    }
}

/// A single ranked candidate returned by the matcher.
///
/// Ephemeral: recomputed on every query and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchResult {
    pub found_item: FoundItemRecord,
    pub score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<MatchExplanation>,
}

/// Errors produced by the matching layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// A required entity was absent. This is a caller bug, not a user error.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Invalid per-request configuration.
    #[error("invalid match config: {0}")]
    InvalidConfig(String),
}
