use std::time::Instant;

use records::{FoundItemRecord, LostItemReport};
use tracing::{debug, error, trace};

use crate::metrics::metrics_recorder;
use crate::types::{MatchConfig, MatchError, MatchExplanation, MatchResult, MATCH_THRESHOLD};


/// Ranks found items against a lost-item report.
///
/// Stateless apart from its configuration, so one instance can be shared
/// across threads and requests.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    config: MatchConfig,
}

impl Matcher {
    /// Construct a matcher with an explicit, validated configuration.
    pub fn new(config: MatchConfig) -> Result<Self, MatchError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Score every available found item, drop those under the threshold, and
    /// return the rest ordered by score descending.
    ///
    /// Records whose status is not `available` are skipped regardless of the
    /// caller's own filtering. Equal scores keep their input order.
    pub fn find_matches(
        &self,
        lost: Option<&LostItemReport>,
        found_items: &[FoundItemRecord],
    ) -> Result<Vec<MatchResult>, MatchError> {
        let Some(lost) = lost else {
            error!("find_matches called without a resolved lost item");
            return Err(MatchError::InvalidArgument(
                "lost item report is required".into(),
            ));
        };

        Ok(self.rank(lost, found_items))
    }

    fn rank(&self, lost: &LostItemReport, found_items: &[FoundItemRecord]) -> Vec<MatchResult> {
        let start = Instant::now();
        let query = NormalizedReport::new(lost);

        let mut hits = Vec::new();
        for found in found_items {
            if !found.status.is_available() {
                debug!(
                    found_item_id = found.id,
                    status = found.status.as_str(),
                    "skipping unavailable found item"
                );
                continue;
            }

            let explanation = query.explain(lost, found);
            let score = explanation.score();
            trace!(
                lost_item_id = lost.id,
                found_item_id = found.id,
                score,
                "scored candidate"
            );

            if score >= MATCH_THRESHOLD {
                hits.push(MatchResult {
                    found_item: found.clone(),
                    score,
                    explanation: self.config.explain.then_some(explanation),
                });
            }
        }

        // `sort_by` is stable, which keeps input order among equal scores.
        hits.sort_by(|a, b| b.score.cmp(&a.score));
        if let Some(max) = self.config.max_results {
            hits.truncate(max);
        }

        let latency = start.elapsed();
        debug!(
            lost_item_id = lost.id,
            considered = found_items.len(),
            matches = hits.len(),
            latency_micros = latency.as_micros() as u64,
            "match complete"
        );
        if let Some(recorder) = metrics_recorder() {
            recorder.record_match(latency, found_items.len(), hits.len());
        }

        hits
    }
}

/// Rank `found_items` against `lost` with the default configuration.
pub fn find_matches(lost: &LostItemReport, found_items: &[FoundItemRecord]) -> Vec<MatchResult> {
    Matcher::default().rank(lost, found_items)
}

/// Evaluate the four scoring factors for one pair.
///
/// No threshold and no status check: this is the raw scoring function.
pub fn score_found_item(lost: &LostItemReport, found: &FoundItemRecord) -> MatchExplanation {
    NormalizedReport::new(lost).explain(lost, found)
}

/// Lost-report fields normalized once per query instead of once per candidate.
struct NormalizedReport {
    item_type: Option<String>,
    color: Option<String>,
    location: Option<String>,
}

impl NormalizedReport {
    fn new(lost: &LostItemReport) -> Self {
        Self {
            item_type: normalize(Some(&lost.item_type)),
            color: normalize(lost.color.as_deref()),
            location: normalize(Some(&lost.lost_location)),
        }
    }

    fn explain(&self, lost: &LostItemReport, found: &FoundItemRecord) -> MatchExplanation {
        let found_type = normalize(Some(&found.item_type));
        let found_color = normalize(found.color.as_deref());
        let found_location = normalize(Some(&found.found_location));

        MatchExplanation {
            type_match: equal(&self.item_type, &found_type),
            color_match: equal(&self.color, &found_color),
            location_match: contains_either(&self.location, &found_location),
            time_overlap: within_window(lost, found),
        }
    }
}

/// Trim and lowercase. Empty values collapse to `None` so they never match.
fn normalize(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

fn equal(a: &Option<String>, b: &Option<String>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a == b)
}

fn contains_either(a: &Option<String>, b: &Option<String>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.contains(b.as_str()) || b.contains(a.as_str()),
        _ => false,
    }
}

// Both bounds are required; a half-open window contributes nothing.
fn within_window(lost: &LostItemReport, found: &FoundItemRecord) -> bool {
    match (lost.lost_time_from, lost.lost_time_to, found.found_time) {
        (Some(from), Some(to), Some(at)) => from <= at && at <= to,
        _ => false,
    }
}
