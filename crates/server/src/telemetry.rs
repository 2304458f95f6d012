//! Prometheus wiring for the matcher hook and claim verdicts.

use matcher::MatchMetrics;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use records::ClaimStatus;
use std::time::Duration;

pub const MATCH_REQUESTS: &str = "lostfound_match_requests_total";
pub const MATCH_CANDIDATES: &str = "lostfound_match_candidates";
pub const MATCH_HITS: &str = "lostfound_match_hits";
pub const MATCH_LATENCY: &str = "lostfound_match_latency_seconds";
pub const CLAIMS: &str = "lostfound_claims_total";

/// Install the global Prometheus recorder and register metric descriptions.
pub fn install_recorder() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    describe_counter!(MATCH_REQUESTS, "Number of match requests served");
    describe_histogram!(MATCH_CANDIDATES, "Found items considered per match request");
    describe_histogram!(MATCH_HITS, "Matches at or above the threshold per request");
    describe_histogram!(MATCH_LATENCY, "Time spent scoring one match request");
    describe_counter!(CLAIMS, "Claims submitted, labelled by initial status");
    Ok(handle)
}

/// [`MatchMetrics`] backed by the `metrics` facade.
#[derive(Debug, Default)]
pub struct PrometheusMatchMetrics;

impl MatchMetrics for PrometheusMatchMetrics {
    fn record_match(&self, latency: Duration, considered: usize, hit_count: usize) {
        counter!(MATCH_REQUESTS).increment(1);
        histogram!(MATCH_CANDIDATES).record(considered as f64);
        histogram!(MATCH_HITS).record(hit_count as f64);
        histogram!(MATCH_LATENCY).record(latency.as_secs_f64());
    }
}

pub fn record_claim(status: ClaimStatus) {
    counter!(CLAIMS, "status" => status.as_str()).increment(1);
}
