use chrono::{DateTime, Utc};
use records::{
    Claim, ClaimStatus, FoundItemId, FoundItemRecord, FoundItemStatus, LostItemId, LostItemReport,
    NewClaim, NewFoundItem, NewLostItem, StoredSecrets, UserId,
};
use serde::{Deserialize, Serialize};

use crate::memory::InMemoryStore;
use crate::StoreError;

/// Row counts per table, reported by readiness probes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreCounts {
    pub lost_items: usize,
    pub found_items: usize,
    pub available_found_items: usize,
    pub claims: usize,
}

/// Trait for the record store behind the service.
///
/// Payloads are expected to be validated before they reach the store; the
/// store only assigns ids, timestamps, and initial statuses.
pub trait ItemStore: Send + Sync {
    /// Persist a new report with status `open`.
    fn insert_lost_item(&self, item: NewLostItem) -> Result<LostItemReport, StoreError>;
    fn lost_item(&self, id: LostItemId) -> Result<Option<LostItemReport>, StoreError>;
    /// Only the verification pair of a report, for claim adjudication.
    fn lost_item_secrets(&self, id: LostItemId) -> Result<Option<StoredSecrets>, StoreError>;
    /// All reports, newest first.
    fn list_lost_items(&self) -> Result<Vec<LostItemReport>, StoreError>;
    /// One reporter's reports, newest first.
    fn lost_items_by_reporter(&self, reporter_id: UserId)
        -> Result<Vec<LostItemReport>, StoreError>;

    /// Persist a new found item with status `available`.
    fn insert_found_item(&self, item: NewFoundItem) -> Result<FoundItemRecord, StoreError>;
    fn found_item(&self, id: FoundItemId) -> Result<Option<FoundItemRecord>, StoreError>;
    /// Found items with status `available`, most recently found first.
    fn available_found_items(&self) -> Result<Vec<FoundItemRecord>, StoreError>;
    /// Move a found item to another status. Returns the updated record.
    fn set_found_item_status(
        &self,
        id: FoundItemId,
        status: FoundItemStatus,
    ) -> Result<Option<FoundItemRecord>, StoreError>;

    /// Persist a claim with the status decided by the adjudicator.
    fn insert_claim(&self, claim: NewClaim, status: ClaimStatus) -> Result<Claim, StoreError>;
    /// Claims against one found item, in submission order.
    fn claims_for_found_item(&self, found_item_id: FoundItemId) -> Result<Vec<Claim>, StoreError>;

    fn counts(&self) -> Result<StoreCounts, StoreError>;
}

/// Source of `created_at` timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Deterministic clock for unit tests: starts at `start` and advances by
/// `step` on every read.
#[cfg(test)]
#[derive(Debug)]
pub(crate) struct SteppingClock {
    start: DateTime<Utc>,
    step: chrono::Duration,
    ticks: std::sync::atomic::AtomicU32,
}

#[cfg(test)]
impl SteppingClock {
    pub(crate) fn new(start: DateTime<Utc>, step: chrono::Duration) -> Self {
        Self {
            start,
            step,
            ticks: std::sync::atomic::AtomicU32::new(0),
        }
    }

    /// A clock that never moves.
    pub(crate) fn fixed(at: DateTime<Utc>) -> Self {
        Self::new(at, chrono::Duration::zero())
    }
}

#[cfg(test)]
impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.start + self.step * i32::try_from(tick).unwrap_or(i32::MAX)
    }
}

/// Configuration for selecting and building a store.
///
/// ```
/// use store::StoreConfig;
///
/// let store = StoreConfig::in_memory().build().unwrap();
/// assert_eq!(store.counts().unwrap().lost_items, 0);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StoreConfig {
    /// Process-local maps. Contents are lost on restart.
    #[default]
    InMemory,
}

impl StoreConfig {
    pub fn in_memory() -> Self {
        StoreConfig::InMemory
    }

    /// Build the store described by this configuration.
    pub fn build(&self) -> Result<Box<dyn ItemStore>, StoreError> {
        match self {
            StoreConfig::InMemory => Ok(Box::new(InMemoryStore::new())),
        }
    }
}
