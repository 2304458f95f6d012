use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use records::{
    Claim, ClaimId, ClaimStatus, FoundItemId, FoundItemRecord, FoundItemStatus, LostItemId,
    LostItemReport, NewClaim, NewFoundItem, NewLostItem, StoredSecrets, UserId,
};
use tracing::debug;

use crate::backend::{Clock, ItemStore, StoreCounts, SystemClock};
use crate::StoreError;

/// An in-memory store using one `RwLock` per table.
///
/// Ids start at 1 and are allocated while the table's write lock is held, so
/// id order always matches insertion order.
pub struct InMemoryStore {
    lost: RwLock<BTreeMap<LostItemId, LostItemReport>>,
    found: RwLock<BTreeMap<FoundItemId, FoundItemRecord>>,
    claims: RwLock<BTreeMap<ClaimId, Claim>>,
    next_lost_id: AtomicU64,
    next_found_id: AtomicU64,
    next_claim_id: AtomicU64,
    clock: Box<dyn Clock>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            lost: RwLock::new(BTreeMap::new()),
            found: RwLock::new(BTreeMap::new()),
            claims: RwLock::new(BTreeMap::new()),
            next_lost_id: AtomicU64::new(1),
            next_found_id: AtomicU64::new(1),
            next_claim_id: AtomicU64::new(1),
            clock: Box::new(clock),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, StoreError> {
    lock.read().map_err(|_| StoreError::backend("poisoned lock"))
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, StoreError> {
    lock.write().map_err(|_| StoreError::backend("poisoned lock"))
}

fn newest_first(mut reports: Vec<LostItemReport>) -> Vec<LostItemReport> {
    reports.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    reports
}

impl ItemStore for InMemoryStore {
    fn insert_lost_item(&self, item: NewLostItem) -> Result<LostItemReport, StoreError> {
        let mut guard = write(&self.lost)?;
        let id = self.next_lost_id.fetch_add(1, Ordering::SeqCst);
        let report = item.into_report(id, self.clock.now());
        guard.insert(id, report.clone());
        debug!(lost_item_id = id, reporter_id = report.reporter_id, "lost item stored");
        Ok(report)
    }

    fn lost_item(&self, id: LostItemId) -> Result<Option<LostItemReport>, StoreError> {
        Ok(read(&self.lost)?.get(&id).cloned())
    }

    fn lost_item_secrets(&self, id: LostItemId) -> Result<Option<StoredSecrets>, StoreError> {
        Ok(read(&self.lost)?.get(&id).map(|r| r.secrets.clone()))
    }

    fn list_lost_items(&self) -> Result<Vec<LostItemReport>, StoreError> {
        let reports = read(&self.lost)?.values().cloned().collect();
        Ok(newest_first(reports))
    }

    fn lost_items_by_reporter(
        &self,
        reporter_id: UserId,
    ) -> Result<Vec<LostItemReport>, StoreError> {
        let reports = read(&self.lost)?
            .values()
            .filter(|r| r.reporter_id == reporter_id)
            .cloned()
            .collect();
        Ok(newest_first(reports))
    }

    fn insert_found_item(&self, item: NewFoundItem) -> Result<FoundItemRecord, StoreError> {
        let mut guard = write(&self.found)?;
        let id = self.next_found_id.fetch_add(1, Ordering::SeqCst);
        let record = item.into_record(id, self.clock.now());
        guard.insert(id, record.clone());
        debug!(found_item_id = id, admin_id = record.admin_id, "found item stored");
        Ok(record)
    }

    fn found_item(&self, id: FoundItemId) -> Result<Option<FoundItemRecord>, StoreError> {
        Ok(read(&self.found)?.get(&id).cloned())
    }

    fn available_found_items(&self) -> Result<Vec<FoundItemRecord>, StoreError> {
        let mut items: Vec<_> = read(&self.found)?
            .values()
            .filter(|r| r.status.is_available())
            .cloned()
            .collect();
        // `None` sorts last when descending.
        items.sort_by(|a, b| b.found_time.cmp(&a.found_time).then(b.id.cmp(&a.id)));
        Ok(items)
    }

    fn set_found_item_status(
        &self,
        id: FoundItemId,
        status: FoundItemStatus,
    ) -> Result<Option<FoundItemRecord>, StoreError> {
        let mut guard = write(&self.found)?;
        Ok(guard.get_mut(&id).map(|record| {
            record.status = status;
            debug!(found_item_id = id, status = status.as_str(), "found item status changed");
            record.clone()
        }))
    }

    fn insert_claim(&self, claim: NewClaim, status: ClaimStatus) -> Result<Claim, StoreError> {
        let mut guard = write(&self.claims)?;
        let id = self.next_claim_id.fetch_add(1, Ordering::SeqCst);
        let claim = claim.into_claim(id, status, self.clock.now());
        guard.insert(id, claim.clone());
        debug!(claim_id = id, status = status.as_str(), "claim stored");
        Ok(claim)
    }

    fn claims_for_found_item(&self, found_item_id: FoundItemId) -> Result<Vec<Claim>, StoreError> {
        Ok(read(&self.claims)?
            .values()
            .filter(|c| c.found_item_id == found_item_id)
            .cloned()
            .collect())
    }

    fn counts(&self) -> Result<StoreCounts, StoreError> {
        let found = read(&self.found)?;
        Ok(StoreCounts {
            lost_items: read(&self.lost)?.len(),
            found_items: found.len(),
            available_found_items: found.values().filter(|r| r.status.is_available()).count(),
            claims: read(&self.claims)?.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::SteppingClock;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use records::VerificationInputs;

    fn at(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, h, 0, 0).unwrap()
    }

    fn store() -> InMemoryStore {
        InMemoryStore::with_clock(SteppingClock::new(at(0), Duration::minutes(1)))
    }

    fn lost(reporter_id: u64, item_type: &str) -> NewLostItem {
        NewLostItem {
            reporter_id,
            item_type: item_type.into(),
            lost_location: "library".into(),
            secrets: StoredSecrets::new("blue42", "room9"),
            ..Default::default()
        }
    }

    fn found(item_type: &str, hour: Option<u32>) -> NewFoundItem {
        NewFoundItem {
            admin_id: 1,
            item_type: item_type.into(),
            found_location: "gym".into(),
            found_time: hour.map(at),
            ..Default::default()
        }
    }

    #[test]
    fn ids_are_sequential_per_table() {
        let store = store();
        assert_eq!(store.insert_lost_item(lost(1, "bag")).unwrap().id, 1);
        assert_eq!(store.insert_lost_item(lost(1, "hat")).unwrap().id, 2);
        assert_eq!(store.insert_found_item(found("bag", Some(3))).unwrap().id, 1);
    }

    #[test]
    fn lost_items_listed_newest_first() {
        let store = store();
        store.insert_lost_item(lost(1, "bag")).unwrap();
        store.insert_lost_item(lost(2, "hat")).unwrap();
        store.insert_lost_item(lost(1, "pen")).unwrap();

        let all: Vec<_> = store.list_lost_items().unwrap().iter().map(|r| r.id).collect();
        assert_eq!(all, vec![3, 2, 1]);

        let mine: Vec<_> = store
            .lost_items_by_reporter(1)
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(mine, vec![3, 1]);
    }

    #[test]
    fn equal_timestamps_fall_back_to_id() {
        let store = InMemoryStore::with_clock(SteppingClock::fixed(at(5)));
        store.insert_lost_item(lost(1, "bag")).unwrap();
        store.insert_lost_item(lost(1, "hat")).unwrap();
        let ids: Vec<_> = store.list_lost_items().unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn secrets_are_fetchable_by_id_only() {
        let store = store();
        let report = store.insert_lost_item(lost(1, "bag")).unwrap();
        assert_eq!(
            store.lost_item_secrets(report.id).unwrap(),
            Some(StoredSecrets::new("blue42", "room9"))
        );
        assert_eq!(store.lost_item_secrets(99).unwrap(), None);
        assert!(store.lost_item(99).unwrap().is_none());
    }

    #[test]
    fn available_items_filtered_and_ordered_by_found_time() {
        let store = store();
        store.insert_found_item(found("a", Some(8))).unwrap();
        store.insert_found_item(found("b", Some(12))).unwrap();
        store.insert_found_item(found("c", Some(10))).unwrap();
        store.insert_found_item(found("d", None)).unwrap();
        store
            .set_found_item_status(3, FoundItemStatus::Claimed)
            .unwrap()
            .expect("record exists");

        let ids: Vec<_> = store
            .available_found_items()
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![2, 1, 4]);

        let counts = store.counts().unwrap();
        assert_eq!(counts.found_items, 4);
        assert_eq!(counts.available_found_items, 3);
    }

    #[test]
    fn unknown_found_item_status_change_is_none() {
        let store = store();
        assert!(store
            .set_found_item_status(7, FoundItemStatus::Returned)
            .unwrap()
            .is_none());
    }

    #[test]
    fn claims_keep_status_and_submission_order() {
        let store = store();
        let new_claim = |claimer_id| NewClaim {
            lost_item_id: 1,
            found_item_id: 5,
            claimer_id,
            inputs: VerificationInputs::new("blue42", "room9"),
        };
        store
            .insert_claim(new_claim(10), ClaimStatus::Verified)
            .unwrap();
        store
            .insert_claim(new_claim(11), ClaimStatus::Pending)
            .unwrap();

        let claims = store.claims_for_found_item(5).unwrap();
        assert_eq!(claims.len(), 2);
        assert_eq!(claims[0].claimer_id, 10);
        assert_eq!(claims[0].status, ClaimStatus::Verified);
        assert_eq!(claims[1].status, ClaimStatus::Pending);
        assert!(store.claims_for_found_item(6).unwrap().is_empty());
    }

    #[test]
    fn created_at_comes_from_clock() {
        let store = store();
        let first = store.insert_lost_item(lost(1, "bag")).unwrap();
        let second = store.insert_lost_item(lost(1, "hat")).unwrap();
        assert_eq!(first.created_at, at(0));
        assert_eq!(second.created_at, at(0) + Duration::minutes(1));
    }
}
