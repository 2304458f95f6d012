//! Concurrency and thread safety tests for the store and matcher

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use chrono::{TimeZone, Utc};
use lostfound::{
    find_matches_for_lost_item, log_found_item, report_lost_item, submit_claim, InMemoryStore,
    ItemStore, Matcher, NewClaim, NewFoundItem, NewLostItem, StoredSecrets, VerificationInputs,
};

fn report(reporter_id: u64) -> NewLostItem {
    NewLostItem {
        reporter_id,
        item_type: "Water bottle".into(),
        color: Some("Green".into()),
        lost_location: "Stadium".into(),
        secrets: StoredSecrets::new("sticker", "dent"),
        ..Default::default()
    }
}

#[test]
fn concurrent_inserts_get_unique_ids() {
    let store = Arc::new(InMemoryStore::new());

    let handles: Vec<_> = (1..=8)
        .map(|reporter| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                (0..25)
                    .map(|_| report_lost_item(store.as_ref(), report(reporter)).unwrap().id)
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let ids: Vec<u64> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    let unique: HashSet<_> = ids.iter().copied().collect();
    assert_eq!(ids.len(), 200);
    assert_eq!(unique.len(), 200);
    assert_eq!(unique.iter().max(), Some(&200));
    assert_eq!(store.lost_items_by_reporter(3).unwrap().len(), 25);
}

#[test]
fn matching_runs_alongside_writers() {
    let store = Arc::new(InMemoryStore::new());
    let lost_id = report_lost_item(store.as_ref(), report(1)).unwrap().id;
    let matcher = Arc::new(Matcher::default());
    let found_time = Utc.with_ymd_and_hms(2024, 9, 1, 12, 0, 0).unwrap();

    let writer = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for _ in 0..50 {
                log_found_item(
                    store.as_ref(),
                    NewFoundItem {
                        admin_id: 2,
                        item_type: "water bottle".into(),
                        color: Some("green".into()),
                        found_location: "Stadium".into(),
                        found_time: Some(found_time),
                        ..Default::default()
                    },
                )
                .unwrap();
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            let matcher = Arc::clone(&matcher);
            thread::spawn(move || {
                for _ in 0..50 {
                    let matches =
                        find_matches_for_lost_item(store.as_ref(), &matcher, lost_id).unwrap();
                    assert!(matches.iter().all(|m| m.score == 90));
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }

    let matches = find_matches_for_lost_item(store.as_ref(), &matcher, lost_id).unwrap();
    assert_eq!(matches.len(), 50);
}

#[test]
fn concurrent_claims_are_all_recorded() {
    let store = Arc::new(InMemoryStore::new());
    let lost_id = report_lost_item(store.as_ref(), report(1)).unwrap().id;

    let handles: Vec<_> = (1..=10u64)
        .map(|claimer_id| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let inputs = if claimer_id % 2 == 0 {
                    VerificationInputs::new("sticker", "dent")
                } else {
                    VerificationInputs::new("sticker", "scratch")
                };
                submit_claim(
                    store.as_ref(),
                    NewClaim {
                        lost_item_id: lost_id,
                        found_item_id: 1,
                        claimer_id,
                        inputs,
                    },
                )
                .unwrap()
            })
        })
        .collect();

    for handle in handles {
        let claim = handle.join().unwrap();
        let expected_verified = claim.claimer_id % 2 == 0;
        assert_eq!(
            claim.status == lostfound::ClaimStatus::Verified,
            expected_verified
        );
    }
    assert_eq!(store.claims_for_found_item(1).unwrap().len(), 10);
}
