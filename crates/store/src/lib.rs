//! # Lost & Found Store (`store`)
//!
//! Persistence for lost-item reports, found-item records, and claims behind
//! the [`ItemStore`] trait. The service layer only talks to the trait, so the
//! backend can be swapped through [`StoreConfig`] without touching callers.
//!
//! The store assigns ids (starting at 1, per table), `created_at` timestamps
//! from an injectable [`Clock`], and initial statuses. It never validates
//! payloads; that happens in `records` before anything reaches it.
//!
//! Stored secrets live on the report but are only handed out through
//! [`ItemStore::lost_item_secrets`], and `records` keeps them out of every
//! serialized form.
//!
//! ## Example Usage
//!
//! ```
//! use records::NewLostItem;
//! use store::{InMemoryStore, ItemStore};
//!
//! let store = InMemoryStore::new();
//! let report = store
//!     .insert_lost_item(NewLostItem {
//!         reporter_id: 7,
//!         item_type: "umbrella".into(),
//!         lost_location: "bus stop".into(),
//!         ..Default::default()
//!     })
//!     .unwrap();
//!
//! assert_eq!(report.id, 1);
//! assert_eq!(store.lost_items_by_reporter(7).unwrap().len(), 1);
//! ```

use thiserror::Error;

mod backend;
mod memory;

pub use crate::backend::{Clock, ItemStore, StoreConfig, StoreCounts, SystemClock};
pub use crate::memory::InMemoryStore;

/// Errors raised by a store backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend<E: std::fmt::Display>(err: E) -> Self {
        Self::Backend(err.to_string())
    }
}
