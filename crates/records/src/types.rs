//! Entity types shared by the matcher, the claim adjudicator, the store, and
//! the HTTP layer.
//!
//! ```text
//! NewLostItem ──validate()──► store ──► LostItemReport  (secrets never serialized)
//! NewFoundItem ─validate()──► store ──► FoundItemRecord (status: available)
//! NewClaim ─────validate()──► adjudicate ──► store ──► Claim (verified | pending)
//! ```
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RecordError;
use crate::timestamp;

pub type LostItemId = u64;
pub type FoundItemId = u64;
pub type ClaimId = u64;
pub type UserId = u64;

/// Lifecycle tag on a lost-item report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum LostItemStatus {
    #[default]
    Open,
    /// Set by the staff workflow that approves a verified claim. Nothing in
    /// this workspace writes it yet; stored rows may carry it.
    Resolved,
}

impl LostItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LostItemStatus::Open => "open",
            LostItemStatus::Resolved => "resolved",
        }
    }
}

/// Availability of a found item held by staff.
///
/// Only [`FoundItemStatus::Available`] records are match candidates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum FoundItemStatus {
    #[default]
    Available,
    Claimed,
    Returned,
}

impl FoundItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FoundItemStatus::Available => "available",
            FoundItemStatus::Claimed => "claimed",
            FoundItemStatus::Returned => "returned",
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, FoundItemStatus::Available)
    }
}

/// Initial status of a claim, decided once at submission.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    /// Both submitted inputs matched both stored secrets.
    Verified,
    /// Anything else; staff review the claim by hand.
    Pending,
}

impl ClaimStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Verified => "verified",
            ClaimStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The private verification pair captured when a student files a report.
///
/// `Debug` is redacted so secrets never reach logs.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredSecrets {
    #[serde(default)]
    pub secret_info_1: Option<String>,
    #[serde(default)]
    pub secret_info_2: Option<String>,
}

impl StoredSecrets {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            secret_info_1: Some(first.into()),
            secret_info_2: Some(second.into()),
        }
    }

    fn normalized(self) -> Self {
        Self {
            secret_info_1: empty_to_none(self.secret_info_1),
            secret_info_2: empty_to_none(self.secret_info_2),
        }
    }
}

impl fmt::Debug for StoredSecrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredSecrets")
            .field("secret_info_1", &redacted(&self.secret_info_1))
            .field("secret_info_2", &redacted(&self.secret_info_2))
            .finish()
    }
}

/// The pair a claimer submits to prove ownership.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerificationInputs {
    #[serde(default)]
    pub verification_input_1: Option<String>,
    #[serde(default)]
    pub verification_input_2: Option<String>,
}

impl VerificationInputs {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            verification_input_1: Some(first.into()),
            verification_input_2: Some(second.into()),
        }
    }

    fn normalized(self) -> Self {
        Self {
            verification_input_1: empty_to_none(self.verification_input_1),
            verification_input_2: empty_to_none(self.verification_input_2),
        }
    }
}

impl fmt::Debug for VerificationInputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerificationInputs")
            .field("verification_input_1", &redacted(&self.verification_input_1))
            .field("verification_input_2", &redacted(&self.verification_input_2))
            .finish()
    }
}

fn redacted(value: &Option<String>) -> &'static str {
    match value {
        Some(_) => "<redacted>",
        None => "<none>",
    }
}

/// A student's report of a missing item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LostItemReport {
    pub id: LostItemId,
    pub reporter_id: UserId,
    pub item_type: String,
    pub lost_location: String,
    #[serde(default, with = "timestamp::option")]
    pub lost_time_from: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp::option")]
    pub lost_time_to: Option<DateTime<Utc>>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub brand_model: Option<String>,
    #[serde(default)]
    pub public_description: Option<String>,
    /// Write-once, compared internally only. Skipped on serialization.
    #[serde(skip_serializing, default)]
    pub secrets: StoredSecrets,
    #[serde(default)]
    pub status: LostItemStatus,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// A found item logged by staff.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoundItemRecord {
    pub id: FoundItemId,
    pub admin_id: UserId,
    pub item_type: String,
    pub found_location: String,
    #[serde(default, with = "timestamp::option")]
    pub found_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub brand_model: Option<String>,
    #[serde(default)]
    pub public_description: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub storage_location: Option<String>,
    #[serde(default)]
    pub status: FoundItemStatus,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// A persisted ownership claim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claim {
    pub id: ClaimId,
    pub lost_item_id: LostItemId,
    pub found_item_id: FoundItemId,
    pub claimer_id: UserId,
    #[serde(skip_serializing, default)]
    pub inputs: VerificationInputs,
    pub status: ClaimStatus,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Body of a lost-item report submission.
///
/// `user_id` is accepted as an alias of `reporter_id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewLostItem {
    #[serde(default, alias = "user_id")]
    pub reporter_id: UserId,
    #[serde(default)]
    pub item_type: String,
    #[serde(default)]
    pub lost_location: String,
    #[serde(default, with = "timestamp::option")]
    pub lost_time_from: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp::option")]
    pub lost_time_to: Option<DateTime<Utc>>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub brand_model: Option<String>,
    #[serde(default)]
    pub public_description: Option<String>,
    #[serde(flatten)]
    pub secrets: StoredSecrets,
}

impl NewLostItem {
    /// Check required fields and the time window.
    pub fn validate(&self) -> Result<(), RecordError> {
        require_id("reporter_id", self.reporter_id)?;
        require_text("item_type", &self.item_type)?;
        require_text("lost_location", &self.lost_location)?;
        if let (Some(from), Some(to)) = (self.lost_time_from, self.lost_time_to) {
            if from > to {
                return Err(RecordError::InvalidTimeWindow { from, to });
            }
        }
        Ok(())
    }

    /// Build the stored report. Blank optional text is dropped.
    pub fn into_report(self, id: LostItemId, created_at: DateTime<Utc>) -> LostItemReport {
        LostItemReport {
            id,
            reporter_id: self.reporter_id,
            item_type: self.item_type,
            lost_location: self.lost_location,
            lost_time_from: self.lost_time_from,
            lost_time_to: self.lost_time_to,
            color: blank_to_none(self.color),
            brand_model: blank_to_none(self.brand_model),
            public_description: blank_to_none(self.public_description),
            secrets: self.secrets.normalized(),
            status: LostItemStatus::Open,
            created_at,
        }
    }
}

/// Body of a found-item submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewFoundItem {
    #[serde(default)]
    pub admin_id: UserId,
    #[serde(default)]
    pub item_type: String,
    #[serde(default)]
    pub found_location: String,
    #[serde(default, with = "timestamp::option")]
    pub found_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub brand_model: Option<String>,
    #[serde(default)]
    pub public_description: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub storage_location: Option<String>,
}

impl NewFoundItem {
    pub fn validate(&self) -> Result<(), RecordError> {
        require_id("admin_id", self.admin_id)?;
        require_text("item_type", &self.item_type)?;
        require_text("found_location", &self.found_location)?;
        if self.found_time.is_none() {
            return Err(RecordError::MissingField("found_time"));
        }
        Ok(())
    }

    pub fn into_record(self, id: FoundItemId, created_at: DateTime<Utc>) -> FoundItemRecord {
        FoundItemRecord {
            id,
            admin_id: self.admin_id,
            item_type: self.item_type,
            found_location: self.found_location,
            found_time: self.found_time,
            color: blank_to_none(self.color),
            brand_model: blank_to_none(self.brand_model),
            public_description: blank_to_none(self.public_description),
            photo_url: blank_to_none(self.photo_url),
            storage_location: blank_to_none(self.storage_location),
            status: FoundItemStatus::Available,
            created_at,
        }
    }
}

/// Body of a claim submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewClaim {
    #[serde(default)]
    pub lost_item_id: LostItemId,
    #[serde(default)]
    pub found_item_id: FoundItemId,
    #[serde(default)]
    pub claimer_id: UserId,
    #[serde(flatten)]
    pub inputs: VerificationInputs,
}

impl NewClaim {
    pub fn validate(&self) -> Result<(), RecordError> {
        require_id("lost_item_id", self.lost_item_id)?;
        require_id("found_item_id", self.found_item_id)?;
        require_id("claimer_id", self.claimer_id)
    }

    pub fn into_claim(self, id: ClaimId, status: ClaimStatus, created_at: DateTime<Utc>) -> Claim {
        Claim {
            id,
            lost_item_id: self.lost_item_id,
            found_item_id: self.found_item_id,
            claimer_id: self.claimer_id,
            inputs: self.inputs.normalized(),
            status,
            created_at,
        }
    }
}

fn require_id(field: &'static str, value: u64) -> Result<(), RecordError> {
    if value == 0 {
        return Err(RecordError::MissingField(field));
    }
    Ok(())
}

fn require_text(field: &'static str, value: &str) -> Result<(), RecordError> {
    if value.trim().is_empty() {
        return Err(RecordError::MissingField(field));
    }
    Ok(())
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// Secrets are compared byte-for-byte, so only the empty string collapses.
fn empty_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
