//! Plan store: CRUD over the persisted plan list.
//!
//! Every operation loads the full list from the [`BlobStore`], applies its
//! change, and writes the list back. Unreadable or unparsable data is
//! treated as an empty list, never as a fatal error.

use std::collections::HashSet;

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::blob::{BlobError, BlobStore};
use crate::config::StoreConfig;
use crate::models::{PlanFields, PlanRecord, compare_plans};

/// Errors from [`PlanStore`] mutations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("plan {0} not found")]
    NotFound(i64),

    #[error("invalid plan: {0}")]
    Validation(String),

    #[error(transparent)]
    Storage(#[from] BlobError),

    #[error("failed to serialize plans: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Persisted list of [`PlanRecord`]s behind a [`BlobStore`].
#[derive(Debug)]
pub struct PlanStore<B> {
    blob: B,
    key: String,
}

impl<B: BlobStore> PlanStore<B> {
    /// Store plans under the default [`StoreConfig::PLANS_KEY`].
    pub fn new(blob: B) -> Self {
        Self::with_key(blob, StoreConfig::PLANS_KEY)
    }

    pub fn with_key(blob: B, key: impl Into<String>) -> Self {
        Self {
            blob,
            key: key.into(),
        }
    }

    /// All plans in display order (see [`compare_plans`]).
    pub fn list(&self) -> Vec<PlanRecord> {
        let mut plans = self.load();
        plans.sort_by(compare_plans);
        plans
    }

    /// Fetch a single plan by id.
    pub fn get(&self, id: i64) -> Option<PlanRecord> {
        self.load().into_iter().find(|p| p.id == id)
    }

    /// Create a plan, assigning it a fresh id from the current time.
    pub fn create(&self, fields: PlanFields) -> Result<PlanRecord, StoreError> {
        self.create_at(fields, Utc::now().timestamp_millis())
    }

    /// Create a plan using `now_millis` as the candidate id.
    ///
    /// If another plan already holds that id, the new plan gets the
    /// largest existing id plus one, or the smallest free positive id when
    /// the largest is `i64::MAX`.
    pub fn create_at(&self, fields: PlanFields, now_millis: i64) -> Result<PlanRecord, StoreError> {
        fields.validate().map_err(StoreError::Validation)?;

        let mut plans = self.load();
        let id = fresh_id(&plans, now_millis);
        let record = PlanRecord::from_fields(id, fields);
        plans.push(record.clone());
        self.persist(&plans)?;

        debug!(id, title = %record.title, "plan created");
        Ok(record)
    }

    /// Replace every field of plan `id` except the id itself.
    pub fn update(&self, id: i64, fields: PlanFields) -> Result<PlanRecord, StoreError> {
        fields.validate().map_err(StoreError::Validation)?;

        let mut plans = self.load();
        let slot = plans
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound(id))?;
        *slot = PlanRecord::from_fields(id, fields);
        let record = slot.clone();
        self.persist(&plans)?;

        debug!(id, "plan updated");
        Ok(record)
    }

    /// Remove plan `id`. Removing an absent id is a no-op.
    ///
    /// Returns `true` if a plan was removed.
    pub fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let mut plans = self.load();
        let before = plans.len();
        plans.retain(|p| p.id != id);
        if plans.len() == before {
            return Ok(false);
        }
        self.persist(&plans)?;

        debug!(id, "plan deleted");
        Ok(true)
    }

    fn load(&self) -> Vec<PlanRecord> {
        let raw = match self.blob.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to read plans, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(plans) => plans,
            Err(e) => {
                warn!(key = %self.key, error = %e, "stored plans are not valid, treating as empty");
                Vec::new()
            }
        }
    }

    fn persist(&self, plans: &[PlanRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_string(plans)?;
        self.blob.set(&self.key, &json)?;
        Ok(())
    }
}

fn fresh_id(existing: &[PlanRecord], candidate: i64) -> i64 {
    let taken: HashSet<i64> = existing.iter().map(|p| p.id).collect();
    if !taken.contains(&candidate) {
        return candidate;
    }
    let next = taken.iter().max().and_then(|max| max.checked_add(1));
    // At `i64::MAX` there is no room above; take the smallest free positive id.
    next
        .or_else(|| (1..i64::MAX).find(|id| !taken.contains(id)))
        .unwrap_or(candidate)
}
