// picker_core/src/model.rs

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

// =========================================================================
// == Thumbnail ==
// =========================================================================

/// The image shown for a model in the thumbnail strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    /// Name of the image in the image store.
    pub image_name: String,
    /// True when the model had no image of its own and the fallback is used.
    pub is_fallback: bool,
}

// =========================================================================
// == Model Record ==
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Pending,
    Loaded,
    Failed,
}

enum LoadOutcome<H> {
    Loaded(H),
    Failed(String),
}

/// One placeable asset. `H` is the collaborator's handle to a loaded,
/// renderable entity.
///
/// The record is shared as `Arc<ModelRecord<H>>`: the catalog owns it, the
/// interaction state and the loader only look at it. The load outcome is a
/// write-once cell, so the handle goes from empty to populated exactly once
/// and is never reset.
pub struct ModelRecord<H> {
    identifier: String,
    thumbnail: Thumbnail,
    load_requested: AtomicBool,
    outcome: OnceLock<LoadOutcome<H>>,
}

impl<H> ModelRecord<H> {
    pub fn new(identifier: impl Into<String>, thumbnail: Thumbnail) -> Self {
        Self {
            identifier: identifier.into(),
            thumbnail,
            load_requested: AtomicBool::new(false),
            outcome: OnceLock::new(),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn thumbnail(&self) -> &Thumbnail {
        &self.thumbnail
    }

    /// The loaded entity, if the load finished successfully.
    pub fn entity_handle(&self) -> Option<&H> {
        match self.outcome.get() {
            Some(LoadOutcome::Loaded(handle)) => Some(handle),
            _ => None,
        }
    }

    pub fn load_status(&self) -> LoadStatus {
        match self.outcome.get() {
            None => LoadStatus::Pending,
            Some(LoadOutcome::Loaded(_)) => LoadStatus::Loaded,
            Some(LoadOutcome::Failed(_)) => LoadStatus::Failed,
        }
    }

    /// The reason the load failed, if it did.
    pub fn failure_reason(&self) -> Option<&str> {
        match self.outcome.get() {
            Some(LoadOutcome::Failed(reason)) => Some(reason),
            _ => None,
        }
    }

    /// Claims the single load slot for this record. Returns `false` if a load
    /// was already requested.
    pub(crate) fn claim_load(&self) -> bool {
        !self.load_requested.swap(true, Ordering::AcqRel)
    }

    /// Stores the loaded handle. Returns `false` (and drops `handle`) if the
    /// record already has an outcome.
    pub fn set_entity_handle(&self, handle: H) -> bool {
        self.outcome.set(LoadOutcome::Loaded(handle)).is_ok()
    }

    /// Marks the load as failed for good. Returns `false` if the record
    /// already has an outcome.
    pub fn mark_failed(&self, reason: impl Into<String>) -> bool {
        self.outcome.set(LoadOutcome::Failed(reason.into())).is_ok()
    }
}

impl<H> fmt::Debug for ModelRecord<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelRecord")
            .field("identifier", &self.identifier)
            .field("thumbnail", &self.thumbnail)
            .field("status", &self.load_status())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> ModelRecord<u32> {
        ModelRecord::new(
            name,
            Thumbnail {
                image_name: name.to_string(),
                is_fallback: false,
            },
        )
    }

    #[test]
    fn handle_is_written_at_most_once() {
        let model = record("teapot");
        assert_eq!(model.load_status(), LoadStatus::Pending);
        assert!(model.entity_handle().is_none());

        assert!(model.set_entity_handle(7));
        assert!(!model.set_entity_handle(9));
        assert!(!model.mark_failed("late failure"));

        assert_eq!(model.entity_handle(), Some(&7));
        assert_eq!(model.load_status(), LoadStatus::Loaded);
    }

    #[test]
    fn failed_record_stays_empty() {
        let model = record("toy_biplane");
        assert!(model.mark_failed("decode error"));
        assert!(!model.set_entity_handle(1));

        assert!(model.entity_handle().is_none());
        assert_eq!(model.load_status(), LoadStatus::Failed);
        assert_eq!(model.failure_reason(), Some("decode error"));
    }

    #[test]
    fn load_slot_is_claimed_once() {
        let model = record("teapot");
        assert!(model.claim_load());
        assert!(!model.claim_load());
    }
}
