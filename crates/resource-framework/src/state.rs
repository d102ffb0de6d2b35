//! # Collection State
//!
//! The in-memory view a controller keeps for one resource, and the reconciliation
//! primitives it applies after server responses. Snapshots of this struct are what
//! callers read and subscribe to.

use crate::entity::ResourceEntity;
use crate::notice::Notice;

#[derive(Debug, Clone)]
pub struct CollectionState<T: ResourceEntity> {
    /// Records in server order.
    pub records: Vec<T>,
    pub filters: T::Filters,
    pub stats: T::Stats,
    /// True while the latest list request is outstanding.
    pub loading: bool,
    pub notice: Option<Notice>,
    /// Ids with a mutation in flight.
    pub pending: Vec<T::Id>,
}

impl<T: ResourceEntity> Default for CollectionState<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            filters: T::Filters::default(),
            stats: T::Stats::default(),
            loading: false,
            notice: None,
            pending: Vec::new(),
        }
    }
}

impl<T: ResourceEntity> CollectionState<T> {
    pub fn error(&self) -> Option<&str> {
        match &self.notice {
            Some(Notice::Error(text)) => Some(text),
            _ => None,
        }
    }

    pub fn success_message(&self) -> Option<&str> {
        match &self.notice {
            Some(Notice::Success(text)) => Some(text),
            _ => None,
        }
    }

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.records.iter().find(|record| &record.id() == id)
    }

    pub fn is_pending(&self, id: &T::Id) -> bool {
        self.pending.contains(id)
    }

    /// Replaces the record with the same id in place, or appends it.
    pub(crate) fn upsert(&mut self, record: T) {
        if !self.replace(record.clone()) {
            self.records.push(record);
        }
    }

    /// Replaces the record with the same id in place. Returns false if absent.
    pub(crate) fn replace(&mut self, record: T) -> bool {
        let id = record.id();
        match self.records.iter_mut().find(|existing| existing.id() == id) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    /// Drops every record with `id`. Returns false if none matched.
    pub(crate) fn remove(&mut self, id: &T::Id) -> bool {
        let before = self.records.len();
        self.records.retain(|record| &record.id() != id);
        self.records.len() != before
    }

    pub(crate) fn recompute_stats(&mut self) {
        self.stats = T::derive_stats(&self.records);
    }
}
