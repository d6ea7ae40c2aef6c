//! Ordered request store.
//!
//! An ordered index keyed by [`OrderKey`] plus an id -> key map. Every
//! mutation updates both before returning, so rank and listing queries
//! always see the current order.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use super::{OrderKey, QueueError, RequestId, WorkRequest};
use crate::time::{self, Instant};

#[derive(Debug, Default)]
pub struct OrderedRequestStore {
    ordered: BTreeMap<OrderKey, WorkRequest>,
    keys: HashMap<RequestId, OrderKey>,
}

impl OrderedRequestStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn contains(&self, id: RequestId) -> bool {
        self.keys.contains_key(&id)
    }

    /// Insert `request`. Fails without mutating if its id is already live.
    pub fn insert(&mut self, request: WorkRequest) -> Result<(), QueueError> {
        if self.keys.contains_key(&request.id) {
            return Err(QueueError::DuplicateId(request.id));
        }
        let key = request.order_key();
        self.keys.insert(request.id, key);
        self.ordered.insert(key, request);
        Ok(())
    }

    /// Remove the request with `id`, returning it.
    pub fn remove_by_id(&mut self, id: RequestId) -> Result<WorkRequest, QueueError> {
        if self.is_empty() {
            return Err(QueueError::EmptyStore);
        }
        let key = self.keys.remove(&id).ok_or(QueueError::NotFound(id))?;
        // keys and ordered are kept in lockstep
        self.ordered.remove(&key).ok_or(QueueError::NotFound(id))
    }

    /// Remove and return the first request in the total order.
    pub fn pop_highest_priority(&mut self) -> Result<WorkRequest, QueueError> {
        let (_, request) = self.ordered.pop_first().ok_or(QueueError::EmptyStore)?;
        self.keys.remove(&request.id);
        Ok(request)
    }

    pub fn peek(&self) -> Option<&WorkRequest> {
        self.ordered.first_key_value().map(|(_, r)| r)
    }

    /// 0-indexed rank of `id`: the number of requests ordered before it.
    pub fn position_of(&self, id: RequestId) -> Result<usize, QueueError> {
        if self.is_empty() {
            return Err(QueueError::EmptyStore);
        }
        let key = self.keys.get(&id).ok_or(QueueError::NotFound(id))?;
        Ok(self.ordered.range(..*key).count())
    }

    /// All live ids, highest priority first.
    pub fn list_ids_ranked(&self) -> Vec<RequestId> {
        self.ordered.values().map(|r| r.id).collect()
    }

    /// Mean of `reference - admitted_at` over live requests, each clamped
    /// at zero. An empty store yields `Duration::ZERO`.
    pub fn mean_wait(&self, reference: &Instant) -> Duration {
        time::mean(
            self.ordered
                .values()
                .map(|r| time::elapsed_between(&r.admitted_at, reference)),
        )
    }
}
