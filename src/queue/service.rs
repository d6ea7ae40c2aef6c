//! Scheduling service: the shared, lock-guarded handle to the store.
//!
//! Every operation takes the store lock exactly once and releases it before
//! returning. Nothing here awaits, so the lock is never held across a
//! suspension point.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info};

use super::{Classifier, OrderedRequestStore, QueueError, RequestId, WorkRequest};
use crate::time;

/// Mean wait at a reference instant, with its display renderings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeanWait {
    #[serde(skip)]
    pub duration: Duration,
    pub seconds: f64,
    /// Legacy date-shaped rendering.
    pub formatted: String,
    /// `[Nd ]HH:MM:SS`
    pub display: String,
    pub sample_size: usize,
}

impl MeanWait {
    fn new(duration: Duration, sample_size: usize) -> Self {
        Self {
            duration,
            seconds: duration.as_secs_f64(),
            formatted: time::format_duration_compat(duration),
            display: time::format_duration_hms(duration),
            sample_size,
        }
    }
}

#[derive(Clone)]
pub struct SchedulingService {
    store: Arc<Mutex<OrderedRequestStore>>,
    classifier: Arc<Classifier>,
}

impl SchedulingService {
    pub fn new(classifier: Classifier) -> Self {
        Self {
            store: Arc::new(Mutex::new(OrderedRequestStore::new())),
            classifier: Arc::new(classifier),
        }
    }

    /// Admit request `id` at the instant given by `date`.
    pub fn enqueue(&self, id: i64, date: &str) -> Result<WorkRequest, QueueError> {
        let id = RequestId::try_from(id)?;
        let admitted_at = time::parse_instant(date)?;
        let tier = self.classifier.classify(id);
        let request = WorkRequest::new(id, admitted_at, tier);

        let mut store = self.store.lock();
        store.insert(request.clone())?;
        let queued = store.len();
        drop(store);

        info!(
            %id,
            %tier,
            admitted_at = %time::format_instant(&admitted_at),
            queued,
            "request enqueued"
        );
        Ok(request)
    }

    /// Withdraw request `id` wherever it sits in the order.
    pub fn dequeue(&self, id: i64) -> Result<WorkRequest, QueueError> {
        let id = RequestId::try_from(id)?;
        let removed = self.store.lock().remove_by_id(id)?;
        info!(%id, tier = %removed.tier, "request removed");
        Ok(removed)
    }

    /// Remove and return the highest-priority request.
    pub fn dequeue_top(&self) -> Result<WorkRequest, QueueError> {
        let top = self.store.lock().pop_highest_priority()?;
        info!(id = %top.id, tier = %top.tier, "top request dequeued");
        Ok(top)
    }

    pub fn peek_top(&self) -> Result<WorkRequest, QueueError> {
        self.store
            .lock()
            .peek()
            .cloned()
            .ok_or(QueueError::EmptyStore)
    }

    pub fn list_ids(&self) -> Vec<RequestId> {
        let ids = self.store.lock().list_ids_ranked();
        debug!(count = ids.len(), "listed ids");
        ids
    }

    pub fn position(&self, id: i64) -> Result<usize, QueueError> {
        let id = RequestId::try_from(id)?;
        let position = self.store.lock().position_of(id)?;
        debug!(%id, position, "position lookup");
        Ok(position)
    }

    /// Mean wait of all queued requests relative to the instant in `date`.
    pub fn mean_wait(&self, date: &str) -> Result<MeanWait, QueueError> {
        let reference = time::parse_instant(date)?;
        let (duration, sample_size) = {
            let store = self.store.lock();
            (store.mean_wait(&reference), store.len())
        };
        debug!(sample_size, mean_secs = duration.as_secs_f64(), "mean wait computed");
        Ok(MeanWait::new(duration, sample_size))
    }

    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }
}

impl Default for SchedulingService {
    fn default() -> Self {
        Self::new(Classifier::default())
    }
}
