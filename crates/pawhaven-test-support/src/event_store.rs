//! Test event stores — in-memory and failing `EventStore` implementations.

use std::sync::Mutex;

use async_trait::async_trait;
use pawhaven_core::error::DomainError;
use pawhaven_core::store::{EventStore, StoredEvent};
use uuid::Uuid;

/// An in-memory event store with the full `EventStore` contract: per-stream
/// version checking, all-or-nothing appends, and the ordered queries.
///
/// Lets the optimistic-concurrency and monotonicity properties be exercised
/// without a database.
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    events: Mutex<Vec<StoredEvent>>,
}

impl InMemoryEventStore {
    /// Returns a snapshot of every stored event, in insertion order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn all_events(&self) -> Vec<StoredEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn append(&self, events: &[StoredEvent]) -> Result<(), DomainError> {
        let Some(first) = events.first() else {
            return Ok(());
        };
        if events.iter().any(|e| e.aggregate_id != first.aggregate_id) {
            return Err(DomainError::Validation(
                "append must not span multiple aggregates".into(),
            ));
        }

        let mut log = self.events.lock().unwrap();
        let actual = log
            .iter()
            .filter(|e| e.aggregate_id == first.aggregate_id)
            .map(|e| e.version)
            .max()
            .unwrap_or(0);
        let expected = first.version - 1;
        if actual != expected {
            return Err(DomainError::ConcurrencyConflict {
                aggregate_id: first.aggregate_id,
                expected,
                actual,
            });
        }

        log.extend(events.iter().cloned());
        Ok(())
    }

    async fn events_for_aggregate(
        &self,
        aggregate_id: Uuid,
    ) -> Result<Vec<StoredEvent>, DomainError> {
        let mut events: Vec<StoredEvent> = self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.aggregate_id == aggregate_id)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.version);
        Ok(events)
    }

    async fn events_by_type(&self, event_type: &str) -> Result<Vec<StoredEvent>, DomainError> {
        let mut events: Vec<StoredEvent> = self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.event_type == event_type)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.occurred_at);
        Ok(events)
    }

    async fn events_by_aggregate_type(
        &self,
        aggregate_type: &str,
    ) -> Result<Vec<StoredEvent>, DomainError> {
        let mut events: Vec<StoredEvent> = self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.aggregate_type == aggregate_type)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.occurred_at);
        Ok(events)
    }
}

/// An event store that always returns an infrastructure error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingEventStore;

#[async_trait]
impl EventStore for FailingEventStore {
    async fn append(&self, _events: &[StoredEvent]) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn events_for_aggregate(
        &self,
        _aggregate_id: Uuid,
    ) -> Result<Vec<StoredEvent>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn events_by_type(&self, _event_type: &str) -> Result<Vec<StoredEvent>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn events_by_aggregate_type(
        &self,
        _aggregate_type: &str,
    ) -> Result<Vec<StoredEvent>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}

/// Wraps an event store and rejects appends for one aggregate id, letting
/// tests drive a failure between two appends of a multi-aggregate flow.
/// Reads and appends for other aggregates pass through.
#[derive(Debug)]
pub struct RejectAggregateEventStore<I> {
    inner: I,
    rejected: Uuid,
}

impl<I: EventStore> RejectAggregateEventStore<I> {
    /// Wraps `inner`, rejecting appends for `rejected`.
    pub fn new(inner: I, rejected: Uuid) -> Self {
        Self { inner, rejected }
    }
}

#[async_trait]
impl<I: EventStore> EventStore for RejectAggregateEventStore<I> {
    async fn append(&self, events: &[StoredEvent]) -> Result<(), DomainError> {
        if events.first().map(|e| e.aggregate_id) == Some(self.rejected) {
            return Err(DomainError::Infrastructure(format!(
                "append rejected for aggregate {}",
                self.rejected
            )));
        }
        self.inner.append(events).await
    }

    async fn events_for_aggregate(
        &self,
        aggregate_id: Uuid,
    ) -> Result<Vec<StoredEvent>, DomainError> {
        self.inner.events_for_aggregate(aggregate_id).await
    }

    async fn events_by_type(&self, event_type: &str) -> Result<Vec<StoredEvent>, DomainError> {
        self.inner.events_by_type(event_type).await
    }

    async fn events_by_aggregate_type(
        &self,
        aggregate_type: &str,
    ) -> Result<Vec<StoredEvent>, DomainError> {
        self.inner.events_by_aggregate_type(aggregate_type).await
    }
}
