//! Event-store port: the append-only, versioned log of domain events.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DomainError;

/// Persisted representation of a domain event.
#[derive(Debug, Clone)]
pub struct StoredEvent {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Aggregate this event belongs to.
    pub aggregate_id: Uuid,
    /// Aggregate type name (e.g. "Animal", "Sponsorship").
    pub aggregate_type: String,
    /// Event type name (e.g. "AnimalCreated").
    pub event_type: String,
    /// Serialized event payload.
    pub payload: serde_json::Value,
    /// Optional caller/context mapping.
    pub metadata: Option<serde_json::Value>,
    /// Version within the aggregate stream, starting at 1, no gaps.
    pub version: i64,
    /// Correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Causation ID linking to the causing event/command.
    pub causation_id: Uuid,
    /// Timestamp of event creation.
    pub occurred_at: chrono::DateTime<chrono::Utc>,
}

/// The single source of truth for aggregate state.
///
/// Implementations must guarantee that no two concurrent `append` calls for
/// the same aggregate can both pass the version check before either commits.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Appends new events to an aggregate stream with optimistic concurrency.
    ///
    /// All events in one call must belong to the same aggregate; the expected
    /// prior stream head is derived from the first event's version. The
    /// insert is all-or-nothing. An empty slice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ConcurrencyConflict` when the stored stream head
    /// does not equal `events[0].version - 1` (no rows are written), and
    /// `DomainError::Validation` when the slice mixes aggregate ids.
    async fn append(&self, events: &[StoredEvent]) -> Result<(), DomainError>;

    /// Loads all events for an aggregate, ordered by version ascending.
    async fn events_for_aggregate(
        &self,
        aggregate_id: Uuid,
    ) -> Result<Vec<StoredEvent>, DomainError>;

    /// Loads all events of one type, ordered by timestamp ascending.
    async fn events_by_type(&self, event_type: &str) -> Result<Vec<StoredEvent>, DomainError>;

    /// Loads all events for aggregates of one type, ordered by timestamp
    /// ascending.
    async fn events_by_aggregate_type(
        &self,
        aggregate_type: &str,
    ) -> Result<Vec<StoredEvent>, DomainError>;
}
