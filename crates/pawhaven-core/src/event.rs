//! Domain event abstractions.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::DomainError;
use crate::store::StoredEvent;

/// Metadata attached to every domain event.
#[derive(Debug, Clone)]
pub struct EventMetadata {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Aggregate/stream this event belongs to.
    pub aggregate_id: Uuid,
    /// Monotonically increasing version within the aggregate stream.
    pub version: i64,
    /// Correlation ID for tracing a command through its effects.
    pub correlation_id: Uuid,
    /// Causation ID linking this event to the event/command that caused it.
    pub causation_id: Uuid,
    /// Optional caller/context mapping. Never read by the core.
    pub context: Option<serde_json::Value>,
    /// Timestamp of event creation.
    pub occurred_at: DateTime<Utc>,
}

impl EventMetadata {
    /// Creates metadata for a freshly raised event: a new event ID and the
    /// injected clock's current time.
    #[must_use]
    pub fn new(
        aggregate_id: Uuid,
        version: i64,
        correlation_id: Uuid,
        context: Option<serde_json::Value>,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            aggregate_id,
            version,
            correlation_id,
            causation_id: correlation_id,
            context,
            occurred_at,
        }
    }
}

/// Closed set of event payloads an aggregate type produces and consumes.
///
/// Each bounded context defines one tagged enum implementing this trait, so
/// event dispatch is an exhaustive `match` rather than a string switch.
pub trait EventKind:
    Clone + std::fmt::Debug + Send + Sync + Serialize + DeserializeOwned
{
    /// Returns the event type name (stored alongside the payload for querying).
    fn event_type(&self) -> &'static str;
}

/// A domain event: metadata envelope around a context-specific payload.
#[derive(Debug, Clone)]
pub struct DomainEvent<K> {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: K,
}

impl<K: EventKind> DomainEvent<K> {
    /// Returns the event type name.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    /// Converts the event into its persisted representation.
    #[must_use]
    pub fn to_stored(&self, aggregate_type: &str) -> StoredEvent {
        StoredEvent {
            event_id: self.metadata.event_id,
            aggregate_id: self.metadata.aggregate_id,
            aggregate_type: aggregate_type.to_owned(),
            event_type: self.event_type().to_owned(),
            // Serialization of derived Serialize types to Value is infallible.
            payload: serde_json::to_value(&self.kind)
                .expect("event kind serialization is infallible"),
            metadata: self.metadata.context.clone(),
            version: self.metadata.version,
            correlation_id: self.metadata.correlation_id,
            causation_id: self.metadata.causation_id,
            occurred_at: self.metadata.occurred_at,
        }
    }

    /// Rebuilds a typed event from its persisted representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the stored payload does not
    /// deserialize into this context's event kind.
    pub fn from_stored(record: &StoredEvent) -> Result<Self, DomainError> {
        let kind: K = serde_json::from_value(record.payload.clone())
            .map_err(|e| DomainError::Infrastructure(format!("event deserialization failed: {e}")))?;
        Ok(Self {
            metadata: EventMetadata {
                event_id: record.event_id,
                aggregate_id: record.aggregate_id,
                version: record.version,
                correlation_id: record.correlation_id,
                causation_id: record.causation_id,
                context: record.metadata.clone(),
                occurred_at: record.occurred_at,
            },
            kind,
        })
    }
}
