//! Generic aggregate state machine.
//!
//! An aggregate is a consistency boundary whose state is entirely derived
//! from its own ordered event history. Instead of a base class, each bounded
//! context supplies a plain state type with a pure reducer; `Aggregate<S>`
//! composes it with the version tracking and uncommitted-event buffering
//! every aggregate needs.

use uuid::Uuid;

use crate::clock::Clock;
use crate::error::DomainError;
use crate::event::{DomainEvent, EventKind, EventMetadata};
use crate::store::StoredEvent;

/// State and reducer for one aggregate type.
///
/// `apply` must be a deterministic, side-effect-free state transition: it
/// runs identically when an event is first raised and when history is
/// replayed.
pub trait AggregateState: Default + std::fmt::Debug + Send + Sync {
    /// The closed set of events this aggregate produces and consumes.
    type Kind: EventKind;

    /// Aggregate type name shared by all this aggregate's stored events.
    const AGGREGATE_TYPE: &'static str;

    /// Folds one event into the state.
    fn apply(&mut self, kind: &Self::Kind);
}

/// An aggregate instance: identity, version, reduced state, and the events
/// raised by the current command that have not been persisted yet.
///
/// Instances are reconstructed fresh for every command and discarded after
/// the command's events are appended.
#[derive(Debug)]
pub struct Aggregate<S: AggregateState> {
    id: Uuid,
    version: i64,
    state: S,
    uncommitted: Vec<DomainEvent<S::Kind>>,
}

impl<S: AggregateState> Aggregate<S> {
    /// Creates an empty aggregate at version 0.
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            version: 0,
            state: S::default(),
            uncommitted: Vec::new(),
        }
    }

    /// Returns the aggregate identifier.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the highest version applied so far (0 if none).
    #[must_use]
    pub fn version(&self) -> i64 {
        self.version
    }

    /// Returns the reduced state.
    #[must_use]
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Raises a new event: increments the version, builds the event with
    /// that version and the injected clock's time, applies it to the state,
    /// and buffers it as uncommitted.
    ///
    /// Domain validation must happen before calling this; the event is
    /// applied immediately and unconditionally.
    pub fn raise(
        &mut self,
        kind: S::Kind,
        correlation_id: Uuid,
        context: Option<serde_json::Value>,
        clock: &dyn Clock,
    ) {
        self.version += 1;
        let event = DomainEvent {
            metadata: EventMetadata::new(
                self.id,
                self.version,
                correlation_id,
                context,
                clock.now(),
            ),
            kind,
        };
        self.state.apply(&event.kind);
        self.uncommitted.push(event);
    }

    /// Reconstructs an aggregate by replaying its full ordered history.
    ///
    /// The version becomes the last record's version; the uncommitted buffer
    /// stays empty.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if a stored payload does not
    /// deserialize into this aggregate's event kind.
    pub fn load_from_history(id: Uuid, records: &[StoredEvent]) -> Result<Self, DomainError> {
        let mut aggregate = Self::new(id);
        for record in records {
            let event = DomainEvent::<S::Kind>::from_stored(record)?;
            aggregate.state.apply(&event.kind);
            aggregate.version = event.metadata.version;
        }
        Ok(aggregate)
    }

    /// Returns the events raised by the current command, pending persistence.
    #[must_use]
    pub fn uncommitted_events(&self) -> &[DomainEvent<S::Kind>] {
        &self.uncommitted
    }

    /// Returns the uncommitted events in their persisted representation,
    /// ready for `EventStore::append`.
    #[must_use]
    pub fn uncommitted_records(&self) -> Vec<StoredEvent> {
        self.uncommitted
            .iter()
            .map(|event| event.to_stored(S::AGGREGATE_TYPE))
            .collect()
    }

    /// Empties the uncommitted buffer after confirmed persistence.
    pub fn clear_uncommitted_events(&mut self) {
        self.uncommitted.clear();
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    enum TallyEventKind {
        Opened { label: String },
        Counted { amount: i64 },
    }

    impl EventKind for TallyEventKind {
        fn event_type(&self) -> &'static str {
            match self {
                TallyEventKind::Opened { .. } => "TallyOpened",
                TallyEventKind::Counted { .. } => "TallyCounted",
            }
        }
    }

    #[derive(Debug, Default)]
    struct TallyState {
        label: String,
        total: i64,
    }

    impl AggregateState for TallyState {
        type Kind = TallyEventKind;
        const AGGREGATE_TYPE: &'static str = "Tally";

        fn apply(&mut self, kind: &Self::Kind) {
            match kind {
                TallyEventKind::Opened { label } => self.label.clone_from(label),
                TallyEventKind::Counted { amount } => self.total += amount,
            }
        }
    }

    struct FixedClock(chrono::DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> chrono::DateTime<Utc> {
            self.0
        }
    }

    fn fixed_clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())
    }

    #[test]
    fn test_raise_applies_event_and_buffers_it() {
        // Arrange
        let id = Uuid::new_v4();
        let correlation_id = Uuid::new_v4();
        let clock = fixed_clock();
        let mut tally = Aggregate::<TallyState>::new(id);

        // Act
        tally.raise(
            TallyEventKind::Opened {
                label: "jar".to_owned(),
            },
            correlation_id,
            None,
            &clock,
        );
        tally.raise(
            TallyEventKind::Counted { amount: 7 },
            correlation_id,
            None,
            &clock,
        );

        // Assert
        assert_eq!(tally.version(), 2);
        assert_eq!(tally.state().label, "jar");
        assert_eq!(tally.state().total, 7);

        let events = tally.uncommitted_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_type(), "TallyOpened");
        assert_eq!(events[0].metadata.version, 1);
        assert_eq!(events[1].metadata.version, 2);
        assert_eq!(events[0].metadata.aggregate_id, id);
        assert_eq!(events[0].metadata.correlation_id, correlation_id);
        assert_eq!(events[0].metadata.causation_id, correlation_id);
        assert_eq!(events[0].metadata.occurred_at, clock.0);
    }

    #[test]
    fn test_uncommitted_records_carry_aggregate_type_and_payload() {
        // Arrange
        let id = Uuid::new_v4();
        let mut tally = Aggregate::<TallyState>::new(id);
        tally.raise(
            TallyEventKind::Counted { amount: 3 },
            Uuid::new_v4(),
            Some(serde_json::json!({"source": "test"})),
            &fixed_clock(),
        );

        // Act
        let records = tally.uncommitted_records();

        // Assert
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.aggregate_id, id);
        assert_eq!(record.aggregate_type, "Tally");
        assert_eq!(record.event_type, "TallyCounted");
        assert_eq!(record.version, 1);
        assert_eq!(record.metadata, Some(serde_json::json!({"source": "test"})));
        assert_eq!(record.payload, serde_json::json!({"Counted": {"amount": 3}}));
    }

    #[test]
    fn test_load_from_history_matches_live_raising() {
        // Arrange — raise a sequence live.
        let id = Uuid::new_v4();
        let clock = fixed_clock();
        let mut live = Aggregate::<TallyState>::new(id);
        live.raise(
            TallyEventKind::Opened {
                label: "jar".to_owned(),
            },
            Uuid::new_v4(),
            None,
            &clock,
        );
        for amount in [10, 25, 5] {
            live.raise(
                TallyEventKind::Counted { amount },
                Uuid::new_v4(),
                None,
                &clock,
            );
        }
        let records = live.uncommitted_records();

        // Act — replay the same records.
        let replayed = Aggregate::<TallyState>::load_from_history(id, &records).unwrap();

        // Assert — identical final state, empty buffer.
        assert_eq!(replayed.version(), live.version());
        assert_eq!(replayed.state().label, live.state().label);
        assert_eq!(replayed.state().total, live.state().total);
        assert!(replayed.uncommitted_events().is_empty());
    }

    #[test]
    fn test_load_from_history_rejects_foreign_payload() {
        // Arrange
        let id = Uuid::new_v4();
        let mut record = {
            let mut tally = Aggregate::<TallyState>::new(id);
            tally.raise(
                TallyEventKind::Counted { amount: 1 },
                Uuid::new_v4(),
                None,
                &fixed_clock(),
            );
            tally.uncommitted_records().remove(0)
        };
        record.payload = serde_json::json!({"SomethingElse": {}});

        // Act
        let result = Aggregate::<TallyState>::load_from_history(id, &[record]);

        // Assert
        match result {
            Err(DomainError::Infrastructure(msg)) => {
                assert!(msg.contains("event deserialization failed"));
            }
            other => panic!("expected Infrastructure, got {other:?}"),
        }
    }

    #[test]
    fn test_clear_uncommitted_events_empties_buffer_and_keeps_state() {
        // Arrange
        let mut tally = Aggregate::<TallyState>::new(Uuid::new_v4());
        tally.raise(
            TallyEventKind::Counted { amount: 4 },
            Uuid::new_v4(),
            None,
            &fixed_clock(),
        );

        // Act
        tally.clear_uncommitted_events();

        // Assert
        assert!(tally.uncommitted_events().is_empty());
        assert_eq!(tally.version(), 1);
        assert_eq!(tally.state().total, 4);
    }
}
