//! The Sponsorship aggregate.

use chrono::{DateTime, Utc};
use pawhaven_core::aggregate::{Aggregate, AggregateState};
use pawhaven_core::clock::Clock;
use pawhaven_core::error::DomainError;
use pawhaven_core::store::StoredEvent;
use uuid::Uuid;

use super::events::{
    SPONSORSHIP_AGGREGATE_TYPE, SponsorshipCreated, SponsorshipEvent, SponsorshipEventKind,
};

/// Reduced state of a sponsorship, derived from its single creation event.
#[derive(Debug, Default)]
pub struct SponsorshipState {
    /// The sponsored animal.
    pub animal_id: Uuid,
    /// The sponsoring user.
    pub user_id: Uuid,
    /// The sponsoring user's email.
    pub user_email: String,
    /// Contribution amount.
    pub amount: f64,
    /// Contribution currency code.
    pub currency: String,
    /// When the sponsorship was made.
    pub created_at: Option<DateTime<Utc>>,
}

impl AggregateState for SponsorshipState {
    type Kind = SponsorshipEventKind;
    const AGGREGATE_TYPE: &'static str = SPONSORSHIP_AGGREGATE_TYPE;

    fn apply(&mut self, kind: &Self::Kind) {
        match kind {
            SponsorshipEventKind::SponsorshipCreated(data) => {
                self.animal_id = data.animal_id;
                self.user_id = data.user_id;
                self.user_email.clone_from(&data.user_email);
                self.amount = data.amount;
                self.currency.clone_from(&data.currency);
                self.created_at = Some(data.created_at);
            }
        }
    }
}

/// The aggregate root for a sponsorship. Write-once: no mutating operation
/// exists beyond creation.
#[derive(Debug)]
pub struct Sponsorship {
    inner: Aggregate<SponsorshipState>,
}

impl Sponsorship {
    /// Creates a new sponsorship, raising `SponsorshipCreated`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the amount is not positive; no
    /// aggregate is constructed and no event exists in that case.
    pub fn create(
        id: Uuid,
        animal_id: Uuid,
        user_id: Uuid,
        user_email: String,
        amount: f64,
        currency: String,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<Self, DomainError> {
        if amount <= 0.0 {
            return Err(DomainError::Validation(
                "sponsorship amount must be positive".into(),
            ));
        }

        let mut inner = Aggregate::new(id);
        inner.raise(
            SponsorshipEventKind::SponsorshipCreated(SponsorshipCreated {
                animal_id,
                user_id,
                user_email,
                amount,
                currency,
                created_at: clock.now(),
            }),
            correlation_id,
            None,
            clock,
        );
        Ok(Self { inner })
    }

    /// Reconstructs a sponsorship by replaying its history.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if a stored payload does not
    /// deserialize into a Sponsorship event.
    pub fn load_from_history(id: Uuid, records: &[StoredEvent]) -> Result<Self, DomainError> {
        Ok(Self {
            inner: Aggregate::load_from_history(id, records)?,
        })
    }

    /// Returns the aggregate identifier.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.inner.id()
    }

    /// Returns the current version.
    #[must_use]
    pub fn version(&self) -> i64 {
        self.inner.version()
    }

    /// Returns the reduced state.
    #[must_use]
    pub fn state(&self) -> &SponsorshipState {
        self.inner.state()
    }

    /// Returns the events raised by the current command.
    #[must_use]
    pub fn uncommitted_events(&self) -> &[SponsorshipEvent] {
        self.inner.uncommitted_events()
    }

    /// Returns the uncommitted events in persisted form.
    #[must_use]
    pub fn uncommitted_records(&self) -> Vec<StoredEvent> {
        self.inner.uncommitted_records()
    }

    /// Empties the uncommitted buffer after confirmed persistence.
    pub fn clear_uncommitted_events(&mut self) {
        self.inner.clear_uncommitted_events();
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pawhaven_test_support::FixedClock;

    use super::*;

    fn fixed_clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())
    }

    #[test]
    fn test_create_raises_single_event_at_version_one() {
        // Arrange
        let id = Uuid::new_v4();
        let animal_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();
        let clock = fixed_clock();

        // Act
        let sponsorship = Sponsorship::create(
            id,
            animal_id,
            user_id,
            "sponsor@example.org".to_owned(),
            25.5,
            "USD".to_owned(),
            Uuid::new_v4(),
            &clock,
        )
        .unwrap();

        // Assert
        assert_eq!(sponsorship.version(), 1);
        assert_eq!(sponsorship.state().animal_id, animal_id);
        assert_eq!(sponsorship.state().user_id, user_id);
        assert!((sponsorship.state().amount - 25.5).abs() < f64::EPSILON);
        assert_eq!(sponsorship.state().created_at, Some(clock.0));

        let events = sponsorship.uncommitted_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "SponsorshipCreated");
        assert_eq!(events[0].metadata.version, 1);
    }

    #[test]
    fn test_create_rejects_negative_amount_before_any_event() {
        // Arrange / Act
        let result = Sponsorship::create(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            "sponsor@example.org".to_owned(),
            -5.0,
            "USD".to_owned(),
            Uuid::new_v4(),
            &fixed_clock(),
        );

        // Assert
        match result {
            Err(DomainError::Validation(msg)) => {
                assert_eq!(msg, "sponsorship amount must be positive");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_replay_yields_identical_state() {
        // Arrange
        let id = Uuid::new_v4();
        let clock = fixed_clock();
        let live = Sponsorship::create(
            id,
            Uuid::new_v4(),
            Uuid::new_v4(),
            "sponsor@example.org".to_owned(),
            10.0,
            "EUR".to_owned(),
            Uuid::new_v4(),
            &clock,
        )
        .unwrap();
        let records = live.uncommitted_records();

        // Act
        let replayed = Sponsorship::load_from_history(id, &records).unwrap();

        // Assert
        assert_eq!(replayed.version(), 1);
        assert_eq!(replayed.state().animal_id, live.state().animal_id);
        assert_eq!(replayed.state().user_email, live.state().user_email);
        assert!((replayed.state().amount - live.state().amount).abs() < f64::EPSILON);
        assert_eq!(replayed.state().currency, live.state().currency);
        assert_eq!(replayed.state().created_at, live.state().created_at);
        assert!(replayed.uncommitted_events().is_empty());
    }
}
