//! The Animal aggregate.

use pawhaven_core::aggregate::{Aggregate, AggregateState};
use pawhaven_core::clock::Clock;
use pawhaven_core::error::DomainError;
use pawhaven_core::store::StoredEvent;
use uuid::Uuid;

use super::events::{
    ANIMAL_AGGREGATE_TYPE, AnimalCreated, AnimalDeleted, AnimalEvent, AnimalEventKind, AnimalKind,
    AnimalSponsored, AnimalUpdated,
};

/// Reduced state of an animal, derived entirely from its event history.
#[derive(Debug, Default)]
pub struct AnimalState {
    /// The animal's name.
    pub name: String,
    /// The animal's species.
    pub kind: AnimalKind,
    /// The animal's breed.
    pub breed: String,
    /// URL of the animal's photo.
    pub photo_url: String,
    /// Sum of all recorded sponsorship amounts. Never decremented.
    pub total_sponsored: f64,
    /// Terminal flag; no transition leaves the deleted state.
    pub deleted: bool,
}

impl AggregateState for AnimalState {
    type Kind = AnimalEventKind;
    const AGGREGATE_TYPE: &'static str = ANIMAL_AGGREGATE_TYPE;

    fn apply(&mut self, kind: &Self::Kind) {
        match kind {
            AnimalEventKind::AnimalCreated(data) => {
                self.name.clone_from(&data.name);
                self.kind = data.kind;
                self.breed.clone_from(&data.breed);
                self.photo_url.clone_from(&data.photo_url);
            }
            AnimalEventKind::AnimalUpdated(data) => {
                if let Some(name) = &data.name {
                    self.name.clone_from(name);
                }
                if let Some(kind) = data.kind {
                    self.kind = kind;
                }
                if let Some(breed) = &data.breed {
                    self.breed.clone_from(breed);
                }
                if let Some(photo_url) = &data.photo_url {
                    self.photo_url.clone_from(photo_url);
                }
            }
            AnimalEventKind::AnimalDeleted(_) => {
                self.deleted = true;
            }
            AnimalEventKind::AnimalSponsored(data) => {
                self.total_sponsored += data.amount;
            }
        }
    }
}

/// The aggregate root for an animal.
///
/// All domain validation happens before an event is raised; once raised, an
/// event is applied immediately and is irrevocable in memory.
#[derive(Debug)]
pub struct Animal {
    inner: Aggregate<AnimalState>,
}

impl Animal {
    /// Creates a new animal, raising `AnimalCreated`.
    #[must_use]
    pub fn create(
        id: Uuid,
        name: String,
        kind: AnimalKind,
        breed: String,
        photo_url: String,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Self {
        let mut inner = Aggregate::new(id);
        inner.raise(
            AnimalEventKind::AnimalCreated(AnimalCreated {
                name,
                kind,
                breed,
                photo_url,
            }),
            correlation_id,
            None,
            clock,
        );
        Self { inner }
    }

    /// Reconstructs an animal by replaying its full ordered history.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if a stored payload does not
    /// deserialize into an Animal event.
    pub fn load_from_history(id: Uuid, records: &[StoredEvent]) -> Result<Self, DomainError> {
        Ok(Self {
            inner: Aggregate::load_from_history(id, records)?,
        })
    }

    /// Applies a sparse patch, raising `AnimalUpdated`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the animal is deleted.
    pub fn update(
        &mut self,
        changes: AnimalUpdated,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        if self.state().deleted {
            return Err(DomainError::Validation(
                "cannot update a deleted animal".into(),
            ));
        }
        self.inner.raise(
            AnimalEventKind::AnimalUpdated(changes),
            correlation_id,
            None,
            clock,
        );
        Ok(())
    }

    /// Removes the animal from the roster, raising `AnimalDeleted`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the animal is already deleted.
    pub fn delete(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Result<(), DomainError> {
        if self.state().deleted {
            return Err(DomainError::Validation("animal is already deleted".into()));
        }
        self.inner.raise(
            AnimalEventKind::AnimalDeleted(AnimalDeleted {
                deleted_at: clock.now(),
            }),
            correlation_id,
            None,
            clock,
        );
        Ok(())
    }

    /// Records a sponsorship contribution, raising `AnimalSponsored`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the animal is deleted or the
    /// amount is not positive.
    pub fn record_sponsorship(
        &mut self,
        sponsorship_id: Uuid,
        user_id: Uuid,
        amount: f64,
        currency: String,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        if self.state().deleted {
            return Err(DomainError::Validation(
                "cannot sponsor a deleted animal".into(),
            ));
        }
        if amount <= 0.0 {
            return Err(DomainError::Validation(
                "sponsorship amount must be positive".into(),
            ));
        }
        self.inner.raise(
            AnimalEventKind::AnimalSponsored(AnimalSponsored {
                sponsorship_id,
                user_id,
                amount,
                currency,
            }),
            correlation_id,
            None,
            clock,
        );
        Ok(())
    }

    /// Returns the aggregate identifier.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.inner.id()
    }

    /// Returns the current version (highest event version applied).
    #[must_use]
    pub fn version(&self) -> i64 {
        self.inner.version()
    }

    /// Returns the reduced state.
    #[must_use]
    pub fn state(&self) -> &AnimalState {
        self.inner.state()
    }

    /// Returns the events raised by the current command.
    #[must_use]
    pub fn uncommitted_events(&self) -> &[AnimalEvent] {
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
