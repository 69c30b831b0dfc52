//! Command handlers for the Sponsorship context.

use pawhaven_animal::domain::aggregates::Animal;
use pawhaven_animal::projection as animal_projection;
use pawhaven_animal::read_model::AnimalReadModel;
use pawhaven_core::clock::Clock;
use pawhaven_core::error::DomainError;
use pawhaven_core::store::EventStore;

use crate::domain::aggregates::Sponsorship;
use crate::domain::commands::CreateSponsorship;
use crate::projection;
use crate::read_model::{SponsorshipReadModel, SponsorshipRow};

const DEFAULT_CURRENCY: &str = "USD";

/// Handles `CreateSponsorship`: verifies the animal exists and is live,
/// creates the sponsorship aggregate, records the contribution on the same
/// in-memory animal, persists both aggregates' events, and projects both.
///
/// The two aggregates are appended separately (sponsorship first) because
/// each stream has its own concurrency check. A failure between the appends
/// leaves the sponsorship stream persisted and the animal stream untouched;
/// callers observe the propagated error and must reconcile or retry. There
/// is no saga or compensation spanning the two streams.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if the animal has no events,
/// `DomainError::Validation` if the animal is deleted or the amount is not
/// positive, `DomainError::ConcurrencyConflict` from either append, or any
/// read-model error.
pub async fn handle_create_sponsorship(
    command: &CreateSponsorship,
    clock: &dyn Clock,
    store: &dyn EventStore,
    animal_read_model: &dyn AnimalReadModel,
    sponsorship_read_model: &dyn SponsorshipReadModel,
) -> Result<SponsorshipRow, DomainError> {
    let currency = command
        .currency
        .clone()
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_owned());

    let animal_events = store.events_for_aggregate(command.animal_id).await?;
    if animal_events.is_empty() {
        return Err(DomainError::AggregateNotFound(command.animal_id));
    }
    let mut animal = Animal::load_from_history(command.animal_id, &animal_events)?;
    if animal.state().deleted {
        return Err(DomainError::Validation(
            "cannot sponsor a deleted animal".into(),
        ));
    }

    let sponsorship = Sponsorship::create(
        command.sponsorship_id,
        command.animal_id,
        command.user_id,
        command.user_email.clone(),
        command.amount,
        currency.clone(),
        command.correlation_id,
        clock,
    )?;

    animal.record_sponsorship(
        command.sponsorship_id,
        command.user_id,
        command.amount,
        currency,
        command.correlation_id,
        clock,
    )?;

    store.append(&sponsorship.uncommitted_records()).await?;
    store.append(&animal.uncommitted_records()).await?;

    for event in sponsorship.uncommitted_events() {
        projection::project(event, sponsorship_read_model).await?;
    }
    for event in animal.uncommitted_events() {
        animal_projection::project(event, animal_read_model).await?;
    }

    sponsorship_read_model
        .find(command.sponsorship_id)
        .await?
        .ok_or(DomainError::AggregateNotFound(command.sponsorship_id))
}

