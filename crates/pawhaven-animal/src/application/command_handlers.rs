//! Command handlers for the Animal context.
//!
//! Application-level orchestration: load the aggregate from the event store,
//! invoke the business operation, append the new events, project them into
//! the read model, and return the fresh read row. Every error from the core
//! propagates unmodified; concurrency conflicts are never retried here.

use pawhaven_core::clock::Clock;
use pawhaven_core::error::DomainError;
use pawhaven_core::store::EventStore;
use uuid::Uuid;

use crate::domain::aggregates::Animal;
use crate::domain::commands::{CreateAnimal, DeleteAnimal, UpdateAnimal};
use crate::domain::events::AnimalUpdated;
use crate::projection;
use crate::read_model::{AnimalReadModel, AnimalRow};

/// Reads back the projected row after a successful command.
async fn read_back(
    animal_id: Uuid,
    read_model: &dyn AnimalReadModel,
) -> Result<AnimalRow, DomainError> {
    read_model
        .find(animal_id)
        .await?
        .ok_or(DomainError::AggregateNotFound(animal_id))
}

/// Handles `CreateAnimal`: builds a fresh aggregate, persists its events, and
/// projects the new read row.
///
/// # Errors
///
/// Returns `DomainError::Validation` for an empty name, or any error from
/// the event store or read model.
pub async fn handle_create_animal(
    command: &CreateAnimal,
    clock: &dyn Clock,
    store: &dyn EventStore,
    read_model: &dyn AnimalReadModel,
) -> Result<AnimalRow, DomainError> {
    if command.name.trim().is_empty() {
        return Err(DomainError::Validation(
            "animal name must not be empty".into(),
        ));
    }

    let animal = Animal::create(
        command.animal_id,
        command.name.clone(),
        command.kind,
        command.breed.clone(),
        command.photo_url.clone(),
        command.correlation_id,
        clock,
    );

    store.append(&animal.uncommitted_records()).await?;
    for event in animal.uncommitted_events() {
        projection::project(event, read_model).await?;
    }

    read_back(command.animal_id, read_model).await
}

/// Handles `UpdateAnimal`: reconstitutes the aggregate, applies the sparse
/// patch, persists, and projects.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if the animal has no events,
/// `DomainError::Validation` if it is deleted, or any store/read-model error.
pub async fn handle_update_animal(
    command: &UpdateAnimal,
    clock: &dyn Clock,
    store: &dyn EventStore,
    read_model: &dyn AnimalReadModel,
) -> Result<AnimalRow, DomainError> {
    let existing = store.events_for_aggregate(command.animal_id).await?;
    if existing.is_empty() {
        return Err(DomainError::AggregateNotFound(command.animal_id));
    }
    let mut animal = Animal::load_from_history(command.animal_id, &existing)?;

    animal.update(
        AnimalUpdated {
            name: command.name.clone(),
            kind: command.kind,
            breed: command.breed.clone(),
            photo_url: command.photo_url.clone(),
        },
        command.correlation_id,
        clock,
    )?;

    store.append(&animal.uncommitted_records()).await?;
    for event in animal.uncommitted_events() {
        projection::project(event, read_model).await?;
    }

    read_back(command.animal_id, read_model).await
}

/// Handles `DeleteAnimal`: reconstitutes the aggregate, marks it deleted,
/// persists, and removes the read row.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if the animal has no events,
/// `DomainError::Validation` if it is already deleted, or any store/read-model
/// error.
pub async fn handle_delete_animal(
    command: &DeleteAnimal,
    clock: &dyn Clock,
    store: &dyn EventStore,
    read_model: &dyn AnimalReadModel,
) -> Result<(), DomainError> {
    let existing = store.events_for_aggregate(command.animal_id).await?;
    if existing.is_empty() {
        return Err(DomainError::AggregateNotFound(command.animal_id));
    }
    let mut animal = Animal::load_from_history(command.animal_id, &existing)?;

    animal.delete(command.correlation_id, clock)?;

    store.append(&animal.uncommitted_records()).await?;
    for event in animal.uncommitted_events() {
        projection::project(event, read_model).await?;
    }

    Ok(())
}

