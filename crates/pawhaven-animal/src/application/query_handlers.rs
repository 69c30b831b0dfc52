//! Query handlers for the Animal context.
//!
//! Queries never touch the event store; they read the denormalized rows the
//! projectors maintain.

use pawhaven_core::error::DomainError;
use uuid::Uuid;

use crate::domain::events::AnimalKind;
use crate::read_model::{AnimalReadModel, AnimalRow};

/// Retrieves one animal row.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if no row exists for the id.
pub async fn get_animal_by_id(
    animal_id: Uuid,
    read_model: &dyn AnimalReadModel,
) -> Result<AnimalRow, DomainError> {
    read_model
        .find(animal_id)
        .await?
        .ok_or(DomainError::AggregateNotFound(animal_id))
}

/// Lists all animals, newest first.
///
/// # Errors
///
/// Propagates read-model errors.
pub async fn list_animals(read_model: &dyn AnimalReadModel) -> Result<Vec<AnimalRow>, DomainError> {
    read_model.list().await
}

/// Lists animals of one species, newest first.
///
/// # Errors
///
/// Propagates read-model errors.
pub async fn list_animals_by_kind(
    kind: AnimalKind,
    read_model: &dyn AnimalReadModel,
) -> Result<Vec<AnimalRow>, DomainError> {
    read_model.list_by_kind(kind).await
}

