//! Projection of Animal events into the read model.

use pawhaven_core::error::DomainError;

use crate::domain::events::{AnimalEvent, AnimalEventKind};
use crate::read_model::{AnimalChanges, AnimalReadModel, AnimalRow};

/// Folds one Animal event into the read model.
///
/// Dispatch is an exhaustive match over the closed event set. Projection is
/// not deduplicated: replaying the same event twice against the same row is
/// the caller's mistake.
///
/// # Errors
///
/// Propagates any `DomainError` from the read-model port.
pub async fn project(
    event: &AnimalEvent,
    read_model: &dyn AnimalReadModel,
) -> Result<(), DomainError> {
    let animal_id = event.metadata.aggregate_id;
    match &event.kind {
        AnimalEventKind::AnimalCreated(data) => {
            read_model
                .insert(AnimalRow {
                    id: animal_id,
                    name: data.name.clone(),
                    kind: data.kind,
                    breed: data.breed.clone(),
                    photo_url: data.photo_url.clone(),
                    total_sponsored: 0.0,
                    created_at: event.metadata.occurred_at,
                })
                .await
        }
        AnimalEventKind::AnimalUpdated(data) => {
            read_model
                .apply_changes(
                    animal_id,
                    &AnimalChanges {
                        name: data.name.clone(),
                        kind: data.kind,
                        breed: data.breed.clone(),
                        photo_url: data.photo_url.clone(),
                    },
                )
                .await
        }
        AnimalEventKind::AnimalDeleted(_) => read_model.remove(animal_id).await,
        AnimalEventKind::AnimalSponsored(data) => {
            read_model
                .add_to_total_sponsored(animal_id, data.amount)
                .await
        }
    }
}

