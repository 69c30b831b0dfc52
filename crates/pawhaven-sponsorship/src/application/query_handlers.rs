//! Query handlers for the Sponsorship context.

use pawhaven_core::error::DomainError;
use uuid::Uuid;

use crate::read_model::{SponsorshipReadModel, SponsorshipRow};

/// Default page size for the recent-sponsorships listing.
pub const DEFAULT_RECENT_LIMIT: i64 = 10;

/// Lists sponsorships for one animal, newest first.
///
/// # Errors
///
/// Propagates read-model errors.
pub async fn list_sponsorships_for_animal(
    animal_id: Uuid,
    read_model: &dyn SponsorshipReadModel,
) -> Result<Vec<SponsorshipRow>, DomainError> {
    read_model.list_for_animal(animal_id).await
}

/// Lists sponsorships made by one user, newest first.
///
/// # Errors
///
/// Propagates read-model errors.
pub async fn list_sponsorships_for_user(
    user_id: Uuid,
    read_model: &dyn SponsorshipReadModel,
) -> Result<Vec<SponsorshipRow>, DomainError> {
    read_model.list_for_user(user_id).await
}

/// Lists the most recent sponsorships across all animals.
///
/// # Errors
///
/// Propagates read-model errors.
pub async fn list_recent_sponsorships(
    limit: Option<i64>,
    read_model: &dyn SponsorshipReadModel,
) -> Result<Vec<SponsorshipRow>, DomainError> {
    read_model
        .list_recent(limit.unwrap_or(DEFAULT_RECENT_LIMIT))
        .await
}

