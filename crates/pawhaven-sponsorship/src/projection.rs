//! Projection of Sponsorship events into the read model.

use pawhaven_core::error::DomainError;

use crate::domain::events::{SponsorshipEvent, SponsorshipEventKind};
use crate::read_model::{SponsorshipReadModel, SponsorshipRow};

/// Folds one Sponsorship event into the read model.
///
/// # Errors
///
/// Propagates any `DomainError` from the read-model port.
pub async fn project(
    event: &SponsorshipEvent,
    read_model: &dyn SponsorshipReadModel,
) -> Result<(), DomainError> {
    match &event.kind {
        SponsorshipEventKind::SponsorshipCreated(data) => {
            read_model
                .insert(SponsorshipRow {
                    id: event.metadata.aggregate_id,
                    animal_id: data.animal_id,
                    user_id: data.user_id,
                    user_email: data.user_email.clone(),
                    amount: data.amount,
                    currency: data.currency.clone(),
                    created_at: data.created_at,
                })
                .await
        }
    }
}
