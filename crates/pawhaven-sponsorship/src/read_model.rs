//! Sponsorship read-model port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pawhaven_core::error::DomainError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Denormalized sponsorship row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SponsorshipRow {
    /// Aggregate identifier.
    pub id: Uuid,
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
    pub created_at: DateTime<Utc>,
}

/// Persistence port for the sponsorship read model.
#[async_trait]
pub trait SponsorshipReadModel: Send + Sync {
    /// Inserts a freshly projected row.
    async fn insert(&self, row: SponsorshipRow) -> Result<(), DomainError>;

    /// Looks up one row.
    async fn find(&self, id: Uuid) -> Result<Option<SponsorshipRow>, DomainError>;

    /// Lists sponsorships for one animal, newest first.
    async fn list_for_animal(&self, animal_id: Uuid) -> Result<Vec<SponsorshipRow>, DomainError>;

    /// Lists sponsorships made by one user, newest first.
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<SponsorshipRow>, DomainError>;

    /// Lists the most recent sponsorships across all animals.
    async fn list_recent(&self, limit: i64) -> Result<Vec<SponsorshipRow>, DomainError>;
}
