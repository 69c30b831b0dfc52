//! Animal read-model port.
//!
//! The read model is a derived cache kept in sync by projection; it is never
//! authoritative and can always be rebuilt by replaying the event log.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pawhaven_core::error::DomainError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::events::AnimalKind;

/// Denormalized animal row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimalRow {
    /// Aggregate identifier.
    pub id: Uuid,
    /// The animal's name.
    pub name: String,
    /// The animal's species.
    pub kind: AnimalKind,
    /// The animal's breed.
    pub breed: String,
    /// URL of the animal's photo.
    pub photo_url: String,
    /// Sum of all sponsorship amounts recorded for this animal.
    pub total_sponsored: f64,
    /// When the animal joined the roster.
    pub created_at: DateTime<Utc>,
}

/// Sparse patch applied to an animal row.
#[derive(Debug, Clone, Default)]
pub struct AnimalChanges {
    /// New name, if changed.
    pub name: Option<String>,
    /// New species, if changed.
    pub kind: Option<AnimalKind>,
    /// New breed, if changed.
    pub breed: Option<String>,
    /// New photo URL, if changed.
    pub photo_url: Option<String>,
}

/// Persistence port for the animal read model.
#[async_trait]
pub trait AnimalReadModel: Send + Sync {
    /// Inserts a freshly projected row.
    async fn insert(&self, row: AnimalRow) -> Result<(), DomainError>;

    /// Patches only the fields present in `changes`.
    async fn apply_changes(&self, id: Uuid, changes: &AnimalChanges) -> Result<(), DomainError>;

    /// Removes the row entirely.
    async fn remove(&self, id: Uuid) -> Result<(), DomainError>;

    /// Adds `amount` to the row's sponsorship total as a relative increment,
    /// never a read-modify-write from application memory.
    async fn add_to_total_sponsored(&self, id: Uuid, amount: f64) -> Result<(), DomainError>;

    /// Looks up one row.
    async fn find(&self, id: Uuid) -> Result<Option<AnimalRow>, DomainError>;

    /// Lists all rows, newest first.
    async fn list(&self) -> Result<Vec<AnimalRow>, DomainError>;

    /// Lists rows of one species, newest first.
    async fn list_by_kind(&self, kind: AnimalKind) -> Result<Vec<AnimalRow>, DomainError>;
}
