//! Test read models — in-memory and failing implementations of the
//! read-model ports.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use pawhaven_animal::domain::events::AnimalKind;
use pawhaven_animal::read_model::{AnimalChanges, AnimalReadModel, AnimalRow};
use pawhaven_core::error::DomainError;
use pawhaven_sponsorship::read_model::{SponsorshipReadModel, SponsorshipRow};
use uuid::Uuid;

/// In-memory animal read model. Missing-row updates are silent no-ops,
/// matching SQL `UPDATE`/`DELETE` semantics.
#[derive(Debug, Default)]
pub struct InMemoryAnimalReadModel {
    rows: Mutex<HashMap<Uuid, AnimalRow>>,
}

#[async_trait]
impl AnimalReadModel for InMemoryAnimalReadModel {
    async fn insert(&self, row: AnimalRow) -> Result<(), DomainError> {
        self.rows.lock().unwrap().insert(row.id, row);
        Ok(())
    }

    async fn apply_changes(&self, id: Uuid, changes: &AnimalChanges) -> Result<(), DomainError> {
        if let Some(row) = self.rows.lock().unwrap().get_mut(&id) {
            if let Some(name) = &changes.name {
                row.name.clone_from(name);
            }
            if let Some(kind) = changes.kind {
                row.kind = kind;
            }
            if let Some(breed) = &changes.breed {
                row.breed.clone_from(breed);
            }
            if let Some(photo_url) = &changes.photo_url {
                row.photo_url.clone_from(photo_url);
            }
        }
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> Result<(), DomainError> {
        self.rows.lock().unwrap().remove(&id);
        Ok(())
    }

    async fn add_to_total_sponsored(&self, id: Uuid, amount: f64) -> Result<(), DomainError> {
        if let Some(row) = self.rows.lock().unwrap().get_mut(&id) {
            row.total_sponsored += amount;
        }
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<AnimalRow>, DomainError> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<AnimalRow>, DomainError> {
        let mut rows: Vec<AnimalRow> = self.rows.lock().unwrap().values().cloned().collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn list_by_kind(&self, kind: AnimalKind) -> Result<Vec<AnimalRow>, DomainError> {
        let mut rows: Vec<AnimalRow> = self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.kind == kind)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}

/// In-memory sponsorship read model.
#[derive(Debug, Default)]
pub struct InMemorySponsorshipReadModel {
    rows: Mutex<Vec<SponsorshipRow>>,
}

#[async_trait]
impl SponsorshipReadModel for InMemorySponsorshipReadModel {
    async fn insert(&self, row: SponsorshipRow) -> Result<(), DomainError> {
        self.rows.lock().unwrap().push(row);
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<SponsorshipRow>, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn list_for_animal(&self, animal_id: Uuid) -> Result<Vec<SponsorshipRow>, DomainError> {
        let mut rows: Vec<SponsorshipRow> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.animal_id == animal_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<SponsorshipRow>, DomainError> {
        let mut rows: Vec<SponsorshipRow> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<SponsorshipRow>, DomainError> {
        let mut rows: Vec<SponsorshipRow> = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(rows)
    }
}

/// An animal read model that always returns an infrastructure error.
#[derive(Debug)]
pub struct FailingAnimalReadModel;

#[async_trait]
impl AnimalReadModel for FailingAnimalReadModel {
    async fn insert(&self, _row: AnimalRow) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn apply_changes(&self, _id: Uuid, _changes: &AnimalChanges) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn remove(&self, _id: Uuid) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn add_to_total_sponsored(&self, _id: Uuid, _amount: f64) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn find(&self, _id: Uuid) -> Result<Option<AnimalRow>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn list(&self) -> Result<Vec<AnimalRow>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn list_by_kind(&self, _kind: AnimalKind) -> Result<Vec<AnimalRow>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}

/// A sponsorship read model that always returns an infrastructure error.
#[derive(Debug)]
pub struct FailingSponsorshipReadModel;

#[async_trait]
impl SponsorshipReadModel for FailingSponsorshipReadModel {
    async fn insert(&self, _row: SponsorshipRow) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn find(&self, _id: Uuid) -> Result<Option<SponsorshipRow>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn list_for_animal(&self, _animal_id: Uuid) -> Result<Vec<SponsorshipRow>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn list_for_user(&self, _user_id: Uuid) -> Result<Vec<SponsorshipRow>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn list_recent(&self, _limit: i64) -> Result<Vec<SponsorshipRow>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}
