//! `PostgreSQL` implementation of the `AnimalReadModel` port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use pawhaven_animal::domain::events::AnimalKind;
use pawhaven_animal::read_model::{AnimalChanges, AnimalReadModel, AnimalRow};
use pawhaven_core::error::DomainError;

/// PostgreSQL-backed animal read model.
#[derive(Debug, Clone)]
pub struct PgAnimalReadModel {
    pool: PgPool,
}

impl PgAnimalReadModel {
    /// Creates a new `PgAnimalReadModel`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnimalReadModel for PgAnimalReadModel {
    async fn insert(&self, row: AnimalRow) -> Result<(), DomainError> {
        sqlx::query(
            r"
            INSERT INTO animals (id, name, kind, breed, photo_url, total_sponsored, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(row.id)
        .bind(&row.name)
        .bind(row.kind.as_str())
        .bind(&row.breed)
        .bind(&row.photo_url)
        .bind(row.total_sponsored)
        .bind(row.created_at)
        .execute(&self.pool)
        .await
        .map_err(infra)?;
        Ok(())
    }

    async fn apply_changes(&self, id: Uuid, changes: &AnimalChanges) -> Result<(), DomainError> {
        sqlx::query(
            r"
            UPDATE animals
            SET name      = COALESCE($2, name),
                kind      = COALESCE($3, kind),
                breed     = COALESCE($4, breed),
                photo_url = COALESCE($5, photo_url)
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(changes.name.as_deref())
        .bind(changes.kind.map(AnimalKind::as_str))
        .bind(changes.breed.as_deref())
        .bind(changes.photo_url.as_deref())
        .execute(&self.pool)
        .await
        .map_err(infra)?;
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM animals WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(infra)?;
        Ok(())
    }

    async fn add_to_total_sponsored(&self, id: Uuid, amount: f64) -> Result<(), DomainError> {
        // Relative increment in SQL; the projected value never round-trips
        // through application memory.
        sqlx::query("UPDATE animals SET total_sponsored = total_sponsored + $2 WHERE id = $1")
            .bind(id)
            .bind(amount)
            .execute(&self.pool)
            .await
            .map_err(infra)?;
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<AnimalRow>, DomainError> {
        let row = sqlx::query_as::<_, AnimalRecord>(
            r"
            SELECT id, name, kind, breed, photo_url, total_sponsored, created_at
            FROM animals
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(infra)?;

        row.map(AnimalRecord::into_row).transpose()
    }

    async fn list(&self) -> Result<Vec<AnimalRow>, DomainError> {
        let rows = sqlx::query_as::<_, AnimalRecord>(
            r"
            SELECT id, name, kind, breed, photo_url, total_sponsored, created_at
            FROM animals
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(infra)?;

        rows.into_iter().map(AnimalRecord::into_row).collect()
    }

    async fn list_by_kind(&self, kind: AnimalKind) -> Result<Vec<AnimalRow>, DomainError> {
        let rows = sqlx::query_as::<_, AnimalRecord>(
            r"
            SELECT id, name, kind, breed, photo_url, total_sponsored, created_at
            FROM animals
            WHERE kind = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(kind.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(infra)?;

        rows.into_iter().map(AnimalRecord::into_row).collect()
    }
}

/// Row type for reading animals from the database.
#[derive(Debug, sqlx::FromRow)]
struct AnimalRecord {
    id: Uuid,
    name: String,
    kind: String,
    breed: String,
    photo_url: String,
    total_sponsored: f64,
    created_at: DateTime<Utc>,
}

impl AnimalRecord {
    fn into_row(self) -> Result<AnimalRow, DomainError> {
        Ok(AnimalRow {
            id: self.id,
            name: self.name,
            kind: self.kind.parse()?,
            breed: self.breed,
            photo_url: self.photo_url,
            total_sponsored: self.total_sponsored,
            created_at: self.created_at,
        })
    }
}

fn infra(e: sqlx::Error) -> DomainError {
    DomainError::Infrastructure(e.to_string())
}
