//! `PostgreSQL` implementation of the `SponsorshipReadModel` port.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use pawhaven_core::error::DomainError;
use pawhaven_sponsorship::read_model::{SponsorshipReadModel, SponsorshipRow};

/// PostgreSQL-backed sponsorship read model.
#[derive(Debug, Clone)]
pub struct PgSponsorshipReadModel {
    pool: PgPool,
}

impl PgSponsorshipReadModel {
    /// Creates a new `PgSponsorshipReadModel`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SponsorshipReadModel for PgSponsorshipReadModel {
    async fn insert(&self, row: SponsorshipRow) -> Result<(), DomainError> {
        sqlx::query(
            r"
            INSERT INTO sponsorships (id, animal_id, user_id, user_email, amount, currency, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(row.id)
        .bind(row.animal_id)
        .bind(row.user_id)
        .bind(&row.user_email)
        .bind(row.amount)
        .bind(&row.currency)
        .bind(row.created_at)
        .execute(&self.pool)
        .await
        .map_err(infra)?;
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<SponsorshipRow>, DomainError> {
        sqlx::query_as::<_, SponsorshipRecord>(
            r"
            SELECT id, animal_id, user_id, user_email, amount, currency, created_at
            FROM sponsorships
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(infra)
        .map(|row| row.map(SponsorshipRecord::into_row))
    }

    async fn list_for_animal(&self, animal_id: Uuid) -> Result<Vec<SponsorshipRow>, DomainError> {
        let rows = sqlx::query_as::<_, SponsorshipRecord>(
            r"
            SELECT id, animal_id, user_id, user_email, amount, currency, created_at
            FROM sponsorships
            WHERE animal_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(animal_id)
        .fetch_all(&self.pool)
        .await
        .map_err(infra)?;

        Ok(rows.into_iter().map(SponsorshipRecord::into_row).collect())
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<SponsorshipRow>, DomainError> {
        let rows = sqlx::query_as::<_, SponsorshipRecord>(
            r"
            SELECT id, animal_id, user_id, user_email, amount, currency, created_at
            FROM sponsorships
            WHERE user_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(infra)?;

        Ok(rows.into_iter().map(SponsorshipRecord::into_row).collect())
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<SponsorshipRow>, DomainError> {
        let rows = sqlx::query_as::<_, SponsorshipRecord>(
            r"
            SELECT id, animal_id, user_id, user_email, amount, currency, created_at
            FROM sponsorships
            ORDER BY created_at DESC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(infra)?;

        Ok(rows.into_iter().map(SponsorshipRecord::into_row).collect())
    }
}

/// Row type for reading sponsorships from the database.
#[derive(Debug, sqlx::FromRow)]
struct SponsorshipRecord {
    id: Uuid,
    animal_id: Uuid,
    user_id: Uuid,
    user_email: String,
    amount: f64,
    currency: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl SponsorshipRecord {
    fn into_row(self) -> SponsorshipRow {
        SponsorshipRow {
            id: self.id,
            animal_id: self.animal_id,
            user_id: self.user_id,
            user_email: self.user_email,
            amount: self.amount,
            currency: self.currency,
            created_at: self.created_at,
        }
    }
}

fn infra(e: sqlx::Error) -> DomainError {
    DomainError::Infrastructure(e.to_string())
}
