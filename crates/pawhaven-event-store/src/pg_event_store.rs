//! `PostgreSQL` implementation of the `EventStore` port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use pawhaven_core::error::DomainError;
use pawhaven_core::store::{EventStore, StoredEvent};

/// PostgreSQL-backed event store.
#[derive(Debug, Clone)]
pub struct PgEventStore {
    pool: PgPool,
}

impl PgEventStore {
    /// Creates a new `PgEventStore`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Reads the highest stored version for an aggregate (0 if none).
    async fn stream_head(&self, aggregate_id: Uuid) -> Result<i64, DomainError> {
        sqlx::query_scalar(
            "SELECT COALESCE(MAX(version), 0) FROM domain_events WHERE aggregate_id = $1",
        )
        .bind(aggregate_id)
        .fetch_one(&self.pool)
        .await
        .map_err(infra)
    }
}

#[async_trait]
impl EventStore for PgEventStore {
    async fn append(&self, events: &[StoredEvent]) -> Result<(), DomainError> {
        let Some(first) = events.first() else {
            return Ok(());
        };
        if events.iter().any(|e| e.aggregate_id != first.aggregate_id) {
            return Err(DomainError::Validation(
                "append must not span multiple aggregates".into(),
            ));
        }
        let aggregate_id = first.aggregate_id;
        let expected = first.version - 1;

        let mut tx = self.pool.begin().await.map_err(infra)?;

        let actual: i64 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(version), 0) FROM domain_events WHERE aggregate_id = $1",
        )
        .bind(aggregate_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(infra)?;

        if actual != expected {
            return Err(DomainError::ConcurrencyConflict {
                aggregate_id,
                expected,
                actual,
            });
        }

        for event in events {
            let result = sqlx::query(
                r"
                INSERT INTO domain_events
                    (event_id, aggregate_id, aggregate_type, event_type, payload,
                     metadata, version, correlation_id, causation_id, occurred_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                ",
            )
            .bind(event.event_id)
            .bind(event.aggregate_id)
            .bind(&event.aggregate_type)
            .bind(&event.event_type)
            .bind(&event.payload)
            .bind(&event.metadata)
            .bind(event.version)
            .bind(event.correlation_id)
            .bind(event.causation_id)
            .bind(event.occurred_at)
            .execute(&mut *tx)
            .await;

            if let Err(e) = result {
                // The MAX(version) check runs against an MVCC snapshot, so two
                // concurrent appends can both pass it; the unique index on
                // (aggregate_id, version) is the real serialization point.
                // A violation means a concurrent writer won.
                if is_unique_violation(&e) {
                    drop(tx);
                    let actual = self.stream_head(aggregate_id).await?;
                    return Err(DomainError::ConcurrencyConflict {
                        aggregate_id,
                        expected,
                        actual,
                    });
                }
                return Err(infra(e));
            }
        }

        tx.commit().await.map_err(infra)?;

        tracing::debug!(
            aggregate_id = %aggregate_id,
            count = events.len(),
            "events appended"
        );
        Ok(())
    }

    async fn events_for_aggregate(
        &self,
        aggregate_id: Uuid,
    ) -> Result<Vec<StoredEvent>, DomainError> {
        let rows = sqlx::query_as::<_, EventRow>(
            r"
            SELECT event_id, aggregate_id, aggregate_type, event_type, payload,
                   metadata, version, correlation_id, causation_id, occurred_at
            FROM domain_events
            WHERE aggregate_id = $1
            ORDER BY version ASC
            ",
        )
        .bind(aggregate_id)
        .fetch_all(&self.pool)
        .await
        .map_err(infra)?;

        Ok(rows.into_iter().map(EventRow::into_stored).collect())
    }

    async fn events_by_type(&self, event_type: &str) -> Result<Vec<StoredEvent>, DomainError> {
        let rows = sqlx::query_as::<_, EventRow>(
            r"
            SELECT event_id, aggregate_id, aggregate_type, event_type, payload,
                   metadata, version, correlation_id, causation_id, occurred_at
            FROM domain_events
            WHERE event_type = $1
            ORDER BY occurred_at ASC
            ",
        )
        .bind(event_type)
        .fetch_all(&self.pool)
        .await
        .map_err(infra)?;

        Ok(rows.into_iter().map(EventRow::into_stored).collect())
    }

    async fn events_by_aggregate_type(
        &self,
        aggregate_type: &str,
    ) -> Result<Vec<StoredEvent>, DomainError> {
        let rows = sqlx::query_as::<_, EventRow>(
            r"
            SELECT event_id, aggregate_id, aggregate_type, event_type, payload,
                   metadata, version, correlation_id, causation_id, occurred_at
            FROM domain_events
            WHERE aggregate_type = $1
            ORDER BY occurred_at ASC
            ",
        )
        .bind(aggregate_type)
        .fetch_all(&self.pool)
        .await
        .map_err(infra)?;

        Ok(rows.into_iter().map(EventRow::into_stored).collect())
    }
}

/// Row type for reading events from the database.
#[derive(Debug, sqlx::FromRow)]
struct EventRow {
    event_id: Uuid,
    aggregate_id: Uuid,
    aggregate_type: String,
    event_type: String,
    payload: serde_json::Value,
    metadata: Option<serde_json::Value>,
    version: i64,
    correlation_id: Uuid,
    causation_id: Uuid,
    occurred_at: DateTime<Utc>,
}

impl EventRow {
    fn into_stored(self) -> StoredEvent {
        StoredEvent {
            event_id: self.event_id,
            aggregate_id: self.aggregate_id,
            aggregate_type: self.aggregate_type,
            event_type: self.event_type,
            payload: self.payload,
            metadata: self.metadata,
            version: self.version,
            correlation_id: self.correlation_id,
            causation_id: self.causation_id,
            occurred_at: self.occurred_at,
        }
    }
}

fn infra(e: sqlx::Error) -> DomainError {
    DomainError::Infrastructure(e.to_string())
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db| db.code().as_deref() == Some("23505"))
}
