//! PawHaven — PostgreSQL event store.
//!
//! Implements the `EventStore` port on a single `domain_events` table with a
//! `UNIQUE (aggregate_id, version)` constraint as the concurrency gate.

pub mod pg_event_store;

pub use pg_event_store::PgEventStore;
