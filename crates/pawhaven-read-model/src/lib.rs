//! PawHaven — PostgreSQL read model.
//!
//! Implements the read-model ports of the bounded contexts on the
//! denormalized `animals` and `sponsorships` tables.

pub mod pg_animal_read_model;
pub mod pg_sponsorship_read_model;

pub use pg_animal_read_model::PgAnimalReadModel;
pub use pg_sponsorship_read_model::PgSponsorshipReadModel;
