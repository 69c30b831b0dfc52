//! PawHaven — Sponsorship bounded context.
//!
//! Responsible for sponsorship transactions. A sponsorship is write-once:
//! created in a single event, never updated or deleted. Creating one also
//! records the contribution on the sponsored animal's aggregate.

pub mod application;
pub mod domain;
pub mod projection;
pub mod read_model;
