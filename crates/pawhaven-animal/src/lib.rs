//! PawHaven — Animal bounded context.
//!
//! Responsible for the animal roster: creation, partial updates, deletion,
//! and the per-animal sponsorship total.

pub mod application;
pub mod domain;
pub mod projection;
pub mod read_model;
