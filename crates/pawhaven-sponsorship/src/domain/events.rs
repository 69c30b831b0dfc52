//! Domain events for the Sponsorship context.

use chrono::{DateTime, Utc};
use pawhaven_core::event::{DomainEvent, EventKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Emitted when a sponsorship is created. The only Sponsorship event.
///
/// `created_at` is part of the payload so replaying the event reproduces the
/// exact same state without consulting a clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SponsorshipCreated {
    /// The sponsored animal.
    pub animal_id: Uuid,
    /// The sponsoring user, as supplied by the caller's identity layer.
    pub user_id: Uuid,
    /// The sponsoring user's email.
    pub user_email: String,
    /// Contribution amount; always positive.
    pub amount: f64,
    /// Contribution currency code.
    pub currency: String,
    /// When the sponsorship was made.
    pub created_at: DateTime<Utc>,
}

/// Event payload variants for the Sponsorship context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SponsorshipEventKind {
    /// A sponsorship has been created.
    SponsorshipCreated(SponsorshipCreated),
}

impl EventKind for SponsorshipEventKind {
    fn event_type(&self) -> &'static str {
        match self {
            SponsorshipEventKind::SponsorshipCreated(_) => "SponsorshipCreated",
        }
    }
}

/// Domain event envelope for the Sponsorship context.
pub type SponsorshipEvent = DomainEvent<SponsorshipEventKind>;

/// Aggregate type name shared by all Sponsorship events.
pub const SPONSORSHIP_AGGREGATE_TYPE: &str = "Sponsorship";
