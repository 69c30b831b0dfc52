//! Domain events for the Animal context.

use chrono::{DateTime, Utc};
use pawhaven_core::error::DomainError;
use pawhaven_core::event::{DomainEvent, EventKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The species an animal belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimalKind {
    /// A cat.
    #[default]
    Cat,
    /// A dog.
    Dog,
    /// A bird.
    Bird,
}

impl AnimalKind {
    /// Returns the lowercase wire/storage name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AnimalKind::Cat => "cat",
            AnimalKind::Dog => "dog",
            AnimalKind::Bird => "bird",
        }
    }
}

impl std::str::FromStr for AnimalKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cat" => Ok(AnimalKind::Cat),
            "dog" => Ok(AnimalKind::Dog),
            "bird" => Ok(AnimalKind::Bird),
            other => Err(DomainError::Validation(format!(
                "unknown animal kind: {other}"
            ))),
        }
    }
}

impl std::fmt::Display for AnimalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Emitted when an animal joins the roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimalCreated {
    /// The animal's name.
    pub name: String,
    /// The animal's species.
    pub kind: AnimalKind,
    /// The animal's breed.
    pub breed: String,
    /// URL of the animal's photo.
    pub photo_url: String,
}

/// Emitted when animal details change. A sparse patch: absent fields leave
/// the existing values unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnimalUpdated {
    /// New name, if changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New species, if changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<AnimalKind>,
    /// New breed, if changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    /// New photo URL, if changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl AnimalUpdated {
    /// Returns `true` when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.kind.is_none() && self.breed.is_none() && self.photo_url.is_none()
    }
}

/// Emitted when an animal leaves the roster. Terminal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimalDeleted {
    /// When the deletion was recorded.
    pub deleted_at: DateTime<Utc>,
}

/// Emitted when a sponsorship is recorded against an animal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimalSponsored {
    /// The sponsorship aggregate this contribution belongs to.
    pub sponsorship_id: Uuid,
    /// The sponsoring user.
    pub user_id: Uuid,
    /// Contribution amount; always positive.
    pub amount: f64,
    /// Contribution currency code.
    pub currency: String,
}

/// Event payload variants for the Animal context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AnimalEventKind {
    /// An animal has joined the roster.
    AnimalCreated(AnimalCreated),
    /// An animal's details have changed.
    AnimalUpdated(AnimalUpdated),
    /// An animal has left the roster.
    AnimalDeleted(AnimalDeleted),
    /// A sponsorship has been recorded against an animal.
    AnimalSponsored(AnimalSponsored),
}

impl EventKind for AnimalEventKind {
    fn event_type(&self) -> &'static str {
        match self {
            AnimalEventKind::AnimalCreated(_) => "AnimalCreated",
            AnimalEventKind::AnimalUpdated(_) => "AnimalUpdated",
            AnimalEventKind::AnimalDeleted(_) => "AnimalDeleted",
            AnimalEventKind::AnimalSponsored(_) => "AnimalSponsored",
        }
    }
}

/// Domain event envelope for the Animal context.
pub type AnimalEvent = DomainEvent<AnimalEventKind>;

/// Aggregate type name shared by all Animal events.
pub const ANIMAL_AGGREGATE_TYPE: &str = "Animal";
