//! Commands for the Animal context.

use uuid::Uuid;

use super::events::AnimalKind;

/// Command to add a new animal to the roster.
#[derive(Debug, Clone)]
pub struct CreateAnimal {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The identifier for the new animal.
    pub animal_id: Uuid,
    /// The animal's name.
    pub name: String,
    /// The animal's species.
    pub kind: AnimalKind,
    /// The animal's breed.
    pub breed: String,
    /// URL of the animal's photo.
    pub photo_url: String,
}

/// Command to change animal details. Absent fields are left unchanged.
#[derive(Debug, Clone)]
pub struct UpdateAnimal {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The animal to update.
    pub animal_id: Uuid,
    /// New name, if changed.
    pub name: Option<String>,
    /// New species, if changed.
    pub kind: Option<AnimalKind>,
    /// New breed, if changed.
    pub breed: Option<String>,
    /// New photo URL, if changed.
    pub photo_url: Option<String>,
}

/// Command to remove an animal from the roster.
#[derive(Debug, Clone)]
pub struct DeleteAnimal {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The animal to delete.
    pub animal_id: Uuid,
}
