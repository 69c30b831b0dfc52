//! Shared application state.

use std::sync::Arc;

use pawhaven_animal::read_model::AnimalReadModel;
use pawhaven_core::clock::Clock;
use pawhaven_core::store::EventStore;
use pawhaven_sponsorship::read_model::SponsorshipReadModel;

/// Application state shared across all request handlers.
///
/// Built once at process startup and cloned per request; handlers receive
/// every collaborator through this struct.
#[derive(Clone)]
pub struct AppState {
    /// Time source for event timestamps.
    pub clock: Arc<dyn Clock>,
    /// The append-only event log.
    pub event_store: Arc<dyn EventStore>,
    /// Animal read-model port.
    pub animal_read_model: Arc<dyn AnimalReadModel>,
    /// Sponsorship read-model port.
    pub sponsorship_read_model: Arc<dyn SponsorshipReadModel>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        event_store: Arc<dyn EventStore>,
        animal_read_model: Arc<dyn AnimalReadModel>,
        sponsorship_read_model: Arc<dyn SponsorshipReadModel>,
    ) -> Self {
        Self {
            clock,
            event_store,
            animal_read_model,
            sponsorship_read_model,
        }
    }
}
