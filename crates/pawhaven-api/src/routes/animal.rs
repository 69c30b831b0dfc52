//! Routes for the Animal bounded context.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Json, Router, routing::get};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use pawhaven_animal::application::{command_handlers, query_handlers};
use pawhaven_animal::domain::commands::{CreateAnimal, DeleteAnimal, UpdateAnimal};
use pawhaven_animal::domain::events::AnimalKind;
use pawhaven_animal::read_model::AnimalRow;
use pawhaven_sponsorship::application::query_handlers as sponsorship_queries;
use pawhaven_sponsorship::read_model::SponsorshipRow;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /.
#[derive(Debug, Deserialize)]
pub struct CreateAnimalRequest {
    /// The animal's name.
    pub name: String,
    /// The animal's species.
    pub kind: AnimalKind,
    /// The animal's breed.
    pub breed: String,
    /// URL of the animal's photo.
    pub photo_url: String,
}

/// Request body for PUT /{id}. Absent fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateAnimalRequest {
    /// New name, if changed.
    pub name: Option<String>,
    /// New species, if changed.
    pub kind: Option<AnimalKind>,
    /// New breed, if changed.
    pub breed: Option<String>,
    /// New photo URL, if changed.
    pub photo_url: Option<String>,
}

/// Query string for GET /.
#[derive(Debug, Deserialize)]
pub struct ListAnimalsQuery {
    /// Restrict the listing to one species.
    pub kind: Option<AnimalKind>,
}

/// POST /
#[instrument(skip(state, request))]
async fn create_animal(
    State(state): State<AppState>,
    Json(request): Json<CreateAnimalRequest>,
) -> Result<(StatusCode, Json<AnimalRow>), ApiError> {
    let command = CreateAnimal {
        correlation_id: Uuid::new_v4(),
        animal_id: Uuid::new_v4(),
        name: request.name,
        kind: request.kind,
        breed: request.breed,
        photo_url: request.photo_url,
    };

    info!(
        correlation_id = %command.correlation_id,
        animal_id = %command.animal_id,
        "handling create_animal command"
    );

    let row = command_handlers::handle_create_animal(
        &command,
        state.clock.as_ref(),
        &*state.event_store,
        &*state.animal_read_model,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /
#[instrument(skip(state))]
async fn list_animals(
    State(state): State<AppState>,
    Query(query): Query<ListAnimalsQuery>,
) -> Result<Json<Vec<AnimalRow>>, ApiError> {
    let rows = match query.kind {
        Some(kind) => {
            query_handlers::list_animals_by_kind(kind, &*state.animal_read_model).await?
        }
        None => query_handlers::list_animals(&*state.animal_read_model).await?,
    };
    Ok(Json(rows))
}

/// GET /{id}
#[instrument(skip(state))]
async fn get_animal(
    State(state): State<AppState>,
    Path(animal_id): Path<Uuid>,
) -> Result<Json<AnimalRow>, ApiError> {
    let row = query_handlers::get_animal_by_id(animal_id, &*state.animal_read_model).await?;
    Ok(Json(row))
}

/// PUT /{id}
#[instrument(skip(state, request), fields(animal_id = %animal_id))]
async fn update_animal(
    State(state): State<AppState>,
    Path(animal_id): Path<Uuid>,
    Json(request): Json<UpdateAnimalRequest>,
) -> Result<Json<AnimalRow>, ApiError> {
    let command = UpdateAnimal {
        correlation_id: Uuid::new_v4(),
        animal_id,
        name: request.name,
        kind: request.kind,
        breed: request.breed,
        photo_url: request.photo_url,
    };

    info!(correlation_id = %command.correlation_id, "handling update_animal command");

    let row = command_handlers::handle_update_animal(
        &command,
        state.clock.as_ref(),
        &*state.event_store,
        &*state.animal_read_model,
    )
    .await?;

    Ok(Json(row))
}

/// DELETE /{id}
#[instrument(skip(state))]
async fn delete_animal(
    State(state): State<AppState>,
    Path(animal_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let command = DeleteAnimal {
        correlation_id: Uuid::new_v4(),
        animal_id,
    };

    info!(correlation_id = %command.correlation_id, "handling delete_animal command");

    command_handlers::handle_delete_animal(
        &command,
        state.clock.as_ref(),
        &*state.event_store,
        &*state.animal_read_model,
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /{id}/sponsorships
#[instrument(skip(state))]
async fn list_animal_sponsorships(
    State(state): State<AppState>,
    Path(animal_id): Path<Uuid>,
) -> Result<Json<Vec<SponsorshipRow>>, ApiError> {
    let rows = sponsorship_queries::list_sponsorships_for_animal(
        animal_id,
        &*state.sponsorship_read_model,
    )
    .await?;
    Ok(Json(rows))
}

/// Returns the router for the animal context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_animals).post(create_animal))
        .route(
            "/{id}",
            get(get_animal).put(update_animal).delete(delete_animal),
        )
        .route("/{id}/sponsorships", get(list_animal_sponsorships))
}
