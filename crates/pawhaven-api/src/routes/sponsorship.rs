//! Routes for the Sponsorship bounded context.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Json, Router, routing::get, routing::post};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use pawhaven_sponsorship::application::{command_handlers, query_handlers};
use pawhaven_sponsorship::domain::commands::CreateSponsorship;
use pawhaven_sponsorship::read_model::SponsorshipRow;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /.
///
/// `user_id` and `user_email` are the caller's identity as established by the
/// upstream authentication layer; this API treats them as opaque.
#[derive(Debug, Deserialize)]
pub struct CreateSponsorshipRequest {
    /// The animal to sponsor.
    pub animal_id: Uuid,
    /// The sponsoring user.
    pub user_id: Uuid,
    /// The sponsoring user's email.
    pub user_email: String,
    /// Contribution amount.
    pub amount: f64,
    /// Contribution currency code; defaults to USD.
    pub currency: Option<String>,
}

/// Query string for GET /recent.
#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    /// Maximum number of rows to return.
    pub limit: Option<i64>,
}

/// POST /
#[instrument(skip(state, request), fields(animal_id = %request.animal_id))]
async fn create_sponsorship(
    State(state): State<AppState>,
    Json(request): Json<CreateSponsorshipRequest>,
) -> Result<(StatusCode, Json<SponsorshipRow>), ApiError> {
    let command = CreateSponsorship {
        correlation_id: Uuid::new_v4(),
        sponsorship_id: Uuid::new_v4(),
        animal_id: request.animal_id,
        user_id: request.user_id,
        user_email: request.user_email,
        amount: request.amount,
        currency: request.currency,
    };

    info!(
        correlation_id = %command.correlation_id,
        sponsorship_id = %command.sponsorship_id,
        "handling create_sponsorship command"
    );

    let row = command_handlers::handle_create_sponsorship(
        &command,
        state.clock.as_ref(),
        &*state.event_store,
        &*state.animal_read_model,
        &*state.sponsorship_read_model,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /recent
#[instrument(skip(state))]
async fn list_recent(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<Vec<SponsorshipRow>>, ApiError> {
    let rows = query_handlers::list_recent_sponsorships(
        query.limit,
        &*state.sponsorship_read_model,
    )
    .await?;
    Ok(Json(rows))
}

/// GET /user/{user_id}
#[instrument(skip(state))]
async fn list_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<SponsorshipRow>>, ApiError> {
    let rows =
        query_handlers::list_sponsorships_for_user(user_id, &*state.sponsorship_read_model)
            .await?;
    Ok(Json(rows))
}

/// Returns the router for the sponsorship context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_sponsorship))
        .route("/recent", get(list_recent))
        .route("/user/{user_id}", get(list_for_user))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::Request;
    use chrono::Utc;
    use pawhaven_test_support::{
        FixedClock, InMemoryAnimalReadModel, InMemoryEventStore, InMemorySponsorshipReadModel,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    fn test_app_state() -> AppState {
        AppState::new(
            Arc::new(FixedClock(Utc::now())),
            Arc::new(InMemoryEventStore::default()),
            Arc::new(InMemoryAnimalReadModel::default()),
            Arc::new(InMemorySponsorshipReadModel::default()),
        )
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    /// Creates an animal through the full app and returns its id.
    async fn create_animal(state: &AppState) -> Uuid {
        let response = crate::app(state.clone())
            .oneshot(post_json(
                "/api/v1/animals",
                &serde_json::json!({
                    "name": "Rex",
                    "kind": "dog",
                    "breed": "Labrador",
                    "photo_url": "https://example.org/rex.jpg"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        Uuid::parse_str(body_json(response).await["id"].as_str().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_create_sponsorship_returns_201_and_updates_animal_total() {
        // Arrange
        let state = test_app_state();
        let animal_id = create_animal(&state).await;
        let user_id = Uuid::new_v4();
        let body = serde_json::json!({
            "animal_id": animal_id,
            "user_id": user_id,
            "user_email": "sponsor@example.org",
            "amount": 25.5
        });

        // Act
        let response = crate::app(state.clone())
            .oneshot(post_json("/api/v1/sponsorships", &body))
            .await
            .unwrap();

        // Assert — sponsorship row returned with the USD default.
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["animal_id"], animal_id.to_string());
        assert_eq!(json["amount"], 25.5);
        assert_eq!(json["currency"], "USD");

        // Assert — animal read row reflects the contribution.
        let get = Request::builder()
            .method("GET")
            .uri(format!("/api/v1/animals/{animal_id}"))
            .body(Body::empty())
            .unwrap();
        let response = crate::app(state).oneshot(get).await.unwrap();
        let json = body_json(response).await;
        assert_eq!(json["total_sponsored"], 25.5);
    }

    #[tokio::test]
    async fn test_create_sponsorship_for_unknown_animal_returns_404() {
        // Arrange
        let state = test_app_state();
        let body = serde_json::json!({
            "animal_id": Uuid::new_v4(),
            "user_id": Uuid::new_v4(),
            "user_email": "sponsor@example.org",
            "amount": 10.0
        });

        // Act
        let response = crate::app(state)
            .oneshot(post_json("/api/v1/sponsorships", &body))
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"], "aggregate_not_found");
    }

    #[tokio::test]
    async fn test_create_sponsorship_with_non_positive_amount_returns_400() {
        // Arrange
        let state = test_app_state();
        let animal_id = create_animal(&state).await;
        let body = serde_json::json!({
            "animal_id": animal_id,
            "user_id": Uuid::new_v4(),
            "user_email": "sponsor@example.org",
            "amount": -5.0
        });

        // Act
        let response = crate::app(state)
            .oneshot(post_json("/api/v1/sponsorships", &body))
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_recent_and_per_user_and_per_animal_listings() {
        // Arrange — one animal, two sponsorships by the same user.
        let state = test_app_state();
        let animal_id = create_animal(&state).await;
        let user_id = Uuid::new_v4();
        for amount in [10.0, 5.0] {
            let body = serde_json::json!({
                "animal_id": animal_id,
                "user_id": user_id,
                "user_email": "sponsor@example.org",
                "amount": amount
            });
            let response = crate::app(state.clone())
                .oneshot(post_json("/api/v1/sponsorships", &body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        // Act / Assert — recent.
        let recent = Request::builder()
            .method("GET")
            .uri("/api/v1/sponsorships/recent?limit=1")
            .body(Body::empty())
            .unwrap();
        let response = crate::app(state.clone()).oneshot(recent).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);

        // Act / Assert — per user.
        let per_user = Request::builder()
            .method("GET")
            .uri(format!("/api/v1/sponsorships/user/{user_id}"))
            .body(Body::empty())
            .unwrap();
        let response = crate::app(state.clone()).oneshot(per_user).await.unwrap();
        assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);

        // Act / Assert — per animal, via the animal router.
        let per_animal = Request::builder()
            .method("GET")
            .uri(format!("/api/v1/animals/{animal_id}/sponsorships"))
            .body(Body::empty())
            .unwrap();
        let response = crate::app(state).oneshot(per_animal).await.unwrap();
        assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);
    }
}
