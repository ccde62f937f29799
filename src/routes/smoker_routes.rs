//! CRUD over smoker records, plus the time-since-quitting view.
//!
//! Every handler here sits behind the auth middleware, so an `Identity` is
//! always present; it is only used to attribute log lines.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use tracing::info;

use crate::models::{Identity, MessageResponse, Smoker, SmokerUpdate};
use crate::state::AppState;
use crate::store::StoreError;
use crate::utils::elapsed::elapsed_since;
use crate::utils::http_helpers::HTTPError;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/smokers", get(list_smokers).post(create_smoker))
        .route(
            "/smokers/{id}",
            get(get_smoker).put(update_smoker).delete(delete_smoker),
        )
        .route("/smokers/{id}/elapsed", get(time_since_quitting))
}

#[derive(Serialize)]
struct ElapsedResponse {
    message: &'static str,
    id: String,
    #[serde(rename = "stoppedSmoking")]
    stopped_smoking: String,
}

async fn find(state: &AppState, id: &str) -> Result<Smoker, HTTPError> {
    state
        .store
        .get(id)
        .await
        .ok_or_else(|| StoreError::NotFound(id.to_string()).into())
}

async fn list_smokers(State(state): State<AppState>) -> Json<Vec<Smoker>> {
    Json(state.store.list().await)
}

async fn get_smoker(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Smoker>, HTTPError> {
    Ok(Json(find(&state, &id).await?))
}

async fn create_smoker(
    State(state): State<AppState>,
    identity: Identity,
    payload: Result<Json<Smoker>, JsonRejection>,
) -> Result<Json<MessageResponse>, HTTPError> {
    let Json(smoker) = payload?;
    if smoker.id.trim().is_empty() {
        return Err(HTTPError::new(StatusCode::BAD_REQUEST, "smoker id must not be empty"));
    }

    let created = state.store.insert(smoker).await?;
    info!(
        event_name = "smokers.created",
        event_domain = "smokers",
        id = created.id.as_str(),
        requested_by = identity.username.as_str(),
        "smoker record created"
    );
    Ok(Json(MessageResponse::new("Smoker created", created.id)))
}

async fn update_smoker(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<String>,
    payload: Result<Json<SmokerUpdate>, JsonRejection>,
) -> Result<Json<MessageResponse>, HTTPError> {
    let Json(changes) = payload?;

    let updated = state.store.update(&id, changes).await?;
    info!(
        event_name = "smokers.updated",
        event_domain = "smokers",
        id = updated.id.as_str(),
        requested_by = identity.username.as_str(),
        "smoker record updated"
    );
    Ok(Json(MessageResponse::new("Smoker updated", updated.id)))
}

async fn delete_smoker(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, HTTPError> {
    let removed = state.store.delete(&id).await?;
    info!(
        event_name = "smokers.deleted",
        event_domain = "smokers",
        id = removed.id.as_str(),
        requested_by = identity.username.as_str(),
        "smoker record deleted"
    );
    Ok(Json(MessageResponse::new("Smoker deleted", removed.id)))
}

async fn time_since_quitting(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ElapsedResponse>, HTTPError> {
    let smoker = find(&state, &id).await?;
    let elapsed = elapsed_since(smoker.stopped_smoking, Utc::now());

    Ok(Json(ElapsedResponse {
        message: "You have not smoked for",
        id: smoker.id,
        stopped_smoking: elapsed.to_string(),
    }))
}
