use axum::{
    extract::State,
    http::StatusCode,
    routing::{post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::instrument;

use crate::state::AppState;

use super::dto::{UpsertUserRequest, UserResponse};
use super::repo::User;
use super::services::{is_valid_email, validate_profile};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/profile", put(update_profile))
}

type ApiError = (StatusCode, Json<Value>);

fn api_error(status: StatusCode, message: &str) -> ApiError {
    (status, Json(json!({ "error": message })))
}

fn internal<E: std::fmt::Display>(e: E) -> ApiError {
    api_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
}

#[instrument(skip(state, body))]
async fn register(
    State(state): State<AppState>,
    Json(body): Json<UpsertUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    if !is_valid_email(&body.email) {
        return Err(api_error(StatusCode::BAD_REQUEST, "Invalid email"));
    }
    if let Err(missing) = validate_profile(&body.profile) {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            &format!("Profile is incomplete: missing {}", missing.join(", ")),
        ));
    }

    match User::create(&state.db, &body.email, &body.profile)
        .await
        .map_err(internal)?
    {
        Some(user) => Ok((StatusCode::CREATED, Json(user.into()))),
        None => Err(api_error(StatusCode::CONFLICT, "Email already registered")),
    }
}

#[instrument(skip(state, body))]
async fn update_profile(
    State(state): State<AppState>,
    Json(body): Json<UpsertUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    if let Err(missing) = validate_profile(&body.profile) {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            &format!("Profile is incomplete: missing {}", missing.join(", ")),
        ));
    }

    match User::update_profile(&state.db, &body.email, &body.profile)
        .await
        .map_err(internal)?
    {
        Some(user) => Ok(Json(user.into())),
        None => Err(api_error(StatusCode::NOT_FOUND, "User not found")),
    }
}
