use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::instrument;

use crate::state::AppState;
use crate::users::repo::User;
use crate::users::services::validate_profile;

use super::dto::{GenerateMenuRequest, MenuHistoryQuery, MenuHistoryResponse, MenuResponse};
use super::services::generate_menu;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/menu", post(generate))
        .route("/menus", get(history))
}

type ApiError = (StatusCode, Json<Value>);

fn api_error(status: StatusCode, message: &str) -> ApiError {
    (status, Json(json!({ "error": message })))
}

fn internal<E: std::fmt::Display>(e: E) -> ApiError {
    api_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
}

/// POST /menu { email, profile? }
#[instrument(skip(state, body))]
async fn generate(
    State(state): State<AppState>,
    Json(body): Json<GenerateMenuRequest>,
) -> Result<(StatusCode, Json<MenuResponse>), ApiError> {
    let user = User::find_by_email(&state.db, &body.email)
        .await
        .map_err(internal)?
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "User not found"))?;

    let profile = body.profile.unwrap_or_else(|| user.profile.0.clone());
    if let Err(missing) = validate_profile(&profile) {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            &format!("Profile is incomplete: missing {}", missing.join(", ")),
        ));
    }

    let (record, email_status) = generate_menu(&state, &user, &profile)
        .await
        .map_err(internal)?;

    Ok((
        StatusCode::CREATED,
        Json(MenuResponse::from_record(record, email_status)),
    ))
}

/// GET /menus?email= — prior version numbers for the user
#[instrument(skip(state))]
async fn history(
    State(state): State<AppState>,
    Query(q): Query<MenuHistoryQuery>,
) -> Result<Json<MenuHistoryResponse>, ApiError> {
    let user = User::find_by_email(&state.db, &q.email)
        .await
        .map_err(internal)?
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "User not found"))?;

    let versions = state.menus.list_versions(user.id).await.map_err(internal)?;
    Ok(Json(MenuHistoryResponse { versions }))
}
