mod calories;
mod dto;
mod error;
mod extract;
mod fallback;
pub mod handlers;
pub mod model;
mod prompt;
pub mod repo;
mod services;
mod validate;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::router()
}
