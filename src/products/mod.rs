pub mod catalog;
pub mod dto;
pub mod handlers;
pub mod remote;
pub mod scoring;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::router()
}
