mod board;
mod membership;
mod new;

use axum::{routing::{get, post}, Router};
use serde::Deserialize;

use crate::AppState;

#[derive(Debug, Deserialize)]
pub(crate) struct UsernameQuery {
    username: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(new::create_whiteboard))
        .route("/{whiteboard_id}", get(board::whiteboard))
        .route("/{whiteboard_id}/join", post(membership::join))
        .route("/{whiteboard_id}/leave", post(membership::leave))
}
