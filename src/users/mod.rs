mod new;
mod user;

use axum::{routing::{get, post}, Router};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(new::create_user))
        .route("/{username}", get(user::get_user))
}
