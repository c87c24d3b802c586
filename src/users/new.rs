use std::sync::Arc;

use axum::{debug_handler, extract::{Query, State}, Json};
use serde::Deserialize;

use crate::{models::User, registry::Registry, AppResult};

#[derive(Debug, Deserialize)]
pub(crate) struct NewUserQuery {
    username: String,
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn create_user(
    State(registry): State<Arc<Registry>>,
    Query(NewUserQuery { username }): Query<NewUserQuery>,
) -> AppResult<Json<User>> {
    Ok(Json(registry.create_user(&username).await?))
}
