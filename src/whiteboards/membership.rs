use std::sync::Arc;

use axum::{debug_handler, extract::{Path, Query, State}, Json};

use crate::{models::Whiteboard, registry::Registry, AppResult};

use super::UsernameQuery;

#[debug_handler(state = crate::AppState)]
pub(crate) async fn join(
    State(registry): State<Arc<Registry>>,
    Path(whiteboard_id): Path<String>,
    Query(UsernameQuery { username }): Query<UsernameQuery>,
) -> AppResult<Json<Whiteboard>> {
    Ok(Json(registry.join(&whiteboard_id, &username).await?))
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn leave(
    State(registry): State<Arc<Registry>>,
    Path(whiteboard_id): Path<String>,
    Query(UsernameQuery { username }): Query<UsernameQuery>,
) -> AppResult<Json<Whiteboard>> {
    Ok(Json(registry.leave(&whiteboard_id, &username).await?))
}
