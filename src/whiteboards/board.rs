use std::sync::Arc;

use axum::{debug_handler, extract::{Path, State}, Json};

use crate::{models::Whiteboard, registry::Registry, AppResult};

#[debug_handler(state = crate::AppState)]
pub(crate) async fn whiteboard(
    State(registry): State<Arc<Registry>>,
    Path(whiteboard_id): Path<String>,
) -> AppResult<Json<Whiteboard>> {
    Ok(Json(registry.get_whiteboard(&whiteboard_id).await?))
}
