use std::sync::Arc;

use axum::{debug_handler, extract::{Query, State}, Json};
use serde::{Deserialize, Serialize};

use crate::{models::Whiteboard, registry::Registry, AppResult};

#[derive(Debug, Deserialize)]
pub(crate) struct NewWhiteboardQuery {
    creator: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreatedWhiteboard {
    whiteboard_id: String,
    #[serde(flatten)]
    whiteboard: Whiteboard,
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn create_whiteboard(
    State(registry): State<Arc<Registry>>,
    Query(NewWhiteboardQuery { creator }): Query<NewWhiteboardQuery>,
) -> AppResult<Json<CreatedWhiteboard>> {
    let whiteboard = registry.create_whiteboard(&creator).await?;

    Ok(Json(CreatedWhiteboard {
        whiteboard_id: whiteboard.id.clone(),
        whiteboard,
    }))
}
