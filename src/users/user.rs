use std::sync::Arc;

use axum::{debug_handler, extract::{Path, State}, Json};

use crate::{models::User, registry::Registry, AppResult};

#[debug_handler(state = crate::AppState)]
pub(crate) async fn get_user(
    State(registry): State<Arc<Registry>>,
    Path(username): Path<String>,
) -> AppResult<Json<User>> {
    Ok(Json(registry.get_user(&username).await?))
}
