//! User management endpoints

use axum::extract::{Path, State};
use axum::Json;
use rkbikes_common::db::models::User;
use rkbikes_common::Error;
use serde_json::{json, Value};

use crate::db;
use crate::AppState;

/// GET /api/users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, Error> {
    let users = db::users::list(&state.db).await?;
    Ok(Json(users))
}

/// DELETE /api/users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, Error> {
    db::users::delete(&state.db, id).await?;
    Ok(Json(json!({ "success": true, "message": "User deleted" })))
}
