//! Category endpoints

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use rkbikes_common::db::models::Category;
use rkbikes_common::Error;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::db;
use crate::AppState;

/// GET /api/categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, Error> {
    let categories = db::categories::list(&state.db).await?;
    Ok(Json(categories))
}

#[derive(Debug, Deserialize)]
pub struct NewCategory {
    #[serde(default)]
    pub name: String,
}

/// POST /api/categories
pub async fn create_category(
    State(state): State<AppState>,
    Json(body): Json<NewCategory>,
) -> Result<(StatusCode, Json<Value>), Error> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(Error::InvalidInput("name: required".to_string()));
    }
    let id = db::categories::create(&state.db, name).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Category added", "id": id })),
    ))
}
