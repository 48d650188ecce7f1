//! Bike catalog endpoints
//!
//! File upload is out of scope: `thumbnail` and image urls arrive as plain
//! strings, storage of the files themselves belongs to a collaborator.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rkbikes_common::db::models::Bike;
use rkbikes_common::Error;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::db;
use crate::db::bikes::BikeInput;
use crate::AppState;

/// POST and PUT /api/bikes payload
#[derive(Debug, Deserialize)]
pub struct BikePayload {
    pub category_id: Option<i64>,
    #[serde(default)]
    pub name: String,
    pub price: Option<f64>,
    pub engine: Option<String>,
    pub mileage: Option<String>,
    pub thumbnail: Option<String>,
    /// Comma-separated feature list, replaces the stored set
    pub features: Option<String>,
}

impl BikePayload {
    fn validate(&self) -> Result<BikeInput, Error> {
        if self.category_id.is_none() || self.name.trim().is_empty() {
            return Err(Error::InvalidInput(
                "category_id, name: category and name are required".to_string(),
            ));
        }
        Ok(BikeInput {
            category_id: self.category_id,
            name: self.name.trim().to_string(),
            price: self.price,
            engine: self.engine.clone(),
            mileage: self.mileage.clone(),
            thumbnail: self.thumbnail.clone(),
        })
    }
}

/// GET /api/bikes
pub async fn list_bikes(State(state): State<AppState>) -> Result<Json<Vec<Bike>>, Error> {
    let bikes = db::bikes::list(&state.db).await?;
    Ok(Json(bikes))
}

/// POST /api/bikes
pub async fn create_bike(
    State(state): State<AppState>,
    Json(body): Json<BikePayload>,
) -> Result<(StatusCode, Json<Value>), Error> {
    let input = body.validate()?;
    let bike_id = db::bikes::create(&state.db, &input).await?;
    if let Some(features) = &body.features {
        db::bikes::replace_features(&state.db, bike_id, features).await?;
    }
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Bike added", "bike_id": bike_id })),
    ))
}

/// PUT /api/bikes/:id
pub async fn update_bike(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<BikePayload>,
) -> Result<Json<Value>, Error> {
    let input = body.validate()?;
    db::bikes::update(&state.db, id, &input).await?;
    if let Some(features) = &body.features {
        db::bikes::replace_features(&state.db, id, features).await?;
    }
    Ok(Json(json!({ "success": true, "message": "Bike updated" })))
}

/// DELETE /api/bikes/:id
///
/// Removes the bike together with its images and features.
pub async fn delete_bike(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, Error> {
    db::bikes::delete(&state.db, id).await?;
    Ok(Json(json!({ "success": true, "message": "Bike deleted" })))
}

/// POST /api/bike-images payload
#[derive(Debug, Deserialize)]
pub struct BikeImages {
    pub bike_id: i64,
    #[serde(default)]
    pub images: Vec<String>,
}

/// POST /api/bike-images
///
/// Attaches additional image urls to a bike; inserts run in parallel.
pub async fn add_bike_images(
    State(state): State<AppState>,
    Json(body): Json<BikeImages>,
) -> Result<Json<Value>, Error> {
    if body.images.is_empty() {
        return Err(Error::InvalidInput("images: no images uploaded".to_string()));
    }
    db::bikes::add_images(&state.db, body.bike_id, &body.images).await?;
    Ok(Json(
        json!({ "success": true, "message": "Images uploaded successfully" }),
    ))
}
