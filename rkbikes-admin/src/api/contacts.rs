//! Contact message endpoints

use axum::extract::State;
use axum::Json;
use rkbikes_common::db::models::ContactMessage;
use rkbikes_common::Error;

use crate::db;
use crate::AppState;

/// GET /api/contact-messages
pub async fn list_contact_messages(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContactMessage>>, Error> {
    let messages = db::contacts::list(&state.db).await?;
    Ok(Json(messages))
}
