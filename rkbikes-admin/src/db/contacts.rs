//! Contact message queries

use rkbikes_common::db::models::ContactMessage;
use rkbikes_common::Result;
use sqlx::SqlitePool;

/// All contact messages, newest first
pub async fn list(pool: &SqlitePool) -> Result<Vec<ContactMessage>> {
    let messages = sqlx::query_as::<_, ContactMessage>(
        "SELECT id, name, email, subject, message, created_at \
         FROM contact_messages ORDER BY id DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(messages)
}

/// Total contact messages received
pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contact_messages")
        .fetch_one(pool)
        .await?;
    Ok(total)
}
