//! User queries

use rkbikes_common::db::models::User;
use rkbikes_common::Result;
use sqlx::SqlitePool;

/// All users, newest first
pub async fn list(pool: &SqlitePool) -> Result<Vec<User>> {
    let users = sqlx::query_as::<_, User>(
        "SELECT id, first_name, last_name, email, phone, gender, role, created_at \
         FROM users ORDER BY id DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(users)
}

/// Delete a user by id
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<()> {
    sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Total registered users
pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    Ok(total)
}
