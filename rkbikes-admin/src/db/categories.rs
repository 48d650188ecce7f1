//! Category queries

use rkbikes_common::db::models::Category;
use rkbikes_common::Result;
use sqlx::SqlitePool;

/// All categories, alphabetical
pub async fn list(pool: &SqlitePool) -> Result<Vec<Category>> {
    let categories =
        sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY name")
            .fetch_all(pool)
            .await?;
    Ok(categories)
}

/// Insert a category, returning its id
pub async fn create(pool: &SqlitePool, name: &str) -> Result<i64> {
    let result = sqlx::query("INSERT INTO categories (name) VALUES (?)")
        .bind(name)
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}
