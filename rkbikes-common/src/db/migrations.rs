//! Idempotent schema creation
//!
//! Every statement uses CREATE TABLE IF NOT EXISTS, so calling
//! [`create_schema`] on every startup is safe. Booking rows are inserted by
//! the public-facing site; this service only reads them and updates status.

use crate::Result;
use sqlx::SqlitePool;
use tracing::info;

/// Status CHECK fragment shared by the three booking tables
const STATUS_COLUMN: &str =
    "status TEXT NOT NULL DEFAULT 'pending' CHECK (status IN ('pending', 'confirmed', 'completed', 'cancelled'))";

/// Create all tables (idempotent, safe to call multiple times)
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    create_users_table(pool).await?;
    create_categories_table(pool).await?;
    create_bikes_table(pool).await?;
    create_bike_features_table(pool).await?;
    create_bike_images_table(pool).await?;
    create_testdrive_bookings_table(pool).await?;
    create_service_bookings_table(pool).await?;
    create_bookings_table(pool).await?;
    create_contact_messages_table(pool).await?;

    info!("Database schema ready");
    Ok(())
}

async fn create_users_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            phone TEXT,
            gender TEXT,
            role TEXT NOT NULL DEFAULT 'customer',
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_categories_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_bikes_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bikes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            category_id INTEGER REFERENCES categories(id),
            name TEXT NOT NULL,
            price REAL,
            engine TEXT,
            mileage TEXT,
            thumbnail TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_bike_features_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bike_features (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            bike_id INTEGER NOT NULL REFERENCES bikes(id) ON DELETE CASCADE,
            feature TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_bike_images_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bike_images (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            bike_id INTEGER NOT NULL REFERENCES bikes(id) ON DELETE CASCADE,
            image_url TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_testdrive_bookings_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS testdrive_bookings (
            booking_id INTEGER PRIMARY KEY AUTOINCREMENT,
            full_name TEXT NOT NULL,
            email TEXT,
            phone TEXT,
            bike_model TEXT NOT NULL,
            preferred_date TEXT,
            {}
        )
        "#,
        STATUS_COLUMN
    ))
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_service_bookings_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS service_bookings (
            booking_id INTEGER PRIMARY KEY AUTOINCREMENT,
            full_name TEXT NOT NULL,
            email TEXT,
            phone TEXT,
            service_type TEXT NOT NULL,
            preferred_date TEXT,
            {}
        )
        "#,
        STATUS_COLUMN
    ))
    .execute(pool)
    .await?;
    Ok(())
}

/// Bike purchase bookings keep the original table name `bookings`
async fn create_bookings_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            booking_id INTEGER PRIMARY KEY AUTOINCREMENT,
            full_name TEXT NOT NULL,
            email TEXT,
            phone TEXT,
            bike_name TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            {}
        )
        "#,
        STATUS_COLUMN
    ))
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_contact_messages_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS contact_messages (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            subject TEXT,
            message TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_memory_database;

    #[tokio::test]
    async fn schema_creation_is_idempotent() {
        let pool = init_memory_database().await.unwrap();
        // Second pass must not fail
        create_schema(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn status_check_rejects_unknown_values() {
        let pool = init_memory_database().await.unwrap();

        let result = sqlx::query(
            "INSERT INTO testdrive_bookings (full_name, bike_model, status) VALUES ('A', 'X', 'done')",
        )
        .execute(&pool)
        .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn booking_ids_autoincrement_per_table() {
        let pool = init_memory_database().await.unwrap();

        sqlx::query("INSERT INTO testdrive_bookings (full_name, bike_model) VALUES ('A', 'X')")
            .execute(&pool)
            .await
            .unwrap();
        let second =
            sqlx::query("INSERT INTO service_bookings (full_name, service_type) VALUES ('B', 'Oil')")
                .execute(&pool)
                .await
                .unwrap();

        // Independent id namespaces: both start at 1
        assert_eq!(second.last_insert_rowid(), 1);
    }
}
