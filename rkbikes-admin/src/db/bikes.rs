//! Bike queries: listing with features, CRUD, image attachment

use futures::future::try_join_all;
use rkbikes_common::db::models::Bike;
use rkbikes_common::Result;
use sqlx::SqlitePool;

/// Fields shared by bike create and update
#[derive(Debug, Clone)]
pub struct BikeInput {
    pub category_id: Option<i64>,
    pub name: String,
    pub price: Option<f64>,
    pub engine: Option<String>,
    pub mileage: Option<String>,
    pub thumbnail: Option<String>,
}

/// All bikes, newest first, joined with category name and with the
/// comma-joined feature list filled in per bike
pub async fn list(pool: &SqlitePool) -> Result<Vec<Bike>> {
    let mut bikes = sqlx::query_as::<_, Bike>(
        "SELECT b.id, b.category_id, c.name AS category_name, b.name, \
         b.price, b.engine, b.mileage, b.thumbnail \
         FROM bikes b \
         LEFT JOIN categories c ON b.category_id = c.id \
         ORDER BY b.id DESC",
    )
    .fetch_all(pool)
    .await?;

    for bike in &mut bikes {
        bike.features = features_for(pool, bike.id).await?.join(", ");
    }
    Ok(bikes)
}

/// Feature strings attached to one bike
pub async fn features_for(pool: &SqlitePool, bike_id: i64) -> Result<Vec<String>> {
    let features: Vec<String> =
        sqlx::query_scalar("SELECT feature FROM bike_features WHERE bike_id = ?")
            .bind(bike_id)
            .fetch_all(pool)
            .await?;
    Ok(features)
}

/// Insert a bike, returning its id
pub async fn create(pool: &SqlitePool, input: &BikeInput) -> Result<i64> {
    let result = sqlx::query(
        "INSERT INTO bikes (category_id, name, price, engine, mileage, thumbnail) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(input.category_id)
    .bind(&input.name)
    .bind(input.price)
    .bind(&input.engine)
    .bind(&input.mileage)
    .bind(&input.thumbnail)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Overwrite a bike's fields
pub async fn update(pool: &SqlitePool, id: i64, input: &BikeInput) -> Result<()> {
    sqlx::query(
        "UPDATE bikes SET category_id = ?, name = ?, price = ?, engine = ?, \
         mileage = ?, thumbnail = ? WHERE id = ?",
    )
    .bind(input.category_id)
    .bind(&input.name)
    .bind(input.price)
    .bind(&input.engine)
    .bind(&input.mileage)
    .bind(&input.thumbnail)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}

/// Delete a bike together with its images and features
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<()> {
    sqlx::query("DELETE FROM bike_images WHERE bike_id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    sqlx::query("DELETE FROM bike_features WHERE bike_id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    sqlx::query("DELETE FROM bikes WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Replace a bike's feature list from a comma-separated string
pub async fn replace_features(pool: &SqlitePool, bike_id: i64, features: &str) -> Result<()> {
    sqlx::query("DELETE FROM bike_features WHERE bike_id = ?")
        .bind(bike_id)
        .execute(pool)
        .await?;

    let inserts = features
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(|feature| {
            sqlx::query("INSERT INTO bike_features (bike_id, feature) VALUES (?, ?)")
                .bind(bike_id)
                .bind(feature.to_string())
                .execute(pool)
        });
    try_join_all(inserts).await?;
    Ok(())
}

/// Attach additional image urls to a bike, inserted in parallel
pub async fn add_images(pool: &SqlitePool, bike_id: i64, image_urls: &[String]) -> Result<()> {
    let inserts = image_urls.iter().map(|url| {
        sqlx::query("INSERT INTO bike_images (bike_id, image_url) VALUES (?, ?)")
            .bind(bike_id)
            .bind(url)
            .execute(pool)
    });
    try_join_all(inserts).await?;
    Ok(())
}

/// Total bikes in the catalog
pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bikes")
        .fetch_one(pool)
        .await?;
    Ok(total)
}
