use crate::{database::Database, models::Product, utils::AppError};

pub const PRODUCT_NOT_FOUND: &str = "Product not found";

pub async fn list_products(db: &Database) -> Result<Vec<Product>, AppError> {
    let products = sqlx::query_as::<_, Product>(
        "SELECT id, name, description, price, image_url, stock FROM products ORDER BY id",
    )
    .fetch_all(db.pool())
    .await?;

    Ok(products)
}

pub async fn get_product(db: &Database, id: i64) -> Result<Product, AppError> {
    sqlx::query_as::<_, Product>(
        "SELECT id, name, description, price, image_url, stock FROM products WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db.pool())
    .await?
    .ok_or_else(|| AppError::NotFound(PRODUCT_NOT_FOUND.to_string()))
}

pub async fn count_products(db: &Database) -> Result<i64, AppError> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
        .fetch_one(db.pool())
        .await?;
    Ok(count)
}
