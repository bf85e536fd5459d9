use crate::database::Database;
use crate::services::catalog_service;

struct SeedProduct {
    name: &'static str,
    description: &'static str,
    price: f64,
    image_url: &'static str,
}

const DEFAULT_PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        name: "Classic T-Shirt",
        description: "Soft cotton crew-neck tee.",
        price: 19.99,
        image_url: "/static/images/tshirt.jpg",
    },
    SeedProduct {
        name: "Canvas Sneakers",
        description: "Lightweight everyday sneakers.",
        price: 49.90,
        image_url: "/static/images/sneakers.jpg",
    },
    SeedProduct {
        name: "Leather Wallet",
        description: "Slim bifold wallet in full-grain leather.",
        price: 29.50,
        image_url: "/static/images/wallet.jpg",
    },
    SeedProduct {
        name: "Travel Backpack",
        description: "Water-resistant 25L backpack with laptop sleeve.",
        price: 79.00,
        image_url: "/static/images/backpack.jpg",
    },
    SeedProduct {
        name: "Ceramic Mug",
        description: "350ml stoneware mug, dishwasher safe.",
        price: 12.00,
        image_url: "/static/images/mug.jpg",
    },
];

/// Seeds the catalog with the default products.
/// Only inserts when the products table is empty.
pub async fn seed_default_products(db: &Database) {
    let count = match catalog_service::count_products(db).await {
        Ok(count) => count,
        Err(e) => {
            log::error!("❌ Failed to count products before seeding: {}", e);
            return;
        }
    };

    if count > 0 {
        log::info!("📦 Products: {} already in DB — skipping seed", count);
        return;
    }

    log::info!("📦 Products: seeding {} default products...", DEFAULT_PRODUCTS.len());

    let mut tx = match db.pool().begin().await {
        Ok(tx) => tx,
        Err(e) => {
            log::error!("❌ Failed to seed default products: {}", e);
            return;
        }
    };

    for product in DEFAULT_PRODUCTS {
        let result = sqlx::query(
            "INSERT INTO products (name, description, price, image_url) VALUES (?, ?, ?, ?)",
        )
        .bind(product.name)
        .bind(product.description)
        .bind(product.price)
        .bind(product.image_url)
        .execute(&mut *tx)
        .await;

        if let Err(e) = result {
            log::error!("❌ Failed to seed product {}: {}", product.name, e);
            return;
        }
    }

    match tx.commit().await {
        Ok(()) => log::info!("   ✅ Inserted {} default products", DEFAULT_PRODUCTS.len()),
        Err(e) => log::error!("❌ Failed to seed default products: {}", e),
    }
}
