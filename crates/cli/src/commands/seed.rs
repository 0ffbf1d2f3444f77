//! Catalog seeding command.
//!
//! Inserts a small demo catalog for local development. Idempotent: rows are
//! matched on (name, brand, color) and skipped when already present.

use sqlx::PgPool;
use thiserror::Error;

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// One demo product.
struct SeedProduct {
    name: &'static str,
    description: &'static str,
    brand: &'static str,
    category: &'static str,
    price: i64,
    stock: i32,
    yarn_weight: &'static str,
    grams_per_unit: i32,
    color: &'static str,
}

const SEED_PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        name: "Soft Acrylic 4-Ply",
        description: "Everyday acrylic yarn, machine washable.",
        brand: "Vardhman",
        category: "Acrylic",
        price: 180,
        stock: 120,
        yarn_weight: "4-Ply",
        grams_per_unit: 100,
        color: "Mustard",
    },
    SeedProduct {
        name: "Cotton DK",
        description: "Combed cotton, good stitch definition for summer wear.",
        brand: "Ganga",
        category: "Cotton",
        price: 250,
        stock: 80,
        yarn_weight: "DK",
        grams_per_unit: 100,
        color: "Ivory",
    },
    SeedProduct {
        name: "Chunky Wool Blend",
        description: "Fast-knitting chunky blend for winter accessories.",
        brand: "Oswal",
        category: "Wool Blend",
        price: 320,
        stock: 45,
        yarn_weight: "Chunky",
        grams_per_unit: 200,
        color: "Charcoal",
    },
    SeedProduct {
        name: "Baby Soft Fingering",
        description: "Extra-soft low-pill yarn for baby garments.",
        brand: "Vardhman",
        category: "Acrylic",
        price: 210,
        stock: 95,
        yarn_weight: "Fingering",
        grams_per_unit: 100,
        color: "Powder Blue",
    },
];

/// Insert the demo catalog.
///
/// # Errors
///
/// Returns `SeedError` if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("STOREFRONT_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| SeedError::MissingEnvVar("DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    let mut inserted = 0u32;
    for p in SEED_PRODUCTS {
        let result = sqlx::query(
            "INSERT INTO products \
             (name, description, brand, category, price, stock, yarn_weight, grams_per_unit, \
              color, image_url, image_url2) \
             SELECT $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11 \
             WHERE NOT EXISTS ( \
                 SELECT 1 FROM products WHERE name = $1 AND brand = $3 AND color = $9 \
             )",
        )
        .bind(p.name)
        .bind(p.description)
        .bind(p.brand)
        .bind(p.category)
        .bind(p.price)
        .bind(p.stock)
        .bind(p.yarn_weight)
        .bind(p.grams_per_unit)
        .bind(p.color)
        .bind("https://images.patelyarnhouse.in/placeholder-front.jpg")
        .bind("https://images.patelyarnhouse.in/placeholder-back.jpg")
        .execute(&pool)
        .await?;

        inserted += u32::try_from(result.rows_affected()).unwrap_or(0);
    }

    tracing::info!(inserted, total = SEED_PRODUCTS.len(), "Seed complete");
    Ok(())
}
