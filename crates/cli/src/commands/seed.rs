//! Seed the product catalog from a YAML file.
//!
//! Seeding is idempotent: a product whose name already exists in the catalog
//! is skipped, so the command can be re-run after editing the file.
//!
//! # Catalog format
//!
//! ```yaml
//! - name: Walnut Cutting Board
//!   description: End-grain walnut, 40x30cm.
//!   price: "49.00"
//!   image: products/cutting-board.jpg
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use secrecy::SecretString;
use serde::Deserialize;

use birchwood_core::Price;
use birchwood_storefront::db::{self, ProductRepository, RepositoryError};

/// One catalog entry from the YAML file.
#[derive(Debug, Deserialize)]
struct SeedProduct {
    name: String,
    #[serde(default)]
    description: Option<String>,
    price: Decimal,
    #[serde(default)]
    image: Option<String>,
}

/// Errors that can occur while seeding.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Could not read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not parse catalog file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid price for {name}: {source}")]
    InvalidPrice {
        name: String,
        source: birchwood_core::PriceError,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Seed the catalog from `file`.
///
/// # Errors
///
/// Returns `SeedError` if the file cannot be read or parsed, a price is
/// negative, or a database operation fails.
pub async fn run(file: &Path) -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("STORE_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| SeedError::MissingEnvVar("STORE_DATABASE_URL"))?;

    let pool = db::create_pool(&database_url).await?;
    let products = ProductRepository::new(&pool);

    let raw = std::fs::read_to_string(file)?;
    let entries: Vec<SeedProduct> = serde_yaml::from_str(&raw)?;

    let mut created = 0_usize;
    let mut skipped = 0_usize;

    for entry in entries {
        if products.find_by_name(&entry.name).await?.is_some() {
            skipped += 1;
            continue;
        }

        let price = Price::new(entry.price).map_err(|source| SeedError::InvalidPrice {
            name: entry.name.clone(),
            source,
        })?;

        products
            .create(
                &entry.name,
                entry.description.as_deref(),
                price,
                entry.image.as_deref(),
            )
            .await?;

        tracing::info!(name = %entry.name, "seeded product");
        created += 1;
    }

    tracing::info!(created, skipped, "catalog seeding complete");
    Ok(())
}
