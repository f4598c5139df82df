//! # Catalog Seeder
//!
//! Writes the demo assortment into a catalog database.
//!
//! ## Usage
//! ```bash
//! # Demo assortment only
//! cargo run -p etalage-db --bin seed -- --db ./catalog.db
//!
//! # Plus 200 generated sample products for paging/search testing
//! cargo run -p etalage-db --bin seed -- --db ./catalog.db --samples 200
//! ```

use std::env;

use etalage_core::catalog::demo_products;
use etalage_core::{Money, Product, ValidationError};
use etalage_db::repository::product::generate_product_id;
use etalage_db::{Database, DbConfig};

/// Base names for generated sample products, with type and base price as
/// the CMS exports it.
const SAMPLES: &[(&str, &str, &str)] = &[
    ("Spatbord", "onderdeel", "14.95"),
    ("Fietspomp", "accessoire", "19,99"),
    ("Kettingolie", "onderdeel", "6.95"),
    ("Fietshelm", "accessoire", "49.95"),
    ("Zadel Comfort", "onderdeel", "29,95"),
    ("Bagagedrager", "onderdeel", "34.5"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut samples: usize = 0;
    let mut db_path = String::from("./etalage_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--samples" | "-s" => {
                if i + 1 < args.len() {
                    samples = args[i + 1].parse()?;
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Etalage catalog seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>      Database file path (default: ./etalage_dev.db)");
                println!("  -s, --samples <N>    Extra generated products (default: 0)");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            other => {
                eprintln!("Unknown argument: {}", other);
            }
        }
        i += 1;
    }

    println!("Etalage catalog seeder");
    println!("======================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected, migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Catalog already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let repo = db.products();
    let mut inserted = 0;

    let generated = (0..samples)
        .map(sample_product)
        .collect::<Result<Vec<_>, _>>()?;
    for product in demo_products().into_iter().chain(generated) {
        if let Err(e) = repo.insert(&product).await {
            eprintln!("Failed to insert {}: {}", product.id, e);
            continue;
        }
        inserted += 1;
    }

    println!("✓ Inserted {} products", inserted);

    let hits = repo.search("fiets", 10).await?;
    println!("  Search 'fiets': {} results", hits.len());

    db.close().await;
    println!("✓ Seed complete!");

    Ok(())
}

/// Builds the `n`th generated sample product.
fn sample_product(n: usize) -> Result<Product, ValidationError> {
    let (base, product_type, price) = SAMPLES[n % SAMPLES.len()];
    let price = Money::parse_decimal(price)?;
    let variant = n / SAMPLES.len() + 1;
    let id = generate_product_id();
    let name = format!("{} model {}", base, variant);
    let slug = format!("{}-{}", etalage_core::types::slugify(&name), &id[..8]);

    let surcharge = Money::from_cents((variant as i64 % 10) * 100);

    Ok(Product::new(id, name, price + surcharge)
        .with_description(format!("Voorbeeldproduct {} uit de testcatalogus.", n + 1))
        .with_slug(slug)
        .with_type(product_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_prices_parse() {
        for n in 0..SAMPLES.len() {
            let product = sample_product(n).unwrap();
            assert!(product.price.is_positive());
        }

        let pump = sample_product(1).unwrap();
        assert_eq!(pump.price, Money::from_cents(1999 + 100));
        let rack = sample_product(5).unwrap();
        assert_eq!(rack.price, Money::from_cents(3450 + 100));
    }
}
