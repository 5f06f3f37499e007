//! # Seed Data Generator
//!
//! Populates a development database with sample workshop data.
//!
//! ## Usage
//! ```bash
//! # Default database path (./forge_dev.db)
//! cargo run -p forge-db --bin seed
//!
//! # Specify database path
//! cargo run -p forge-db --bin seed -- --db ./data/forge.db
//! ```
//!
//! ## Generated Data
//! - An admin account and a counter clerk
//! - A small cycle-parts catalogue
//! - Workshop tools and two mechanics
//! - An opening cash float and a couple of ledger entries

use std::env;

use forge_core::{FieldSet, Filter};
use forge_db::{Database, DbConfig, DbError, FindOptions};

const PRODUCTS: &[(&str, &str, i64, i64)] = &[
    ("Tyre 26\"", "Panther", 95000, 12),
    ("Tyre tube 26\"", "Panther", 30000, 24),
    ("Chain", "Sohrab", 55000, 8),
    ("Chain cover", "Sohrab", 45000, 5),
    ("Pedal pair", "Eagle", 40000, 10),
    ("Dynamo", "Eagle", 25000, 7),
    ("Bell", "Panther", 12000, 20),
    ("Brake shoe set", "Sohrab", 18000, 15),
];

const TOOLS: &[(&str, &str)] = &[
    ("Torque wrench", "TW-01"),
    ("Spanner set", "SP-01"),
    ("Air compressor", "AC-01"),
    ("Spoke key", "SK-01"),
];

#[tokio::main]
async fn main() -> Result<(), DbError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "forge_db=info".into()),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let mut db_path = String::from("./forge_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Forge Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./forge_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Forge Seed Data Generator");
    println!("============================");
    println!("Database: {}", db_path);
    println!();

    let config = DbConfig::new(&db_path).apply_reference_schema(true);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Schema applied");

    let existing = db
        .users()
        .find_count(&Filter::match_all(), &FindOptions::new())
        .await?;
    if existing > 0 {
        println!("⚠ Database already has {} users", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Seeding...");

    db.users()
        .insert(
            &FieldSet::new()
                .set("firstName", "Owner")
                .set("lastName", "Admin")
                .set("email", "owner@forge.local")
                .set("isAdmin", true),
        )
        .await?;
    db.users()
        .insert(
            &FieldSet::new()
                .set("firstName", "Counter")
                .set("lastName", "Clerk")
                .set("email", "clerk@forge.local")
                .set("mobile", "0300-1112223")
                .set("isAdmin", false),
        )
        .await?;
    println!("  2 users");

    for (name, company, price, stock) in PRODUCTS {
        db.products()
            .insert(
                &FieldSet::new()
                    .set("name", *name)
                    .set("company", *company)
                    .set("priceCents", *price)
                    .set("stock", *stock),
            )
            .await?;
    }
    println!("  {} products", PRODUCTS.len());

    for (name, code) in TOOLS {
        db.tools()
            .insert(&FieldSet::new().set("name", *name).set("code", *code))
            .await?;
    }
    println!("  {} tools", TOOLS.len());

    db.mechanics()
        .insert(
            &FieldSet::new()
                .set("firstName", "Imran")
                .set("lastName", "Khan")
                .set("mobile", "0345-6789012"),
        )
        .await?;
    db.mechanics()
        .insert(
            &FieldSet::new()
                .set("firstName", "Bilal")
                .set("lastName", "Ahmed"),
        )
        .await?;
    println!("  2 mechanics");

    db.cash()
        .insert(
            &FieldSet::new()
                .set("amount", 500000)
                .set("purpose", "opening float"),
        )
        .await?;
    db.cash()
        .insert(
            &FieldSet::new()
                .set("amount", 95000)
                .set("purpose", "tyre sale"),
        )
        .await?;
    db.cash()
        .insert(
            &FieldSet::new()
                .set("amount", -30000)
                .set("purpose", "parts supplier"),
        )
        .await?;
    println!("  3 cash entries (balance: {})", db.cash().total().await?);

    println!();
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}
