//! Database configuration module for `BrixFlow`.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! It provides functions for establishing database connections and creating all necessary
//! tables based on the entity definitions. The module uses `SeaORM`'s
//! `Schema::create_table_from_entity` method to automatically generate SQL statements
//! from the entity models, ensuring that the database schema matches the Rust struct
//! definitions without requiring manual SQL.

use crate::entities::{CostItem, LandDetails, Scenario, UnitMix};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from environment variable or returns default `SQLite` path.
///
/// This function looks for `DATABASE_URL` in the environment and falls back to
/// a default local `SQLite` file if not found.
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://data/brixflow.sqlite?mode=rwc".to_string())
}

/// Establishes a connection to the `SQLite` database using the `DATABASE_URL`
/// environment variable.
///
/// Falls back to a default local `SQLite` file if no environment variable is set.
/// This function handles connection errors and provides a clean interface for
/// database access throughout the application.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();

    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation from
/// entity definitions.
///
/// Table creation statements are built with `IF NOT EXISTS`, so calling this on an
/// already-initialized database is a no-op. It creates tables for scenarios,
/// unit mixes, cost items, and land details.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut scenario_table = schema.create_table_from_entity(Scenario);
    let mut unit_mix_table = schema.create_table_from_entity(UnitMix);
    let mut cost_item_table = schema.create_table_from_entity(CostItem);
    let mut land_details_table = schema.create_table_from_entity(LandDetails);

    db.execute(builder.build(scenario_table.if_not_exists()))
        .await?;
    db.execute(builder.build(unit_mix_table.if_not_exists()))
        .await?;
    db.execute(builder.build(cost_item_table.if_not_exists()))
        .await?;
    db.execute(builder.build(land_details_table.if_not_exists()))
        .await?;

    Ok(())
}
