//! Shared test utilities for `BrixFlow`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    config::defaults::ScenarioDefaults,
    core::{costs::CostDistribution, scenario},
    entities::{cost_item, land_details},
    errors::Result,
};
use sea_orm::{DatabaseConnection, Set, prelude::*};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test scenario with the built-in defaults.
///
/// # Defaults
/// * project: "Test Project"
/// * `scenario_type`: "base", active
/// * absorption rate 0, delivery month 24, deposits 10/10/80
pub async fn create_test_scenario(
    db: &DatabaseConnection,
    name: &str,
) -> Result<crate::entities::scenario::Model> {
    scenario::create_scenario(
        db,
        "Test Project",
        name,
        "base",
        true,
        &ScenarioDefaults::default(),
    )
    .await
}

/// Creates a test scenario with custom absorption and schedule settings.
/// Use this when a test needs a specific timeline.
pub async fn create_custom_scenario(
    db: &DatabaseConnection,
    name: &str,
    absorption_rate_monthly: f64,
    sales_start_offset: i32,
    delivery_start_offset: i32,
) -> Result<crate::entities::scenario::Model> {
    let defaults = ScenarioDefaults {
        absorption_rate_monthly,
        sales_start_offset,
        delivery_start_offset,
        ..ScenarioDefaults::default()
    };
    scenario::create_scenario(db, "Test Project", name, "base", true, &defaults).await
}

/// Creates a linear cost item for a scenario.
pub async fn create_test_cost_item(
    db: &DatabaseConnection,
    scenario_id: i64,
    name: &str,
    total: f64,
    start_month: i32,
    duration_months: i32,
) -> Result<cost_item::Model> {
    let row = cost_item::ActiveModel {
        scenario_id: Set(scenario_id),
        category: Set("HARD_COSTS".to_string()),
        item_name: Set(name.to_string()),
        total_estimated: Set(total),
        start_month_offset: Set(start_month),
        duration_months: Set(duration_months),
        distribution: Set(CostDistribution::Linear.as_str().to_string()),
        display_order: Set(0),
        ..Default::default()
    };
    row.insert(db).await.map_err(Into::into)
}

/// Builds an in-memory land-details model with all amounts zeroed.
/// Tests set the fields they care about; the model never needs to be
/// persisted to drive the land-cost sync.
#[must_use]
pub fn create_test_land_details(project: &str) -> land_details::Model {
    land_details::Model {
        id: 0,
        project: project.to_string(),
        land_value: 0.0,
        acquisition_method: "cash".to_string(),
        amount_cash: 0.0,
        seller_financing_down_payment: 0.0,
        earnest_money_deposit: 0.0,
        pursuit_budget: 0.0,
        broker_commission_amount: 0.0,
        closing_costs_total: 0.0,
        due_diligence_period_days: 0,
        closing_period_days: 0,
        has_existing_structure: false,
        demolition_cost_estimate: 0.0,
    }
}
