//! Unit-mix business logic - Handles all unit-mix operations.
//!
//! Provides functions for creating, retrieving, and deleting unit-mix rows,
//! plus the aggregations the distributor consumes: total units, total GDV,
//! and the map of contractually dated sales.

use crate::{
    core::absorption::FixedSale,
    entities::{UnitMix, unit_mix},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use std::collections::BTreeMap;

/// Aggregate totals over a scenario's unit mix.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UnitMixTotals {
    /// Total number of units across all rows
    pub total_units: i64,
    /// Total gross development value (count x average price per row)
    pub total_gdv: f64,
}

/// Creates a new unit-mix row for a scenario, performing input validation.
///
/// The label must be non-empty; unit count and average price must be
/// non-negative.
pub async fn create_unit_mix(
    db: &DatabaseConnection,
    scenario_id: i64,
    label: String,
    unit_count: i32,
    avg_price: f64,
    sale_month: Option<i32>,
) -> Result<unit_mix::Model> {
    if label.trim().is_empty() {
        return Err(Error::Config {
            message: "Unit mix label cannot be empty".to_string(),
        });
    }

    if unit_count < 0 {
        return Err(Error::InvalidAmount {
            amount: f64::from(unit_count),
        });
    }

    if !avg_price.is_finite() || avg_price < 0.0 {
        return Err(Error::InvalidAmount { amount: avg_price });
    }

    let row = unit_mix::ActiveModel {
        scenario_id: Set(scenario_id),
        label: Set(label.trim().to_string()),
        unit_count: Set(unit_count),
        avg_price: Set(avg_price),
        sale_month: Set(sale_month),
        ..Default::default()
    };

    let result = row.insert(db).await?;
    Ok(result)
}

/// Retrieves all unit-mix rows for a scenario, ordered by label.
pub async fn get_units_for_scenario(
    db: &DatabaseConnection,
    scenario_id: i64,
) -> Result<Vec<unit_mix::Model>> {
    UnitMix::find()
        .filter(unit_mix::Column::ScenarioId.eq(scenario_id))
        .order_by_asc(unit_mix::Column::Label)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes a unit-mix row by id.
pub async fn delete_unit_mix(db: &DatabaseConnection, id: i64) -> Result<()> {
    UnitMix::delete_by_id(id).exec(db).await?;
    Ok(())
}

/// Computes total units and GDV over a set of unit-mix rows.
///
/// Negative counts or non-finite prices contribute nothing, matching the
/// clamping policy of the distribution core.
#[must_use]
pub fn unit_mix_totals(rows: &[unit_mix::Model]) -> UnitMixTotals {
    let mut totals = UnitMixTotals::default();
    for row in rows {
        let count = i64::from(row.unit_count.max(0));
        let price = if row.avg_price.is_finite() && row.avg_price > 0.0 {
            row.avg_price
        } else {
            0.0
        };
        totals.total_units += count;
        totals.total_gdv += count as f64 * price;
    }
    totals
}

/// Builds the map of contractually dated sales from rows with a `sale_month`.
///
/// Collisions on the same month are summed. Negative sale months clamp to
/// month 0.
#[must_use]
pub fn fixed_sales_map(rows: &[unit_mix::Model]) -> BTreeMap<usize, FixedSale> {
    let mut map: BTreeMap<usize, FixedSale> = BTreeMap::new();
    for row in rows {
        let Some(sale_month) = row.sale_month else {
            continue;
        };
        let month = sale_month.max(0) as usize;
        let count = i64::from(row.unit_count.max(0));
        let price = if row.avg_price.is_finite() && row.avg_price > 0.0 {
            row.avg_price
        } else {
            0.0
        };

        let entry = map.entry(month).or_default();
        entry.units += count;
        entry.revenue += count as f64 * price;
    }
    map
}
