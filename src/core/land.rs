//! Land acquisition cost sync.
//!
//! Derives budget cost items from the land acquisition terms and upserts
//! them into the scenario's cost table by item name, so re-saving the land
//! form updates the budget in place instead of duplicating rows. Earnest
//! money and pursuit costs land at month 0, brokerage and the acquisition
//! payment at the closing month, demolition the month after.

use crate::{
    core::costs::CostDistribution,
    entities::{CostItem, cost_item, land_details},
    errors::Result,
};
use sea_orm::{Set, prelude::*};
use tracing::debug;

/// Acquisition category for land purchase items
pub const CATEGORY_ACQUISITION: &str = "ACQUISITION";
/// Soft cost category for pre-closing spend
pub const CATEGORY_SOFT_COSTS: &str = "SOFT_COSTS";
/// Hard cost category for construction-adjacent spend
pub const CATEGORY_HARD_COSTS: &str = "HARD_COSTS";

/// Computes the closing month from the due-diligence and closing periods,
/// rounding partial months up. Negative day counts clamp to zero.
#[must_use]
pub fn closing_month(due_diligence_days: i32, closing_period_days: i32) -> i32 {
    let days = due_diligence_days.max(0) + closing_period_days.max(0);
    (days + 29) / 30
}

/// Cash due at closing for the land itself, net of the earnest money
/// deposit already paid. A cash purchase owes the full cash amount; seller
/// financing owes the down payment; a swap owes nothing up front. Floors at
/// zero when the deposit covers everything.
#[must_use]
pub fn acquisition_payment_at_closing(land: &land_details::Model) -> f64 {
    let emd = land.earnest_money_deposit.max(0.0);
    let due = match land.acquisition_method.as_str() {
        "cash" => land.amount_cash.max(0.0) - emd,
        "seller_financing" => land.seller_financing_down_payment.max(0.0) - emd,
        // Swap and revenue-share structures carry no cash at closing.
        _ => 0.0,
    };
    due.max(0.0)
}

/// Upserts the cost items derived from the land terms into a scenario's
/// budget. Zero amounts are skipped; existing items are matched by name.
/// Returns the number of items written.
pub async fn sync_land_costs(
    db: &DatabaseConnection,
    scenario_id: i64,
    land: &land_details::Model,
) -> Result<usize> {
    let closing = closing_month(land.due_diligence_period_days, land.closing_period_days);
    let mut written = 0;

    let items = [
        (
            CATEGORY_ACQUISITION,
            "Earnest Money Deposit (EMD)",
            land.earnest_money_deposit,
            0,
        ),
        (
            CATEGORY_SOFT_COSTS,
            "Pursuit Costs (Due Diligence)",
            land.pursuit_budget,
            0,
        ),
        (
            CATEGORY_ACQUISITION,
            "Land Brokerage Fee",
            land.broker_commission_amount,
            closing,
        ),
        (
            CATEGORY_ACQUISITION,
            "Closing Costs & Taxes",
            land.closing_costs_total,
            closing,
        ),
        (
            CATEGORY_ACQUISITION,
            "Land Acquisition Payment",
            acquisition_payment_at_closing(land),
            closing,
        ),
    ];

    for (category, name, amount, start_month) in items {
        if upsert_cost_item(db, scenario_id, category, name, amount, start_month).await? {
            written += 1;
        }
    }

    // Demolition follows right after closing when a structure must come down.
    if land.has_existing_structure
        && upsert_cost_item(
            db,
            scenario_id,
            CATEGORY_HARD_COSTS,
            "Demolition & Site Prep",
            land.demolition_cost_estimate,
            closing + 1,
        )
        .await?
    {
        written += 1;
    }

    debug!(scenario_id, written, "synced land costs to budget");
    Ok(written)
}

/// Upserts a single cost item by scenario and name. Returns false when the
/// amount is zero or invalid and nothing was written.
async fn upsert_cost_item(
    db: &DatabaseConnection,
    scenario_id: i64,
    category: &str,
    name: &str,
    amount: f64,
    start_month: i32,
) -> Result<bool> {
    if !amount.is_finite() || amount <= 0.0 {
        return Ok(false);
    }

    let existing = CostItem::find()
        .filter(cost_item::Column::ScenarioId.eq(scenario_id))
        .filter(cost_item::Column::ItemName.eq(name))
        .one(db)
        .await?;

    if let Some(item) = existing {
        let mut active: cost_item::ActiveModel = item.into();
        active.category = Set(category.to_string());
        active.total_estimated = Set(amount);
        active.start_month_offset = Set(start_month);
        active.duration_months = Set(1);
        active.distribution = Set(CostDistribution::Single.as_str().to_string());
        active.update(db).await?;
    } else {
        let row = cost_item::ActiveModel {
            scenario_id: Set(scenario_id),
            category: Set(category.to_string()),
            item_name: Set(name.to_string()),
            total_estimated: Set(amount),
            start_month_offset: Set(start_month),
            duration_months: Set(1),
            distribution: Set(CostDistribution::Single.as_str().to_string()),
            display_order: Set(0),
            ..Default::default()
        };
        row.insert(db).await?;
    }

    Ok(true)
}
