//! Cost line item spreading.
//!
//! Each budgeted cost carries a start month, a duration, and a distribution
//! mode; this module resolves a set of items into a per-month cost series.
//! Same clamping policy as the absorption core: malformed numeric inputs are
//! coerced rather than rejected.

use crate::{
    entities::{CostItem, cost_item},
    errors::Result,
};
use sea_orm::{QueryOrder, prelude::*};

/// How a cost item's total is paid out over its window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CostDistribution {
    /// Total divided evenly across the duration months
    #[default]
    Linear,
    /// Full total paid in the start month
    Single,
}

impl CostDistribution {
    /// Parses the stored distribution string. Unknown values fall back to
    /// linear, matching the clamp-don't-fail policy of the rest of the core.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "single" => Self::Single,
            _ => Self::Linear,
        }
    }

    /// The string stored in the `cost_items` table.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Single => "single",
        }
    }
}

/// Spreads a single cost total across its payout window.
///
/// Returns `(month, amount)` pairs in month order. A linear distribution
/// divides the total evenly over `duration_months` starting at `start_month`;
/// a single distribution pays everything in the start month. Negative or
/// non-finite totals are coerced to zero and durations below 1 are treated
/// as 1.
#[must_use]
pub fn spread_cost(
    total: f64,
    start_month: usize,
    duration_months: usize,
    distribution: CostDistribution,
) -> Vec<(usize, f64)> {
    let total = if total.is_finite() && total > 0.0 {
        total
    } else {
        0.0
    };

    match distribution {
        CostDistribution::Single => vec![(start_month, total)],
        CostDistribution::Linear => {
            let duration = duration_months.max(1);
            let per_month = total / duration as f64;
            (start_month..start_month + duration)
                .map(|m| (m, per_month))
                .collect()
        }
    }
}

/// Retrieves all cost items for a scenario in timeline order.
pub async fn get_costs_for_scenario(
    db: &DatabaseConnection,
    scenario_id: i64,
) -> Result<Vec<cost_item::Model>> {
    CostItem::find()
        .filter(cost_item::Column::ScenarioId.eq(scenario_id))
        .order_by_asc(cost_item::Column::StartMonthOffset)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Aggregates a scenario's cost items into a per-month cost series.
///
/// The series has exactly `horizon` entries; cost landing beyond the horizon
/// is dropped, mirroring how cash installments past the projection window are
/// handled in the absorption core.
#[must_use]
pub fn monthly_cost_series(items: &[cost_item::Model], horizon: usize) -> Vec<f64> {
    let mut series = vec![0.0; horizon];

    for item in items {
        let start = item.start_month_offset.max(0) as usize;
        let duration = item.duration_months.max(1) as usize;
        let distribution = CostDistribution::parse(&item.distribution);

        for (month, amount) in spread_cost(item.total_estimated, start, duration, distribution) {
            if month < horizon {
                series[month] += amount;
            }
        }
    }

    series
}
