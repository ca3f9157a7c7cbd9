//! Scenario business logic.
//!
//! Scenarios hold the assumptions (absorption, deposits, schedule anchors)
//! over which the distribution is computed. This module provides CRUD plus
//! the assembly step that turns stored rows into a [`DistributionInput`],
//! and the small helpers behind the strategy UI: absorption suggestions and
//! the "distribute remaining" curve fill.

use crate::{
    config::defaults::ScenarioDefaults,
    core::{
        absorption::{AbsorptionCurve, DepositStructure, DistributionInput},
        unit_mix,
    },
    entities::{Scenario, scenario},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*};

/// Suggested units-per-month absorption rates, derived from sell-out targets
/// of 8, 4, and 2 months.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbsorptionSuggestions {
    /// Sell out in 8 months
    pub pessimistic: i64,
    /// Sell out in 4 months
    pub balanced: i64,
    /// Sell out in 2 months
    pub optimistic: i64,
}

/// Creates a new scenario seeded from the configured defaults.
///
/// The study date is set to today; the manual curve starts unset (linear).
pub async fn create_scenario(
    db: &DatabaseConnection,
    project: &str,
    name: &str,
    scenario_type: &str,
    is_active: bool,
    defaults: &ScenarioDefaults,
) -> Result<scenario::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Scenario name cannot be empty".to_string(),
        });
    }

    let now = Utc::now();
    let row = scenario::ActiveModel {
        project: Set(project.to_string()),
        name: Set(name.trim().to_string()),
        scenario_type: Set(scenario_type.to_string()),
        is_active: Set(is_active),
        study_date: Set(now.date_naive()),
        sales_start_offset: Set(defaults.sales_start_offset),
        sales_duration_months: Set(defaults.sales_duration_months),
        delivery_start_offset: Set(defaults.delivery_start_offset),
        absorption_rate_monthly: Set(defaults.absorption_rate_monthly),
        manual_absorption_curve: Set(None),
        deposit_initial: Set(defaults.deposit_initial),
        deposit_progress: Set(defaults.deposit_progress),
        deposit_closing: Set(defaults.deposit_closing),
        commission_rate: Set(defaults.commission_rate),
        marketing_cost_percent: Set(defaults.marketing_cost_percent),
        updated_at: Set(now.naive_utc()),
        ..Default::default()
    };

    let result = row.insert(db).await?;
    Ok(result)
}

/// Finds a scenario by its unique id.
pub async fn get_scenario_by_id(
    db: &DatabaseConnection,
    scenario_id: i64,
) -> Result<Option<scenario::Model>> {
    Scenario::find_by_id(scenario_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds the scenario currently driving a project's reports.
///
/// Lookup order: the active scenario, then the base-case scenario, then the
/// first scenario on record.
pub async fn get_active_scenario(
    db: &DatabaseConnection,
    project: &str,
) -> Result<Option<scenario::Model>> {
    let active = Scenario::find()
        .filter(scenario::Column::Project.eq(project))
        .filter(scenario::Column::IsActive.eq(true))
        .one(db)
        .await?;
    if active.is_some() {
        return Ok(active);
    }

    let base = Scenario::find()
        .filter(scenario::Column::Project.eq(project))
        .filter(scenario::Column::ScenarioType.eq("base"))
        .one(db)
        .await?;
    if base.is_some() {
        return Ok(base);
    }

    Scenario::find()
        .filter(scenario::Column::Project.eq(project))
        .order_by_asc(scenario::Column::Id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Sets the linear absorption rate and clears any manual curve, the way
/// applying a suggestion resets the strategy to a linear distribution.
pub async fn apply_linear_rate(
    db: &DatabaseConnection,
    scenario_id: i64,
    monthly_rate_percent: f64,
) -> Result<scenario::Model> {
    let model = require_scenario(db, scenario_id).await?;

    let mut active: scenario::ActiveModel = model.into();
    active.absorption_rate_monthly = Set(monthly_rate_percent.max(0.0));
    active.manual_absorption_curve = Set(None);
    active.updated_at = Set(Utc::now().naive_utc());
    active.update(db).await.map_err(Into::into)
}

/// Stores a manual absorption curve (or clears it when `None`), serialized
/// as a JSON array of per-month percentages.
pub async fn set_manual_curve(
    db: &DatabaseConnection,
    scenario_id: i64,
    curve: Option<&[f64]>,
) -> Result<scenario::Model> {
    let model = require_scenario(db, scenario_id).await?;

    let serialized = match curve {
        Some(points) => Some(serde_json::to_string(points)?),
        None => None,
    };

    let mut active: scenario::ActiveModel = model.into();
    active.manual_absorption_curve = Set(serialized);
    active.updated_at = Set(Utc::now().naive_utc());
    active.update(db).await.map_err(Into::into)
}

/// Parses the stored manual curve, if any.
pub fn manual_curve(model: &scenario::Model) -> Result<Option<Vec<f64>>> {
    match &model.manual_absorption_curve {
        Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
        None => Ok(None),
    }
}

/// The deposit structure stored on a scenario row.
#[must_use]
pub fn deposits(model: &scenario::Model) -> DepositStructure {
    DepositStructure {
        initial_pct: model.deposit_initial,
        progress_pct: model.deposit_progress,
        closing_pct: model.deposit_closing,
    }
}

/// Assembles the distributor input from a scenario row and its unit mix.
///
/// A stored manual curve takes precedence over the linear rate; negative
/// schedule offsets clamp to month 0.
pub async fn distribution_input(
    db: &DatabaseConnection,
    scenario_id: i64,
) -> Result<DistributionInput> {
    let model = require_scenario(db, scenario_id).await?;
    let units = unit_mix::get_units_for_scenario(db, scenario_id).await?;

    let totals = unit_mix::unit_mix_totals(&units);
    let fixed_sales = unit_mix::fixed_sales_map(&units);

    let curve = match manual_curve(&model)? {
        Some(percentages) => AbsorptionCurve::Manual { percentages },
        None => AbsorptionCurve::Linear {
            monthly_rate_percent: model.absorption_rate_monthly,
        },
    };

    Ok(DistributionInput {
        total_units: totals.total_units,
        total_gdv: totals.total_gdv,
        fixed_sales,
        curve,
        sales_start_month: model.sales_start_offset.max(0) as usize,
        delivery_month: model.delivery_start_offset.max(0) as usize,
        deposits: deposits(&model),
    })
}

/// Suggested absorption rates from the generic unit count: sell out in
/// 8/4/2 months, at least one unit per month. Returns `None` when there is
/// no generic inventory to distribute.
#[must_use]
pub fn suggested_absorption(generic_units: i64) -> Option<AbsorptionSuggestions> {
    if generic_units <= 0 {
        return None;
    }

    let rate = |months: i64| ((generic_units as f64 / months as f64).round() as i64).max(1);

    Some(AbsorptionSuggestions {
        pessimistic: rate(8),
        balanced: rate(4),
        optimistic: rate(2),
    })
}

/// Appends an even split of the unsold generic percent to a manual curve.
///
/// The remainder (100 minus what the curve already sells) is spread across
/// the next `months` entries, each rounded to two decimals the way the entry
/// form stores them. Returns the curve unchanged when nothing remains.
#[must_use]
pub fn distribute_remaining(curve: &[f64], months: usize) -> Vec<f64> {
    let mut extended: Vec<f64> = curve.to_vec();

    let sold: f64 = curve
        .iter()
        .copied()
        .filter(|v| v.is_finite() && *v > 0.0)
        .sum();
    let remaining = (100.0 - sold).max(0.0);
    if remaining <= 0.0 || months == 0 {
        return extended;
    }

    let per_month = (remaining / months as f64 * 100.0).round() / 100.0;
    extended.extend(std::iter::repeat_n(per_month, months));
    extended
}

async fn require_scenario(db: &DatabaseConnection, scenario_id: i64) -> Result<scenario::Model> {
    get_scenario_by_id(db, scenario_id)
        .await?
        .ok_or_else(|| Error::ScenarioNotFound {
            name: scenario_id.to_string(),
        })
}
