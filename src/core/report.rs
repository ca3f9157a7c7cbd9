//! Project cash-flow statement.
//!
//! Combines a scenario's sales distribution (revenue recognition and cash-in)
//! with its budgeted cost series into a single per-month statement with
//! running net position, plus a formatted summary for logs and terminals.

use crate::{
    core::{
        absorption::{self, Advisories},
        costs, scenario,
    },
    errors::Result,
};
use chrono::{Months, NaiveDate};
use sea_orm::DatabaseConnection;
use tracing::info;

/// One month of the consolidated cash-flow statement.
#[derive(Debug, Clone, PartialEq)]
pub struct CashFlowMonth {
    /// Month offset from the study date
    pub month: usize,
    /// Calendar label derived from the study date (e.g., "Mar 27")
    pub label: String,
    /// Units sold this month
    pub units_sold: i64,
    /// Revenue recognized this month
    pub revenue: f64,
    /// Cash received this month after deposit time-shifting
    pub cash_in: f64,
    /// Budgeted cost paid out this month
    pub cost_out: f64,
    /// Net cash movement (cash in minus cost out)
    pub net: f64,
    /// Running net position
    pub cumulative_net: f64,
}

/// The consolidated project cash-flow statement for one scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct CashFlowReport {
    /// Scenario name the statement was computed for
    pub scenario_name: String,
    /// Per-month rows in index order
    pub months: Vec<CashFlowMonth>,
    /// Total revenue recognized across the horizon
    pub total_revenue: f64,
    /// Total cash received across the horizon
    pub total_cash_in: f64,
    /// Total cost paid across the horizon
    pub total_cost: f64,
    /// Month index with the highest cash-in, None when no cash moves
    pub peak_cash_in_month: Option<usize>,
    /// Consistency flags from the distribution
    pub advisories: Advisories,
}

/// Builds the consolidated cash-flow statement for a scenario.
///
/// Produces the sales distribution from the stored assumptions, aggregates
/// the scenario's cost items over the same horizon, and zips the two into
/// per-month rows with a running net position.
pub async fn project_cash_flow(
    db: &DatabaseConnection,
    scenario_id: i64,
) -> Result<CashFlowReport> {
    let model = scenario::get_scenario_by_id(db, scenario_id)
        .await?
        .ok_or_else(|| crate::errors::Error::ScenarioNotFound {
            name: scenario_id.to_string(),
        })?;

    let input = scenario::distribution_input(db, scenario_id).await?;
    let distribution = absorption::produce_distribution(&input);

    let cost_items = costs::get_costs_for_scenario(db, scenario_id).await?;
    let cost_series = costs::monthly_cost_series(&cost_items, distribution.months.len());

    let mut months = Vec::with_capacity(distribution.months.len());
    let mut cumulative_net = 0.0;
    for (record, cost_out) in distribution.months.iter().zip(&cost_series) {
        let net = record.cash_in - cost_out;
        cumulative_net += net;
        months.push(CashFlowMonth {
            month: record.month,
            label: month_label(model.study_date, record.month),
            units_sold: record.units_sold,
            revenue: record.revenue_recognized,
            cash_in: record.cash_in,
            cost_out: *cost_out,
            net,
            cumulative_net,
        });
    }

    let peak_cash_in_month = months
        .iter()
        .filter(|m| m.cash_in > 0.0)
        .max_by(|a, b| a.cash_in.total_cmp(&b.cash_in))
        .map(|m| m.month);

    let report = CashFlowReport {
        scenario_name: model.name,
        total_revenue: distribution.total_revenue(),
        total_cash_in: distribution.total_cash_in(),
        total_cost: cost_series.iter().sum(),
        peak_cash_in_month,
        advisories: distribution.advisories,
        months,
    };

    info!(
        scenario = %report.scenario_name,
        horizon = report.months.len(),
        total_revenue = report.total_revenue,
        "computed project cash flow"
    );

    Ok(report)
}

/// Calendar label for a month offset from the study date.
fn month_label(study_date: NaiveDate, month: usize) -> String {
    study_date
        .checked_add_months(Months::new(month as u32))
        .map_or_else(|| format!("M{month}"), |d| d.format("%b %y").to_string())
}

/// Formats a cash-flow report into a human-readable summary string.
/// Months with no movement are skipped to keep the output scannable.
#[must_use]
pub fn format_cash_flow_summary(report: &CashFlowReport) -> String {
    use std::fmt::Write;

    let mut summary = format!(
        "Cash Flow - {} - {} months\n",
        report.scenario_name,
        report.months.len()
    );

    // write! is infallible when writing to String, so unwrap is safe
    write!(
        summary,
        "  Revenue: ${:.2} | Cash in: ${:.2} | Cost: ${:.2}\n\n",
        report.total_revenue, report.total_cash_in, report.total_cost
    )
    .unwrap();

    for month in &report.months {
        if month.cash_in == 0.0 && month.cost_out == 0.0 && month.units_sold == 0 {
            continue;
        }
        writeln!(
            summary,
            "  #{:<3} {} | {:>3} units | in ${:>12.2} | out ${:>12.2} | net ${:>13.2}",
            month.month, month.label, month.units_sold, month.cash_in, month.cost_out,
            month.cumulative_net
        )
        .unwrap();
    }

    if report.advisories.deposit_unbalanced {
        writeln!(
            summary,
            "  warning: deposit structure totals {:.1}%",
            report.advisories.deposit_total_pct
        )
        .unwrap();
    }
    if report.advisories.oversold {
        writeln!(
            summary,
            "  warning: absorption curve sells {:.1}% of inventory",
            report.advisories.curve_total_pct
        )
        .unwrap();
    }

    summary
}
