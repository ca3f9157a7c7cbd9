//! Cost line item entity - one budgeted outflow with a payout window.
//!
//! Each item carries a total, a start month, a duration, and a distribution
//! mode ("linear" spreads the total evenly over the window, "single" pays it
//! all in the start month).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Cost line item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cost_items")]
pub struct Model {
    /// Unique identifier for the cost item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Scenario this cost belongs to
    pub scenario_id: i64,
    /// Budget category (e.g., "ACQUISITION", "HARD_COSTS")
    pub category: String,
    /// Human-readable item name, unique per scenario for upserts
    pub item_name: String,
    /// Total estimated cost
    pub total_estimated: f64,
    /// Month offset at which the payout window opens
    pub start_month_offset: i32,
    /// Payout window length in months (minimum 1)
    pub duration_months: i32,
    /// Distribution mode: "linear" or "single"
    pub distribution: String,
    /// Ordering hint for budget tables
    pub display_order: i32,
}

/// Defines relationships between `CostItem` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each cost item belongs to one scenario
    #[sea_orm(
        belongs_to = "super::scenario::Entity",
        from = "Column::ScenarioId",
        to = "super::scenario::Column::Id"
    )]
    Scenario,
}

impl Related<super::scenario::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Scenario.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
