//! Scenario entity - a named set of sales and payment assumptions.
//!
//! Each scenario (base, optimistic, pessimistic) carries the absorption
//! settings, deposit structure, and schedule anchors over which the monthly
//! distribution is computed. The manual absorption curve, when present, is
//! stored as a JSON array of per-month percentages.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Scenario database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "scenarios")]
pub struct Model {
    /// Unique identifier for the scenario
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Project this scenario belongs to
    pub project: String,
    /// Human-readable name (e.g., "Base Case")
    pub name: String,
    /// Scenario classification: "base", "optimistic", or "pessimistic"
    pub scenario_type: String,
    /// Whether this is the scenario currently driving reports
    pub is_active: bool,
    /// Study date - month 0 of the projection timeline
    pub study_date: Date,
    /// Month offset from the study date at which sales begin
    pub sales_start_offset: i32,
    /// Nominal sales window length in months (display only)
    pub sales_duration_months: i32,
    /// Month offset at which units are delivered and closing funds arrive
    pub delivery_start_offset: i32,
    /// Linear absorption rate as percent of generic inventory sold per month
    pub absorption_rate_monthly: f64,
    /// Manual per-month absorption percentages as a JSON array, None = linear
    pub manual_absorption_curve: Option<String>,
    /// Percent of each sale collected as the initial deposit
    pub deposit_initial: f64,
    /// Percent of each sale collected as progress payments during construction
    pub deposit_progress: f64,
    /// Percent of each sale collected at delivery (closing/financing)
    pub deposit_closing: f64,
    /// Sales commission as percent of revenue
    pub commission_rate: f64,
    /// Marketing budget as percent of revenue
    pub marketing_cost_percent: f64,
    /// When this scenario was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Scenario and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One scenario has many unit-mix rows
    #[sea_orm(has_many = "super::unit_mix::Entity")]
    UnitMix,
    /// One scenario has many cost line items
    #[sea_orm(has_many = "super::cost_item::Entity")]
    CostItems,
}

impl Related<super::unit_mix::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UnitMix.def()
    }
}

impl Related<super::cost_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CostItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
