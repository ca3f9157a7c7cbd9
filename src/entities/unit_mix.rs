//! Unit-mix entity - a block of units with a shared typology and price.
//!
//! Rows with a `sale_month` are contractually dated: their units and revenue
//! land in that exact month and are excluded from curve-driven distribution.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Unit-mix database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "unit_mix")]
pub struct Model {
    /// Unique identifier for the unit-mix row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Scenario this unit mix belongs to
    pub scenario_id: i64,
    /// Human-readable label (e.g., "2BR Tower A")
    pub label: String,
    /// Number of units in this block
    pub unit_count: i32,
    /// Average sale price per unit
    pub avg_price: f64,
    /// Fixed sale month offset; None means the units follow the curve
    pub sale_month: Option<i32>,
}

/// Defines relationships between `UnitMix` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each unit-mix row belongs to one scenario
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
