//! Land details entity - acquisition terms for the project site.
//!
//! These figures feed the land-cost sync, which derives budget cost items
//! (earnest money, brokerage, closing payment, demolition) from the
//! acquisition structure.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Land details database model - one row per project
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "land_details")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Project these land terms belong to
    pub project: String,
    /// Asking/contract price for the land
    pub land_value: f64,
    /// Acquisition method: "cash", "seller_financing", or "jv_swap"
    pub acquisition_method: String,
    /// Cash portion of the purchase price
    pub amount_cash: f64,
    /// Down payment when seller financing is used
    pub seller_financing_down_payment: f64,
    /// Earnest money deposit paid at contract signing
    pub earnest_money_deposit: f64,
    /// Pre-closing pursuit/due-diligence budget
    pub pursuit_budget: f64,
    /// Land brokerage fee paid at closing
    pub broker_commission_amount: f64,
    /// Transfer taxes, notary, legal, and other closing costs
    pub closing_costs_total: f64,
    /// Due diligence period in days
    pub due_diligence_period_days: i32,
    /// Period between end of due diligence and closing, in days
    pub closing_period_days: i32,
    /// Whether a structure must be demolished after closing
    pub has_existing_structure: bool,
    /// Estimated demolition and site-prep cost
    pub demolition_cost_estimate: f64,
}

/// `LandDetails` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
