//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod cost_item;
pub mod land_details;
pub mod scenario;
pub mod unit_mix;

// Re-export specific types to avoid conflicts
pub use cost_item::{Column as CostItemColumn, Entity as CostItem, Model as CostItemModel};
pub use land_details::{
    Column as LandDetailsColumn, Entity as LandDetails, Model as LandDetailsModel,
};
pub use scenario::{Column as ScenarioColumn, Entity as Scenario, Model as ScenarioModel};
pub use unit_mix::{Column as UnitMixColumn, Entity as UnitMix, Model as UnitMixModel};
