//! Core business logic - framework-agnostic feasibility computations.
//!
//! The absorption and cost modules are pure; the scenario, unit-mix, land,
//! and report modules load their inputs through `SeaORM` and delegate the
//! arithmetic to the pure functions.

/// Sales absorption and cash-flow distribution (pure)
pub mod absorption;
/// Cost line item spreading and aggregation
pub mod costs;
/// Land acquisition cost sync into the budget
pub mod land;
/// Consolidated project cash-flow statement
pub mod report;
/// Scenario management and distribution input assembly
pub mod scenario;
/// Unit-mix operations and aggregate totals
pub mod unit_mix;
