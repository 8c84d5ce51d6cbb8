//! Yearly puzzle solutions with automatic registration
//!
//! Solutions are organized by year, one module per day. Each solution uses
//! the `AutoRegisterSolver` derive macro, so linking this crate is enough for
//! `SolverRegistryBuilder::register_all_plugins` to find every solver.
//! Years are gated behind the `year-2022` and `year-2025` features.

pub mod utils;

#[cfg(feature = "year-2022")]
pub mod year_2022;

#[cfg(feature = "year-2025")]
pub mod year_2025;
