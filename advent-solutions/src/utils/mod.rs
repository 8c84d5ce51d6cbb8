//! Helpers shared between solvers

pub mod dp_cache;
pub mod grid;
pub mod parse;
pub mod vec2;
