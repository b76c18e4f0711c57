//! Persistence of schema and table data
//!
//! - `engine`: storage engine trait
//! - `json`: one JSON file for the schema plus one per table
//! - `memory`: in-memory engine for tests and throwaway sessions

pub mod engine;
pub mod json;
pub mod memory;
