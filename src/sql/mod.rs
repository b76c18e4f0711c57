//! Command processing module
//!
//! This module provides:
//! - `parser`: command lexer and parser
//! - `types`: value and data types
//! - `schema`: table and column schema definitions
//! - `executor`: command execution against a loaded table
//! - `engine`: the session running commands over a storage engine
//! - `cache`: select result cache

pub mod parser;
pub mod types;
pub mod schema;
pub mod executor;
pub mod engine;
pub mod cache;
