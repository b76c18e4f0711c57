//! PrimitiveDB - A small file-backed table store in Rust
//!
//! This crate provides:
//! - Command parsing (lexer, parser, statements)
//! - Table operations (create, drop, insert, select, update, delete, info)
//! - A select result cache with explicit invalidation
//! - Pluggable storage engines (JSON files, in-memory)

pub mod config;
pub mod display;
pub mod error;
pub mod sql;
pub mod storage;
