//! Types and utilities shared across the crate

pub mod errors;
pub mod logger;
pub mod types;
