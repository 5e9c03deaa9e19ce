//! Reproduction case for queries whose `IN (...)` id list exceeds the
//! PostgreSQL bind-parameter limit: instead of a "too many parameters"
//! diagnostic, the structured query path surfaces a protocol-level error,
//! while raw SQL with the ids interpolated into the statement works fine.
//!
//! The integration tests in `tests/` pin the exact error text at the limit
//! boundary; the binary offers the same seed-and-query workflow for manual
//! exploration.

pub mod entity;
pub mod params;
pub mod query;
pub mod schema;
pub mod seed;
