//! Persistence layer: PostgreSQL document store.
//!
//! The four collections (participations, campaign entries, point
//! transactions, leaderboard snapshots) live in PostgreSQL; genuinely
//! free-form data (transaction metadata, denormalized leaderboard entry
//! lists) is stored as JSONB. Rows are validated into typed domain
//! structs at this boundary.

pub mod models;
pub mod postgres;

pub use postgres::PostgresStore;
