//! Account billing lookups over time-partitioned PostgreSQL tables.
//!
//! This facade crate re-exports the billing crates for convenient access.
//!
//! ## Crate Organization
//!
//! - [`core`]: Settings, column names, and process bootstrap
//! - [`ledger`]: Partition resolution, column validation, and lookups
//! - [`dto`]: API request/response types
//! - [`server`]: actix-web routes and startup

pub use billing_core   as core;
pub use billing_ledger as ledger;
pub use billing_dto    as dto;
pub use billing_server as server;
