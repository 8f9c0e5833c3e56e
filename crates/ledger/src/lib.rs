//! Account lookups over time-partitioned billing tables.
//!
//! Billing data for a schema lives in a family of tables named
//! `t_<schema>_<n>`; each load creates a new one with a larger `n`. Every
//! lookup resolves the newest partition from the live catalog, checks its
//! columns, and reads a single account with a parameterized query.
//!
//! ## Connectivity
//!
//! - [`db()`]: Connects from [`billing_core::Settings`] with deadlines applied
//!
//! ## Seams
//!
//! - [`Store`]: Catalog scans and keyed row reads
//! - [`Check`]: Liveness and version probes
//!
//! ## Core Types
//!
//! - [`Schema`]: Validated schema name and its partition pattern
//! - [`Table`]: A resolved partition, only produced by [`latest`]
//! - [`Select`]: A projection over one partition
//! - [`Record`]: An ordered row of decoded [`Value`]s
//! - [`Ledger`]: The lookup operations
//! - [`QueryError`]: Every failure a lookup can report
mod cli;
mod connect;
mod error;
mod ledger;
mod schema;
mod select;
mod store;
mod table;
mod value;

#[cfg(test)]
mod fake;

pub use cli::*;
pub use connect::*;
pub use error::*;
pub use ledger::*;
pub use schema::*;
pub use select::*;
pub use store::*;
pub use table::*;
pub use value::*;
