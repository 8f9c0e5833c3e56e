//! Data transfer objects for the billing HTTP API.
//!
//! Query and response payloads, serializable via `serde`. Account records
//! are returned as the ordered column map the ledger produces, so only the
//! fixed-shape payloads live here.
mod request;
mod response;

pub use request::*;
pub use response::*;
