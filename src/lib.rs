//! Run fallible work, classify its failure against an ordered kind-to-status
//! mapping and turn the outcome into an axum response.

pub mod api;
pub mod config;
pub mod errors;
pub mod forecast;
pub mod metrics;
pub mod models;
pub mod utils;
pub mod wrap;

pub use errors::{kinds, ErrorEnvelope, ErrorKind, Failure, Fault};
pub use wrap::{classify, ClassifiedFailure, MappingTable, Outcome, SafeWrap};
