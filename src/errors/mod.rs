//! Error kinds, failure values and the structured failure envelope

pub mod failure;
pub mod kinds;
pub mod response;

pub use failure::{Failure, Fault};
pub use kinds::ErrorKind;
pub use response::ErrorEnvelope;
