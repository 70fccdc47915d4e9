//! Configuration loading and schema definitions
//!
//! Shared configuration types for the QRiderRD tooling.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
