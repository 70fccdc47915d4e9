//! Core utilities for QRiderRD development tools
//!
//! This crate provides shared functionality used across the platform tools:
//!
//! - **Error handling**: structured errors with codes, context, and recovery
//!   suggestions
//! - **Configuration**: TOML-based configuration with defaults matching the
//!   stock QRiderRD checkout
//!
//! # Example
//!
//! ```rust,no_run
//! use qrider_core::config::Config;
//!
//! let config = Config::load(None).expect("config");
//! assert_eq!(config.schema.xcode.bundle_id, "com.qriderrd");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
}
