//! ndkwrap core - shared error type and configuration
//!
//! This crate holds what every other ndkwrap crate needs: the error enum
//! every resolution step reports through, and the TOML configuration the
//! settings record is loaded from.

pub mod config;
pub mod error;

pub use config::{AppConfig, NdkConfig, OutputConfig, SettingsConfig};
pub use error::{WrapperError, Result};

/// ndkwrap version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "ndkwrap";
