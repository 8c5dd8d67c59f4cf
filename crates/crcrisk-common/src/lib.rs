//! crcrisk-common: Shared configuration model and error types used across all crcrisk crates.

pub mod error;
pub mod config;

// Re-export commonly used types
pub use config::{AppConfig, FormConfig, GeneWeight, ServerConfig, SignatureConfig};
pub use error::{CrcRiskError, Result};
