//! Configuration management for LexShield.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation.
//!
//! # Overview
//!
//! LexShield uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for every setting
//! - `LEXSHIELD_*` environment overrides
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use lexshield::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("lexshield.toml")?;
//! println!("Threshold: {}", config.anonymization.confidence_threshold);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`AnonymizationConfig`](crate::anonymization::AnonymizationConfig) -
//!   detection, mapping, redaction, risk and audit settings
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [anonymization]
//! confidence_threshold = 0.6
//! pattern_library = "./patterns/firm_patterns.toml"
//!
//! [anonymization.magnitude]
//! medium = 1000.0
//! large = 10000.0
//!
//! [anonymization.audit]
//! enabled = true
//! log_path = "${LEXSHIELD_AUDIT_DIR}/anonymization.log"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default, parse_config};
pub use schema::{ApplicationConfig, LexShieldConfig, LoggingConfig};
