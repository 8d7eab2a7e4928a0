//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the LexShield configuration file.

use crate::anonymization::detector::patterns::PatternRegistry;
use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Loading also validates
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let anonymization = &config.anonymization;
        if let Some(ref path) = anonymization.pattern_library {
            match PatternRegistry::from_file(path) {
                Ok(registry) => {
                    println!("✅ Pattern library compiles ({} detectors)", registry.len())
                }
                Err(e) => {
                    println!("❌ Pattern library is invalid: {}", path.display());
                    println!("   Error: {e:#}");
                    return Ok(2);
                }
            }
        }

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!(
            "  Confidence Threshold: {}",
            anonymization.confidence_threshold
        );
        println!("  Max Input: {} bytes", anonymization.max_input_bytes);
        println!("  Context Window: {} chars", anonymization.context_window);
        println!(
            "  Pattern Library: {}",
            anonymization
                .pattern_library
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "built-in only".to_string())
        );
        println!("  Sentence Redaction: {}", anonymization.redaction.enabled);
        println!(
            "  Magnitude Classes: MEDIUM ≥ {}, LARGE ≥ {}, MAJOR ≥ {}, MASSIVE ≥ {}",
            anonymization.magnitude.medium,
            anonymization.magnitude.large,
            anonymization.magnitude.major,
            anonymization.magnitude.massive
        );
        println!(
            "  Audit Log: {}",
            if anonymization.audit.enabled {
                anonymization.audit.log_path.display().to_string()
            } else {
                "disabled".to_string()
            }
        );
        println!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                config.logging.local_path.clone()
            } else {
                "disabled".to_string()
            }
        );
        println!();
        Ok(0)
    }
}
