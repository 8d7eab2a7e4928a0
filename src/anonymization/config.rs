//! Anonymization configuration

use crate::anonymization::anonymizer::MagnitudeThresholds;
use crate::anonymization::risk::RiskConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default minimum detector confidence
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.6;
/// Default upper bound on document size (32 MiB)
pub const DEFAULT_MAX_INPUT_BYTES: usize = 32 * 1024 * 1024;
/// Default number of characters kept either side of an entity's context
pub const DEFAULT_CONTEXT_WINDOW: usize = 40;

/// Anonymization engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnonymizationConfig {
    /// Detections below this confidence are discarded
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f32,

    /// Documents larger than this are rejected
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: usize,

    /// Characters of anonymized text kept either side of an entity
    #[serde(default = "default_context_window")]
    pub context_window: usize,

    /// Path to an additional pattern library TOML file
    #[serde(default)]
    pub pattern_library: Option<PathBuf>,

    /// Sentence redaction
    #[serde(default)]
    pub redaction: RedactionConfig,

    /// Amount magnitude classes
    #[serde(default)]
    pub magnitude: MagnitudeThresholds,

    /// Privacy risk thresholds and weights
    #[serde(default)]
    pub risk: RiskConfig,

    /// Audit logging configuration
    #[serde(default)]
    pub audit: AuditConfig,
}

fn default_confidence_threshold() -> f32 {
    DEFAULT_CONFIDENCE_THRESHOLD
}

fn default_max_input_bytes() -> usize {
    DEFAULT_MAX_INPUT_BYTES
}

fn default_context_window() -> usize {
    DEFAULT_CONTEXT_WINDOW
}

impl Default for AnonymizationConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            context_window: DEFAULT_CONTEXT_WINDOW,
            pattern_library: None,
            redaction: RedactionConfig::default(),
            magnitude: MagnitudeThresholds::default(),
            risk: RiskConfig::default(),
            audit: AuditConfig::default(),
        }
    }
}

impl AnonymizationConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            anyhow::bail!(
                "confidence_threshold must be between 0.0 and 1.0, got {}",
                self.confidence_threshold
            );
        }

        if self.max_input_bytes == 0 {
            anyhow::bail!("max_input_bytes must be greater than 0");
        }

        if let Some(ref path) = self.pattern_library {
            if !path.exists() {
                anyhow::bail!("Pattern library file not found: {}", path.display());
            }
            if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                anyhow::bail!("Pattern library must be a TOML file: {}", path.display());
            }
        }

        self.magnitude
            .validate()
            .map_err(|e| anyhow::anyhow!(e))
            .context("Invalid magnitude configuration")?;

        self.risk
            .validate()
            .map_err(|e| anyhow::anyhow!(e))
            .context("Invalid risk configuration")?;

        self.audit.validate().context("Invalid audit configuration")?;

        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("LEXSHIELD_ANONYMIZATION_CONFIDENCE_THRESHOLD") {
            self.confidence_threshold = val
                .parse()
                .context("Invalid LEXSHIELD_ANONYMIZATION_CONFIDENCE_THRESHOLD value")?;
        }

        if let Ok(val) = std::env::var("LEXSHIELD_ANONYMIZATION_MAX_INPUT_BYTES") {
            self.max_input_bytes = val
                .parse()
                .context("Invalid LEXSHIELD_ANONYMIZATION_MAX_INPUT_BYTES value")?;
        }

        if let Ok(val) = std::env::var("LEXSHIELD_ANONYMIZATION_REDACTION_ENABLED") {
            self.redaction.enabled = val
                .parse()
                .context("Invalid LEXSHIELD_ANONYMIZATION_REDACTION_ENABLED value")?;
        }

        if let Ok(val) = std::env::var("LEXSHIELD_ANONYMIZATION_PATTERN_LIBRARY") {
            self.pattern_library = Some(PathBuf::from(val));
        }

        self.audit.apply_env_overrides()?;

        Ok(())
    }
}

/// Sentence redaction configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionConfig {
    /// Replace sentences containing confidentiality or privilege markers
    #[serde(default = "default_redaction_enabled")]
    pub enabled: bool,
}

fn default_redaction_enabled() -> bool {
    true
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            enabled: default_redaction_enabled(),
        }
    }
}

/// Audit logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Enable audit logging
    #[serde(default)]
    pub enabled: bool,

    /// Audit log file path
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,

    /// Use JSON lines instead of plain text
    #[serde(default = "default_audit_json_format")]
    pub json_format: bool,
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("./audit/anonymization.log")
}

fn default_audit_json_format() -> bool {
    true
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_path: default_audit_log_path(),
            json_format: default_audit_json_format(),
        }
    }
}

impl AuditConfig {
    /// Validate audit configuration
    pub fn validate(&self) -> Result<()> {
        if self.enabled && self.log_path.as_os_str().is_empty() {
            anyhow::bail!("audit.log_path cannot be empty when audit logging is enabled");
        }
        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("LEXSHIELD_ANONYMIZATION_AUDIT_ENABLED") {
            self.enabled = val
                .parse()
                .context("Invalid LEXSHIELD_ANONYMIZATION_AUDIT_ENABLED value")?;
        }

        if let Ok(val) = std::env::var("LEXSHIELD_ANONYMIZATION_AUDIT_LOG_PATH") {
            self.log_path = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("LEXSHIELD_ANONYMIZATION_AUDIT_JSON_FORMAT") {
            self.json_format = val
                .parse()
                .context("Invalid LEXSHIELD_ANONYMIZATION_AUDIT_JSON_FORMAT value")?;
        }

        Ok(())
    }
}
