//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "lexshield.toml")]
    pub output: String,

    /// Include every option with comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing LexShield configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Validate configuration: lexshield validate-config");
                println!("  3. Preview detections: lexshield scan <files>");
                println!("  4. Anonymize: lexshield anonymize <files> --output-dir anonymized");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# LexShield Configuration File
# Legal document anonymization

[application]
log_level = "info"

[anonymization]
confidence_threshold = 0.6
context_window = 40

[anonymization.redaction]
enabled = true

[anonymization.audit]
enabled = false
log_path = "./audit/anonymization.log"

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# LexShield Configuration File
# Legal document anonymization
#
# Every setting has a default; delete whatever you do not need to change.
# Values may reference environment variables with ${VAR_NAME}.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# Anonymization
# ============================================================================
[anonymization]
# Detections below this confidence are ignored (0.0 - 1.0)
confidence_threshold = 0.6

# Documents larger than this many bytes are rejected
max_input_bytes = 33554432

# Characters of anonymized text kept either side of each entity's context
context_window = 40

# Optional extra detectors, appended to the built-in legal patterns
# pattern_library = "./patterns/firm_patterns.toml"

[anonymization.redaction]
# Replace whole sentences containing confidentiality or privilege markers
enabled = true

[anonymization.magnitude]
# Lower bound of each amount class; below `medium` is SMALL
medium = 1000.0
large = 10000.0
major = 100000.0
massive = 1000000.0

# Risk rules per entity type: severity is medium from `medium_at` entities,
# high from `high_at`; `weight` scales the type's contribution to the score.
[anonymization.risk.identifier]
medium_at = 1
high_at = 5
weight = 2.0

[anonymization.risk.person]
medium_at = 5
high_at = 20
weight = 1.0

# Letter grade cutoffs on the risk score
[anonymization.risk.grades]
b = 3.0
c = 8.0
d = 15.0
f = 25.0

[anonymization.audit]
# Append one line per anonymized document and per mapping purge.
# Entries hold counts and a content digest, never original values.
enabled = false
log_path = "./audit/anonymization.log"
json_format = true

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable JSON file logging in addition to the console
local_enabled = false

# Log directory
local_path = "./logs"

# Log rotation (daily, hourly or never)
local_rotation = "daily"
"#
        .to_string()
    }
}
