//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::LexShieldConfig;
use crate::domain::errors::LexShieldError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into LexShieldConfig
/// 4. Applies environment variable overrides (LEXSHIELD_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use lexshield::config::loader::load_config;
///
/// let config = load_config("lexshield.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<LexShieldConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(LexShieldError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        LexShieldError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Loads configuration, falling back to defaults when the file is absent
///
/// Environment overrides are applied either way.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<LexShieldConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "No configuration file, using defaults");
    let mut config = LexShieldConfig::default();
    apply_env_overrides(&mut config)?;
    validate(&config)?;
    Ok(config)
}

/// Parses configuration text: substitution, TOML, overrides, validation
pub fn parse_config(contents: &str) -> Result<LexShieldConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: LexShieldConfig = toml::from_str(&contents)
        .map_err(|e| LexShieldError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;
    validate(&config)?;

    Ok(config)
}

fn validate(config: &LexShieldConfig) -> Result<()> {
    config.validate().map_err(|e| {
        LexShieldError::Configuration(format!("Configuration validation failed: {}", e))
    })
}

fn env_var_regex() -> &'static Regex {
    static ENV_VAR: OnceLock<Regex> = OnceLock::new();
    ENV_VAR.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("placeholder pattern is a literal")
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = env_var_regex();
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    caps[0].to_string()
                }
            }
        });
        result.push_str(&processed);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(LexShieldError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the LEXSHIELD_* prefix
///
/// Environment variables follow the pattern: LEXSHIELD_<SECTION>_<KEY>
/// For example: LEXSHIELD_APPLICATION_LOG_LEVEL
fn apply_env_overrides(config: &mut LexShieldConfig) -> Result<()> {
    if let Ok(val) = std::env::var("LEXSHIELD_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    config
        .anonymization
        .apply_env_overrides()
        .map_err(|e| LexShieldError::Configuration(format!("{e:#}")))?;

    if let Ok(val) = std::env::var("LEXSHIELD_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().map_err(|_| {
            LexShieldError::Configuration(format!(
                "Invalid LEXSHIELD_LOGGING_LOCAL_ENABLED value: {val}"
            ))
        })?;
    }
    if let Ok(val) = std::env::var("LEXSHIELD_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("LEXSHIELD_LOADER_TEST_VAR", "test_value");
        let input = "log_path = \"${LEXSHIELD_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "log_path = \"test_value\"\n");
        std::env::remove_var("LEXSHIELD_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("LEXSHIELD_LOADER_MISSING_VAR");
        let input = "log_path = \"${LEXSHIELD_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("LEXSHIELD_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_skips_comments() {
        let input = "# log_path = \"${LEXSHIELD_LOADER_COMMENTED_OUT}\"";
        let result = substitute_env_vars(input).unwrap();
        assert!(result.contains("${LEXSHIELD_LOADER_COMMENTED_OUT}"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_or_default_missing_file() {
        let config = load_config_or_default("definitely-not-here.toml").unwrap();
        assert!(config.anonymization.redaction.enabled);
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[anonymization]
confidence_threshold = 0.7
context_window = 20

[anonymization.audit]
enabled = false
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.anonymization.confidence_threshold, 0.7);
        assert_eq!(config.anonymization.context_window, 20);
    }

    #[test]
    fn test_invalid_toml_is_configuration_error() {
        let err = parse_config("[anonymization\nconfidence_threshold = ").unwrap_err();
        assert!(matches!(err, LexShieldError::Configuration(_)));
    }
}
