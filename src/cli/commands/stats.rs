//! Stats command implementation

use super::build_engine;
use clap::Args;

/// Arguments for the stats command
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Print JSON instead of the console summary
    #[arg(long)]
    pub json: bool,
}

impl StatsArgs {
    /// Execute the stats command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let (_, engine) = match build_engine(config_path) {
            Ok(built) => built,
            Err(e) => {
                eprintln!("Configuration error: {e:#}");
                return Ok(2);
            }
        };
        let stats = engine.stats();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&stats)?);
            return Ok(0);
        }

        println!("LexShield {}", stats.version);
        println!();
        println!("Detectors: {}", stats.patterns_supported);
        for name in &stats.pattern_names {
            println!("  • {name}");
        }
        println!();
        let types: Vec<&str> = stats.entity_types.iter().map(|t| t.as_str()).collect();
        println!("Entity types: {}", types.join(", "));
        println!();
        println!("Capabilities:");
        let capabilities = serde_json::to_value(stats.capabilities)?;
        if let Some(flags) = capabilities.as_object() {
            for (name, enabled) in flags {
                let mark = if enabled.as_bool().unwrap_or(false) { "✅" } else { "➖" };
                println!("  {mark} {name}");
            }
        }
        println!();
        println!("Security:");
        for feature in &stats.security_features {
            println!("  • {feature}");
        }

        Ok(0)
    }
}
