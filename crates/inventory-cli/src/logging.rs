//! Logging setup
//!
//! Logs go to `config.log_file` when set, otherwise to stderr. `RUST_LOG`
//! replaces the configured level entirely.

use std::fs::OpenOptions;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use inventory_core::Config;

/// Initialize logging for CLI commands
pub fn init(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.log_level)));

    let Some(ref log_path) = config.log_file else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
        return;
    };

    let log_file = match OpenOptions::new().create(true).append(true).open(log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not open log file {:?}: {}", log_path, e);
            return;
        }
    };

    // Initialize file-based logging (ignore error if already initialized)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();

    debug!("Logging to {:?}", log_path);
}

fn default_directives(level: &str) -> String {
    format!("inventory_core={},inventory_cli={}", level, level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        assert_eq!(
            default_directives("debug"),
            "inventory_core=debug,inventory_cli=debug"
        );
    }
}
