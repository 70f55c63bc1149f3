//! Configuration validation
//!
//! Validates configuration at startup to catch misconfigurations early.

use anyhow::Result;
use slidepress_core::Config;

const REMOTE_STORAGE_VARS: [&str; 4] = [
    "AWS_ACCESS_KEY_ID",
    "AWS_SECRET_ACCESS_KEY",
    "AWS_S3_BUCKET",
    "AWS_REGION",
];

/// Validate configuration and warn about settings that are legal but probably wrong.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    // Partial remote config silently means local delivery
    if config.remote_storage().is_none() {
        let set: Vec<&str> = REMOTE_STORAGE_VARS
            .iter()
            .copied()
            .filter(|name| {
                std::env::var(name)
                    .map(|v| !v.trim().is_empty())
                    .unwrap_or(false)
            })
            .collect();
        if !set.is_empty() {
            tracing::warn!(
                set = ?set,
                required = ?REMOTE_STORAGE_VARS,
                "Remote storage partially configured; converted files will be served locally"
            );
        }
    }

    if config.conversion_timeout_secs().is_none() {
        tracing::warn!("CONVERSION_TIMEOUT_SECS=0: a hung converter will hold its request forever");
    }

    if !config.is_production() && config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_config_passes() {
        let config = Config::for_directories("/tmp/slidepress-a", "/tmp/slidepress-b");
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_shared_directory_fails() {
        let config = Config::for_directories("/tmp/slidepress-a", "/tmp/slidepress-a");
        assert!(validate_config(&config).is_err());
    }
}
