use tracing_subscriber::EnvFilter;

use super::schema::Config;

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref host) = config.server.host {
        if host.trim().is_empty() {
            errors.push("server.host: must not be empty".to_string());
        }
    }

    if config.server.port == Some(0) {
        errors.push("server.port: must be between 1 and 65535".to_string());
    }

    if let Some(ref level) = config.log_level {
        if let Err(e) = EnvFilter::try_new(level) {
            errors.push(format!("log_level: invalid filter '{}' - {}", level, e));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
