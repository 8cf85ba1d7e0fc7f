//! Configuration validation.
//!
//! Serde handles the syntactic side; this module checks values that parse but
//! cannot work (bad URLs, zero timeouts, empty table coordinates). All problems
//! are collected and returned together.

use std::fmt;
use url::Url;

use crate::config::schema::RelayConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_url("endpoints.chain_api", &config.endpoints.chain_api, &mut errors);
    check_url("endpoints.proxy_api", &config.endpoints.proxy_api, &mut errors);

    if config.timeouts.request_ms == 0 {
        errors.push(ValidationError {
            field: "timeouts.request_ms",
            message: "must be greater than zero".to_string(),
        });
    }

    let table = &config.account_table;
    for (field, value) in [
        ("account_table.code", &table.code),
        ("account_table.scope", &table.scope),
        ("account_table.table", &table.table),
        ("account_table.key_type", &table.key_type),
    ] {
        if value.trim().is_empty() {
            errors.push(ValidationError {
                field,
                message: "must not be empty".to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError {
            field,
            message: format!("unsupported scheme '{}'", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError {
            field,
            message: format!("invalid URL '{}': {}", value, e),
        }),
    }
}
