use std::net::SocketAddr;

use eyre::Result;

use crate::config::models::{AppConfig, DatabaseConfig};

/// Validation result type alias
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validation error types
#[derive(Debug, thiserror::Error, Clone)]
pub enum ValidationError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid field '{field}': {message}")]
    InvalidField { field: String, message: String },

    #[error("Invalid listen address '{address}': {reason}")]
    InvalidListenAddress { address: String, reason: String },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },
}

/// Known driver ids and whether they use a network endpoint.
const DRIVERS: &[(&str, bool)] = &[
    ("postgres", true),
    ("postgresql", true),
    ("mysql", true),
    ("mariadb", true),
    ("sqlite", false),
];

/// Application configuration validator
pub struct AppConfigValidator;

impl AppConfigValidator {
    /// Validate the entire application configuration
    pub fn validate(config: &AppConfig) -> ValidationResult<()> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_listen_address(&config.listen_addr) {
            errors.push(e);
        }

        if let Err(mut db_errors) = Self::validate_database(&config.database) {
            errors.append(&mut db_errors);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::ValidationFailed {
                message: Self::format_multiple_errors(errors),
            })
        }
    }

    /// Validate listen address format
    fn validate_listen_address(address: &str) -> ValidationResult<()> {
        if address.parse::<SocketAddr>().is_err() {
            return Err(ValidationError::InvalidListenAddress {
                address: address.to_string(),
                reason: "Must be in format 'IP:PORT' (e.g., '127.0.0.1:9000' or '0.0.0.0:8080')"
                    .to_string(),
            });
        }
        Ok(())
    }

    /// Validate database connection settings
    fn validate_database(db: &DatabaseConfig) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        let networked = match DRIVERS.iter().find(|(id, _)| *id == db.driver) {
            Some((_, networked)) => *networked,
            None => {
                errors.push(ValidationError::InvalidField {
                    field: "database.driver".to_string(),
                    message: format!(
                        "Unknown driver '{}'; expected one of: postgres, mysql, sqlite",
                        db.driver
                    ),
                });
                // Without a driver the remaining checks would be noise
                return Err(errors);
            }
        };

        if networked {
            if db.protocol != "tcp" {
                errors.push(ValidationError::InvalidField {
                    field: "database.protocol".to_string(),
                    message: format!("Unsupported protocol '{}'; only 'tcp' is supported", db.protocol),
                });
            }
            if db.port.is_empty() || !db.port.chars().all(|c| c.is_ascii_digit()) {
                errors.push(ValidationError::InvalidField {
                    field: "database.port".to_string(),
                    message: format!("Port '{}' must be numeric", db.port),
                });
            }
        }

        if db.name.is_empty() {
            errors.push(ValidationError::MissingField {
                field: "database.name".to_string(),
            });
        }

        if db.max_connections == 0 {
            errors.push(ValidationError::InvalidField {
                field: "database.max_connections".to_string(),
                message: "Must be at least 1".to_string(),
            });
        }

        if db.max_idle_connections > db.max_connections {
            errors.push(ValidationError::InvalidField {
                field: "database.max_idle_connections".to_string(),
                message: format!(
                    "Cannot exceed max_connections ({} > {})",
                    db.max_idle_connections, db.max_connections
                ),
            });
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Format multiple validation errors into a single readable message
    fn format_multiple_errors(errors: Vec<ValidationError>) -> String {
        let messages: Vec<String> = errors.iter().map(|e| format!("  - {e}")).collect();
        format!(
            "Found {} configuration error(s):\n{}",
            messages.len(),
            messages.join("\n")
        )
    }
}
