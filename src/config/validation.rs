//! Pre-flight validation of security-critical settings.
//!
//! Runs after the application is assembled and before it serves traffic.
//! Failures are operator errors and stop startup.

use thiserror::Error;

use crate::config::loader::ConfigError;
use crate::config::store::Configuration;

/// Key holding the administrator credential.
pub const ADMIN_PASSWORD_KEY: &str = "security.admin_password";

/// Minimum accepted length of the administrator credential, in characters.
pub const MIN_ADMIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("`{key}` is not set")]
    Missing { key: &'static str },

    #[error("`{key}` must be a string, found {found}")]
    Malformed {
        key: &'static str,
        found: &'static str,
    },

    #[error("`{key}` must be at least {min} characters long, got {length}")]
    TooShort {
        key: &'static str,
        length: usize,
        min: usize,
    },
}

/// Enforce the administrator credential policy.
pub fn validate_admin_password(config: &Configuration) -> Result<(), ValidationError> {
    let key = ADMIN_PASSWORD_KEY;
    let password = match config.get_str(key) {
        Ok(Some(password)) => password,
        Ok(None) => return Err(ValidationError::Missing { key }),
        Err(ConfigError::Type { found, .. }) => {
            return Err(ValidationError::Malformed { key, found })
        }
        Err(_) => {
            return Err(ValidationError::Malformed {
                key,
                found: "unreadable value",
            })
        }
    };

    let length = password.chars().count();
    if length == 0 {
        return Err(ValidationError::Missing { key });
    }
    if length < MIN_ADMIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            key,
            length,
            min: MIN_ADMIN_PASSWORD_LEN,
        });
    }
    Ok(())
}
