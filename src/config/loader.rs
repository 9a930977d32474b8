//! Configuration loading from disk and environment.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Toml},
    Figment, Provider,
};
use thiserror::Error;

use crate::config::store::Configuration;

/// Default configuration root when `--conf` is not given.
pub const DEFAULT_CONFIG_ROOT: &str = "data/";

/// File names tried, in order, when the root is a directory.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["config.toml", "local.toml", "prod.toml"];

/// Prefix of environment variables that override file values.
///
/// `PANDORA_HTTP__PORT=9000` overrides `http.port`.
pub const ENV_PREFIX: &str = "PANDORA_";

/// Separator for nested keys in environment variable names.
pub const ENV_SEPARATOR: &str = "__";

/// Error type for configuration loading and typed lookups.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no configuration found at {}", root.display())]
    NotFound { root: PathBuf },

    #[error("failed to load {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: figment::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(#[from] figment::Error),

    #[error("`{key}` must be a {expected}, found {found}")]
    Type {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("invalid `{key}` section: {source}")]
    Section {
        key: String,
        #[source]
        source: figment::Error,
    },
}

/// Where configuration is loaded from: a file, or a directory holding one of
/// [`CONFIG_FILE_NAMES`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigRoot(PathBuf);

impl ConfigRoot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Resolve the root to the concrete file that will be parsed.
    pub fn resolve(&self) -> Result<PathBuf, ConfigError> {
        if self.0.is_file() {
            return Ok(self.0.clone());
        }
        if self.0.is_dir() {
            if let Some(found) = CONFIG_FILE_NAMES
                .iter()
                .map(|name| self.0.join(name))
                .find(|candidate| candidate.is_file())
            {
                return Ok(found);
            }
        }
        Err(ConfigError::NotFound {
            root: self.0.clone(),
        })
    }
}

impl Default for ConfigRoot {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_ROOT)
    }
}

impl From<PathBuf> for ConfigRoot {
    fn from(path: PathBuf) -> Self {
        Self(path)
    }
}

impl fmt::Display for ConfigRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Load configuration from `root`, applying `PANDORA_*` environment overrides.
pub fn load_config(root: &ConfigRoot) -> Result<Configuration, ConfigError> {
    load_config_with_env(root, Env::prefixed(ENV_PREFIX).split(ENV_SEPARATOR))
}

/// Load configuration from `root`, layering `env` over the file.
///
/// Environment values win over file values. Variables that are not valid
/// Unicode are skipped, whatever their name.
pub fn load_config_with_env(root: &ConfigRoot, env: Env) -> Result<Configuration, ConfigError> {
    let path = root.resolve()?;
    let env_layer = env.metadata().name.to_string();

    let figment = Figment::new().merge(Toml::file(&path)).merge(env);
    let config =
        Configuration::from_figment(figment).map_err(|source| ConfigError::Load { path, source })?;
    Ok(config.with_env_layer(env_layer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use std::fs;

    const SAMPLE: &str = r#"
        [http]
        host = "0.0.0.0"
        port = 9000

        [security]
        admin_password = "adminpass1"
    "#;

    /// Environment layer nothing in the test process sets.
    fn no_env() -> Env {
        Env::prefixed("PANDORA_LOADER_UNSET_").split(ENV_SEPARATOR)
    }

    #[test]
    fn test_directory_root_finds_config_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("local.toml"), SAMPLE).unwrap();

        let root = ConfigRoot::new(dir.path());
        assert_eq!(root.resolve().unwrap(), dir.path().join("local.toml"));

        let config = load_config_with_env(&root, no_env()).unwrap();
        assert_eq!(config.get_int("http.port").unwrap(), Some(9000));
    }

    #[test]
    fn test_config_toml_preferred_over_local() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("local.toml"), "[http]\nport = 1").unwrap();
        fs::write(dir.path().join("config.toml"), "[http]\nport = 2").unwrap();

        let config = load_config_with_env(&ConfigRoot::new(dir.path()), no_env()).unwrap();
        assert_eq!(config.get_int("http.port").unwrap(), Some(2));
    }

    #[test]
    fn test_file_root() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("custom.toml");
        fs::write(&file, SAMPLE).unwrap();

        let config = load_config_with_env(&ConfigRoot::new(&file), no_env()).unwrap();
        assert_eq!(
            config.get_str("security.admin_password").unwrap().as_deref(),
            Some("adminpass1")
        );
    }

    #[test]
    fn test_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = ConfigRoot::new(dir.path().join("absent"));
        assert!(matches!(
            load_config_with_env(&root, no_env()),
            Err(ConfigError::NotFound { .. })
        ));

        // A directory without any known file name is also a miss
        let empty = ConfigRoot::new(dir.path());
        assert!(matches!(empty.resolve(), Err(ConfigError::NotFound { .. })));
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.toml"), "[http\nport = ").unwrap();

        let err = load_config_with_env(&ConfigRoot::new(dir.path()), no_env()).unwrap_err();
        assert!(matches!(err, ConfigError::Load { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_env_overrides_file_values() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", SAMPLE)?;
            jail.set_env("PANDORA_LOADER_A_HTTP__PORT", 9100);
            jail.set_env("PANDORA_LOADER_A_LOG__LEVEL", "debug");
            jail.set_env("LOADER_A_UNRELATED", "x");

            let env = Env::prefixed("PANDORA_LOADER_A_").split(ENV_SEPARATOR);
            let config = load_config_with_env(&ConfigRoot::new(jail.directory()), env).unwrap();
            assert_eq!(config.get_int("http.port").unwrap(), Some(9100));
            assert_eq!(config.get_str("log.level").unwrap().as_deref(), Some("debug"));
            assert_eq!(config.get_str("http.host").unwrap().as_deref(), Some("0.0.0.0"));
            assert!(!config.contains("unrelated"));

            let http = crate::config::HttpSettings::from_config(&config).unwrap();
            assert_eq!(http.bind_address(), "0.0.0.0:9100");
            Ok(())
        });
    }

    #[test]
    fn test_numeric_env_password_reads_as_string() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", SAMPLE)?;
            jail.set_env("PANDORA_LOADER_B_SECURITY__ADMIN_PASSWORD", "12345678");

            let env = Env::prefixed("PANDORA_LOADER_B_").split(ENV_SEPARATOR);
            let config = load_config_with_env(&ConfigRoot::new(jail.directory()), env).unwrap();
            assert_eq!(
                config.get_str("security.admin_password").unwrap().as_deref(),
                Some("12345678")
            );
            assert!(crate::config::validate_admin_password(&config).is_ok());
            Ok(())
        });
    }

    #[test]
    fn test_env_override_with_wrong_type() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", SAMPLE)?;
            jail.set_env("PANDORA_LOADER_C_HTTP__PORT", "nine");

            let env = Env::prefixed("PANDORA_LOADER_C_").split(ENV_SEPARATOR);
            let config = load_config_with_env(&ConfigRoot::new(jail.directory()), env).unwrap();
            assert!(matches!(
                config.get_int("http.port"),
                Err(ConfigError::Type { expected: "integer", .. })
            ));
            Ok(())
        });
    }

    #[test]
    fn test_default_root() {
        assert_eq!(ConfigRoot::default().as_path(), Path::new("data/"));
        assert_eq!(ConfigRoot::default().to_string(), "data/");
    }
}
