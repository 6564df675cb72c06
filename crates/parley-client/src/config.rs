use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

/// Origin used when neither a config file nor the environment names one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
}

#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Config {
    /// Load configuration from a TOML file with env var overrides.
    ///
    /// Falls back to built-in defaults when the file does not exist.
    /// `PARLEY_API_BASE_URL` wins over the file value.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed,
    /// or if the resulting base address is not a valid absolute URL.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str::<Self>(&content).context("failed to parse config file")?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        url::Url::parse(&config.api.base_url)
            .with_context(|| format!("invalid API base URL: {}", config.api.base_url))?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("PARLEY_API_BASE_URL") {
            self.api.base_url = v;
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: DEFAULT_BASE_URL.into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serial_test::serial;

    use super::*;

    #[test]
    fn defaults_when_file_missing() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8000");
    }

    #[test]
    #[serial]
    fn load_without_file_or_env_uses_default() {
        unsafe { std::env::remove_var("PARLEY_API_BASE_URL") };
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    #[serial]
    fn parse_valid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parley.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        write!(
            f,
            r#"
[api]
base_url = "http://chat.internal:9000"
"#
        )
        .unwrap();

        unsafe { std::env::remove_var("PARLEY_API_BASE_URL") };

        let config = Config::load(&path).unwrap();
        assert_eq!(config.api.base_url, "http://chat.internal:9000");
    }

    #[test]
    #[serial]
    fn env_overrides_file_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parley.toml");
        std::fs::write(&path, "[api]\nbase_url = \"http://from-file:1\"\n").unwrap();

        unsafe { std::env::set_var("PARLEY_API_BASE_URL", "http://from-env:2") };
        let config = Config::load(&path).unwrap();
        unsafe { std::env::remove_var("PARLEY_API_BASE_URL") };

        assert_eq!(config.api.base_url, "http://from-env:2");
    }

    #[test]
    #[serial]
    fn invalid_base_url_rejected() {
        unsafe { std::env::set_var("PARLEY_API_BASE_URL", "not a url") };
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(&dir.path().join("absent.toml"));
        unsafe { std::env::remove_var("PARLEY_API_BASE_URL") };

        assert!(result.is_err());
    }

    #[test]
    fn malformed_toml_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parley.toml");
        std::fs::write(&path, "[api\nbase_url = ").unwrap();

        assert!(Config::load(&path).is_err());
    }
}
