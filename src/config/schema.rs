use anyhow::{bail, Context, Result};
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_DIR_NAME: &str = ".volunteer-hub";
const CONFIG_FILE_NAME: &str = "config.toml";
const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_TOKEN_FILE: &str = "~/.volunteer-hub/session.json";

pub const ENV_API_URL: &str = "VOLUNTEER_HUB_API_URL";
pub const ENV_TOKEN_FILE: &str = "VOLUNTEER_HUB_TOKEN_FILE";
pub const ENV_TIMEOUT_SECS: &str = "VOLUNTEER_HUB_TIMEOUT_SECS";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Where this config was loaded from. Not serialized.
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Persisted token storage; `~` is expanded.
    #[serde(default = "default_token_file")]
    pub token_file: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_token_file() -> String {
    DEFAULT_TOKEN_FILE.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_file: default_token_file(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME),
            api: ApiConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

impl Config {
    /// Load `~/.volunteer-hub/config.toml`, writing defaults on first run,
    /// then apply environment overrides.
    pub fn load_or_init() -> Result<Self> {
        let config_dir = UserDirs::new()
            .map(|dirs| dirs.home_dir().join(CONFIG_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR_NAME));

        let mut config = Self::load_or_init_in(&config_dir)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn load_or_init_in(config_dir: &Path) -> Result<Self> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("failed to read {}", config_path.display()))?;
            toml::from_str::<Config>(&content)
                .with_context(|| format!("invalid config at {}", config_path.display()))?
        } else {
            std::fs::create_dir_all(config_dir)
                .with_context(|| format!("failed to create {}", config_dir.display()))?;
            let config = Config::default();
            config.write_to(&config_path)?;
            tracing::info!("wrote default config to {}", config_path.display());
            config
        };

        config.config_path = config_path;
        config.validate()?;
        Ok(config)
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.api.base_url = url;
        }
        if let Some(path) = lookup(ENV_TOKEN_FILE).filter(|v| !v.trim().is_empty()) {
            self.session.token_file = path.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            self.api.timeout_secs = raw
                .trim()
                .parse()
                .with_context(|| format!("{ENV_TIMEOUT_SECS} must be a whole number of seconds"))?;
        }
        self.validate()
    }

    /// Point the client at another backend, e.g. from `--api-url`.
    pub fn override_base_url(&mut self, url: &str) -> Result<()> {
        self.api.base_url = url.to_string();
        self.validate()
    }

    fn validate(&mut self) -> Result<()> {
        let trimmed = self.api.base_url.trim().trim_end_matches('/').to_string();
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            bail!("api.base_url must start with http:// or https://, got {trimmed:?}");
        }
        if self.api.timeout_secs == 0 {
            bail!("api.timeout_secs must be greater than zero");
        }
        self.api.base_url = trimmed;
        Ok(())
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        let rendered = toml::to_string_pretty(self).context("failed to render config")?;
        std::fs::write(path, rendered)
            .with_context(|| format!("failed to write {}", path.display()))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    pub fn token_file(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.session.token_file).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn base_url_override_goes_through_validation() {
        let mut config = Config::default();
        config
            .override_base_url("  https://staging.example.org/ ")
            .unwrap();
        assert_eq!(config.api.base_url, "https://staging.example.org");

        let err = config
            .override_base_url("ftp://files.example.org")
            .unwrap_err();
        assert!(err.to_string().contains("http:// or https://"));
    }

    #[test]
    fn first_run_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_init_in(dir.path()).unwrap();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(dir.path().join(CONFIG_FILE_NAME).exists());

        let reloaded = Config::load_or_init_in(dir.path()).unwrap();
        assert_eq!(reloaded.api.base_url, config.api.base_url);
    }

    #[test]
    fn partial_file_fills_defaults_and_trims_slash() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[api]\nbase_url = \"https://api.example.org/\"\n",
        )
        .unwrap();

        let config = Config::load_or_init_in(dir.path()).unwrap();
        assert_eq!(config.api.base_url, "https://api.example.org");
        assert_eq!(config.api.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.session.token_file, DEFAULT_TOKEN_FILE);
    }

    #[test]
    fn rejects_non_http_base_url() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[api]\nbase_url = \"ftp://nope\"\n",
        )
        .unwrap();
        assert!(Config::load_or_init_in(dir.path()).is_err());
    }

    #[test]
    fn environment_overrides_win() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_API_URL, "https://staging.example.org/"),
            (ENV_TOKEN_FILE, "/tmp/token.json"),
            (ENV_TIMEOUT_SECS, "5"),
        ]);

        let mut config = Config::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| (*v).to_string()))
            .unwrap();

        assert_eq!(config.api.base_url, "https://staging.example.org");
        assert_eq!(config.token_file(), PathBuf::from("/tmp/token.json"));
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn bad_timeout_override_is_an_error() {
        let mut config = Config::default();
        let result = config.apply_overrides(|key| {
            (key == ENV_TIMEOUT_SECS).then(|| "soon".to_string())
        });
        assert!(result.is_err());

        let result = config.apply_overrides(|key| {
            (key == ENV_TIMEOUT_SECS).then(|| "0".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn token_file_expands_home() {
        let config = Config::default();
        let expanded = config.token_file();
        if std::env::var_os("HOME").is_some() {
            assert!(!expanded.to_string_lossy().starts_with('~'));
        }
        assert!(expanded.ends_with("session.json"));
    }
}
