use anyhow::{Context, Result};
use asnv_core::logging::config::LoggingConfig;
use asnv_core::logging::formatter::LogFormat;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding (or supplying) the service base URL
pub const SERVICE_URL_ENV: &str = "ASNV_SERVICE_URL";

/// Session configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    #[serde(default)]
    pub templates: TemplateConfig,
    #[serde(default)]
    pub logging: LogSection,
}

/// Validation service location
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Base URL; `validate-asn` is joined onto it
    pub base_url: String,
}

/// Template loading
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateConfig {
    /// Simulated loading latency in milliseconds
    #[serde(default)]
    pub load_delay_ms: u64,
}

/// Optional logging overrides
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogSection {
    pub level: Option<String>,
    pub file: Option<String>,
    pub format: Option<String>,
}

impl Config {
    /// Loads configuration from a TOML file, then applies environment overrides
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Builds a configuration from the environment alone
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(SERVICE_URL_ENV)
            .with_context(|| format!("{} is not set", SERVICE_URL_ENV))?;
        let config = Self::with_base_url(base_url);
        config.validate()?;
        Ok(config)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            service: ServiceConfig {
                base_url: base_url.into(),
            },
            templates: TemplateConfig::default(),
            logging: LogSection::default(),
        }
    }

    /// `ASNV_SERVICE_URL` wins over the file value when set
    pub fn apply_env_overrides(&mut self) {
        self.override_service_url(std::env::var(SERVICE_URL_ENV).ok());
    }

    pub fn override_service_url(&mut self, url: Option<String>) {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.service.base_url = url;
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        let base_url = self.service.base_url.trim();
        if base_url.is_empty() {
            anyhow::bail!("service.base_url cannot be empty");
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            anyhow::bail!(
                "service.base_url must start with http:// or https://: {}",
                base_url
            );
        }

        if let Some(format) = &self.logging.format {
            format
                .parse::<LogFormat>()
                .map_err(|e| anyhow::anyhow!("logging.format: {}", e))?;
        }

        Ok(())
    }

    pub fn template_delay(&self) -> Duration {
        Duration::from_millis(self.templates.load_delay_ms)
    }

    /// Logging configuration, with unset fields taken from the environment
    pub fn logging_config(&self) -> LoggingConfig {
        let defaults = LoggingConfig::default();
        LoggingConfig {
            level: self.logging.level.clone().unwrap_or(defaults.level),
            file: self
                .logging
                .file
                .as_ref()
                .map(PathBuf::from)
                .or(defaults.file),
            console: defaults.console,
            format: self
                .logging
                .format
                .as_deref()
                .and_then(|f| f.parse().ok())
                .unwrap_or(defaults.format),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let tmp_dir = tempfile::tempdir().unwrap();
        let path = tmp_dir.path().join("asnv.toml");
        fs::write(&path, content).unwrap();
        (tmp_dir, path)
    }

    #[test]
    fn parses_full_file() {
        let config: Config = toml::from_str(
            r#"
            [service]
            base_url = "http://localhost:8000"

            [templates]
            load_delay_ms = 250

            [logging]
            level = "debug"
            format = "json"
            "#,
        )
        .unwrap();

        config.validate().unwrap();
        assert_eq!(config.service.base_url, "http://localhost:8000");
        assert_eq!(config.template_delay(), Duration::from_millis(250));

        let logging = config.logging_config();
        assert_eq!(logging.level, "debug");
        assert_eq!(logging.format, LogFormat::Json);
    }

    #[test]
    fn optional_sections_default() {
        let config: Config = toml::from_str("[service]\nbase_url = \"https://asn.example.com\"\n").unwrap();
        assert_eq!(config.template_delay(), Duration::ZERO);
        assert!(config.logging.level.is_none());
    }

    #[test]
    fn load_reads_file() {
        let (_dir, path) = write_config("[service]\nbase_url = \"http://127.0.0.1:8000\"\n");
        let config = Config::load(&path).unwrap();
        assert!(config.service.base_url.starts_with("http"));
    }

    #[test]
    fn load_reports_missing_service_section() {
        let (_dir, path) = write_config("[templates]\nload_delay_ms = 10\n");
        let err = Config::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config file"));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Config::load(Path::new("/nonexistent/asnv.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn validate_rejects_bad_values() {
        assert!(Config::with_base_url("").validate().is_err());
        assert!(Config::with_base_url("localhost:8000").validate().is_err());

        let mut config = Config::with_base_url("http://localhost:8000");
        config.logging.format = Some("yaml".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn override_replaces_base_url_when_present() {
        let mut config = Config::with_base_url("http://localhost:8000");

        config.override_service_url(None);
        assert_eq!(config.service.base_url, "http://localhost:8000");

        config.override_service_url(Some("  ".to_string()));
        assert_eq!(config.service.base_url, "http://localhost:8000");

        config.override_service_url(Some("https://asn.example.com".to_string()));
        assert_eq!(config.service.base_url, "https://asn.example.com");
    }
}
