use crate::registry::{DEFAULT_MISLEADING_PHRASES, DEFAULT_TRUSTED_DOMAINS};
use crate::responder::defaults;
use anyhow::Context;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub registries: RegistryConfig,
    #[serde(default)]
    pub templates: TemplateConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_socket_path")]
    pub socket_path: String,
    #[serde(default = "default_max_line_bytes")]
    pub max_line_bytes: Option<usize>,
}

/// Static reference data for the reliability classifier
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RegistryConfig {
    #[serde(default = "default_trusted_domains")]
    pub trusted_domains: Vec<String>,
    #[serde(default = "default_misleading_phrases")]
    pub misleading_phrases: Vec<String>,
}

/// Reply pools and fixed replies used by the response composer
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TemplateConfig {
    #[serde(default = "default_greetings")]
    pub greetings: Vec<String>,
    #[serde(default = "default_reliable")]
    pub reliable: Vec<String>,
    #[serde(default = "default_unreliable")]
    pub unreliable: Vec<String>,
    #[serde(default = "default_uncertain")]
    pub uncertain: Vec<String>,
    #[serde(default = "default_follow_ups")]
    pub follow_ups: Vec<String>,
    #[serde(default = "default_could_not_verify")]
    pub could_not_verify: String,
    #[serde(default = "default_consultation")]
    pub consultation: String,
    #[serde(default = "default_news")]
    pub news: String,
    #[serde(default = "default_fallback")]
    pub fallback: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

fn default_socket_path() -> String {
    "/var/run/health-verify.sock".to_string()
}

fn default_max_line_bytes() -> Option<usize> {
    Some(64 * 1024)
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_trusted_domains() -> Vec<String> {
    owned(DEFAULT_TRUSTED_DOMAINS)
}

fn default_misleading_phrases() -> Vec<String> {
    owned(DEFAULT_MISLEADING_PHRASES)
}

fn default_greetings() -> Vec<String> {
    owned(defaults::GREETINGS)
}

fn default_reliable() -> Vec<String> {
    owned(defaults::VERIFIED_RELIABLE)
}

fn default_unreliable() -> Vec<String> {
    owned(defaults::VERIFIED_UNRELIABLE)
}

fn default_uncertain() -> Vec<String> {
    owned(defaults::VERIFIED_UNCERTAIN)
}

fn default_follow_ups() -> Vec<String> {
    owned(defaults::FOLLOW_UP_QUESTIONS)
}

fn default_could_not_verify() -> String {
    defaults::COULD_NOT_VERIFY.to_string()
}

fn default_consultation() -> String {
    defaults::CONSULTATION.to_string()
}

fn default_news() -> String {
    defaults::NEWS.to_string()
}

fn default_fallback() -> String {
    defaults::FALLBACK.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            socket_path: default_socket_path(),
            max_line_bytes: default_max_line_bytes(),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            trusted_domains: default_trusted_domains(),
            misleading_phrases: default_misleading_phrases(),
        }
    }
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            greetings: default_greetings(),
            reliable: default_reliable(),
            unreliable: default_unreliable(),
            uncertain: default_uncertain(),
            follow_ups: default_follow_ups(),
            could_not_verify: default_could_not_verify(),
            consultation: default_consultation(),
            news: default_news(),
            fallback: default_fallback(),
        }
    }
}

impl LoggingConfig {
    /// `None` when the level name is not recognised
    pub fn level_filter(&self) -> Option<LevelFilter> {
        LevelFilter::from_str(self.level.trim()).ok()
    }
}

impl Config {
    /// Level the logger is built with; `--verbose` always wins
    pub fn log_level(&self, verbose: bool) -> LevelFilter {
        if verbose {
            return LevelFilter::Debug;
        }
        self.logging
            .as_ref()
            .and_then(LoggingConfig::level_filter)
            .unwrap_or(LevelFilter::Info)
    }

    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {path}"))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file: {path}"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_file(&self, path: &str) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file: {path}"))?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self
            .registries
            .trusted_domains
            .iter()
            .all(|d| d.trim().is_empty())
        {
            anyhow::bail!("registries.trusted_domains must contain at least one domain");
        }

        if let Some(i) = self
            .registries
            .misleading_phrases
            .iter()
            .position(|p| p.trim().is_empty())
        {
            anyhow::bail!("registries.misleading_phrases[{i}] is blank");
        }

        let pools = [
            ("greetings", &self.templates.greetings),
            ("reliable", &self.templates.reliable),
            ("unreliable", &self.templates.unreliable),
            ("uncertain", &self.templates.uncertain),
            ("follow_ups", &self.templates.follow_ups),
        ];
        for (name, pool) in pools {
            if pool.is_empty() {
                anyhow::bail!("templates.{name} must contain at least one template");
            }
        }

        if self.server.max_line_bytes == Some(0) {
            anyhow::bail!("server.max_line_bytes must be greater than zero");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.registries.trusted_domains.len(), 10);
        assert_eq!(config.registries.misleading_phrases.len(), 13);
        assert_eq!(config.templates.greetings.len(), 3);
    }

    #[test]
    fn test_partial_yaml_falls_back_to_defaults() {
        let yaml = r#"
server:
  socket_path: "/tmp/hv.sock"
  max_line_bytes: 1024
registries:
  trusted_domains:
    - "nhs.uk"
logging:
  level: "debug"
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.socket_path, "/tmp/hv.sock");
        assert_eq!(config.registries.trusted_domains, vec!["nhs.uk".to_string()]);
        assert_eq!(config.registries.misleading_phrases.len(), 13);
        assert_eq!(config.templates.follow_ups.len(), 3);
        assert_eq!(config.logging.unwrap().level, "debug");
    }

    #[test]
    fn test_server_section_may_omit_socket_path() {
        let yaml = r#"
server:
  max_line_bytes: 512
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.socket_path, "/var/run/health-verify.sock");
        assert_eq!(config.server.max_line_bytes, Some(512));

        let config: Config = serde_yaml::from_str("server: {}").unwrap();
        assert_eq!(config.server.max_line_bytes, Some(64 * 1024));
    }

    #[test]
    fn test_log_level_selection() {
        let mut config = Config::default();
        assert_eq!(config.log_level(false), LevelFilter::Info);
        assert_eq!(config.log_level(true), LevelFilter::Debug);

        config.logging = Some(LoggingConfig {
            level: "debug".to_string(),
        });
        assert_eq!(config.log_level(false), LevelFilter::Debug);

        config.logging = Some(LoggingConfig {
            level: "WARN".to_string(),
        });
        assert_eq!(config.log_level(false), LevelFilter::Warn);
        assert_eq!(config.log_level(true), LevelFilter::Debug);

        config.logging = Some(LoggingConfig {
            level: "loud".to_string(),
        });
        assert_eq!(config.log_level(false), LevelFilter::Info);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.socket_path, "/var/run/health-verify.sock");
    }

    #[test]
    fn test_validate_rejects_empty_pool() {
        let mut config = Config::default();
        config.templates.uncertain.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("templates.uncertain"));
    }

    #[test]
    fn test_validate_rejects_blank_phrase() {
        let mut config = Config::default();
        config.registries.misleading_phrases.push("  ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_missing_domains() {
        let mut config = Config::default();
        config.registries.trusted_domains.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_yaml_roundtrip_keeps_registries() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(
            parsed.registries.trusted_domains,
            config.registries.trusted_domains
        );
    }
}
