#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_url, Validate};
use toml_config::TomlConfig;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8001";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, clap::Parser)]
#[command(name = "school-admin")]
#[command(about = "Administer students, instructors, courses and enrollments")]
pub struct CliConfig {
    #[arg(long, help = "Base address of the school records API [default: http://localhost:8001]")]
    pub api_base_url: Option<String>,

    #[arg(long, help = "TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: cli::Command,
}

/// Effective settings after merging flags, the config file and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub log_level: String,
    pub json_logs: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl Settings {
    /// Flags win over the file, the file over built-in defaults.
    pub fn merge(
        file: Option<TomlConfig>,
        api_base_url: Option<String>,
        verbose: bool,
        json_logs: bool,
    ) -> Result<Self> {
        let file = file.unwrap_or_default();
        file.validate()?;

        let defaults = Settings::default();
        let settings = Settings {
            api_base_url: api_base_url
                .or(file.api.base_url.clone())
                .unwrap_or(defaults.api_base_url),
            log_level: if verbose {
                "debug".to_string()
            } else {
                file.logging.level.clone().unwrap_or(defaults.log_level)
            },
            json_logs: json_logs || file.json_logs(),
        };
        settings.validate()?;
        Ok(settings)
    }

    #[cfg(feature = "cli")]
    pub fn from_cli(cli: &CliConfig) -> Result<Self> {
        let file = cli
            .config
            .as_deref()
            .map(TomlConfig::from_file)
            .transpose()?;
        Self::merge(file, cli.api_base_url.clone(), cli.verbose, cli.json_logs)
    }
}

impl ConfigProvider for Settings {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("api_base_url", &self.api_base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file_or_flags() {
        let settings = Settings::merge(None, None, false, false).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_flag_overrides_file() {
        let file = TomlConfig::from_toml_str(
            "[api]\nbase_url = \"http://from-file:1\"\n[logging]\nlevel = \"warn\"\n",
        )
        .unwrap();

        let settings =
            Settings::merge(Some(file.clone()), Some("http://from-flag:2".into()), false, false)
                .unwrap();
        assert_eq!(settings.api_base_url, "http://from-flag:2");
        assert_eq!(settings.log_level, "warn");

        let settings = Settings::merge(Some(file), None, true, false).unwrap();
        assert_eq!(settings.api_base_url, "http://from-file:1");
        assert_eq!(settings.log_level, "debug");
    }

    #[test]
    fn test_invalid_flag_url_is_rejected() {
        assert!(Settings::merge(None, Some("localhost".into()), false, false).is_err());
    }
}
