pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_socket_addr, Validate};
use serde::{Deserialize, Serialize};
use toml_config::TomlConfig;

pub const DEFAULT_BIND: &str = "127.0.0.1:8501";
pub const DEFAULT_MODEL_PATH: &str = "models/model.json";

/// 合併命令列與 TOML 檔後的最終設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub model_path: String,
    pub bind: String,
    pub verbose: bool,
    pub log_level: Option<String>,
    pub json_logs: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: DEFAULT_MODEL_PATH.to_string(),
            bind: DEFAULT_BIND.to_string(),
            verbose: false,
            log_level: None,
            json_logs: false,
        }
    }
}

impl AppConfig {
    /// 命令列的值優先於檔案中的值
    pub fn merge(
        file: Option<&TomlConfig>,
        model_override: Option<&str>,
        bind_override: Option<&str>,
        verbose: bool,
    ) -> Self {
        let defaults = Self::default();

        Self {
            model_path: model_override
                .or_else(|| file.and_then(TomlConfig::model_path))
                .map(str::to_string)
                .unwrap_or(defaults.model_path),
            bind: bind_override
                .or_else(|| file.and_then(TomlConfig::bind))
                .map(str::to_string)
                .unwrap_or(defaults.bind),
            verbose,
            log_level: file.and_then(TomlConfig::log_level).map(str::to_string),
            json_logs: file.map(TomlConfig::json_logs).unwrap_or(false),
        }
    }
}

impl ConfigProvider for AppConfig {
    fn model_path(&self) -> &str {
        &self.model_path
    }

    fn bind_addr(&self) -> &str {
        &self.bind
    }

    fn verbose(&self) -> bool {
        self.verbose
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_path("model_path", &self.model_path)?;
        validate_socket_addr("bind", &self.bind)?;
        Ok(())
    }
}

#[cfg(feature = "cli")]
pub mod cli {
    use clap::{Parser, Subcommand};

    #[derive(Debug, Clone, Parser)]
    #[command(name = "wine-quality")]
    #[command(about = "Wine Quality Prediction App")]
    pub struct CliConfig {
        /// Path to TOML configuration file
        #[arg(short, long, global = true)]
        pub config: Option<String>,

        /// Path to the model artifact (defaults to models/model.json)
        #[arg(short, long, global = true)]
        pub model: Option<String>,

        /// Enable verbose output
        #[arg(short, long, global = true)]
        pub verbose: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Serve the prediction form over HTTP
        Serve {
            /// Address to listen on (defaults to 127.0.0.1:8501)
            #[arg(short, long)]
            bind: Option<String>,
        },
        /// Predict every row of a CSV file of wine samples
        Predict {
            /// CSV file whose headers name the eleven features
            #[arg(short, long)]
            input: String,

            /// Field delimiter, e.g. ';' for the classic dataset files
            #[arg(short, long, default_value = ",")]
            delimiter: char,
        },
        /// Show what the model artifact declares
        Inspect,
    }

    impl CliConfig {
        pub fn bind_override(&self) -> Option<&str> {
            match &self.command {
                Command::Serve { bind } => bind.as_deref(),
                _ => None,
            }
        }
    }
}

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let config = AppConfig::merge(None, None, None, false);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.model_path(), "models/model.json");
        assert_eq!(config.bind_addr(), "127.0.0.1:8501");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_command_line_overrides_file() {
        let file = TomlConfig::from_toml_str(
            "[server]\nbind = \"0.0.0.0:9000\"\n[model]\npath = \"file.json\"\n[logging]\njson = true\n",
        )
        .unwrap();

        let from_file = AppConfig::merge(Some(&file), None, None, false);
        assert_eq!(from_file.model_path, "file.json");
        assert_eq!(from_file.bind, "0.0.0.0:9000");
        assert!(from_file.json_logs);

        let overridden = AppConfig::merge(Some(&file), Some("cli.json"), Some("127.0.0.1:1"), true);
        assert_eq!(overridden.model_path, "cli.json");
        assert_eq!(overridden.bind, "127.0.0.1:1");
        assert!(overridden.verbose());
    }

    #[test]
    fn test_invalid_bind_fails_validation() {
        let config = AppConfig::merge(None, None, Some("nowhere"), false);
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_parsing() {
        use clap::Parser;

        let cli = CliConfig::parse_from([
            "wine-quality",
            "serve",
            "--bind",
            "0.0.0.0:8000",
            "--model",
            "rf.json",
        ]);
        assert_eq!(cli.model.as_deref(), Some("rf.json"));
        assert_eq!(cli.bind_override(), Some("0.0.0.0:8000"));

        let cli = CliConfig::parse_from(["wine-quality", "predict", "-i", "wines.csv", "-d", ";"]);
        match cli.command {
            Command::Predict { input, delimiter } => {
                assert_eq!(input, "wines.csv");
                assert_eq!(delimiter, ';');
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
