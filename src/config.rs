//! Layered configuration.
//!
//! Settings are assembled from three layers, later layers winning:
//! built-in defaults, a `formgen.toml` file in the working directory, and
//! `FORMGEN_*` environment variables. Environment variables use double
//! underscores to separate nested levels:
//!
//! - `FORMGEN_TEMPLATES_DIR=site/templates` sets `templates_dir`
//! - `FORMGEN_SERVER__BIND=0.0.0.0:8080` sets `server.bind`
//! - `FORMGEN_LOGGING__DEFAULT=debug` sets `logging.default`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "formgen.toml";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Template root scanned for `form-data.json` files.
    #[serde(default = "default_templates_dir")]
    pub templates_dir: PathBuf,

    /// Suffix appended to the stripped template name at render time.
    #[serde(default = "default_template_suffix")]
    pub template_suffix: String,

    /// Standalone server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    /// Address the standalone server binds to.
    #[serde(default = "default_bind")]
    pub bind: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Default level filter: error, warn, info, debug, or trace.
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-module overrides, e.g. `"formgen::index" = "debug"`.
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_templates_dir() -> PathBuf {
    PathBuf::from("templates")
}
fn default_template_suffix() -> String {
    ".html".to_string()
}
fn default_bind() -> String {
    "127.0.0.1:8111".to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            templates_dir: default_templates_dir(),
            template_suffix: default_template_suffix(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
        }
    }
}

impl Settings {
    /// Load settings from defaults, `formgen.toml`, and the environment.
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment(Path::new(CONFIG_FILE)).extract()
    }

    /// Load settings with an explicit configuration file path.
    pub fn load_from(config_file: &Path) -> Result<Self, figment::Error> {
        Self::figment(config_file).extract()
    }

    fn figment(config_file: &Path) -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed("FORMGEN_").split("__"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!(settings.templates_dir, PathBuf::from("templates"));
        assert_eq!(settings.template_suffix, ".html");
        assert_eq!(settings.server.bind, "127.0.0.1:8111");
        assert_eq!(settings.logging.default, "warn");
        assert!(settings.logging.modules.is_empty());
    }

    #[test]
    fn toml_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE);
        std::fs::write(
            &config_path,
            r#"
templates_dir = "site/templates"

[server]
bind = "0.0.0.0:9000"

[logging]
default = "info"

[logging.modules]
"formgen::index" = "debug"
"#,
        )
        .unwrap();

        let settings = Settings::load_from(&config_path).unwrap();
        assert_eq!(settings.templates_dir, PathBuf::from("site/templates"));
        assert_eq!(settings.server.bind, "0.0.0.0:9000");
        assert_eq!(settings.logging.default, "info");
        assert_eq!(
            settings.logging.modules.get("formgen::index").unwrap(),
            "debug"
        );
        // Unset keys keep their defaults
        assert_eq!(settings.template_suffix, ".html");
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(settings.templates_dir, PathBuf::from("templates"));
    }
}
