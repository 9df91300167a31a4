//! Configuration loading and parsing

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use unit_graph::GraphConfig;

/// Default job directory
pub const DEFAULT_INIT_DIR: &str = "/etc/init";

/// Application configuration (loaded from a TOML file)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub parsing: ParsingConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InputConfig {
    /// Job directory (overridden by the positional argument)
    pub dir: Option<PathBuf>,
    /// Job file extension
    pub extension: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    pub graph_name: Option<String>,
    pub startup_node: Option<bool>,
    /// Output file (overridden by --output; default: stdout)
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ParsingConfig {
    #[serde(default)]
    pub parallel: bool,
}

impl AppConfig {
    /// Library configuration with the file's values applied over the defaults
    pub fn graph_config(&self) -> GraphConfig {
        let mut config = GraphConfig::new().with_parallel(self.parsing.parallel);
        if let Some(extension) = &self.input.extension {
            config = config.with_extension(extension.clone());
        }
        if let Some(name) = &self.output.graph_name {
            config = config.with_graph_name(name.clone());
        }
        if let Some(startup) = self.output.startup_node {
            config = config.with_startup_node(startup);
        }
        config
    }

    /// Job directory: command line first, then the file, then `/etc/init`
    pub fn job_dir(&self, from_args: Option<&Path>) -> PathBuf {
        from_args
            .map(Path::to_path_buf)
            .or_else(|| self.input.dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INIT_DIR))
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    config
        .graph_config()
        .validate()
        .with_context(|| format!("Invalid config file: {:?}", path))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let toml_content = r#"
            [input]
            dir = "/srv/init"
            extension = "job"

            [output]
            graph_name = "Jobs"
            startup_node = false

            [parsing]
            parallel = true
        "#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        let graph = config.graph_config();
        assert_eq!(graph.extension, "job");
        assert_eq!(graph.graph_name, "Jobs");
        assert!(!graph.startup_node);
        assert!(graph.parallel);
        assert_eq!(config.job_dir(None), PathBuf::from("/srv/init"));
        assert_eq!(config.job_dir(Some(Path::new("jobs"))), PathBuf::from("jobs"));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.graph_config(), GraphConfig::default());
        assert_eq!(config.job_dir(None), PathBuf::from(DEFAULT_INIT_DIR));
        assert!(config.output.file.is_none());
    }
}
