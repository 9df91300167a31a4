//! Graph configuration types
//!
//! This module defines the few knobs the library exposes. Anything about where
//! the output goes or how logging is set up belongs to the application layer.

use crate::types::{GraphError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for loading and rendering a job graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// File extension of job files, without the dot (default: "conf")
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Identifier used after `digraph` in both documents (default: "Upstart")
    #[serde(default = "default_graph_name")]
    pub graph_name: String,

    /// Whether the start graph declares the `startup` node
    #[serde(default = "default_true")]
    pub startup_node: bool,

    /// Parse job files on the rayon thread pool
    #[serde(default)]
    pub parallel: bool,
}

fn default_extension() -> String {
    "conf".to_string()
}

fn default_graph_name() -> String {
    "Upstart".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            graph_name: default_graph_name(),
            startup_node: true,
            parallel: false,
        }
    }
}

impl GraphConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the job file extension
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Builder method: set the digraph identifier
    pub fn with_graph_name(mut self, name: impl Into<String>) -> Self {
        self.graph_name = name.into();
        self
    }

    /// Builder method: enable or disable the `startup` node
    pub fn with_startup_node(mut self, enabled: bool) -> Self {
        self.startup_node = enabled;
        self
    }

    /// Builder method: enable parallel parsing
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Check that the values can be rendered without escaping
    pub fn validate(&self) -> Result<()> {
        let extension = self.extension.trim_start_matches('.');
        if extension.is_empty() {
            return Err(GraphError::InvalidConfig(
                "job file extension must not be empty".to_string(),
            ));
        }

        let mut chars = self.graph_name.chars();
        let valid_name = match chars.next() {
            Some(first) => {
                (first.is_ascii_alphabetic() || first == '_')
                    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            None => false,
        };
        if !valid_name {
            return Err(GraphError::InvalidConfig(format!(
                "graph name {:?} is not a DOT identifier",
                self.graph_name
            )));
        }

        Ok(())
    }

    /// Extension with any leading dot removed
    pub fn normalized_extension(&self) -> &str {
        self.extension.trim_start_matches('.')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_config_builder() {
        let config = GraphConfig::new()
            .with_extension("job")
            .with_graph_name("Init")
            .with_startup_node(false)
            .with_parallel(true);

        assert_eq!(config.extension, "job");
        assert_eq!(config.graph_name, "Init");
        assert!(!config.startup_node);
        assert!(config.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let config = GraphConfig::new();
        assert_eq!(config.normalized_extension(), "conf");
        assert_eq!(config.graph_name, "Upstart");
        assert!(config.startup_node);
        assert!(!config.parallel);
    }

    #[test]
    fn test_validation() {
        assert!(GraphConfig::new().with_extension(".conf").validate().is_ok());
        assert_eq!(GraphConfig::new().with_extension(".conf").normalized_extension(), "conf");
        assert!(GraphConfig::new().with_extension("").validate().is_err());
        assert!(GraphConfig::new().with_graph_name("").validate().is_err());
        assert!(GraphConfig::new().with_graph_name("my graph").validate().is_err());
        assert!(GraphConfig::new().with_graph_name("9lives").validate().is_err());
    }
}
