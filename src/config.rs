// SPDX-License-Identifier: PMPL-1.0-or-later
//! Bundle configuration.
//!
//! Values come from an optional configuration file, overridden by
//! environment variables prefixed with `GRAPHQL_BUNDLE_`. Nested keys are
//! separated by a double underscore, e.g. `GRAPHQL_BUNDLE_SERVER__BIND_ADDR`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{error::Result, sdl::PrintOptions};

const ENV_PREFIX: &str = "GRAPHQL_BUNDLE";

/// Configuration for the GraphQL bundle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BundleConfig {
    /// HTTP wiring
    #[serde(default)]
    pub server: ServerConfig,

    /// Schema dump command
    #[serde(default)]
    pub dump: DumpConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server bind address (default: 0.0.0.0:8080)
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// GraphQL endpoint path (default: /graphql)
    #[serde(default = "default_graphql_path")]
    pub graphql_path: String,

    /// Serve the GraphiQL playground (default: true)
    #[serde(default = "default_true")]
    pub graphiql: bool,

    /// GraphiQL playground path (default: /graphiql)
    #[serde(default = "default_graphiql_path")]
    pub graphiql_path: String,
}

/// Schema dump configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DumpConfig {
    /// Drop the subscription root from dumped schemas
    /// (default: enabled with the `legacy-subscription-shim` feature)
    #[serde(default = "default_hide_subscription")]
    pub hide_subscription: bool,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_graphql_path() -> String {
    "/graphql".to_string()
}

fn default_graphiql_path() -> String {
    "/graphiql".to_string()
}

fn default_true() -> bool {
    true
}

fn default_hide_subscription() -> bool {
    PrintOptions::default().hide_subscription
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            graphql_path: default_graphql_path(),
            graphiql: default_true(),
            graphiql_path: default_graphiql_path(),
        }
    }
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            hide_subscription: default_hide_subscription(),
        }
    }
}

impl BundleConfig {
    /// Load configuration from an optional file and the environment.
    ///
    /// A missing file is not an error; a malformed one is.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_prefix(path, ENV_PREFIX)
    }

    fn load_with_prefix(path: Option<&Path>, prefix: &str) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

impl DumpConfig {
    pub fn print_options(&self) -> PrintOptions {
        PrintOptions {
            hide_subscription: self.hide_subscription,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BundleConfig::default();
        assert_eq!(config.server.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.server.graphql_path, "/graphql");
        assert!(config.server.graphiql);
        assert_eq!(config.server.graphiql_path, "/graphiql");
        assert_eq!(config.dump.print_options(), PrintOptions::default());
    }

    #[test]
    fn test_load_from_file_fills_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bundle.toml");
        std::fs::write(
            &path,
            "[server]\nbind_addr = \"127.0.0.1:9000\"\ngraphiql = false\n\n[dump]\nhide_subscription = true\n",
        )
        .unwrap();

        let config = BundleConfig::load(Some(path.as_path())).unwrap();

        assert_eq!(config.server.bind_addr, "127.0.0.1:9000");
        assert!(!config.server.graphiql);
        assert_eq!(config.server.graphql_path, "/graphql");
        assert!(config.dump.print_options().hide_subscription);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = BundleConfig::load(Some(dir.path().join("absent.toml").as_path())).unwrap();
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bundle.toml");
        std::fs::write(&path, "[server\nbind_addr = ").unwrap();

        let err = BundleConfig::load(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, crate::error::BundleError::Config(_)));
    }

    #[test]
    fn test_env_sets_nested_keys() {
        std::env::set_var("GRAPHQL_BUNDLE_NESTED_TEST_SERVER__BIND_ADDR", "127.0.0.1:4444");
        std::env::set_var("GRAPHQL_BUNDLE_NESTED_TEST_DUMP__HIDE_SUBSCRIPTION", "true");

        let config = BundleConfig::load_with_prefix(None, "GRAPHQL_BUNDLE_NESTED_TEST").unwrap();

        assert_eq!(config.server.bind_addr, "127.0.0.1:4444");
        assert_eq!(config.server.graphql_path, "/graphql");
        assert!(config.dump.hide_subscription);
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bundle.toml");
        std::fs::write(&path, "[server]\nbind_addr = \"127.0.0.1:9000\"\ngraphiql = false\n").unwrap();
        std::env::set_var("GRAPHQL_BUNDLE_OVERRIDE_TEST_SERVER__BIND_ADDR", "127.0.0.1:5555");

        let config =
            BundleConfig::load_with_prefix(Some(path.as_path()), "GRAPHQL_BUNDLE_OVERRIDE_TEST").unwrap();

        assert_eq!(config.server.bind_addr, "127.0.0.1:5555");
        assert!(!config.server.graphiql);
    }
}
