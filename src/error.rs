// SPDX-License-Identifier: PMPL-1.0-or-later
//! Error types for the GraphQL bundle

use std::path::PathBuf;

use thiserror::Error;

/// Bundle error types
#[derive(Debug, Error)]
pub enum BundleError {
    #[error(
        "Cannot type-hint on an HTTP request in your query/mutation/field. \
         The execution context must implement RequestContext."
    )]
    MissingRequestContext,

    #[error("Failed to write schema to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid schema SDL: {0}")]
    Sdl(#[from] graphql_parser::schema::ParseError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, BundleError>;
