// SPDX-License-Identifier: PMPL-1.0-or-later
//! async-graphql integration for axum applications
//!
//! Features:
//! - `dump-schema` console command printing deterministic SDL
//! - Per-request execution context exposing the HTTP request to resolvers
//! - GraphQL endpoint, GraphiQL playground and health routes
//! - Layered configuration (file + `GRAPHQL_BUNDLE_*` environment)

pub mod command;
pub mod config;
pub mod context;
pub mod error;
pub mod request;
pub mod sdl;
pub mod server;

pub use command::{run_console, run_console_from, BundleCommand, Console, DumpOutcome, DumpSchemaCommand};
pub use config::BundleConfig;
pub use context::{ExecutionContext, HttpRequest, HttpRequestContext, RequestContext, SharedContext};
pub use error::{BundleError, Result};
pub use request::{ContextRequestExt, RequestParameter};
pub use sdl::{print_schema, PrintOptions, RootTypes, SchemaSource};
