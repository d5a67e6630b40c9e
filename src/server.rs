// SPDX-License-Identifier: PMPL-1.0-or-later
//! HTTP wiring: GraphQL endpoint, GraphiQL playground and health check
//!
//! Every GraphQL request gets an [`HttpRequestContext`] holding the request
//! head, so resolvers can reach it through
//! [`crate::request::ContextRequestExt`].

use async_graphql::{http::GraphiQLSource, Executor};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    http::request::Parts,
    response::Html,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::{config::ServerConfig, context::HttpRequestContext, error::Result};

/// GraphQL handler
async fn graphql_handler<E: Executor>(
    State(schema): State<E>,
    parts: Parts,
    req: GraphQLRequest,
) -> GraphQLResponse {
    debug!(method = %parts.method, uri = %parts.uri, "Executing GraphQL request");

    let context = HttpRequestContext::new(http::Request::from_parts(parts, ())).shared();
    schema.execute(req.into_inner().data(context)).await.into()
}

/// Health check handler
async fn health() -> &'static str {
    "OK"
}

/// Build the router serving `schema`
pub fn router<E: Executor>(schema: E, config: &ServerConfig) -> Router {
    let mut app = Router::new()
        .route(&config.graphql_path, post(graphql_handler::<E>))
        .route("/health", get(health));

    if config.graphiql {
        let page = GraphiQLSource::build().endpoint(&config.graphql_path).finish();
        app = app.route(&config.graphiql_path, get(move || async move { Html(page) }));
    }

    app.layer(TraceLayer::new_for_http()).with_state(schema)
}

/// Bind the configured address; host names are resolved
pub async fn bind(config: &ServerConfig) -> Result<TcpListener> {
    Ok(TcpListener::bind(config.bind_addr.as_str()).await?)
}

/// Bind `config.bind_addr` and serve until the listener fails
pub async fn serve<E: Executor>(schema: E, config: &ServerConfig) -> Result<()> {
    let listener = bind(config).await?;
    let addr = listener.local_addr()?;
    info!(addr = %addr, path = %config.graphql_path, "GraphQL server listening");
    if config.graphiql {
        info!("GraphiQL playground: http://{}{}", addr, config.graphiql_path);
    }

    axum::serve(listener, router(schema, config)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_resolves_host_names() {
        let config = ServerConfig {
            bind_addr: "localhost:0".to_string(),
            ..Default::default()
        };

        let listener = bind(&config).await.unwrap();
        assert!(listener.local_addr().unwrap().ip().is_loopback());
    }

    #[tokio::test]
    async fn test_bind_rejects_malformed_address() {
        let config = ServerConfig {
            bind_addr: "not an address".to_string(),
            ..Default::default()
        };

        let err = bind(&config).await.unwrap_err();
        assert!(matches!(err, crate::error::BundleError::Io(_)));
    }
}
