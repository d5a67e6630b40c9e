// SPDX-License-Identifier: PMPL-1.0-or-later
//! Resolver parameter giving fields access to the current HTTP request

use std::sync::Arc;

use async_graphql::Context;

use crate::{
    context::{ExecutionContext, HttpRequest, SharedContext},
    error::{BundleError, Result},
};

/// Resolves the HTTP request out of a field's execution context
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestParameter;

impl RequestParameter {
    /// Returns the request held by the context, never a copy of it.
    pub fn resolve<'a>(&self, context: Option<&'a dyn ExecutionContext>) -> Result<&'a Arc<HttpRequest>> {
        context
            .and_then(|ctx| ctx.request_context())
            .map(|provider| provider.request())
            .ok_or(BundleError::MissingRequestContext)
    }
}

/// Request access for async-graphql resolvers
///
/// ```ignore
/// async fn user_agent(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<String>> {
///     let request = ctx.http_request()?;
///     Ok(request
///         .headers()
///         .get(http::header::USER_AGENT)
///         .and_then(|v| v.to_str().ok())
///         .map(str::to_owned))
/// }
/// ```
pub trait ContextRequestExt {
    fn http_request(&self) -> Result<&Arc<HttpRequest>>;
}

impl ContextRequestExt for Context<'_> {
    fn http_request(&self) -> Result<&Arc<HttpRequest>> {
        let context = self.data_opt::<SharedContext>().map(|ctx| ctx.as_ref());
        RequestParameter.resolve(context)
    }
}
