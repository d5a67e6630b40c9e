// SPDX-License-Identifier: PMPL-1.0-or-later
//! Execution context carried through GraphQL field resolution
//!
//! The server attaches one [`SharedContext`] to every GraphQL request as
//! request data. Resolvers that need the HTTP request go through
//! [`crate::request::RequestParameter`], which only succeeds when the context
//! exposes the [`RequestContext`] capability.

use std::sync::Arc;

/// Head of the incoming HTTP request (method, URI, version, headers, extensions)
pub type HttpRequest = http::Request<()>;

/// Execution context as stored in the GraphQL request data
pub type SharedContext = Arc<dyn ExecutionContext>;

/// Capability: provides the HTTP request being served
pub trait RequestContext: Send + Sync {
    fn request(&self) -> &Arc<HttpRequest>;
}

/// Per-operation context passed through the resolution pipeline.
///
/// Capabilities are opt-in: an implementation that can hand out the current
/// HTTP request overrides [`ExecutionContext::request_context`].
pub trait ExecutionContext: Send + Sync + 'static {
    fn request_context(&self) -> Option<&dyn RequestContext> {
        None
    }
}

/// Default context built by the server for each GraphQL request
#[derive(Debug, Clone)]
pub struct HttpRequestContext {
    request: Arc<HttpRequest>,
}

impl HttpRequestContext {
    pub fn new(request: HttpRequest) -> Self {
        Self::from_shared(Arc::new(request))
    }

    pub fn from_shared(request: Arc<HttpRequest>) -> Self {
        Self { request }
    }

    /// Erase into the form stored in the GraphQL request data
    pub fn shared(self) -> SharedContext {
        Arc::new(self)
    }
}

impl RequestContext for HttpRequestContext {
    fn request(&self) -> &Arc<HttpRequest> {
        &self.request
    }
}

impl ExecutionContext for HttpRequestContext {
    fn request_context(&self) -> Option<&dyn RequestContext> {
        Some(self)
    }
}
