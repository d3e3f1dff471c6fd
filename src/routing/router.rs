//! Route registration and dispatch.
//!
//! # Responsibilities
//! - Keep one path matcher per method string, plus the `ANY` fallback
//! - Answer `OPTIONS` directly when catch-all preflight is enabled
//! - Invoke the matched handler and normalize its outcome
//!
//! # Design Decisions
//! - Registration takes `&mut self`, dispatch takes `&self`: tables are
//!   complete before anything can read them, no locks needed
//! - Method strings are compared exactly; `ANY` is only consulted when the
//!   request's method has no table at all
//! - Every dispatch yields exactly one response, failures included

use std::collections::HashMap;
use std::sync::Arc;

use crate::http::request::ApiGatewayRequest;
use crate::http::response::GatewayResponse;
use crate::routing::handler::Handler;
use crate::routing::matcher::{PathMatcher, RouteError};

/// Method used when a route is registered without one.
pub const DEFAULT_METHOD: &str = "GET";

/// Pseudo-method whose table serves methods without their own table.
pub const ANY_METHOD: &str = "ANY";

const OPTIONS_METHOD: &str = "OPTIONS";

/// Owns the route tables and dispatches gateway requests against them.
#[derive(Debug, Default)]
pub struct Dispatcher {
    matchers: HashMap<String, PathMatcher>,
    catch_all_options: bool,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a `GET` route.
    pub fn route<H: Handler>(&mut self, path: &str, handler: H) -> Result<&mut Self, RouteError> {
        self.route_method(DEFAULT_METHOD, path, handler)
    }

    /// Register a route for `method`. [`ANY_METHOD`] registers a fallback.
    pub fn route_method<H: Handler>(
        &mut self,
        method: &str,
        path: &str,
        handler: H,
    ) -> Result<&mut Self, RouteError> {
        self.route_shared(method, path, Arc::new(handler))
    }

    /// Register an already shared handler, e.g. one serving several methods.
    pub fn route_shared(
        &mut self,
        method: &str,
        path: &str,
        handler: Arc<dyn Handler>,
    ) -> Result<&mut Self, RouteError> {
        self.matchers
            .entry(method.to_string())
            .or_default()
            .add(path, handler)?;

        tracing::debug!(method = %method, path = %path, "Route registered");
        Ok(self)
    }

    /// When enabled, every `OPTIONS` request gets a synthesized CORS
    /// response without consulting the route tables.
    pub fn set_catch_all_options(&mut self, enabled: bool) -> &mut Self {
        self.catch_all_options = enabled;
        self
    }

    pub fn catch_all_options(&self) -> bool {
        self.catch_all_options
    }

    /// Method strings that have a table, sorted.
    pub fn methods(&self) -> Vec<&str> {
        let mut methods: Vec<&str> = self.matchers.keys().map(String::as_str).collect();
        methods.sort_unstable();
        methods
    }

    /// The table for `method`, if one was created.
    pub fn matcher(&self, method: &str) -> Option<&PathMatcher> {
        self.matchers.get(method)
    }

    /// Bind a dispatch function to the live tables.
    pub fn build(&self) -> Dispatch<'_> {
        Dispatch { dispatcher: self }
    }

    /// Route `request` and produce its response.
    pub async fn dispatch(&self, request: ApiGatewayRequest) -> GatewayResponse {
        let method = request.http_method.as_str();
        let path = request.path.as_str();
        tracing::info!(method = %method, path = %path, "Handling request");

        if method == OPTIONS_METHOD && self.catch_all_options {
            return GatewayResponse::cors_preflight(&request);
        }

        let Some(matcher) = self
            .matchers
            .get(method)
            .or_else(|| self.matchers.get(ANY_METHOD))
        else {
            tracing::info!(method = %method, "No routes for request method exist");
            return GatewayResponse::not_found();
        };

        let Some(matched) = matcher.recognize(path) else {
            tracing::info!(method = %method, path = %path, "No route found");
            return GatewayResponse::not_found();
        };

        tracing::info!(
            method = %method,
            path = %path,
            route = %matched.pattern,
            params = ?matched.params,
            "Routing to handler"
        );

        let handler = Arc::clone(matched.handler);
        match handler.call(request, matched.params).await {
            Ok(response) => response.into(),
            Err(err) => {
                tracing::warn!(error = ?err, "Handler failed");
                err.into_response()
            }
        }
    }
}

/// Dispatch function bound to a [`Dispatcher`].
#[derive(Debug, Clone, Copy)]
pub struct Dispatch<'a> {
    dispatcher: &'a Dispatcher,
}

impl Dispatch<'_> {
    /// Route `request` and hand the response to `complete`. `complete` runs
    /// exactly once.
    pub async fn call<F>(&self, request: ApiGatewayRequest, complete: F)
    where
        F: FnOnce(GatewayResponse),
    {
        complete(self.dispatcher.dispatch(request).await);
    }

    /// Route `request` and return the response.
    pub async fn respond(&self, request: ApiGatewayRequest) -> GatewayResponse {
        self.dispatcher.dispatch(request).await
    }
}
