//! Path pattern matching.
//!
//! # Responsibilities
//! - Register path patterns with named placeholders per method table
//! - Resolve a concrete path to the best pattern and extract its parameters
//!
//! # Design Decisions
//! - Matching is delegated to `matchit` (radix tree); this module only
//!   translates pattern syntax and carries handlers
//! - `:name` and `*name` segments are accepted alongside `{name}` and
//!   `{*name}`
//! - Conflicting or malformed patterns are rejected at registration time by
//!   the engine, never at request time
//! - Static segments beat placeholders, placeholders beat catch-alls; that
//!   ranking is the engine's and is not altered here
//! - One trailing `/` on the request path is ignored, and named placeholder
//!   values are percent-decoded; catch-all values are passed through raw

use std::fmt;
use std::sync::Arc;

use percent_encoding::percent_decode_str;
use thiserror::Error;

use crate::routing::handler::{Handler, PathParams};

/// Pattern rejected by the matching engine.
#[derive(Debug, Error)]
#[error("invalid route pattern `{pattern}`: {source}")]
pub struct RouteError {
    pub pattern: String,
    #[source]
    pub source: matchit::InsertError,
}

struct Route {
    pattern: String,
    handler: Arc<dyn Handler>,
    /// Name of the trailing catch-all placeholder, if any.
    catch_all: Option<String>,
}

/// The result of resolving a path.
pub struct Matched<'a> {
    /// Pattern as it was registered.
    pub pattern: &'a str,
    pub handler: &'a Arc<dyn Handler>,
    pub params: PathParams,
}

/// One method's set of (pattern, handler) pairs.
pub struct PathMatcher {
    router: matchit::Router<Route>,
    patterns: Vec<String>,
}

impl PathMatcher {
    pub fn new() -> Self {
        Self {
            router: matchit::Router::new(),
            patterns: Vec::new(),
        }
    }

    /// Register `pattern`. Fails when the engine rejects the pattern or it
    /// conflicts with one already registered.
    pub fn add(&mut self, pattern: &str, handler: Arc<dyn Handler>) -> Result<(), RouteError> {
        let engine = engine_pattern(pattern);
        let route = Route {
            pattern: pattern.to_string(),
            handler,
            catch_all: catch_all_name(&engine),
        };

        self.router
            .insert(engine, route)
            .map_err(|source| RouteError {
                pattern: pattern.to_string(),
                source,
            })?;

        self.patterns.push(pattern.to_string());
        Ok(())
    }

    /// Resolve `path` to the engine's best match.
    pub fn recognize(&self, path: &str) -> Option<Matched<'_>> {
        let trimmed = match path.strip_suffix('/') {
            Some(trimmed) if !trimmed.is_empty() => trimmed,
            _ => path,
        };
        let matched = self
            .router
            .at(trimmed)
            .or_else(|_| self.router.at(path))
            .ok()?;

        let catch_all = matched.value.catch_all.as_deref();
        let params = matched
            .params
            .iter()
            .map(|(name, value)| {
                let value = if Some(name) == catch_all {
                    value.to_string()
                } else {
                    percent_decode_str(value).decode_utf8_lossy().into_owned()
                };
                (name.to_string(), value)
            })
            .collect();

        Some(Matched {
            pattern: &matched.value.pattern,
            handler: &matched.value.handler,
            params,
        })
    }

    /// Registered patterns in registration order.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for PathMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PathMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathMatcher")
            .field("patterns", &self.patterns)
            .finish()
    }
}

fn catch_all_name(engine_pattern: &str) -> Option<String> {
    engine_pattern
        .rsplit('/')
        .next()
        .and_then(|segment| segment.strip_prefix("{*"))
        .and_then(|rest| rest.strip_suffix('}'))
        .map(str::to_string)
}

/// Translate `:name` / `*name` segments into the engine's `{name}` /
/// `{*name}` syntax. Other segments pass through untouched.
pub fn engine_pattern(pattern: &str) -> String {
    pattern
        .split('/')
        .map(|segment| {
            if let Some(name) = segment.strip_prefix(':').filter(|n| !n.is_empty()) {
                format!("{{{name}}}")
            } else if let Some(name) = segment.strip_prefix('*').filter(|n| !n.is_empty()) {
                format!("{{*{name}}}")
            } else {
                segment.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}
