//! Radix-tree request router.
//!
//! One [`matchit`] tree per HTTP method, fixed at startup. Lookup is
//! O(path-length); matched parameters are percent-decoded before the
//! handler sees them.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

use http::Method;
use percent_encoding::percent_decode_str;

use crate::handler::{BoxedHandler, Handler};

/// An immutable route table mapping (method, path pattern) to a handler.
///
/// Path parameters use `{name}` syntax; handlers read them back with
/// [`Request::param`](crate::Request::param). Registration methods take
/// and return `self`, so tables are built in one chained expression:
///
/// ```rust
/// # use api_demo::{Json, Request, Router};
/// # async fn hello(_: Request) -> Json<&'static str> { Json("hi") }
/// # async fn detail(_: Request) -> Json<&'static str> { Json("hi") }
/// let table = Router::new()
///     .get("/demo/hello", hello)
///     .get("/demo/user/{id}", detail);
/// ```
pub struct Router {
    routes: HashMap<Method, matchit::Router<BoxedHandler>>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /// Register a `GET` route.
    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.route(Method::GET, path, handler)
    }

    /// Register a `POST` route.
    pub fn post(self, path: &str, handler: impl Handler) -> Self {
        self.route(Method::POST, path, handler)
    }

    /// Register a handler for an arbitrary method + path pair.
    ///
    /// # Panics
    ///
    /// Panics on a malformed or conflicting pattern. Route tables are
    /// static program text, so this surfaces at startup, never later.
    pub fn route(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub(crate) fn lookup(
        &self,
        method: &Method,
        path: &str,
    ) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched
            .params
            .iter()
            .map(|(k, v)| (k.to_owned(), decode_segment(v)))
            .collect();
        Some((handler, params))
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

/// Percent-decodes one matched path segment.
///
/// Falls back to the raw segment when the decoded bytes are not UTF-8.
fn decode_segment(raw: &str) -> String {
    percent_decode_str(raw)
        .decode_utf8()
        .map(Cow::into_owned)
        .unwrap_or_else(|_| raw.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Request;
    use crate::response::{Json, Response};

    async fn noop(_req: Request) -> Json<&'static str> {
        Json("ok")
    }

    fn table() -> Router {
        Router::new()
            .get("/demo/hello", noop)
            .post("/demo/user", noop)
            .get("/demo/user/{id}", noop)
    }

    #[test]
    fn matches_registered_routes() {
        let table = table();
        assert!(table.lookup(&Method::GET, "/demo/hello").is_some());
        assert!(table.lookup(&Method::POST, "/demo/user").is_some());
    }

    #[test]
    fn rejects_unknown_path_and_method() {
        let table = table();
        assert!(table.lookup(&Method::GET, "/demo/nope").is_none());
        assert!(table.lookup(&Method::DELETE, "/demo/hello").is_none());
        // method and path must both line up
        assert!(table.lookup(&Method::POST, "/demo/hello").is_none());
    }

    #[test]
    fn extracts_and_decodes_params() {
        let table = table();
        let (_, params) = table.lookup(&Method::GET, "/demo/user/42").unwrap();
        assert_eq!(params["id"], "42");

        let (_, params) = table.lookup(&Method::GET, "/demo/user/a%2Fb").unwrap();
        assert_eq!(params["id"], "a/b");

        let (_, params) = table.lookup(&Method::GET, "/demo/user/caf%C3%A9").unwrap();
        assert_eq!(params["id"], "café");
    }

    #[tokio::test]
    async fn handlers_survive_lookup() {
        let table = table();
        let (handler, params) = table.lookup(&Method::GET, "/demo/user/7").unwrap();
        let req = Request::new(
            Method::GET,
            "/demo/user/7".parse().unwrap(),
            http::HeaderMap::new(),
            bytes::Bytes::new(),
            params,
        );
        let resp: Response = handler.call(req).await;
        assert_eq!(resp.status, http::StatusCode::OK);
    }
}
