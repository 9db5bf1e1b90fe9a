//! Incoming HTTP request and the capabilities handlers get from it.

use std::collections::HashMap;

use bytes::Bytes;
use http::{HeaderMap, Method, Uri};
use serde::de::DeserializeOwned;

/// An incoming HTTP request with its body fully collected.
///
/// Handlers interact with a request through three capabilities:
/// [`param`](Request::param) for path parameters, [`json`](Request::json)
/// for the body, and the raw accessors for everything else.
pub struct Request {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
    params: HashMap<String, String>,
}

impl Request {
    pub(crate) fn new(
        method: Method,
        uri: Uri,
        headers: HeaderMap,
        body: Bytes,
        params: HashMap<String, String>,
    ) -> Self {
        Self { method, uri, headers, body, params }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        self.uri.path()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Single header lookup; `None` for absent or non-UTF-8 values.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The collected request body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Deserializes the body as JSON into `T`.
    ///
    /// The error carries serde_json's own description of what failed
    /// to parse; callers that surface it to clients do so verbatim.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Returns a named path parameter, percent-decoded.
    ///
    /// For a route `/users/{id}`, `req.param("id")` on `/users/42`
    /// returns `Some("42")`; on `/users/a%2Fb` it returns `Some("a/b")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn req(body: &str, params: &[(&str, &str)]) -> Request {
        Request::new(
            Method::POST,
            "/t".parse().unwrap(),
            HeaderMap::new(),
            Bytes::from(body.to_owned()),
            params.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        )
    }

    #[derive(Deserialize, PartialEq, Debug)]
    struct Payload {
        name: String,
    }

    #[test]
    fn json_decodes_body() {
        let r = req(r#"{"name":"ada"}"#, &[]);
        assert_eq!(r.json::<Payload>().unwrap(), Payload { name: "ada".into() });
    }

    #[test]
    fn json_error_is_descriptive() {
        let r = req("not json", &[]);
        let err = r.json::<Payload>().unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn param_lookup() {
        let r = req("", &[("id", "42")]);
        assert_eq!(r.param("id"), Some("42"));
        assert_eq!(r.param("missing"), None);
    }
}
