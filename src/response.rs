//! Outgoing HTTP response and the [`IntoResponse`] conversion trait.
//!
//! Handlers build a [`Response`] (or return a [`Json`] wrapper) and are
//! done. Conversion to hyper's wire types happens in the server loop.

use bytes::Bytes;
use http::StatusCode;
use http_body_util::Full;
use serde::Serialize;
use tracing::error;

/// An outgoing HTTP response.
///
/// # Shortcuts (200 OK)
///
/// ```rust
/// use api_demo::Response;
/// use serde_json::json;
///
/// Response::json(&json!({ "message": "hi" }));
/// ```
///
/// # Builder (custom status or extra headers)
///
/// ```rust
/// use api_demo::Response;
/// use http::StatusCode;
/// use serde_json::json;
///
/// Response::builder()
///     .status(StatusCode::BAD_REQUEST)
///     .json(&json!({ "error": "malformed body" }));
/// ```
pub struct Response {
    pub(crate) status: StatusCode,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Bytes,
}

impl Response {
    /// `200 OK` with a JSON body serialized from `value`.
    ///
    /// A value that fails to serialize yields a bodyless 500; handlers
    /// never observe the failure.
    pub fn json<T: Serialize>(value: &T) -> Self {
        Self::builder().json(value)
    }

    /// Response with the given status and no body.
    pub fn status(code: StatusCode) -> Self {
        Self { status: code, headers: Vec::new(), body: Bytes::new() }
    }

    /// Builder for responses needing a non-200 status or extra headers.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder { headers: Vec::new(), status: StatusCode::OK }
    }

    /// Converts into the hyper-facing response type.
    pub(crate) fn into_http(self) -> http::Response<Full<Bytes>> {
        let mut builder = http::Response::builder().status(self.status);
        for (name, value) in &self.headers {
            builder = builder.header(name, value);
        }
        match builder.body(Full::new(self.body)) {
            Ok(resp) => resp,
            Err(e) => {
                // Only reachable through an invalid user-supplied header.
                error!("dropping malformed response: {e}");
                let mut resp = http::Response::new(Full::new(Bytes::new()));
                *resp.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
                resp
            }
        }
    }
}

/// Fluent builder for [`Response`], terminated by a body method.
pub struct ResponseBuilder {
    headers: Vec<(String, String)>,
    status: StatusCode,
}

impl ResponseBuilder {
    pub fn status(mut self, code: StatusCode) -> Self {
        self.status = code;
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    /// Terminate with a JSON body serialized from `value`.
    pub fn json<T: Serialize>(self, value: &T) -> Response {
        match serde_json::to_vec(value) {
            Ok(bytes) => {
                let mut headers =
                    vec![("content-type".to_owned(), "application/json".to_owned())];
                headers.extend(self.headers);
                Response { status: self.status, headers, body: Bytes::from(bytes) }
            }
            Err(e) => {
                error!("response serialization failed: {e}");
                Response::status(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }

    /// Terminate with no body.
    pub fn no_body(self) -> Response {
        Response { status: self.status, headers: self.headers, body: Bytes::new() }
    }
}

/// Conversion into an HTTP [`Response`].
///
/// Anything a handler returns goes through this trait once, right after
/// the handler future resolves.
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response {
        self
    }
}

/// Return a status directly from a handler: `return StatusCode::NOT_FOUND`.
impl IntoResponse for StatusCode {
    fn into_response(self) -> Response {
        Response::status(self)
    }
}

/// Typed JSON response: `200 OK` with the wrapped value as the body.
pub struct Json<T: Serialize>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        Response::json(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn json_sets_status_and_content_type() {
        let resp = Response::json(&json!({ "ok": true }));
        assert_eq!(resp.status, StatusCode::OK);
        assert!(resp.headers.iter().any(|(n, v)| n == "content-type" && v == "application/json"));
        let body: Value = serde_json::from_slice(&resp.body).unwrap();
        assert_eq!(body, json!({ "ok": true }));
    }

    #[test]
    fn builder_overrides_status() {
        let resp = Response::builder()
            .status(StatusCode::BAD_REQUEST)
            .json(&json!({ "error": "nope" }));
        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn status_code_converts() {
        let resp = StatusCode::NOT_FOUND.into_response();
        assert_eq!(resp.status, StatusCode::NOT_FOUND);
        assert!(resp.body.is_empty());
    }

    #[test]
    fn json_wrapper_converts() {
        let resp = Json(json!({ "id": "42" })).into_response();
        assert_eq!(resp.status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&resp.body).unwrap();
        assert_eq!(body["id"], "42");
    }
}
