//! The echo-style route table: `/echo/*`, served on its own listener.
//!
//! Same contract as [`gin`](crate::gin) under a disjoint namespace;
//! the two tables share nothing but the routing core they are built on.

use http::StatusCode;
use serde_json::{Value, json};

use crate::request::Request;
use crate::response::{Json, Response};
use crate::router::Router;
use crate::user::User;

/// Builds the `/echo/*` route table.
pub fn router() -> Router {
    Router::new()
        .get("/echo/hello", hello)
        .post("/echo/user", create_user)
        .get("/echo/user/{id}", user_detail)
}

async fn hello(_req: Request) -> Json<Value> {
    Json(json!({ "message": "Hello from Echo!" }))
}

async fn create_user(req: Request) -> Response {
    match req.json::<User>() {
        Ok(user) => Response::json(&json!({ "message": "User created", "user": user })),
        Err(e) => Response::builder()
            .status(StatusCode::BAD_REQUEST)
            .json(&json!({ "error": e.to_string() })),
    }
}

async fn user_detail(req: Request) -> Json<Value> {
    let id = req.param("id").unwrap_or_default();
    Json(json!({ "message": "Get user detail", "id": id }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::Method;

    async fn call(method: Method, path: &str, body: &str) -> (StatusCode, Value) {
        let table = router();
        let (handler, params) = table.lookup(&method, path).expect("route must match");
        let req = Request::new(
            method,
            path.parse().unwrap(),
            http::HeaderMap::new(),
            Bytes::from(body.to_owned()),
            params,
        );
        let resp = handler.call(req).await;
        let value = if resp.body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&resp.body).unwrap()
        };
        (resp.status, value)
    }

    #[tokio::test]
    async fn hello_is_branded() {
        let (status, body) = call(Method::GET, "/echo/hello", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "Hello from Echo!" }));
    }

    #[tokio::test]
    async fn create_user_defaults_missing_fields() {
        let (status, body) = call(Method::POST, "/echo/user", r#"{"name":"Lin"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"], json!({ "name": "Lin", "email": "" }));
    }

    #[tokio::test]
    async fn create_user_rejects_shape_mismatch() {
        let (status, body) = call(Method::POST, "/echo/user", r#"{"name":7}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body["error"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn user_detail_decodes_escaped_id() {
        let (status, body) = call(Method::GET, "/echo/user/a%2Fb", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], "a/b");
    }
}
