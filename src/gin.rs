//! The gin-style route table: `/gin/*`, served on its own listener.

use http::StatusCode;
use serde_json::{Value, json};

use crate::request::Request;
use crate::response::{Json, Response};
use crate::router::Router;
use crate::user::User;

/// Builds the `/gin/*` route table.
pub fn router() -> Router {
    Router::new()
        .get("/gin/hello", hello)
        .post("/gin/user", create_user)
        .get("/gin/user/{id}", user_detail)
}

async fn hello(_req: Request) -> Json<Value> {
    Json(json!({ "message": "Hello from Gin!" }))
}

async fn create_user(req: Request) -> Response {
    let user: User = match req.json() {
        Ok(user) => user,
        Err(e) => {
            return Response::builder()
                .status(StatusCode::BAD_REQUEST)
                .json(&json!({ "error": e.to_string() }));
        }
    };
    Response::json(&json!({ "message": "User created", "user": user }))
}

async fn user_detail(req: Request) -> Json<Value> {
    let id = req.param("id").unwrap_or_default();
    Json(json!({ "message": "Get user detail", "id": id }))
}
