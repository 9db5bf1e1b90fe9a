//! # api-demo
//!
//! Two HTTP JSON routers running side by side in one process.
//!
//! The endpoints are deliberately trivial. The point is that both route
//! tables are built against the same minimal routing core: a hyper 1.x
//! accept loop, a [`matchit`] radix tree per method, and plain
//! `async fn` handlers that receive a [`Request`] and return anything
//! implementing [`IntoResponse`].
//!
//! A handler gets exactly three capabilities from [`Request`]:
//!
//! - `req.param("id")`: a named, percent-decoded path parameter
//! - `req.json::<T>()`: the body, deserialized via serde
//! - return a [`Response`] (or [`Json`]): status + JSON body out
//!
//! ## Layout
//!
//! - [`gin`]: the `/gin/*` route table, served on port 8080
//! - [`echo`]: the `/echo/*` route table, served on port 8081
//! - [`Server`] / [`serve_all`]: listener loop and the supervisor that
//!   runs both listeners and reports whichever terminates first
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use api_demo::{echo, gin, serve_all, Server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), api_demo::Error> {
//!     let a = Server::bind("0.0.0.0:8080").await?;
//!     let b = Server::bind("0.0.0.0:8081").await?;
//!     serve_all(vec![(a, gin::router()), (b, echo::router())]).await
//! }
//! ```

mod error;
mod handler;
mod request;
mod response;
mod router;
mod server;
mod user;

pub mod echo;
pub mod gin;

pub use error::Error;
pub use handler::Handler;
pub use request::Request;
pub use response::{IntoResponse, Json, Response};
pub use router::Router;
pub use server::{Server, serve_all};
pub use user::User;
