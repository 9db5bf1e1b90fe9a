//! Process bootstrap: bind both route tables and supervise them.
//!
//! Ports are fixed by contract: the gin-style table on 8080, the
//! echo-style table on 8081. No flags, no environment, no config file.

use api_demo::{Error, Server, echo, gin, serve_all};
use tracing::error;

const GIN_ADDR: &str = "0.0.0.0:8080";
const ECHO_ADDR: &str = "0.0.0.0:8081";

#[tokio::main]
async fn main() -> std::process::ExitCode {
    tracing_subscriber::fmt::init();

    if let Err(e) = run().await {
        error!("fatal: {e}");
        return std::process::ExitCode::FAILURE;
    }
    std::process::ExitCode::SUCCESS
}

async fn run() -> Result<(), Error> {
    let gin_server = Server::bind(GIN_ADDR).await?;
    let echo_server = Server::bind(ECHO_ADDR).await?;

    serve_all(vec![
        (gin_server, gin::router()),
        (echo_server, echo::router()),
    ])
    .await
}
