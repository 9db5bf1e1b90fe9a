//! HTTP listeners and the supervisor that runs several of them.
//!
//! Each [`Server`] owns one bound TCP listener and one immutable
//! [`Router`]. [`serve_all`] is the process-level entry point: it runs
//! every listener concurrently and resolves as soon as one of them
//! terminates, so a fault in either route table's listener is a fault
//! of the whole process.
//!
//! Shutdown: SIGTERM or Ctrl-C stops the accept loops; in-flight
//! requests run to completion before [`Server::serve`] returns.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http::StatusCode;
use http_body_util::{BodyExt, Full};
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::{TcpListener, ToSocketAddrs};
use tracing::{error, info, warn};

use crate::error::Error;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;

/// One bound HTTP listener.
pub struct Server {
    listener: TcpListener,
    addr: SocketAddr,
}

impl Server {
    /// Binds a TCP listener on `addr`.
    ///
    /// Binding eagerly (rather than inside [`serve`](Server::serve))
    /// means a taken port is reported before any listener starts, and
    /// `addr` may name port 0 to get an ephemeral port; see
    /// [`local_addr`](Server::local_addr).
    pub async fn bind(addr: impl ToSocketAddrs) -> Result<Self, Error> {
        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        Ok(Self { listener, addr })
    }

    /// The address the listener is actually bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Accepts connections and dispatches them through `router` until
    /// a shutdown signal arrives and in-flight requests drain.
    pub async fn serve(self, router: Router) -> Result<(), Error> {
        // Shared across concurrent connection tasks without copying the
        // routing table.
        let router = Arc::new(router);

        info!(addr = %self.addr, "listening");

        // Tracks every spawned connection task so shutdown can wait for
        // them all.
        let mut tasks = tokio::task::JoinSet::new();

        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                // Check shutdown before accept so a signal stops new
                // connections even when more are queued.
                biased;

                () = &mut shutdown => {
                    info!(addr = %self.addr, in_flight = tasks.len(), "shutdown signal, draining");
                    break;
                }

                res = self.listener.accept() => {
                    let (stream, remote_addr) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!(addr = %self.addr, "accept error: {e}");
                            continue;
                        }
                    };

                    let router = Arc::clone(&router);
                    let io = TokioIo::new(stream);

                    tasks.spawn(async move {
                        // Called once per request on the connection.
                        let svc = service_fn(move |req| {
                            let router = Arc::clone(&router);
                            async move { dispatch(router, req).await }
                        });

                        // Serves HTTP/1.1 or HTTP/2, whichever the
                        // client speaks.
                        if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                            .serve_connection(io, svc)
                            .await
                        {
                            error!(peer = %remote_addr, "connection error: {e}");
                        }
                    });
                }

                // Reap finished connection tasks so the set stays small.
                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        while tasks.join_next().await.is_some() {}

        info!(addr = %self.addr, "stopped");
        Ok(())
    }
}

/// Runs every (listener, route table) pair concurrently.
///
/// Resolves with the result of whichever listener terminates first: the
/// first error is the process's error, and a clean return (post-signal
/// drain) waits for the remaining listeners to finish draining too.
/// Dropping the task set on early return aborts any listener still
/// running.
pub async fn serve_all(servers: Vec<(Server, Router)>) -> Result<(), Error> {
    let mut tasks = tokio::task::JoinSet::new();
    for (server, router) in servers {
        let addr = server.local_addr();
        tasks.spawn(async move { (addr, server.serve(router).await) });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((addr, Ok(()))) => info!(%addr, "listener finished"),
            Ok((addr, Err(e))) => {
                error!(%addr, "listener failed: {e}");
                return Err(e);
            }
            Err(e) => {
                error!("listener task panicked: {e}");
                return Err(std::io::Error::other(e).into());
            }
        }
    }
    Ok(())
}

// ── Request dispatch ─────────────────────────────────────────────────────────

/// Routes one request and produces one response.
///
/// Infallible: every failure becomes an HTTP status here, so hyper
/// never sees an error from the service.
async fn dispatch(
    router: Arc<Router>,
    req: hyper::Request<hyper::body::Incoming>,
) -> Result<http::Response<Full<Bytes>>, Infallible> {
    let (parts, body) = req.into_parts();

    let response = match router.lookup(&parts.method, parts.uri.path()) {
        Some((handler, params)) => match collect_body(body).await {
            Ok(bytes) => {
                let request = Request::new(parts.method, parts.uri, parts.headers, bytes, params);
                handler.call(request).await
            }
            Err(e) => {
                warn!(path = %parts.uri.path(), "failed to read request body: {e}");
                Response::status(StatusCode::BAD_REQUEST)
            }
        },
        None => Response::status(StatusCode::NOT_FOUND),
    };

    Ok(response.into_http())
}

async fn collect_body(body: hyper::body::Incoming) -> Result<Bytes, hyper::Error> {
    Ok(body.collect().await?.to_bytes())
}

// ── Shutdown signal ──────────────────────────────────────────────────────────

/// Resolves on the first shutdown signal the process receives.
///
/// Unix: SIGTERM or SIGINT (Ctrl-C). Elsewhere: Ctrl-C only.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let sigterm = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c  => {}
        () = sigterm => {}
    }
}
