//! Shared helpers for the integration test suite.

use axum::Router;
use std::net::SocketAddr;

/// Serve `app` on an ephemeral localhost port and return the bound address.
///
/// The server task stays up until the test runtime shuts down, so callers
/// can fire as many requests at the returned address as they need.
pub async fn serve_ephemeral(app: Router) -> anyhow::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server crashed");
    });
    Ok(addr)
}
