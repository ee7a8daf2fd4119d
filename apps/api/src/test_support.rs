//! Local HTTP stand-ins for the upstream providers.

use axum::Router;
use tokio::net::TcpListener;

/// Serves `router` on an ephemeral loopback port and returns its base URL.
/// The server lives until the test's runtime shuts down.
pub async fn serve_stub(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}
