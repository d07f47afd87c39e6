//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::mpsc;

use polyroute::config::AppConfig;
use polyroute::http::HttpServer;
use polyroute::lifecycle::Shutdown;

/// A gateway running on a loopback port for the duration of a test.
pub struct TestGateway {
    pub addr: SocketAddr,
    /// Kept alive so the server does not shut down mid-test.
    #[allow(dead_code)]
    pub shutdown: Shutdown,
    /// Feed replacement configs to exercise hot reload.
    #[allow(dead_code)]
    pub config_tx: mpsc::UnboundedSender<AppConfig>,
}

impl TestGateway {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Boot the real server on an ephemeral port.
pub async fn spawn_gateway(config: AppConfig) -> TestGateway {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let (config_tx, config_updates) = mpsc::unbounded_channel();
    let server = HttpServer::new(config);
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, config_updates, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;

    TestGateway {
        addr,
        shutdown,
        config_tx,
    }
}

/// Client that surfaces redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
