//! Shared utilities for integration and load testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{Body, Bytes},
    extract::Path,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use feed_relay::config::RelayConfig;
use feed_relay::http::HttpServer;
use feed_relay::lifecycle::Shutdown;
use tokio::net::TcpListener;

pub const CHUNK_SIZE: usize = 4096;
pub const CHUNK_COUNT: usize = 256;

/// Bytes of the streamed `/big` body.
pub fn big_body() -> Vec<u8> {
    (0..CHUNK_COUNT)
        .flat_map(|i| std::iter::repeat((i % 251) as u8).take(CHUNK_SIZE))
        .collect()
}

/// Body served by `/tagged/{tag}`.
pub fn tagged_body(tag: u32) -> String {
    format!("{tag}:").repeat(2048)
}

/// Start a mock feed origin on an ephemeral port.
pub async fn start_upstream() -> SocketAddr {
    let app = Router::new()
        .route(
            "/feed.xml",
            get(|| async { ([(header::CONTENT_TYPE, "application/rss+xml")], "<rss></rss>") }),
        )
        .route("/echo", get(echo_headers))
        .route("/cookies", get(cookies))
        .route("/status/{code}", get(status))
        .route("/tagged/{tag}", get(tagged))
        .route("/encoded", get(encoded))
        .route("/big", get(big))
        .route("/slow", get(slow));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// One `name: value` line per received header value, in received order.
async fn echo_headers(headers: HeaderMap) -> String {
    headers
        .iter()
        .map(|(name, value)| format!("{}: {}\n", name, value.to_str().unwrap_or("<binary>")))
        .collect()
}

async fn cookies() -> Response {
    let mut response = "ok".into_response();
    let headers = response.headers_mut();
    headers.append(header::SET_COOKIE, "session=abc; Path=/".parse().unwrap());
    headers.append(header::SET_COOKIE, "theme=dark; Path=/".parse().unwrap());
    headers.insert("x-feed-id", "42".parse().unwrap());
    response
}

async fn status(Path(code): Path<u16>) -> Response {
    let status = StatusCode::from_u16(code).unwrap();
    (status, format!("upstream {code}")).into_response()
}

async fn tagged(Path(tag): Path<u32>) -> String {
    tokio::time::sleep(Duration::from_millis(u64::from(20 - tag % 20) * 5)).await;
    tagged_body(tag)
}

async fn encoded() -> impl IntoResponse {
    (
        [(header::CONTENT_ENCODING, "gzip"), (header::CONTENT_TYPE, "application/atom+xml")],
        vec![0x1f, 0x8b, 0x08, 0x00, 0xde, 0xad, 0xbe, 0xef],
    )
}

async fn big() -> Response {
    let chunks = (0..CHUNK_COUNT)
        .map(|i| Ok::<_, std::io::Error>(Bytes::from(vec![(i % 251) as u8; CHUNK_SIZE])));
    Body::from_stream(futures_util::stream::iter(chunks)).into_response()
}

/// Answers after three seconds.
async fn slow() -> &'static str {
    tokio::time::sleep(Duration::from_secs(3)).await;
    "<rss></rss>"
}

/// Sets its flag when dropped.
struct DropFlag(Arc<AtomicBool>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// Start an origin whose `/endless` body never finishes. The returned flag
/// flips once the server drops that body.
pub async fn start_endless_upstream() -> (SocketAddr, Arc<AtomicBool>) {
    let released = Arc::new(AtomicBool::new(false));
    let flag = released.clone();

    let app = Router::new().route(
        "/endless",
        get(move || {
            let guard = DropFlag(flag.clone());
            async move {
                let items = futures_util::stream::unfold(guard, |guard| async move {
                    tokio::time::sleep(Duration::from_millis(20)).await;
                    Some((Ok::<_, std::io::Error>(Bytes::from_static(b"<item/>\n")), guard))
                });
                Body::from_stream(items)
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, released)
}

/// Config that stays off the system proxy and serves no assets.
pub fn relay_config() -> RelayConfig {
    let mut config = RelayConfig::default();
    config.proxy.use_system_proxy = false;
    config.static_files.root = "/nonexistent/feed-relay".into();
    config
}

/// Start the relay on an ephemeral port.
pub async fn start_relay(config: RelayConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// Client that never routes through a system proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// `/proxy?u=<target>` on the relay, with the target form-encoded.
pub fn proxy_url(relay: SocketAddr, target: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(target.as_bytes()).collect();
    format!("http://{relay}/proxy?u={encoded}")
}

/// An address nothing listens on.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}
