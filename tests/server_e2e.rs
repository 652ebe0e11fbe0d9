//! End-to-end tests against a live gateway server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use ssr_gateway::app;
use ssr_gateway::config::{GatewayConfig, Mode};
use ssr_gateway::http::{HtmlShell, HttpServer};
use ssr_gateway::render::HtmlRenderer;
use ssr_gateway::Dispatcher;

mod common;

/// Boot a gateway with the built-in application wiring on the given address.
async fn start_gateway(addr: SocketAddr, config: GatewayConfig) {
    let dispatcher = Arc::new(Dispatcher::new(
        Arc::new(app::route_table()),
        Arc::new(app::preload_resolver()),
        app::reducer(),
        Arc::new(HtmlRenderer),
    ));
    let server = HttpServer::new(config, dispatcher, Arc::new(HtmlShell));
    let listener = TcpListener::bind(addr).await.unwrap();
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });
    tokio::time::sleep(Duration::from_millis(200)).await;
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

#[tokio::test]
async fn landing_page_uses_the_landing_view() {
    let addr: SocketAddr = "127.0.0.1:29081".parse().unwrap();
    start_gateway(addr, GatewayConfig::default()).await;

    let resp = client()
        .get(format!("http://{addr}/"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body = resp.text().await.unwrap();
    assert!(body.contains("<title>Express</title>"));
    assert!(body.contains("layout_landing"));
}

#[tokio::test]
async fn trips_page_embeds_markup_and_hydration_state() {
    let addr: SocketAddr = "127.0.0.1:29082".parse().unwrap();
    start_gateway(addr, GatewayConfig::default()).await;

    let resp = client()
        .get(format!("http://{addr}/trips"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body = resp.text().await.unwrap();
    assert!(body.contains("First trip"));
    assert!(body.contains("window.__PRELOADED_STATE__"));
    assert!(body.contains(r#""likes":3"#));
}

#[tokio::test]
async fn unknown_path_returns_404_not_found() {
    let addr: SocketAddr = "127.0.0.1:29083".parse().unwrap();
    start_gateway(addr, GatewayConfig::default()).await;

    let resp = client()
        .get(format!("http://{addr}/missing"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    assert_eq!(resp.text().await.unwrap(), "Not Found");
}

#[tokio::test]
async fn guarded_route_redirects_before_rendering() {
    let addr: SocketAddr = "127.0.0.1:29084".parse().unwrap();
    start_gateway(addr, GatewayConfig::default()).await;

    let resp = client()
        .get(format!("http://{addr}/home?from=nav"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(
        resp.headers().get("location").unwrap().to_str().unwrap(),
        "/trips?from=nav"
    );
}

#[tokio::test]
async fn development_mode_proxies_build_assets() {
    let upstream: SocketAddr = "127.0.0.1:29185".parse().unwrap();
    common::start_mock_upstream(upstream, "bundle-bytes").await;

    let addr: SocketAddr = "127.0.0.1:29085".parse().unwrap();
    let mut config = GatewayConfig::default();
    config.mode = Mode::Development;
    config.assets.upstream = format!("http://{upstream}");
    start_gateway(addr, config).await;

    let resp = client()
        .get(format!("http://{addr}/build/bundle.js"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "bundle-bytes");
}

#[tokio::test]
async fn unreachable_asset_upstream_surfaces_as_bad_gateway() {
    let addr: SocketAddr = "127.0.0.1:29086".parse().unwrap();
    let mut config = GatewayConfig::default();
    config.mode = Mode::Development;
    // Nothing listens on this port.
    config.assets.upstream = "http://127.0.0.1:29186".to_string();
    start_gateway(addr, config).await;

    let resp = client()
        .get(format!("http://{addr}/build/bundle.js"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 502);
    assert!(resp.text().await.unwrap().contains("asset proxy error"));
}

#[tokio::test]
async fn production_mode_does_not_expose_the_asset_route() {
    let addr: SocketAddr = "127.0.0.1:29087".parse().unwrap();
    start_gateway(addr, GatewayConfig::default()).await;

    let resp = client()
        .get(format!("http://{addr}/build/bundle.js"))
        .send()
        .await
        .unwrap();
    // Falls through to the dispatcher, which has no /build route.
    assert_eq!(resp.status(), 404);
    assert_eq!(resp.text().await.unwrap(), "Not Found");
}
