//! Development-mode asset proxying.
//!
//! # Responsibilities
//! - Forward `/build/*` requests verbatim to the bundler dev server
//! - Surface upstream failures to the client as 502 with the error text
//!
//! # Design Decisions
//! - Only the scheme and authority are rewritten; path, query, headers and
//!   body pass through untouched
//! - Proxied requests never enter the SSR dispatch state machine

use axum::body::Body;
use axum::http::uri::{Authority, Scheme};
use axum::http::{Request, Response as HttpResponse, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use thiserror::Error;

/// Failure constructing the proxy from its configured upstream.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProxyError {
    #[error("asset upstream `{0}` is not a valid URI")]
    InvalidUpstream(String),

    #[error("asset upstream `{0}` has no host")]
    MissingAuthority(String),
}

/// Reverse proxy to the development asset server.
pub struct AssetProxy {
    client: Client<HttpConnector, Body>,
    scheme: Scheme,
    authority: Authority,
}

impl AssetProxy {
    /// Build a proxy for the given upstream URL (e.g. `http://localhost:3001`).
    pub fn new(upstream: &str) -> Result<Self, ProxyError> {
        let uri: Uri = upstream
            .parse()
            .map_err(|_| ProxyError::InvalidUpstream(upstream.to_string()))?;
        let authority = uri
            .authority()
            .cloned()
            .ok_or_else(|| ProxyError::MissingAuthority(upstream.to_string()))?;
        let scheme = uri.scheme().cloned().unwrap_or(Scheme::HTTP);
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Ok(Self {
            client,
            scheme,
            authority,
        })
    }

    /// Forward one request to the upstream and relay its response.
    pub async fn forward(&self, req: Request<Body>) -> Response {
        let path = req.uri().path().to_string();

        let mut parts = req.uri().clone().into_parts();
        parts.scheme = Some(self.scheme.clone());
        parts.authority = Some(self.authority.clone());
        let uri = match Uri::from_parts(parts) {
            Ok(uri) => uri,
            Err(e) => {
                tracing::error!(path = %path, error = %e, "asset uri rewrite failed");
                return (StatusCode::BAD_GATEWAY, format!("asset proxy error: {e}"))
                    .into_response();
            }
        };

        let (mut req_parts, body) = req.into_parts();
        req_parts.uri = uri;
        let upstream_req = Request::from_parts(req_parts, body);

        match self.client.request(upstream_req).await {
            Ok(response) => {
                tracing::debug!(path = %path, status = %response.status(), "asset proxied");
                let (parts, body) = response.into_parts();
                HttpResponse::from_parts(parts, Body::new(body)).into_response()
            }
            Err(e) => {
                tracing::error!(path = %path, error = %e, "asset upstream unreachable");
                (StatusCode::BAD_GATEWAY, format!("asset proxy error: {e}")).into_response()
            }
        }
    }
}
