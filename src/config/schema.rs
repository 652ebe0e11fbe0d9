//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Environment variable that overrides the configured mode.
pub const MODE_ENV_VAR: &str = "SSR_GATEWAY_ENV";

/// Root configuration for the SSR gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address, connection limits).
    pub listener: ListenerConfig,

    /// Development vs production mode.
    pub mode: Mode,

    /// Development asset server proxying.
    pub assets: AssetServerConfig,

    /// Landing page template variables.
    pub landing: LandingConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl GatewayConfig {
    /// Apply the mode override from the process environment, if present.
    ///
    /// Unrecognized values are ignored so a typo cannot silently flip a
    /// production deployment into development mode.
    pub fn with_env_mode(mut self) -> Self {
        if let Ok(value) = std::env::var(MODE_ENV_VAR) {
            match value.as_str() {
                "development" => self.mode = Mode::Development,
                "production" => self.mode = Mode::Production,
                other => {
                    tracing::warn!(value = other, "ignoring unrecognized {MODE_ENV_VAR}");
                }
            }
        }
        self
    }
}

/// Process mode; toggles registration of the asset proxy route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Development,
    #[default]
    Production,
}

impl Mode {
    pub fn is_development(self) -> bool {
        self == Mode::Development
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,

    /// Maximum concurrent connections (backpressure).
    pub max_connections: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            max_connections: 10_000,
        }
    }
}

/// Development asset server proxy configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AssetServerConfig {
    /// Path prefix whose requests are proxied in development mode.
    pub prefix: String,

    /// Upstream bundler dev server URL.
    pub upstream: String,
}

impl Default for AssetServerConfig {
    fn default() -> Self {
        Self {
            prefix: "/build".to_string(),
            upstream: "http://localhost:3001".to_string(),
        }
    }
}

/// Template variables for the static landing view.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LandingConfig {
    /// Layout identifier handed to the view engine.
    pub layout: String,

    /// Page title.
    pub title: String,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            layout: "layout_landing".to_string(),
            title: "Express".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
