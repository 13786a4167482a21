//! Environment-driven gateway configuration.

/// Base URL of the NotaPro REST backend.
pub const DEFAULT_BACKEND_URL: &str = "https://notaproapi.romeu.dev.br/api";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// REST backend base URL (`NOTAPRO_BACKEND_URL`).
    pub backend_url: String,
    /// Listen address (`NOTAPRO_BIND`).
    pub bind_addr: String,
    /// Whether session cookies carry the `Secure` attribute (`COOKIE_SECURE`).
    pub cookie_secure: bool,
    /// Optional service bearer for the statistics endpoint
    /// (`NOTAPRO_STATS_TOKEN`).
    pub stats_token: Option<String>,
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        let backend_url = std::env::var("NOTAPRO_BACKEND_URL").unwrap_or_else(|_| {
            tracing::warn!("NOTAPRO_BACKEND_URL not set; using production default");
            DEFAULT_BACKEND_URL.to_string()
        });

        let bind_addr =
            std::env::var("NOTAPRO_BIND").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let cookie_secure =
            env_bool("COOKIE_SECURE").unwrap_or_else(|| backend_url.starts_with("https://"));

        let stats_token = std::env::var("NOTAPRO_STATS_TOKEN")
            .ok()
            .filter(|t| !t.is_empty());

        Self {
            backend_url,
            bind_addr,
            cookie_secure,
            stats_token,
        }
    }
}

fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}
