use std::net::SocketAddr;

use tracing::{info, warn};

/// Runtime configuration, read once at startup from the environment.
///
/// The upstream base address and mail credential are optional on purpose:
/// their absence is reported per request instead of refusing to boot, so a
/// partially configured deployment still serves the routes that work.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub upstream_base: Option<String>,
    pub default_model: String,
    pub resend_api_key: Option<String>,
    pub contact_to: String,
    pub contact_from: String,
}

const DEFAULT_MODEL: &str = "qwen2.5:3b-instruct";
const DEFAULT_CONTACT_TO: &str = "info@oddeeconsultancy.co.uk";
const DEFAULT_CONTACT_FROM: &str = "Oddee Website <onboarding@resend.dev>";

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr = match std::env::var("BIND_ADDR") {
            Ok(addr) => addr.parse()?,
            Err(_) => SocketAddr::from(([127, 0, 0, 1], 3000)),
        };

        let upstream_base = match std::env::var("OLLAMA_BASE_URL") {
            Ok(base) => {
                info!("Upstream inference base: {}", base);
                Some(base.trim_end_matches('/').to_string())
            }
            Err(_) => {
                warn!("OLLAMA_BASE_URL not set; /api/chat will report misconfiguration");
                None
            }
        };

        let default_model =
            std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        info!("Default inference model: {}", default_model);

        let resend_api_key = match std::env::var("RESEND_API_KEY") {
            Ok(key) if !key.is_empty() => Some(key),
            _ => {
                warn!("RESEND_API_KEY not set; /api/contact dispatch will fail");
                None
            }
        };

        let contact_to =
            std::env::var("CONTACT_TO_EMAIL").unwrap_or_else(|_| DEFAULT_CONTACT_TO.to_string());
        let contact_from = std::env::var("CONTACT_FROM_EMAIL")
            .unwrap_or_else(|_| DEFAULT_CONTACT_FROM.to_string());

        Ok(Self {
            bind_addr,
            upstream_base,
            default_model,
            resend_api_key,
            contact_to,
            contact_from,
        })
    }
}
