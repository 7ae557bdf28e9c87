use crate::errors::{VizError, VizResult};
use std::path::PathBuf;

/// Endpoint the original page posted to.
pub const DEFAULT_PRICING_URL: &str =
    "https://eydivgdv44.execute-api.us-west-1.amazonaws.com/prod/bopm";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub pricing_service_url: String,
    pub server_port: u16,
    pub static_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> VizResult<Self> {
        dotenvy::dotenv().ok();

        let server_port = env_var_or("SERVER_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| VizError::Config(format!("SERVER_PORT: {e}")))?;

        let pricing_service_url = env_var_or("PRICING_SERVICE_URL", DEFAULT_PRICING_URL)
            .trim()
            .to_string();
        if !pricing_service_url.starts_with("http://") && !pricing_service_url.starts_with("https://") {
            return Err(VizError::Config(format!(
                "PRICING_SERVICE_URL: not an http(s) url: {pricing_service_url}"
            )));
        }

        Ok(Self {
            pricing_service_url,
            server_port,
            static_dir: PathBuf::from(env_var_or("STATIC_DIR", "static")),
        })
    }
}

fn env_var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
