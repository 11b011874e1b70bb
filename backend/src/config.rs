use std::env;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_BODY_MB: usize = 25;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("CRM_UPSTREAM_URL is not set")]
    MissingUpstream,
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Runtime settings, read from the environment after loading `.env`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Base URL of the CRM API every `/api/*` call is relayed to, without a trailing slash.
    pub upstream_url: String,
    pub open_browser: bool,
    /// Applies to relayed bodies and to lead/dealer multipart submissions.
    pub max_body_bytes: usize,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            log::debug!("no .env loaded: {}", e);
        }
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let upstream_url = read("CRM_UPSTREAM_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .ok_or(ConfigError::MissingUpstream)?;

        let port = match read("CRM_PORT") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::Invalid { name: "CRM_PORT", value })?,
            None => DEFAULT_PORT,
        };

        let open_browser = match read("CRM_OPEN_BROWSER").as_deref().map(str::to_ascii_lowercase) {
            None => true,
            Some(value) => match value.as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "CRM_OPEN_BROWSER",
                        value: value.clone(),
                    })
                }
            },
        };

        let max_body_bytes = match read("CRM_MAX_BODY_MB") {
            Some(value) => value
                .parse::<usize>()
                .ok()
                .filter(|mb| *mb > 0)
                .and_then(|mb| mb.checked_mul(1024 * 1024))
                .ok_or(ConfigError::Invalid { name: "CRM_MAX_BODY_MB", value })?,
            None => DEFAULT_MAX_BODY_MB * 1024 * 1024,
        };

        Ok(Self {
            host: read("CRM_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            upstream_url,
            open_browser,
            max_body_bytes,
        })
    }

    pub fn public_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}
