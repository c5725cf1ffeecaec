use std::{
    env,
    fmt::Display,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    str::FromStr,
};

use prompt_client::MAX_TOPIC_CHARS;

use crate::error::ConfigError;

pub const DEFAULT_PORT: u16 = 3002;
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const API_KEY_VARS: [&str; 2] = ["GENAI_API_KEY", "API_KEY"];

/// Which Gemini REST endpoint the gateway speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiDialect {
    /// `v1beta/models/{model}:generateContent`, with a separate system instruction.
    #[default]
    GenerateContent,
    /// `v1beta2/models/{model}:generateText`, single flattened prompt.
    GenerateText,
}

impl FromStr for ApiDialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "generate-content" | "generatecontent" | "content" => Ok(ApiDialect::GenerateContent),
            "generate-text" | "generatetext" | "text" => Ok(ApiDialect::GenerateText),
            other => Err(format!(
                "unknown dialect `{}`, expected `generate-content` or `generate-text`",
                other
            )),
        }
    }
}

/// Where the upstream API key comes from. Resolved on every request so a
/// missing key surfaces as a 500 response rather than a start-up failure.
#[derive(Debug, Clone)]
pub enum CredentialSource {
    /// First non-empty variable wins.
    Environment(Vec<String>),
    Static(Option<String>),
}

impl Default for CredentialSource {
    fn default() -> Self {
        CredentialSource::Environment(API_KEY_VARS.iter().map(|v| v.to_string()).collect())
    }
}

impl CredentialSource {
    pub fn resolve(&self) -> Option<String> {
        match self {
            CredentialSource::Environment(vars) => vars
                .iter()
                .filter_map(|var| env::var(var).ok())
                .map(|key| key.trim().to_string())
                .find(|key| !key.is_empty()),
            CredentialSource::Static(key) => key
                .as_deref()
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .map(str::to_string),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub host: IpAddr,
    pub port: u16,
    pub model: String,
    pub base_url: String,
    pub dialect: ApiDialect,
    pub max_topic_chars: usize,
    pub credentials: CredentialSource,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            dialect: ApiDialect::default(),
            max_topic_chars: MAX_TOPIC_CHARS,
            credentials: CredentialSource::default(),
        }
    }
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            host: parse_var(&lookup, "API_HOST", defaults.host)?,
            port: parse_var(&lookup, "API_PORT", defaults.port)?,
            model: lookup("GENAI_MODEL")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.model),
            base_url: lookup("GENAI_BASE_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.base_url),
            dialect: parse_var(&lookup, "GENAI_API_DIALECT", defaults.dialect)?,
            max_topic_chars: parse_var(&lookup, "MAX_TOPIC_CHARS", defaults.max_topic_chars)?,
            credentials: defaults.credentials,
        })
    }

    pub fn with_credentials(mut self, credentials: CredentialSource) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => {
            value
                .trim()
                .parse()
                .map_err(|e: T::Err| ConfigError::Invalid {
                    key: key.to_string(),
                    value: value.clone(),
                    reason: e.to_string(),
                })
        }
        _ => Ok(default),
    }
}
