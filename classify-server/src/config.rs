use clap::Parser;
use classify_core::remote::DEFAULT_OPENAI_MODEL;

/// Environment variable holding the remote extractor credential.
pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";

/// Command-line arguments, each with an environment fallback.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Address to bind
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Model used by the remote extractor
    #[arg(long, env = "OPENAI_MODEL", default_value = DEFAULT_OPENAI_MODEL)]
    pub model: String,
}

/// Resolved server configuration.
///
/// The credential is only read from the environment; its absence selects
/// fallback-only mode and is not an error.
#[derive(Clone)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Model used by the remote extractor.
    pub model: String,
    /// Remote extractor credential, if configured.
    pub api_key: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            model: DEFAULT_OPENAI_MODEL.to_string(),
            api_key: None,
        }
    }
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ServerConfig {
    /// Combines parsed CLI arguments with an optional credential.
    ///
    /// Blank credentials count as absent.
    #[must_use]
    pub fn new(cli: Cli, api_key: Option<String>) -> Self {
        Self {
            host: cli.host,
            port: cli.port,
            model: cli.model,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        }
    }

    /// Combines parsed CLI arguments with the credential from [`API_KEY_ENV_VAR`].
    #[must_use]
    pub fn from_cli(cli: Cli) -> Self {
        Self::new(cli, std::env::var(API_KEY_ENV_VAR).ok())
    }

    /// Returns `true` when a remote extractor credential is configured.
    #[must_use]
    pub const fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Returns the `host:port` string to bind.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
