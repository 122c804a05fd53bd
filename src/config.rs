use dotenv::dotenv;
use std::env;
use std::time::Duration;
use tracing::{info, warn};

use crate::auth::ChecksumAlgorithm;
use crate::error::{ApiError, Result};

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Static configuration of a [`crate::BigBlueButtonClient`]
#[derive(Clone)]
pub struct ClientConfig {
    server_url: String,
    secret: String,
    algorithm: ChecksumAlgorithm,
    timeout: Duration,
    accept_invalid_certs: bool,
}

impl ClientConfig {
    /// Config with SHA-256 checksums, a 30 second timeout and TLS verification on
    pub fn new(server_url: impl Into<String>, secret: impl Into<String>) -> Self {
        let server_url = server_url.into();
        Self {
            server_url: server_url.trim_end_matches('/').to_string(),
            secret: secret.into(),
            algorithm: ChecksumAlgorithm::default(),
            timeout: DEFAULT_TIMEOUT,
            accept_invalid_certs: false,
        }
    }

    pub fn with_algorithm(mut self, algorithm: ChecksumAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Request timeout; a zero timeout is rejected when the client is built
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Skip TLS certificate verification. Only for servers with self-signed certificates.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Load configuration from environment variables (and `.env` if present)
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        let config = Self::from_lookup(|key| env::var(key).ok())?;
        info!(
            "Loaded BigBlueButton configuration for {} ({})",
            config.server_url, config.algorithm
        );
        Ok(config)
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_url = lookup("BBB_SERVER_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ApiError::Config("BBB_SERVER_URL must be set".to_string()))?;
        let secret = lookup("BBB_SECRET")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ApiError::Config("BBB_SECRET must be set".to_string()))?;

        let mut config = Self::new(server_url.trim(), secret);

        if let Some(algorithm) = lookup("BBB_CHECKSUM_ALGORITHM") {
            config.algorithm = algorithm.parse()?;
        }

        if let Some(timeout) = lookup("BBB_TIMEOUT_SECS") {
            let secs = timeout.trim().parse::<u64>().map_err(|_| {
                ApiError::Config(format!("BBB_TIMEOUT_SECS is not a number: {}", timeout))
            })?;
            if secs == 0 {
                return Err(ApiError::Config(
                    "BBB_TIMEOUT_SECS must be greater than 0".to_string(),
                ));
            }
            config.timeout = Duration::from_secs(secs);
        }

        config.accept_invalid_certs = lookup("BBB_ACCEPT_INVALID_CERTS")
            .map(|val| val.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        if config.accept_invalid_certs {
            warn!("BBB_ACCEPT_INVALID_CERTS is set: TLS certificates will not be verified");
        }

        Ok(config)
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn algorithm(&self) -> ChecksumAlgorithm {
        self.algorithm
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn accepts_invalid_certs(&self) -> bool {
        self.accept_invalid_certs
    }
}

// Keep the secret out of debug output
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("server_url", &self.server_url)
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("timeout", &self.timeout)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .finish()
    }
}
