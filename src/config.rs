use secrecy::{ExposeSecret, SecretBox};
use std::env;
use std::path::Path;
use thiserror::Error;
use url::Url;

/// Default env file, relative to the working directory.
pub const DEFAULT_ENV_FILE: &str = ".env.local";

const REQUIRED_VARS: [&str; 3] = ["LIVEKIT_URL", "LIVEKIT_API_KEY", "LIVEKIT_API_SECRET"];

/// Prefixes of the values shipped in sample env files.
const PLACEHOLDER_PREFIXES: [&str; 2] = ["dummy_", "your_"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Environment variable {0} holds a placeholder value")]
    Placeholder(String),
    #[error("Environment variables missing or set to placeholder values: {}", .0.join(", "))]
    Unconfigured(Vec<String>),
    #[error("Invalid LIVEKIT_URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Credentials for the voice-session backend
#[derive(Debug)]
pub struct ApiConfig {
    pub livekit_url: Url,
    pub livekit_api_key: SecretBox<String>,
    pub livekit_api_secret: SecretBox<String>,
}

impl ApiConfig {
    /// Load configuration from `env_file` (if present) and the process environment.
    pub fn load(env_file: &Path) -> Result<Self, ConfigError> {
        // Variables already in the environment take precedence over the file
        if dotenvy::from_path(env_file).is_ok() {
            log::debug!("Loaded environment from {}", env_file.display());
        }
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a configuration from an arbitrary variable source. Every bad
    /// variable is logged before the error is returned.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut bad = Vec::new();
        let mut values = Vec::with_capacity(REQUIRED_VARS.len());

        for name in REQUIRED_VARS {
            match Self::check_var(name, lookup(name)) {
                Ok(value) => values.push(value),
                Err(e) => {
                    log::error!("{}", e);
                    bad.push(name.to_string());
                }
            }
        }

        if !bad.is_empty() {
            return Err(ConfigError::Unconfigured(bad));
        }

        let mut values = values.into_iter();
        let (Some(url), Some(key), Some(secret)) = (values.next(), values.next(), values.next())
        else {
            return Err(ConfigError::MissingEnvVar(REQUIRED_VARS.join(", ")));
        };

        Ok(Self {
            livekit_url: Url::parse(&url)?,
            livekit_api_key: SecretBox::new(Box::new(key)),
            livekit_api_secret: SecretBox::new(Box::new(secret)),
        })
    }

    /// Reject absent, blank and placeholder values
    fn check_var(name: &str, value: Option<String>) -> Result<String, ConfigError> {
        let value = value.ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))?;

        if value.trim().is_empty() {
            return Err(ConfigError::MissingEnvVar(name.to_string()));
        }
        if PLACEHOLDER_PREFIXES
            .iter()
            .any(|prefix| value.starts_with(prefix))
        {
            return Err(ConfigError::Placeholder(name.to_string()));
        }
        Ok(value)
    }

    /// Get the API key (use only when connecting)
    pub fn api_key(&self) -> &str {
        self.livekit_api_key.expose_secret()
    }

    /// Get the API secret (use only when connecting)
    pub fn api_secret(&self) -> &str {
        self.livekit_api_secret.expose_secret()
    }
}

/// Load configuration with helpful error messages for development
pub fn load_config(env_file: &Path) -> Result<ApiConfig, ConfigError> {
    match ApiConfig::load(env_file) {
        Ok(config) => {
            log::info!("Loaded backend configuration for {}", config.livekit_url);
            Ok(config)
        }
        Err(ConfigError::Unconfigured(vars)) => {
            log::error!(
                "Set {} in {} or the environment.",
                REQUIRED_VARS.join(", "),
                env_file.display()
            );
            Err(ConfigError::Unconfigured(vars))
        }
        Err(e) => {
            log::error!("Configuration error: {}", e);
            Err(e)
        }
    }
}
