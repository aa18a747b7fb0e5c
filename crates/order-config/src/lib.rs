//! Configuration for the QR order confirmation service.
//!
//! Supports loading configuration from a TOML file with defaults for
//! every field, so the service can also boot without a config file.
//! A couple of deployment-facing values can be overridden through the
//! environment (see the loader module).

mod loader;

use order_types::QrOptions;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the huge input dump
		let message = err.message().to_string();
		ConfigError::Parse(message)
	}
}

/// Main configuration structure for the service.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
	/// Configuration for the HTTP API server.
	pub api: ApiConfig,
	/// Options for QR rasterization.
	pub qr: QrOptions,
}

impl Config {
	/// Ensures the configuration values are usable.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if let Some(url) = &self.api.public_url {
			if !url.starts_with("http://") && !url.starts_with("https://") {
				return Err(ConfigError::Validation(format!(
					"public_url must be an absolute http(s) URL, got '{}'",
					url
				)));
			}
		}
		if self.qr.scale == 0 {
			return Err(ConfigError::Validation(
				"qr.scale must be at least 1".to_string(),
			));
		}
		Ok(())
	}
}

/// Configuration for the HTTP API server.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
	/// Host address to bind the server to.
	pub host: String,
	/// Port to bind the server to.
	pub port: u16,
	/// Externally reachable origin used to build confirmation URLs.
	/// When unset, `http://localhost:{port}` is used.
	pub public_url: Option<String>,
}

impl Default for ApiConfig {
	fn default() -> Self {
		Self {
			host: default_api_host(),
			port: default_api_port(),
			public_url: None,
		}
	}
}

impl ApiConfig {
	/// Address the TCP listener binds to.
	pub fn bind_address(&self) -> String {
		format!("{}:{}", self.host, self.port)
	}

	/// The origin embedded into confirmation URLs. Trailing slashes
	/// are trimmed so path composition stays predictable.
	pub fn public_url(&self) -> String {
		match &self.public_url {
			Some(url) => url.trim_end_matches('/').to_string(),
			None => format!("http://localhost:{}", self.port),
		}
	}
}

/// Returns the default API host.
fn default_api_host() -> String {
	"127.0.0.1".to_string()
}

/// Returns the default API port.
fn default_api_port() -> u16 {
	3000
}
