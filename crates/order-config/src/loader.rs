//! Configuration loading.
//!
//! Reads the TOML file when it exists and falls back to defaults when
//! it does not, then applies environment overrides. `PORT` and
//! `PUBLIC_URL` mirror what the deployment environment usually
//! provides for this kind of service.

use crate::{Config, ConfigError};
use std::path::Path;

impl Config {
	/// Loads configuration from a TOML file.
	///
	/// A missing file is not an error; defaults apply. Environment
	/// overrides are applied after parsing and the result is
	/// validated.
	pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let mut config: Config = if path.exists() {
			let contents = tokio::fs::read_to_string(path).await?;
			toml::from_str(&contents)?
		} else {
			Config::default()
		};

		config.apply_overrides(
			std::env::var("PORT").ok(),
			std::env::var("PUBLIC_URL").ok(),
		)?;
		config.validate()?;
		Ok(config)
	}

	/// Applies the `PORT` and `PUBLIC_URL` overrides.
	fn apply_overrides(
		&mut self,
		port: Option<String>,
		public_url: Option<String>,
	) -> Result<(), ConfigError> {
		if let Some(port) = port {
			self.api.port = port.parse().map_err(|_| {
				ConfigError::Validation(format!("PORT must be a port number, got '{}'", port))
			})?;
		}
		if let Some(url) = public_url {
			if !url.is_empty() {
				self.api.public_url = Some(url);
			}
		}
		Ok(())
	}
}
