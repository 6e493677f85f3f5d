// Copyright 2025 Muvon Un Limited
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::Config;

impl Config {
	/// Load configuration from the system-wide config file
	pub fn load() -> Result<Self> {
		let config_path = crate::directories::get_config_file_path()?;
		Self::load_from(&config_path)
	}

	/// Load configuration from a specific file, falling back to defaults when it does not exist
	pub fn load_from(config_path: &Path) -> Result<Self> {
		let mut config = if config_path.exists() {
			let config_str = fs::read_to_string(config_path).context(format!(
				"Failed to read config from {}",
				config_path.display()
			))?;
			let config: Config =
				toml::from_str(&config_str).context("Failed to parse TOML configuration")?;

			if let Err(e) = config.validate() {
				eprintln!("Configuration validation warning: {}", e);
				eprintln!("The application will continue, but you may want to fix these issues.");
			}

			config
		} else {
			Config::default()
		};

		// Store the config path for future saves
		config.config_path = Some(config_path.to_path_buf());

		Ok(config)
	}

	/// Save configuration to file
	pub fn save(&self) -> Result<()> {
		self.validate()?;

		let config_path = match &self.config_path {
			Some(path) => path.clone(),
			None => crate::directories::get_config_file_path()?,
		};

		self.save_to(&config_path)
	}

	fn save_to(&self, config_path: &Path) -> Result<()> {
		if let Some(parent) = config_path.parent() {
			fs::create_dir_all(parent).context(format!(
				"Failed to create config directory {}",
				parent.display()
			))?;
		}

		let config_str =
			toml::to_string(self).context("Failed to serialize configuration to TOML")?;
		fs::write(config_path, config_str).context(format!(
			"Failed to write config to {}",
			config_path.display()
		))?;

		Ok(())
	}

	/// Create a default configuration file if none exists yet
	pub fn create_default_config() -> Result<PathBuf> {
		let config_path = crate::directories::get_config_file_path()?;

		if !config_path.exists() {
			Config::default().save_to(&config_path)?;
			println!("Created default configuration at {}", config_path.display());
		}

		Ok(config_path)
	}

	/// Path this configuration was loaded from, if any
	pub fn config_path(&self) -> Option<&Path> {
		self.config_path.as_deref()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::LogLevel;

	#[test]
	fn test_missing_file_gives_defaults() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("config.toml");

		let config = Config::load_from(&path).unwrap();
		assert_eq!(config.idle_timeout_seconds, 300);
		assert_eq!(config.config_path(), Some(path.as_path()));
	}

	#[test]
	fn test_save_and_reload() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("nested").join("config.toml");

		let mut config = Config::load_from(&path).unwrap();
		config.model = Some("gpt-3.5-turbo".to_string());
		config.log_level = LogLevel::Info;
		config.save().unwrap();

		let reloaded = Config::load_from(&path).unwrap();
		assert_eq!(reloaded.model.as_deref(), Some("gpt-3.5-turbo"));
		assert_eq!(reloaded.log_level, LogLevel::Info);
	}

	#[test]
	fn test_save_rejects_invalid_config() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("config.toml");

		let mut config = Config::load_from(&path).unwrap();
		config.model = Some("text-davinci-003".to_string());
		assert!(config.save().is_err());
		assert!(!path.exists());
	}

	#[test]
	fn test_malformed_file_is_an_error() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("config.toml");
		fs::write(&path, "temperature = \"hot\"").unwrap();

		assert!(Config::load_from(&path).is_err());
	}
}
