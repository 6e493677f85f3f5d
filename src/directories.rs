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


// Directory utilities for the configuration and credential cache locations

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

const APP_DIR_NAME: &str = "simple_chatgpt_cli";
const CONFIG_FILE_NAME: &str = "config.toml";
const API_KEY_FILE_NAME: &str = "openai_api_key";

/// Get the configuration directory for the chat client
///
/// The directory lives under `~/.config/simple_chatgpt_cli` on every platform,
/// matching the location of the cached API key file.
pub fn get_config_dir() -> Result<PathBuf> {
	let config_dir = match dirs::home_dir() {
		Some(home) => home.join(".config").join(APP_DIR_NAME),
		None => {
			return Err(anyhow::anyhow!("Unable to determine home directory"));
		}
	};

	if !config_dir.exists() {
		fs::create_dir_all(&config_dir).context(format!(
			"Failed to create config directory: {}",
			config_dir.display()
		))?;
	}

	Ok(config_dir)
}

/// Get the configuration file path
pub fn get_config_file_path() -> Result<PathBuf> {
	Ok(get_config_dir()?.join(CONFIG_FILE_NAME))
}

/// Get the path of the cached API key file
pub fn get_api_key_file_path() -> Result<PathBuf> {
	Ok(get_config_dir()?.join(API_KEY_FILE_NAME))
}
