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


// API key acquisition: environment, cached key file, then interactive prompt

use crate::log_debug;
use crate::session::chat::ChatIo;
use crate::session::ChatError;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Hidden single-line input for secrets
pub trait SecretPrompt {
	fn prompt_secret(&mut self, label: &str) -> Result<String>;
}

/// Look up a key without asking: the environment value wins over the key file
pub fn resolve_stored_key(env_value: Option<String>, key_file: &Path) -> Result<Option<String>> {
	if let Some(key) = env_value.filter(|key| !key.trim().is_empty()) {
		log_debug!("Using API key from {}", OPENAI_API_KEY_ENV);
		return Ok(Some(key));
	}

	if key_file.exists() {
		let key = fs::read_to_string(key_file).context(format!(
			"Failed to read API key from {}",
			key_file.display()
		))?;
		let key = key.trim().to_string();
		if !key.is_empty() {
			log_debug!("Using API key from {}", key_file.display());
			return Ok(Some(key));
		}
	}

	Ok(None)
}

/// Write the key to the cache file, creating its directory
pub fn save_api_key(key_file: &Path, key: &str) -> Result<()> {
	if let Some(parent) = key_file.parent() {
		fs::create_dir_all(parent).context(format!(
			"Failed to create directory {}",
			parent.display()
		))?;
	}
	fs::write(key_file, key).context(format!(
		"Failed to write API key to {}",
		key_file.display()
	))?;

	#[cfg(unix)]
	{
		use std::os::unix::fs::PermissionsExt;
		fs::set_permissions(key_file, fs::Permissions::from_mode(0o600))?;
	}

	Ok(())
}

/// Resolve the API key, asking for it (and offering to cache it) when nothing is stored
pub fn setup_api_key<T>(io: &mut T, env_value: Option<String>, key_file: &Path) -> Result<String>
where
	T: ChatIo + SecretPrompt,
{
	if let Some(key) = resolve_stored_key(env_value, key_file)? {
		return Ok(key);
	}

	let key = io
		.prompt_secret("OpenAI API key not found. Please enter it here to continue")?
		.trim()
		.to_string();
	if key.is_empty() {
		return Err(ChatError::MissingApiKey.into());
	}

	let save = io.prompt_confirm(
		&format!(
			"Do you want to save the key to {} so you don't have to enter it again next time?",
			key_file.display()
		),
		true,
	)?;
	if save {
		save_api_key(key_file, &key)?;
	}

	Ok(key)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::session::chat::testing::ScriptedIo;

	#[test]
	fn test_env_wins_over_file() {
		let dir = tempfile::tempdir().unwrap();
		let key_file = dir.path().join("openai_api_key");
		fs::write(&key_file, "sk-file\n").unwrap();

		let key = resolve_stored_key(Some("sk-env".to_string()), &key_file).unwrap();
		assert_eq!(key.as_deref(), Some("sk-env"));

		let key = resolve_stored_key(None, &key_file).unwrap();
		assert_eq!(key.as_deref(), Some("sk-file"));

		let key = resolve_stored_key(Some("  ".to_string()), &key_file).unwrap();
		assert_eq!(key.as_deref(), Some("sk-file"));
	}

	#[test]
	fn test_nothing_stored() {
		let dir = tempfile::tempdir().unwrap();
		let key_file = dir.path().join("openai_api_key");
		assert!(resolve_stored_key(None, &key_file).unwrap().is_none());
	}

	#[test]
	fn test_prompt_and_save() {
		let dir = tempfile::tempdir().unwrap();
		let key_file = dir.path().join("cfg").join("openai_api_key");

		let mut io = ScriptedIo::new([""]).with_secrets(["sk-typed"]);
		let key = setup_api_key(&mut io, None, &key_file).unwrap();

		assert_eq!(key, "sk-typed");
		assert_eq!(fs::read_to_string(&key_file).unwrap(), "sk-typed");
	}

	#[test]
	fn test_prompt_without_saving() {
		let dir = tempfile::tempdir().unwrap();
		let key_file = dir.path().join("openai_api_key");

		let mut io = ScriptedIo::new(["n"]).with_secrets(["sk-typed"]);
		let key = setup_api_key(&mut io, None, &key_file).unwrap();

		assert_eq!(key, "sk-typed");
		assert!(!key_file.exists());
	}

	#[test]
	fn test_empty_key_is_rejected() {
		let dir = tempfile::tempdir().unwrap();
		let key_file = dir.path().join("openai_api_key");

		let mut io = ScriptedIo::new(Vec::<&str>::new()).with_secrets([""]);
		let err = setup_api_key(&mut io, None, &key_file).unwrap_err();
		assert!(matches!(
			err.downcast_ref::<ChatError>(),
			Some(ChatError::MissingApiKey)
		));
	}
}
