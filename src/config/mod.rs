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


use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::path::PathBuf;

pub mod defaults;
pub mod loading;
pub mod validation;

pub use defaults::ConfigDefaults;
use defaults::{
	default_api_base_url, default_idle_timeout_seconds, default_system_message,
	default_temperature,
};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
	#[serde(rename = "none")]
	#[default]
	None,
	#[serde(rename = "info")]
	Info,
	#[serde(rename = "debug")]
	Debug,
}

impl LogLevel {
	/// Check if info logging is enabled
	pub fn is_info_enabled(&self) -> bool {
		matches!(self, LogLevel::Info | LogLevel::Debug)
	}

	/// Check if debug logging is enabled
	pub fn is_debug_enabled(&self) -> bool {
		matches!(self, LogLevel::Debug)
	}

	pub fn parse(value: &str) -> Option<Self> {
		match value.to_lowercase().as_str() {
			"none" => Some(LogLevel::None),
			"info" => Some(LogLevel::Info),
			"debug" => Some(LogLevel::Debug),
			_ => None,
		}
	}
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
	#[serde(default, skip_serializing_if = "ConfigDefaults::is_default_log_level")]
	pub log_level: LogLevel,

	// When set, the interactive model selection is skipped
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub model: Option<String>,

	#[serde(default = "default_temperature")]
	pub temperature: f32,

	// Idle window after which continuing a conversation asks for confirmation
	#[serde(default = "default_idle_timeout_seconds")]
	pub idle_timeout_seconds: u64,

	#[serde(default = "default_system_message")]
	pub system_message: String,

	#[serde(
		default = "default_api_base_url",
		skip_serializing_if = "ConfigDefaults::is_default_api_base_url"
	)]
	pub api_base_url: String,

	#[serde(skip)]
	config_path: Option<PathBuf>,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			log_level: ConfigDefaults::DEFAULT_LOG_LEVEL,
			model: None,
			temperature: default_temperature(),
			idle_timeout_seconds: default_idle_timeout_seconds(),
			system_message: default_system_message(),
			api_base_url: default_api_base_url(),
			config_path: None,
		}
	}
}

/// Immutable per-process chat settings handed to the session controller.
/// Built once at startup from the loaded [`Config`] and the selected model.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSettings {
	pub model: String,
	pub temperature: f32,
	pub idle_timeout_seconds: u64,
	pub system_message: String,
}

impl Config {
	/// Get the global log level
	pub fn get_log_level(&self) -> LogLevel {
		self.log_level
	}

	/// Freeze the chat-relevant part of the configuration for a session run
	pub fn settings(&self, model: &str) -> ChatSettings {
		ChatSettings {
			model: model.to_string(),
			temperature: self.temperature,
			idle_timeout_seconds: self.idle_timeout_seconds,
			system_message: self.system_message.clone(),
		}
	}

	/// Settings for a chat run. Loading only warns about a broken file, so
	/// the configuration and the chosen model are checked again here.
	pub fn chat_settings(&self, model: &str) -> anyhow::Result<ChatSettings> {
		self.validate()?;
		crate::session::model_utils::validate_model(model)?;
		Ok(self.settings(model))
	}
}

// Logging macros for different log levels
// These macros check the current log level and only print if appropriate

thread_local! {
	static CURRENT_CONFIG: RefCell<Option<Config>> = const { RefCell::new(None) };
}

/// Set the current config for the thread (to be used by logging macros)
pub fn set_thread_config(config: &Config) {
	CURRENT_CONFIG.with(|c| {
		*c.borrow_mut() = Some(config.clone());
	});
}

/// Get the current config for the thread
pub fn with_thread_config<F, R>(f: F) -> Option<R>
where
	F: FnOnce(&Config) -> R,
{
	CURRENT_CONFIG.with(|c| (*c.borrow()).as_ref().map(f))
}

/// Info logging macro with automatic cyan coloring
/// Shows info messages when log level is Info OR Debug
#[macro_export]
macro_rules! log_info {
	($fmt:expr) => {
		if let Some(true) = $crate::config::with_thread_config(|config| config.get_log_level().is_info_enabled()) {
			use colored::Colorize;
			println!("{}", $fmt.cyan());
		}
	};
	($fmt:expr, $($arg:expr),*) => {
		if let Some(true) = $crate::config::with_thread_config(|config| config.get_log_level().is_info_enabled()) {
			use colored::Colorize;
			println!("{}", format!($fmt, $($arg),*).cyan());
		}
	};
}

/// Debug logging macro with automatic bright blue coloring
#[macro_export]
macro_rules! log_debug {
	($fmt:expr) => {
		if let Some(true) = $crate::config::with_thread_config(|config| config.get_log_level().is_debug_enabled()) {
			use colored::Colorize;
			println!("{}", $fmt.bright_blue());
		}
	};
	($fmt:expr, $($arg:expr),*) => {
		if let Some(true) = $crate::config::with_thread_config(|config| config.get_log_level().is_debug_enabled()) {
			use colored::Colorize;
			println!("{}", format!($fmt, $($arg),*).bright_blue());
		}
	};
}

/// Error logging macro with automatic bright red coloring
/// Always visible regardless of log level
#[macro_export]
macro_rules! log_error {
	($fmt:expr) => {{
		use colored::Colorize;
		eprintln!("{}", $fmt.bright_red());
	}};
	($fmt:expr, $($arg:expr),*) => {{
		use colored::Colorize;
		eprintln!("{}", format!($fmt, $($arg),*).bright_red());
	}};
}
