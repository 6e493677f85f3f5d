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


use super::LogLevel;

/// Centralized default values for all configuration options
pub struct ConfigDefaults;

impl ConfigDefaults {
	pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::None;
	pub const DEFAULT_MODEL: &'static str = "gpt-4";
	pub const DEFAULT_TEMPERATURE: f32 = 0.5;
	pub const DEFAULT_IDLE_TIMEOUT_SECONDS: u64 = 300;
	pub const DEFAULT_SYSTEM_MESSAGE: &'static str =
		"You are a helpful assistant. Answer as concisely as possible.";
	pub const DEFAULT_API_BASE_URL: &'static str = "https://api.openai.com/v1";

	/// Check if a value matches the default
	pub fn is_default_log_level(value: &LogLevel) -> bool {
		matches!(value, LogLevel::None)
	}

	pub fn is_default_api_base_url(value: &str) -> bool {
		value == Self::DEFAULT_API_BASE_URL
	}
}

// serde default functions
pub(super) fn default_temperature() -> f32 {
	ConfigDefaults::DEFAULT_TEMPERATURE
}

pub(super) fn default_idle_timeout_seconds() -> u64 {
	ConfigDefaults::DEFAULT_IDLE_TIMEOUT_SECONDS
}

pub(super) fn default_system_message() -> String {
	ConfigDefaults::DEFAULT_SYSTEM_MESSAGE.to_string()
}

pub(super) fn default_api_base_url() -> String {
	ConfigDefaults::DEFAULT_API_BASE_URL.to_string()
}
