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


use anyhow::{anyhow, Result};

use super::Config;
use crate::session::model_utils::validate_model;

impl Config {
	/// Validate the configuration for common issues
	pub fn validate(&self) -> Result<()> {
		if let Some(model) = &self.model {
			validate_model(model)?;
		}

		self.validate_temperature()?;
		self.validate_idle_timeout()?;

		if self.system_message.trim().is_empty() {
			return Err(anyhow!("System message cannot be empty"));
		}

		if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://") {
			return Err(anyhow!(
				"Invalid API base URL: '{}'. It must start with http:// or https://",
				self.api_base_url
			));
		}

		Ok(())
	}

	pub fn validate_temperature(&self) -> Result<()> {
		if !(0.0..=2.0).contains(&self.temperature) {
			return Err(anyhow!(
				"Temperature out of range: {}. Allowed range: 0.0 to 2.0",
				self.temperature
			));
		}
		Ok(())
	}

	pub fn validate_idle_timeout(&self) -> Result<()> {
		if self.idle_timeout_seconds == 0 {
			return Err(anyhow!(
				"Idle timeout cannot be 0. Use a positive number of seconds."
			));
		}
		Ok(())
	}
}
