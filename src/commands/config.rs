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

use anyhow::anyhow;
use clap::Args;

use chatgpt_cli::config::{Config, LogLevel};
use chatgpt_cli::session::model_utils::validate_model;

#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
	/// Set the default model so the selection prompt is skipped
	#[arg(long)]
	pub model: Option<String>,

	/// Set log level (none, info, debug)
	#[arg(long)]
	pub log_level: Option<String>,

	/// Set the idle timeout in seconds
	#[arg(long)]
	pub idle_timeout: Option<u64>,
}

// Handle the configuration command
pub fn execute(args: &ConfigArgs, mut config: Config) -> Result<(), anyhow::Error> {
	let mut modified = false;

	if let Some(model) = &args.model {
		validate_model(model)?;
		config.model = Some(model.clone());
		println!("Set default model to {}", model);
		modified = true;
	}

	if let Some(level) = &args.log_level {
		config.log_level = LogLevel::parse(level).ok_or_else(|| {
			anyhow!(
				"Invalid log level '{}'. Valid levels are: none, info, debug",
				level
			)
		})?;
		println!("Set log level to {}", level.to_lowercase());
		modified = true;
	}

	if let Some(seconds) = args.idle_timeout {
		config.idle_timeout_seconds = seconds;
		println!("Set idle timeout to {} seconds", seconds);
		modified = true;
	}

	// If no modifications were made, create a default config
	if !modified {
		let config_path = Config::create_default_config()?;
		println!("Configuration file: {}", config_path.display());
	} else {
		config.save()?;
		println!("Configuration saved successfully");
	}

	show_configuration(&config);
	Ok(())
}

fn show_configuration(config: &Config) {
	println!("\nCurrent configuration:");
	println!("Log level: {:?}", config.log_level);
	match &config.model {
		Some(model) => println!("Model: {}", model),
		None => println!("Model: Not set (asked at startup)"),
	}
	println!("Temperature: {}", config.temperature);
	println!("Idle timeout: {} seconds", config.idle_timeout_seconds);
	println!("System message: {}", config.system_message);
	println!("API base URL: {}", config.api_base_url);
}
