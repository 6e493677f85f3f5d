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

use anyhow::Result;
use clap::Args;

use chatgpt_cli::config::{set_thread_config, Config, ConfigDefaults};
use chatgpt_cli::credentials::{setup_api_key, OPENAI_API_KEY_ENV};
use chatgpt_cli::directories;
use chatgpt_cli::session::chat::{run_interactive_session, InterruptGuard, TerminalIo};
use chatgpt_cli::session::model_utils::select_model;
use chatgpt_cli::session::providers::openai::OpenAiProvider;
use chatgpt_cli::session::SystemClock;
use chatgpt_cli::{log_debug, log_info};

#[derive(Args, Debug, Default)]
pub struct ChatArgs {
	/// Use a specific model instead of asking (gpt-3.5-turbo or gpt-4)
	#[arg(long)]
	pub model: Option<String>,
}

pub async fn execute(args: &ChatArgs, config: &Config) -> Result<()> {
	set_thread_config(config);
	let _interrupts = InterruptGuard::install()?;

	let mut io = TerminalIo::new()?;

	let key_file = directories::get_api_key_file_path()?;
	let api_key = setup_api_key(&mut io, std::env::var(OPENAI_API_KEY_ENV).ok(), &key_file)?;

	// Command line beats config file; with neither, the user picks
	let model = match args.model.as_ref().or(config.model.as_ref()) {
		Some(model) => model.clone(),
		None => select_model(&mut io, ConfigDefaults::DEFAULT_MODEL)?,
	};
	log_debug!("Using model {}", model);

	let settings = config.chat_settings(&model)?;

	let provider = OpenAiProvider::new(api_key, config.api_base_url.clone());
	log_info!("Chat endpoint: {}", config.api_base_url);

	run_interactive_session(&settings, &provider, &mut io, &SystemClock).await
}
