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

mod commands;

use clap::{Parser, Subcommand};
use chatgpt_cli::config::Config;

#[derive(Parser)]
#[command(name = "chatgpt-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Chat with OpenAI models from your terminal")]
struct CliArgs {
	#[command(subcommand)]
	command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
	/// Start an interactive chat (the default)
	Chat(commands::ChatArgs),

	/// Update the configuration file or create a default one
	Config(commands::ConfigArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), anyhow::Error> {
	let args = CliArgs::parse();

	// Load configuration
	let config = Config::load()?;

	match args.command {
		Some(Commands::Config(config_args)) => commands::config::execute(&config_args, config),
		Some(Commands::Chat(chat_args)) => commands::chat::execute(&chat_args, &config).await,
		None => commands::chat::execute(&commands::ChatArgs::default(), &config).await,
	}
}
