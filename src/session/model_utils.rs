// Model allow-list and interactive model selection

use super::chat::display::INFO_PREFIX;
use super::chat::ChatIo;
use super::error::ChatError;
use anyhow::Result;
use colored::Colorize;

pub const GPT_3_5_TURBO: &str = "gpt-3.5-turbo";
pub const GPT_4: &str = "gpt-4";

/// Models the chat client accepts
pub const ALLOWED_MODELS: [&str; 2] = [GPT_3_5_TURBO, GPT_4];

pub fn is_allowed_model(model: &str) -> bool {
	ALLOWED_MODELS.contains(&model)
}

pub fn validate_model(model: &str) -> Result<(), ChatError> {
	if is_allowed_model(model) {
		Ok(())
	} else {
		Err(ChatError::UnsupportedModel {
			model: model.to_string(),
			supported: ALLOWED_MODELS.join(", "),
		})
	}
}

/// Ask the user which model to use. An empty answer picks `default`,
/// anything outside the allow-list asks again.
pub fn select_model(io: &mut dyn ChatIo, default: &str) -> Result<String> {
	let label = format!(
		"{} Please select the model you want to use [{}] ({})",
		INFO_PREFIX,
		ALLOWED_MODELS.join("/"),
		default
	);

	let model = loop {
		let answer = io.prompt_line(&label)?;
		let answer = answer.trim();
		if answer.is_empty() {
			break default.to_string();
		}
		if is_allowed_model(answer) {
			break answer.to_string();
		}
		io.display(&"Please select one of the available options".red().to_string());
	};

	io.display(&format!(
		"{} You selected {}.",
		INFO_PREFIX,
		model.bold().cyan()
	));
	Ok(model)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::session::chat::testing::ScriptedIo;

	#[test]
	fn test_allow_list() {
		assert!(is_allowed_model("gpt-4"));
		assert!(is_allowed_model("gpt-3.5-turbo"));
		assert!(!is_allowed_model("gpt-4o"));
		assert!(validate_model("gpt-4-32k").is_err());
	}

	#[test]
	fn test_select_model_default() {
		let mut io = ScriptedIo::new(["   "]);
		assert_eq!(select_model(&mut io, GPT_4).unwrap(), "gpt-4");
		assert!(io.output_contains("You selected"));
	}

	#[test]
	fn test_select_model_reasks_on_unknown() {
		let mut io = ScriptedIo::new(["claude", "gpt-3.5-turbo"]);
		assert_eq!(select_model(&mut io, GPT_4).unwrap(), "gpt-3.5-turbo");
		assert_eq!(io.prompts().len(), 2);
		assert!(io.output_contains("Please select one of the available options"));
	}
}
