// Presentation strings shared by the chat loop

use super::commands::{EXIT_COMMAND, MULTILINE_COMMAND, START_OVER_COMMAND};
use colored::Colorize;

pub const WARNING_PREFIX: &str = "🔺";
pub const INFO_PREFIX: &str = "🔹";
pub const BYE_PREFIX: &str = "👋";

pub fn user_label() -> String {
	format!("{} 😃", "You".yellow().bold())
}

pub fn bot_label() -> String {
	format!("{} 🤖", "Bot".bright_blue().bold())
}

pub fn welcome_message() -> String {
	format!(
		"{} You can now start chatting with the bot.\nType '{}' to exit. Type '{}' to start a new conversation (a new conversation will lose all previous context). Type '{}' to enter multiline mode.",
		INFO_PREFIX, EXIT_COMMAND, START_OVER_COMMAND, MULTILINE_COMMAND
	)
}

pub fn new_conversation_message() -> String {
	format!(
		"{} A new conversation started. The bot forgot all previous context.",
		INFO_PREFIX
	)
}

pub fn exit_confirmation() -> String {
	format!("{} Do you really want to exit?", WARNING_PREFIX)
}

pub fn start_over_confirmation() -> String {
	format!(
		"{} A new conversation will lose all previous context. Do you really want to start a new conversation?",
		WARNING_PREFIX
	)
}

pub fn multiline_notice() -> String {
	"Multiline mode enabled. Press CTRL+D to finish.".to_string()
}

pub fn idle_timeout_confirmation(idle_timeout_seconds: u64, last_timestamp: u64) -> String {
	let last_seen = chrono::DateTime::from_timestamp(last_timestamp as i64, 0)
		.map(|utc| {
			utc.with_timezone(&chrono::Local)
				.format("%H:%M:%S")
				.to_string()
		})
		.unwrap_or_else(|| "unknown".to_string());
	format!(
		"{} The previous conversation has been idle for more than {} seconds (last message at {}). Do you want to start a new conversation?",
		WARNING_PREFIX, idle_timeout_seconds, last_seen
	)
}

pub fn length_exceeded_acknowledgment() -> String {
	format!(
		"{} The total token count exceeds the maximum. You must start a new conversation. Press Enter to continue",
		WARNING_PREFIX
	)
}

pub fn bot_reply(content: &str) -> String {
	format!("{}: {}", bot_label(), content)
}

pub fn farewell() -> String {
	format!("{} Bye!", BYE_PREFIX)
}
