// Interactive I/O contract used by the input classifier and session controller

use anyhow::Result;

/// Blocking interactive input/output.
///
/// Every call blocks until the user answers; there is never more than one
/// outstanding prompt.
pub trait ChatIo {
	/// Read one line of input shown after `label`
	fn prompt_line(&mut self, label: &str) -> Result<String>;

	/// Ask a yes/no question. An empty answer means `default_yes`
	fn prompt_confirm(&mut self, label: &str, default_yes: bool) -> Result<bool>;

	/// Read newline-terminated lines until end-of-input (Ctrl+D)
	fn read_multiline(&mut self) -> Result<String>;

	/// Show text to the user
	fn display(&mut self, text: &str);
}

/// Interpret a yes/no answer. `None` means the answer was not understood.
pub fn parse_confirmation(answer: &str, default_yes: bool) -> Option<bool> {
	match answer.trim().to_lowercase().as_str() {
		"" => Some(default_yes),
		"y" | "yes" => Some(true),
		"n" | "no" => Some(false),
		_ => None,
	}
}
