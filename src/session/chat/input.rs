// User input classification

use super::commands::{EXIT_COMMAND, MULTILINE_COMMAND, START_OVER_COMMAND};
use super::display;
use super::io::ChatIo;
use crate::log_debug;
use anyhow::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedInput {
	/// Ordinary message text to send
	Content(String),
	/// Exit token typed and confirmed
	ExitRequested,
	/// Start-over token typed and confirmed
	RestartRequested,
	/// Blank input or a declined confirmation; ask again
	Retry,
}

/// Interpret one raw line. Control tokens are matched exactly and always
/// confirmed; multiline mode reads until end-of-input and is never reclassified.
pub fn classify(raw: &str, io: &mut dyn ChatIo) -> Result<ClassifiedInput> {
	if raw.trim().is_empty() {
		return Ok(ClassifiedInput::Retry);
	}

	match raw {
		EXIT_COMMAND => {
			if io.prompt_confirm(&display::exit_confirmation(), true)? {
				Ok(ClassifiedInput::ExitRequested)
			} else {
				Ok(ClassifiedInput::Retry)
			}
		}
		START_OVER_COMMAND => {
			if io.prompt_confirm(&display::start_over_confirmation(), true)? {
				Ok(ClassifiedInput::RestartRequested)
			} else {
				Ok(ClassifiedInput::Retry)
			}
		}
		MULTILINE_COMMAND => {
			io.display(&display::multiline_notice());
			let text = io.read_multiline()?;
			if text.trim().is_empty() {
				Ok(ClassifiedInput::Retry)
			} else {
				Ok(ClassifiedInput::Content(text))
			}
		}
		_ => Ok(ClassifiedInput::Content(raw.to_string())),
	}
}

/// Prompt until the input is something other than `Retry`
pub fn read_user_input(io: &mut dyn ChatIo) -> Result<ClassifiedInput> {
	let label = display::user_label();
	loop {
		let raw = io.prompt_line(&label)?;
		match classify(&raw, io)? {
			ClassifiedInput::Retry => {
				log_debug!("Input needs another prompt");
				continue;
			}
			classified => return Ok(classified),
		}
	}
}
