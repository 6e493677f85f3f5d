// Terminal implementation of the interactive I/O contract

use super::commands::EXIT_COMMAND;
use super::io::{parse_confirmation, ChatIo};
use crate::credentials::SecretPrompt;
use crate::session::chat_helper::CommandHelper;
use anyhow::Result;
use colored::Colorize;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{CompletionType, Config as RustylineConfig, EditMode, Editor};
use std::io::{stdout, Write};

pub struct TerminalIo {
	editor: Editor<CommandHelper, DefaultHistory>,
	// Consecutive end-of-input signals at line prompts; a closed stdin must not loop forever
	eof_streak: u8,
}

impl TerminalIo {
	pub fn new() -> Result<Self> {
		let config = RustylineConfig::builder()
			.completion_type(CompletionType::List)
			.edit_mode(EditMode::Emacs)
			.auto_add_history(false)
			.bell_style(rustyline::config::BellStyle::None)
			.build();

		let mut editor = Editor::with_config(config)?;
		editor.set_helper(Some(CommandHelper::new()));

		Ok(Self {
			editor,
			eof_streak: 0,
		})
	}

	fn readline(&mut self, prompt: &str) -> Result<Option<String>> {
		match self.editor.readline(prompt) {
			Ok(line) => {
				self.eof_streak = 0;
				Ok(Some(line))
			}
			// Ctrl+C never terminates; the line is dropped
			Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
			Err(ReadlineError::Eof) => {
				self.eof_streak += 1;
				if self.eof_streak > 2 {
					return Err(anyhow::anyhow!("Input stream closed"));
				}
				Ok(None)
			}
			Err(err) => Err(err.into()),
		}
	}
}

impl ChatIo for TerminalIo {
	fn prompt_line(&mut self, label: &str) -> Result<String> {
		match self.readline(&format!("{}: ", label))? {
			Some(line) => {
				if !line.trim().is_empty() {
					let _ = self.editor.add_history_entry(line.as_str());
				}
				Ok(line)
			}
			// Ctrl+D at a prompt asks to leave
			None => {
				println!();
				Ok(EXIT_COMMAND.to_string())
			}
		}
	}

	fn prompt_confirm(&mut self, label: &str, default_yes: bool) -> Result<bool> {
		let choices = format!("[y/n] ({})", if default_yes { "y" } else { "n" });
		let prompt = format!("{} {}: ", label, choices.magenta().bold());

		loop {
			let answer = match self.readline(&prompt)? {
				Some(answer) => answer,
				None => return Ok(default_yes),
			};
			if let Some(confirmed) = parse_confirmation(&answer, default_yes) {
				return Ok(confirmed);
			}
			println!("{}", "Please enter Y or N".red());
		}
	}

	fn read_multiline(&mut self) -> Result<String> {
		let mut text = String::new();
		loop {
			match self.editor.readline("") {
				Ok(line) => {
					text.push_str(&line);
					text.push('\n');
				}
				Err(ReadlineError::Eof) => break,
				// Ctrl+C inside multiline mode only discards the current line
				Err(ReadlineError::Interrupted) => continue,
				Err(err) => return Err(err.into()),
			}
		}
		self.eof_streak = 0;
		Ok(text)
	}

	fn display(&mut self, text: &str) {
		println!("{}", text);
	}
}

impl SecretPrompt for TerminalIo {
	fn prompt_secret(&mut self, label: &str) -> Result<String> {
		print!("{}: ", label);
		stdout().flush()?;

		terminal::enable_raw_mode()?;
		let secret = read_hidden_line();
		terminal::disable_raw_mode()?;
		println!();

		secret
	}
}

// Read keys without echo until Enter
fn read_hidden_line() -> Result<String> {
	let mut secret = String::new();
	loop {
		if let Event::Key(KeyEvent {
			code,
			modifiers,
			kind,
			..
		}) = event::read()?
		{
			if kind != KeyEventKind::Press {
				continue;
			}
			match code {
				KeyCode::Enter => break,
				KeyCode::Backspace => {
					secret.pop();
				}
				KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => secret.push(c),
				_ => {}
			}
		}
	}
	Ok(secret)
}
