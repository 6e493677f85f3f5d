// Control-token completion and hints for rustyline
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::{Hinter, HistoryHinter};
use rustyline::validate::Validator;
use rustyline::Helper;
use std::borrow::Cow::{self, Borrowed, Owned};
use colored::*;

const COMMAND_PREFIX: char = '#';

#[derive(Default)]
struct CommandCompleter {
	commands: Vec<String>,
}

impl CommandCompleter {
	fn new() -> Self {
		let commands = crate::session::chat::COMMANDS.iter().map(|&s| s.to_string()).collect();
		Self { commands }
	}

	fn matching(&self, line: &str) -> impl Iterator<Item = &String> {
		let line = line.to_string();
		self.commands.iter().filter(move |cmd| cmd.starts_with(&line))
	}
}

impl Completer for CommandCompleter {
	type Candidate = Pair;

	fn complete(
		&self,
		line: &str,
		_pos: usize,
		_ctx: &rustyline::Context<'_>,
	) -> Result<(usize, Vec<Self::Candidate>), ReadlineError> {
		// Only complete control tokens
		if !line.starts_with(COMMAND_PREFIX) {
			return Ok((0, vec![]));
		}

		let candidates: Vec<Pair> = self
			.matching(line)
			.map(|cmd| Pair {
				display: cmd.clone(),
				replacement: cmd.clone(),
			})
			.collect();

		Ok((0, candidates))
	}
}

impl Hinter for CommandCompleter {
	type Hint = String;

	fn hint(&self, line: &str, _pos: usize, _ctx: &rustyline::Context<'_>) -> Option<Self::Hint> {
		if line.is_empty() || !line.starts_with(COMMAND_PREFIX) {
			return None;
		}

		self.matching(line)
			.next()
			.map(|cmd| cmd[line.len()..].to_string())
	}
}

impl Highlighter for CommandCompleter {
	fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
		// Exact control tokens are shown in green
		if line.starts_with(COMMAND_PREFIX) && self.commands.iter().any(|cmd| cmd == line) {
			Owned(line.green().to_string())
		} else {
			Borrowed(line)
		}
	}

	fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
		Owned(hint.bright_black().to_string())
	}
}

impl Validator for CommandCompleter {}

// Helper for rustyline
pub struct CommandHelper {
	completer: CommandCompleter,
	hinter: HistoryHinter,
}

impl CommandHelper {
	pub fn new() -> Self {
		Self {
			completer: CommandCompleter::new(),
			hinter: HistoryHinter {},
		}
	}
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
	type Candidate = Pair;

	fn complete(
		&self,
		line: &str,
		pos: usize,
		ctx: &rustyline::Context<'_>,
	) -> Result<(usize, Vec<Self::Candidate>), ReadlineError> {
		self.completer.complete(line, pos, ctx)
	}
}

impl Hinter for CommandHelper {
	type Hint = String;

	fn hint(&self, line: &str, pos: usize, ctx: &rustyline::Context<'_>) -> Option<Self::Hint> {
		if line.starts_with(COMMAND_PREFIX) {
			self.completer.hint(line, pos, ctx)
		} else {
			self.hinter.hint(line, pos, ctx)
		}
	}
}

impl Highlighter for CommandHelper {
	fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
		self.completer.highlight(line, pos)
	}

	fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
		self.completer.highlight_hint(hint)
	}
}

impl Validator for CommandHelper {}
