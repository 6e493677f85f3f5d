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


// Outer driver: one conversation after another until the user exits

use super::core::{ChatSession, SessionOutcome};
use super::super::display;
use super::super::io::ChatIo;
use crate::config::ChatSettings;
use crate::log_info;
use crate::session::{AiProvider, Clock};
use anyhow::Result;

/// Run conversations until one ends with `Exit`. A `StartOver` outcome
/// begins a fresh transcript, seeded with its rollover message if any.
pub async fn run_interactive_session(
	settings: &ChatSettings,
	provider: &dyn AiProvider,
	io: &mut dyn ChatIo,
	clock: &dyn Clock,
) -> Result<()> {
	let mut has_previous_chat = false;
	let mut rollover = None;

	loop {
		if has_previous_chat {
			io.display(&display::new_conversation_message());
		} else {
			io.display(&display::welcome_message());
		}

		let session = ChatSession::new(settings, rollover.take(), clock)?;
		log_info!(
			"Conversation started with model {} via {}",
			settings.model,
			provider.name()
		);

		match session.run(provider, io, clock).await? {
			SessionOutcome::Exit => break,
			SessionOutcome::StartOver { rollover: next } => {
				rollover = next;
				has_previous_chat = true;
			}
		}
	}

	io.display(&display::farewell());
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::Config;
	use crate::session::chat::testing::{ManualClock, ScriptedIo, ScriptedProvider};
	use crate::session::{FinishReason, Role};
	use std::rc::Rc;

	const START: u64 = 1_700_000_000;

	#[tokio::test]
	async fn test_exit_right_away() {
		let settings = Config::default().settings("gpt-3.5-turbo");
		let clock = ManualClock::new(START);
		let provider = ScriptedProvider::new(vec![]);
		let mut io = ScriptedIo::new(["#exit", ""]);

		run_interactive_session(&settings, &provider, &mut io, &clock)
			.await
			.unwrap();

		assert!(io.output_contains("You can now start chatting"));
		assert!(io.output_contains("Bye!"));
		assert!(!io.output_contains("A new conversation started"));
	}

	#[tokio::test]
	async fn test_restart_then_exit() {
		let settings = Config::default().settings("gpt-4");
		let clock = ManualClock::new(START);
		let provider = ScriptedProvider::new(vec![
			ScriptedProvider::reply("Hi there"),
			ScriptedProvider::reply("Fresh start"),
		]);
		let mut io = ScriptedIo::new([
			"Hello", "#startover", "y", "Hello again", "#exit", "y",
		]);

		run_interactive_session(&settings, &provider, &mut io, &clock)
			.await
			.unwrap();

		let requests = provider.requests();
		assert_eq!(requests.len(), 2);
		// The second conversation forgot the first one
		let second: Vec<&str> = requests[1].messages.iter().map(|m| m.content()).collect();
		assert_eq!(
			second,
			vec![settings.system_message.as_str(), "Hello again"]
		);
		assert!(io.output_contains("A new conversation started"));
	}

	#[tokio::test]
	async fn test_idle_rollover_is_replayed() {
		let settings = Config::default().settings("gpt-4");
		let clock = Rc::new(ManualClock::new(START));
		let provider = ScriptedProvider::new(vec![
			ScriptedProvider::reply("first answer"),
			ScriptedProvider::reply("pong"),
		]);
		// The user goes quiet for 400 seconds before every line they type
		let mut io = ScriptedIo::new(["first", "ping", "y", "#exit", "y"])
			.advancing_clock(clock.clone(), 400);

		run_interactive_session(&settings, &provider, &mut io, clock.as_ref())
			.await
			.unwrap();

		let requests = provider.requests();
		assert_eq!(requests.len(), 2);
		let second = &requests[1].messages;
		assert_eq!(second.len(), 2);
		assert_eq!(second[0].role(), Role::System);
		assert_eq!(second[1].role(), Role::User);
		assert_eq!(second[1].content(), "ping");
	}

	#[tokio::test]
	async fn test_truncation_then_exit() {
		let settings = Config::default().settings("gpt-4");
		let clock = ManualClock::new(START);
		let provider = ScriptedProvider::new(vec![
			ScriptedProvider::response("assistant", "too long", FinishReason::Length),
			ScriptedProvider::reply("ok"),
		]);
		let mut io = ScriptedIo::new(["essay please", "", "short please", "#exit", "y"]);

		run_interactive_session(&settings, &provider, &mut io, &clock)
			.await
			.unwrap();

		let requests = provider.requests();
		assert_eq!(requests.len(), 2);
		// Nothing from the truncated conversation is replayed
		assert_eq!(requests[1].messages.len(), 2);
		assert_eq!(requests[1].messages[1].content(), "short please");
	}

	#[tokio::test]
	async fn test_protocol_violation_aborts_the_driver() {
		let settings = Config::default().settings("gpt-4");
		let clock = ManualClock::new(START);
		let provider = ScriptedProvider::new(vec![ScriptedProvider::response(
			"system",
			"nope",
			FinishReason::Stop,
		)]);
		let mut io = ScriptedIo::new(["Hello"]);

		let result = run_interactive_session(&settings, &provider, &mut io, &clock).await;
		assert!(result.is_err());
		assert!(!io.output_contains("Bye!"));
	}
}
