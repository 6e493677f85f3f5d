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


// Conversation state machine

use super::super::display;
use super::super::input::{read_user_input, ClassifiedInput};
use super::super::io::ChatIo;
use crate::config::ChatSettings;
use crate::session::{AiProvider, ChatError, Clock, Message, Role, Transcript};
use crate::{log_debug, log_info};
use anyhow::{bail, Result};

/// How a conversation ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
	Exit,
	/// Start a fresh conversation; an idle-timeout restart carries the
	/// message that triggered it so it can seed the next transcript
	StartOver { rollover: Option<Message> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
	AwaitingInput,
	AwaitingReply,
	Ended(SessionOutcome),
}

/// Owns the transcript of one conversation and drives it until it ends
pub struct ChatSession<'a> {
	settings: &'a ChatSettings,
	transcript: Transcript,
	state: SessionState,
}

impl<'a> ChatSession<'a> {
	/// Seed a new conversation. A rollover message is already pending a
	/// reply, so such a session starts in `AwaitingReply`.
	pub fn new(
		settings: &'a ChatSettings,
		rollover: Option<Message>,
		clock: &dyn Clock,
	) -> Result<Self> {
		let system = Message::new(Role::System, settings.system_message.as_str(), clock.now());
		let transcript = Transcript::new(system, rollover)?;
		let state = if transcript.awaiting_reply() {
			SessionState::AwaitingReply
		} else {
			SessionState::AwaitingInput
		};

		Ok(Self {
			settings,
			transcript,
			state,
		})
	}

	pub fn transcript(&self) -> &Transcript {
		&self.transcript
	}

	pub fn state(&self) -> &SessionState {
		&self.state
	}

	/// True when the previous turn is older than the idle timeout.
	/// The fixed system message never counts as a turn.
	pub fn is_idle(&self, now: u64) -> bool {
		let last = self.transcript.last();
		last.role() != Role::System
			&& now.saturating_sub(last.timestamp()) > self.settings.idle_timeout_seconds
	}

	/// Apply one classified input while awaiting input
	pub fn accept_input(
		&mut self,
		input: ClassifiedInput,
		io: &mut dyn ChatIo,
		clock: &dyn Clock,
	) -> Result<()> {
		if self.state != SessionState::AwaitingInput {
			bail!("Input accepted in state {:?}", self.state);
		}

		match input {
			ClassifiedInput::Retry => Ok(()),
			ClassifiedInput::ExitRequested => {
				self.end(SessionOutcome::Exit);
				Ok(())
			}
			ClassifiedInput::RestartRequested => {
				self.end(SessionOutcome::StartOver { rollover: None });
				Ok(())
			}
			ClassifiedInput::Content(text) => {
				let now = clock.now();

				if self.is_idle(now) {
					let label = display::idle_timeout_confirmation(
						self.settings.idle_timeout_seconds,
						self.transcript.last().timestamp(),
					);
					if io.prompt_confirm(&label, true)? {
						// The dying transcript never sees this message
						let rollover = Message::new(Role::User, text, now);
						self.end(SessionOutcome::StartOver {
							rollover: Some(rollover),
						});
						return Ok(());
					}
					log_debug!("Idle restart declined, continuing the conversation");
				}

				self.transcript.push(Message::new(Role::User, text, now))?;
				self.state = SessionState::AwaitingReply;
				Ok(())
			}
		}
	}

	/// Send the transcript to the provider and append the validated reply
	pub async fn request_reply(
		&mut self,
		provider: &dyn AiProvider,
		io: &mut dyn ChatIo,
		clock: &dyn Clock,
	) -> Result<()> {
		if self.state != SessionState::AwaitingReply {
			bail!("Reply requested in state {:?}", self.state);
		}

		// Transport failures propagate as-is; there is no retry
		let response = provider
			.chat_completion(
				self.transcript.messages(),
				&self.settings.model,
				self.settings.temperature,
			)
			.await?;

		if let Some(exchange) = &response.exchange {
			log_debug!("{}", exchange.summary());
		}

		match response.role.parse::<Role>() {
			Ok(Role::Assistant) => {}
			_ => {
				return Err(ChatError::ProtocolViolation {
					role: response.role,
				}
				.into())
			}
		}

		let reply = Message::new(Role::Assistant, response.content, clock.now());
		io.display(&display::bot_reply(reply.content()));
		self.transcript.push(reply)?;

		if response.finish_reason.is_truncated() {
			// Oversized context must not be replayed, so nothing rolls over
			io.prompt_line(&display::length_exceeded_acknowledgment())?;
			self.end(SessionOutcome::StartOver { rollover: None });
		} else {
			self.state = SessionState::AwaitingInput;
		}

		Ok(())
	}

	/// Advance the state machine by one transition
	pub async fn step(
		&mut self,
		provider: &dyn AiProvider,
		io: &mut dyn ChatIo,
		clock: &dyn Clock,
	) -> Result<()> {
		match self.state {
			SessionState::AwaitingInput => {
				let input = read_user_input(io)?;
				self.accept_input(input, io, clock)
			}
			SessionState::AwaitingReply => self.request_reply(provider, io, clock).await,
			SessionState::Ended(_) => Ok(()),
		}
	}

	/// Drive the conversation until it ends
	pub async fn run(
		mut self,
		provider: &dyn AiProvider,
		io: &mut dyn ChatIo,
		clock: &dyn Clock,
	) -> Result<SessionOutcome> {
		loop {
			if let SessionState::Ended(outcome) = self.state {
				return Ok(outcome);
			}
			self.step(provider, io, clock).await?;
			log_debug!("Session state: {:?}", self.state);
		}
	}

	fn end(&mut self, outcome: SessionOutcome) {
		log_info!(
			"Conversation ended after {} messages: {:?}",
			self.transcript.len(),
			outcome
		);
		self.state = SessionState::Ended(outcome);
	}
}
