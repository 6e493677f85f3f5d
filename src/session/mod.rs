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


// Session module: conversation data model shared by the chat loop and providers

pub mod chat; // Chat session logic
mod chat_helper; // Chat command completion
pub mod error; // Error taxonomy
pub mod model_utils; // Model allow-list and selection
pub mod providers; // Completion collaborator abstraction

pub use error::ChatError;
pub use providers::{AiProvider, FinishReason, ProviderResponse, TokenUsage};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
	System,
	User,
	Assistant,
}

impl Role {
	pub fn as_str(&self) -> &'static str {
		match self {
			Role::System => "system",
			Role::User => "user",
			Role::Assistant => "assistant",
		}
	}
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Role {
	type Err = ChatError;

	// Wire roles are only trusted after this parse; anything unknown is a contract violation
	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value {
			"system" => Ok(Role::System),
			"user" => Ok(Role::User),
			"assistant" => Ok(Role::Assistant),
			other => Err(ChatError::ProtocolViolation {
				role: other.to_string(),
			}),
		}
	}
}

/// One transcript entry. Immutable once created.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Message {
	role: Role,
	content: String,
	timestamp: u64,
}

impl Message {
	pub fn new(role: Role, content: impl Into<String>, timestamp: u64) -> Self {
		Self {
			role,
			content: content.into(),
			timestamp,
		}
	}

	pub fn role(&self) -> Role {
		self.role
	}

	pub fn content(&self) -> &str {
		&self.content
	}

	pub fn timestamp(&self) -> u64 {
		self.timestamp
	}
}

/// Ordered message history for one conversation.
///
/// Always starts with the system message and keeps the shape
/// `SYSTEM, (USER, ASSISTANT)*` with at most one trailing unanswered USER.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
	messages: Vec<Message>,
}

impl Transcript {
	/// Seed a transcript with the system message and an optional rollover message
	pub fn new(system: Message, rollover: Option<Message>) -> Result<Self, ChatError> {
		if system.role() != Role::System {
			return Err(ChatError::TranscriptOrder {
				last: "start of transcript",
				attempted: role_label(system.role()),
			});
		}

		let mut transcript = Self {
			messages: vec![system],
		};
		if let Some(message) = rollover {
			transcript.push(message)?;
		}
		Ok(transcript)
	}

	/// Append a message, rejecting anything that breaks the alternation
	pub fn push(&mut self, message: Message) -> Result<(), ChatError> {
		let last = self.last().role();
		let allowed = matches!(
			(last, message.role()),
			(Role::System, Role::User) | (Role::Assistant, Role::User) | (Role::User, Role::Assistant)
		);
		if !allowed {
			return Err(ChatError::TranscriptOrder {
				last: role_label(last),
				attempted: role_label(message.role()),
			});
		}
		self.messages.push(message);
		Ok(())
	}

	pub fn messages(&self) -> &[Message] {
		&self.messages
	}

	pub fn last(&self) -> &Message {
		// Never empty: construction always seeds the system message
		&self.messages[self.messages.len() - 1]
	}

	pub fn len(&self) -> usize {
		self.messages.len()
	}

	/// True when the last message is a USER message still waiting for a reply
	pub fn awaiting_reply(&self) -> bool {
		self.last().role() == Role::User
	}
}

fn role_label(role: Role) -> &'static str {
	match role {
		Role::System => "SYSTEM",
		Role::User => "USER",
		Role::Assistant => "ASSISTANT",
	}
}

/// Source of "now" in whole seconds since the Unix epoch
pub trait Clock {
	fn now(&self) -> u64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
	fn now(&self) -> u64 {
		current_timestamp()
	}
}

pub fn current_timestamp() -> u64 {
	SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.unwrap_or_default()
		.as_secs()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn system() -> Message {
		Message::new(Role::System, "You are a helpful assistant.", 0)
	}

	#[test]
	fn test_role_wire_names() {
		assert_eq!("assistant".parse::<Role>().unwrap(), Role::Assistant);
		assert_eq!("user".parse::<Role>().unwrap(), Role::User);
		assert_eq!(Role::System.to_string(), "system");
		assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");

		match "tool".parse::<Role>() {
			Err(ChatError::ProtocolViolation { role }) => assert_eq!(role, "tool"),
			other => panic!("unexpected parse result: {:?}", other),
		}
	}

	#[test]
	fn test_transcript_seeding() {
		let transcript = Transcript::new(system(), None).unwrap();
		assert_eq!(transcript.len(), 1);
		assert_eq!(transcript.last().role(), Role::System);
		assert!(!transcript.awaiting_reply());

		let rollover = Message::new(Role::User, "ping", 10);
		let transcript = Transcript::new(system(), Some(rollover.clone())).unwrap();
		assert_eq!(transcript.messages(), &[system(), rollover]);
		assert!(transcript.awaiting_reply());
	}

	#[test]
	fn test_transcript_rejects_bad_seed() {
		let not_system = Message::new(Role::User, "hi", 0);
		assert!(Transcript::new(not_system, None).is_err());

		let assistant_rollover = Message::new(Role::Assistant, "hi", 0);
		assert!(Transcript::new(system(), Some(assistant_rollover)).is_err());
	}

	#[test]
	fn test_transcript_alternation() {
		let mut transcript = Transcript::new(system(), None).unwrap();

		assert!(transcript.push(Message::new(Role::Assistant, "early", 1)).is_err());
		transcript.push(Message::new(Role::User, "one", 1)).unwrap();
		assert!(transcript.push(Message::new(Role::User, "two", 2)).is_err());
		transcript.push(Message::new(Role::Assistant, "reply", 3)).unwrap();
		assert!(transcript.push(Message::new(Role::System, "again", 4)).is_err());
		transcript.push(Message::new(Role::User, "three", 5)).unwrap();

		assert_eq!(transcript.len(), 4);
		assert_eq!(transcript.messages()[0].role(), Role::System);
	}
}
