// Scripted collaborators for session tests

use super::io::{parse_confirmation, ChatIo};
use crate::credentials::SecretPrompt;
use crate::session::providers::ProviderExchange;
use crate::session::{AiProvider, Clock, FinishReason, Message, ProviderResponse, TokenUsage};
use anyhow::{anyhow, Result};
use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Mutex;

/// Answers prompts from a fixed script and records everything shown
pub struct ScriptedIo {
	answers: VecDeque<String>,
	multiline: VecDeque<String>,
	secrets: VecDeque<String>,
	prompts: Vec<String>,
	confirmations: Vec<String>,
	output: Vec<String>,
	clock: Option<(Rc<ManualClock>, u64)>,
}

impl ScriptedIo {
	/// `answers` feed both line prompts and confirmations, in order
	pub fn new<I, S>(answers: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			answers: answers.into_iter().map(Into::into).collect(),
			multiline: VecDeque::new(),
			secrets: VecDeque::new(),
			prompts: Vec::new(),
			confirmations: Vec::new(),
			output: Vec::new(),
			clock: None,
		}
	}

	pub fn with_multiline<I, S>(mut self, blocks: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.multiline = blocks.into_iter().map(Into::into).collect();
		self
	}

	pub fn with_secrets<I, S>(mut self, secrets: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.secrets = secrets.into_iter().map(Into::into).collect();
		self
	}

	/// Move `clock` forward by `seconds` before every answered line prompt
	pub fn advancing_clock(mut self, clock: Rc<ManualClock>, seconds: u64) -> Self {
		self.clock = Some((clock, seconds));
		self
	}

	/// Take the next scripted answer without going through a prompt
	pub fn next_line(&mut self) -> String {
		self.answers.pop_front().unwrap_or_default()
	}

	pub fn prompts(&self) -> &[String] {
		&self.prompts
	}

	pub fn confirmations(&self) -> &[String] {
		&self.confirmations
	}

	pub fn remaining(&self) -> usize {
		self.answers.len()
	}

	pub fn output_contains(&self, needle: &str) -> bool {
		self.output.iter().any(|line| line.contains(needle))
	}

	fn pop_answer(&mut self, label: &str) -> Result<String> {
		self.answers
			.pop_front()
			.ok_or_else(|| anyhow!("Script exhausted at prompt: {}", label))
	}
}

impl ChatIo for ScriptedIo {
	fn prompt_line(&mut self, label: &str) -> Result<String> {
		self.prompts.push(label.to_string());
		if let Some((clock, seconds)) = &self.clock {
			clock.advance(*seconds);
		}
		self.pop_answer(label)
	}

	fn prompt_confirm(&mut self, label: &str, default_yes: bool) -> Result<bool> {
		self.confirmations.push(label.to_string());
		let answer = self.pop_answer(label)?;
		parse_confirmation(&answer, default_yes)
			.ok_or_else(|| anyhow!("Scripted confirmation '{}' is not y/n", answer))
	}

	fn read_multiline(&mut self) -> Result<String> {
		self.multiline
			.pop_front()
			.ok_or_else(|| anyhow!("No scripted multiline block"))
	}

	fn display(&mut self, text: &str) {
		self.output.push(text.to_string());
	}
}

impl SecretPrompt for ScriptedIo {
	fn prompt_secret(&mut self, label: &str) -> Result<String> {
		self.prompts.push(label.to_string());
		self.secrets
			.pop_front()
			.ok_or_else(|| anyhow!("No scripted secret for: {}", label))
	}
}

/// Clock that only moves when told to
pub struct ManualClock {
	now: Cell<u64>,
}

impl ManualClock {
	pub fn new(now: u64) -> Self {
		Self { now: Cell::new(now) }
	}

	pub fn advance(&self, seconds: u64) {
		self.now.set(self.now.get() + seconds);
	}
}

impl Clock for ManualClock {
	fn now(&self) -> u64 {
		self.now.get()
	}
}

/// One request as the provider saw it
#[derive(Debug, Clone)]
pub struct RecordedRequest {
	pub messages: Vec<Message>,
	pub model: String,
	pub temperature: f32,
}

/// Replies from a queue and records every request
pub struct ScriptedProvider {
	replies: Mutex<VecDeque<std::result::Result<ProviderResponse, String>>>,
	requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedProvider {
	pub fn new(replies: Vec<std::result::Result<ProviderResponse, String>>) -> Self {
		Self {
			replies: Mutex::new(replies.into()),
			requests: Mutex::new(Vec::new()),
		}
	}

	pub fn reply(content: &str) -> std::result::Result<ProviderResponse, String> {
		Self::response("assistant", content, FinishReason::Stop)
	}

	/// Assistant reply that carries a provider exchange with token usage
	pub fn reply_with_usage(
		content: &str,
		usage: TokenUsage,
	) -> std::result::Result<ProviderResponse, String> {
		let exchange = ProviderExchange::new(
			serde_json::json!({ "messages": [] }),
			serde_json::json!({}),
			Some(usage),
			"scripted",
		);
		Self::response("assistant", content, FinishReason::Stop).map(|response| ProviderResponse {
			exchange: Some(exchange),
			..response
		})
	}

	pub fn response(
		role: &str,
		content: &str,
		finish_reason: FinishReason,
	) -> std::result::Result<ProviderResponse, String> {
		Ok(ProviderResponse {
			role: role.to_string(),
			content: content.to_string(),
			finish_reason,
			exchange: None,
		})
	}

	pub fn failure(message: &str) -> std::result::Result<ProviderResponse, String> {
		Err(message.to_string())
	}

	pub fn requests(&self) -> Vec<RecordedRequest> {
		self.requests.lock().unwrap().clone()
	}
}

#[async_trait::async_trait]
impl AiProvider for ScriptedProvider {
	fn name(&self) -> &str {
		"scripted"
	}

	async fn chat_completion(
		&self,
		messages: &[Message],
		model: &str,
		temperature: f32,
	) -> Result<ProviderResponse> {
		self.requests.lock().unwrap().push(RecordedRequest {
			messages: messages.to_vec(),
			model: model.to_string(),
			temperature,
		});

		match self.replies.lock().unwrap().pop_front() {
			Some(Ok(response)) => Ok(response),
			Some(Err(message)) => Err(anyhow!(message)),
			None => Err(anyhow!("No scripted reply left")),
		}
	}
}
