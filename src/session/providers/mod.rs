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


// Provider abstraction layer for the chat completion service

use crate::session::{current_timestamp, Message};
use anyhow::Result;
use serde::{Deserialize, Serialize};

pub mod openai;

pub use openai::OpenAiProvider;

/// Token usage reported by the completion service
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenUsage {
	pub prompt_tokens: u64,
	pub output_tokens: u64,
	pub total_tokens: u64,
	// Time spent on this API request
	#[serde(default)]
	pub request_time_ms: Option<u64>,
}

/// Raw request/response pair kept for debug logging
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ProviderExchange {
	pub request: serde_json::Value,
	pub response: serde_json::Value,
	pub timestamp: u64,
	pub usage: Option<TokenUsage>,
	pub provider: String,
}

impl ProviderExchange {
	pub fn new(
		request: serde_json::Value,
		response: serde_json::Value,
		usage: Option<TokenUsage>,
		provider: &str,
	) -> Self {
		Self {
			request,
			response,
			timestamp: current_timestamp(),
			usage,
			provider: provider.to_string(),
		}
	}

	/// One-line account of the exchange for debug output
	pub fn summary(&self) -> String {
		let messages = self
			.request
			.get("messages")
			.and_then(|m| m.as_array())
			.map_or(0, |m| m.len());
		match &self.usage {
			Some(usage) => format!(
				"{} exchange at {}: {} messages sent, {} prompt + {} output = {} tokens{}",
				self.provider,
				self.timestamp,
				messages,
				usage.prompt_tokens,
				usage.output_tokens,
				usage.total_tokens,
				usage
					.request_time_ms
					.map(|ms| format!(" in {} ms", ms))
					.unwrap_or_default()
			),
			None => format!(
				"{} exchange at {}: {} messages sent, no usage reported",
				self.provider, self.timestamp, messages
			),
		}
	}
}

/// Why the service stopped generating
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinishReason {
	Stop,
	/// The reply was cut off by the model's output-length limit
	Length,
	ContentFilter,
	Other(String),
	Unspecified,
}

impl FinishReason {
	pub fn from_wire(value: Option<&str>) -> Self {
		match value {
			Some("stop") => FinishReason::Stop,
			Some("length") => FinishReason::Length,
			Some("content_filter") => FinishReason::ContentFilter,
			Some(other) => FinishReason::Other(other.to_string()),
			None => FinishReason::Unspecified,
		}
	}

	pub fn is_truncated(&self) -> bool {
		matches!(self, FinishReason::Length)
	}
}

/// Provider response containing the AI completion.
///
/// `role` is kept as the raw wire string; the session controller validates it.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
	pub role: String,
	pub content: String,
	pub finish_reason: FinishReason,
	pub exchange: Option<ProviderExchange>,
}

/// Trait that completion providers implement
#[async_trait::async_trait]
pub trait AiProvider: Send + Sync {
	/// Get the provider name (e.g., "openai")
	fn name(&self) -> &str;

	/// Send a chat completion request with the full ordered transcript.
	/// Only role and content of each message go over the wire.
	async fn chat_completion(
		&self,
		messages: &[Message],
		model: &str,
		temperature: f32,
	) -> Result<ProviderResponse>;
}
