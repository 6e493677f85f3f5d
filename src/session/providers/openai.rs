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


// OpenAI provider implementation

use super::{AiProvider, FinishReason, ProviderExchange, ProviderResponse, TokenUsage};
use crate::{log_debug, log_error};
use crate::session::Message;
use anyhow::Result;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

/// OpenAI provider implementation
pub struct OpenAiProvider {
	api_key: String,
	base_url: String,
	client: Client,
}

impl OpenAiProvider {
	pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
		Self {
			api_key: api_key.into(),
			base_url: base_url.into(),
			client: Client::new(),
		}
	}

	fn completions_url(&self) -> String {
		format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
	}
}

/// Message format for the OpenAI API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpenAiMessage {
	pub role: String,
	pub content: String,
}

#[async_trait::async_trait]
impl AiProvider for OpenAiProvider {
	fn name(&self) -> &str {
		"openai"
	}

	async fn chat_completion(
		&self,
		messages: &[Message],
		model: &str,
		temperature: f32,
	) -> Result<ProviderResponse> {
		let request_body = build_request_body(messages, model, temperature);

		log_debug!(
			"Sending {} messages to {} ({})",
			messages.len(),
			self.completions_url(),
			model
		);

		// Track API request time
		let api_start = std::time::Instant::now();

		let response = self
			.client
			.post(self.completions_url())
			.header("Authorization", format!("Bearer {}", self.api_key))
			.header("Content-Type", "application/json")
			.json(&request_body)
			.send()
			.await?;

		let api_time_ms = api_start.elapsed().as_millis() as u64;

		let status = response.status();
		let response_text = response.text().await?;

		let mut parsed = match parse_completion(status, &response_text) {
			Ok(parsed) => parsed,
			Err(e) => {
				log_error!("OpenAI request failed ({} messages, model {})", messages.len(), model);
				return Err(e);
			}
		};
		if let Some(usage) = parsed.usage.as_mut() {
			usage.request_time_ms = Some(api_time_ms);
		}

		let exchange = ProviderExchange::new(
			request_body,
			parsed.raw,
			parsed.usage,
			self.name(),
		);

		Ok(ProviderResponse {
			role: parsed.role,
			content: parsed.content,
			finish_reason: parsed.finish_reason,
			exchange: Some(exchange),
		})
	}
}

/// Build the JSON body for a chat completion request.
/// Timestamps stay local; only role and content are sent.
pub fn build_request_body(
	messages: &[Message],
	model: &str,
	temperature: f32,
) -> serde_json::Value {
	serde_json::json!({
		"model": model,
		"temperature": temperature,
		"messages": convert_messages(messages),
	})
}

// Convert our session messages to OpenAI format
fn convert_messages(messages: &[Message]) -> Vec<OpenAiMessage> {
	messages
		.iter()
		.map(|msg| OpenAiMessage {
			role: msg.role().as_str().to_string(),
			content: msg.content().to_string(),
		})
		.collect()
}

#[derive(Debug)]
struct ParsedCompletion {
	role: String,
	content: String,
	finish_reason: FinishReason,
	usage: Option<TokenUsage>,
	raw: serde_json::Value,
}

fn parse_completion(status: StatusCode, response_text: &str) -> Result<ParsedCompletion> {
	let response_json: serde_json::Value = match serde_json::from_str(response_text) {
		Ok(json) => json,
		Err(e) => {
			return Err(anyhow::anyhow!(
				"Failed to parse response JSON (HTTP {}): {}. Response: {}",
				status,
				e,
				response_text
			));
		}
	};

	// Handle error responses, including errors reported with HTTP 200
	if !status.is_success() || response_json.get("error").is_some() {
		let mut error_details = Vec::new();
		error_details.push(format!("HTTP {}", status));

		if let Some(error_obj) = response_json.get("error") {
			if let Some(msg) = error_obj.get("message").and_then(|m| m.as_str()) {
				error_details.push(format!("Message: {}", msg));
			}
			if let Some(type_) = error_obj.get("type").and_then(|t| t.as_str()) {
				error_details.push(format!("Type: {}", type_));
			}
			if let Some(code) = error_obj.get("code").and_then(|c| c.as_str()) {
				error_details.push(format!("Code: {}", code));
			}
		}

		if error_details.len() == 1 {
			error_details.push(format!("Raw response: {}", response_text));
		}

		return Err(anyhow::anyhow!("OpenAI API error: {}", error_details.join(" | ")));
	}

	let choice = response_json
		.get("choices")
		.and_then(|choices| choices.get(0))
		.ok_or_else(|| anyhow::anyhow!("Invalid response format from OpenAI: {}", response_text))?;

	let message = choice
		.get("message")
		.ok_or_else(|| anyhow::anyhow!("Invalid response format from OpenAI: {}", response_text))?;

	let role = message
		.get("role")
		.and_then(|r| r.as_str())
		.ok_or_else(|| anyhow::anyhow!("Reply without a role from OpenAI: {}", response_text))?
		.to_string();

	// A null content is a valid empty reply
	let content = message
		.get("content")
		.and_then(|c| c.as_str())
		.unwrap_or_default()
		.to_string();

	let finish_reason =
		FinishReason::from_wire(choice.get("finish_reason").and_then(|fr| fr.as_str()));

	let usage = response_json.get("usage").map(|usage_obj| {
		let field = |name: &str| usage_obj.get(name).and_then(|v| v.as_u64()).unwrap_or(0);
		TokenUsage {
			prompt_tokens: field("prompt_tokens"),
			output_tokens: field("completion_tokens"),
			total_tokens: field("total_tokens"),
			request_time_ms: None,
		}
	});

	Ok(ParsedCompletion {
		role,
		content,
		finish_reason,
		usage,
		raw: response_json,
	})
}
