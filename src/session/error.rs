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


// Error taxonomy for the chat session core

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
	/// The completion service answered with a role other than `assistant`.
	/// The API contract is broken and the process must not continue.
	#[error("protocol violation: completion reply has role '{role}', expected 'assistant'")]
	ProtocolViolation { role: String },

	/// An append would break the SYSTEM, (USER, ASSISTANT)* transcript shape
	#[error("transcript order violated: cannot append {attempted} after {last}")]
	TranscriptOrder {
		last: &'static str,
		attempted: &'static str,
	},

	#[error("unsupported model '{model}'. Supported models: {supported}")]
	UnsupportedModel { model: String, supported: String },

	#[error("OpenAI API key not found. Set OPENAI_API_KEY or enter it when prompted")]
	MissingApiKey,
}
