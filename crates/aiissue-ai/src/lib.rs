//! Language-model transport used by the issue generator.
mod openai;
mod types;

pub use openai::{OpenAiClient, OpenAiConfig};
pub use types::{
    AiError, ChatRequest, ChatResponse, ChatUsage, ContentBlock, LlmClient, Message, MessageRole,
    ResponseFormat,
};
