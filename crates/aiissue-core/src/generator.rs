use std::sync::Arc;

use aiissue_ai::{ChatRequest, LlmClient, Message, ResponseFormat};
use tracing::debug;

use crate::models::{GeneratedContent, PrContext, RepositoryVocabulary};
use crate::prompt::{
    issue_content_schema, render_issue_prompt, ISSUE_CONTENT_SCHEMA_NAME, SYSTEM_PROMPT,
};
use crate::AiIssueError;

#[derive(Debug, Clone)]
pub struct IssueGeneratorConfig {
    pub model: String,
    pub temperature: Option<f32>,
}

#[derive(Clone)]
/// Drafts issue content with a single schema-constrained model call.
pub struct IssueGenerator {
    client: Arc<dyn LlmClient>,
    config: IssueGeneratorConfig,
}

impl IssueGenerator {
    pub fn new(client: Arc<dyn LlmClient>, config: IssueGeneratorConfig) -> Self {
        Self { client, config }
    }

    pub fn build_request(&self, pr: &PrContext, vocabulary: &RepositoryVocabulary) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                Message::system(SYSTEM_PROMPT),
                Message::user(render_issue_prompt(
                    pr,
                    &vocabulary.labels,
                    &vocabulary.types,
                )),
            ],
            response_format: Some(ResponseFormat::JsonSchema {
                name: ISSUE_CONTENT_SCHEMA_NAME.to_string(),
                schema: issue_content_schema(),
                strict: true,
            }),
            max_tokens: None,
            temperature: self.config.temperature,
        }
    }

    pub async fn generate(
        &self,
        pr: &PrContext,
        vocabulary: &RepositoryVocabulary,
    ) -> Result<GeneratedContent, AiIssueError> {
        let response = self.client.complete(self.build_request(pr, vocabulary)).await?;
        debug!(
            finish_reason = response.finish_reason.as_deref().unwrap_or("unknown"),
            total_tokens = response.usage.total_tokens,
            "model response received"
        );
        if let Some(reason) = response.message.refusal() {
            return Err(AiIssueError::GenerationFailure(format!(
                "model refused to draft the issue: {reason}"
            )));
        }
        GeneratedContent::from_model_output(&response.message.text_content())
    }
}
