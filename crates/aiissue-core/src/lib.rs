//! Issue drafting pipeline: context fetch, generation, reconciliation, publish.
pub mod context_fetcher;
pub mod error;
pub mod generator;
pub mod models;
pub mod pipeline;
pub mod prompt;
pub mod publisher;
pub mod reconcile;
pub mod trigger;

pub use error::{AiIssueError, UpstreamError};
pub use generator::{IssueGenerator, IssueGeneratorConfig};
pub use models::{
    FinalIssuePayload, GeneratedContent, PrContext, RepositoryVocabulary, VocabularyEntry,
};
pub use pipeline::{IssuePipeline, PipelineReport};
pub use publisher::{LinkBackOutcome, PublishedIssue};
pub use reconcile::{reconcile, resolve_issue_type, TypeResolution};
pub use trigger::{decide_trigger, TriggerDecision};
