pub mod error;
pub mod http;

use crate::domain::analysis::AnalysisResult;
use crate::domain::chat::{ChatMessage, ChatReply};
use crate::domain::form::InvestmentFormData;
use crate::domain::quiz::Quiz;

pub use error::ApiError;
pub use http::HttpJournalClient;
pub use reqwest::StatusCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Analyze,
    Chat,
    Quiz,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Analyze => "/v1/analyze",
            Self::Chat => "/v1/chat",
            Self::Quiz => "/v1/quiz",
        }
    }
}

/// Backend operations used by the journaling flow.
#[async_trait::async_trait]
pub trait JournalApi: Send + Sync {
    async fn analyze(&self, form: &InvestmentFormData) -> anyhow::Result<AnalysisResult>;

    async fn chat(&self, history: &[ChatMessage], message: &str) -> anyhow::Result<ChatReply>;

    async fn generate_quiz(&self, analysis: &AnalysisResult) -> anyhow::Result<Vec<Quiz>>;
}
