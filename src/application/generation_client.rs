// Client trait for the external natural-language generation call
use crate::domain::conversation::ConversationTurn;
use crate::domain::specification::DashboardSpecification;
use async_trait::async_trait;
use serde::Serialize;

/// Everything the generation collaborator sees for one request: the user's
/// message, the latest specification (the source of truth), and the
/// transcript of prior turns.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationContext {
    pub message: String,
    pub specification: DashboardSpecification,
    pub transcript: Vec<ConversationTurn>,
}

#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Produce a full replacement specification for the given context. The
    /// result is untrusted and goes through normalization before it is
    /// applied.
    async fn generate(&self, context: &GenerationContext)
        -> anyhow::Result<DashboardSpecification>;
}
