// Iterative refinement - conversational editing of a live specification
//
// One logical editing session per specification. The generation call is the
// only operation with an ordering requirement: requests carry a
// monotonically increasing sequence number and a response is applied only
// when its number is higher than the highest applied so far. The session
// lock is released while the generation call is in flight, so a second
// message can overtake a slow first one; the sequence guard is what
// resolves that race.
use crate::application::assembler::normalize;
use crate::application::generation_client::{GenerationClient, GenerationContext};
use crate::application::intent::{classify, MessageIntent};
use crate::domain::conversation::{ConversationTurn, Role, SpecDelta};
use crate::domain::specification::DashboardSpecification;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Outcome of offering a generation response to a session.
#[derive(Debug, Clone)]
pub enum ResponseOutcome {
    Applied {
        seq: u64,
        delta: SpecDelta,
        summary: String,
    },
    /// A newer response was already applied; this one is dropped.
    Stale { seq: u64 },
}

/// One outbound generation request: its sequence number and the context
/// snapshot taken when it was issued.
#[derive(Debug)]
pub struct GenerationRequest {
    pub seq: u64,
    pub context: GenerationContext,
}

/// The live editing state for one specification: the current document (the
/// source of truth), the append-only transcript, and the sequence counters
/// guarding out-of-order responses.
#[derive(Debug)]
pub struct RefinementSession {
    spec: DashboardSpecification,
    transcript: Vec<ConversationTurn>,
    next_seq: u64,
    applied_seq: u64,
}

impl RefinementSession {
    pub fn new(spec: DashboardSpecification) -> Self {
        Self {
            spec,
            transcript: Vec::new(),
            next_seq: 0,
            applied_seq: 0,
        }
    }

    pub fn specification(&self) -> &DashboardSpecification {
        &self.spec
    }

    pub fn transcript(&self) -> &[ConversationTurn] {
        &self.transcript
    }

    pub fn record_user(&mut self, content: &str) {
        self.transcript.push(ConversationTurn::now(Role::User, content));
    }

    pub fn record_system(&mut self, content: &str) {
        self.transcript.push(ConversationTurn::now(Role::System, content));
    }

    /// Allocate the next sequence number and snapshot the generation
    /// context. The user turn is appended before the snapshot so the
    /// collaborator sees it.
    pub fn begin_request(&mut self, message: &str) -> GenerationRequest {
        self.record_user(message);
        self.next_seq += 1;
        GenerationRequest {
            seq: self.next_seq,
            context: GenerationContext {
                message: message.to_string(),
                specification: self.spec.clone(),
                transcript: self.transcript.clone(),
            },
        }
    }

    /// Apply a generation response if it is still the newest one. A stale
    /// response changes nothing and is reported, not raised.
    pub fn apply_response(
        &mut self,
        seq: u64,
        new_spec: DashboardSpecification,
    ) -> ResponseOutcome {
        if seq <= self.applied_seq {
            tracing::debug!("Dropping stale generation response seq={}", seq);
            return ResponseOutcome::Stale { seq };
        }
        let new_spec = normalize(new_spec, &self.spec);
        let delta = SpecDelta::between(&self.spec, &new_spec);
        let summary = delta.summary(&new_spec);
        self.spec = new_spec;
        self.applied_seq = seq;
        self.record_system(&summary);
        ResponseOutcome::Applied {
            seq,
            delta,
            summary,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RefinementError {
    #[error("no editing session for dashboard {0}")]
    SessionNotFound(String),
    #[error("generation failed: {0}")]
    GenerationFailed(#[source] anyhow::Error),
}

/// What one chat turn produced, for the presentation layer.
#[derive(Debug, Clone)]
pub enum ChatOutcome {
    /// Answered from the canned-response table; the specification did not
    /// change and the generation collaborator was never called.
    Conversational { reply: String },
    /// A generation response was applied.
    Updated {
        reply: String,
        delta: SpecDelta,
        specification: DashboardSpecification,
    },
    /// The response lost the race to a newer request; the live
    /// specification is returned unchanged.
    Superseded { specification: DashboardSpecification },
}

#[derive(Clone)]
pub struct RefinementService {
    generation: Arc<dyn GenerationClient>,
    sessions: Arc<Mutex<HashMap<String, RefinementSession>>>,
}

impl RefinementService {
    pub fn new(generation: Arc<dyn GenerationClient>) -> Self {
        Self {
            generation,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Start (or replace) the editing session for a dashboard.
    pub async fn open_session(&self, dashboard_id: &str, spec: DashboardSpecification) {
        let mut sessions = self.sessions.lock().await;
        sessions.insert(dashboard_id.to_string(), RefinementSession::new(spec));
    }

    pub async fn specification(
        &self,
        dashboard_id: &str,
    ) -> Result<DashboardSpecification, RefinementError> {
        let sessions = self.sessions.lock().await;
        sessions
            .get(dashboard_id)
            .map(|s| s.specification().clone())
            .ok_or_else(|| RefinementError::SessionNotFound(dashboard_id.to_string()))
    }

    /// Current document plus transcript, for reloading an editing view.
    pub async fn session_snapshot(
        &self,
        dashboard_id: &str,
    ) -> Result<(DashboardSpecification, Vec<ConversationTurn>), RefinementError> {
        let sessions = self.sessions.lock().await;
        sessions
            .get(dashboard_id)
            .map(|s| (s.specification().clone(), s.transcript().to_vec()))
            .ok_or_else(|| RefinementError::SessionNotFound(dashboard_id.to_string()))
    }

    /// Handle one chat turn. Conversational messages are answered locally;
    /// modification requests go to the generation collaborator and the
    /// result is merged under the sequence guard.
    pub async fn chat(
        &self,
        dashboard_id: &str,
        message: &str,
    ) -> Result<ChatOutcome, RefinementError> {
        match classify(message) {
            MessageIntent::Conversational(reply) => {
                let mut sessions = self.sessions.lock().await;
                let session = sessions
                    .get_mut(dashboard_id)
                    .ok_or_else(|| RefinementError::SessionNotFound(dashboard_id.to_string()))?;
                session.record_user(message);
                session.record_system(reply);
                Ok(ChatOutcome::Conversational {
                    reply: reply.to_string(),
                })
            }
            MessageIntent::Modification => self.run_generation(dashboard_id, message).await,
        }
    }

    /// First generation for the prompt-driven create path: seed the session
    /// with the assembled baseline, then run one generation turn against the
    /// prompt. No intent classification here; the prompt is the request.
    pub async fn generate(
        &self,
        dashboard_id: &str,
        baseline: DashboardSpecification,
        prompt: &str,
    ) -> Result<ChatOutcome, RefinementError> {
        self.open_session(dashboard_id, baseline).await;
        self.run_generation(dashboard_id, prompt).await
    }

    async fn run_generation(
        &self,
        dashboard_id: &str,
        message: &str,
    ) -> Result<ChatOutcome, RefinementError> {
        let request = {
            let mut sessions = self.sessions.lock().await;
            let session = sessions
                .get_mut(dashboard_id)
                .ok_or_else(|| RefinementError::SessionNotFound(dashboard_id.to_string()))?;
            session.begin_request(message)
        };

        // The lock is not held across the collaborator call; on failure the
        // last-known-good specification is untouched.
        let generated = self
            .generation
            .generate(&request.context)
            .await
            .map_err(RefinementError::GenerationFailed)?;

        let mut sessions = self.sessions.lock().await;
        let session = sessions
            .get_mut(dashboard_id)
            .ok_or_else(|| RefinementError::SessionNotFound(dashboard_id.to_string()))?;
        match session.apply_response(request.seq, generated) {
            ResponseOutcome::Applied {
                delta, summary, ..
            } => Ok(ChatOutcome::Updated {
                reply: summary,
                delta,
                specification: session.specification().clone(),
            }),
            ResponseOutcome::Stale { .. } => Ok(ChatOutcome::Superseded {
                specification: session.specification().clone(),
            }),
        }
    }
}
