use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{TeamId, TeamRecord};

/// Storage abstraction over the gateway's durable team records so the
/// lifecycle service can be exercised in isolation.
pub trait TeamRepository: Send + Sync {
    fn insert(&self, record: TeamRecord) -> Result<TeamRecord, RepositoryError>;
    fn update(&self, record: TeamRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &TeamId) -> Result<Option<TeamRecord>, RepositoryError>;
    fn delete(&self, id: &TeamId) -> Result<(), RepositoryError>;
    fn list(&self) -> Result<Vec<TeamRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Field of a team record touched by a lifecycle transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleField {
    Team,
    ApplicationStatus,
    PaymentStatus,
    Proposal,
    PaymentProof,
}

impl LifecycleField {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Team => "team",
            Self::ApplicationStatus => "application_status",
            Self::PaymentStatus => "payment_status",
            Self::Proposal => "proposal",
            Self::PaymentProof => "payment_proof",
        }
    }
}

/// Audit payload emitted after every committed transition. The gateway
/// persists these and fans out notifications; the core only publishes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifecycleEvent {
    pub team_id: TeamId,
    pub field: LifecycleField,
    pub old_value: String,
    pub new_value: String,
    pub occurred_at: DateTime<Utc>,
}

impl LifecycleEvent {
    pub(crate) fn now(
        team_id: &TeamId,
        field: LifecycleField,
        old_value: impl Into<String>,
        new_value: impl Into<String>,
    ) -> Self {
        Self {
            team_id: team_id.clone(),
            field,
            old_value: old_value.into(),
            new_value: new_value.into(),
            occurred_at: Utc::now(),
        }
    }
}

/// Trait describing the outbound audit/notification hook.
pub trait EventPublisher: Send + Sync {
    fn publish(&self, event: LifecycleEvent) -> Result<(), EventError>;
}

/// Event dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("event transport unavailable: {0}")]
    Transport(String),
}

/// Gateway-owned file storage, consulted only to confirm a proposal or
/// payment-proof reference was actually uploaded before accepting it.
pub trait FileStore: Send + Sync {
    fn exists(&self, reference: &str) -> Result<bool, FileStoreError>;
}

/// File storage lookup error.
#[derive(Debug, thiserror::Error)]
pub enum FileStoreError {
    #[error("file storage unavailable: {0}")]
    Unavailable(String),
}
