use super::domain::Rating;
use crate::workflows::registration::domain::TeamId;

/// Outbound mirror of the in-core rating store. The gateway keeps the durable
/// copy; a failed persist call rejects the submission before the store is
/// touched.
pub trait RatingPersistence: Send + Sync {
    fn persist(&self, rating: &Rating) -> Result<(), PersistenceError>;
    fn remove_team(&self, team_id: &TeamId) -> Result<(), PersistenceError>;
}

/// Rating persistence error.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("rating persistence unavailable: {0}")]
    Unavailable(String),
}
