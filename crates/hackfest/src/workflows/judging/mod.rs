//! Judge ratings, score aggregation, and leaderboard ranking.
//!
//! Ratings live in an in-core concurrent store keyed by `(judge, team)`;
//! aggregates and leaderboards are derived views recomputed on every call.

pub mod aggregate;
pub mod domain;
pub mod leaderboard;
pub mod repository;
pub mod router;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use aggregate::AggregatedScore;
pub use domain::{Criterion, CriterionScores, JudgeId, Rating, MAX_CRITERION_SCORE};
pub use leaderboard::LeaderboardEntry;
pub use repository::{PersistenceError, RatingPersistence};
pub use router::judging_router;
pub use service::{JudgingError, JudgingService};
pub use store::RatingStore;
