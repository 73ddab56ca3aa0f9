use std::sync::Arc;

use chrono::Utc;

use super::aggregate::{aggregate_ratings, AggregatedScore};
use super::domain::{CriterionScores, JudgeId, Rating, MAX_CRITERION_SCORE};
use super::leaderboard::{rank_teams, LeaderboardEntry};
use super::repository::{PersistenceError, RatingPersistence};
use super::store::RatingStore;
use crate::workflows::judging::domain::Criterion;
use crate::workflows::registration::domain::{ApplicationStatus, TeamId};
use crate::workflows::registration::repository::{RepositoryError, TeamRepository};

/// Service composing the rating store, the team read model, and the outbound
/// persistence mirror. Aggregation and ranking are read-only and always
/// recompute from the store.
pub struct JudgingService<R, P> {
    teams: Arc<R>,
    store: Arc<RatingStore>,
    persistence: Arc<P>,
}

impl<R, P> JudgingService<R, P>
where
    R: TeamRepository + 'static,
    P: RatingPersistence + 'static,
{
    pub fn new(teams: Arc<R>, store: Arc<RatingStore>, persistence: Arc<P>) -> Self {
        Self {
            teams,
            store,
            persistence,
        }
    }

    fn judgeable_status(&self, team_id: &TeamId) -> Result<ApplicationStatus, JudgingError> {
        let team = self
            .teams
            .fetch(team_id)?
            .ok_or_else(|| JudgingError::UnknownTeam(team_id.clone()))?;
        Ok(team.application_status)
    }

    /// Create or replace a judge's rating for a shortlisted team.
    ///
    /// The durable mirror is written before the in-core store so a dependency
    /// failure leaves the store untouched.
    pub fn upsert_rating(
        &self,
        judge_id: JudgeId,
        team_id: TeamId,
        scores: CriterionScores,
        comment: Option<String>,
    ) -> Result<Rating, JudgingError> {
        if judge_id.0.trim().is_empty() {
            return Err(JudgingError::UnknownJudge);
        }
        if let Some((criterion, value)) = scores.out_of_range() {
            return Err(JudgingError::InvalidScore { criterion, value });
        }

        let status = self.judgeable_status(&team_id)?;
        if status != ApplicationStatus::Shortlisted {
            return Err(JudgingError::TeamNotJudgeable { status });
        }

        let rating = Rating {
            judge_id,
            team_id,
            scores,
            comment,
            submitted_at: Utc::now(),
        };

        self.persistence.persist(&rating)?;
        Ok(self.store.upsert(rating))
    }

    /// A judge's stored rating for a team, if any.
    pub fn rating_for(&self, judge_id: &JudgeId, team_id: &TeamId) -> Option<Rating> {
        self.store.get(judge_id, team_id)
    }

    /// All ratings currently stored for a team.
    pub fn ratings_for_team(&self, team_id: &TeamId) -> Result<Vec<Rating>, JudgingError> {
        self.judgeable_status(team_id)?;
        Ok(self.store.for_team(team_id))
    }

    /// Recompute the per-criterion and overall means for a team from the
    /// current rating store state.
    pub fn aggregate(&self, team_id: &TeamId) -> Result<AggregatedScore, JudgingError> {
        self.judgeable_status(team_id)?;
        Ok(aggregate_ratings(team_id, &self.store.for_team(team_id)))
    }

    /// Rank every shortlisted team with at least one rating.
    pub fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, JudgingError> {
        let scored = self
            .teams
            .list()?
            .into_iter()
            .map(|team| {
                let score = aggregate_ratings(&team.id, &self.store.for_team(&team.id));
                (team, score)
            })
            .collect();
        Ok(rank_teams(scored))
    }
}

/// Error raised by the judging service.
#[derive(Debug, thiserror::Error)]
pub enum JudgingError {
    #[error("{criterion} score {value} is outside the 0..={max} scale", max = MAX_CRITERION_SCORE)]
    InvalidScore { criterion: Criterion, value: u8 },
    #[error("team cannot be judged while {status}")]
    TeamNotJudgeable { status: ApplicationStatus },
    #[error("team {0} does not exist")]
    UnknownTeam(TeamId),
    #[error("judge identifier is blank or unknown")]
    UnknownJudge,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
