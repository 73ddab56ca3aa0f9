use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::domain::{JudgeId, Rating};
use crate::workflows::registration::domain::TeamId;

type Bucket = Arc<RwLock<HashMap<JudgeId, Rating>>>;

/// In-memory rating store keyed by `(judge, team)`.
///
/// Ratings are held in one bucket per team behind a short-lived outer lock,
/// so submissions for different teams never contend and readers always see a
/// fully written rating: a `Rating` is constructed before the bucket lock is
/// taken and replaced with a single map insert.
#[derive(Debug, Default)]
pub struct RatingStore {
    buckets: RwLock<HashMap<TeamId, Bucket>>,
}

impl RatingStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn bucket(&self, team_id: &TeamId) -> Bucket {
        if let Some(bucket) = self
            .buckets
            .read()
            .expect("rating store lock poisoned")
            .get(team_id)
        {
            return bucket.clone();
        }

        let mut buckets = self.buckets.write().expect("rating store lock poisoned");
        buckets.entry(team_id.clone()).or_default().clone()
    }

    /// Replace-or-create the rating for its `(judge, team)` pair.
    pub fn upsert(&self, rating: Rating) -> Rating {
        let bucket = self.bucket(&rating.team_id);
        let mut ratings = bucket.write().expect("rating bucket lock poisoned");
        ratings.insert(rating.judge_id.clone(), rating.clone());
        rating
    }

    pub fn get(&self, judge_id: &JudgeId, team_id: &TeamId) -> Option<Rating> {
        let buckets = self.buckets.read().expect("rating store lock poisoned");
        let bucket = buckets.get(team_id)?;
        let ratings = bucket.read().expect("rating bucket lock poisoned");
        ratings.get(judge_id).cloned()
    }

    /// Snapshot of all ratings currently stored for a team.
    pub fn for_team(&self, team_id: &TeamId) -> Vec<Rating> {
        let bucket = {
            let buckets = self.buckets.read().expect("rating store lock poisoned");
            match buckets.get(team_id) {
                Some(bucket) => bucket.clone(),
                None => return Vec::new(),
            }
        };
        let ratings = bucket.read().expect("rating bucket lock poisoned");
        ratings.values().cloned().collect()
    }

    /// Bulk-delete every rating for a team. Invoked when the team record is
    /// removed so no rating outlives its team.
    pub fn remove_team(&self, team_id: &TeamId) {
        let mut buckets = self.buckets.write().expect("rating store lock poisoned");
        buckets.remove(team_id);
    }
}
