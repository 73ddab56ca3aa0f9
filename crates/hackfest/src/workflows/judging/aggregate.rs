use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::{Criterion, Rating};
use crate::workflows::registration::domain::TeamId;

/// Derived score summary for one team. Never stored; recomputed from the
/// rating store on every call so it can never go stale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedScore {
    pub team_id: TeamId,
    pub criterion_means: BTreeMap<Criterion, f64>,
    pub overall: f64,
    pub judge_count: usize,
}

/// Arithmetic mean per criterion over the given ratings, plus the unweighted
/// mean of those means as `overall`.
///
/// With zero ratings every mean is exactly `0.0` (never NaN), keeping the
/// downstream sort total.
pub(crate) fn aggregate_ratings(team_id: &TeamId, ratings: &[Rating]) -> AggregatedScore {
    let judge_count = ratings.len();
    let mut criterion_means = BTreeMap::new();

    if judge_count == 0 {
        for criterion in Criterion::ordered() {
            criterion_means.insert(criterion, 0.0);
        }
        return AggregatedScore {
            team_id: team_id.clone(),
            criterion_means,
            overall: 0.0,
            judge_count,
        };
    }

    let mut mean_total = 0.0;
    for criterion in Criterion::ordered() {
        let total: u32 = ratings
            .iter()
            .map(|rating| u32::from(rating.scores.get(criterion)))
            .sum();
        let mean = f64::from(total) / judge_count as f64;
        mean_total += mean;
        criterion_means.insert(criterion, mean);
    }

    AggregatedScore {
        team_id: team_id.clone(),
        criterion_means,
        overall: mean_total / Criterion::ordered().len() as f64,
        judge_count,
    }
}
