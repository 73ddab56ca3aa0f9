use std::collections::BTreeMap;

use serde::Serialize;

use super::aggregate::AggregatedScore;
use super::domain::Criterion;
use crate::workflows::registration::domain::{TeamId, TeamRecord};

/// One row of the judged-round leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub team_id: TeamId,
    pub team_name: String,
    pub overall: f64,
    pub judge_count: usize,
    pub criterion_means: BTreeMap<Criterion, f64>,
}

/// Order shortlisted, rated teams into a deterministic leaderboard.
///
/// Sort key: `overall` descending, then `judge_count` descending (a team
/// evaluated by more judges outranks an equal-scored team with fewer), then
/// team id ascending as the stable fallback. Ranks are the 1-based positions
/// after sorting; ties still receive distinct sequential ranks.
pub(crate) fn rank_teams(scored: Vec<(TeamRecord, AggregatedScore)>) -> Vec<LeaderboardEntry> {
    let mut ranked: Vec<(TeamRecord, AggregatedScore)> = scored
        .into_iter()
        .filter(|(team, score)| team.is_shortlisted() && score.judge_count >= 1)
        .collect();

    ranked.sort_by(|(team_a, score_a), (team_b, score_b)| {
        score_b
            .overall
            .total_cmp(&score_a.overall)
            .then_with(|| score_b.judge_count.cmp(&score_a.judge_count))
            .then_with(|| team_a.id.cmp(&team_b.id))
    });

    ranked
        .into_iter()
        .enumerate()
        .map(|(index, (team, score))| LeaderboardEntry {
            rank: index + 1,
            team_id: score.team_id,
            team_name: team.name,
            overall: score.overall,
            judge_count: score.judge_count,
            criterion_means: score.criterion_means,
        })
        .collect()
}
