use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::workflows::registration::domain::TeamId;

/// Identifier wrapper for judges. The gateway authenticates judges before any
/// call reaches this module; the id arrives here as an opaque string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct JudgeId(pub String);

impl fmt::Display for JudgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The five fixed evaluation dimensions every judge scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    Innovation,
    Technicality,
    Presentation,
    Feasibility,
    Impact,
}

impl Criterion {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Innovation,
            Self::Technicality,
            Self::Presentation,
            Self::Feasibility,
            Self::Impact,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Innovation => "innovation",
            Self::Technicality => "technicality",
            Self::Presentation => "presentation",
            Self::Feasibility => "feasibility",
            Self::Impact => "impact",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub const MAX_CRITERION_SCORE: u8 = 10;

/// One judge's five criterion scores, each on the 0..=10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionScores {
    pub innovation: u8,
    pub technicality: u8,
    pub presentation: u8,
    pub feasibility: u8,
    pub impact: u8,
}

impl CriterionScores {
    pub const fn get(self, criterion: Criterion) -> u8 {
        match criterion {
            Criterion::Innovation => self.innovation,
            Criterion::Technicality => self.technicality,
            Criterion::Presentation => self.presentation,
            Criterion::Feasibility => self.feasibility,
            Criterion::Impact => self.impact,
        }
    }

    /// First criterion whose score exceeds the scale, if any.
    pub fn out_of_range(self) -> Option<(Criterion, u8)> {
        Criterion::ordered()
            .into_iter()
            .map(|criterion| (criterion, self.get(criterion)))
            .find(|(_, value)| *value > MAX_CRITERION_SCORE)
    }

    /// Mean of this rating's own five scores.
    pub fn mean(self) -> f64 {
        let total: u32 = Criterion::ordered()
            .into_iter()
            .map(|criterion| u32::from(self.get(criterion)))
            .sum();
        f64::from(total) / Criterion::ordered().len() as f64
    }
}

/// One judge's evaluation of one team. At most one exists per
/// `(judge, team)` pair; a resubmission replaces the stored copy in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub judge_id: JudgeId,
    pub team_id: TeamId,
    pub scores: CriterionScores,
    #[serde(default)]
    pub comment: Option<String>,
    pub submitted_at: DateTime<Utc>,
}
