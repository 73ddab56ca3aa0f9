use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for registered teams. Solo participants are modeled as
/// single-member teams, so every applicant record carries one of these.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TeamId(pub String);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamType {
    Individual,
    Team,
}

impl TeamType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Team => "team",
        }
    }
}

impl fmt::Display for TeamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Competition track a team registers under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Track {
    AiMl,
    Web3,
    Fintech,
    Healthtech,
    OpenInnovation,
}

impl Track {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::AiMl,
            Self::Web3,
            Self::Fintech,
            Self::Healthtech,
            Self::OpenInnovation,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::AiMl => "AI & ML",
            Self::Web3 => "Web3",
            Self::Fintech => "Fintech",
            Self::Healthtech => "Healthtech",
            Self::OpenInnovation => "Open Innovation",
        }
    }
}

/// Application review status.
///
/// `PendingProposal` is the only entry state; it advances to `Pending`
/// exclusively through proposal submission, never through the admin table
/// below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    PendingProposal,
    Pending,
    UnderReview,
    Shortlisted,
    Rejected,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::PendingProposal => "pending_proposal",
            Self::Pending => "pending",
            Self::UnderReview => "under_review",
            Self::Shortlisted => "shortlisted",
            Self::Rejected => "rejected",
        }
    }

    /// Checks whether an administrator may move an application from the
    /// current status to `next`.
    ///
    /// Forward flow is `pending -> under_review -> {shortlisted, rejected}`.
    /// Final decisions stay reversible: a rejected or shortlisted team may be
    /// sent back to `pending`/`under_review`, or flipped directly to the
    /// opposite decision.
    pub fn can_transition_to(self, next: ApplicationStatus) -> bool {
        use ApplicationStatus::*;
        matches!(
            (self, next),
            (Pending, UnderReview)
                | (UnderReview, Shortlisted)
                | (UnderReview, Rejected)
                | (Rejected, Pending)
                | (Rejected, UnderReview)
                | (Rejected, Shortlisted)
                | (Shortlisted, Pending)
                | (Shortlisted, UnderReview)
                | (Shortlisted, Rejected)
        )
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Payment review status. Stays `None` for every team that is not currently
/// shortlisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    None,
    Pending,
    Approved,
    Rejected,
}

impl PaymentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Payment sub-machine: `none -> pending -> {approved, rejected}`, with
    /// `rejected -> pending` allowed for resubmission.
    pub fn can_transition_to(self, next: PaymentStatus) -> bool {
        use PaymentStatus::*;
        matches!(
            (self, next),
            (None, Pending) | (Pending, Approved) | (Pending, Rejected) | (Rejected, Pending)
        )
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Registered team as tracked through the event lifecycle. The gateway owns
/// the durable copy; the lifecycle service only mutates status fields and
/// document references through guarded transitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub id: TeamId,
    pub name: String,
    pub team_type: TeamType,
    pub member_count: u8,
    pub track: Track,
    pub application_status: ApplicationStatus,
    pub payment_status: PaymentStatus,
    pub has_proposal: bool,
    pub proposal_ref: Option<String>,
    pub payment_proof_ref: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TeamRecord {
    pub fn is_shortlisted(&self) -> bool {
        self.application_status == ApplicationStatus::Shortlisted
    }

    pub fn status_view(&self) -> TeamStatusView {
        TeamStatusView {
            team_id: self.id.clone(),
            name: self.name.clone(),
            team_type: self.team_type,
            member_count: self.member_count,
            track: self.track,
            application_status: self.application_status.label(),
            payment_status: self.payment_status.label(),
            has_proposal: self.has_proposal,
            created_at: self.created_at,
        }
    }
}

/// Registration request payload. A proposal attached here moves the team
/// straight to `pending`; otherwise it starts at `pending_proposal`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTeam {
    pub name: String,
    pub team_type: TeamType,
    pub member_count: u8,
    pub track: Track,
    #[serde(default)]
    pub proposal_ref: Option<String>,
}

/// Sanitized representation of a team's exposed status.
#[derive(Debug, Clone, Serialize)]
pub struct TeamStatusView {
    pub team_id: TeamId,
    pub name: String,
    pub team_type: TeamType,
    pub member_count: u8,
    pub track: Track,
    pub application_status: &'static str,
    pub payment_status: &'static str,
    pub has_proposal: bool,
    pub created_at: DateTime<Utc>,
}

pub const MIN_TEAM_MEMBERS: u8 = 1;
pub const MAX_TEAM_MEMBERS: u8 = 4;
