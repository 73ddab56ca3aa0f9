use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use super::domain::{
    ApplicationStatus, NewTeam, PaymentStatus, TeamId, TeamRecord, TeamType, MAX_TEAM_MEMBERS,
    MIN_TEAM_MEMBERS,
};
use super::repository::{
    EventPublisher, FileStore, FileStoreError, LifecycleEvent, LifecycleField, RepositoryError,
    TeamRepository,
};
use crate::workflows::judging::store::RatingStore;

static TEAM_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_team_id() -> TeamId {
    let id = TEAM_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    TeamId(format!("team-{id:06}"))
}

/// Service enforcing the application and payment state machines for one event.
///
/// Mutations for a given team serialize through a per-team lock so concurrent
/// admin actions (or a delete racing a status change) cannot interleave into a
/// half-applied record. Every rejected operation leaves the record exactly as
/// it was.
pub struct RegistrationService<R, E, F> {
    repository: Arc<R>,
    events: Arc<E>,
    files: Arc<F>,
    ratings: Arc<RatingStore>,
    locks: Mutex<HashMap<TeamId, Arc<Mutex<()>>>>,
}

impl<R, E, F> RegistrationService<R, E, F>
where
    R: TeamRepository + 'static,
    E: EventPublisher + 'static,
    F: FileStore + 'static,
{
    pub fn new(
        repository: Arc<R>,
        events: Arc<E>,
        files: Arc<F>,
        ratings: Arc<RatingStore>,
    ) -> Self {
        Self {
            repository,
            events,
            files,
            ratings,
            locks: Mutex::new(HashMap::new()),
        }
    }

    fn lock_for(&self, team_id: &TeamId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().expect("team lock registry poisoned");
        locks.entry(team_id.clone()).or_default().clone()
    }

    fn emit(&self, event: LifecycleEvent) {
        if let Err(err) = self.events.publish(event) {
            tracing::warn!(%err, "lifecycle event dropped");
        }
    }

    fn require_uploaded(&self, reference: &str) -> Result<(), LifecycleError> {
        if self.files.exists(reference)? {
            Ok(())
        } else {
            Err(LifecycleError::MissingDocument {
                reference: reference.to_string(),
            })
        }
    }

    fn fetch_team(&self, team_id: &TeamId) -> Result<TeamRecord, LifecycleError> {
        self.repository
            .fetch(team_id)?
            .ok_or_else(|| LifecycleError::UnknownTeam(team_id.clone()))
    }

    /// Register a new team or solo participant. A proposal reference attached
    /// to the registration moves the application straight to `pending`.
    pub fn register_team(&self, new_team: NewTeam) -> Result<TeamRecord, LifecycleError> {
        let allowed = match new_team.team_type {
            TeamType::Individual => MIN_TEAM_MEMBERS..=MIN_TEAM_MEMBERS,
            TeamType::Team => MIN_TEAM_MEMBERS..=MAX_TEAM_MEMBERS,
        };
        if !allowed.contains(&new_team.member_count) {
            return Err(LifecycleError::InvalidTeamSize {
                team_type: new_team.team_type,
                member_count: new_team.member_count,
            });
        }

        if let Some(reference) = new_team.proposal_ref.as_deref() {
            self.require_uploaded(reference)?;
        }

        let has_proposal = new_team.proposal_ref.is_some();
        let record = TeamRecord {
            id: next_team_id(),
            name: new_team.name,
            team_type: new_team.team_type,
            member_count: new_team.member_count,
            track: new_team.track,
            application_status: if has_proposal {
                ApplicationStatus::Pending
            } else {
                ApplicationStatus::PendingProposal
            },
            payment_status: PaymentStatus::None,
            has_proposal,
            proposal_ref: new_team.proposal_ref,
            payment_proof_ref: None,
            created_at: Utc::now(),
        };

        let stored = self.repository.insert(record)?;
        self.emit(LifecycleEvent::now(
            &stored.id,
            LifecycleField::Team,
            "-",
            stored.application_status.label(),
        ));
        Ok(stored)
    }

    /// Attach (or replace) a team's proposal document.
    ///
    /// From `pending_proposal` this advances the application to `pending`.
    /// In every other status the call is an idempotent update: the reference
    /// is replaced and the status is left untouched.
    pub fn submit_proposal(
        &self,
        team_id: &TeamId,
        document_ref: &str,
    ) -> Result<TeamRecord, LifecycleError> {
        let lock = self.lock_for(team_id);
        let _guard = lock.lock().expect("team lock poisoned");

        let mut team = self.fetch_team(team_id)?;
        self.require_uploaded(document_ref)?;

        let old_status = team.application_status;
        let old_ref = team.proposal_ref.clone();
        team.has_proposal = true;
        team.proposal_ref = Some(document_ref.to_string());
        if old_status == ApplicationStatus::PendingProposal {
            team.application_status = ApplicationStatus::Pending;
        }

        self.repository.update(team.clone())?;

        self.emit(LifecycleEvent::now(
            team_id,
            LifecycleField::Proposal,
            old_ref.unwrap_or_else(|| "-".to_string()),
            document_ref,
        ));
        if team.application_status != old_status {
            self.emit(LifecycleEvent::now(
                team_id,
                LifecycleField::ApplicationStatus,
                old_status.label(),
                team.application_status.label(),
            ));
        }
        Ok(team)
    }

    /// Admin-driven application status change, guarded by the transition
    /// table. Leaving `shortlisted` resets the payment sub-machine.
    pub fn set_application_status(
        &self,
        team_id: &TeamId,
        new_status: ApplicationStatus,
    ) -> Result<TeamRecord, LifecycleError> {
        let lock = self.lock_for(team_id);
        let _guard = lock.lock().expect("team lock poisoned");

        let mut team = self.fetch_team(team_id)?;
        let old_status = team.application_status;
        if !old_status.can_transition_to(new_status) {
            return Err(LifecycleError::InvalidTransition {
                from: old_status,
                to: new_status,
            });
        }

        team.application_status = new_status;
        let old_payment = team.payment_status;
        if new_status != ApplicationStatus::Shortlisted {
            team.payment_status = PaymentStatus::None;
        }

        self.repository.update(team.clone())?;

        self.emit(LifecycleEvent::now(
            team_id,
            LifecycleField::ApplicationStatus,
            old_status.label(),
            new_status.label(),
        ));
        if team.payment_status != old_payment {
            self.emit(LifecycleEvent::now(
                team_id,
                LifecycleField::PaymentStatus,
                old_payment.label(),
                team.payment_status.label(),
            ));
        }
        Ok(team)
    }

    /// Record a payment proof for a shortlisted team. Any prior proof is
    /// superseded and the payment status returns to `pending`.
    pub fn submit_payment(
        &self,
        team_id: &TeamId,
        proof_ref: &str,
    ) -> Result<TeamRecord, LifecycleError> {
        let lock = self.lock_for(team_id);
        let _guard = lock.lock().expect("team lock poisoned");

        let mut team = self.fetch_team(team_id)?;
        if !team.is_shortlisted() {
            return Err(LifecycleError::PaymentNotApplicable {
                status: team.application_status,
            });
        }

        let old_payment = team.payment_status;
        if old_payment == PaymentStatus::Approved {
            return Err(LifecycleError::InvalidPaymentTransition {
                from: old_payment,
                to: PaymentStatus::Pending,
            });
        }

        self.require_uploaded(proof_ref)?;

        let old_ref = team.payment_proof_ref.clone();
        team.payment_proof_ref = Some(proof_ref.to_string());
        team.payment_status = PaymentStatus::Pending;

        self.repository.update(team.clone())?;

        self.emit(LifecycleEvent::now(
            team_id,
            LifecycleField::PaymentProof,
            old_ref.unwrap_or_else(|| "-".to_string()),
            proof_ref,
        ));
        if old_payment != PaymentStatus::Pending {
            self.emit(LifecycleEvent::now(
                team_id,
                LifecycleField::PaymentStatus,
                old_payment.label(),
                PaymentStatus::Pending.label(),
            ));
        }
        Ok(team)
    }

    /// Admin-driven payment status change, only meaningful while the team is
    /// shortlisted.
    pub fn set_payment_status(
        &self,
        team_id: &TeamId,
        new_status: PaymentStatus,
    ) -> Result<TeamRecord, LifecycleError> {
        let lock = self.lock_for(team_id);
        let _guard = lock.lock().expect("team lock poisoned");

        let mut team = self.fetch_team(team_id)?;
        if !team.is_shortlisted() {
            return Err(LifecycleError::PaymentNotApplicable {
                status: team.application_status,
            });
        }

        let old_payment = team.payment_status;
        if !old_payment.can_transition_to(new_status) {
            return Err(LifecycleError::InvalidPaymentTransition {
                from: old_payment,
                to: new_status,
            });
        }

        team.payment_status = new_status;
        self.repository.update(team.clone())?;

        self.emit(LifecycleEvent::now(
            team_id,
            LifecycleField::PaymentStatus,
            old_payment.label(),
            new_status.label(),
        ));
        Ok(team)
    }

    /// Remove a team and cascade deletion of its ratings.
    pub fn delete_team(&self, team_id: &TeamId) -> Result<(), LifecycleError> {
        let lock = self.lock_for(team_id);
        {
            let _guard = lock.lock().expect("team lock poisoned");

            self.fetch_team(team_id)?;
            self.repository.delete(team_id)?;
            self.ratings.remove_team(team_id);

            self.emit(LifecycleEvent::now(
                team_id,
                LifecycleField::Team,
                "registered",
                "removed",
            ));
        }

        let mut locks = self.locks.lock().expect("team lock registry poisoned");
        locks.remove(team_id);
        Ok(())
    }

    /// Fetch a team for API responses.
    pub fn get_team(&self, team_id: &TeamId) -> Result<TeamRecord, LifecycleError> {
        self.fetch_team(team_id)
    }

    /// All registered teams, for the admin console read model.
    pub fn list_teams(&self) -> Result<Vec<TeamRecord>, LifecycleError> {
        Ok(self.repository.list()?)
    }
}

/// Error raised by the lifecycle service.
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error("cannot move application from {from} to {to}")]
    InvalidTransition {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },
    #[error("cannot move payment from {from} to {to}")]
    InvalidPaymentTransition {
        from: PaymentStatus,
        to: PaymentStatus,
    },
    #[error("payment actions require a shortlisted application (currently {status})")]
    PaymentNotApplicable { status: ApplicationStatus },
    #[error("team {0} does not exist")]
    UnknownTeam(TeamId),
    #[error("{team_type} registrations cannot have {member_count} member(s)")]
    InvalidTeamSize {
        team_type: TeamType,
        member_count: u8,
    },
    #[error("document reference '{reference}' has not been uploaded")]
    MissingDocument { reference: String },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    FileStore(#[from] FileStoreError),
}
