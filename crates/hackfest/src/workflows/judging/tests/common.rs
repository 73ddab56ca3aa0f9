use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::workflows::judging::domain::{CriterionScores, JudgeId, Rating};
use crate::workflows::judging::repository::{PersistenceError, RatingPersistence};
use crate::workflows::judging::service::JudgingService;
use crate::workflows::judging::store::RatingStore;
use crate::workflows::registration::domain::{
    ApplicationStatus, PaymentStatus, TeamId, TeamRecord, TeamType, Track,
};
use crate::workflows::registration::repository::{RepositoryError, TeamRepository};

#[derive(Default, Clone)]
pub(super) struct MemoryTeams {
    records: Arc<Mutex<HashMap<TeamId, TeamRecord>>>,
}

impl MemoryTeams {
    pub(super) fn seed(&self, record: TeamRecord) {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .insert(record.id.clone(), record);
    }

    pub(super) fn remove(&self, id: &TeamId) {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .remove(id);
    }
}

impl TeamRepository for MemoryTeams {
    fn insert(&self, record: TeamRecord) -> Result<TeamRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: TeamRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &TeamId) -> Result<Option<TeamRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn delete(&self, id: &TeamId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }

    fn list(&self) -> Result<Vec<TeamRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(super) struct MirrorPersistence {
    persisted: Arc<Mutex<Vec<Rating>>>,
}

impl MirrorPersistence {
    pub(super) fn persisted(&self) -> Vec<Rating> {
        self.persisted.lock().expect("mirror mutex poisoned").clone()
    }
}

impl RatingPersistence for MirrorPersistence {
    fn persist(&self, rating: &Rating) -> Result<(), PersistenceError> {
        self.persisted
            .lock()
            .expect("mirror mutex poisoned")
            .push(rating.clone());
        Ok(())
    }

    fn remove_team(&self, team_id: &TeamId) -> Result<(), PersistenceError> {
        self.persisted
            .lock()
            .expect("mirror mutex poisoned")
            .retain(|rating| &rating.team_id != team_id);
        Ok(())
    }
}

pub(super) struct OfflinePersistence;

impl RatingPersistence for OfflinePersistence {
    fn persist(&self, _rating: &Rating) -> Result<(), PersistenceError> {
        Err(PersistenceError::Unavailable("database offline".to_string()))
    }

    fn remove_team(&self, _team_id: &TeamId) -> Result<(), PersistenceError> {
        Err(PersistenceError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn team(id: &str, status: ApplicationStatus) -> TeamRecord {
    TeamRecord {
        id: TeamId(id.to_string()),
        name: format!("team {id}"),
        team_type: TeamType::Team,
        member_count: 3,
        track: Track::AiMl,
        application_status: status,
        payment_status: PaymentStatus::None,
        has_proposal: true,
        proposal_ref: Some(format!("s3://hackfest/proposals/{id}.pdf")),
        payment_proof_ref: None,
        created_at: Utc::now(),
    }
}

pub(super) fn scores(
    innovation: u8,
    technicality: u8,
    presentation: u8,
    feasibility: u8,
    impact: u8,
) -> CriterionScores {
    CriterionScores {
        innovation,
        technicality,
        presentation,
        feasibility,
        impact,
    }
}

pub(super) fn judge(id: &str) -> JudgeId {
    JudgeId(id.to_string())
}

pub(super) type Service = JudgingService<MemoryTeams, MirrorPersistence>;

pub(super) fn build_service() -> (
    Service,
    Arc<MemoryTeams>,
    Arc<RatingStore>,
    Arc<MirrorPersistence>,
) {
    let teams = Arc::new(MemoryTeams::default());
    let store = Arc::new(RatingStore::new());
    let persistence = Arc::new(MirrorPersistence::default());
    let service = JudgingService::new(teams.clone(), store.clone(), persistence.clone());
    (service, teams, store, persistence)
}

pub(super) fn rate(
    service: &Service,
    judge_id: &str,
    team_id: &str,
    values: CriterionScores,
) -> Rating {
    service
        .upsert_rating(judge(judge_id), TeamId(team_id.to_string()), values, None)
        .expect("rating accepted")
}
