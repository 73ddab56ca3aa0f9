use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use crate::workflows::judging::store::RatingStore;
use crate::workflows::registration::domain::{
    ApplicationStatus, NewTeam, TeamId, TeamRecord, TeamType, Track,
};
use crate::workflows::registration::repository::{
    EventError, EventPublisher, FileStore, FileStoreError, LifecycleEvent, RepositoryError,
    TeamRepository,
};
use crate::workflows::registration::service::RegistrationService;

#[derive(Default, Clone)]
pub(super) struct MemoryTeams {
    pub(super) records: Arc<Mutex<HashMap<TeamId, TeamRecord>>>,
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
        if guard.contains_key(&record.id) {
            guard.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
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
pub(super) struct MemoryEvents {
    events: Arc<Mutex<Vec<LifecycleEvent>>>,
}

impl MemoryEvents {
    pub(super) fn events(&self) -> Vec<LifecycleEvent> {
        self.events.lock().expect("event mutex poisoned").clone()
    }
}

impl EventPublisher for MemoryEvents {
    fn publish(&self, event: LifecycleEvent) -> Result<(), EventError> {
        self.events.lock().expect("event mutex poisoned").push(event);
        Ok(())
    }
}

/// File store double that only resolves references explicitly marked as
/// uploaded.
#[derive(Default, Clone)]
pub(super) struct RecordedUploads {
    keys: Arc<Mutex<HashSet<String>>>,
}

impl RecordedUploads {
    pub(super) fn add(&self, reference: &str) {
        self.keys
            .lock()
            .expect("upload mutex poisoned")
            .insert(reference.to_string());
    }
}

impl FileStore for RecordedUploads {
    fn exists(&self, reference: &str) -> Result<bool, FileStoreError> {
        let guard = self.keys.lock().expect("upload mutex poisoned");
        Ok(guard.contains(reference))
    }
}

pub(super) struct OfflineFiles;

impl FileStore for OfflineFiles {
    fn exists(&self, _reference: &str) -> Result<bool, FileStoreError> {
        Err(FileStoreError::Unavailable("object storage offline".to_string()))
    }
}

pub(super) type Service = RegistrationService<MemoryTeams, MemoryEvents, RecordedUploads>;

pub(super) fn build_service() -> (
    Service,
    Arc<MemoryTeams>,
    Arc<MemoryEvents>,
    Arc<RecordedUploads>,
    Arc<RatingStore>,
) {
    let repository = Arc::new(MemoryTeams::default());
    let events = Arc::new(MemoryEvents::default());
    let uploads = Arc::new(RecordedUploads::default());
    let ratings = Arc::new(RatingStore::new());
    let service = RegistrationService::new(
        repository.clone(),
        events.clone(),
        uploads.clone(),
        ratings.clone(),
    );
    (service, repository, events, uploads, ratings)
}

pub(super) fn new_team(name: &str) -> NewTeam {
    NewTeam {
        name: name.to_string(),
        team_type: TeamType::Team,
        member_count: 3,
        track: Track::AiMl,
        proposal_ref: None,
    }
}

pub(super) fn register_with_proposal(
    service: &Service,
    uploads: &RecordedUploads,
    name: &str,
) -> TeamRecord {
    let reference = format!("s3://hackfest/proposals/{name}.pdf");
    uploads.add(&reference);
    let mut team = new_team(name);
    team.proposal_ref = Some(reference);
    service.register_team(team).expect("registration succeeds")
}

pub(super) fn shortlist(service: &Service, uploads: &RecordedUploads, name: &str) -> TeamRecord {
    let team = register_with_proposal(service, uploads, name);
    service
        .set_application_status(&team.id, ApplicationStatus::UnderReview)
        .expect("moves to under_review");
    service
        .set_application_status(&team.id, ApplicationStatus::Shortlisted)
        .expect("moves to shortlisted")
}
