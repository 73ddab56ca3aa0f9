use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use hackfest::workflows::judging::{PersistenceError, Rating, RatingPersistence};
use hackfest::workflows::registration::{
    EventError, EventPublisher, FileStore, FileStoreError, LifecycleEvent, RepositoryError,
    TeamId, TeamRecord, TeamRepository,
};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryTeamRepository {
    records: Arc<Mutex<HashMap<TeamId, TeamRecord>>>,
}

impl TeamRepository for InMemoryTeamRepository {
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

/// Publishes lifecycle events to the log and keeps them for inspection.
#[derive(Default, Clone)]
pub(crate) struct InMemoryEventPublisher {
    events: Arc<Mutex<Vec<LifecycleEvent>>>,
}

impl InMemoryEventPublisher {
    pub(crate) fn events(&self) -> Vec<LifecycleEvent> {
        self.events.lock().expect("event mutex poisoned").clone()
    }
}

impl EventPublisher for InMemoryEventPublisher {
    fn publish(&self, event: LifecycleEvent) -> Result<(), EventError> {
        tracing::info!(
            team_id = %event.team_id,
            field = event.field.label(),
            old = %event.old_value,
            new = %event.new_value,
            "lifecycle event"
        );
        self.events.lock().expect("event mutex poisoned").push(event);
        Ok(())
    }
}

/// File store for the self-contained deployment: uploads are handled by the
/// gateway out of band, so any non-blank reference is accepted as present.
#[derive(Default, Clone)]
pub(crate) struct PermissiveFileStore;

impl FileStore for PermissiveFileStore {
    fn exists(&self, reference: &str) -> Result<bool, FileStoreError> {
        Ok(!reference.trim().is_empty())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryRatingPersistence {
    ratings: Arc<Mutex<Vec<Rating>>>,
}

impl RatingPersistence for InMemoryRatingPersistence {
    fn persist(&self, rating: &Rating) -> Result<(), PersistenceError> {
        self.ratings
            .lock()
            .expect("rating mutex poisoned")
            .push(rating.clone());
        Ok(())
    }

    fn remove_team(&self, team_id: &TeamId) -> Result<(), PersistenceError> {
        self.ratings
            .lock()
            .expect("rating mutex poisoned")
            .retain(|rating| &rating.team_id != team_id);
        Ok(())
    }
}
