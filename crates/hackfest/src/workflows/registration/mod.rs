//! Team registration, proposal intake, and application lifecycle management.
//!
//! The application and payment state machines live in `domain`; the service
//! enforces their transition tables against gateway-owned storage and emits a
//! lifecycle event for every committed change.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicationStatus, NewTeam, PaymentStatus, TeamId, TeamRecord, TeamStatusView, TeamType,
    Track, MAX_TEAM_MEMBERS, MIN_TEAM_MEMBERS,
};
pub use repository::{
    EventError, EventPublisher, FileStore, FileStoreError, LifecycleEvent, LifecycleField,
    RepositoryError, TeamRepository,
};
pub use router::registration_router;
pub use service::{LifecycleError, RegistrationService};
