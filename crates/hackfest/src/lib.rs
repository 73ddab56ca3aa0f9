//! Core workflows for hackathon event management: team registration and
//! application lifecycle on one side, judge ratings and leaderboard ranking on
//! the other. HTTP, durable storage, file uploads, and authentication live in
//! the surrounding gateway; this crate exposes the guarded state machines and
//! scoring logic those handlers call into.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
