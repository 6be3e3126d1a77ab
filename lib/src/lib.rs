// lib/src/lib.rs
// Client-side workflow for the core temperature study: configuration, the
// draft row list, the backend client and the per-patient session.

pub mod backend;
pub mod config;
pub mod drafts;
pub mod errors;
pub mod export;
pub mod session;

pub use crate::backend::{HttpBackend, VitalsBackend};
pub use crate::config::ClientConfig;
pub use crate::drafts::{DraftRow, DraftRows};
pub use crate::errors::{VitalsError, VitalsResult};
pub use crate::session::PatientSession;

// Shared types from the models crate.
pub use models;
