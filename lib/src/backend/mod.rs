// lib/src/backend/mod.rs

pub mod http_backend;

use async_trait::async_trait;

use models::medical::{NewPatient, NewVitalRecord, Patient, VitalRecord};

use crate::errors::VitalsResult;

pub use http_backend::HttpBackend;

/// The REST service that stores patients and readings.
#[async_trait]
pub trait VitalsBackend: Send + Sync {
    async fn fetch_patient(&self, patient_id: &str) -> VitalsResult<Patient>;

    /// Patients registered by `user_id`, newest first.
    async fn list_patients(&self, user_id: &str) -> VitalsResult<Vec<Patient>>;

    async fn create_patient(&self, patient: &NewPatient) -> VitalsResult<Patient>;

    /// Saved readings for a patient in chronological order.
    async fn fetch_vitals(&self, patient_id: &str) -> VitalsResult<Vec<VitalRecord>>;

    /// Stores all readings in one request and returns how many were inserted.
    async fn submit_vitals(&self, vitals: &[NewVitalRecord]) -> VitalsResult<usize>;

    /// The patient's readings as an `.xlsx` workbook.
    async fn export_vitals(&self, patient_id: &str) -> VitalsResult<Vec<u8>>;
}
