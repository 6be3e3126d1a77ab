pub mod patient;
pub mod vitals;

pub use patient::{Gender, MonitoringMethod, NewPatient, Patient, PatientForm};
pub use vitals::{build_bulk_payload, NewVitalRecord, VitalReadingDraft, VitalRecord};
