// models/src/lib.rs
// Shared types and pure helpers for vitals data entry.

pub mod errors;
pub mod fields;
pub mod height;
pub mod identifiers;
pub mod medical;
pub mod temperature;
pub mod timestamps;

pub use errors::{ValidationError, ValidationResult};
pub use height::{to_centimeters, to_feet_inches, FeetInches, HeightMeasurement, HeightUnit};
pub use identifiers::{DraftId, DraftIdGenerator};
pub use medical::{
    build_bulk_payload, Gender, MonitoringMethod, NewPatient, NewVitalRecord, Patient, PatientForm,
    VitalReadingDraft, VitalRecord,
};
pub use temperature::{check_temperature_field, is_valid_temperature, TemperatureField};
pub use timestamps::{
    add_minutes, format_for_edit, format_timestamp, next_row_timestamp, parse_manual_timestamp, Timestamp,
};
