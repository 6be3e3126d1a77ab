// models/src/medical/vitals.rs
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{ValidationError, ValidationResult};
use crate::fields::{parse_optional_decimal, parse_optional_integer};
use crate::identifiers::DraftId;
use crate::temperature::TemperatureField;
use crate::timestamps::{to_iso_string, Timestamp};

/// A reading already stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalRecord {
    pub id: String,
    pub patient_id: String,
    pub timestamp: Timestamp,
    pub trial_device_reading: Option<f64>,
    pub probe_reading: Option<f64>,
    pub room_temperature: Option<f64>,
    pub body_temperature: Option<f64>,
    pub heart_rate: Option<i32>,
    pub spo2: Option<i32>,
    #[serde(default)]
    pub blood_pressure: Option<String>,
    #[serde(default)]
    pub medications: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// An unsaved row as typed into the form. Every field is kept as text until
/// submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalReadingDraft {
    pub timestamp: Timestamp,
    pub trial_device_reading: String,
    pub probe_reading: String,
    pub room_temperature: String,
    pub body_temperature: String,
    pub heart_rate: String, // bpm
    pub spo2: String, // %
    pub blood_pressure: String, // e.g., "120/80"
    pub medications: String,
}

impl VitalReadingDraft {
    /// An empty row at `timestamp`.
    pub fn new(timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            trial_device_reading: String::new(),
            probe_reading: String::new(),
            room_temperature: String::new(),
            body_temperature: String::new(),
            heart_rate: String::new(),
            spo2: String::new(),
            blood_pressure: String::new(),
            medications: String::new(),
        }
    }

    pub fn temperature(&self, field: TemperatureField) -> &str {
        match field {
            TemperatureField::TrialDeviceReading => &self.trial_device_reading,
            TemperatureField::ProbeReading => &self.probe_reading,
            TemperatureField::BodyTemperature => &self.body_temperature,
            TemperatureField::RoomTemperature => &self.room_temperature,
        }
    }

    pub fn temperature_mut(&mut self, field: TemperatureField) -> &mut String {
        match field {
            TemperatureField::TrialDeviceReading => &mut self.trial_device_reading,
            TemperatureField::ProbeReading => &mut self.probe_reading,
            TemperatureField::BodyTemperature => &mut self.body_temperature,
            TemperatureField::RoomTemperature => &mut self.room_temperature,
        }
    }

    /// Converts the row into the bulk-save body for `patient_id`.
    pub fn to_new_record(&self, patient_id: &str) -> ValidationResult<NewVitalRecord> {
        let decimal = |field: TemperatureField| parse_optional_decimal(field.as_str(), self.temperature(field));
        Ok(NewVitalRecord {
            patient_id: patient_id.to_string(),
            timestamp: to_iso_string(self.timestamp),
            trial_device_reading: decimal(TemperatureField::TrialDeviceReading)?,
            probe_reading: decimal(TemperatureField::ProbeReading)?,
            room_temperature: decimal(TemperatureField::RoomTemperature)?,
            body_temperature: decimal(TemperatureField::BodyTemperature)?,
            heart_rate: parse_optional_integer("heartRate", &self.heart_rate)?,
            spo2: parse_optional_integer("spo2", &self.spo2)?,
            blood_pressure: self.blood_pressure.clone(),
            medications: self.medications.clone(),
        })
    }
}

/// Request body for one reading in `POST /api/vitals/bulk`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVitalRecord {
    pub patient_id: String,
    pub timestamp: String, // ISO-8601, UTC
    pub trial_device_reading: Option<f64>,
    pub probe_reading: Option<f64>,
    pub room_temperature: Option<f64>,
    pub body_temperature: Option<f64>,
    pub heart_rate: Option<i32>,
    pub spo2: Option<i32>,
    pub blood_pressure: String,
    pub medications: String,
}

/// Builds the bulk-save body from draft rows, in row order. The first row
/// that fails to convert aborts the whole batch.
pub fn build_bulk_payload<'a, I>(patient_id: &str, rows: I) -> ValidationResult<Vec<NewVitalRecord>>
where
    I: IntoIterator<Item = (DraftId, &'a VitalReadingDraft)>,
{
    rows.into_iter()
        .map(|(id, draft)| {
            draft.to_new_record(patient_id).map_err(|e| ValidationError::InvalidRow {
                id,
                source: Box::new(e),
            })
        })
        .collect()
}
