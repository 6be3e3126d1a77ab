// models/src/medical/patient.rs
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{ValidationError, ValidationResult};
use crate::fields::parse_required_decimal;
use crate::height::HeightMeasurement;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

/// Where the reference temperature probe sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MonitoringMethod {
    #[default]
    Nasal,
    Oesophageal,
    Rectal,
}

impl fmt::Display for MonitoringMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MonitoringMethod::Nasal => "Nasal",
            MonitoringMethod::Oesophageal => "Oesophageal",
            MonitoringMethod::Rectal => "Rectal",
        };
        f.write_str(name)
    }
}

/// A registered study patient as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    #[serde(default)]
    pub id: Option<String>, // backend document id
    pub patient_id: String, // e.g., "PT001"
    pub user_id: String, // clinician who registered the patient
    pub age: u32,
    pub gender: Gender,
    pub weight: f64, // kg
    pub height_cm: f64,
    pub height_feet: i32,
    pub height_inches: f64,
    pub has_sepsis: bool,
    pub monitoring_method: MonitoringMethod,
    #[serde(default)]
    pub additional_notes: String,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl Patient {
    /// The stored height, with centimeters as the source of truth.
    pub fn height(&self) -> HeightMeasurement {
        HeightMeasurement::from_centimeters(self.height_cm)
    }
}

/// Request body for `POST /api/patients`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    pub user_id: String,
    pub age: u32,
    pub gender: Gender,
    pub weight: f64,
    #[serde(flatten)]
    pub height: HeightMeasurement,
    pub has_sepsis: bool,
    pub monitoring_method: MonitoringMethod,
    pub additional_notes: String,
}

/// The registration form as entered. Age and weight stay as text until
/// submission; height is kept converted as the user types.
#[derive(Debug, Clone, Default)]
pub struct PatientForm {
    pub age: String,
    pub gender: Gender,
    pub weight: String,
    pub height: Option<HeightMeasurement>,
    pub has_sepsis: bool,
    pub monitoring_method: MonitoringMethod,
    pub additional_notes: String,
}

impl PatientForm {
    /// Validates the required fields (age, weight, height) and builds the
    /// request body.
    pub fn into_new_patient(self, user_id: &str) -> ValidationResult<NewPatient> {
        let age_text = self.age.trim();
        if age_text.is_empty() {
            return Err(ValidationError::MissingField("age"));
        }
        let age = age_text.parse::<u32>().map_err(|_| ValidationError::InvalidNumber {
            field: "age".to_string(),
            value: self.age.clone(),
        })?;
        let weight = parse_required_decimal("weight", &self.weight)?;
        let height = self.height.ok_or(ValidationError::MissingField("heightCm"))?;

        Ok(NewPatient {
            user_id: user_id.to_string(),
            age,
            gender: self.gender,
            weight,
            height,
            has_sepsis: self.has_sepsis,
            monitoring_method: self.monitoring_method,
            additional_notes: self.additional_notes,
        })
    }
}
