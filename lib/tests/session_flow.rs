// lib/tests/session_flow.rs

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use tokio::sync::Mutex;

use coretemp::models::medical::{
    Gender, MonitoringMethod, NewPatient, NewVitalRecord, Patient, VitalRecord,
};
use coretemp::models::temperature::TemperatureField;
use coretemp::models::timestamps::{parse_iso, Timestamp};
use coretemp::{ClientConfig, PatientSession, VitalsBackend, VitalsError, VitalsResult};

fn at(h: u32, mi: u32) -> Timestamp {
    Utc.with_ymd_and_hms(2025, 1, 5, h, mi, 0).unwrap()
}

fn patient() -> Patient {
    Patient {
        id: Some("665f1a".to_string()),
        patient_id: "PT001".to_string(),
        user_id: "user-1".to_string(),
        age: 47,
        gender: Gender::Male,
        weight: 82.0,
        height_cm: 180.0,
        height_feet: 5,
        height_inches: 10.9,
        has_sepsis: true,
        monitoring_method: MonitoringMethod::Nasal,
        additional_notes: String::new(),
        created_at: None,
    }
}

fn saved(id: &str, timestamp: Timestamp) -> VitalRecord {
    VitalRecord {
        id: id.to_string(),
        patient_id: "PT001".to_string(),
        timestamp,
        trial_device_reading: Some(37.0),
        probe_reading: Some(37.2),
        room_temperature: Some(22.0),
        body_temperature: None,
        heart_rate: Some(88),
        spo2: Some(97),
        blood_pressure: Some("120/80".to_string()),
        medications: None,
        created_at: None,
    }
}

/// Keeps readings in memory and records bulk submissions.
#[derive(Default)]
struct FakeBackend {
    vitals: Mutex<Vec<VitalRecord>>,
    submissions: Mutex<Vec<Vec<NewVitalRecord>>>,
    reject_submit: bool,
}

impl FakeBackend {
    fn with_history(history: Vec<VitalRecord>) -> Self {
        FakeBackend {
            vitals: Mutex::new(history),
            ..FakeBackend::default()
        }
    }
}

#[async_trait]
impl VitalsBackend for FakeBackend {
    async fn fetch_patient(&self, patient_id: &str) -> VitalsResult<Patient> {
        if patient_id == "PT001" {
            Ok(patient())
        } else {
            Err(VitalsError::BackendStatus {
                status: 404,
                url: format!("/api/patients/{}", patient_id),
            })
        }
    }

    async fn list_patients(&self, _user_id: &str) -> VitalsResult<Vec<Patient>> {
        Ok(vec![patient()])
    }

    async fn create_patient(&self, _patient: &NewPatient) -> VitalsResult<Patient> {
        Ok(patient())
    }

    async fn fetch_vitals(&self, _patient_id: &str) -> VitalsResult<Vec<VitalRecord>> {
        Ok(self.vitals.lock().await.clone())
    }

    async fn submit_vitals(&self, vitals: &[NewVitalRecord]) -> VitalsResult<usize> {
        if self.reject_submit {
            return Err(VitalsError::BackendStatus {
                status: 500,
                url: "/api/vitals/bulk".to_string(),
            });
        }
        let mut stored = self.vitals.lock().await;
        for (n, vital) in vitals.iter().enumerate() {
            let mut record = saved(&format!("new-{}", n), parse_iso(&vital.timestamp)?);
            record.trial_device_reading = vital.trial_device_reading;
            stored.push(record);
        }
        self.submissions.lock().await.push(vitals.to_vec());
        Ok(vitals.len())
    }

    async fn export_vitals(&self, _patient_id: &str) -> VitalsResult<Vec<u8>> {
        Ok(b"PK\x03\x04workbook".to_vec())
    }
}

#[tokio::test]
async fn new_rows_continue_from_saved_history() {
    let backend = FakeBackend::with_history(vec![saved("a", at(9, 0)), saved("b", at(9, 30))]);
    let mut session = PatientSession::load(&backend, "PT001", &ClientConfig::default()).await.unwrap();

    let first = session.add_row(at(14, 0));
    let second = session.add_row(at(14, 0));

    let stamps: Vec<Timestamp> = session.drafts().iter().map(|row| row.data.timestamp).collect();
    assert_eq!(stamps, vec![at(9, 35), at(9, 40)]);
    assert_ne!(first, second);
}

#[tokio::test]
async fn save_all_submits_clears_and_refreshes() {
    let backend = FakeBackend::with_history(vec![saved("a", at(9, 0))]);
    let mut session = PatientSession::load(&backend, "PT001", &ClientConfig::default()).await.unwrap();

    let id = session.add_row(at(14, 0));
    session.commit_temperature(id, TemperatureField::TrialDeviceReading, "37.6").unwrap();
    session.add_row(at(14, 0));

    let inserted = session.save_all(&backend).await.unwrap();
    assert_eq!(inserted, 2);
    assert!(session.drafts().is_empty());
    assert_eq!(session.history().len(), 3);

    let submissions = backend.submissions.lock().await;
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0][0].trial_device_reading, Some(37.6));
    assert_eq!(submissions[0][0].timestamp, "2025-01-05T09:05:00.000Z");

    drop(submissions);
    // The next row continues from the freshly saved readings.
    session.add_row(at(14, 0));
    let next = session.drafts().iter().next().unwrap();
    assert_eq!(next.data.timestamp, at(9, 15));
}

#[tokio::test]
async fn save_all_without_rows_is_rejected() {
    let backend = FakeBackend::default();
    let mut session = PatientSession::load(&backend, "PT001", &ClientConfig::default()).await.unwrap();
    assert!(matches!(session.save_all(&backend).await, Err(VitalsError::NothingToSave)));
}

#[tokio::test]
async fn failed_submit_keeps_drafts() {
    let backend = FakeBackend {
        reject_submit: true,
        ..FakeBackend::default()
    };
    let mut session = PatientSession::load(&backend, "PT001", &ClientConfig::default()).await.unwrap();
    session.add_row(at(14, 0));

    let result = session.save_all(&backend).await;
    assert!(matches!(result, Err(VitalsError::BackendStatus { status: 500, .. })));
    assert_eq!(session.drafts().len(), 1);
}

#[tokio::test]
async fn manual_edit_uses_configured_offset() {
    let backend = FakeBackend::default();
    let config = ClientConfig {
        utc_offset_minutes: 60,
        ..ClientConfig::default()
    };
    let mut session = PatientSession::load(&backend, "PT001", &config).await.unwrap();
    let id = session.add_row(at(14, 0));

    assert_eq!(session.edit_buffer(id).unwrap(), "05/01/25 15:00");
    assert_eq!(session.display_timestamp(at(14, 0)), "05 Jan 2025, 03:00 PM");

    session.edit_row_timestamp(id, "05/01/25 16:10").unwrap();
    assert_eq!(session.drafts().get(id).unwrap().data.timestamp, at(15, 10));

    assert!(session.edit_row_timestamp(id, "16:10").is_err());
    assert_eq!(session.drafts().get(id).unwrap().data.timestamp, at(15, 10));
}

#[tokio::test]
async fn export_writes_dated_workbook() {
    let backend = FakeBackend::default();
    let session = PatientSession::load(&backend, "PT001", &ClientConfig::default()).await.unwrap();
    let dir = tempfile::tempdir().unwrap();

    let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
    let path = session.export_to(&backend, dir.path(), date).await.unwrap();

    assert_eq!(path.file_name().unwrap(), "PT001_vitals_2025-01-05.xlsx");
    assert_eq!(std::fs::read(&path).unwrap(), b"PK\x03\x04workbook");
}

#[tokio::test]
async fn unknown_patient_fails_to_load() {
    let backend = FakeBackend::default();
    let result = PatientSession::load(&backend, "PT999", &ClientConfig::default()).await;
    assert!(matches!(result, Err(VitalsError::BackendStatus { status: 404, .. })));
}
