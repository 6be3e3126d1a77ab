// lib/src/session.rs

//! State owned by one open patient screen: the patient, the saved readings
//! fetched for them, and the rows being entered.

use std::path::{Path, PathBuf};

use chrono::{FixedOffset, NaiveDate};
use log::{info, warn};

use models::identifiers::DraftId;
use models::medical::{Patient, VitalReadingDraft, VitalRecord};
use models::temperature::TemperatureField;
use models::timestamps::{format_for_edit, format_timestamp, Timestamp};

use crate::backend::VitalsBackend;
use crate::config::ClientConfig;
use crate::drafts::DraftRows;
use crate::errors::{VitalsError, VitalsResult};
use crate::export::{export_file_name, write_export};

#[derive(Debug, Clone)]
pub struct PatientSession {
    patient: Patient,
    history: Vec<VitalRecord>,
    drafts: DraftRows,
    zone: FixedOffset,
}

impl PatientSession {
    pub fn new(patient: Patient, history: Vec<VitalRecord>, config: &ClientConfig) -> VitalsResult<Self> {
        Ok(PatientSession {
            patient,
            history,
            drafts: DraftRows::with_interval(config.row_interval_minutes),
            zone: config.utc_offset()?,
        })
    }

    /// Fetches the patient and their saved readings.
    pub async fn load<B>(backend: &B, patient_id: &str, config: &ClientConfig) -> VitalsResult<Self>
    where
        B: VitalsBackend + ?Sized,
    {
        let patient = backend.fetch_patient(patient_id).await?;
        let history = backend.fetch_vitals(patient_id).await?;
        info!("Loaded patient {} with {} saved readings", patient_id, history.len());
        Self::new(patient, history, config)
    }

    pub fn patient(&self) -> &Patient {
        &self.patient
    }

    pub fn history(&self) -> &[VitalRecord] {
        &self.history
    }

    pub fn drafts(&self) -> &DraftRows {
        &self.drafts
    }

    pub fn zone(&self) -> &FixedOffset {
        &self.zone
    }

    pub fn display_timestamp(&self, instant: Timestamp) -> String {
        format_timestamp(instant, &self.zone)
    }

    /// Text to seed a row's timestamp editor with.
    pub fn edit_buffer(&self, id: DraftId) -> VitalsResult<String> {
        let row = self.drafts.get(id).ok_or(VitalsError::RowNotFound(id))?;
        Ok(format_for_edit(row.data.timestamp, &self.zone))
    }

    pub fn add_row(&mut self, now: Timestamp) -> DraftId {
        let last_saved = self.history.last().map(|record| record.timestamp);
        self.drafts.add(last_saved, now).id
    }

    pub fn update_row(&mut self, id: DraftId, data: VitalReadingDraft) -> VitalsResult<()> {
        self.drafts.update(id, data)
    }

    pub fn delete_row(&mut self, id: DraftId) -> VitalsResult<()> {
        self.drafts.delete(id).map(|_| ())
    }

    pub fn retimestamp_row(&mut self, id: DraftId, timestamp: Timestamp) -> VitalsResult<()> {
        self.drafts.retimestamp(id, timestamp)
    }

    pub fn edit_row_timestamp(&mut self, id: DraftId, input: &str) -> VitalsResult<Timestamp> {
        let zone = self.zone;
        self.drafts.edit_timestamp(id, input, &zone)
    }

    pub fn commit_temperature(&mut self, id: DraftId, field: TemperatureField, raw: &str) -> VitalsResult<Option<f64>> {
        self.drafts.commit_temperature(id, field, raw)
    }

    pub async fn refresh<B>(&mut self, backend: &B) -> VitalsResult<()>
    where
        B: VitalsBackend + ?Sized,
    {
        self.history = backend.fetch_vitals(&self.patient.patient_id).await?;
        Ok(())
    }

    /// Submits every draft row in one request. On success the drafts are
    /// cleared and the saved readings re-fetched; on failure nothing changes.
    pub async fn save_all<B>(&mut self, backend: &B) -> VitalsResult<usize>
    where
        B: VitalsBackend + ?Sized,
    {
        if self.drafts.is_empty() {
            return Err(VitalsError::NothingToSave);
        }
        let payload = self.drafts.to_payload(&self.patient.patient_id)?;
        let inserted = backend.submit_vitals(&payload).await?;
        info!("Saved {} readings for {}", inserted, self.patient.patient_id);
        self.drafts.clear();

        if let Err(e) = self.refresh(backend).await {
            warn!("Saved readings but failed to refresh history: {}", e);
        }
        Ok(inserted)
    }

    /// Downloads the patient's workbook into `directory`, named for `today`.
    pub async fn export_to<B>(&self, backend: &B, directory: &Path, today: NaiveDate) -> VitalsResult<PathBuf>
    where
        B: VitalsBackend + ?Sized,
    {
        let bytes = backend.export_vitals(&self.patient.patient_id).await?;
        let file_name = export_file_name(&self.patient.patient_id, today);
        write_export(directory, &file_name, &bytes).await
    }
}
