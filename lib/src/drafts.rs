// lib/src/drafts.rs

//! The ordered list of unsaved vitals rows for one patient session.
//!
//! Rows are only ever appended; update, delete and retimestamp address a row
//! by its [`DraftId`] and leave every other row, and the order, untouched.

use chrono::FixedOffset;
use log::debug;

use models::identifiers::{DraftId, DraftIdGenerator};
use models::medical::{build_bulk_payload, NewVitalRecord, VitalReadingDraft};
use models::temperature::{check_temperature_field, TemperatureField};
use models::timestamps::{next_row_timestamp, parse_manual_timestamp, Timestamp, ROW_INTERVAL_MINUTES};

use crate::errors::{VitalsError, VitalsResult};

#[derive(Debug, Clone, PartialEq)]
pub struct DraftRow {
    pub id: DraftId,
    pub data: VitalReadingDraft,
}

#[derive(Debug, Clone)]
pub struct DraftRows {
    rows: Vec<DraftRow>,
    ids: DraftIdGenerator,
    interval_minutes: i64,
}

impl DraftRows {
    pub fn new() -> Self {
        Self::with_interval(ROW_INTERVAL_MINUTES)
    }

    /// A list whose new rows are spaced `interval_minutes` apart.
    pub fn with_interval(interval_minutes: i64) -> Self {
        DraftRows {
            rows: Vec::new(),
            ids: DraftIdGenerator::new(),
            interval_minutes,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DraftRow> {
        self.rows.iter()
    }

    pub fn get(&self, id: DraftId) -> Option<&DraftRow> {
        self.rows.iter().find(|row| row.id == id)
    }

    fn get_mut(&mut self, id: DraftId) -> VitalsResult<&mut DraftRow> {
        self.rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(VitalsError::RowNotFound(id))
    }

    /// Appends an empty row. Its timestamp follows the last draft if there is
    /// one, else the last saved reading, else `now`.
    pub fn add(&mut self, last_saved: Option<Timestamp>, now: Timestamp) -> &DraftRow {
        let last_draft = self.rows.last().map(|row| row.data.timestamp);
        let timestamp = next_row_timestamp(last_draft, last_saved, now, self.interval_minutes);
        let id = self.ids.next_id();
        debug!("Adding draft row {} at {}", id, timestamp);
        let index = self.rows.len();
        self.rows.push(DraftRow {
            id,
            data: VitalReadingDraft::new(timestamp),
        });
        &self.rows[index]
    }

    /// Replaces a row's data wholesale.
    pub fn update(&mut self, id: DraftId, data: VitalReadingDraft) -> VitalsResult<()> {
        self.get_mut(id)?.data = data;
        Ok(())
    }

    /// Removes exactly the row with `id`.
    pub fn delete(&mut self, id: DraftId) -> VitalsResult<DraftRow> {
        let index = self
            .rows
            .iter()
            .position(|row| row.id == id)
            .ok_or(VitalsError::RowNotFound(id))?;
        debug!("Deleting draft row {}", id);
        Ok(self.rows.remove(index))
    }

    /// Sets a row's timestamp and keeps its other fields.
    pub fn retimestamp(&mut self, id: DraftId, timestamp: Timestamp) -> VitalsResult<()> {
        self.get_mut(id)?.data.timestamp = timestamp;
        Ok(())
    }

    /// Applies a manually typed timestamp. On a parse failure the row keeps
    /// its previous timestamp.
    pub fn edit_timestamp(&mut self, id: DraftId, input: &str, zone: &FixedOffset) -> VitalsResult<Timestamp> {
        let row = self.get_mut(id)?;
        let timestamp = parse_manual_timestamp(input, zone)?;
        row.data.timestamp = timestamp;
        Ok(timestamp)
    }

    /// Stores `raw` into a temperature column and validates it. A value
    /// outside the accepted range is cleared before the error is returned.
    pub fn commit_temperature(&mut self, id: DraftId, field: TemperatureField, raw: &str) -> VitalsResult<Option<f64>> {
        let row = self.get_mut(id)?;
        *row.data.temperature_mut(field) = raw.to_string();
        match check_temperature_field(field, raw) {
            Ok(value) => Ok(value),
            Err(e) => {
                row.data.temperature_mut(field).clear();
                Err(e.into())
            }
        }
    }

    /// The bulk-save body for every row, in order.
    pub fn to_payload(&self, patient_id: &str) -> VitalsResult<Vec<NewVitalRecord>> {
        let payload = build_bulk_payload(patient_id, self.rows.iter().map(|row| (row.id, &row.data)))?;
        Ok(payload)
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }
}

impl Default for DraftRows {
    fn default() -> Self {
        Self::new()
    }
}
