// lib/src/backend/http_backend.rs

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use models::medical::{NewPatient, NewVitalRecord, Patient, VitalRecord};

use crate::backend::VitalsBackend;
use crate::config::ClientConfig;
use crate::errors::{VitalsError, VitalsResult};

#[derive(Debug, Deserialize)]
struct BulkInsertResponse {
    inserted_count: usize,
}

/// [`VitalsBackend`] over HTTP, rooted at `{backend_url}/api`.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> VitalsResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(HttpBackend {
            client,
            base_url: format!("{}/api", config.backend_url),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder, url: &str) -> VitalsResult<Response> {
        debug!("Sending request to {}", url);
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            error!("Backend returned {} for {}", status, url);
            return Err(VitalsError::BackendStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> VitalsResult<T> {
        let url = self.url(path);
        let response = self.send(self.client.get(&url), &url).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl VitalsBackend for HttpBackend {
    async fn fetch_patient(&self, patient_id: &str) -> VitalsResult<Patient> {
        self.get_json(&format!("/patients/{}", patient_id)).await
    }

    async fn list_patients(&self, user_id: &str) -> VitalsResult<Vec<Patient>> {
        let url = self.url("/patients");
        let request = self.client.get(&url).query(&[("userId", user_id)]);
        let response = self.send(request, &url).await?;
        Ok(response.json().await?)
    }

    async fn create_patient(&self, patient: &NewPatient) -> VitalsResult<Patient> {
        let url = self.url("/patients");
        let response = self.send(self.client.post(&url).json(patient), &url).await?;
        Ok(response.json().await?)
    }

    async fn fetch_vitals(&self, patient_id: &str) -> VitalsResult<Vec<VitalRecord>> {
        self.get_json(&format!("/vitals/{}", patient_id)).await
    }

    async fn submit_vitals(&self, vitals: &[NewVitalRecord]) -> VitalsResult<usize> {
        let url = self.url("/vitals/bulk");
        let response = self.send(self.client.post(&url).json(vitals), &url).await?;
        let body: BulkInsertResponse = response.json().await?;
        Ok(body.inserted_count)
    }

    async fn export_vitals(&self, patient_id: &str) -> VitalsResult<Vec<u8>> {
        let url = self.url(&format!("/vitals/export/{}", patient_id));
        let response = self.send(self.client.get(&url), &url).await?;
        Ok(response.bytes().await?.to_vec())
    }
}
