// cli/src/cli/handlers.rs

// Command handlers. Local conversions print straight away; patient and vitals
// commands go through the configured HTTP backend.

use anyhow::{anyhow, Context, Result};
use chrono::{FixedOffset, Local};
use log::debug;

use coretemp::models::height::{to_centimeters, to_feet_inches, FeetInches, HeightMeasurement};
use coretemp::models::temperature::{check_temperature_field, TemperatureField};
use coretemp::models::timestamps::{format_for_edit, format_timestamp, parse_iso, parse_manual_timestamp, to_iso_string};
use coretemp::models::medical::{Patient, PatientForm, VitalRecord};
use coretemp::{ClientConfig, HttpBackend, PatientSession, VitalsBackend};

use crate::cli::commands::{
    AddPatientArgs, CliArgs, Commands, HeightCommand, PatientCommand, TimestampCommand, VitalsCommand,
};

pub async fn run(args: CliArgs) -> Result<()> {
    debug!("Running {:?}", args.command);
    match args.command {
        Commands::Height { command } => {
            println!("{}", handle_height(&command));
            Ok(())
        }
        Commands::Temp { value, field } => {
            println!("{}", handle_temp(field.into(), &value)?);
            Ok(())
        }
        Commands::Timestamp { command } => {
            let config = ClientConfig::load(&args.config)?;
            println!("{}", handle_timestamp(&command, &config.utc_offset()?)?);
            Ok(())
        }
        Commands::Patient { command } => {
            let config = ClientConfig::load(&args.config)?;
            let backend = HttpBackend::new(&config)?;
            handle_patient(&backend, &command).await
        }
        Commands::Vitals { command } => {
            let config = ClientConfig::load(&args.config)?;
            let backend = HttpBackend::new(&config)?;
            handle_vitals(&backend, &config, &command).await
        }
    }
}

pub fn handle_height(command: &HeightCommand) -> String {
    match *command {
        HeightCommand::Cm { cm } => {
            let FeetInches { feet, inches } = to_feet_inches(cm);
            format!("{} cm = {}' {}\"", cm, feet, inches)
        }
        HeightCommand::Ft { feet, inches } => {
            format!("{}' {}\" = {} cm", feet, inches, to_centimeters(feet, inches))
        }
    }
}

/// Reports whether `value` is acceptable for `field`. A rejected value is an
/// error so the process exits non-zero.
pub fn handle_temp(field: TemperatureField, value: &str) -> Result<String> {
    match check_temperature_field(field, value) {
        Ok(Some(v)) => Ok(format!("{} {}°C is valid", field, v)),
        Ok(None) => Ok(format!("{} left blank", field)),
        Err(e) => Err(anyhow!("{} rejected: {}", field, e)),
    }
}

pub fn handle_timestamp(command: &TimestampCommand, zone: &FixedOffset) -> Result<String> {
    match command {
        TimestampCommand::Show { instant } => {
            let instant = parse_iso(instant)?;
            Ok(format!(
                "{:<10} {}\n{:<10} {}",
                "Display", format_timestamp(instant, zone),
                "Edit", format_for_edit(instant, zone),
            ))
        }
        TimestampCommand::Parse { input } => {
            let instant = parse_manual_timestamp(input, zone)?;
            Ok(to_iso_string(instant))
        }
    }
}

fn print_patient(patient: &Patient) {
    println!("{:<18} {}", "Patient ID", patient.patient_id);
    println!("{:<18} {}", "Age", patient.age);
    println!("{:<18} {:?}", "Gender", patient.gender);
    println!("{:<18} {} kg", "Weight", patient.weight);
    println!("{:<18} {}", "Height", patient.height().describe());
    println!("{:<18} {}", "Sepsis", if patient.has_sepsis { "YES" } else { "NO" });
    println!("{:<18} {}", "Monitoring", patient.monitoring_method);
}

/// Fills the registration form from command-line flags. Height in cm wins
/// when given; otherwise feet and inches are converted.
pub fn patient_form(args: &AddPatientArgs) -> PatientForm {
    let height = match (args.height_cm, args.height_ft) {
        (Some(cm), _) => Some(HeightMeasurement::from_centimeters(cm)),
        (None, Some(feet)) => Some(HeightMeasurement::from_feet_inches(feet, args.height_in.unwrap_or(0.0))),
        (None, None) => None,
    };
    PatientForm {
        age: args.age.clone(),
        gender: args.gender.into(),
        weight: args.weight.clone(),
        height,
        has_sepsis: args.sepsis,
        monitoring_method: args.method.into(),
        additional_notes: args.notes.clone(),
    }
}

async fn register_patient<B: VitalsBackend>(backend: &B, args: &AddPatientArgs) -> Result<Patient> {
    let new_patient = patient_form(args)
        .into_new_patient(&args.user)
        .context("Invalid registration form")?;
    debug!("Registering patient for {}", args.user);
    let patient = backend
        .create_patient(&new_patient)
        .await
        .context("Failed to register patient")?;
    Ok(patient)
}

async fn handle_patient<B: VitalsBackend>(backend: &B, command: &PatientCommand) -> Result<()> {
    match command {
        PatientCommand::Add(args) => {
            let patient = register_patient(backend, args).await?;
            println!("Registered {}", patient.patient_id);
            print_patient(&patient);
        }
        PatientCommand::Show { patient_id } => {
            let patient = backend
                .fetch_patient(patient_id)
                .await
                .with_context(|| format!("Failed to fetch patient {}", patient_id))?;
            print_patient(&patient);
        }
        PatientCommand::List { user } => {
            let patients = backend.list_patients(user).await.context("Failed to list patients")?;
            println!("{:<10} {:<5} {:<8} {:<12}", "ID", "Age", "Gender", "Monitoring");
            println!("{:-<10} {:-<5} {:-<8} {:-<12}", "", "", "", "");
            for p in &patients {
                println!(
                    "{:<10} {:<5} {:<8} {:<12}",
                    p.patient_id, p.age, format!("{:?}", p.gender), p.monitoring_method.to_string()
                );
            }
        }
    }
    Ok(())
}

fn cell<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

fn print_vitals(records: &[VitalRecord], zone: &FixedOffset) {
    println!(
        "{:<5} {:<24} {:<8} {:<8} {:<8} {:<8} {:<5} {:<5} {:<9} {}",
        "S.No", "Timestamp", "Device", "Probe", "Body", "Room", "HR", "SpO2", "BP", "Medications"
    );
    for (n, r) in records.iter().enumerate() {
        println!(
            "{:<5} {:<24} {:<8} {:<8} {:<8} {:<8} {:<5} {:<5} {:<9} {}",
            n + 1,
            format_timestamp(r.timestamp, zone),
            cell(&r.trial_device_reading),
            cell(&r.probe_reading),
            cell(&r.body_temperature),
            cell(&r.room_temperature),
            cell(&r.heart_rate),
            cell(&r.spo2),
            r.blood_pressure.as_deref().unwrap_or(""),
            r.medications.as_deref().unwrap_or(""),
        );
    }
}

async fn handle_vitals<B: VitalsBackend>(backend: &B, config: &ClientConfig, command: &VitalsCommand) -> Result<()> {
    match command {
        VitalsCommand::List { patient_id } => {
            let records = backend
                .fetch_vitals(patient_id)
                .await
                .with_context(|| format!("Failed to fetch vitals for {}", patient_id))?;
            print_vitals(&records, &config.utc_offset()?);
        }
        VitalsCommand::Export { patient_id, out } => {
            let session = PatientSession::load(backend, patient_id, config).await?;
            let directory = out.clone().unwrap_or_else(|| config.export_directory.clone());
            let path = session
                .export_to(backend, &directory, Local::now().date_naive())
                .await
                .context("Failed to export vitals")?;
            println!("Exported to {}", path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use coretemp::models::medical::{Gender, MonitoringMethod, NewPatient, NewVitalRecord};
    use coretemp::{VitalsError, VitalsResult};
    use tokio::sync::Mutex;

    use crate::cli::commands::{GenderArg, MethodArg};

    /// Accepts registrations and remembers the last request body.
    #[derive(Default)]
    struct RegistryBackend {
        created: Mutex<Option<NewPatient>>,
    }

    #[async_trait]
    impl VitalsBackend for RegistryBackend {
        async fn fetch_patient(&self, patient_id: &str) -> VitalsResult<Patient> {
            Err(VitalsError::BackendStatus { status: 404, url: format!("/api/patients/{}", patient_id) })
        }

        async fn list_patients(&self, _user_id: &str) -> VitalsResult<Vec<Patient>> {
            Ok(Vec::new())
        }

        async fn create_patient(&self, patient: &NewPatient) -> VitalsResult<Patient> {
            *self.created.lock().await = Some(patient.clone());
            Ok(Patient {
                id: Some("6660aa".to_string()),
                patient_id: "PT004".to_string(),
                user_id: patient.user_id.clone(),
                age: patient.age,
                gender: patient.gender,
                weight: patient.weight,
                height_cm: patient.height.height_cm,
                height_feet: patient.height.height_feet,
                height_inches: patient.height.height_inches,
                has_sepsis: patient.has_sepsis,
                monitoring_method: patient.monitoring_method,
                additional_notes: patient.additional_notes.clone(),
                created_at: None,
            })
        }

        async fn fetch_vitals(&self, _patient_id: &str) -> VitalsResult<Vec<VitalRecord>> {
            Ok(Vec::new())
        }

        async fn submit_vitals(&self, vitals: &[NewVitalRecord]) -> VitalsResult<usize> {
            Ok(vitals.len())
        }

        async fn export_vitals(&self, _patient_id: &str) -> VitalsResult<Vec<u8>> {
            Ok(Vec::new())
        }
    }

    fn add_args() -> AddPatientArgs {
        AddPatientArgs {
            user: "user-1".to_string(),
            age: "54".to_string(),
            gender: GenderArg::Female,
            weight: "68.2".to_string(),
            height_cm: None,
            height_ft: Some(5),
            height_in: Some(5.0),
            sepsis: true,
            method: MethodArg::Oesophageal,
            notes: String::new(),
        }
    }

    #[tokio::test]
    async fn patient_add_sends_converted_height() {
        let backend = RegistryBackend::default();
        let patient = register_patient(&backend, &add_args()).await.unwrap();
        assert_eq!(patient.patient_id, "PT004");

        let sent = backend.created.lock().await.clone().unwrap();
        assert_eq!(sent.user_id, "user-1");
        assert_eq!(sent.age, 54);
        assert_eq!(sent.gender, Gender::Female);
        assert_eq!(sent.monitoring_method, MonitoringMethod::Oesophageal);
        assert_eq!(sent.height.height_cm, 165.1);
        assert_eq!((sent.height.height_feet, sent.height.height_inches), (5, 5.0));
    }

    #[tokio::test]
    async fn patient_add_without_height_is_not_sent() {
        let backend = RegistryBackend::default();
        let args = AddPatientArgs { height_ft: None, height_in: None, ..add_args() };
        assert!(register_patient(&backend, &args).await.is_err());
        assert!(backend.created.lock().await.is_none());
    }

    #[test]
    fn temp_rejection_is_an_error() {
        assert!(handle_temp(TemperatureField::BodyTemperature, "37.5").unwrap().contains("valid"));
        assert!(handle_temp(TemperatureField::BodyTemperature, "").unwrap().contains("blank"));
        let err = handle_temp(TemperatureField::ProbeReading, "61").unwrap_err();
        assert!(err.to_string().contains("rejected"));
        assert!(handle_temp(TemperatureField::RoomTemperature, "15").is_ok());
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn height_output_in_both_directions() {
        assert_eq!(handle_height(&HeightCommand::Cm { cm: 180.0 }), "180 cm = 5' 10.9\"");
        assert_eq!(handle_height(&HeightCommand::Ft { feet: 6, inches: 0.0 }), "6' 0\" = 182.9 cm");
    }

    #[test]
    fn timestamp_show_prints_both_layouts() {
        let out = handle_timestamp(
            &TimestampCommand::Show { instant: "2025-01-05T14:30:00Z".to_string() },
            &utc(),
        )
        .unwrap();
        assert!(out.contains("05 Jan 2025, 02:30 PM"));
        assert!(out.contains("05/01/25 14:30"));
    }

    #[test]
    fn timestamp_parse_returns_iso() {
        let out = handle_timestamp(&TimestampCommand::Parse { input: "05/01/25 14:30".to_string() }, &utc()).unwrap();
        assert_eq!(out, "2025-01-05T14:30:00.000Z");
    }

    #[test]
    fn timestamp_parse_rejects_missing_time() {
        assert!(handle_timestamp(&TimestampCommand::Parse { input: "05/01/25".to_string() }, &utc()).is_err());
    }
}
