// cli/src/cli/commands.rs

// Command-line arguments and subcommands for the vitals CLI, defined with
// `clap` derive.
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use coretemp::models::medical::{Gender, MonitoringMethod};
use coretemp::models::temperature::TemperatureField;

#[derive(Parser, Debug)]
#[command(name = "coretemp-cli", version, about = "Core temperature study vitals CLI")]
pub struct CliArgs {
    /// Path to the YAML client config
    #[arg(long, global = true, env = "CORETEMP_CONFIG", default_value = coretemp::config::DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Convert a height between units
    Height {
        #[command(subcommand)]
        command: HeightCommand,
    },
    /// Check a temperature against the accepted range
    Temp {
        value: String,
        #[arg(long, value_enum, default_value_t = FieldArg::BodyTemperature)]
        field: FieldArg,
    },
    /// Render or parse timestamps
    Timestamp {
        #[command(subcommand)]
        command: TimestampCommand,
    },
    Patient {
        #[command(subcommand)]
        command: PatientCommand,
    },
    Vitals {
        #[command(subcommand)]
        command: VitalsCommand,
    },
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum HeightCommand {
    /// Centimeters to feet and inches
    Cm { cm: f64 },
    /// Feet and inches to centimeters
    Ft { feet: i32, inches: f64 },
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum TimestampCommand {
    /// Show an RFC 3339 instant in display and edit layouts
    Show { instant: String },
    /// Parse a manually entered `DD/MM/YY HH:MM` timestamp
    Parse { input: String },
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum PatientCommand {
    /// Register a new study patient
    Add(AddPatientArgs),
    Show { patient_id: String },
    List {
        #[arg(long)]
        user: String,
    },
}

/// Registration form fields. Age and weight are validated on submit;
/// height may be given in either unit.
#[derive(Args, Debug, PartialEq)]
pub struct AddPatientArgs {
    #[arg(long)]
    pub user: String,
    #[arg(long)]
    pub age: String,
    #[arg(long, value_enum)]
    pub gender: GenderArg,
    /// Weight in kg
    #[arg(long)]
    pub weight: String,
    #[arg(long, conflicts_with_all = ["height_ft", "height_in"])]
    pub height_cm: Option<f64>,
    #[arg(long)]
    pub height_ft: Option<i32>,
    #[arg(long, requires = "height_ft")]
    pub height_in: Option<f64>,
    #[arg(long)]
    pub sepsis: bool,
    #[arg(long, value_enum, default_value_t = MethodArg::Nasal)]
    pub method: MethodArg,
    #[arg(long, default_value = "")]
    pub notes: String,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum VitalsCommand {
    List { patient_id: String },
    Export {
        patient_id: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FieldArg {
    TrialDeviceReading,
    ProbeReading,
    BodyTemperature,
    RoomTemperature,
}

impl From<FieldArg> for TemperatureField {
    fn from(arg: FieldArg) -> Self {
        match arg {
            FieldArg::TrialDeviceReading => TemperatureField::TrialDeviceReading,
            FieldArg::ProbeReading => TemperatureField::ProbeReading,
            FieldArg::BodyTemperature => TemperatureField::BodyTemperature,
            FieldArg::RoomTemperature => TemperatureField::RoomTemperature,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum GenderArg {
    Male,
    Female,
    Other,
}

impl From<GenderArg> for Gender {
    fn from(arg: GenderArg) -> Self {
        match arg {
            GenderArg::Male => Gender::Male,
            GenderArg::Female => Gender::Female,
            GenderArg::Other => Gender::Other,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum MethodArg {
    Nasal,
    Oesophageal,
    Rectal,
}

impl From<MethodArg> for MonitoringMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Nasal => MonitoringMethod::Nasal,
            MethodArg::Oesophageal => MonitoringMethod::Oesophageal,
            MethodArg::Rectal => MonitoringMethod::Rectal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_height_conversion() {
        let args = CliArgs::try_parse_from(["coretemp-cli", "height", "ft", "5", "10.5"]).unwrap();
        assert_eq!(
            args.command,
            Commands::Height {
                command: HeightCommand::Ft { feet: 5, inches: 10.5 }
            }
        );
    }

    #[test]
    fn temp_defaults_to_body_temperature() {
        let args = CliArgs::try_parse_from(["coretemp-cli", "temp", "37.5"]).unwrap();
        assert_eq!(
            args.command,
            Commands::Temp {
                value: "37.5".to_string(),
                field: FieldArg::BodyTemperature
            }
        );
    }

    #[test]
    fn parses_room_field_flag() {
        let args = CliArgs::try_parse_from(["coretemp-cli", "temp", "18", "--field", "room-temperature"]).unwrap();
        assert!(matches!(args.command, Commands::Temp { field: FieldArg::RoomTemperature, .. }));
    }

    #[test]
    fn parses_export_with_output_dir() {
        let args = CliArgs::try_parse_from(["coretemp-cli", "vitals", "export", "PT001", "--out", "/tmp/x"]).unwrap();
        assert_eq!(
            args.command,
            Commands::Vitals {
                command: VitalsCommand::Export {
                    patient_id: "PT001".to_string(),
                    out: Some(PathBuf::from("/tmp/x"))
                }
            }
        );
    }

    #[test]
    fn parses_patient_add_with_feet_and_inches() {
        let args = CliArgs::try_parse_from([
            "coretemp-cli", "patient", "add", "--user", "user-1", "--age", "54", "--gender", "female",
            "--weight", "68.2", "--height-ft", "5", "--height-in", "5", "--sepsis", "--method", "oesophageal",
        ])
        .unwrap();
        match args.command {
            Commands::Patient { command: PatientCommand::Add(add) } => {
                assert_eq!(add.gender, GenderArg::Female);
                assert_eq!(add.height_cm, None);
                assert_eq!((add.height_ft, add.height_in), (Some(5), Some(5.0)));
                assert!(add.sepsis);
                assert_eq!(add.method, MethodArg::Oesophageal);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn patient_add_rejects_both_height_units() {
        let result = CliArgs::try_parse_from([
            "coretemp-cli", "patient", "add", "--user", "u", "--age", "54", "--gender", "male",
            "--weight", "70", "--height-cm", "170", "--height-ft", "5",
        ]);
        assert!(result.is_err());
    }
}
