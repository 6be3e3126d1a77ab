// models/src/height.rs

use serde::{Deserialize, Serialize};

pub const CM_PER_INCH: f64 = 2.54;
pub const INCHES_PER_FOOT: f64 = 12.0;

/// Rounds to one decimal place, the precision both height forms are kept at.
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// A height split into whole feet and decimal inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeetInches {
    pub feet: i32,
    pub inches: f64,
}

/// Converts centimeters to feet and inches, inches rounded to one decimal.
///
/// No bounds checking is done; `0` yields `0' 0"` and negative input yields a
/// negative result. A remainder that rounds up to a full foot is carried over,
/// so `inches` always stays below 12.
pub fn to_feet_inches(cm: f64) -> FeetInches {
    let total_inches = cm / CM_PER_INCH;
    let mut feet = (total_inches / INCHES_PER_FOOT).floor() as i32;
    let mut inches = round_tenth(total_inches % INCHES_PER_FOOT);
    if inches >= INCHES_PER_FOOT {
        feet += 1;
        inches -= INCHES_PER_FOOT;
    }
    FeetInches { feet, inches }
}

/// Converts feet and inches to centimeters, rounded to one decimal.
pub fn to_centimeters(feet: i32, inches: f64) -> f64 {
    let total_inches = f64::from(feet) * INCHES_PER_FOOT + inches;
    round_tenth(total_inches * CM_PER_INCH)
}

/// Which representation of a [`HeightMeasurement`] the user edited last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HeightUnit {
    #[default]
    Centimeters,
    FeetInches,
}

/// A height kept in both metric and imperial form.
///
/// Whichever side was set last is the source of truth; the other side is
/// recomputed from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeightMeasurement {
    pub height_cm: f64,
    pub height_feet: i32,
    pub height_inches: f64,
    #[serde(skip)]
    source: HeightUnit,
}

impl HeightMeasurement {
    pub fn from_centimeters(cm: f64) -> Self {
        let FeetInches { feet, inches } = to_feet_inches(cm);
        Self {
            height_cm: cm,
            height_feet: feet,
            height_inches: inches,
            source: HeightUnit::Centimeters,
        }
    }

    pub fn from_feet_inches(feet: i32, inches: f64) -> Self {
        Self {
            height_cm: to_centimeters(feet, inches),
            height_feet: feet,
            height_inches: inches,
            source: HeightUnit::FeetInches,
        }
    }

    pub fn set_centimeters(&mut self, cm: f64) {
        *self = Self::from_centimeters(cm);
    }

    pub fn set_feet_inches(&mut self, feet: i32, inches: f64) {
        *self = Self::from_feet_inches(feet, inches);
    }

    pub fn source(&self) -> HeightUnit {
        self.source
    }

    /// Formats the height the way the export sheet prints it, e.g. `175 cm (5'8.9")`.
    pub fn describe(&self) -> String {
        format!("{} cm ({}'{}\")", self.height_cm, self.height_feet, self.height_inches)
    }
}
