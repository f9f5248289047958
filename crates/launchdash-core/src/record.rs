//! Launch records as they appear in the source CSV.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

/// Column holding the launch site name.
pub const COL_LAUNCH_SITE: &str = "Launch Site";
/// Column holding the launch outcome (`1` success, `0` failure).
pub const COL_CLASS: &str = "class";
/// Column holding the payload mass.
pub const COL_PAYLOAD_MASS: &str = "Payload Mass (kg)";
/// Column holding the booster version category.
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";

/// Outcome of a launch, encoded as the `class` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaunchOutcome {
    /// `class == 0`
    Failure,
    /// `class == 1`
    Success,
}

impl LaunchOutcome {
    /// Decode a `class` value.
    pub fn from_class(value: i64) -> Result<Self> {
        match value {
            0 => Ok(Self::Failure),
            1 => Ok(Self::Success),
            other => Err(Error::InvalidValue {
                column: COL_CLASS,
                value: other.to_string(),
            }),
        }
    }

    /// The numeric `class` value.
    pub fn class_value(self) -> u8 {
        match self {
            Self::Failure => 0,
            Self::Success => 1,
        }
    }

    /// Returns `true` for a successful launch.
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for LaunchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.class_value())
    }
}

/// One launch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchRecord {
    /// Flight number.
    pub flight_number: u32,
    /// Launch site name, e.g. `CCAFS LC-40`.
    pub launch_site: String,
    /// Launch outcome.
    pub outcome: LaunchOutcome,
    /// Payload mass in kilograms.
    pub payload_mass_kg: f64,
    /// Full booster version, e.g. `F9 v1.0  B0003`.
    pub booster_version: String,
    /// Booster version category, e.g. `v1.0` or `FT`.
    pub booster_version_category: String,
}

/// Row shape as decoded by `csv`; columns not named here are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct CsvLaunchRow {
    #[serde(rename = "Flight Number")]
    flight_number: u32,
    #[serde(rename = "Launch Site")]
    launch_site: String,
    #[serde(rename = "class")]
    class: f64,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version")]
    booster_version: String,
    #[serde(rename = "Booster Version Category")]
    booster_version_category: String,
}

impl TryFrom<CsvLaunchRow> for LaunchRecord {
    type Error = Error;

    fn try_from(row: CsvLaunchRow) -> Result<Self> {
        // pandas writes integer columns as `1` or `1.0` depending on NaNs upstream.
        if row.class.fract() != 0.0 {
            return Err(Error::InvalidValue {
                column: COL_CLASS,
                value: row.class.to_string(),
            });
        }
        let outcome = LaunchOutcome::from_class(row.class as i64)?;

        if !row.payload_mass_kg.is_finite() || row.payload_mass_kg < 0.0 {
            return Err(Error::InvalidValue {
                column: COL_PAYLOAD_MASS,
                value: row.payload_mass_kg.to_string(),
            });
        }

        let launch_site = row.launch_site.trim().to_string();
        if launch_site.is_empty() {
            return Err(Error::InvalidValue {
                column: COL_LAUNCH_SITE,
                value: row.launch_site,
            });
        }

        Ok(Self {
            flight_number: row.flight_number,
            launch_site,
            outcome,
            payload_mass_kg: row.payload_mass_kg,
            booster_version: row.booster_version.trim().to_string(),
            booster_version_category: row.booster_version_category.trim().to_string(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn raw(class: f64, payload: f64, site: &str) -> CsvLaunchRow {
        CsvLaunchRow {
            flight_number: 7,
            launch_site: site.to_string(),
            class,
            payload_mass_kg: payload,
            booster_version: " F9 v1.1 ".to_string(),
            booster_version_category: "v1.1".to_string(),
        }
    }

    #[test]
    fn test_outcome_from_class() {
        assert_eq!(LaunchOutcome::from_class(0).unwrap(), LaunchOutcome::Failure);
        assert_eq!(LaunchOutcome::from_class(1).unwrap(), LaunchOutcome::Success);
        assert!(LaunchOutcome::from_class(2).is_err());
    }

    #[test]
    fn test_outcome_display_is_class_value() {
        assert_eq!(LaunchOutcome::Success.to_string(), "1");
        assert_eq!(LaunchOutcome::Failure.to_string(), "0");
    }

    #[test]
    fn test_row_conversion_trims_text() {
        let record = LaunchRecord::try_from(raw(1.0, 2500.0, " KSC LC-39A ")).unwrap();
        assert_eq!(record.launch_site, "KSC LC-39A");
        assert_eq!(record.booster_version, "F9 v1.1");
        assert!(record.outcome.is_success());
    }

    #[test]
    fn test_row_conversion_rejects_fractional_class() {
        let err = LaunchRecord::try_from(raw(0.5, 100.0, "VAFB SLC-4E")).unwrap_err();
        assert!(err.to_string().contains("class"));
    }

    #[test]
    fn test_row_conversion_rejects_negative_payload() {
        let err = LaunchRecord::try_from(raw(1.0, -1.0, "VAFB SLC-4E")).unwrap_err();
        assert!(err.to_string().contains("Payload Mass (kg)"));
    }

    #[test]
    fn test_row_conversion_rejects_blank_site() {
        assert!(LaunchRecord::try_from(raw(1.0, 10.0, "  ")).is_err());
    }
}
