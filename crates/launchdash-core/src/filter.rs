//! Row predicates driven by the dropdown and the range slider.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::record::LaunchRecord;
use crate::{Error, Result};

/// Dropdown value meaning "every launch site".
pub const ALL_SITES_VALUE: &str = "All";
/// Dropdown label for [`ALL_SITES_VALUE`].
pub const ALL_SITES_LABEL: &str = "All Sites";

/// Launch sites selected in the dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteSelection {
    /// Every site.
    #[default]
    All,
    /// A single named site.
    Site(String),
}

impl SiteSelection {
    /// Parse a dropdown value. `"All"` selects every site.
    pub fn from_value(value: &str) -> Self {
        if value == ALL_SITES_VALUE {
            Self::All
        } else {
            Self::Site(value.to_string())
        }
    }

    /// The dropdown value for this selection.
    pub fn as_value(&self) -> &str {
        match self {
            Self::All => ALL_SITES_VALUE,
            Self::Site(name) => name,
        }
    }

    /// Returns `true` if the record was launched from a selected site.
    pub fn matches(&self, record: &LaunchRecord) -> bool {
        match self {
            Self::All => true,
            Self::Site(name) => record.launch_site == *name,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_value())
    }
}

impl FromStr for SiteSelection {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from_value(s))
    }
}

impl Serialize for SiteSelection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_value())
    }
}

impl<'de> Deserialize<'de> for SiteSelection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

/// Inclusive payload mass interval in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadRange {
    low: f64,
    high: f64,
}

impl PayloadRange {
    /// Build a range; both bounds must be finite and `low <= high`.
    pub fn new(low: f64, high: f64) -> Result<Self> {
        if !low.is_finite() || !high.is_finite() {
            return Err(Error::invalid_range(format!(
                "bounds must be finite, got [{low}, {high}]"
            )));
        }
        if low > high {
            return Err(Error::invalid_range(format!(
                "low bound {low} exceeds high bound {high}"
            )));
        }
        Ok(Self { low, high })
    }

    /// Build a range from the slider's two-element value.
    pub fn from_slider(value: &[f64]) -> Result<Self> {
        match value {
            [low, high] => Self::new(*low, *high),
            other => Err(Error::invalid_range(format!(
                "slider value must have two elements, got {}",
                other.len()
            ))),
        }
    }

    /// Lower bound.
    pub fn low(&self) -> f64 {
        self.low
    }

    /// Upper bound.
    pub fn high(&self) -> f64 {
        self.high
    }

    /// Returns `true` if `mass` lies within the range, bounds included.
    pub fn contains(&self, mass: f64) -> bool {
        mass >= self.low && mass <= self.high
    }
}

impl<'de> Deserialize<'de> for PayloadRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let bounds = Vec::<f64>::deserialize(deserializer)?;
        Self::from_slider(&bounds).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_site_selection_from_value() {
        assert_eq!(SiteSelection::from_value("All"), SiteSelection::All);
        assert_eq!(
            SiteSelection::from_value("CCAFS LC-40"),
            SiteSelection::Site("CCAFS LC-40".to_string())
        );
        // Sentinel is case sensitive, like the dropdown value.
        assert_eq!(
            SiteSelection::from_value("all"),
            SiteSelection::Site("all".to_string())
        );
    }

    #[test]
    fn test_site_selection_serde() {
        let json = serde_json::to_string(&SiteSelection::All).unwrap();
        assert_eq!(json, "\"All\"");
        let parsed: SiteSelection = serde_json::from_str("\"KSC LC-39A\"").unwrap();
        assert_eq!(parsed.as_value(), "KSC LC-39A");
    }

    #[test]
    fn test_payload_range_rejects_reversed_bounds() {
        let err = PayloadRange::new(7500.0, 2500.0).unwrap_err();
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn test_payload_range_rejects_nan() {
        assert!(PayloadRange::new(f64::NAN, 10.0).is_err());
        assert!(PayloadRange::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_payload_range_is_inclusive() {
        let range = PayloadRange::new(2500.0, 7500.0).unwrap();
        assert!(range.contains(2500.0));
        assert!(range.contains(7500.0));
        assert!(!range.contains(2499.9));
        assert!(!range.contains(7500.1));
    }

    #[test]
    fn test_payload_range_from_slider() {
        let range: PayloadRange = serde_json::from_str("[0, 10000]").unwrap();
        assert_eq!(range.low(), 0.0);
        assert_eq!(range.high(), 10000.0);
        assert!(serde_json::from_str::<PayloadRange>("[1000]").is_err());
        assert!(serde_json::from_str::<PayloadRange>("[5000, 1000]").is_err());
    }

    proptest! {
        #[test]
        fn test_degenerate_range_contains_only_its_point(x in 0.0f64..20000.0, d in 0.001f64..1000.0) {
            let range = PayloadRange::new(x, x).unwrap();
            prop_assert!(range.contains(x));
            prop_assert!(!range.contains(x + d));
            prop_assert!(!range.contains(x - d));
        }

        #[test]
        fn test_ordered_bounds_always_build(a in 0.0f64..20000.0, b in 0.0f64..20000.0) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            let range = PayloadRange::new(low, high).unwrap();
            prop_assert!(range.contains(low));
            prop_assert!(range.contains(high));
        }
    }
}
