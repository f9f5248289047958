//! The dashboard page as a declarative component tree.
//!
//! The tree is serialized for `/_dash-layout` and rendered to HTML by the
//! server crate. Component ids are the contract between the layout and the
//! callback graph.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::{DashConfig, SliderConfig};
use crate::filter::{ALL_SITES_LABEL, ALL_SITES_VALUE, PayloadRange};
use crate::table::LaunchTable;
use crate::{Error, Result};

/// Id of the launch-site dropdown.
pub const SITE_DROPDOWN: &str = "site-dropdown";
/// Id of the payload range slider.
pub const PAYLOAD_SLIDER: &str = "payload-slider";
/// Id of the success pie chart.
pub const SUCCESS_PIE_CHART: &str = "success-pie-chart";
/// Id of the payload/success scatter chart.
pub const PAYLOAD_SCATTER_CHART: &str = "success-payload-scatter-chart";

/// One dropdown entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropdownOption {
    /// Text shown to the user.
    pub label: String,
    /// Value delivered to callbacks.
    pub value: String,
}

/// A page component.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Component {
    /// Container.
    Div {
        /// Child components.
        children: Vec<Component>,
    },
    /// Top-level heading.
    H1 {
        /// Heading text.
        text: String,
        /// Inline CSS declarations.
        style: BTreeMap<String, String>,
    },
    /// Paragraph.
    P {
        /// Paragraph text.
        text: String,
    },
    /// Line break.
    Br,
    /// Searchable single-select dropdown.
    Dropdown {
        /// Component id.
        id: String,
        /// Selectable entries.
        options: Vec<DropdownOption>,
        /// Initially selected value.
        value: String,
        /// Hint shown when nothing is selected.
        placeholder: String,
        /// Whether typing filters the options.
        searchable: bool,
    },
    /// Two-handle range slider.
    RangeSlider {
        /// Component id.
        id: String,
        /// Lowest selectable value.
        min: f64,
        /// Highest selectable value.
        max: f64,
        /// Handle increment.
        step: f64,
        /// Labelled tick positions.
        marks: BTreeMap<String, String>,
        /// Initial `[low, high]`.
        value: [f64; 2],
    },
    /// Plotly chart, filled in by a callback.
    Graph {
        /// Component id.
        id: String,
    },
}

impl Component {
    /// The component id, for components that have one.
    pub fn id(&self) -> Option<&str> {
        match self {
            Component::Dropdown { id, .. }
            | Component::RangeSlider { id, .. }
            | Component::Graph { id } => Some(id),
            _ => None,
        }
    }

    /// Depth-first search for a component by id.
    pub fn find(&self, wanted: &str) -> Option<&Component> {
        if self.id() == Some(wanted) {
            return Some(self);
        }
        match self {
            Component::Div { children } => children.iter().find_map(|c| c.find(wanted)),
            _ => None,
        }
    }
}

/// The complete dashboard page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardLayout {
    /// Browser tab and heading title.
    pub title: String,
    /// Root container.
    pub root: Component,
}

impl DashboardLayout {
    /// Build the page for a loaded table.
    pub fn build(table: &LaunchTable, config: &DashConfig) -> Result<Self> {
        let slider = SliderBounds::resolve(&config.slider, table)?;

        let mut options = vec![DropdownOption {
            label: ALL_SITES_LABEL.to_string(),
            value: ALL_SITES_VALUE.to_string(),
        }];
        options.extend(table.unique_sites().iter().map(|site| DropdownOption {
            label: site.clone(),
            value: site.clone(),
        }));

        let heading_style = BTreeMap::from([
            ("textAlign".to_string(), "center".to_string()),
            ("color".to_string(), "#503D36".to_string()),
            ("fontSize".to_string(), "40px".to_string()),
        ]);

        let root = Component::Div {
            children: vec![
                Component::H1 {
                    text: config.title.clone(),
                    style: heading_style,
                },
                Component::Dropdown {
                    id: SITE_DROPDOWN.to_string(),
                    options,
                    value: ALL_SITES_VALUE.to_string(),
                    placeholder: "Select a Launch Site here".to_string(),
                    searchable: true,
                },
                Component::Br,
                Component::Div {
                    children: vec![Component::Graph {
                        id: SUCCESS_PIE_CHART.to_string(),
                    }],
                },
                Component::Br,
                Component::P {
                    text: "Payload range (Kg):".to_string(),
                },
                Component::RangeSlider {
                    id: PAYLOAD_SLIDER.to_string(),
                    min: slider.min,
                    max: slider.max,
                    step: slider.step,
                    marks: slider.marks,
                    value: [slider.value.low(), slider.value.high()],
                },
                Component::Div {
                    children: vec![Component::Graph {
                        id: PAYLOAD_SCATTER_CHART.to_string(),
                    }],
                },
            ],
        };

        Ok(Self {
            title: config.title.clone(),
            root,
        })
    }

    /// Initial dropdown value.
    pub fn initial_site(&self) -> Option<&str> {
        match self.root.find(SITE_DROPDOWN) {
            Some(Component::Dropdown { value, .. }) => Some(value),
            _ => None,
        }
    }

    /// Initial slider range.
    pub fn initial_payload_range(&self) -> Option<PayloadRange> {
        match self.root.find(PAYLOAD_SLIDER) {
            Some(Component::RangeSlider { value, .. }) => {
                PayloadRange::new(value[0], value[1]).ok()
            }
            _ => None,
        }
    }
}

/// Slider settings after applying `fit_to_data`.
struct SliderBounds {
    min: f64,
    max: f64,
    step: f64,
    marks: BTreeMap<String, String>,
    value: PayloadRange,
}

impl SliderBounds {
    fn resolve(config: &SliderConfig, table: &LaunchTable) -> Result<Self> {
        if config.step.is_nan() || config.step <= 0.0 {
            return Err(Error::config(format!(
                "slider.step must be positive, got {}",
                config.step
            )));
        }

        let (min, max) = if config.fit_to_data {
            (
                (table.payload_min() / config.step).floor() * config.step,
                (table.payload_max() / config.step).ceil() * config.step,
            )
        } else {
            (config.min, config.max)
        };
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(Error::config(format!(
                "slider track [{min}, {max}] is not a valid interval"
            )));
        }

        // Initial handles are clamped into the track.
        let low = config.default_low.clamp(min, max);
        let high = config.default_high.clamp(min, max);
        let value = PayloadRange::new(low, high)
            .map_err(|e| Error::config(format!("slider defaults: {e}")))?;

        let marks = if config.marks.is_empty() {
            [min, max]
                .iter()
                .map(|m| (format_mark(*m), format_mark(*m)))
                .collect()
        } else {
            config
                .marks
                .iter()
                .filter(|m| **m >= min && **m <= max)
                .map(|m| (format_mark(*m), format_mark(*m)))
                .collect()
        };

        Ok(Self {
            min,
            max,
            step: config.step,
            marks,
            value,
        })
    }
}

fn format_mark(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::record::{LaunchOutcome, LaunchRecord};

    fn table() -> LaunchTable {
        let rows = [("CCAFS LC-40", 0.0), ("VAFB SLC-4E", 9600.0), ("CCAFS LC-40", 525.0)];
        LaunchTable::from_records(
            rows.iter()
                .map(|(site, payload)| LaunchRecord {
                    flight_number: 1,
                    launch_site: site.to_string(),
                    outcome: LaunchOutcome::Success,
                    payload_mass_kg: *payload,
                    booster_version: "F9".into(),
                    booster_version_category: "FT".into(),
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_dropdown_options_start_with_all() {
        let layout = DashboardLayout::build(&table(), &DashConfig::default()).unwrap();
        match layout.root.find(SITE_DROPDOWN) {
            Some(Component::Dropdown {
                options,
                value,
                placeholder,
                searchable,
                ..
            }) => {
                let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
                assert_eq!(labels, vec!["All Sites", "CCAFS LC-40", "VAFB SLC-4E"]);
                assert_eq!(options[0].value, "All");
                assert_eq!(value, "All");
                assert_eq!(placeholder, "Select a Launch Site here");
                assert!(*searchable);
            }
            other => panic!("dropdown missing: {other:?}"),
        }
    }

    #[test]
    fn test_default_slider() {
        let layout = DashboardLayout::build(&table(), &DashConfig::default()).unwrap();
        match layout.root.find(PAYLOAD_SLIDER) {
            Some(Component::RangeSlider {
                min,
                max,
                step,
                marks,
                value,
                ..
            }) => {
                assert_eq!((*min, *max, *step), (0.0, 10000.0, 1000.0));
                assert_eq!(value, &[2500.0, 7500.0]);
                let keys: Vec<&str> = marks.keys().map(String::as_str).collect();
                assert_eq!(keys.len(), 5);
                assert!(keys.contains(&"2500"));
                assert!(keys.contains(&"10000"));
            }
            other => panic!("slider missing: {other:?}"),
        }
        assert_eq!(layout.initial_site(), Some("All"));
        let range = layout.initial_payload_range().unwrap();
        assert_eq!((range.low(), range.high()), (2500.0, 7500.0));
    }

    #[test]
    fn test_slider_fit_to_data() {
        let mut config = DashConfig::default();
        config.slider.fit_to_data = true;
        config.slider.default_low = 0.0;
        config.slider.default_high = 20000.0;
        let layout = DashboardLayout::build(&table(), &config).unwrap();
        match layout.root.find(PAYLOAD_SLIDER) {
            Some(Component::RangeSlider { min, max, value, .. }) => {
                assert_eq!((*min, *max), (0.0, 10000.0));
                assert_eq!(value, &[0.0, 10000.0]);
            }
            other => panic!("slider missing: {other:?}"),
        }
    }

    #[test]
    fn test_slider_rejects_zero_step() {
        let mut config = DashConfig::default();
        config.slider.step = 0.0;
        assert!(DashboardLayout::build(&table(), &config).is_err());
    }

    #[test]
    fn test_layout_contains_both_graphs() {
        let layout = DashboardLayout::build(&table(), &DashConfig::default()).unwrap();
        assert!(layout.root.find(SUCCESS_PIE_CHART).is_some());
        assert!(layout.root.find(PAYLOAD_SCATTER_CHART).is_some());
        assert!(layout.root.find("nope").is_none());
    }

    #[test]
    fn test_layout_serializes_type_tags() {
        let layout = DashboardLayout::build(&table(), &DashConfig::default()).unwrap();
        let value = serde_json::to_value(&layout).unwrap();
        assert_eq!(value["root"]["type"], "Div");
        assert_eq!(value["root"]["children"][0]["type"], "H1");
        assert_eq!(
            value["root"]["children"][0]["text"],
            "SpaceX Launch Records Dashboard"
        );
    }
}
