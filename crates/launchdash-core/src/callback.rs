//! Reactive callback graph.
//!
//! Each callback maps input component properties to one output component
//! property. The browser asks for the graph once, then posts an
//! [`UpdateRequest`] for every output whose inputs changed.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::charts::{payload_scatter_chart, success_pie_chart};
use crate::figure::Figure;
use crate::filter::{PayloadRange, SiteSelection};
use crate::layout::{PAYLOAD_SCATTER_CHART, PAYLOAD_SLIDER, SITE_DROPDOWN, SUCCESS_PIE_CHART};
use crate::table::LaunchTable;
use crate::{Error, Result};

/// Property a callback reads from an input component.
pub const VALUE: &str = "value";
/// Property a callback writes on a graph.
pub const FIGURE: &str = "figure";

/// A `(component id, property)` pair, rendered as `id.property`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentProperty {
    /// Component id.
    pub id: String,
    /// Property name.
    pub property: String,
}

impl ComponentProperty {
    /// Build a pair.
    pub fn new(id: impl Into<String>, property: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            property: property.into(),
        }
    }

    /// Parse `id.property`, splitting on the last dot.
    pub fn parse(s: &str) -> Result<Self> {
        match s.rsplit_once('.') {
            Some((id, property)) if !id.is_empty() && !property.is_empty() => {
                Ok(Self::new(id, property))
            }
            _ => Err(Error::callback(format!(
                "expected 'component.property', got '{s}'"
            ))),
        }
    }
}

impl fmt::Display for ComponentProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.id, self.property)
    }
}

/// Which chart function a callback runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CallbackKind {
    /// Site dropdown → success pie.
    SuccessPie,
    /// Site dropdown + payload slider → payload scatter.
    PayloadScatter,
}

/// One callback: its output, its inputs in argument order, and its body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallbackSpec {
    /// Output property written by the callback.
    pub output: ComponentProperty,
    /// Input properties, in the order the body receives them.
    pub inputs: Vec<ComponentProperty>,
    /// Body to run.
    pub kind: CallbackKind,
}

/// One input value in an update request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputValue {
    /// Component id.
    pub id: String,
    /// Property name.
    pub property: String,
    /// Current value.
    pub value: serde_json::Value,
}

/// Request to recompute one output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateRequest {
    /// Output to recompute, as `id.property`.
    pub output: String,
    /// Current input values; order is irrelevant.
    pub inputs: Vec<InputValue>,
}

/// Recomputed output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateResponse {
    /// Output that was recomputed, as `id.property`.
    pub output: String,
    /// New figure.
    pub figure: Figure,
}

/// The set of callbacks wired into the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallbackRegistry {
    callbacks: Vec<CallbackSpec>,
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::dashboard()
    }
}

impl CallbackRegistry {
    /// The dashboard's two callbacks.
    pub fn dashboard() -> Self {
        Self {
            callbacks: vec![
                CallbackSpec {
                    output: ComponentProperty::new(SUCCESS_PIE_CHART, FIGURE),
                    inputs: vec![ComponentProperty::new(SITE_DROPDOWN, VALUE)],
                    kind: CallbackKind::SuccessPie,
                },
                CallbackSpec {
                    output: ComponentProperty::new(PAYLOAD_SCATTER_CHART, FIGURE),
                    inputs: vec![
                        ComponentProperty::new(SITE_DROPDOWN, VALUE),
                        ComponentProperty::new(PAYLOAD_SLIDER, VALUE),
                    ],
                    kind: CallbackKind::PayloadScatter,
                },
            ],
        }
    }

    /// All callbacks.
    pub fn callbacks(&self) -> &[CallbackSpec] {
        &self.callbacks
    }

    /// The callback producing `output`, if any.
    pub fn for_output(&self, output: &ComponentProperty) -> Option<&CallbackSpec> {
        self.callbacks.iter().find(|c| c.output == *output)
    }

    /// Outputs to recompute when `input` changes.
    pub fn dependents_of(&self, input: &ComponentProperty) -> Vec<&ComponentProperty> {
        self.callbacks
            .iter()
            .filter(|c| c.inputs.contains(input))
            .map(|c| &c.output)
            .collect()
    }

    /// Run the callback for `request.output` against `table`.
    pub fn dispatch(&self, table: &LaunchTable, request: &UpdateRequest) -> Result<UpdateResponse> {
        let output = ComponentProperty::parse(&request.output)?;
        let spec = self
            .for_output(&output)
            .ok_or_else(|| Error::UnknownOutput(request.output.clone()))?;

        let site = site_input(request)?;
        table.check_selection(&site)?;

        let figure = match spec.kind {
            CallbackKind::SuccessPie => success_pie_chart(table, &site),
            CallbackKind::PayloadScatter => {
                let range = payload_input(request)?;
                payload_scatter_chart(table, &site, &range)
            }
        };

        tracing::debug!(
            output = %output,
            points = figure.point_count(),
            "Dispatched callback"
        );
        Ok(UpdateResponse {
            output: output.to_string(),
            figure,
        })
    }
}

fn input<'a>(request: &'a UpdateRequest, id: &str) -> Result<&'a serde_json::Value> {
    request
        .inputs
        .iter()
        .find(|i| i.id == id && i.property == VALUE)
        .map(|i| &i.value)
        .ok_or_else(|| Error::callback(format!("missing input {id}.{VALUE}")))
}

fn site_input(request: &UpdateRequest) -> Result<SiteSelection> {
    match input(request, SITE_DROPDOWN)? {
        serde_json::Value::String(value) => Ok(SiteSelection::from_value(value)),
        // A cleared dropdown sends null; treat it as every site.
        serde_json::Value::Null => Ok(SiteSelection::All),
        other => Err(Error::callback(format!(
            "{SITE_DROPDOWN}.{VALUE} must be a string, got {other}"
        ))),
    }
}

fn payload_input(request: &UpdateRequest) -> Result<PayloadRange> {
    let value = input(request, PAYLOAD_SLIDER)?;
    let bounds: Vec<f64> = serde_json::from_value(value.clone()).map_err(|e| {
        Error::callback(format!("{PAYLOAD_SLIDER}.{VALUE} must be [low, high]: {e}"))
    })?;
    PayloadRange::from_slider(&bounds)
}
