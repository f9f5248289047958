//! Plotly-compatible figure JSON.
//!
//! Only the trace kinds the dashboard draws are modelled. The serialized shape
//! is what `Plotly.react(el, figure.data, figure.layout)` expects.

use serde::{Deserialize, Serialize};

/// A chart: traces plus layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    /// Traces, drawn in order.
    pub data: Vec<Trace>,
    /// Title and axes.
    pub layout: FigureLayout,
}

/// One series of a figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    /// Pie slices.
    Pie {
        /// Slice labels.
        labels: Vec<String>,
        /// Slice sizes.
        values: Vec<f64>,
    },
    /// Point cloud.
    Scatter {
        /// Legend entry.
        name: String,
        /// X coordinates.
        x: Vec<f64>,
        /// Y coordinates.
        y: Vec<f64>,
        /// Plotly draw mode, always `markers` here.
        mode: String,
        /// Hover text per point.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        text: Vec<String>,
    },
}

impl Trace {
    /// Number of points or slices.
    pub fn len(&self) -> usize {
        match self {
            Trace::Pie { values, .. } => values.len(),
            Trace::Scatter { x, .. } => x.len(),
        }
    }

    /// Returns `true` if the trace draws nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Figure title and axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureLayout {
    /// Chart title.
    pub title: Title,
    /// X axis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    /// Y axis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    /// Legend heading, used for the scatter colour grouping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
}

/// Text title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    /// Title text.
    pub text: String,
}

/// Axis settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    /// Axis title.
    pub title: Title,
}

/// Legend settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    /// Legend title.
    pub title: Title,
}

impl Figure {
    /// A pie chart.
    pub fn pie(title: impl Into<String>, labels: Vec<String>, values: Vec<f64>) -> Self {
        Self {
            data: vec![Trace::Pie { labels, values }],
            layout: FigureLayout::titled(title),
        }
    }

    /// An empty figure with a title; traces and axes are added by the caller.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            data: Vec::new(),
            layout: FigureLayout::titled(title),
        }
    }

    /// The figure title.
    pub fn title(&self) -> &str {
        &self.layout.title.text
    }

    /// Total points or slices across all traces.
    pub fn point_count(&self) -> usize {
        self.data.iter().map(Trace::len).sum()
    }
}

impl FigureLayout {
    /// A layout with only a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Title { text: title.into() },
            xaxis: None,
            yaxis: None,
            legend: None,
        }
    }
}

impl Axis {
    /// An axis with a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Title { text: title.into() },
        }
    }
}
