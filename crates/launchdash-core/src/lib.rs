//! Launchdash Core: launch records, filtering, figures, and the callback graph.
//!
//! This crate holds everything the dashboard computes. It has no HTTP or CLI
//! dependencies; `launchdash-server` and `launchdash-cli` build on it.
//!
//! # Modules
//!
//! - [`record`]: a single launch row and its outcome
//! - [`table`]: the in-memory launch table loaded from CSV
//! - [`filter`]: site selection and payload range predicates
//! - [`aggregate`]: group-by and value-count summaries
//! - [`figure`]: Plotly-compatible figure JSON
//! - [`charts`]: the pie and scatter chart builders
//! - [`layout`]: the declarative page component tree
//! - [`callback`]: reactive callback specs and dispatch
//! - [`config`]: dashboard configuration and the [`ConfigManager`] trait

#![forbid(unsafe_code)]

pub mod aggregate;
pub mod callback;
pub mod charts;
pub mod config;
pub mod error;
pub mod figure;
pub mod filter;
pub mod layout;
pub mod record;
pub mod table;

pub use aggregate::{DatasetSummary, SiteSummary};
pub use callback::{CallbackRegistry, CallbackSpec, ComponentProperty, UpdateRequest, UpdateResponse};
pub use config::{ConfigManager, DashConfig};
pub use error::{Error, Result};
pub use figure::{Figure, Trace};
pub use filter::{PayloadRange, SiteSelection};
pub use layout::{Component, DashboardLayout};
pub use record::{LaunchOutcome, LaunchRecord};
pub use table::LaunchTable;
