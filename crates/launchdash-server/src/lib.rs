//! # launchdash-server
//!
//! HTTP surface for the Launchdash dashboard.
//!
//! This crate provides:
//! - the rendered dashboard page with its client runtime
//! - layout and callback-graph endpoints the page bootstraps from
//! - the callback update endpoint that recomputes chart figures
//! - direct chart, summary, and health endpoints

#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod page;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, Error, Result};
pub use server::Server;
pub use state::AppState;
