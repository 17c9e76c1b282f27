//! # contrib-graph
//!
//! Command line application that fetches GitHub and GitLab contributions,
//! aggregates them into monthly series and renders a combined line chart.
//!
//! The binary is a thin wrapper around [`ContribGraphApp`]; the argument
//! parser lives in [`args`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod args;
pub mod error;

pub use app::{ContribGraphApp, RunOutcome};
pub use args::Cli;
pub use error::{AppError, AppResult};
