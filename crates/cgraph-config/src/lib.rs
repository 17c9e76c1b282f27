//! # cgraph Config
//!
//! Typed configuration for contrib-graph.
//!
//! This crate provides the configuration schema with its defaults, loading
//! from YAML or TOML files with environment variable overrides, and
//! validation of the loaded values.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::*;
pub use schema::*;
pub use validator::*;
