//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the catalog core:
//! - Logging and tracing infrastructure
//! - Configuration management with host bridge injection
//!
//! ## Overview
//!
//! Every other crate logs through `tracing`; this crate decides where those
//! events go. [`config::CatalogConfig`] is the single place a host hands over
//! its bridges and tunables before the service layer wires controllers.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{CatalogConfig, CatalogConfigBuilder};
pub use error::{Error, Result};
