// src/lib.rs

//! Dealer Oxide - synthetic dealership data for the dealer dashboard
//!
//! Builds referentially consistent datasets (stores, staff, customers,
//! inventory, deals, service work and orders) and role-based KPI summaries.

#![deny(unsafe_code)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::result_large_err)]

pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::{AppConfig, ConfigManager, GenerationConfig};
pub use data::{Dataset, DatasetCounts, DatasetStore, Generator, Kpi, Role};
pub use error::{Error, ErrorKind, Result, ResultExt};
pub use logging::LoggingManager;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
