//! Configuration loading and management for the engine.
//!
//! This module provides functionality to load payroll and analytics
//! settings from YAML files, replacing the business constants a
//! payroll run depends on (basic salary, statutory deductions, overtime
//! threshold) with named, overridable fields.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Overtime after: {}", config.payroll().overtime.threshold);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AnalyticsConfig, EngineConfig, MIN_GROUPABLE_POINTS, OvertimeConfig, PayrollConfig,
    StatutoryDeductions,
};
