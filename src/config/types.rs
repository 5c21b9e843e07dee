//! Configuration types for payroll and analytics.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Every structure has a
//! `Default` carrying the business constants the engine ships with, so a
//! partial YAML file only overrides what it names.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Flat statutory deductions withheld from every pay slip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatutoryDeductions {
    /// Social Security System contribution.
    pub sss: Decimal,
    /// PhilHealth contribution.
    pub philhealth: Decimal,
    /// Pag-IBIG fund contribution.
    pub pagibig: Decimal,
}

impl StatutoryDeductions {
    /// Sum of the three statutory contributions.
    pub fn total(&self) -> Decimal {
        self.sss + self.philhealth + self.pagibig
    }
}

impl Default for StatutoryDeductions {
    fn default() -> Self {
        Self {
            sss: Decimal::new(900, 0),
            philhealth: Decimal::new(500, 0),
            pagibig: Decimal::new(200, 0),
        }
    }
}

/// Overtime reconciliation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OvertimeConfig {
    /// Time of day after which check-out hours earn overtime pay.
    pub threshold: NaiveTime,
    /// Multiplier applied to the hourly rate for overtime pay.
    pub premium_multiplier: Decimal,
}

impl Default for OvertimeConfig {
    fn default() -> Self {
        Self {
            threshold: NaiveTime::from_hms_opt(18, 0, 0).unwrap_or_default(),
            premium_multiplier: Decimal::new(125, 2),
        }
    }
}

/// Payroll computation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollConfig {
    /// Monthly basic salary used when an employee carries no override.
    pub basic_salary: Decimal,
    /// Hours in a working day; divides the daily rate into the hourly rate.
    pub hours_per_day: Decimal,
    /// Roster role whose members are paid in a payroll run.
    pub payroll_role: String,
    /// Overtime settings.
    pub overtime: OvertimeConfig,
    /// Statutory deductions.
    pub statutory: StatutoryDeductions,
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self {
            basic_salary: Decimal::new(20000, 0),
            hours_per_day: Decimal::new(8, 0),
            payroll_role: "User".to_string(),
            overtime: OvertimeConfig::default(),
            statutory: StatutoryDeductions::default(),
        }
    }
}

/// Smallest revenue series that can be split into high and low groups.
pub const MIN_GROUPABLE_POINTS: usize = 2;

/// Revenue analytics settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Trailing months included in the revenue series.
    pub months_back: u32,
    /// Minimum number of monthly points required to run the t-test.
    ///
    /// Must be at least [`MIN_GROUPABLE_POINTS`].
    pub min_data_points: usize,
    /// Default significance level for the high/low verdict.
    pub significance_level: f64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            months_back: 12,
            min_data_points: 4,
            significance_level: 0.05,
        }
    }
}

/// The complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineConfig {
    payroll: PayrollConfig,
    analytics: AnalyticsConfig,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(payroll: PayrollConfig, analytics: AnalyticsConfig) -> Self {
        Self { payroll, analytics }
    }

    /// Returns the payroll configuration.
    pub fn payroll(&self) -> &PayrollConfig {
        &self.payroll
    }

    /// Returns the analytics configuration.
    pub fn analytics(&self) -> &AnalyticsConfig {
        &self.analytics
    }
}
