//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::{AnalyticsConfig, EngineConfig, MIN_GROUPABLE_POINTS, PayrollConfig};

/// Loads, validates and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── payroll.yaml    # Salary, overtime and statutory deduction settings
/// └── analytics.yaml  # Revenue analysis window and significance level
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Basic salary: {}", loader.payroll().basic_salary);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if either file is missing, contains invalid YAML,
    /// or holds out-of-range values.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use payroll_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// # Ok::<(), payroll_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let payroll = Self::load_yaml::<PayrollConfig>(&path.join("payroll.yaml"))?;
        let analytics = Self::load_yaml::<AnalyticsConfig>(&path.join("analytics.yaml"))?;

        let loader = Self::from_config(EngineConfig::new(payroll, analytics))?;

        info!(
            path = %path.display(),
            basic_salary = %loader.payroll().basic_salary,
            months_back = loader.analytics().months_back,
            "Loaded engine configuration"
        );

        Ok(loader)
    }

    /// Wraps an in-memory configuration after validating it.
    pub fn from_config(config: EngineConfig) -> EngineResult<Self> {
        Self::validate(&config)?;
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate(config: &EngineConfig) -> EngineResult<()> {
        let payroll = config.payroll();

        if payroll.basic_salary < Decimal::ZERO {
            return Err(invalid("basic_salary", "must not be negative"));
        }
        if payroll.hours_per_day <= Decimal::ZERO {
            return Err(invalid("hours_per_day", "must be positive"));
        }
        if payroll.overtime.premium_multiplier < Decimal::ZERO {
            return Err(invalid(
                "overtime.premium_multiplier",
                "must not be negative",
            ));
        }
        let statutory = &payroll.statutory;
        for (field, amount) in [
            ("statutory.sss", statutory.sss),
            ("statutory.philhealth", statutory.philhealth),
            ("statutory.pagibig", statutory.pagibig),
        ] {
            if amount < Decimal::ZERO {
                return Err(invalid(field, "must not be negative"));
            }
        }

        let analytics = config.analytics();
        if analytics.months_back == 0 {
            return Err(invalid("months_back", "must be at least 1"));
        }
        if analytics.min_data_points < MIN_GROUPABLE_POINTS {
            return Err(invalid("min_data_points", "must be at least 2"));
        }
        if !(analytics.significance_level > 0.0 && analytics.significance_level < 1.0) {
            return Err(invalid("significance_level", "must lie in (0, 1)"));
        }

        Ok(())
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the payroll configuration.
    pub fn payroll(&self) -> &PayrollConfig {
        self.config.payroll()
    }

    /// Returns the analytics configuration.
    pub fn analytics(&self) -> &AnalyticsConfig {
        self.config.analytics()
    }
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidConfig {
        field: field.to_string(),
        message: message.to_string(),
    }
}
