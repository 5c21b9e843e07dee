//! Daily and hourly rate derivation.
//!
//! This module provides the function that turns an employee's monthly basic
//! salary into the daily and hourly rates used by absence deductions and
//! overtime reconciliation.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::PayrollConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, Employee, days_in_month};

/// The result of a rate derivation, including the rates and audit step.
#[derive(Debug, Clone)]
pub struct RateDerivation {
    /// The monthly basic salary the rates were derived from.
    pub basic_salary: Decimal,
    /// Calendar days in the payroll month.
    pub working_days: u32,
    /// `basic_salary / working_days`.
    pub daily_rate: Decimal,
    /// `daily_rate / hours_per_day`.
    pub hourly_rate: Decimal,
    /// The audit step recording this derivation.
    pub audit_step: AuditStep,
}

/// Derives an employee's daily and hourly rates for a month.
///
/// The basic salary is the employee's override when present, otherwise the
/// configured basic salary. Every calendar day counts as a working day; no
/// weekends or holidays are excluded.
///
/// # Errors
///
/// Returns `CalculationError` if the configured hours per day is zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::derive_rates;
/// use payroll_engine::config::PayrollConfig;
/// use payroll_engine::models::Employee;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     name: "Maria Santos".to_string(),
///     roles: vec!["User".to_string()],
///     basic_salary: None,
/// };
/// let june = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// let rates = derive_rates(&employee, june, &PayrollConfig::default(), 1).unwrap();
///
/// assert_eq!(rates.working_days, 30);
/// assert_eq!(rates.daily_rate.round_dp(2), Decimal::new(66667, 2));
/// assert_eq!(rates.hourly_rate.round_dp(2), Decimal::new(8333, 2));
/// ```
pub fn derive_rates(
    employee: &Employee,
    month: NaiveDate,
    config: &PayrollConfig,
    step_number: u32,
) -> EngineResult<RateDerivation> {
    if config.hours_per_day <= Decimal::ZERO {
        return Err(EngineError::CalculationError {
            message: format!("hours_per_day must be positive, got {}", config.hours_per_day),
        });
    }

    let (basic_salary, source) = match employee.basic_salary {
        Some(salary) => (salary, "employee_override"),
        None => (config.basic_salary, "config"),
    };

    let working_days = days_in_month(month);
    let daily_rate = basic_salary / Decimal::from(working_days);
    let hourly_rate = daily_rate / config.hours_per_day;

    let audit_step = AuditStep {
        step_number,
        rule_id: "rate_derivation".to_string(),
        rule_name: "Rate Derivation".to_string(),
        input: serde_json::json!({
            "employee_id": employee.id,
            "basic_salary": basic_salary.to_string(),
            "source": source,
            "working_days": working_days,
            "hours_per_day": config.hours_per_day.normalize().to_string()
        }),
        output: serde_json::json!({
            "daily_rate": daily_rate.round_dp(2).to_string(),
            "hourly_rate": hourly_rate.round_dp(2).to_string()
        }),
        reasoning: format!(
            "Basic salary {} ({}) over {} calendar days gives {} per day and {} per hour",
            basic_salary,
            source,
            working_days,
            daily_rate.round_dp(2),
            hourly_rate.round_dp(2)
        ),
    };

    Ok(RateDerivation {
        basic_salary,
        working_days,
        daily_rate,
        hourly_rate,
        audit_step,
    })
}
