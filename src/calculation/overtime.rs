//! Overtime reconciliation.
//!
//! This module compares an approved overtime request against the employee's
//! actual check-out for the same date. Two independent rules apply:
//!
//! - leaving before the approved end accrues a penalty for the shortfall at
//!   the plain hourly rate;
//! - leaving after the overtime threshold (18:00 by default) accrues pay for
//!   the hours past the threshold at the hourly rate times the premium.
//!
//! Both rules are evaluated for every request; neither excludes the other.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::OvertimeConfig;
use crate::models::{AttendanceRecord, AuditStep, OvertimeRequest, hours_from_duration};

/// The outcome of reconciling one overtime request.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::OvertimeReconciliation;
/// use payroll_engine::models::AuditStep;
/// use rust_decimal::Decimal;
///
/// let reconciliation = OvertimeReconciliation {
///     overtime_hours: Decimal::new(15, 1),
///     shortfall_hours: Decimal::new(5, 1),
///     pay: Decimal::new(15625, 2),
///     penalty: Decimal::new(4167, 2),
///     audit_step: AuditStep {
///         step_number: 3,
///         rule_id: "overtime_reconciliation".to_string(),
///         rule_name: "Overtime Reconciliation".to_string(),
///         input: serde_json::json!({}),
///         output: serde_json::json!({}),
///         reasoning: String::new(),
///     },
/// };
/// assert!(reconciliation.pay > reconciliation.penalty);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeReconciliation {
    /// Hours worked past the overtime threshold.
    pub overtime_hours: Decimal,
    /// Hours short of the approved end.
    pub shortfall_hours: Decimal,
    /// Premium pay earned.
    pub pay: Decimal,
    /// Penalty accrued.
    pub penalty: Decimal,
    /// The audit step recording this reconciliation.
    pub audit_step: AuditStep,
}

/// Reconciles one approved overtime request against its attendance record.
///
/// `attendance` is the record for the request's date, if any. A missing
/// record or a record without a check-out yields zero pay and zero penalty.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::reconcile_overtime;
/// use payroll_engine::config::OvertimeConfig;
/// use payroll_engine::models::{AttendanceRecord, OvertimeRequest, OvertimeStatus};
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
/// let request = OvertimeRequest {
///     employee_id: "emp_001".to_string(),
///     date,
///     start_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
///     end_time: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
///     status: OvertimeStatus::Approved,
/// };
/// let attendance = AttendanceRecord {
///     employee_id: "emp_001".to_string(),
///     check_in: date.and_hms_opt(8, 0, 0).unwrap(),
///     check_out: Some(date.and_hms_opt(19, 30, 0).unwrap()),
/// };
///
/// let result = reconcile_overtime(
///     &request,
///     Some(&attendance),
///     Decimal::new(100, 0),
///     &OvertimeConfig::default(),
///     1,
/// );
/// assert_eq!(result.penalty, Decimal::new(50, 0));
/// assert_eq!(result.pay, Decimal::new(1875, 1));
/// ```
pub fn reconcile_overtime(
    request: &OvertimeRequest,
    attendance: Option<&AttendanceRecord>,
    hourly_rate: Decimal,
    config: &OvertimeConfig,
    step_number: u32,
) -> OvertimeReconciliation {
    let approved_end = request.approved_end();
    let threshold = request.date.and_time(config.threshold);

    let Some(check_out) = attendance.and_then(|a| a.check_out) else {
        debug!(
            employee_id = %request.employee_id,
            date = %request.date,
            has_attendance = attendance.is_some(),
            "No check-out for approved overtime, contributing nothing"
        );

        return OvertimeReconciliation {
            overtime_hours: Decimal::ZERO,
            shortfall_hours: Decimal::ZERO,
            pay: Decimal::ZERO,
            penalty: Decimal::ZERO,
            audit_step: AuditStep {
                step_number,
                rule_id: "overtime_reconciliation".to_string(),
                rule_name: "Overtime Reconciliation".to_string(),
                input: serde_json::json!({
                    "date": request.date.to_string(),
                    "approved_end": approved_end.to_string(),
                    "check_out": serde_json::Value::Null
                }),
                output: serde_json::json!({ "pay": "0", "penalty": "0" }),
                reasoning: if attendance.is_some() {
                    "Attendance has no check-out; overtime not reconciled".to_string()
                } else {
                    "No attendance on the overtime date; overtime not reconciled".to_string()
                },
            },
        };
    };

    let mut shortfall_hours = Decimal::ZERO;
    let mut penalty = Decimal::ZERO;
    if check_out < approved_end {
        shortfall_hours = hours_from_duration(approved_end - check_out);
        penalty = shortfall_hours * hourly_rate;
    }

    let mut overtime_hours = Decimal::ZERO;
    let mut pay = Decimal::ZERO;
    if check_out > threshold {
        overtime_hours = hours_from_duration(check_out - threshold);
        pay = overtime_hours * hourly_rate * config.premium_multiplier;
    }

    let reasoning = match (shortfall_hours > Decimal::ZERO, overtime_hours > Decimal::ZERO) {
        (true, true) => format!(
            "Checked out {} hours before the approved end and {} hours past the {} threshold",
            shortfall_hours.normalize(),
            overtime_hours.normalize(),
            config.threshold
        ),
        (true, false) => format!(
            "Checked out {} hours before the approved end, not past the {} threshold",
            shortfall_hours.normalize(),
            config.threshold
        ),
        (false, true) => format!(
            "Worked the full approved window and {} hours past the {} threshold",
            overtime_hours.normalize(),
            config.threshold
        ),
        (false, false) => format!(
            "Worked the full approved window without passing the {} threshold",
            config.threshold
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "overtime_reconciliation".to_string(),
        rule_name: "Overtime Reconciliation".to_string(),
        input: serde_json::json!({
            "date": request.date.to_string(),
            "approved_end": approved_end.to_string(),
            "check_out": check_out.to_string(),
            "threshold": config.threshold.to_string(),
            "hourly_rate": hourly_rate.round_dp(2).to_string()
        }),
        output: serde_json::json!({
            "overtime_hours": overtime_hours.normalize().to_string(),
            "shortfall_hours": shortfall_hours.normalize().to_string(),
            "pay": pay.round_dp(2).to_string(),
            "penalty": penalty.round_dp(2).to_string()
        }),
        reasoning,
    };

    OvertimeReconciliation {
        overtime_hours,
        shortfall_hours,
        pay,
        penalty,
        audit_step,
    }
}
