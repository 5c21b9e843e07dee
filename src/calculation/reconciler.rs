//! Monthly attendance reconciliation for one employee.
//!
//! The reconciler pulls the employee's attendance, approved leave and
//! approved overtime for a month from the providers and turns them into
//! present/absent day counts, the absence deduction, and the overtime
//! pay/penalty totals that feed a pay slip.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PayrollConfig;
use crate::error::EngineResult;
use crate::models::{AuditStep, Employee, first_of_month};
use crate::providers::{AttendanceProvider, LeaveProvider, OvertimeProvider};

use super::overtime::reconcile_overtime;
use super::rates::derive_rates;

/// One employee's reconciled month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    /// The reconciled employee.
    pub employee_id: String,
    /// The payroll month (first of month).
    pub month: NaiveDate,
    /// Monthly basic salary used for the rates.
    pub basic_salary: Decimal,
    /// Calendar days in the month.
    pub working_days: u32,
    /// Attendance days plus approved leave starting in the month.
    pub days_present: u32,
    /// `max(0, working_days - days_present)`.
    pub days_absent: u32,
    /// `basic_salary / working_days`.
    pub daily_rate: Decimal,
    /// `daily_rate / hours_per_day`.
    pub hourly_rate: Decimal,
    /// `days_absent * daily_rate`.
    pub absent_deductions: Decimal,
    /// Sum of overtime premium pay.
    pub overtime_pay: Decimal,
    /// Sum of overtime shortfall penalties.
    pub overtime_penalty: Decimal,
    /// Every rule applied, in order.
    pub audit_steps: Vec<AuditStep>,
}

/// Reconciles attendance, leave and overtime into a monthly summary.
pub struct AttendanceReconciler<'a> {
    attendance: &'a dyn AttendanceProvider,
    leave: &'a dyn LeaveProvider,
    overtime: &'a dyn OvertimeProvider,
    config: &'a PayrollConfig,
}

impl<'a> AttendanceReconciler<'a> {
    /// Creates a reconciler over the given providers.
    pub fn new(
        attendance: &'a dyn AttendanceProvider,
        leave: &'a dyn LeaveProvider,
        overtime: &'a dyn OvertimeProvider,
        config: &'a PayrollConfig,
    ) -> Self {
        Self {
            attendance,
            leave,
            overtime,
            config,
        }
    }

    /// Reconciles one employee's month.
    ///
    /// Attendance and approved leave both count toward presence and are not
    /// deduplicated: a day with both a check-in and an approved leave counts
    /// twice.
    ///
    /// # Errors
    ///
    /// Propagates provider errors, including `EmployeeNotFound`.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::calculation::AttendanceReconciler;
    /// use payroll_engine::config::PayrollConfig;
    /// use payroll_engine::models::Employee;
    /// use payroll_engine::providers::PayrollSnapshot;
    /// use chrono::NaiveDate;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     name: "Maria Santos".to_string(),
    ///     roles: vec!["User".to_string()],
    ///     basic_salary: None,
    /// };
    /// let snapshot = PayrollSnapshot::new(vec![employee.clone()]);
    /// let config = PayrollConfig::default();
    /// let reconciler = AttendanceReconciler::new(&snapshot, &snapshot, &snapshot, &config);
    ///
    /// let june = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    /// let summary = reconciler.reconcile(&employee, june).unwrap();
    /// assert_eq!(summary.days_present, 0);
    /// assert_eq!(summary.days_absent, 30);
    /// assert_eq!(summary.absent_deductions, summary.basic_salary);
    /// ```
    pub fn reconcile(
        &self,
        employee: &Employee,
        month: NaiveDate,
    ) -> EngineResult<AttendanceSummary> {
        let month = first_of_month(month);
        let mut audit_steps = Vec::new();
        let mut step_number: u32 = 1;

        let rates = derive_rates(employee, month, self.config, step_number)?;
        audit_steps.push(rates.audit_step);
        step_number += 1;

        let attendance = self.attendance.list_attendance(&employee.id, month)?;
        let approved_leave = self.leave.count_approved_leave(&employee.id, month)?;

        let attendance_days = attendance.len() as u32;
        let days_present = attendance_days + approved_leave;
        let days_absent = rates.working_days.saturating_sub(days_present);
        let absent_deductions = Decimal::from(days_absent) * rates.daily_rate;

        audit_steps.push(AuditStep {
            step_number,
            rule_id: "presence_count".to_string(),
            rule_name: "Presence Count".to_string(),
            input: serde_json::json!({
                "attendance_days": attendance_days,
                "approved_leave": approved_leave,
                "working_days": rates.working_days
            }),
            output: serde_json::json!({
                "days_present": days_present,
                "days_absent": days_absent,
                "absent_deductions": absent_deductions.round_dp(2).to_string()
            }),
            reasoning: format!(
                "{} attendance days plus {} approved leave over {} calendar days leaves {} absent",
                attendance_days, approved_leave, rates.working_days, days_absent
            ),
        });
        step_number += 1;

        let mut overtime_pay = Decimal::ZERO;
        let mut overtime_penalty = Decimal::ZERO;

        for request in self.overtime.list_approved_overtime(&employee.id, month)? {
            let record = attendance.iter().find(|r| r.date() == request.date);
            let result = reconcile_overtime(
                &request,
                record,
                rates.hourly_rate,
                &self.config.overtime,
                step_number,
            );
            overtime_pay += result.pay;
            overtime_penalty += result.penalty;
            audit_steps.push(result.audit_step);
            step_number += 1;
        }

        debug!(
            employee_id = %employee.id,
            month = %month,
            days_present,
            days_absent,
            overtime_pay = %overtime_pay.round_dp(2),
            overtime_penalty = %overtime_penalty.round_dp(2),
            "Reconciled attendance"
        );

        Ok(AttendanceSummary {
            employee_id: employee.id.clone(),
            month,
            basic_salary: rates.basic_salary,
            working_days: rates.working_days,
            days_present,
            days_absent,
            daily_rate: rates.daily_rate,
            hourly_rate: rates.hourly_rate,
            absent_deductions,
            overtime_pay,
            overtime_penalty,
            audit_steps,
        })
    }
}
