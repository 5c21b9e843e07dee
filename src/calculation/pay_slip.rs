//! Pay slip assembly.
//!
//! Turns a reconciled month into a [`PaySlip`], applying the statutory
//! deductions and clamping gross and net pay at zero.

use rust_decimal::Decimal;

use crate::config::StatutoryDeductions;
use crate::models::PaySlip;

use super::reconciler::AttendanceSummary;

/// Assembles a pay slip from a reconciled month.
///
/// - `gross = max(0, basic - absent_deductions + overtime_pay)`
/// - `deductions = sss + philhealth + pagibig + absent_deductions + overtime_penalty`
/// - `net = max(0, gross - deductions)`
///
/// Absent days reduce gross pay and are also counted again among the
/// deductions.
pub fn assemble_pay_slip(summary: &AttendanceSummary, statutory: &StatutoryDeductions) -> PaySlip {
    let gross_pay = (summary.basic_salary - summary.absent_deductions + summary.overtime_pay)
        .max(Decimal::ZERO);

    let total_deductions = statutory.sss
        + statutory.philhealth
        + statutory.pagibig
        + summary.absent_deductions
        + summary.overtime_penalty;

    let net_pay = (gross_pay - total_deductions).max(Decimal::ZERO);

    PaySlip {
        employee_id: summary.employee_id.clone(),
        basic_salary: summary.basic_salary,
        days_absent: summary.days_absent,
        overtime_pay: summary.overtime_pay,
        overtime_penalty: summary.overtime_penalty,
        absent_deductions: summary.absent_deductions,
        sss: statutory.sss,
        philhealth: statutory.philhealth,
        pagibig: statutory.pagibig,
        gross_pay,
        total_deductions,
        net_pay,
    }
}
