//! Pay slip and payroll batch models.
//!
//! This module contains the [`PaySlip`] and [`Payroll`] types produced by a
//! payroll run. Both are write-once: the generator creates them and the
//! payroll store persists them unchanged.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a payroll batch.
///
/// The generator only ever creates `PendingApproval` batches; every other
/// transition belongs to the approval workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollStatus {
    /// Generated and awaiting review.
    PendingApproval,
    /// Approved for disbursement.
    Approved,
    /// Rejected by a reviewer.
    Rejected,
    /// Archived; no longer blocks regeneration of its month.
    Archived,
}

/// One employee's computed earnings and deductions for one month.
///
/// # Invariants
///
/// - `gross_pay = max(0, basic_salary - absent_deductions + overtime_pay)`
/// - `total_deductions = sss + philhealth + pagibig + absent_deductions + overtime_penalty`
/// - `net_pay = max(0, gross_pay - total_deductions)`
///
/// # Example
///
/// ```
/// use payroll_engine::models::PaySlip;
/// use rust_decimal::Decimal;
///
/// let slip = PaySlip {
///     employee_id: "emp_001".to_string(),
///     basic_salary: Decimal::new(20000, 0),
///     days_absent: 0,
///     overtime_pay: Decimal::ZERO,
///     overtime_penalty: Decimal::ZERO,
///     absent_deductions: Decimal::ZERO,
///     sss: Decimal::new(900, 0),
///     philhealth: Decimal::new(500, 0),
///     pagibig: Decimal::new(200, 0),
///     gross_pay: Decimal::new(20000, 0),
///     total_deductions: Decimal::new(1600, 0),
///     net_pay: Decimal::new(18400, 0),
/// };
/// assert!(slip.is_consistent());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaySlip {
    /// The paid employee.
    pub employee_id: String,
    /// Monthly basic salary.
    pub basic_salary: Decimal,
    /// Days without attendance or approved leave.
    pub days_absent: u32,
    /// Premium pay for hours past the overtime threshold.
    pub overtime_pay: Decimal,
    /// Deduction for leaving before an approved overtime window ended.
    pub overtime_penalty: Decimal,
    /// Deduction for absent days.
    pub absent_deductions: Decimal,
    /// SSS contribution.
    pub sss: Decimal,
    /// PhilHealth contribution.
    pub philhealth: Decimal,
    /// Pag-IBIG contribution.
    pub pagibig: Decimal,
    /// Gross pay, clamped at zero.
    pub gross_pay: Decimal,
    /// Sum of every deduction.
    pub total_deductions: Decimal,
    /// Net pay, clamped at zero.
    pub net_pay: Decimal,
}

impl PaySlip {
    /// Checks the slip's arithmetic invariants.
    pub fn is_consistent(&self) -> bool {
        let gross = (self.basic_salary - self.absent_deductions + self.overtime_pay)
            .max(Decimal::ZERO);
        let deductions = self.sss
            + self.philhealth
            + self.pagibig
            + self.absent_deductions
            + self.overtime_penalty;
        let net = (gross - deductions).max(Decimal::ZERO);

        self.gross_pay == gross && self.total_deductions == deductions && self.net_pay == net
    }
}

/// One generated batch of pay slips for a calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payroll {
    /// Unique identifier for the batch.
    pub id: Uuid,
    /// Payroll month, always the first day of the month.
    pub month: NaiveDate,
    /// When the batch was generated.
    pub generated_at: DateTime<Utc>,
    /// Lifecycle state.
    pub status: PayrollStatus,
    /// One slip per paid employee.
    pub pay_slips: Vec<PaySlip>,
}

impl Payroll {
    /// Returns true unless the batch has been archived.
    pub fn is_active(&self) -> bool {
        self.status != PayrollStatus::Archived
    }

    /// Sum of gross pay across all slips.
    pub fn total_gross(&self) -> Decimal {
        self.pay_slips.iter().map(|s| s.gross_pay).sum()
    }

    /// Sum of deductions across all slips.
    pub fn total_deductions(&self) -> Decimal {
        self.pay_slips.iter().map(|s| s.total_deductions).sum()
    }

    /// Sum of net pay across all slips.
    pub fn total_net(&self) -> Decimal {
        self.pay_slips.iter().map(|s| s.net_pay).sum()
    }

    /// Finds the slip for an employee.
    pub fn slip_for(&self, employee_id: &str) -> Option<&PaySlip> {
        self.pay_slips.iter().find(|s| s.employee_id == employee_id)
    }
}
