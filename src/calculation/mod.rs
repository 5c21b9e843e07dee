//! Payroll calculation.
//!
//! This module derives daily and hourly rates from the basic salary,
//! reconciles approved overtime against attendance, counts presence and
//! absence for a month, assembles pay slips, and generates one payroll per
//! calendar month.

mod generator;
mod overtime;
mod pay_slip;
mod rates;
mod reconciler;

pub use generator::{GenerateOutcome, MonthLocks, PayrollGenerator, PayrollSources};
pub use overtime::{OvertimeReconciliation, reconcile_overtime};
pub use pay_slip::assemble_pay_slip;
pub use rates::{RateDerivation, derive_rates};
pub use reconciler::{AttendanceReconciler, AttendanceSummary};
