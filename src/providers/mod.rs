//! Data access seams for the engine.
//!
//! The engine never talks to a database. Every input arrives through one of
//! the provider traits below, and the only write goes through
//! [`PayrollStore::commit`]. The [`memory`] module ships snapshot
//! implementations backed by plain vectors.

pub mod memory;

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{
    AttendanceRecord, DateRange, Employee, LedgerEntry, LedgerFilter, OpenItem, OvertimeRequest,
    Payroll,
};

pub use memory::{InMemoryPayrollStore, LedgerSnapshot, PayrollSnapshot};

/// Supplies check-in/check-out records.
pub trait AttendanceProvider: Send + Sync {
    /// Attendance records for `employee_id` whose check-in falls in `month`.
    fn list_attendance(
        &self,
        employee_id: &str,
        month: NaiveDate,
    ) -> EngineResult<Vec<AttendanceRecord>>;
}

/// Supplies approved leave counts.
pub trait LeaveProvider: Send + Sync {
    /// Number of approved leave records for `employee_id` starting in `month`.
    fn count_approved_leave(&self, employee_id: &str, month: NaiveDate) -> EngineResult<u32>;
}

/// Supplies approved overtime requests.
pub trait OvertimeProvider: Send + Sync {
    /// Approved overtime requests for `employee_id` dated in `month`.
    fn list_approved_overtime(
        &self,
        employee_id: &str,
        month: NaiveDate,
    ) -> EngineResult<Vec<OvertimeRequest>>;
}

/// Supplies role membership.
pub trait RosterProvider: Send + Sync {
    /// Employees holding `role`.
    fn list_employees_with_role(&self, role: &str) -> EngineResult<Vec<Employee>>;
}

/// Supplies ledger entries and open items.
pub trait LedgerProvider: Send + Sync {
    /// Entries whose transaction date falls in `range` and match `filter`.
    fn query_ledger(
        &self,
        range: DateRange,
        filter: LedgerFilter,
    ) -> EngineResult<Vec<LedgerEntry>>;

    /// Receivables with their linked entries preloaded.
    fn list_receivables(&self) -> EngineResult<Vec<OpenItem>>;

    /// Payables with their linked entries preloaded.
    fn list_payables(&self) -> EngineResult<Vec<OpenItem>>;
}

/// Persists generated payrolls.
///
/// Implementations must make `commit` atomic and must reject a second
/// non-archived payroll for the same month with
/// [`EngineError::PayrollConflict`](crate::error::EngineError::PayrollConflict).
pub trait PayrollStore: Send + Sync {
    /// Whether a payroll exists for the normalized `month`.
    fn exists(&self, month: NaiveDate, include_archived: bool) -> EngineResult<bool>;

    /// Writes a payroll and all its slips, or nothing.
    fn commit(&self, payroll: &Payroll) -> EngineResult<()>;
}
