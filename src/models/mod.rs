//! Core data models for the engine.
//!
//! This module contains all the domain models used by the payroll and
//! analytics engines.

mod attendance;
mod audit;
mod employee;
mod ledger;
mod payroll;
mod period;

pub use attendance::{
    AttendanceRecord, LeaveRecord, LeaveStatus, OvertimeRequest, OvertimeStatus,
    hours_from_duration,
};
pub use audit::AuditStep;
pub use employee::Employee;
pub use ledger::{Category, EntryType, LedgerEntry, LedgerFilter, OpenItem, OpenItemKind};
pub use payroll::{PaySlip, Payroll, PayrollStatus};
pub use period::{DateRange, days_in_month, first_of_month, months_before, next_month};
