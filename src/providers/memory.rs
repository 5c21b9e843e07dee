//! In-memory provider implementations.
//!
//! [`PayrollSnapshot`] and [`LedgerSnapshot`] are read-only views handed to
//! the engines for the duration of one call. [`InMemoryPayrollStore`]
//! enforces the one-active-payroll-per-month constraint inside its write
//! lock, the way a unique index would in a database.

use std::sync::RwLock;

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, DateRange, Employee, LeaveRecord, LedgerEntry, LedgerFilter, OpenItem,
    OpenItemKind, OvertimeRequest, Payroll, PayrollStatus, first_of_month,
};

use super::{
    AttendanceProvider, LeaveProvider, LedgerProvider, OvertimeProvider, PayrollStore,
    RosterProvider,
};

/// Time-keeping snapshot for a payroll run.
///
/// # Example
///
/// ```
/// use payroll_engine::models::Employee;
/// use payroll_engine::providers::{PayrollSnapshot, RosterProvider};
///
/// let snapshot = PayrollSnapshot::new(vec![Employee {
///     id: "emp_001".to_string(),
///     name: "Maria Santos".to_string(),
///     roles: vec!["User".to_string()],
///     basic_salary: None,
/// }]);
/// assert_eq!(snapshot.list_employees_with_role("User").unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PayrollSnapshot {
    employees: Vec<Employee>,
    attendance: Vec<AttendanceRecord>,
    leave: Vec<LeaveRecord>,
    overtime: Vec<OvertimeRequest>,
}

impl PayrollSnapshot {
    /// Creates a snapshot with a roster and no time-keeping records.
    pub fn new(employees: Vec<Employee>) -> Self {
        Self {
            employees,
            ..Default::default()
        }
    }

    /// Adds attendance records.
    pub fn with_attendance(mut self, records: impl IntoIterator<Item = AttendanceRecord>) -> Self {
        self.attendance.extend(records);
        self
    }

    /// Adds leave records.
    pub fn with_leave(mut self, records: impl IntoIterator<Item = LeaveRecord>) -> Self {
        self.leave.extend(records);
        self
    }

    /// Adds overtime requests.
    pub fn with_overtime(mut self, requests: impl IntoIterator<Item = OvertimeRequest>) -> Self {
        self.overtime.extend(requests);
        self
    }

    fn ensure_employee(&self, employee_id: &str) -> EngineResult<()> {
        if self.employees.iter().any(|e| e.id == employee_id) {
            Ok(())
        } else {
            Err(EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })
        }
    }
}

impl AttendanceProvider for PayrollSnapshot {
    fn list_attendance(
        &self,
        employee_id: &str,
        month: NaiveDate,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        self.ensure_employee(employee_id)?;
        let range = DateRange::for_month(month);

        Ok(self
            .attendance
            .iter()
            .filter(|r| r.employee_id == employee_id && range.contains(r.check_in))
            .cloned()
            .collect())
    }
}

impl LeaveProvider for PayrollSnapshot {
    fn count_approved_leave(&self, employee_id: &str, month: NaiveDate) -> EngineResult<u32> {
        self.ensure_employee(employee_id)?;
        let range = DateRange::for_month(month);

        let count = self
            .leave
            .iter()
            .filter(|l| {
                l.employee_id == employee_id && l.is_approved() && range.contains_date(l.start_date)
            })
            .count();
        Ok(count as u32)
    }
}

impl OvertimeProvider for PayrollSnapshot {
    fn list_approved_overtime(
        &self,
        employee_id: &str,
        month: NaiveDate,
    ) -> EngineResult<Vec<OvertimeRequest>> {
        self.ensure_employee(employee_id)?;
        let range = DateRange::for_month(month);

        Ok(self
            .overtime
            .iter()
            .filter(|o| {
                o.employee_id == employee_id && o.is_approved() && range.contains_date(o.date)
            })
            .cloned()
            .collect())
    }
}

impl RosterProvider for PayrollSnapshot {
    fn list_employees_with_role(&self, role: &str) -> EngineResult<Vec<Employee>> {
        Ok(self
            .employees
            .iter()
            .filter(|e| e.has_role(role))
            .cloned()
            .collect())
    }
}

/// Ledger snapshot for one analytics call.
#[derive(Debug, Clone, Default)]
pub struct LedgerSnapshot {
    entries: Vec<LedgerEntry>,
    open_items: Vec<OpenItem>,
}

impl LedgerSnapshot {
    /// Creates a snapshot from posted entries.
    pub fn new(entries: Vec<LedgerEntry>) -> Self {
        Self {
            entries,
            open_items: Vec::new(),
        }
    }

    /// Adds receivables and payables.
    pub fn with_open_items(mut self, items: impl IntoIterator<Item = OpenItem>) -> Self {
        self.open_items.extend(items);
        self
    }

    fn open_items_of(&self, kind: OpenItemKind) -> Vec<OpenItem> {
        self.open_items
            .iter()
            .filter(|i| i.kind == kind)
            .cloned()
            .collect()
    }
}

impl LedgerProvider for LedgerSnapshot {
    fn query_ledger(
        &self,
        range: DateRange,
        filter: LedgerFilter,
    ) -> EngineResult<Vec<LedgerEntry>> {
        Ok(self
            .entries
            .iter()
            .filter(|e| range.contains(e.transaction_date) && filter.matches(e))
            .cloned()
            .collect())
    }

    fn list_receivables(&self) -> EngineResult<Vec<OpenItem>> {
        Ok(self.open_items_of(OpenItemKind::Receivable))
    }

    fn list_payables(&self) -> EngineResult<Vec<OpenItem>> {
        Ok(self.open_items_of(OpenItemKind::Payable))
    }
}

/// A payroll store that keeps committed batches in memory.
#[derive(Debug, Default)]
pub struct InMemoryPayrollStore {
    payrolls: RwLock<Vec<Payroll>>,
}

impl InMemoryPayrollStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Archives every active payroll for `month`, returning how many changed.
    pub fn archive(&self, month: NaiveDate) -> EngineResult<usize> {
        let month = first_of_month(month);
        let mut payrolls = self.payrolls.write().map_err(poisoned)?;

        let mut archived = 0;
        for payroll in payrolls
            .iter_mut()
            .filter(|p| p.month == month && p.is_active())
        {
            payroll.status = PayrollStatus::Archived;
            archived += 1;
        }
        Ok(archived)
    }

    /// All committed payrolls, oldest first.
    pub fn payrolls(&self) -> EngineResult<Vec<Payroll>> {
        Ok(self.payrolls.read().map_err(poisoned)?.clone())
    }
}

impl PayrollStore for InMemoryPayrollStore {
    fn exists(&self, month: NaiveDate, include_archived: bool) -> EngineResult<bool> {
        let month = first_of_month(month);
        let payrolls = self.payrolls.read().map_err(poisoned)?;

        Ok(payrolls
            .iter()
            .any(|p| p.month == month && (include_archived || p.is_active())))
    }

    fn commit(&self, payroll: &Payroll) -> EngineResult<()> {
        let mut payrolls = self.payrolls.write().map_err(poisoned)?;

        if payrolls
            .iter()
            .any(|p| p.month == payroll.month && p.is_active())
        {
            return Err(EngineError::PayrollConflict {
                month: payroll.month,
            });
        }

        payrolls.push(payroll.clone());
        Ok(())
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> EngineError {
    EngineError::StoreError {
        message: "payroll store lock poisoned".to_string(),
    }
}
