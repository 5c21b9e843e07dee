//! Monthly payroll generation.
//!
//! [`PayrollGenerator`] runs the attendance reconciler for every paid
//! employee and commits the resulting batch. The existence check and the
//! commit for a month run under an advisory lock keyed on the normalized
//! month, so concurrent calls for the same month produce exactly one
//! payroll. The store enforces the same constraint on commit for writers
//! outside this process.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use chrono::{NaiveDate, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::PayrollConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{PaySlip, Payroll, PayrollStatus, first_of_month};
use crate::providers::{
    AttendanceProvider, LeaveProvider, OvertimeProvider, PayrollStore, RosterProvider,
};

use super::pay_slip::assemble_pay_slip;
use super::reconciler::AttendanceReconciler;

/// The result of a generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GenerateOutcome {
    /// A new payroll was committed.
    Generated(Payroll),
    /// An active payroll already exists for the month; nothing was written.
    AlreadyExists {
        /// The normalized month.
        month: NaiveDate,
    },
}

impl GenerateOutcome {
    /// The committed payroll, if one was generated.
    pub fn payroll(&self) -> Option<&Payroll> {
        match self {
            GenerateOutcome::Generated(payroll) => Some(payroll),
            GenerateOutcome::AlreadyExists { .. } => None,
        }
    }
}

/// The read-only inputs of a payroll run.
#[derive(Clone, Copy)]
pub struct PayrollSources<'a> {
    /// Attendance records.
    pub attendance: &'a dyn AttendanceProvider,
    /// Approved leave.
    pub leave: &'a dyn LeaveProvider,
    /// Approved overtime.
    pub overtime: &'a dyn OvertimeProvider,
    /// Role membership.
    pub roster: &'a dyn RosterProvider,
}

impl<'a> PayrollSources<'a> {
    /// Uses one value for every source, e.g. a
    /// [`PayrollSnapshot`](crate::providers::PayrollSnapshot).
    pub fn uniform<T>(source: &'a T) -> Self
    where
        T: AttendanceProvider + LeaveProvider + OvertimeProvider + RosterProvider,
    {
        Self {
            attendance: source,
            leave: source,
            overtime: source,
            roster: source,
        }
    }
}

/// Registry of per-month advisory locks.
///
/// Share one registry (via `Arc`) between every generator that writes to
/// the same store.
#[derive(Debug, Default)]
pub struct MonthLocks {
    locks: DashMap<NaiveDate, Arc<Mutex<()>>>,
}

impl MonthLocks {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_for(&self, month: NaiveDate) -> Arc<Mutex<()>> {
        Arc::clone(&self.locks.entry(month).or_default())
    }
}

/// Generates one payroll per calendar month.
pub struct PayrollGenerator<'a> {
    sources: PayrollSources<'a>,
    store: &'a dyn PayrollStore,
    config: &'a PayrollConfig,
    locks: Arc<MonthLocks>,
}

impl<'a> PayrollGenerator<'a> {
    /// Creates a generator with its own lock registry.
    pub fn new(
        sources: PayrollSources<'a>,
        store: &'a dyn PayrollStore,
        config: &'a PayrollConfig,
    ) -> Self {
        Self {
            sources,
            store,
            config,
            locks: Arc::new(MonthLocks::new()),
        }
    }

    /// Replaces the lock registry with a shared one.
    pub fn with_locks(mut self, locks: Arc<MonthLocks>) -> Self {
        self.locks = locks;
        self
    }

    /// Generates and commits the payroll for `month`'s calendar month.
    ///
    /// Returns [`GenerateOutcome::AlreadyExists`] when a non-archived payroll
    /// already covers the month. Any error while building pay slips aborts
    /// the run before anything is committed.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::calculation::{GenerateOutcome, PayrollGenerator, PayrollSources};
    /// use payroll_engine::config::PayrollConfig;
    /// use payroll_engine::models::Employee;
    /// use payroll_engine::providers::{InMemoryPayrollStore, PayrollSnapshot};
    /// use chrono::NaiveDate;
    ///
    /// let snapshot = PayrollSnapshot::new(vec![Employee {
    ///     id: "emp_001".to_string(),
    ///     name: "Maria Santos".to_string(),
    ///     roles: vec!["User".to_string()],
    ///     basic_salary: None,
    /// }]);
    /// let store = InMemoryPayrollStore::new();
    /// let config = PayrollConfig::default();
    /// let generator = PayrollGenerator::new(PayrollSources::uniform(&snapshot), &store, &config);
    ///
    /// let june = NaiveDate::from_ymd_opt(2024, 6, 18).unwrap();
    /// let first = generator.generate(june).unwrap();
    /// assert_eq!(first.payroll().unwrap().pay_slips.len(), 1);
    ///
    /// let second = generator.generate(june).unwrap();
    /// assert!(matches!(second, GenerateOutcome::AlreadyExists { .. }));
    /// ```
    pub fn generate(&self, month: NaiveDate) -> EngineResult<GenerateOutcome> {
        let month = first_of_month(month);
        let start_time = Instant::now();

        let lock = self.locks.lock_for(month);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        if self.store.exists(month, false)? {
            warn!(month = %month, "Payroll already exists for month");
            return Ok(GenerateOutcome::AlreadyExists { month });
        }

        let pay_slips = self.preview(month)?;

        let payroll = Payroll {
            id: Uuid::new_v4(),
            month,
            generated_at: Utc::now(),
            status: PayrollStatus::PendingApproval,
            pay_slips,
        };

        match self.store.commit(&payroll) {
            Ok(()) => {}
            Err(EngineError::PayrollConflict { month }) => {
                warn!(month = %month, "Payroll committed concurrently by another writer");
                return Ok(GenerateOutcome::AlreadyExists { month });
            }
            Err(err) => return Err(err),
        }

        let duration_us = start_time.elapsed().as_micros() as u64;
        info!(
            payroll_id = %payroll.id,
            month = %month,
            employees = payroll.pay_slips.len(),
            total_net = %payroll.total_net().round_dp(2),
            duration_us,
            "Payroll generated"
        );

        Ok(GenerateOutcome::Generated(payroll))
    }

    /// Builds the pay slips for `month` without committing anything.
    pub fn preview(&self, month: NaiveDate) -> EngineResult<Vec<PaySlip>> {
        let month = first_of_month(month);
        let employees = self
            .sources
            .roster
            .list_employees_with_role(&self.config.payroll_role)?;

        let reconciler = AttendanceReconciler::new(
            self.sources.attendance,
            self.sources.leave,
            self.sources.overtime,
            self.config,
        );

        employees
            .iter()
            .map(|employee| {
                reconciler
                    .reconcile(employee, month)
                    .map(|summary| assemble_pay_slip(&summary, &self.config.statutory))
            })
            .collect()
    }
}
