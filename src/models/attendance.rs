//! Attendance, leave and overtime records.
//!
//! These are the raw time-keeping inputs of a payroll run. They are
//! produced by the time clock and the leave/overtime approval workflows,
//! and the engine only ever reads them.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One day's check-in/check-out for an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The employee who checked in.
    pub employee_id: String,
    /// When the employee checked in.
    pub check_in: NaiveDateTime,
    /// When the employee checked out; `None` until the day is closed.
    pub check_out: Option<NaiveDateTime>,
}

impl AttendanceRecord {
    /// The calendar date the record belongs to (the check-in date).
    pub fn date(&self) -> NaiveDate {
        self.check_in.date()
    }
}

/// Approval state of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Awaiting a decision.
    Pending,
    /// Approved; counts as a present day.
    Approved,
    /// Denied.
    Denied,
}

/// A leave request spanning one or more days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRecord {
    /// The employee on leave.
    pub employee_id: String,
    /// Approval state.
    pub status: LeaveStatus,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave.
    pub end_date: NaiveDate,
}

impl LeaveRecord {
    /// Returns true if the leave was approved.
    pub fn is_approved(&self) -> bool {
        self.status == LeaveStatus::Approved
    }
}

/// Approval state of an overtime request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OvertimeStatus {
    /// Awaiting a decision.
    PendingApproval,
    /// Approved; participates in payroll.
    Approved,
    /// Denied.
    Denied,
}

/// A request to work an overtime window on a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeRequest {
    /// The requesting employee.
    pub employee_id: String,
    /// The date the overtime is worked.
    pub date: NaiveDate,
    /// Approved window start.
    pub start_time: NaiveTime,
    /// Approved window end.
    pub end_time: NaiveTime,
    /// Approval state.
    pub status: OvertimeStatus,
}

impl OvertimeRequest {
    /// Returns true if the request was approved.
    pub fn is_approved(&self) -> bool {
        self.status == OvertimeStatus::Approved
    }

    /// Length of the approved window.
    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }

    /// Length of the approved window in hours.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{OvertimeRequest, OvertimeStatus};
    /// use chrono::{NaiveDate, NaiveTime};
    /// use rust_decimal::Decimal;
    ///
    /// let request = OvertimeRequest {
    ///     employee_id: "emp_001".to_string(),
    ///     date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
    ///     start_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
    ///     end_time: NaiveTime::from_hms_opt(20, 30, 0).unwrap(),
    ///     status: OvertimeStatus::Approved,
    /// };
    /// assert_eq!(request.duration_hours(), Decimal::new(35, 1));
    /// ```
    pub fn duration_hours(&self) -> Decimal {
        hours_from_duration(self.duration())
    }

    /// The approved end as a timestamp on the request's date.
    pub fn approved_end(&self) -> NaiveDateTime {
        self.date.and_time(self.end_time)
    }
}

/// Converts a duration to fractional hours at second precision.
pub fn hours_from_duration(duration: Duration) -> Decimal {
    Decimal::new(duration.num_seconds(), 0) / Decimal::new(3600, 0)
}
