//! Employee model.
//!
//! This module defines the Employee struct as the roster provider hands it
//! to a payroll run.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents an employee on the payroll roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Roster roles the employee holds (e.g., "User", "Admin").
    #[serde(default)]
    pub roles: Vec<String>,
    /// Optional override for the configured monthly basic salary.
    #[serde(default)]
    pub basic_salary: Option<Decimal>,
}

impl Employee {
    /// Returns true if the employee holds the given role.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::Employee;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     name: "Maria Santos".to_string(),
    ///     roles: vec!["User".to_string()],
    ///     basic_salary: None,
    /// };
    /// assert!(employee.has_role("User"));
    /// assert!(!employee.has_role("Admin"));
    /// ```
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}
