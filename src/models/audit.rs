//! Audit trail types.
//!
//! Every rule the reconciler applies records an [`AuditStep`] so a pay
//! slip can be explained line by line after the fact.

use serde::{Deserialize, Serialize};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
///
/// # Example
///
/// ```
/// use payroll_engine::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "presence_count".to_string(),
///     rule_name: "Presence Count".to_string(),
///     input: serde_json::json!({"attendance_days": 28, "approved_leave": 2}),
///     output: serde_json::json!({"days_present": 30}),
///     reasoning: "28 attendance days plus 2 approved leave".to_string(),
/// };
/// assert_eq!(step.output["days_present"], 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}
