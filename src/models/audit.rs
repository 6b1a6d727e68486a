//! Audit records produced by the reconciler.

use serde::{Deserialize, Serialize};

/// A single step in an audit trace recording a reconciliation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
///
/// # Example
///
/// ```
/// use hr_engine::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "count_days".to_string(),
///     rule_name: "Working Day Count".to_string(),
///     input: serde_json::json!({"from_date": "2024-01-01"}),
///     output: serde_json::json!({"total_days": "4"}),
///     reasoning: "5 days in range, 1 holiday excluded".to_string(),
/// };
/// assert_eq!(step.rule_id, "count_days");
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
