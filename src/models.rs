use serde::{Deserialize, Serialize};

/// One expense entry as it is persisted: `{id, name, description, amount, date}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub amount: f64,
    /// Creation date, already rendered in the configured date format.
    pub date: String,
}
