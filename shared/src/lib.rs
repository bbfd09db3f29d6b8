use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A to-do item. A task is complete exactly when `completion_date` is set;
/// there is no separate completed flag.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub completion_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The permitted fields for creating or updating a task. Updates replace
/// all three fields, so a null `completion_date` clears a previous one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskParams {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completion_date: Option<DateTime<Utc>>,
}
