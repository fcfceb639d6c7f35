use crate::persistence::lenient;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A to-do item that a focus session can be linked to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::bool_or_false")]
    pub completed: bool,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub created_at: String,
}

impl Task {
    /// Create a task from user input. Blank names are rejected.
    pub fn new(name: &str, description: &str, now: DateTime<Local>) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        Some(Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: description.trim().to_string(),
            completed: false,
            created_at: now.to_rfc3339(),
        })
    }

    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
    }
}

/// Tasks that can still be linked to a session
pub fn active_tasks(tasks: &[Task]) -> Vec<&Task> {
    tasks.iter().filter(|t| !t.completed).collect()
}

pub fn done_tasks(tasks: &[Task]) -> Vec<&Task> {
    tasks.iter().filter(|t| t.completed).collect()
}

pub fn find_task_mut<'a>(tasks: &'a mut [Task], id: &str) -> Option<&'a mut Task> {
    tasks.iter_mut().find(|t| t.id == id)
}
