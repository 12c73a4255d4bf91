//! Recent-task context for fallback reply generation
//!
//! When a low-confidence message is handed to the LLM, a short summary of
//! the user's current tasks makes the generated reply concrete. The
//! summary is best-effort: a failed fetch degrades to an empty preamble,
//! never to an error.

use crate::core::types::StatusFilter;
use crate::task::{ServiceOutcome, TaskDetail, TaskService};

/// Snapshot of a user's tasks for prompt construction
#[derive(Debug, Clone, Default)]
pub struct ChatContext {
    /// Most recent tasks, newest first
    pub recent_tasks: Vec<TaskDetail>,
    /// Total across all states, not just the ones listed above
    pub total_tasks: usize,
}

impl ChatContext {
    /// Gather up to `limit` recent tasks for `user_id`
    pub async fn gather(service: &TaskService, user_id: &str, limit: usize) -> Self {
        match service.list(user_id, StatusFilter::All).await {
            ServiceOutcome::Listing(listing) => Self {
                total_tasks: listing.count,
                recent_tasks: listing.tasks.into_iter().take(limit).collect(),
            },
            ServiceOutcome::Task(_) => Self::default(),
        }
    }

    /// Render the snapshot as a prompt preamble
    pub fn summary(&self) -> String {
        if self.total_tasks == 0 {
            return "The user has no tasks yet.".to_string();
        }

        let mut lines = vec![format!("The user has {} task(s). Most recent:", self.total_tasks)];
        for task in &self.recent_tasks {
            let state = if task.completed { "done" } else { "open" };
            lines.push(format!("- [{}] {} ({})", task.id, task.title, state));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::TaskId;
    use chrono::Utc;

    #[test]
    fn test_empty_summary() {
        assert_eq!(ChatContext::default().summary(), "The user has no tasks yet.");
    }

    #[test]
    fn test_summary_lists_recent_tasks() {
        let context = ChatContext {
            total_tasks: 5,
            recent_tasks: vec![TaskDetail {
                id: TaskId(4),
                title: "Buy milk".to_string(),
                description: None,
                completed: false,
                created_at: Utc::now(),
            }],
        };
        let summary = context.summary();
        assert!(summary.starts_with("The user has 5 task(s)."));
        assert!(summary.contains("- [4] Buy milk (open)"));
    }
}
