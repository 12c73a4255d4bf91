//! Message dispatch: classification, gating, execution, reply assembly
//!
//! The dispatcher is the sole entry point for a transport layer. It is a
//! total function of (user, message): every failure along the way
//! degrades to a plain-language reply plus the standard suggestion menu,
//! never a crash and never an aborted conversation.

use crate::chat::context::ChatContext;
use crate::chat::suggestions::suggestions_for;
use crate::core::config::ErrandConfig;
use crate::core::types::ConversationId;
use crate::intent::{classify, Classification, IntentAction};
use crate::llm::LlmClient;
use crate::task::{ServiceOutcome, TaskService};
use crate::tools::ToolId;
use serde::Serialize;

/// System prompt for the fallback reply generator
const FALLBACK_SYSTEM_PROMPT: &str = "You are a friendly task assistant. The user said \
something you could not map to a task operation. Answer in one or two short sentences, \
nudging them toward adding, listing, completing, updating, or deleting tasks.";

/// Record of one Task Service invocation
#[derive(Debug, Clone, Serialize)]
pub struct ToolCall {
    pub tool: &'static str,
    #[serde(flatten)]
    pub result: ServiceOutcome,
}

/// Everything a transport needs to answer one message
#[derive(Debug, Clone, Serialize)]
pub struct DispatchOutcome {
    pub conversation_id: ConversationId,
    pub response: String,
    pub tool_calls: Vec<ToolCall>,
    pub suggested_actions: Vec<String>,
}

/// Classifies messages and drives the task service
pub struct Dispatcher {
    service: TaskService,
    llm: Option<LlmClient>,
    config: ErrandConfig,
    conversation_id: ConversationId,
}

impl Dispatcher {
    pub fn new(service: TaskService, config: ErrandConfig) -> Self {
        Self {
            service,
            llm: None,
            config,
            conversation_id: ConversationId::new(),
        }
    }

    /// Attach a fallback reply generator
    pub fn with_llm(mut self, llm: LlmClient) -> Self {
        self.llm = Some(llm);
        self
    }

    pub fn conversation_id(&self) -> ConversationId {
        self.conversation_id
    }

    /// Process one message end to end.
    ///
    /// A task operation runs only for a non-unknown action strictly above
    /// the confidence gate; everything below it answers with the canned
    /// (or LLM-phrased) reply and no store access.
    pub async fn dispatch(&self, user_id: &str, message: &str) -> DispatchOutcome {
        let preview: String = message.chars().take(50).collect();
        tracing::info!(user = user_id, message = %preview, "chat message received");

        let classification = classify(message);

        let mut tool_calls = Vec::new();
        let confident = classification.confidence > self.config.confidence_threshold;
        if classification.action != IntentAction::Unknown && confident {
            if let Some(call) = self.execute(user_id, &classification).await {
                tool_calls.push(call);
            }
        }

        let mut response = if confident {
            classification.reply.clone()
        } else {
            self.fallback_reply(user_id, message, &classification).await
        };

        // Confirm a successful mutation by naming the affected task
        if let Some(outcome) = tool_calls
            .iter()
            .filter_map(|call| call.result.as_task())
            .find(|outcome| outcome.status.is_terminal())
        {
            response.push_str(&format!("\nAction completed: {}", outcome.title));
        }

        DispatchOutcome {
            conversation_id: self.conversation_id,
            response,
            tool_calls,
            suggested_actions: suggestions_for(classification.action),
        }
    }

    /// Invoke the service operation matching the classified action.
    ///
    /// Returns `None` when a required parameter is missing; the confidence
    /// gate normally catches those upstream, this is the backstop.
    async fn execute(&self, user_id: &str, classification: &Classification) -> Option<ToolCall> {
        let tool = ToolId::for_action(classification.action)?.name();
        let params = &classification.params;
        let result = match classification.action {
            IntentAction::AddTask => {
                let title = params.title.as_deref()?;
                ServiceOutcome::Task(
                    self.service
                        .add(user_id, title, params.description.as_deref())
                        .await,
                )
            }
            IntentAction::ListTasks => {
                let filter = params.status_filter.unwrap_or_default();
                self.service.list(user_id, filter).await
            }
            IntentAction::CompleteTask => {
                let task_id = params.task_id?;
                ServiceOutcome::Task(self.service.complete(user_id, task_id).await)
            }
            IntentAction::DeleteTask => {
                let task_id = params.task_id?;
                ServiceOutcome::Task(self.service.delete(user_id, task_id).await)
            }
            IntentAction::UpdateTask => {
                let task_id = params.task_id?;
                ServiceOutcome::Task(
                    self.service
                        .update(
                            user_id,
                            task_id,
                            params.title.as_deref(),
                            params.description.as_deref(),
                        )
                        .await,
                )
            }
            IntentAction::Unknown => return None,
        };
        Some(ToolCall { tool, result })
    }

    /// Phrase a reply for a low-confidence message.
    ///
    /// Uses the LLM when configured, with the user's recent tasks as
    /// context; any failure falls back to the canned reply, so this can
    /// only ever improve the text.
    async fn fallback_reply(
        &self,
        user_id: &str,
        message: &str,
        classification: &Classification,
    ) -> String {
        let Some(llm) = &self.llm else {
            return classification.reply.clone();
        };

        let context = ChatContext::gather(&self.service, user_id, self.config.context_tasks).await;
        let prompt = format!("{}\n\nUser message:\n{}", context.summary(), message);
        match llm.complete(FALLBACK_SYSTEM_PROMPT, &prompt).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => classification.reply.clone(),
            Err(e) => {
                tracing::warn!(error = %e, "fallback reply generation failed");
                classification.reply.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    fn dispatcher() -> Dispatcher {
        let config = ErrandConfig::default();
        let service = TaskService::new(Arc::new(MemoryStore::new()), config.store_timeout());
        Dispatcher::new(service, config)
    }

    #[tokio::test]
    async fn test_low_confidence_makes_no_tool_call() {
        let d = dispatcher();
        let outcome = d.dispatch("u1", "complete it").await;
        // Confidence 0.6 does not clear the strict > 0.6 gate
        assert!(outcome.tool_calls.is_empty());
        assert_eq!(outcome.response, "Please specify a task number to complete.");
    }

    #[tokio::test]
    async fn test_unknown_gets_canned_reply_and_menu() {
        let d = dispatcher();
        let outcome = d.dispatch("u1", "What can you do?").await;
        assert!(outcome.tool_calls.is_empty());
        assert!(outcome.response.contains("Add tasks"));
        assert_eq!(
            outcome.suggested_actions,
            vec!["Add a task", "List tasks", "Mark task complete"]
        );
    }

    #[tokio::test]
    async fn test_add_appends_confirmation() {
        let d = dispatcher();
        let outcome = d.dispatch("u1", "Add task to buy milk").await;
        assert_eq!(outcome.tool_calls.len(), 1);
        assert_eq!(outcome.tool_calls[0].tool, "add_task");
        assert!(outcome.response.starts_with("Added 'Buy milk' to your tasks."));
        assert!(outcome.response.ends_with("Action completed: Buy milk"));
    }

    #[tokio::test]
    async fn test_error_outcome_appends_no_confirmation() {
        let d = dispatcher();
        let outcome = d.dispatch("u1", "Delete task 9").await;
        assert_eq!(outcome.tool_calls.len(), 1);
        let result = outcome.tool_calls[0].result.as_task().unwrap();
        assert!(!result.status.is_terminal());
        // The canned reply stands, without an "Action completed" line
        assert_eq!(outcome.response, "Deleted task 9.");
    }

    #[tokio::test]
    async fn test_tool_call_serializes_like_a_tool_record() {
        let d = dispatcher();
        let outcome = d.dispatch("u1", "Add task to buy milk").await;
        let json = serde_json::to_value(&outcome.tool_calls[0]).unwrap();
        assert_eq!(json["tool"], "add_task");
        assert_eq!(json["status"], "created");
        assert_eq!(json["title"], "Buy milk");
    }
}
