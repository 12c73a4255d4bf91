//! Conversation layer
//!
//! Ties the pipeline together: classify -> gate on confidence -> run the
//! matching task operation -> assemble reply text and follow-up
//! suggestions.

pub mod context;
pub mod dispatcher;
pub mod suggestions;

pub use context::ChatContext;
pub use dispatcher::{DispatchOutcome, Dispatcher, ToolCall};
pub use suggestions::suggestions_for;
