//! Errand - conversational task assistant
//!
//! Natural-language messages are classified into task intents by an
//! ordered rule table, gated on confidence, and dispatched to an
//! ownership-checked CRUD service. The reply combines a canned response,
//! a confirmation of any mutation, and suggested follow-up actions.

pub mod chat;
pub mod core;
pub mod intent;
pub mod llm;
pub mod store;
pub mod task;
pub mod tools;
