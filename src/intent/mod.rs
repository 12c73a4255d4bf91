//! Intent classification pipeline
//!
//! Free-form text -> ordered rule table -> (action, parameters,
//! confidence, canned reply). First match wins; the tables in `extract`
//! make the tie-break order explicit.

pub mod classifier;
pub mod extract;

pub use classifier::{classify, Classification, IntentAction, IntentParams};
pub use extract::{derive_title, extract_task_id, extract_title};
