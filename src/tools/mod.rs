//! Protocol-facing tool declarations

pub mod catalog;

pub use catalog::{declarations, ToolDecl, ToolId};
