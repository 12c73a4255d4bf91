//! Ownership-checked task operations

pub mod service;

pub use service::{
    OutcomeStatus, ServiceOutcome, TaskDetail, TaskListing, TaskOutcome, TaskService,
};
