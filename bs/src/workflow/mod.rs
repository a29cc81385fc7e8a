//! Session workflow
//!
//! The generate-titles -> select-title -> generate-post -> reset cycle.
//! [`WorkflowState`] holds the data and guards each transition;
//! [`SessionController`] is the only thing that mutates it and the only thing
//! that talks to the completion service.

mod controller;
mod error;
mod state;

pub use controller::SessionController;
pub use error::WorkflowError;
pub use state::{Phase, WorkflowState};
