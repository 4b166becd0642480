//! Domain types shared across the client and CLI

pub mod execution;
pub mod workflow;

pub use execution::{Execution, ExecutionStatus};
pub use workflow::{Node, Workflow};
