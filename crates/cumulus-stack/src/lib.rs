//! cumulus-stack
//!
//! Thin lifecycle wrapper around the CloudFormation API: read a template and
//! a flat YAML parameter file from disk, shape one request, return the
//! response. Retry, rollback orchestration, and consistency are all owned by
//! the service; nothing here retries or recovers.
//!
//! Public API:
//! - [`StackConfig`] — local identity of one stack (name, file paths, flags)
//! - [`StackManager`] — one remote round-trip per method:
//!   validate / create / update / delete / describe / exists / status
//! - [`parameters`] — flat YAML map → SDK parameter list

pub mod error;
pub mod manager;
pub mod parameters;

pub use crate::error::StackError;
pub use crate::manager::{StackConfig, StackManager};
