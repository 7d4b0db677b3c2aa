//! cumulus-keypair
//!
//! Ensures the account has at least one EC2 keypair: list, import a local
//! public key under a fixed logical name if none exist, re-list. Two
//! concurrent invocations can both observe "empty" and both import — a
//! known race, accepted for a single-operator provisioning tool.

pub mod error;
pub mod importer;

pub use crate::error::KeypairError;
pub use crate::importer::{DEFAULT_KEY_NAME, KeypairConfig, KeypairImporter, describe_lines};
