use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeypairError {
    #[error("failed to read public key {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("AWS error: {0}")]
    Aws(String),
}

impl KeypairError {
    /// Flatten an SDK error's source chain into one message; the `Display`
    /// impls alone are too terse to act on.
    pub(crate) fn aws(err: &dyn std::error::Error) -> Self {
        let mut msg = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            msg.push_str(": ");
            msg.push_str(&cause.to_string());
            source = cause.source();
        }
        Self::Aws(msg)
    }
}
