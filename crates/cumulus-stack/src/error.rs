use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StackError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parameter file {} is not valid YAML: {source}", path.display())]
    ParameterDecode {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("parameter file {} is not a flat string mapping: {detail}", path.display())]
    ParameterShape { path: PathBuf, detail: String },

    #[error("stack not found: {stack_name}")]
    StackNotFound { stack_name: String },

    #[error("AWS error: {0}")]
    Aws(String),
}

/// Walk the full error chain and join all causes into one string.
///
/// AWS SDK errors often have terse `Display` impls (e.g. "service error")
/// but useful detail in the source chain.
pub fn format_err_chain(err: &dyn std::error::Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}
