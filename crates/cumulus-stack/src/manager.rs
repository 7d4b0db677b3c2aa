//! Stack lifecycle operations.
//!
//! Each [`StackManager`] method is a single round-trip to CloudFormation
//! with no internal retry. A manager instance is not designed for concurrent
//! use; callers drive one operation at a time.

use std::collections::BTreeMap;
use std::path::PathBuf;

use aws_sdk_cloudformation::Client;
use aws_sdk_cloudformation::error::ProvideErrorMetadata;
use aws_sdk_cloudformation::operation::create_stack::CreateStackOutput;
use aws_sdk_cloudformation::operation::delete_stack::DeleteStackOutput;
use aws_sdk_cloudformation::operation::describe_stacks::DescribeStacksError;
use aws_sdk_cloudformation::operation::update_stack::UpdateStackOutput;
use aws_sdk_cloudformation::types::{Capability, Parameter, Stack, StackStatus};

use crate::error::{StackError, format_err_chain};
use crate::parameters;

/// Local identity of one remote stack: name, template and parameter file
/// paths, and the request flags CloudFormation expects at creation time.
///
/// The stack name is set at construction and never changes — CloudFormation
/// keys stacks by name within an account/region.
#[derive(Debug, Clone)]
pub struct StackConfig {
    stack_name: String,
    template_path: PathBuf,
    parameter_path: PathBuf,
    capabilities: Vec<String>,
    disable_rollback: bool,
    timeout_minutes: i32,
}

impl StackConfig {
    pub fn new(stack_name: impl Into<String>) -> Self {
        Self {
            stack_name: stack_name.into(),
            template_path: PathBuf::new(),
            parameter_path: PathBuf::new(),
            capabilities: Vec::new(),
            disable_rollback: false,
            timeout_minutes: 60,
        }
    }

    pub fn with_template(mut self, path: impl Into<PathBuf>) -> Self {
        self.template_path = path.into();
        self
    }

    pub fn with_parameters(mut self, path: impl Into<PathBuf>) -> Self {
        self.parameter_path = path.into();
        self
    }

    /// Capability acknowledgment strings (e.g. "CAPABILITY_IAM") forwarded
    /// verbatim to create and update requests.
    pub fn with_capabilities(mut self, capabilities: Vec<String>) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_disable_rollback(mut self, disable_rollback: bool) -> Self {
        self.disable_rollback = disable_rollback;
        self
    }

    pub fn with_timeout_minutes(mut self, timeout_minutes: i32) -> Self {
        self.timeout_minutes = timeout_minutes;
        self
    }

    pub fn stack_name(&self) -> &str {
        &self.stack_name
    }

    pub fn capabilities(&self) -> &[String] {
        &self.capabilities
    }

    pub fn disable_rollback(&self) -> bool {
        self.disable_rollback
    }

    pub fn timeout_minutes(&self) -> i32 {
        self.timeout_minutes
    }

    /// Read the template file fully into memory.
    pub fn template_body(&self) -> Result<String, StackError> {
        std::fs::read_to_string(&self.template_path).map_err(|source| {
            tracing::error!(
                path = %self.template_path.display(),
                error = %source,
                "failed to read template body"
            );
            StackError::Read {
                path: self.template_path.clone(),
                source,
            }
        })
    }

    /// Parse the parameter file into a fresh map.
    pub fn load_parameters(&self) -> Result<BTreeMap<String, String>, StackError> {
        parameters::load(&self.parameter_path)
    }

    /// Load the parameter file and project it into the SDK parameter shape.
    pub fn parameter_list(&self) -> Result<Vec<Parameter>, StackError> {
        Ok(parameters::to_parameter_list(&self.load_parameters()?))
    }

    fn capability_list(&self) -> Option<Vec<Capability>> {
        if self.capabilities.is_empty() {
            return None;
        }
        Some(
            self.capabilities
                .iter()
                .map(|c| Capability::from(c.as_str()))
                .collect(),
        )
    }
}

/// One stack, one client, one remote call per method.
pub struct StackManager {
    client: Client,
    config: StackConfig,
}

impl StackManager {
    pub fn new(client: Client, config: StackConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    /// Submit the template to the remote validator.
    ///
    /// Fails with [`StackError::Read`] when the template file is unreadable
    /// and with [`StackError::Aws`] when the service rejects the template.
    pub async fn validate_template(&self) -> Result<(), StackError> {
        let template_body = self.config.template_body()?;

        self.client
            .validate_template()
            .template_body(template_body)
            .send()
            .await
            .map_err(|e| StackError::Aws(format_err_chain(&e)))?;

        tracing::debug!(stack = %self.config.stack_name, "template accepted by remote validator");
        Ok(())
    }

    /// Submit a create-stack request.
    ///
    /// No local idempotency check: creating a name that already exists is a
    /// remote error. Callers wanting create-if-absent call [`Self::exists`]
    /// first.
    pub async fn create(&self) -> Result<CreateStackOutput, StackError> {
        let parameters = self.config.parameter_list()?;
        let template_body = self.config.template_body()?;

        let out = self
            .client
            .create_stack()
            .stack_name(&self.config.stack_name)
            .template_body(template_body)
            .set_parameters(Some(parameters))
            .set_capabilities(self.config.capability_list())
            .disable_rollback(self.config.disable_rollback)
            .timeout_in_minutes(self.config.timeout_minutes)
            .send()
            .await
            .map_err(|e| StackError::Aws(format_err_chain(&e)))?;

        tracing::info!(
            stack = %self.config.stack_name,
            stack_id = out.stack_id().unwrap_or_default(),
            "stack creation requested"
        );
        Ok(out)
    }

    /// Submit an update-stack request.
    ///
    /// Timeout and disable-rollback are omitted — the update API does not
    /// accept them. An update with no changes is a remote-defined error
    /// ("No updates are to be performed") and passes through as `Aws`.
    pub async fn update(&self) -> Result<UpdateStackOutput, StackError> {
        let parameters = self.config.parameter_list()?;
        let template_body = self.config.template_body()?;

        let out = self
            .client
            .update_stack()
            .stack_name(&self.config.stack_name)
            .template_body(template_body)
            .set_parameters(Some(parameters))
            .set_capabilities(self.config.capability_list())
            .send()
            .await
            .map_err(|e| StackError::Aws(format_err_chain(&e)))?;

        tracing::info!(
            stack = %self.config.stack_name,
            stack_id = out.stack_id().unwrap_or_default(),
            "stack update requested"
        );
        Ok(out)
    }

    /// Submit a delete-stack request. Deleting an absent stack is not an
    /// error at the API level; this is not special-cased locally.
    pub async fn delete(&self) -> Result<DeleteStackOutput, StackError> {
        let out = self
            .client
            .delete_stack()
            .stack_name(&self.config.stack_name)
            .send()
            .await
            .map_err(|e| StackError::Aws(format_err_chain(&e)))?;

        tracing::info!(stack = %self.config.stack_name, "stack deletion requested");
        Ok(out)
    }

    /// Describe the stack by name.
    ///
    /// Returns `Ok(None)` when the service reports the stack does not exist,
    /// `Err` for every other remote failure — absence and transient failure
    /// are distinct outcomes, never conflated.
    pub async fn describe(&self) -> Result<Option<Stack>, StackError> {
        match self
            .client
            .describe_stacks()
            .stack_name(&self.config.stack_name)
            .send()
            .await
        {
            Ok(resp) => Ok(resp.stacks().first().cloned()),
            Err(e) => {
                let err = e.into_service_error();
                if stack_missing(&err) {
                    Ok(None)
                } else {
                    Err(StackError::Aws(format_err_chain(&err)))
                }
            }
        }
    }

    pub async fn exists(&self) -> Result<bool, StackError> {
        Ok(self.describe().await?.is_some())
    }

    /// Current status of the stack.
    ///
    /// An absent stack is [`StackError::StackNotFound`], a checked outcome
    /// rather than an implicit "call exists() first" precondition.
    pub async fn status(&self) -> Result<StackStatus, StackError> {
        let stack = self
            .describe()
            .await?
            .ok_or_else(|| StackError::StackNotFound {
                stack_name: self.config.stack_name.clone(),
            })?;

        stack
            .stack_status()
            .cloned()
            .ok_or_else(|| StackError::Aws("describe response carries no stack status".to_string()))
    }
}

/// CloudFormation reports a missing stack as a ValidationError whose message
/// ends in "does not exist"; there is no typed not-found variant on
/// DescribeStacks.
fn stack_missing(err: &DescribeStacksError) -> bool {
    err.meta()
        .message()
        .is_some_and(|msg| msg.contains("does not exist"))
}
