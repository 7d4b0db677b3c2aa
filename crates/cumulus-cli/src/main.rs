//! `cumulus` — thin CloudFormation stack and EC2 keypair client.
//!
//! One remote operation per invocation; every non-trivial behavior (retry,
//! rollback, consistency) is owned by the service.

mod aws;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use cumulus_keypair::{KeypairConfig, KeypairImporter, describe_lines};
use cumulus_stack::{StackConfig, StackManager, parameters};
use eyre::Result;

#[derive(Parser)]
#[command(name = "cumulus", version, about = "Thin CloudFormation stack and EC2 keypair client")]
struct Cli {
    /// AWS region.
    #[arg(long, global = true, env = "AWS_REGION", default_value = "us-east-1")]
    region: String,

    /// Named AWS profile; default credential chain when omitted.
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Endpoint override for emulators (moto, localstack).
    #[arg(long, global = true, env = "AWS_ENDPOINT_URL")]
    endpoint_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

/// Arguments for template validation: the validator reads nothing else.
#[derive(Args)]
struct ValidateArgs {
    #[arg(long)]
    stack_name: String,

    /// Path to the template document.
    #[arg(long)]
    template: PathBuf,
}

/// Arguments for stack creation.
#[derive(Args)]
struct CreateArgs {
    #[arg(long)]
    stack_name: String,

    /// Path to the template document.
    #[arg(long)]
    template: PathBuf,

    /// Path to the flat YAML parameter file.
    #[arg(long)]
    parameters: PathBuf,

    /// Capability acknowledgments, e.g. CAPABILITY_IAM. Repeatable.
    #[arg(long = "capability")]
    capabilities: Vec<String>,

    /// Disable rollback on creation failure.
    #[arg(long)]
    disable_rollback: bool,

    /// Creation timeout in minutes.
    #[arg(long, default_value_t = 60)]
    timeout_minutes: i32,
}

/// Arguments for stack update: the update API takes no timeout and no
/// rollback flag.
#[derive(Args)]
struct UpdateArgs {
    #[arg(long)]
    stack_name: String,

    /// Path to the template document.
    #[arg(long)]
    template: PathBuf,

    /// Path to the flat YAML parameter file.
    #[arg(long)]
    parameters: PathBuf,

    /// Capability acknowledgments, e.g. CAPABILITY_IAM. Repeatable.
    #[arg(long = "capability")]
    capabilities: Vec<String>,
}

/// Arguments for operations keyed by stack name alone.
#[derive(Args)]
struct NameArgs {
    #[arg(long)]
    stack_name: String,
}

#[derive(Subcommand)]
enum Command {
    /// Submit the template to the remote validator.
    Validate(ValidateArgs),
    /// Create the stack. No create-if-absent check; pair with `exists`.
    Create(CreateArgs),
    /// Update the stack in place.
    Update(UpdateArgs),
    /// Delete the stack by name.
    Delete(NameArgs),
    /// Print the stack's current status.
    Status(NameArgs),
    /// Print whether the stack exists.
    Exists(NameArgs),
    /// Decode a parameter file and print the mapping.
    ShowParams {
        #[arg(long)]
        parameters: PathBuf,
    },
    /// Import the default public key if the account has no keypairs, then
    /// list every keypair's name and fingerprint.
    ImportKeypair {
        #[arg(long, default_value = cumulus_keypair::DEFAULT_KEY_NAME)]
        key_name: String,

        /// Public key file; defaults to the DEFAULT_KEYPAIR location.
        #[arg(long, env = "DEFAULT_KEYPAIR", default_value = "")]
        public_key: PathBuf,
    },
}

impl ValidateArgs {
    fn into_config(self) -> StackConfig {
        StackConfig::new(self.stack_name).with_template(self.template)
    }
}

impl CreateArgs {
    fn into_config(self) -> StackConfig {
        StackConfig::new(self.stack_name)
            .with_template(self.template)
            .with_parameters(self.parameters)
            .with_capabilities(self.capabilities)
            .with_disable_rollback(self.disable_rollback)
            .with_timeout_minutes(self.timeout_minutes)
    }
}

impl UpdateArgs {
    fn into_config(self) -> StackConfig {
        StackConfig::new(self.stack_name)
            .with_template(self.template)
            .with_parameters(self.parameters)
            .with_capabilities(self.capabilities)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let sdk_config = aws::build_sdk_config(
        &cli.region,
        cli.profile.as_deref(),
        cli.endpoint_url.as_deref(),
    )
    .await;
    let cfn = aws_sdk_cloudformation::Client::new(&sdk_config);

    match cli.command {
        Command::Validate(args) => {
            StackManager::new(cfn, args.into_config())
                .validate_template()
                .await?;
            println!("template accepted");
        }
        Command::Create(args) => {
            let out = StackManager::new(cfn, args.into_config()).create().await?;
            println!("creation requested: {}", out.stack_id().unwrap_or_default());
        }
        Command::Update(args) => {
            let out = StackManager::new(cfn, args.into_config()).update().await?;
            println!("update requested: {}", out.stack_id().unwrap_or_default());
        }
        Command::Delete(args) => {
            StackManager::new(cfn, StackConfig::new(args.stack_name))
                .delete()
                .await?;
            println!("deletion requested");
        }
        Command::Status(args) => {
            let status = StackManager::new(cfn, StackConfig::new(args.stack_name))
                .status()
                .await?;
            println!("{}", status.as_str());
        }
        Command::Exists(args) => {
            let exists = StackManager::new(cfn, StackConfig::new(args.stack_name))
                .exists()
                .await?;
            println!("{exists}");
        }
        Command::ShowParams { parameters: path } => {
            for (key, value) in parameters::load(&path)? {
                println!("{key}: {value}");
            }
        }
        Command::ImportKeypair {
            key_name,
            public_key,
        } => {
            let importer = KeypairImporter::new(
                aws_sdk_ec2::Client::new(&sdk_config),
                KeypairConfig::new(key_name, public_key),
            );

            // The keypair path is the one fatal path: fail eagerly on the
            // error stream instead of handing the error back up.
            match importer.ensure_present().await {
                Ok(keypairs) => {
                    println!("Key pairs:");
                    for line in describe_lines(&keypairs) {
                        println!("{line}");
                    }
                }
                Err(err) => {
                    eprintln!("keypair import failed: {err}");
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
