//! # ARRCTL CLI
//!
//! Command-line front end for the AWS Resource Reconciler.
//!
//! ## Usage
//!
//! ```bash
//! # Show the tags on a Secrets Manager secret
//! arrctl tags list arn:aws:secretsmanager:us-east-1:123456789012:secret:db-AbCdEf
//!
//! # Converge a parameter's tags to exactly these (aws: tags are left alone)
//! arrctl tags apply /app/db/url --service ssm --tag env=prod --tag team=core
//!
//! # Read a secret version (payload hidden unless --reveal)
//! arrctl secret get db-password --version-stage AWSPREVIOUS
//! ```

use anyhow::Result;
use aws_resource_reconciler::config::ReconcilerConfig;
use aws_resource_reconciler::observability::{self, metrics};
use clap::{Parser, Subcommand, ValueEnum};

mod secret;
mod tags;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("BUILD_GIT_HASH"),
    ", built ",
    env!("BUILD_DATETIME"),
    ")"
);

/// AWS Resource Reconciler CLI
#[derive(Parser)]
#[command(name = "arrctl", version, long_version = LONG_VERSION)]
#[command(about = "Reconcile AWS resource tags and read versioned secrets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print Prometheus metrics to stderr when the command finishes
    #[arg(long, global = true)]
    print_metrics: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect or converge resource tags
    Tags {
        #[command(subcommand)]
        command: TagsCommand,
    },
    /// Read Secrets Manager secret versions
    Secret {
        #[command(subcommand)]
        command: SecretCommand,
    },
}

#[derive(Subcommand)]
enum TagsCommand {
    /// List the tags on a resource
    List {
        /// Resource identifier (secret ARN/name or parameter name)
        #[arg(value_name = "IDENTIFIER")]
        identifier: String,

        /// Service that owns the resource
        #[arg(long, value_enum, default_value_t = Service::Secretsmanager)]
        service: Service,
    },
    /// Converge a resource's tags to the given set
    Apply {
        /// Resource identifier (secret ARN/name or parameter name)
        #[arg(value_name = "IDENTIFIER")]
        identifier: String,

        /// Desired tag, repeatable. Tags not listed are removed.
        #[arg(long = "tag", value_name = "KEY=VALUE", value_parser = tags::parse_tag)]
        tags: Vec<(String, String)>,

        /// Service that owns the resource
        #[arg(long, value_enum, default_value_t = Service::Secretsmanager)]
        service: Service,

        /// Show the planned changes without calling the tagging API
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Subcommand)]
enum SecretCommand {
    /// Fetch one version of a secret
    Get {
        /// Secret name or ARN
        #[arg(value_name = "SECRET_ID")]
        secret_id: String,

        /// Version identifier (wins over --version-stage)
        #[arg(long)]
        version_id: Option<String>,

        /// Version stage label, e.g. AWSCURRENT
        #[arg(long)]
        version_stage: Option<String>,

        /// Print the secret payload
        #[arg(long)]
        reveal: bool,
    },
}

/// Services with a tagging transport
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Service {
    /// AWS Secrets Manager secret
    Secretsmanager,
    /// AWS Systems Manager Parameter Store parameter
    Ssm,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ReconcilerConfig::from_env();

    observability::init_logging(&config);
    if config.enable_metrics {
        metrics::register_metrics()?;
    }

    let sdk_config = aws_resource_reconciler::provider::aws::load_sdk_config(&config).await;

    let result = match cli.command {
        Commands::Tags { command } => match command {
            TagsCommand::List {
                identifier,
                service,
            } => tags::list_command(&config, &sdk_config, service, &identifier).await,
            TagsCommand::Apply {
                identifier,
                tags,
                service,
                dry_run,
            } => {
                tags::apply_command(&config, &sdk_config, service, &identifier, tags, dry_run)
                    .await
            }
        },
        Commands::Secret { command } => match command {
            SecretCommand::Get {
                secret_id,
                version_id,
                version_stage,
                reveal,
            } => {
                secret::get_command(&config, &sdk_config, secret_id, version_id, version_stage, reveal)
                    .await
            }
        },
    };

    if cli.print_metrics && config.enable_metrics {
        eprintln!("{}", metrics::gather_text()?);
    }

    result
}
