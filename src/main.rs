//! CLI entry point for graph-dm, a Microsoft Graph device-management client.
//!
//! Resolves configuration (TOML file, then flags, then environment),
//! authenticates via OAuth2 client credentials and dispatches one
//! subcommand. Results go to stdout as pretty JSON; logs go to stderr.
//!
//! Exit codes:
//! - 0: success
//! - 1: runtime error (auth failure, API error, bad config, etc.)
//! - 2: argument validation error (clap handles this automatically)

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use graph_dm::builder::CollectionRequestBuilder;
use graph_dm::client::GraphClient;
use graph_dm::config::{CLIENT_SECRET_ENV, GraphConfig};
use graph_dm::error::{GraphError, Result};
use graph_dm::managed_devices::WipeRequest;
use graph_dm::request::{QueryParameters, RequestConfiguration};

#[derive(Parser)]
#[command(name = "graph-dm", version, about, long_about = None)]
struct Cli {
    /// TOML configuration file. Flags override values from the file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Entra ID tenant ID.
    #[arg(long, global = true)]
    tenant_id: Option<String>,

    /// Entra ID application (client) ID.
    #[arg(long, global = true)]
    client_id: Option<String>,

    /// Client secret. Prefer the GRAPH_CLIENT_SECRET environment variable
    /// so the secret stays out of process listings and shell history.
    #[arg(long, env = CLIENT_SECRET_ENV, hide_env_values = true, global = true)]
    secret: Option<String>,

    /// Graph root, e.g. https://graph.microsoft.com/beta.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Increase verbosity (-v, -vv)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Managed devices and remote actions.
    Devices {
        #[command(subcommand)]
        action: DeviceCommand,
    },
    /// Device configuration profiles.
    Configs {
        #[command(subcommand)]
        action: ConfigCommand,
    },
    /// Device compliance policies.
    Compliance {
        #[command(subcommand)]
        action: ComplianceCommand,
    },
    /// Notification message templates.
    Templates {
        #[command(subcommand)]
        action: TemplateCommand,
    },
    /// Tenant-wide device management settings.
    Org {
        #[command(subcommand)]
        action: OrgCommand,
    },
}

/// Query options shared by every `list` subcommand.
#[derive(Args, Debug, Default)]
struct ListArgs {
    /// OData `$filter` expression.
    #[arg(long)]
    filter: Option<String>,

    /// Comma-separated properties for `$select`.
    #[arg(long, value_delimiter = ',')]
    select: Vec<String>,

    /// Page size (`$top`).
    #[arg(long)]
    top: Option<u32>,

    /// Follow `@odata.nextLink` and print every item.
    #[arg(long)]
    all: bool,
}

impl ListArgs {
    fn request_configuration(&self) -> RequestConfiguration {
        RequestConfiguration::with_query(QueryParameters {
            filter: self.filter.clone(),
            select: self.select.clone(),
            top: self.top,
            ..QueryParameters::default()
        })
    }
}

#[derive(Subcommand)]
enum DeviceCommand {
    List(ListArgs),
    Get {
        id: String,
    },
    /// Count devices, optionally filtered.
    Count {
        #[arg(long)]
        filter: Option<String>,
    },
    Sync {
        id: String,
    },
    Retire {
        id: String,
    },
    Wipe {
        id: String,
        #[arg(long)]
        keep_enrollment_data: bool,
        #[arg(long)]
        keep_user_data: bool,
    },
    Reboot {
        id: String,
    },
    Lock {
        id: String,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    List(ListArgs),
    Get { id: String },
    Delete { id: String },
}

#[derive(Subcommand)]
enum ComplianceCommand {
    List(ListArgs),
    Get {
        id: String,
    },
    /// Per-device status for one policy.
    Statuses {
        id: String,
        #[command(flatten)]
        list: ListArgs,
    },
}

#[derive(Subcommand)]
enum TemplateCommand {
    List(ListArgs),
    Get { id: String },
    SendTest { id: String },
}

#[derive(Subcommand)]
enum OrgCommand {
    Get,
}

/// Filter used when `RUST_LOG` is unset.
fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "warn,graph_dm=debug",
        _ => "info,graph_dm=trace",
    }
}

fn init_tracing(verbose: u8) {
    let base_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter(verbose).to_string());
    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr).compact())
        .init();
}

/// File first, then flags on top.
fn resolve_config(cli: &Cli) -> Result<GraphConfig> {
    let mut config = match (&cli.config, &cli.tenant_id, &cli.client_id) {
        (Some(path), _, _) => GraphConfig::load(path)?,
        (None, Some(tenant), Some(client)) => GraphConfig::new(tenant, client),
        _ => {
            return Err(GraphError::Config {
                message: "either --config or both --tenant-id and --client-id are required"
                    .to_string(),
                source: None,
            });
        }
    };

    if let Some(tenant) = &cli.tenant_id {
        config.tenant_id = tenant.clone();
    }
    if let Some(client) = &cli.client_id {
        config.client_id = client.clone();
    }
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(secret) = &cli.secret {
        config = config.with_client_secret(secret);
    }
    Ok(config)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn print_list<T>(collection: CollectionRequestBuilder<'_, T>, args: &ListArgs) -> Result<()>
where
    T: Serialize + serde::de::DeserializeOwned,
{
    let config = args.request_configuration();
    if args.all {
        print_json(&collection.list_all(Some(&config)).await?)
    } else {
        print_json(&collection.list(Some(&config)).await?)
    }
}

fn accepted(action: &str, id: &str) -> Result<()> {
    print_json(&json!({ "action": action, "id": id, "status": "accepted" }))
}

async fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    let client = GraphClient::from_config(&config)?;
    let dm = client.device_management();

    match cli.command {
        Command::Devices { action } => {
            let devices = dm.managed_devices();
            match action {
                DeviceCommand::List(args) => print_list(devices, &args).await,
                DeviceCommand::Get { id } => print_json(&devices.by_id(&id).get(None).await?),
                DeviceCommand::Count { filter } => {
                    let config = RequestConfiguration::with_query(QueryParameters {
                        filter,
                        ..QueryParameters::default()
                    });
                    print_json(&json!({ "count": devices.count(Some(&config)).await? }))
                }
                DeviceCommand::Sync { id } => {
                    devices.by_id(&id).sync_device(None).await?;
                    accepted("syncDevice", &id)
                }
                DeviceCommand::Retire { id } => {
                    devices.by_id(&id).retire(None).await?;
                    accepted("retire", &id)
                }
                DeviceCommand::Wipe {
                    id,
                    keep_enrollment_data,
                    keep_user_data,
                } => {
                    let request = WipeRequest {
                        keep_enrollment_data: keep_enrollment_data.then_some(true),
                        keep_user_data: keep_user_data.then_some(true),
                        ..WipeRequest::default()
                    };
                    devices.by_id(&id).wipe(&request, None).await?;
                    accepted("wipe", &id)
                }
                DeviceCommand::Reboot { id } => {
                    devices.by_id(&id).reboot_now(None).await?;
                    accepted("rebootNow", &id)
                }
                DeviceCommand::Lock { id } => {
                    devices.by_id(&id).remote_lock(None).await?;
                    accepted("remoteLock", &id)
                }
            }
        }
        Command::Configs { action } => {
            let configs = dm.device_configurations();
            match action {
                ConfigCommand::List(args) => print_list(configs, &args).await,
                ConfigCommand::Get { id } => print_json(&configs.by_id(&id).get(None).await?),
                ConfigCommand::Delete { id } => {
                    configs.by_id(&id).delete(None).await?;
                    accepted("delete", &id)
                }
            }
        }
        Command::Compliance { action } => {
            let policies = dm.device_compliance_policies();
            match action {
                ComplianceCommand::List(args) => print_list(policies, &args).await,
                ComplianceCommand::Get { id } => print_json(&policies.by_id(&id).get(None).await?),
                ComplianceCommand::Statuses { id, list } => {
                    print_list(policies.by_id(&id).device_statuses(), &list).await
                }
            }
        }
        Command::Templates { action } => {
            let templates = dm.notification_message_templates();
            match action {
                TemplateCommand::List(args) => print_list(templates, &args).await,
                TemplateCommand::Get { id } => print_json(&templates.by_id(&id).get(None).await?),
                TemplateCommand::SendTest { id } => {
                    templates.by_id(&id).send_test_message(None).await?;
                    accepted("sendTestMessage", &id)
                }
            }
        }
        Command::Org { action } => match action {
            OrgCommand::Get => print_json(&dm.get(None).await?),
        },
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
