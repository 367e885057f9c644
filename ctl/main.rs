#![forbid(unsafe_code)]

//! `worth-ctl`: command-line client for the Worth backend.
//!
//! Calls backend commands over the IPC bridge through the invocation
//! surface and prints account-type themes.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

use worth_client::bridge::Bridge;
use worth_client::commands::default_manifest;
use worth_client::surface::{CommandTable, InvocationSurface, SurfaceMember};
use worth_client::theme::{account_type_meta, account_type_themes};
use worth_client::{AppError, ClientConfig, IpcBridge, Result};

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "worth-ctl",
    about = "Command-line client for the Worth backend",
    version,
    long_about = None
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// IPC socket name; overrides `ipc_name` from the configuration.
    #[arg(long)]
    ipc_name: Option<String>,

    /// Log output format (text or json).
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Invoke a backend command and print its payload.
    Call {
        /// Command name or dotted path, e.g. `dashboard_get`.
        command: String,
        /// Command arguments as a JSON object.
        #[arg(long, default_value = "{}")]
        args: String,
    },

    /// List the members of the command table.
    Commands,

    /// Print every account-type theme.
    Themes,

    /// Print the theme of one account type.
    Theme {
        /// Account type key, e.g. `credit_card`.
        kind: String,
    },
}

fn main() -> ExitCode {
    let args = Cli::parse();
    if let Err(err) = init_tracing(args.log_format) {
        eprintln!("Error: {err}");
        return ExitCode::FAILURE;
    }

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("Error: failed to build tokio runtime: {err}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(args)) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Cli) -> Result<ExitCode> {
    match args.command {
        Command::Themes => {
            print_json(account_type_themes())?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Theme { ref kind } => match account_type_meta(kind) {
            Some(theme) => {
                print_json(theme)?;
                Ok(ExitCode::SUCCESS)
            }
            None => {
                eprintln!("Error: unknown account type '{kind}'");
                Ok(ExitCode::FAILURE)
            }
        },
        Command::Commands => {
            let surface = build_surface(&args)?;
            print_members(&surface, "");
            Ok(ExitCode::SUCCESS)
        }
        Command::Call {
            ref command,
            args: ref raw_args,
        } => {
            let call_args: serde_json::Value = serde_json::from_str(raw_args)
                .map_err(|err| AppError::Config(format!("--args is not valid JSON: {err}")))?;
            let surface = build_surface(&args)?;

            info!(command = %command, "invoking backend command");
            match surface.call(command, call_args).await {
                Ok(data) => {
                    print_json(&data)?;
                    Ok(ExitCode::SUCCESS)
                }
                Err(err) => {
                    debug!(kind = err.api_error().kind(), "command failed");
                    eprintln!("Error: {err}");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}

/// Load configuration and build the invocation surface over the IPC bridge.
fn build_surface(args: &Cli) -> Result<InvocationSurface> {
    let mut config = match args.config {
        Some(ref path) => ClientConfig::load_from_path(path)?,
        None => ClientConfig::default(),
    };
    config.apply_env_overrides();
    if let Some(ref name) = args.ipc_name {
        config.ipc_name.clone_from(name);
    }

    let manifest = match config.manifest {
        Some(ref path) => {
            let raw = std::fs::read_to_string(path)
                .map_err(|err| AppError::Config(format!("cannot read manifest: {err}")))?;
            serde_json::from_str(&raw)?
        }
        None => default_manifest(),
    };

    let bridge: Arc<dyn Bridge> = Arc::new(IpcBridge::from_config(&config));
    let table = CommandTable::from_manifest(&manifest, &bridge)?;
    debug!(ipc_name = %config.ipc_name, members = table.len(), "command table built");
    Ok(InvocationSurface::wrap(table))
}

fn print_members(surface: &InvocationSurface, prefix: &str) {
    for name in surface.names() {
        let path = if prefix.is_empty() {
            name.to_owned()
        } else {
            format!("{prefix}.{name}")
        };
        match surface.member(name) {
            Some(SurfaceMember::Command(_)) => println!("{path}"),
            Some(SurfaceMember::Constant(value)) => println!("{path} = {value}"),
            Some(SurfaceMember::Namespace(nested)) => print_members(&nested, &path),
            None => {}
        }
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn init_tracing(log_format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    match log_format {
        LogFormat::Text => subscriber
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
        LogFormat::Json => subscriber
            .json()
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
    }

    Ok(())
}
