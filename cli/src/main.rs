//! Command-line access to the CacheFly API.
//!
//! Reads `CACHEFLY_API_TOKEN` (and optionally `CACHEFLY_BASE_URL`,
//! `CACHEFLY_TIMEOUT_SECS`) from the environment or a `.env` file and prints
//! every result as pretty JSON.

use std::io;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use cachefly_core::{ApiError, Cachefly, ClientConfig, OptionValue, ServiceOptions};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::warn;

#[derive(Parser)]
#[command(name = "cachefly", version, about = "CacheFly API client")]
struct Cli {
    /// API root, overrides CACHEFLY_BASE_URL.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds, overrides CACHEFLY_TIMEOUT_SECS.
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the account owning the token, or another account by id.
    Account {
        #[arg(long)]
        id: Option<String>,
    },
    /// Read or change service options.
    #[command(subcommand)]
    Options(OptionsCommand),
    /// Manage a service's legacy API key.
    #[command(subcommand)]
    Apikey(ApikeyCommand),
}

#[derive(Subcommand)]
enum OptionsCommand {
    /// Current option values.
    Get { service_id: String },
    /// Options the service supports.
    Metadata { service_id: String },
    /// Validate and apply option values.
    Update {
        service_id: String,
        /// `name=value`; values parse as bool, then number, else string.
        /// Each name may be given once.
        #[arg(long = "set", value_name = "NAME=VALUE", required = true, value_parser = parse_assignment)]
        set: Vec<(String, OptionValue)>,
    },
}

#[derive(Subcommand)]
enum ApikeyCommand {
    Get { service_id: String },
    Regenerate { service_id: String },
    Delete { service_id: String },
}

fn parse_assignment(raw: &str) -> std::result::Result<(String, OptionValue), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    if name.is_empty() {
        return Err(format!("empty option name in '{raw}'"));
    }
    Ok((name.to_string(), parse_value(value)))
}

fn parse_value(raw: &str) -> OptionValue {
    if let Ok(b) = raw.parse::<bool>() {
        return OptionValue::Bool(b);
    }
    if let Ok(i) = raw.parse::<i64>() {
        return OptionValue::from(i);
    }
    if let Ok(f) = raw.parse::<f64>() {
        if let Ok(value) = OptionValue::try_from(f) {
            return value;
        }
    }
    OptionValue::String(raw.to_string())
}

fn collect_assignments(set: Vec<(String, OptionValue)>) -> Result<ServiceOptions> {
    let mut options = ServiceOptions::new();
    for (name, value) in set {
        if options.contains_key(&name) {
            bail!("option '{name}' given more than once");
        }
        options.insert(name, value);
    }
    Ok(options)
}

fn print_json<T: Serialize>(label: &str, value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("formatting output")?;
    println!("{label}");
    println!("{out}");
    Ok(())
}

fn config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.clone());
    }
    if let Some(secs) = cli.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<()> {
    let api = Cachefly::from_config(&config(&cli)?);

    match cli.command {
        Command::Account { id } => {
            let account = match id {
                Some(id) => api.accounts().get(&id)?,
                None => api.accounts().get_current()?,
            };
            print_json("Account:", &account)
        }
        Command::Options(cmd) => {
            let svc = api.service_options();
            match cmd {
                OptionsCommand::Get { service_id } => {
                    print_json("Service options:", &svc.get_options(&service_id)?)
                }
                OptionsCommand::Metadata { service_id } => {
                    print_json("Options metadata:", &svc.get_options_metadata(&service_id)?)
                }
                OptionsCommand::Update { service_id, set } => {
                    let options = collect_assignments(set)?;
                    match svc.update_options(&service_id, &options) {
                        Ok(updated) => print_json("Updated service options:", &updated),
                        Err(ApiError::Validation(err)) => {
                            for entry in &err.errors {
                                eprintln!("  {}: {} ({})", entry.field, entry.message, entry.code);
                            }
                            Err(anyhow!("{} option(s) rejected, nothing was sent", err.errors.len()))
                        }
                        Err(err) => Err(err.into()),
                    }
                }
            }
        }
        Command::Apikey(cmd) => {
            let svc = api.service_options();
            match cmd {
                ApikeyCommand::Get { service_id } => {
                    print_json("Legacy API key:", &svc.get_legacy_api_key(&service_id)?)
                }
                ApikeyCommand::Regenerate { service_id } => {
                    print_json("New legacy API key:", &svc.regenerate_legacy_api_key(&service_id)?)
                }
                ApikeyCommand::Delete { service_id } => {
                    svc.delete_legacy_api_key(&service_id)?;
                    println!("Legacy API key deleted for {service_id}");
                    Ok(())
                }
            }
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = dotenvy::dotenv() {
        warn!("unable to load .env file: {e}");
    }

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
