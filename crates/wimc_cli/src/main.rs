//! Command-line client for the comic catalogue API.
//!
//! # Responsibility
//! - Verify `wimc_core` linkage and reach a running API from a terminal.
//! - Print entities as pretty JSON for quick local inspection.

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::error::Error;
use std::process::ExitCode;
use std::sync::Arc;
use wimc_core::service::resolver::parse_route_id;
use wimc_core::{
    default_log_level, init_logging, ClientConfig, Entity, EntityId, EntityRepository,
    HttpTransport, ReqwestTransport, RequestOptions, RestEntityRepository,
};
use wimc_core::{Characters, Comic, Series};

const ENV_LOG_DIR: &str = "WIMC_LOG_DIR";

type CliResult = Result<(), Box<dyn Error>>;

#[derive(Debug, Parser)]
#[command(name = "wimc_cli", version, about = "Where is my comic API client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
enum Command {
    /// Checks core linkage without touching the network.
    Ping,
    /// Prints the core crate version.
    Version,
    /// Lists every entity of one type.
    List {
        #[arg(value_enum)]
        entity: EntityKind,
    },
    /// Shows one entity by id.
    Show {
        #[arg(value_enum)]
        entity: EntityKind,
        #[arg(value_parser = parse_id)]
        id: EntityId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EntityKind {
    Series,
    Comics,
    Characters,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_command module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> CliResult {
    let (entity, id) = match command {
        Command::Ping => {
            println!("wimc_core ping={}", wimc_core::ping());
            return Ok(());
        }
        Command::Version => {
            println!("wimc_core version={}", wimc_core::core_version());
            return Ok(());
        }
        Command::List { entity } => (entity, None),
        Command::Show { entity, id } => (entity, Some(id)),
    };

    start_logging()?;
    let transport: Arc<dyn HttpTransport> =
        Arc::new(ReqwestTransport::new(ClientConfig::from_env()?)?);
    match entity {
        EntityKind::Series => dispatch::<Series>(transport, id).await,
        EntityKind::Comics => dispatch::<Comic>(transport, id).await,
        EntityKind::Characters => dispatch::<Characters>(transport, id).await,
    }
}

/// `list` when `id` is absent, `show` otherwise.
async fn dispatch<T: Entity>(
    transport: Arc<dyn HttpTransport>,
    id: Option<EntityId>,
) -> CliResult {
    let repo = RestEntityRepository::<T>::new(transport);
    let Some(id) = id else {
        let page = repo.query_page(&RequestOptions::default()).await?;
        if let Some(total) = page.total_count {
            eprintln!("{} {} of {total}", page.items.len(), T::ENTITY_NAME);
        }
        return print_json(&page.items);
    };

    match repo.find(id).await? {
        Some(entity) => print_json(&entity),
        None => Err(format!("{} {id} not found", T::ENTITY_NAME).into()),
    }
}

/// Reads ids the same way route parameters are read.
fn parse_id(raw: &str) -> Result<EntityId, String> {
    parse_route_id(Some(raw))
        .map_err(|err| err.to_string())?
        .ok_or_else(|| "id cannot be empty".to_string())
}

fn print_json<V: Serialize + ?Sized>(value: &V) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn start_logging() -> CliResult {
    let Ok(log_dir) = std::env::var(ENV_LOG_DIR) else {
        return Ok(());
    };
    init_logging(default_log_level(), &log_dir)?;
    Ok(())
}
