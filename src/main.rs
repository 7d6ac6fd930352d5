use ais::engine::ScriptCatalog;
use ais_core::config::Config;
use ais_core::LookupOptions;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "ais", about = "Address information service")]
struct Cli {
    /// Config file (default: ./ais.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API.
    Serve {
        /// Listen address, overriding [server] bind.
        #[arg(long)]
        bind: Option<String>,
    },
    /// Run one lookup and print the JSON document.
    Lookup {
        kind: LookupKind,
        query: String,
        #[arg(long)]
        page: Option<String>,
        #[arg(long)]
        opa_only: bool,
        #[arg(long)]
        summary: bool,
    },
    /// Engine maintenance scripts.
    Engine {
        #[command(subcommand)]
        command: EngineCommand,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LookupKind {
    Addresses,
    Block,
    Owner,
    Account,
}

#[derive(Subcommand)]
enum EngineCommand {
    /// List the available commands.
    List,
    /// Run a command, passing any further arguments through.
    Run {
        name: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let cfg = Config::load(cli.config.as_deref())?;
    tracing::debug!(?cfg, "configuration loaded");

    match cli.command {
        Command::Serve { bind } => {
            let service = Arc::new(ais::build_service(&cfg)?);
            let bind = bind.unwrap_or_else(|| cfg.server.bind.clone());
            tokio::runtime::Runtime::new()?.block_on(ais_api::serve(service, &bind))
        }
        Command::Lookup {
            kind,
            query,
            page,
            opa_only,
            summary,
        } => {
            let service = ais::build_service(&cfg)?;
            let opts = LookupOptions {
                page,
                opa_only,
                summary,
            };
            let result = match kind {
                LookupKind::Addresses => service.addresses(&query, &opts),
                LookupKind::Block => service.block(&query, &opts),
                LookupKind::Owner => service.owner(&query, &opts),
                LookupKind::Account => service.account(&query, &opts),
            };
            match result {
                Ok(doc) => {
                    println!("{}", serde_json::to_string_pretty(&doc)?);
                    Ok(())
                }
                Err(err) => {
                    println!("{}", serde_json::to_string_pretty(&err.to_document())?);
                    std::process::exit(1);
                }
            }
        }
        Command::Engine { command } => {
            let catalog = ScriptCatalog::from_config(&cfg.engine);
            match command {
                EngineCommand::List => {
                    for name in catalog.list_commands()? {
                        println!("{name}");
                    }
                    Ok(())
                }
                EngineCommand::Run { name, args } => {
                    let status = catalog.run(&name, &args)?;
                    std::process::exit(status.code().unwrap_or(1));
                }
            }
        }
    }
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .init();
}
