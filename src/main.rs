use clap::Parser;
use std::process;
use todos::cli::{Cli, Commands};
use todos::cli_handlers;
use todos::{Result, StoreConfig, TodoStore};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Logs go to stderr so --json output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = StoreConfig::resolve(cli.db);
    let store = TodoStore::open(&config).await?;
    store.ensure_schema().await?;

    let json = cli.json;
    match cli.command {
        Commands::Init => cli_handlers::handle_init(&config, json),
        Commands::Add { title, desc } => {
            cli_handlers::handle_add(&store, &title, &desc, json).await
        }
        Commands::List => cli_handlers::handle_list(&store, json).await,
        Commands::Show { id } => cli_handlers::handle_show(&store, id, json).await,
        Commands::Edit { id, title, desc } => {
            cli_handlers::handle_edit(&store, id, title.as_deref(), desc.as_deref(), json).await
        }
        Commands::Delete { id, yes } => cli_handlers::handle_delete(&store, id, yes, json).await,
    }
}
