mod catalog;

use clap::{Parser, Subcommand};
use storefront_cms::{Catalog, CmsClient};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "storefront-cli")]
#[command(about = "Storefront catalog command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print one listing page as JSON
    List {
        /// 1-based page number; anything unparseable means page 1
        #[arg(long)]
        page: Option<String>,
        /// Category to filter by; `all` lists every category
        #[arg(long)]
        category: Option<String>,
    },
    /// Print one product as JSON
    Show {
        /// Content entry id
        id: String,
    },
    /// Print every product id, one per line
    Ids,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = storefront_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let catalog = Catalog::new(CmsClient::from_config(&config)?);

    let output = match cli.command {
        Commands::List { page, category } => {
            catalog::run_list(&catalog, page.as_deref(), category.as_deref()).await?
        }
        Commands::Show { id } => catalog::run_show(&catalog, &id).await?,
        Commands::Ids => catalog::run_ids(&catalog).await,
    };
    println!("{output}");

    Ok(())
}
