mod cart;
mod catalog;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cart::CartCommands;
use catalog::CatalogCommands;

#[derive(Debug, Parser)]
#[command(name = "regia")]
#[command(about = "Regia storefront catalog and cart")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse the indexed product catalogs
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },
    /// Manage the locally persisted cart
    Cart {
        #[command(subcommand)]
        command: CartCommands,
    },
    /// Print a WhatsApp inquiry link for one product
    Inquire {
        /// Catalog category (e.g. sastrero)
        category: String,
        /// Group id within the category
        id: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("regia: run `regia --help` for available commands");
        return Ok(());
    };

    let config = regia_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, "configuration loaded");

    match command {
        Commands::Catalog { command } => {
            let catalog = catalog::build_catalog(&config)?;
            match command {
                CatalogCommands::List {
                    category,
                    search,
                    json,
                } => catalog::run_catalog_list(
                    &catalog,
                    category.as_deref(),
                    search.as_deref(),
                    json,
                )?,
                CatalogCommands::Show { category, id } => {
                    catalog::run_catalog_show(&config, &catalog, &category, id);
                }
                CatalogCommands::Route { path } => {
                    catalog::run_catalog_route(&config, &catalog, &path);
                }
                CatalogCommands::Check => catalog::run_catalog_check(&catalog),
                CatalogCommands::Images { category, id } => {
                    catalog::run_catalog_images(&config, &catalog, &category, id).await;
                }
            }
        }
        Commands::Cart { command } => {
            let mut store = cart::open_store(&config);
            match command {
                CartCommands::Show => cart::run_cart_show(&store),
                CartCommands::Add(args) => {
                    let catalog = catalog::build_catalog(&config)?;
                    cart::run_cart_add(&config, &catalog, &mut store, &args)?;
                }
                CartCommands::Remove { uid, color, size } => {
                    cart::run_cart_remove(&mut store, &uid, color.as_deref(), size.as_deref())?;
                }
                CartCommands::Update {
                    uid,
                    quantity,
                    color,
                    size,
                } => cart::run_cart_update(
                    &config,
                    &mut store,
                    &uid,
                    quantity,
                    color.as_deref(),
                    size.as_deref(),
                )?,
                CartCommands::Clear => cart::run_cart_clear(&mut store)?,
                CartCommands::Checkout { clear } => {
                    cart::run_cart_checkout(&config, &mut store, clear)?;
                }
            }
        }
        Commands::Inquire { category, id } => {
            let catalog = catalog::build_catalog(&config)?;
            catalog::run_inquire(&config, &catalog, &category, id);
        }
    }

    Ok(())
}
