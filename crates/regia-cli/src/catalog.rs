//! Catalog command handlers.
//!
//! Every handler works on a [`Catalog`] indexed at startup from the
//! configured catalogs file and assets root. Lookups that miss print the
//! not-found view instead of failing.

use clap::Subcommand;
use regia_cart::{inquiry_link, whatsapp_link};
use regia_catalog::{load_gallery, Catalog, LoadedImage, ProductGroup, Route};
use regia_core::AppConfig;

const NOT_FOUND_MESSAGE: &str = "Hola Regia, no encuentro un producto. ¿Me ayudás a conseguirlo?";

/// Sub-commands available under `catalog`.
#[derive(Debug, Subcommand)]
pub enum CatalogCommands {
    /// List product groups
    List {
        /// Restrict to one category (e.g. vestidos)
        #[arg(long)]
        category: Option<String>,
        /// Case- and accent-insensitive name filter
        #[arg(long)]
        search: Option<String>,
        /// Print listing cards as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one product group
    Show {
        /// Catalog category (e.g. sastrero)
        category: String,
        /// Group id within the category
        id: u32,
    },
    /// Resolve a storefront path such as /product/boho/1/1-boho-01
    Route { path: String },
    /// Index every catalog and print range warnings
    Check,
    /// Load a product's gallery and report each image
    Images {
        /// Catalog category (e.g. boho)
        category: String,
        /// Group id within the category
        id: u32,
    },
}

/// Load the catalogs file and index every catalog it lists.
///
/// # Errors
///
/// Returns an error if the catalogs file is missing or invalid, or if a
/// catalog directory cannot be read.
pub(crate) fn build_catalog(config: &AppConfig) -> anyhow::Result<Catalog> {
    let file = regia_core::load_catalogs(&config.catalogs_path)?;
    let catalog = Catalog::build(&file.catalogs, &config.assets_root, &config.assets_base_url)?;
    Ok(catalog)
}

/// Print listing cards, optionally filtered by category and name.
///
/// # Errors
///
/// Returns an error for an unknown category or if JSON rendering fails.
pub(crate) fn run_catalog_list(
    catalog: &Catalog,
    category: Option<&str>,
    search: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    if let Some(category) = category {
        if catalog.groups(category).is_none() {
            let known: Vec<&str> = catalog.categories().collect();
            anyhow::bail!(
                "unknown category '{category}'; known categories: {}",
                known.join(", ")
            );
        }
    }

    let groups = catalog.search(category, search.unwrap_or_default());

    if json {
        let cards: Vec<_> = groups.iter().map(|g| g.summary()).collect();
        println!("{}", serde_json::to_string_pretty(&cards)?);
        return Ok(());
    }

    if groups.is_empty() {
        println!("no products found");
        return Ok(());
    }

    println!("{:<14}{:<32}{:<16}{:>7}", "UID", "NAME", "PRICE", "IMAGES");
    for group in groups {
        println!(
            "{:<14}{:<32}{:<16}{:>7}",
            group.uid,
            group.name,
            group.price_label(),
            group.loaders.len()
        );
    }
    Ok(())
}

pub(crate) fn run_catalog_show(config: &AppConfig, catalog: &Catalog, category: &str, id: u32) {
    match catalog.find(category, id) {
        Some(group) => print_group(group),
        None => print_not_found(config),
    }
}

pub(crate) fn run_catalog_route(config: &AppConfig, catalog: &Catalog, path: &str) {
    match catalog.resolve_route(path) {
        Route::Product(group) => print_group(group),
        Route::Listing { category, groups } => {
            println!("Listing: {category} ({} products)", groups.len());
            for group in groups {
                println!("  {:<28}{:<16}{}", group.name, group.price_label(), group.route);
            }
        }
        Route::NotFound => print_not_found(config),
    }
}

pub(crate) fn run_catalog_check(catalog: &Catalog) {
    for report in catalog.reports() {
        let status = if report.is_clean() { "ok" } else { "warnings" };
        println!(
            "{:<12}{:>4} images {:>4} groups  {status}",
            report.category, report.asset_count, report.group_count
        );
        for warning in &report.warnings {
            println!("  - {warning}");
        }
    }
}

/// Load every gallery image of a group with bounded concurrency and print
/// what each one resolved to.
pub(crate) async fn run_catalog_images(
    config: &AppConfig,
    catalog: &Catalog,
    category: &str,
    id: u32,
) {
    let Some(group) = catalog.find(category, id) else {
        print_not_found(config);
        return;
    };

    let images = load_gallery(group, config.image_load_concurrency).await;
    let mut placeholders = 0usize;
    for (loader, image) in group.loaders.iter().zip(&images) {
        match image {
            LoadedImage::Loaded { bytes, .. } => {
                println!("loaded       {} ({} bytes)", loader.url(), bytes.len());
            }
            LoadedImage::Placeholder => {
                placeholders += 1;
                println!("placeholder  {}", loader.url());
            }
        }
    }
    println!(
        "images: {} loaded, {placeholders} placeholder",
        images.len() - placeholders
    );
}

pub(crate) fn run_inquire(config: &AppConfig, catalog: &Catalog, category: &str, id: u32) {
    match catalog.find(category, id) {
        Some(group) => println!(
            "{}",
            inquiry_link(&config.whatsapp_number, &group.name, group.price.as_ref())
        ),
        None => print_not_found(config),
    }
}

fn print_group(group: &ProductGroup) {
    println!("{} ({})", group.name, group.uid);
    println!("Price: {}", group.price_label());
    println!("Route: {}", group.route);
    if let Some(colors) = &group.colors {
        let names: Vec<String> = colors
            .iter()
            .map(|c| format!("{} {}", c.name, c.hex))
            .collect();
        println!("Colors: {}", names.join(", "));
    }
    if let Some(sizes) = &group.sizes {
        println!("Sizes: {}", sizes.join(", "));
    }
    println!("Images:");
    for loader in &group.loaders {
        println!("  {}", loader.url());
    }
}

fn print_not_found(config: &AppConfig) {
    println!("Producto no encontrado");
    println!(
        "Pedinos ayuda por WhatsApp: {}",
        whatsapp_link(&config.whatsapp_number, NOT_FOUND_MESSAGE)
    );
}
