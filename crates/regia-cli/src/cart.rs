//! Cart command handlers.
//!
//! The cart lives in a JSON file under `REGIA_CART_DIR`, keyed by
//! `REGIA_CART_STORAGE_KEY`. Each invocation hydrates the store, applies
//! one action, and lets the store persist the result.

use clap::{Args, Subcommand};
use regia_cart::{
    checkout_link, CartLineItem, CartStore, ColorChoice, FileStorage, SizeChoice, VariantKey,
};
use regia_catalog::{Catalog, ProductGroup};
use regia_core::{price_label, AppConfig};

/// Sub-commands available under `cart`.
#[derive(Debug, Subcommand)]
pub enum CartCommands {
    /// Show cart contents and totals
    Show,
    /// Add a product to the cart
    Add(AddArgs),
    /// Remove one row (product plus variant) from the cart
    Remove {
        /// Product uid (e.g. sastrero-4)
        uid: String,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        size: Option<String>,
    },
    /// Set the quantity of one row
    Update {
        /// Product uid (e.g. sastrero-4)
        uid: String,
        quantity: u32,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        size: Option<String>,
    },
    /// Empty the cart
    Clear,
    /// Print the WhatsApp checkout link
    Checkout {
        /// Empty the cart after printing the link
        #[arg(long)]
        clear: bool,
    },
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Catalog category (e.g. vestidos)
    pub category: String,
    /// Group id within the category
    pub id: u32,
    /// Units to add, clamped to 1..=REGIA_MAX_LINE_QUANTITY
    #[arg(long, default_value = "1")]
    pub quantity: u32,
    /// Color name; required when the product offers colors
    #[arg(long)]
    pub color: Option<String>,
    /// Size name; required when the product offers sizes
    #[arg(long)]
    pub size: Option<String>,
}

pub(crate) fn open_store(config: &AppConfig) -> CartStore<FileStorage> {
    CartStore::hydrate(
        FileStorage::new(&config.cart_dir),
        config.cart_storage_key.as_str(),
    )
}

/// Build the line item for a catalog group, validating the chosen variant
/// against the group's options.
///
/// # Errors
///
/// Returns an error when the group offers colors or sizes and none (or an
/// unknown one) was chosen, or when a variant is given for a product that
/// has no such options.
pub(crate) fn line_item_for(
    group: &ProductGroup,
    quantity: u32,
    color: Option<&str>,
    size: Option<&str>,
    max_quantity: u32,
) -> anyhow::Result<CartLineItem> {
    let mut item = CartLineItem::new(
        group.uid.as_str(),
        group.name.as_str(),
        quantity.clamp(1, max_quantity.max(1)),
    )
    .with_price(group.price);

    if let Some(loader) = group.primary_loader() {
        item = item.with_image(loader.url());
    }

    match (group.colors.as_deref(), color) {
        (Some(options), Some(wanted)) if !options.is_empty() => {
            let swatch = group.color_option(wanted).ok_or_else(|| {
                let names: Vec<&str> = options.iter().map(|s| s.name.as_str()).collect();
                anyhow::anyhow!(
                    "color '{wanted}' is not offered for {}; choose one of: {}",
                    group.uid,
                    names.join(", ")
                )
            })?;
            item = item.with_color(ColorChoice {
                name: swatch.name.clone(),
                hex: Some(swatch.hex.clone()),
            });
        }
        (Some(options), None) if !options.is_empty() => {
            anyhow::bail!("{} requires --color", group.uid);
        }
        (_, Some(wanted)) => {
            anyhow::bail!("{} has no color options (got '{wanted}')", group.uid);
        }
        _ => {}
    }

    match (group.sizes.as_deref(), size) {
        (Some(options), Some(wanted)) if !options.is_empty() => {
            let size = group.size_option(wanted).ok_or_else(|| {
                anyhow::anyhow!(
                    "size '{wanted}' is not offered for {}; choose one of: {}",
                    group.uid,
                    options.join(", ")
                )
            })?;
            item = item.with_size(SizeChoice::named(size));
        }
        (Some(options), None) if !options.is_empty() => {
            anyhow::bail!("{} requires --size", group.uid);
        }
        (_, Some(wanted)) => {
            anyhow::bail!("{} has no size options (got '{wanted}')", group.uid);
        }
        _ => {}
    }

    Ok(item)
}

fn variant_label(item: &CartLineItem) -> String {
    let mut parts = Vec::new();
    if let Some(color) = &item.selected_color {
        parts.push(format!("color {}", color.name));
    }
    if let Some(size) = &item.selected_size {
        parts.push(format!("talle {}", size.name));
    }
    parts.join(", ")
}

pub(crate) fn run_cart_show(store: &CartStore<FileStorage>) {
    let items = store.items();
    if items.is_empty() {
        println!("cart is empty");
        return;
    }

    println!("{:<14}{:<30}{:<22}{:>5}  {}", "UID", "TITLE", "VARIANT", "QTY", "TOTAL");
    for item in items {
        println!(
            "{:<14}{:<30}{:<22}{:>5}  {}",
            item.id,
            item.title,
            variant_label(item),
            item.quantity,
            price_label(item.line_total().as_ref())
        );
    }

    let summary = store.summary();
    println!();
    println!(
        "{} items in {} lines, subtotal {}",
        summary.item_count, summary.line_count, summary.subtotal
    );
    if summary.unpriced_lines > 0 {
        println!("{} lines priced on request (Consultar)", summary.unpriced_lines);
    }
}

/// # Errors
///
/// Returns an error when the product is unknown, the variant is invalid,
/// or the cart cannot be persisted.
pub(crate) fn run_cart_add(
    config: &AppConfig,
    catalog: &Catalog,
    store: &mut CartStore<FileStorage>,
    args: &AddArgs,
) -> anyhow::Result<()> {
    let group = catalog
        .find(&args.category, args.id)
        .ok_or_else(|| anyhow::anyhow!("product {}/{} not found", args.category, args.id))?;

    let item = line_item_for(
        group,
        args.quantity,
        args.color.as_deref(),
        args.size.as_deref(),
        config.max_line_quantity,
    )?;
    let quantity = item.quantity;
    store.add_to_cart(item)?;

    tracing::info!(uid = %group.uid, quantity, "added to cart");
    println!("added {quantity} x {} to cart", group.name);
    Ok(())
}

/// # Errors
///
/// Returns an error if the cart cannot be persisted.
pub(crate) fn run_cart_remove(
    store: &mut CartStore<FileStorage>,
    uid: &str,
    color: Option<&str>,
    size: Option<&str>,
) -> anyhow::Result<()> {
    let before = store.items().len();
    store.remove_from_cart(VariantKey::new(uid, color, size))?;
    if store.items().len() == before {
        println!("no matching cart row for {uid}");
    } else {
        println!("removed {uid} from cart");
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the cart cannot be persisted.
pub(crate) fn run_cart_update(
    config: &AppConfig,
    store: &mut CartStore<FileStorage>,
    uid: &str,
    quantity: u32,
    color: Option<&str>,
    size: Option<&str>,
) -> anyhow::Result<()> {
    let key = VariantKey::new(uid, color, size);
    if !store.items().iter().any(|item| item.matches(&key)) {
        println!("no matching cart row for {uid}");
        return Ok(());
    }

    let quantity = quantity.clamp(1, config.max_line_quantity.max(1));
    store.update_quantity(key, quantity)?;
    println!("{uid} quantity set to {quantity}");
    Ok(())
}

/// # Errors
///
/// Returns an error if the cart cannot be persisted.
pub(crate) fn run_cart_clear(store: &mut CartStore<FileStorage>) -> anyhow::Result<()> {
    store.clear()?;
    println!("cart cleared");
    Ok(())
}

/// Print the checkout link. An empty cart is refused.
///
/// # Errors
///
/// Returns an error for an empty cart, or if clearing afterwards fails to
/// persist.
pub(crate) fn run_cart_checkout(
    config: &AppConfig,
    store: &mut CartStore<FileStorage>,
    clear: bool,
) -> anyhow::Result<()> {
    let link = checkout_link(&config.whatsapp_number, store.items())
        .ok_or_else(|| anyhow::anyhow!("cart is empty; add a product before checking out"))?;

    let summary = store.summary();
    tracing::info!(
        lines = summary.line_count,
        items = summary.item_count,
        "checkout link built"
    );
    println!("{link}");

    if clear {
        store.clear()?;
    }
    Ok(())
}
