use regia_core::{price_label, Money, Swatch};
use serde::Serialize;

use crate::loader::ImageLoader;

/// One purchasable catalog entry: a run of numbered photos of the same
/// garment plus its curated details.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductGroup {
    /// Representative image number (the lowest number in the group). Only
    /// unique within its category.
    pub id: u32,
    /// `"<category>-<id>"`; unique across catalogs.
    pub uid: String,
    pub category: String,
    pub name: String,
    pub slug: String,
    /// Detail page path, `/product/<category>/<id>/<slug>`.
    pub route: String,
    pub price: Option<Money>,
    pub colors: Option<Vec<Swatch>>,
    pub sizes: Option<Vec<String>>,
    /// Image numbers folded into this group, ascending.
    pub image_numbers: Vec<u32>,
    /// Gallery loaders in display order. The first one is the thumbnail.
    pub loaders: Vec<ImageLoader>,
}

impl ProductGroup {
    #[must_use]
    pub fn primary_loader(&self) -> Option<&ImageLoader> {
        self.loaders.first()
    }

    /// Display price, or "Consultar" when unpriced.
    #[must_use]
    pub fn price_label(&self) -> String {
        price_label(self.price.as_ref())
    }

    /// Finds the color option matching `name`, ignoring case and accents.
    #[must_use]
    pub fn color_option(&self, name: &str) -> Option<&Swatch> {
        let key = regia_core::normalize_color_key(name);
        self.colors
            .as_deref()?
            .iter()
            .find(|s| regia_core::normalize_color_key(&s.name) == key)
    }

    /// Finds the size option matching `name`, ignoring case and surrounding
    /// whitespace.
    #[must_use]
    pub fn size_option(&self, name: &str) -> Option<&str> {
        let wanted = name.trim();
        self.sizes
            .as_deref()?
            .iter()
            .map(String::as_str)
            .find(|s| s.trim().eq_ignore_ascii_case(wanted))
    }

    /// Listing-card projection of the group.
    #[must_use]
    pub fn summary(&self) -> ProductSummary {
        ProductSummary {
            uid: self.uid.clone(),
            category: self.category.clone(),
            id: self.id,
            title: self.name.clone(),
            route: self.route.clone(),
            price: self.price_label(),
            price_raw: self.price,
            thumbnail: self.primary_loader().map(|l| l.url().to_string()),
            image_count: self.loaders.len(),
            colors: self.colors.clone(),
            sizes: self.sizes.clone(),
        }
    }
}

/// What a product grid needs to render one card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSummary {
    pub uid: String,
    pub category: String,
    pub id: u32,
    pub title: String,
    pub route: String,
    pub price: String,
    pub price_raw: Option<Money>,
    pub thumbnail: Option<String>,
    pub image_count: usize,
    pub colors: Option<Vec<Swatch>>,
    pub sizes: Option<Vec<String>>,
}
