//! All indexed catalogs behind one lookup surface.
//!
//! Group ids restart at 1 in every catalog, so lookups always take the
//! category alongside the id (or the category-qualified uid); none of them
//! take a bare id.

use std::path::Path;

use regia_core::{fold_text, CatalogConfig};

use crate::error::CatalogError;
use crate::group::ProductGroup;
use crate::index::{index_catalog, IndexReport, IndexedCatalog};

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    catalogs: Vec<IndexedCatalog>,
}

/// Outcome of resolving a storefront path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Route<'a> {
    /// `/product/:category/:id/:slug`
    Product(&'a ProductGroup),
    /// `/productos/:category`
    Listing {
        category: &'a str,
        groups: &'a [ProductGroup],
    },
    NotFound,
}

impl Catalog {
    /// Indexes every configured catalog.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError`] raised while scanning a catalog
    /// directory.
    pub fn build(
        configs: &[CatalogConfig],
        assets_root: &Path,
        base_url: &str,
    ) -> Result<Self, CatalogError> {
        let mut catalogs = Vec::with_capacity(configs.len());
        for config in configs {
            let indexed = index_catalog(config, assets_root, base_url)?;
            tracing::info!(
                category = %indexed.category,
                assets = indexed.report.asset_count,
                groups = indexed.report.group_count,
                warnings = indexed.report.warnings.len(),
                "indexed catalog"
            );
            catalogs.push(indexed);
        }
        Ok(Self::from_indexed(catalogs))
    }

    /// Wraps already-indexed catalogs. A repeated category is ignored after
    /// its first occurrence.
    #[must_use]
    pub fn from_indexed(indexed: Vec<IndexedCatalog>) -> Self {
        let mut catalogs: Vec<IndexedCatalog> = Vec::with_capacity(indexed.len());
        for catalog in indexed {
            if catalogs.iter().any(|c| c.category == catalog.category) {
                tracing::warn!(category = %catalog.category, "duplicate catalog ignored");
                continue;
            }
            catalogs.push(catalog);
        }
        Self { catalogs }
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.catalogs.iter().map(|c| c.category.as_str())
    }

    pub fn reports(&self) -> impl Iterator<Item = &IndexReport> {
        self.catalogs.iter().map(|c| &c.report)
    }

    /// Groups of one category, or `None` for an unknown category. A known
    /// category with no images yields an empty slice.
    #[must_use]
    pub fn groups(&self, category: &str) -> Option<&[ProductGroup]> {
        self.catalogs
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.groups.as_slice())
    }

    #[must_use]
    pub fn find(&self, category: &str, id: u32) -> Option<&ProductGroup> {
        self.groups(category)?.iter().find(|g| g.id == id)
    }

    #[must_use]
    pub fn find_by_uid(&self, uid: &str) -> Option<&ProductGroup> {
        let (category, id) = uid.rsplit_once('-')?;
        self.find(category, id.parse().ok()?)
    }

    #[must_use]
    pub fn find_by_slug(&self, category: &str, slug: &str) -> Option<&ProductGroup> {
        self.groups(category)?.iter().find(|g| g.slug == slug)
    }

    /// Case- and accent-insensitive name search, optionally within one
    /// category. An empty term matches everything.
    #[must_use]
    pub fn search(&self, category: Option<&str>, term: &str) -> Vec<&ProductGroup> {
        let needle = fold_text(term.trim());
        self.catalogs
            .iter()
            .filter(|c| category.map_or(true, |cat| c.category == cat))
            .flat_map(|c| c.groups.iter())
            .filter(|g| needle.is_empty() || fold_text(&g.name).contains(&needle))
            .collect()
    }

    /// Resolves a storefront path.
    ///
    /// Product routes resolve by `(category, id)`; a stale or mistyped slug
    /// still finds the product.
    #[must_use]
    pub fn resolve_route(&self, path: &str) -> Route<'_> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            ["product", category, id] | ["product", category, id, _] => {
                let Ok(id) = id.parse::<u32>() else {
                    return Route::NotFound;
                };
                match self.find(category, id) {
                    Some(group) => {
                        if let Some(slug) = segments.get(3) {
                            if *slug != group.slug {
                                tracing::debug!(
                                    uid = %group.uid,
                                    slug = %slug,
                                    "route slug does not match; resolved by id"
                                );
                            }
                        }
                        Route::Product(group)
                    }
                    None => Route::NotFound,
                }
            }
            ["productos", category] => {
                match self.catalogs.iter().find(|c| c.category == *category) {
                    Some(catalog) => Route::Listing {
                        category: catalog.category.as_str(),
                        groups: catalog.groups.as_slice(),
                    },
                    None => Route::NotFound,
                }
            }
            _ => Route::NotFound,
        }
    }
}
