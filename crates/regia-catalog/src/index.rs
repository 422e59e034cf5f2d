//! Collapses numbered photos into product groups.
//!
//! Collapse rules are curated by hand per catalog and can disagree with the
//! files actually on disk. Indexing never fails on that: a rule with gaps
//! still emits one group from whatever photos exist, and a rule matching
//! nothing emits nothing. Both cases are reported as [`IndexWarning`]s and
//! logged so data-entry mistakes surface instead of silently shrinking the
//! catalog.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use regia_core::{slugify, swatch_from_name, CatalogConfig, CollapseRule, GroupOverride};

use crate::error::CatalogError;
use crate::group::ProductGroup;
use crate::loader::ImageLoader;
use crate::scan::{scan_assets, ImageAsset};

/// Most missing numbers listed in a [`IndexWarning::PartialRange`].
pub const MISSING_SAMPLE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexWarning {
    /// No photo in the range exists.
    EmptyRange { rule: CollapseRule },
    /// Some numbers in the range have no photo; the group was built from the
    /// rest. `missing` holds at most the first [`MISSING_SAMPLE`] of them.
    PartialRange {
        rule: CollapseRule,
        missing: Vec<u32>,
        missing_count: u64,
    },
    /// An override is keyed by a number that is not a group representative.
    OrphanOverride { id: u32 },
}

impl std::fmt::Display for IndexWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexWarning::EmptyRange { rule } => {
                write!(f, "collapse rule {rule} matched no images")
            }
            IndexWarning::PartialRange {
                rule,
                missing,
                missing_count,
            } => {
                let sample: Vec<String> = missing.iter().map(ToString::to_string).collect();
                if *missing_count > missing.len() as u64 {
                    write!(
                        f,
                        "collapse rule {rule} is missing {missing_count} images (first: {}, ...)",
                        sample.join(", ")
                    )
                } else {
                    write!(f, "collapse rule {rule} is missing images {}", sample.join(", "))
                }
            }
            IndexWarning::OrphanOverride { id } => {
                write!(f, "override for {id} does not match any group")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexReport {
    pub category: String,
    pub asset_count: usize,
    pub group_count: usize,
    pub warnings: Vec<IndexWarning>,
}

impl IndexReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Groups of one catalog plus what indexing noticed along the way.
#[derive(Debug, Clone)]
pub struct IndexedCatalog {
    pub category: String,
    pub groups: Vec<ProductGroup>,
    pub report: IndexReport,
}

/// Scans a catalog's image directory under `assets_root` and indexes it.
///
/// # Errors
///
/// Returns [`CatalogError`] if the directory cannot be read or the filename
/// pattern cannot be built.
pub fn index_catalog(
    config: &CatalogConfig,
    assets_root: &Path,
    base_url: &str,
) -> Result<IndexedCatalog, CatalogError> {
    let dir = assets_root.join(&config.directory);
    let assets = scan_assets(&dir, &config.file_prefix)?;
    Ok(index_assets(config, assets, base_url))
}

/// Indexes an already-enumerated asset list.
///
/// Every asset ends up in exactly one group. Rules are applied in
/// configuration order; a number claimed by an earlier rule is not claimed
/// again by a later overlapping one.
#[must_use]
pub fn index_assets(
    config: &CatalogConfig,
    assets: Vec<ImageAsset>,
    base_url: &str,
) -> IndexedCatalog {
    let asset_count = assets.len();
    let category = config.category.clone();

    let mut by_number: BTreeMap<u32, Vec<ImageAsset>> = BTreeMap::new();
    for asset in assets {
        by_number.entry(asset.number).or_default().push(asset);
    }

    let mut warnings = Vec::new();
    let mut consumed = BTreeSet::new();
    let mut memberships: Vec<Vec<u32>> = Vec::new();

    for rule in &config.collapse_rules {
        if rule.start > rule.end {
            warnings.push(IndexWarning::EmptyRange { rule: *rule });
            continue;
        }
        let present: Vec<u32> = by_number
            .range(rule.start..=rule.end)
            .map(|(n, _)| *n)
            .collect();
        let members: Vec<u32> = present.iter().copied().filter(|n| consumed.insert(*n)).collect();

        if members.is_empty() {
            warnings.push(IndexWarning::EmptyRange { rule: *rule });
            continue;
        }

        let width = u64::from(rule.end - rule.start) + 1;
        let missing_count = width - present.len() as u64;
        if missing_count > 0 {
            let missing = (rule.start..=rule.end)
                .filter(|n| !by_number.contains_key(n))
                .take(MISSING_SAMPLE)
                .collect();
            warnings.push(IndexWarning::PartialRange {
                rule: *rule,
                missing,
                missing_count,
            });
        }
        memberships.push(members);
    }

    memberships.extend(
        by_number
            .keys()
            .filter(|n| !consumed.contains(*n))
            .map(|n| vec![*n]),
    );
    memberships.sort_by_key(|members| members[0]);

    let groups: Vec<ProductGroup> = memberships
        .into_iter()
        .map(|members| make_group(config, &members, &by_number, base_url))
        .collect();

    for id in config.overrides.keys() {
        if !groups.iter().any(|g| g.id == *id) {
            warnings.push(IndexWarning::OrphanOverride { id: *id });
        }
    }

    for warning in &warnings {
        tracing::warn!(category = %category, "{warning}");
    }

    let report = IndexReport {
        category: category.clone(),
        asset_count,
        group_count: groups.len(),
        warnings,
    };

    IndexedCatalog {
        category,
        groups,
        report,
    }
}

fn make_group(
    config: &CatalogConfig,
    members: &[u32],
    by_number: &BTreeMap<u32, Vec<ImageAsset>>,
    base_url: &str,
) -> ProductGroup {
    let id = members[0];
    let category = &config.category;
    let fallback = GroupOverride::default();
    let details = config.overrides.get(&id).unwrap_or(&fallback);

    let name = details
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map_or_else(
            || format!("{} {id:02}", config.display_prefix.trim()),
            str::to_string,
        );
    let slug = slugify(&format!("{id}-{name}"));

    let url_dir = config.directory.to_string_lossy().replace('\\', "/");
    let url_dir = url_dir.trim_matches('/');
    let base_url = base_url.trim_end_matches('/');

    let loaders = members
        .iter()
        .filter_map(|n| by_number.get(n))
        .flatten()
        .map(|asset| {
            let url = if url_dir.is_empty() {
                format!("{base_url}/{}", asset.filename)
            } else {
                format!("{base_url}/{url_dir}/{}", asset.filename)
            };
            ImageLoader::new(asset.path.clone(), url)
        })
        .collect();

    ProductGroup {
        id,
        uid: format!("{category}-{id}"),
        category: category.clone(),
        route: format!("/product/{category}/{id}/{slug}"),
        name,
        slug,
        price: details.price,
        colors: details
            .colors
            .as_ref()
            .map(|colors| colors.iter().map(|c| swatch_from_name(c)).collect()),
        sizes: details.sizes.clone(),
        image_numbers: members.to_vec(),
        loaders,
    }
}

#[cfg(test)]
#[path = "index_test.rs"]
mod tests;
