use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::slug::slugify;
use crate::ConfigError;

/// An inclusive `[start, end]` range of image numbers that make up one
/// product. Written in YAML as a two-element list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct CollapseRule {
    pub start: u32,
    pub end: u32,
}

impl CollapseRule {
    #[must_use]
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn contains(&self, n: u32) -> bool {
        (self.start..=self.end).contains(&n)
    }

    #[must_use]
    pub fn overlaps(&self, other: &CollapseRule) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl From<[u32; 2]> for CollapseRule {
    fn from([start, end]: [u32; 2]) -> Self {
        Self { start, end }
    }
}

impl From<CollapseRule> for [u32; 2] {
    fn from(rule: CollapseRule) -> Self {
        [rule.start, rule.end]
    }
}

impl std::fmt::Display for CollapseRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Hand-curated details for one product group, keyed by its representative
/// image number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupOverride {
    pub name: Option<String>,
    /// `None` renders as "Consultar".
    pub price: Option<Money>,
    pub colors: Option<Vec<String>>,
    pub sizes: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Namespace used in uids and routes, e.g. `"vestidos"`.
    pub category: String,
    /// Image directory, relative to the assets root.
    pub directory: PathBuf,
    /// Filename stem before the number, e.g. `"vestido"` for `vestido12.jpeg`.
    pub file_prefix: String,
    /// Stem of generated names, e.g. `"Vestido"` for `"Vestido 07"`.
    pub display_prefix: String,
    #[serde(default)]
    pub collapse_rules: Vec<CollapseRule>,
    #[serde(default)]
    pub overrides: BTreeMap<u32, GroupOverride>,
}

#[derive(Debug, Deserialize)]
pub struct CatalogsFile {
    pub catalogs: Vec<CatalogConfig>,
}

/// Load and validate the catalog configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalogs(path: &Path) -> Result<CatalogsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let catalogs_file: CatalogsFile =
        serde_yaml::from_str(&content).map_err(ConfigError::CatalogsFileParse)?;

    validate_catalogs(&catalogs_file)?;

    Ok(catalogs_file)
}

fn validate_catalogs(catalogs_file: &CatalogsFile) -> Result<(), ConfigError> {
    let mut seen_categories = HashSet::new();

    for catalog in &catalogs_file.catalogs {
        let category = catalog.category.as_str();
        if category.trim().is_empty() {
            return Err(ConfigError::Validation(
                "catalog category must be non-empty".to_string(),
            ));
        }

        if slugify(category) != category {
            return Err(ConfigError::Validation(format!(
                "catalog category '{category}' must be a lowercase slug"
            )));
        }

        if !seen_categories.insert(category) {
            return Err(ConfigError::Validation(format!(
                "duplicate catalog category: '{category}'"
            )));
        }

        if catalog.file_prefix.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "catalog '{category}' has an empty file_prefix"
            )));
        }

        for (idx, rule) in catalog.collapse_rules.iter().enumerate() {
            if rule.start == 0 || rule.start > rule.end {
                return Err(ConfigError::Validation(format!(
                    "catalog '{category}' has invalid collapse rule {rule}; \
                     start must be >= 1 and <= end"
                )));
            }

            if let Some(other) = catalog.collapse_rules[..idx]
                .iter()
                .find(|other| other.overlaps(rule))
            {
                return Err(ConfigError::Validation(format!(
                    "catalog '{category}' has overlapping collapse rules {other} and {rule}"
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "catalogs_test.rs"]
mod tests;
