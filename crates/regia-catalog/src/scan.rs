//! Asset discovery for numbered product photos.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::CatalogError;

/// One numbered photo on disk, e.g. `vestido12.jpeg` → number 12.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    pub number: u32,
    pub filename: String,
    pub path: PathBuf,
}

/// Builds the filename matcher for a catalog prefix.
///
/// Matches `<prefix><digits>.<jpg|jpeg|png|webp|avif>`, case-insensitive.
///
/// # Errors
///
/// Returns [`CatalogError::Pattern`] if the regex cannot be compiled.
pub fn asset_pattern(prefix: &str) -> Result<Regex, CatalogError> {
    Regex::new(&format!(
        r"(?i)^{}(\d+)\.(?:jpe?g|png|webp|avif)$",
        regex::escape(prefix)
    ))
    .map_err(|source| CatalogError::Pattern {
        prefix: prefix.to_string(),
        source,
    })
}

/// Extracts the image number from a filename, or `None` if the name does not
/// follow the convention. Number `0` is not a valid asset.
#[must_use]
pub fn asset_number(pattern: &Regex, filename: &str) -> Option<u32> {
    let caps = pattern.captures(filename)?;
    let number = caps.get(1)?.as_str().parse::<u32>().ok()?;
    (number > 0).then_some(number)
}

/// Enumerates every matching image in `dir`, sorted by number then filename.
///
/// A missing directory is an empty catalog, not an error.
///
/// # Errors
///
/// Returns [`CatalogError::Io`] if the directory exists but cannot be read.
pub fn scan_assets(dir: &Path, prefix: &str) -> Result<Vec<ImageAsset>, CatalogError> {
    let pattern = asset_pattern(prefix)?;

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(dir = %dir.display(), "asset directory not found; catalog is empty");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(CatalogError::Io {
                path: dir.display().to_string(),
                source: e,
            })
        }
    };

    let mut assets = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| CatalogError::Io {
            path: dir.display().to_string(),
            source: e,
        })?;

        if !entry.file_type().is_ok_and(|t| t.is_file()) {
            continue;
        }

        let Some(filename) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };

        match asset_number(&pattern, &filename) {
            Some(number) => assets.push(ImageAsset {
                number,
                path: entry.path(),
                filename,
            }),
            None => tracing::debug!(file = %filename, "skipping non-catalog file"),
        }
    }

    assets.sort_by(|a, b| {
        a.number
            .cmp(&b.number)
            .then_with(|| a.filename.cmp(&b.filename))
    });
    Ok(assets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_number_extracts_digits() {
        let pattern = asset_pattern("vestido").unwrap();
        assert_eq!(asset_number(&pattern, "vestido12.jpeg"), Some(12));
        assert_eq!(asset_number(&pattern, "vestido007.webp"), Some(7));
        assert_eq!(asset_number(&pattern, "VESTIDO3.PNG"), Some(3));
        assert_eq!(asset_number(&pattern, "vestido4.avif"), Some(4));
    }

    #[test]
    fn asset_number_rejects_other_names() {
        let pattern = asset_pattern("vestido").unwrap();
        assert_eq!(asset_number(&pattern, "vestido.jpeg"), None);
        assert_eq!(asset_number(&pattern, "vestido0.jpeg"), None);
        assert_eq!(asset_number(&pattern, "vestido12.gif"), None);
        assert_eq!(asset_number(&pattern, "boho12.jpeg"), None);
        assert_eq!(asset_number(&pattern, "vestido12.jpeg.bak"), None);
        assert_eq!(asset_number(&pattern, "vestido99999999999.jpg"), None);
    }

    #[test]
    fn prefix_is_matched_literally() {
        let pattern = asset_pattern("set.a").unwrap();
        assert_eq!(asset_number(&pattern, "set.a1.jpg"), Some(1));
        assert_eq!(asset_number(&pattern, "setxa1.jpg"), None);
    }

    #[test]
    fn missing_directory_scans_empty() {
        let assets = scan_assets(Path::new("/no/such/catalog/dir"), "boho").unwrap();
        assert!(assets.is_empty());
    }

    #[test]
    fn scan_sorts_by_number_and_skips_noise() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["boho10.jpg", "boho2.jpeg", "boho1.webp", "notes.txt", "boho0.jpg"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("boho3.jpg")).unwrap();

        let assets = scan_assets(dir.path(), "boho").unwrap();
        let numbers: Vec<u32> = assets.iter().map(|a| a.number).collect();
        assert_eq!(numbers, vec![1, 2, 10]);
        assert_eq!(assets[0].filename, "boho1.webp");
        assert_eq!(assets[0].path, dir.path().join("boho1.webp"));
    }
}
