//! Deferred image loading.
//!
//! An [`ImageLoader`] only records where an image lives; nothing touches the
//! disk until [`ImageLoader::load`] is awaited. Listing pages invoke the
//! primary loader of each visible group and detail pages invoke the whole
//! gallery, so indexing a catalog never reads image bytes.

use std::path::PathBuf;

use futures::stream::{self, StreamExt};

use crate::error::CatalogError;
use crate::group::ProductGroup;

/// Inline SVG shown when an image is missing or fails to load.
pub const PLACEHOLDER_IMAGE: &str = "data:image/svg+xml;utf8,\
<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"96\" height=\"96\">\
<defs><linearGradient id=\"g\" x1=\"0\" y1=\"0\" x2=\"1\" y2=\"1\">\
<stop offset=\"0\" stop-color=\"#111\"/><stop offset=\"1\" stop-color=\"#222\"/></linearGradient></defs>\
<rect width=\"100%\" height=\"100%\" fill=\"url(#g)\"/>\
<text x=\"50%\" y=\"50%\" dy=\".35em\" text-anchor=\"middle\" fill=\"#777\" font-size=\"10\">Imagen</text></svg>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageLoader {
    path: PathBuf,
    url: String,
}

impl ImageLoader {
    #[must_use]
    pub fn new(path: PathBuf, url: String) -> Self {
        Self { path, url }
    }

    /// Public reference for the image, e.g. `/images/Boho/boho4.jpeg`.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Reads the image bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ImageLoad`] if the file cannot be read.
    pub async fn load(&self) -> Result<Vec<u8>, CatalogError> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|source| CatalogError::ImageLoad {
                path: self.path.display().to_string(),
                source,
            })
    }

    /// Loads the image, substituting the placeholder on any failure. There is
    /// no retry.
    pub async fn load_or_placeholder(&self) -> LoadedImage {
        match self.load().await {
            Ok(bytes) => LoadedImage::Loaded {
                url: self.url.clone(),
                bytes,
            },
            Err(e) => {
                tracing::warn!(url = %self.url, error = %e, "image load failed; using placeholder");
                LoadedImage::Placeholder
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadedImage {
    Loaded { url: String, bytes: Vec<u8> },
    Placeholder,
}

impl LoadedImage {
    /// What an `<img src>` should point at.
    #[must_use]
    pub fn src(&self) -> &str {
        match self {
            LoadedImage::Loaded { url, .. } => url,
            LoadedImage::Placeholder => PLACEHOLDER_IMAGE,
        }
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, LoadedImage::Placeholder)
    }
}

/// Loads the listing thumbnail of a group.
pub async fn load_primary_image(group: &ProductGroup) -> LoadedImage {
    match group.primary_loader() {
        Some(loader) => loader.load_or_placeholder().await,
        None => LoadedImage::Placeholder,
    }
}

/// Loads every image of a group for the detail gallery, at most
/// `concurrency` at a time. Results keep the group's image order.
pub async fn load_gallery(group: &ProductGroup, concurrency: usize) -> Vec<LoadedImage> {
    stream::iter(group.loaders.iter().map(ImageLoader::load_or_placeholder))
        .buffered(concurrency.max(1))
        .collect()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn load_reads_bytes_only_when_invoked() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boho1.jpg");
        let loader = ImageLoader::new(path.clone(), "/images/Boho/boho1.jpg".to_string());

        // Creating the loader before the file exists is fine: nothing is read yet.
        std::fs::write(&path, b"jpeg-bytes").unwrap();

        let bytes = loader.load().await.unwrap();
        assert_eq!(bytes, b"jpeg-bytes");
    }

    #[tokio::test]
    async fn missing_file_becomes_placeholder() {
        let loader = ImageLoader::new(
            PathBuf::from("/no/such/boho1.jpg"),
            "/images/Boho/boho1.jpg".to_string(),
        );
        assert!(matches!(
            loader.load().await,
            Err(CatalogError::ImageLoad { .. })
        ));

        let image = loader.load_or_placeholder().await;
        assert!(image.is_placeholder());
        assert_eq!(image.src(), PLACEHOLDER_IMAGE);
    }

    #[tokio::test]
    async fn loaded_image_src_is_public_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boho2.jpg");
        std::fs::write(&path, b"x").unwrap();
        let loader = ImageLoader::new(path, "/images/Boho/boho2.jpg".to_string());

        let image = loader.load_or_placeholder().await;
        assert!(!image.is_placeholder());
        assert_eq!(image.src(), "/images/Boho/boho2.jpg");
    }
}
