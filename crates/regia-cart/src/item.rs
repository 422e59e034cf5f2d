//! Cart line items and their identity.
//!
//! The persisted payload has drifted over time: ids stored as numbers or
//! strings, variants stored as `{ name, hex }` records or bare strings,
//! prices as numbers or display strings. Deserialization accepts all of
//! those shapes; serialization always writes the canonical one.

use std::fmt;

use regia_core::{normalize_color_key, Money};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Product identifier as carried by a line item. Catalog products use their
/// category-qualified uid (e.g. `"sastrero-4"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Int(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => ProductId(s),
            Raw::Int(n) => ProductId(n.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorChoice {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hex: Option<String>,
}

impl ColorChoice {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hex: None,
        }
    }
}

impl<'de> Deserialize<'de> for ColorChoice {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Name(String),
            Record {
                #[serde(default)]
                name: String,
                #[serde(default)]
                hex: Option<String>,
            },
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Name(name) => ColorChoice { name, hex: None },
            Raw::Record { name, hex } => ColorChoice { name, hex },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SizeChoice {
    pub name: String,
}

impl SizeChoice {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl<'de> Deserialize<'de> for SizeChoice {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Name(String),
            Record {
                #[serde(default)]
                name: String,
            },
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Name(name) | Raw::Record { name } => SizeChoice { name },
        })
    }
}

/// Identity of a cart row: product plus chosen color and size.
///
/// Variant names compare case- and accent-insensitively, and an empty name
/// is the same as no selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariantKey {
    pub id: ProductId,
    pub color: Option<String>,
    pub size: Option<String>,
}

impl VariantKey {
    pub fn new(id: impl Into<ProductId>, color: Option<&str>, size: Option<&str>) -> Self {
        Self {
            id: id.into(),
            color: variant_part(color),
            size: variant_part(size),
        }
    }
}

fn variant_part(name: Option<&str>) -> Option<String> {
    name.map(normalize_color_key).filter(|key| !key.is_empty())
}

/// One row of the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub id: ProductId,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "regia_core::money::lenient")]
    pub price: Option<Money>,
    #[serde(default, rename = "imageFront", alias = "image", alias = "thumb")]
    pub image: Option<String>,
    #[serde(default = "default_quantity", deserialize_with = "lenient_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub selected_color: Option<ColorChoice>,
    #[serde(default)]
    pub selected_size: Option<SizeChoice>,
}

impl CartLineItem {
    /// A line item with no price, image, or variant. Quantity is at least 1.
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, quantity: u32) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price: None,
            image: None,
            quantity: quantity.max(1),
            selected_color: None,
            selected_size: None,
        }
    }

    #[must_use]
    pub fn with_price(mut self, price: Option<Money>) -> Self {
        self.price = price;
        self
    }

    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: ColorChoice) -> Self {
        self.selected_color = Some(color);
        self
    }

    #[must_use]
    pub fn with_size(mut self, size: SizeChoice) -> Self {
        self.selected_size = Some(size);
        self
    }

    #[must_use]
    pub fn key(&self) -> VariantKey {
        VariantKey::new(
            self.id.clone(),
            self.selected_color.as_ref().map(|c| c.name.as_str()),
            self.selected_size.as_ref().map(|s| s.name.as_str()),
        )
    }

    #[must_use]
    pub fn matches(&self, key: &VariantKey) -> bool {
        self.key() == *key
    }

    /// Price times quantity, or `None` when the item is unpriced.
    #[must_use]
    pub fn line_total(&self) -> Option<Money> {
        self.price.map(|p| p.times(self.quantity))
    }
}

fn default_quantity() -> u32 {
    1
}

/// Clamps a stored quantity into `1..=u32::MAX`.
pub(crate) fn clamp_quantity(quantity: i64) -> u32 {
    u32::try_from(quantity.max(1)).unwrap_or(u32::MAX)
}

#[allow(clippy::cast_possible_truncation)]
fn lenient_quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
        Other(IgnoredAny),
    }

    let quantity = match Raw::deserialize(deserializer)? {
        Raw::Int(n) => n,
        Raw::Float(f) if f.is_finite() => f as i64,
        Raw::Text(s) => s.trim().parse::<i64>().unwrap_or(1),
        Raw::Float(_) | Raw::Other(_) => 1,
    };
    Ok(clamp_quantity(quantity))
}
