//! Color swatch palette.

use serde::{Deserialize, Serialize};

use crate::slug::fold_text;

/// Hex used for color names missing from the palette.
pub const FALLBACK_HEX: &str = "#999999";

/// Palette keyed by normalized color name.
const COLOR_HEX: &[(&str, &str)] = &[
    ("negro", "#000000"),
    ("blanco", "#ffffff"),
    ("fucsia", "#d81b60"),
    ("fucia", "#d81b60"),
    ("petroleo", "#1e4b5b"),
    ("chocolate", "#4e342e"),
    ("negro con oro", "#d4af37"),
    ("negro con plata", "#c0c0c0"),
    ("oro", "#d4af37"),
    ("plata", "#c0c0c0"),
    ("rosa", "#ff69b4"),
    ("dorado", "#d4af37"),
    ("beige", "#D7C4A3"),
    ("azul", "#1565c0"),
    ("azul con chocolate", "#1565c0"),
    ("celeste", "#74ACDF"),
    ("verde", "#2e7d32"),
    ("unico", "#9e9e9e"),
    ("amarillo", "#FFEB3B"),
];

/// Two-tone backgrounds for combo names. The solid hex in [`COLOR_HEX`] is
/// the fallback when a gradient can't be drawn.
const GRADIENT_BG: &[(&str, &str)] = &[
    ("negro con oro", "linear-gradient(45deg,#111 50%,#d4af37 50%)"),
    ("negro con plata", "linear-gradient(45deg,#111 50%,#c0c0c0 50%)"),
    (
        "azul con chocolate",
        "linear-gradient(45deg,#1565c0 50%,#4e342e 50%)",
    ),
];

/// A renderable color sample for one color option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swatch {
    /// The color name as written in the catalog, e.g. `"Negro con Oro"`.
    pub name: String,
    pub hex: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient: Option<String>,
}

impl Swatch {
    /// Whether the name was found in the palette.
    #[must_use]
    pub fn is_known(&self) -> bool {
        lookup(COLOR_HEX, &normalize_color_key(&self.name)).is_some()
    }
}

/// Lowercases, strips diacritics, and collapses runs of whitespace.
#[must_use]
pub fn normalize_color_key(name: &str) -> String {
    fold_text(name)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Builds the swatch for a color name. Unknown names get [`FALLBACK_HEX`].
#[must_use]
pub fn swatch_from_name(name: &str) -> Swatch {
    let key = normalize_color_key(name);
    Swatch {
        name: name.to_string(),
        hex: lookup(COLOR_HEX, &key).unwrap_or(FALLBACK_HEX).to_string(),
        gradient: lookup(GRADIENT_BG, &key).map(str::to_string),
    }
}

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}
