use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Lowercase `text` and fold accented letters to their base letter.
#[must_use]
pub fn fold_text(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Generate a URL-safe slug: accents are folded to their base letter and
/// every run of other characters becomes a single dash.
#[must_use]
pub fn slugify(text: &str) -> String {
    fold_text(text)
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
