//! Canonical price type.
//!
//! Prices reach the storefront in several shapes: JSON numbers, catalog YAML
//! numbers, and display strings such as `"$14.500,00"` copied from the shop's
//! listings. [`Money::parse`] is the one place those strings are interpreted;
//! everything past that boundary works on a normalized [`Decimal`] amount and
//! renders through [`Money`]'s `Display` impl.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Label shown wherever a price is unknown.
pub const PRICE_ON_REQUEST: &str = "Consultar";

/// A non-negative amount in Argentine pesos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Parses a loosely formatted price string.
    ///
    /// Accepted shapes: `"$14.500,00"`, `"$ 14.500"`, `"ARS 14500"`,
    /// `"14500"`, `"12.99"`, `"14500.00"`. A comma is always the decimal
    /// separator; dots are thousands separators when every group after the
    /// first has exactly three digits. Anything else (including
    /// `"Consultar"`, negative values, and free text) yields `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Money> {
        let mut s = raw.trim();
        if let Some(rest) = strip_prefix_ignore_case(s, "ars") {
            s = rest.trim_start();
        }
        s = s.trim_start_matches('$').trim();
        if let Some(rest) = strip_suffix_ignore_case(s, "ars") {
            s = rest.trim_end();
        }

        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty()
            || !compact
                .chars()
                .all(|c| c.is_ascii_digit() || c == '.' || c == ',')
        {
            return None;
        }

        let canonical = match compact.split_once(',') {
            Some((int_part, frac_part)) => {
                if frac_part.contains(',') || frac_part.contains('.') {
                    return None;
                }
                let int_digits = int_part.replace('.', "");
                let int_digits = if int_digits.is_empty() {
                    "0".to_string()
                } else {
                    int_digits
                };
                if frac_part.is_empty() {
                    int_digits
                } else {
                    format!("{int_digits}.{frac_part}")
                }
            }
            None => {
                let groups: Vec<&str> = compact.split('.').collect();
                let thousands = groups.len() > 1
                    && !groups[0].is_empty()
                    && groups[1..].iter().all(|g| g.len() == 3);
                if thousands {
                    groups.concat()
                } else if groups.len() > 2 {
                    return None;
                } else {
                    compact
                }
            }
        };

        let amount = Decimal::from_str(&canonical).ok()?;
        (!amount.is_sign_negative()).then(|| Money::cents(amount))
    }

    /// Converts a floating point amount, rounding to cents.
    ///
    /// Returns `None` for negative, NaN, or out-of-range values.
    #[must_use]
    pub fn from_number(value: f64) -> Option<Money> {
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        Decimal::try_from(value).ok().map(Money::cents)
    }

    /// Rounds to whole cents. Every `Money` holds exactly two decimals, so
    /// the serialized form never has a three-digit fraction that would read
    /// back as a thousands group.
    fn cents(amount: Decimal) -> Money {
        let mut amount = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        amount.rescale(2);
        Money(amount)
    }

    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Money {
        Money(
            self.0
                .checked_mul(Decimal::from(quantity))
                .unwrap_or(Decimal::MAX),
        )
    }
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &s[prefix.len()..])
}

fn strip_suffix_ignore_case<'a>(s: &'a str, suffix: &str) -> Option<&'a str> {
    let split = s.len().checked_sub(suffix.len())?;
    let tail = s.get(split..)?;
    tail.eq_ignore_ascii_case(suffix).then(|| &s[..split])
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money::cents(amount.max(Decimal::ZERO))
    }
}

impl From<u32> for Money {
    fn from(amount: u32) -> Self {
        Money::cents(Decimal::from(amount))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

/// es-AR currency rendering: `$ 14.500,00`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rounded = self.0.round_dp(2);
        rounded.rescale(2);
        let plain = rounded.abs().to_string();
        let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

        let digits: Vec<char> = int_part.chars().collect();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (idx, digit) in digits.iter().enumerate() {
            if idx > 0 && (digits.len() - idx) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(*digit);
        }

        write!(f, "$ {grouped},{frac_part}")
    }
}

/// Renders an optional price, falling back to [`PRICE_ON_REQUEST`].
#[must_use]
pub fn price_label(price: Option<&Money>) -> String {
    price.map_or_else(|| PRICE_ON_REQUEST.to_string(), ToString::to_string)
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&Money::cents(self.0).0.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Int(u64),
    Float(f64),
    Text(String),
}

impl RawPrice {
    fn into_money(self) -> Option<Money> {
        match self {
            RawPrice::Int(n) => Some(Money::cents(Decimal::from(n))),
            RawPrice::Float(n) => Money::from_number(n),
            RawPrice::Text(s) => Money::parse(&s),
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawPrice::deserialize(deserializer)?
            .into_money()
            .ok_or_else(|| serde::de::Error::custom("unrecognized price"))
    }
}

/// Lenient field deserializer: unparseable prices become `None` instead of
/// failing the surrounding record.
///
/// Use with `#[serde(default, deserialize_with = "regia_core::money::lenient")]`.
///
/// # Errors
///
/// Only fails when the underlying deserializer does.
pub fn lenient<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Money>, D::Error> {
    let raw: Option<loose::Loose> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(loose::Loose::into_money))
}

mod loose {
    use serde::Deserialize;

    use super::{Money, RawPrice};

    /// Anything a stored price field has been observed to hold.
    #[derive(Deserialize)]
    #[serde(untagged)]
    pub(super) enum Loose {
        Price(RawPrice),
        Other(serde::de::IgnoredAny),
    }

    impl Loose {
        pub(super) fn into_money(self) -> Option<Money> {
            match self {
                Loose::Price(raw) => raw.into_money(),
                Loose::Other(_) => None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ars(units: i64, cents: u32) -> Money {
        Money::from(Decimal::new(units * 100 + i64::from(cents), 2))
    }

    #[test]
    fn parses_es_ar_display_strings() {
        assert_eq!(Money::parse("$14.500,00"), Some(ars(14_500, 0)));
        assert_eq!(Money::parse("$ 13.000,50"), Some(ars(13_000, 50)));
        assert_eq!(Money::parse("$1.234.567,89"), Some(ars(1_234_567, 89)));
    }

    #[test]
    fn parses_plain_numbers() {
        assert_eq!(Money::parse("14500"), Some(ars(14_500, 0)));
        assert_eq!(Money::parse("12.99"), Some(ars(12, 99)));
        assert_eq!(Money::parse("14500.00"), Some(ars(14_500, 0)));
        assert_eq!(Money::parse("ARS 60000"), Some(ars(60_000, 0)));
    }

    #[test]
    fn dots_in_three_digit_groups_are_thousands() {
        assert_eq!(Money::parse("14.500"), Some(ars(14_500, 0)));
        assert_eq!(Money::parse("1.5"), Some(Money::from(Decimal::new(15, 1))));
    }

    #[test]
    fn rejects_text_and_negatives() {
        assert_eq!(Money::parse("Consultar"), None);
        assert_eq!(Money::parse(""), None);
        assert_eq!(Money::parse("-100"), None);
        assert_eq!(Money::parse("Llevando 3 o más C/U: $13.000,00"), None);
        assert_eq!(Money::parse("1,2,3"), None);
    }

    #[test]
    fn display_uses_es_ar_format() {
        assert_eq!(ars(14_500, 0).to_string(), "$ 14.500,00");
        assert_eq!(ars(999, 5).to_string(), "$ 999,05");
        assert_eq!(ars(1_234_567, 89).to_string(), "$ 1.234.567,89");
        assert_eq!(Money::ZERO.to_string(), "$ 0,00");
    }

    #[test]
    fn price_label_falls_back_to_consultar() {
        assert_eq!(price_label(None), "Consultar");
        assert_eq!(price_label(Some(&ars(60_000, 0))), "$ 60.000,00");
    }

    #[test]
    fn from_number_rounds_and_rejects_invalid() {
        assert_eq!(Money::from_number(12.999), Some(ars(13, 0)));
        assert_eq!(Money::from_number(-1.0), None);
        assert_eq!(Money::from_number(f64::NAN), None);
    }

    #[test]
    fn times_and_sum() {
        let unit = ars(14_500, 0);
        assert_eq!(unit.times(3), ars(43_500, 0));
        let total: Money = vec![unit, ars(500, 50)].into_iter().sum();
        assert_eq!(total, ars(15_000, 50));
    }

    #[test]
    fn deserializes_numbers_and_strings() {
        let from_int: Money = serde_json::from_str("60000").unwrap();
        let from_float: Money = serde_json::from_str("12.5").unwrap();
        let from_text: Money = serde_json::from_str("\"$14.500,00\"").unwrap();
        assert_eq!(from_int, ars(60_000, 0));
        assert_eq!(from_float, ars(12, 50));
        assert_eq!(from_text, ars(14_500, 0));
        assert!(serde_json::from_str::<Money>("\"Consultar\"").is_err());
    }

    #[test]
    fn serializes_as_decimal_string() {
        let json = serde_json::to_string(&ars(14_500, 0)).unwrap();
        assert_eq!(json, "\"14500.00\"");
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ars(14_500, 0));
    }

    #[test]
    fn sub_cent_amounts_round_and_survive_serialization() {
        let price = Money::parse("$1,999").unwrap();
        assert_eq!(price, ars(2, 0));
        assert_eq!(Money::from(Decimal::new(125, 3)), ars(0, 13));

        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "\"2.00\"");
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, price);
        assert_eq!(back.to_string(), "$ 2,00");
    }

    #[derive(Deserialize)]
    struct Priced {
        #[serde(default, deserialize_with = "lenient")]
        price: Option<Money>,
    }

    #[test]
    fn lenient_field_swallows_unknown_shapes() {
        let cases = [
            (r#"{"price":"$14.500,00"}"#, Some(ars(14_500, 0))),
            (r#"{"price":14500}"#, Some(ars(14_500, 0))),
            (r#"{"price":"Consultar"}"#, None),
            (r#"{"price":null}"#, None),
            (r#"{"price":{"amount":1}}"#, None),
            (r"{}", None),
        ];
        for (json, expected) in cases {
            let parsed: Priced = serde_json::from_str(json).unwrap();
            assert_eq!(parsed.price, expected, "input: {json}");
        }
    }
}
