use regia_core::Money;
use serde::Serialize;

use crate::item::CartLineItem;

/// Totals shown in the cart drawer and checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CartSummary {
    /// Number of distinct rows.
    pub line_count: usize,
    /// Sum of quantities across rows.
    pub item_count: u64,
    /// Sum of priced line totals. Unpriced rows contribute nothing.
    pub subtotal: Money,
    /// Rows with no price ("Consultar").
    pub unpriced_lines: usize,
}

impl CartSummary {
    #[must_use]
    pub fn from_items(items: &[CartLineItem]) -> Self {
        Self {
            line_count: items.len(),
            item_count: items.iter().map(|i| u64::from(i.quantity)).sum(),
            subtotal: items.iter().filter_map(CartLineItem::line_total).sum(),
            unpriced_lines: items.iter().filter(|i| i.price.is_none()).count(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.line_count == 0
    }
}
