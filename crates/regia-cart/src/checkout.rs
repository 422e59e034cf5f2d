//! WhatsApp hand-off links.
//!
//! Checkout does not create an order. It renders the cart as a chat message
//! and builds a `wa.me` link that opens a conversation with the shop.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regia_core::{price_label, Money};

use crate::item::CartLineItem;

/// Characters left unescaped by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const CHECKOUT_GREETING: &str = "¡Hola! Quiero realizar una compra. Detalles:";
const CHECKOUT_CLOSING: &str = "¡Gracias!";
const UNTITLED_ITEM: &str = "Producto";

/// `https://wa.me/<digits>?text=<encoded text>`. Non-digits in `phone` are
/// dropped.
#[must_use]
pub fn whatsapp_link(phone: &str, text: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    let encoded = utf8_percent_encode(text, URI_COMPONENT);
    format!("https://wa.me/{digits}?text={encoded}")
}

/// Renders the cart as the checkout chat message.
#[must_use]
pub fn checkout_message(items: &[CartLineItem]) -> String {
    let mut lines = vec![CHECKOUT_GREETING.to_string(), String::new()];
    for item in items {
        let title = item.title.trim();
        let title = if title.is_empty() { UNTITLED_ITEM } else { title };
        lines.push(format!("• {title}"));
        lines.push(format!("  Cantidad: {}", item.quantity));
        if let Some(price) = &item.price {
            lines.push(format!("  Precio: {price}"));
        }
        if let Some(color) = item.selected_color.as_ref().filter(|c| !c.name.is_empty()) {
            lines.push(format!("  Color: {}", color.name));
        }
        if let Some(size) = item.selected_size.as_ref().filter(|s| !s.name.is_empty()) {
            lines.push(format!("  Talle: {}", size.name));
        }
        lines.push(String::new());
    }
    lines.push(CHECKOUT_CLOSING.to_string());
    lines.join("\n")
}

/// Checkout link for the cart, or `None` when the cart is empty.
#[must_use]
pub fn checkout_link(phone: &str, items: &[CartLineItem]) -> Option<String> {
    if items.is_empty() {
        tracing::debug!("checkout requested for an empty cart");
        return None;
    }
    Some(whatsapp_link(phone, &checkout_message(items)))
}

/// Single-product inquiry link.
#[must_use]
pub fn inquiry_link(phone: &str, name: &str, price: Option<&Money>) -> String {
    let text = format!(
        "Hola, estoy interesado en: {name}. Precio: {}.",
        price_label(price)
    );
    whatsapp_link(phone, &text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ColorChoice, SizeChoice};

    #[test]
    fn link_keeps_only_phone_digits() {
        assert_eq!(
            whatsapp_link("+54 9 381 247-2636", "hola"),
            "https://wa.me/5493812472636?text=hola"
        );
    }

    #[test]
    fn link_encodes_like_encode_uri_component() {
        assert_eq!(
            whatsapp_link("1", "¡Hola! a&b=c (1)\n"),
            "https://wa.me/1?text=%C2%A1Hola!%20a%26b%3Dc%20(1)%0A"
        );
    }

    #[test]
    fn message_lists_each_item() {
        let items = vec![
            CartLineItem::new("remeras-100", "REMERA OVERSIZE OLA", 2)
                .with_price(Money::parse("14500"))
                .with_color(ColorChoice::named("Negro"))
                .with_size(SizeChoice::named("M")),
            CartLineItem::new("vestidos-3", "  ", 1),
        ];

        assert_eq!(
            checkout_message(&items),
            "¡Hola! Quiero realizar una compra. Detalles:\n\
             \n\
             • REMERA OVERSIZE OLA\n\
             \x20 Cantidad: 2\n\
             \x20 Precio: $ 14.500,00\n\
             \x20 Color: Negro\n\
             \x20 Talle: M\n\
             \n\
             • Producto\n\
             \x20 Cantidad: 1\n\
             \n\
             ¡Gracias!"
        );
    }

    #[test]
    fn empty_cart_has_no_checkout_link() {
        assert!(checkout_link("5493812472636", &[]).is_none());
    }

    #[test]
    fn checkout_link_encodes_message() {
        let items = vec![CartLineItem::new("boho-1", "Set", 1)];
        let link = checkout_link("5493812472636", &items).unwrap();
        assert!(link.starts_with("https://wa.me/5493812472636?text=%C2%A1Hola!%20Quiero"));
        assert!(link.ends_with("%C2%A1Gracias!"));
    }

    #[test]
    fn inquiry_mentions_price_or_consultar() {
        let price = Money::parse("45000");
        assert_eq!(
            inquiry_link("549", "Set KAREN", price.as_ref()),
            "https://wa.me/549?text=Hola%2C%20estoy%20interesado%20en%3A%20Set%20KAREN.%20Precio%3A%20%24%2045.000%2C00."
        );
        assert!(inquiry_link("549", "Vestido 01", None).ends_with("Precio%3A%20Consultar."));
    }
}
