//! Shopping cart: line items, a reducer-style store with subscriptions,
//! local persistence, and the WhatsApp checkout hand-off.

pub mod checkout;
pub mod error;
pub mod item;
pub mod storage;
pub mod store;
pub mod summary;

pub use checkout::{checkout_link, checkout_message, inquiry_link, whatsapp_link};
pub use error::CartError;
pub use item::{CartLineItem, ColorChoice, ProductId, SizeChoice, VariantKey};
pub use storage::{load_items, save_items, CartStorage, FileStorage, MemoryStorage};
pub use store::{reduce, CartAction, CartState, CartStore, SubscriptionId};
pub use summary::CartSummary;
