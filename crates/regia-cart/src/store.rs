//! The cart store.
//!
//! State changes go through [`reduce`], a pure function of the previous
//! state and an action. [`CartStore`] wraps it with persistence and change
//! notification: every dispatch writes the full item list back to storage
//! and then calls each subscriber with the new state.

use std::fmt;

use serde::Serialize;

use crate::error::CartError;
use crate::item::{CartLineItem, VariantKey};
use crate::storage::{load_items, save_items, CartStorage};
use crate::summary::CartSummary;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CartState {
    pub items: Vec<CartLineItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Adds an item, merging into an existing row with the same variant key.
    Add(CartLineItem),
    /// Removes the row with exactly this variant key.
    Remove(VariantKey),
    /// Sets a row's quantity. Values below 1 clamp to 1.
    UpdateQuantity { key: VariantKey, quantity: u32 },
    /// Empties the cart.
    Clear,
}

/// Applies one action.
#[must_use]
pub fn reduce(mut state: CartState, action: CartAction) -> CartState {
    match action {
        CartAction::Add(item) => {
            let key = item.key();
            match state.items.iter_mut().find(|row| row.matches(&key)) {
                Some(row) => row.quantity = row.quantity.saturating_add(item.quantity.max(1)),
                None => state.items.push(CartLineItem {
                    quantity: item.quantity.max(1),
                    ..item
                }),
            }
        }
        CartAction::Remove(key) => state.items.retain(|row| !row.matches(&key)),
        CartAction::UpdateQuantity { key, quantity } => {
            if let Some(row) = state.items.iter_mut().find(|row| row.matches(&key)) {
                row.quantity = quantity.max(1);
            }
        }
        CartAction::Clear => state.items.clear(),
    }
    state
}

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&CartState)>;

pub struct CartStore<S: CartStorage> {
    state: CartState,
    storage: S,
    key: String,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<S: CartStorage> CartStore<S> {
    /// Builds a store from whatever is persisted under `key`.
    ///
    /// Persisted rows that share a variant key are merged, so a hand-edited
    /// or legacy payload still yields one row per variant.
    pub fn hydrate(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let persisted = load_items(&storage, &key);
        let row_count = persisted.len();
        let state = persisted
            .into_iter()
            .fold(CartState::default(), |state, item| {
                reduce(state, CartAction::Add(item))
            });
        tracing::debug!(key = %key, rows = row_count, lines = state.items.len(), "cart hydrated");

        Self {
            state,
            storage,
            key,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.state.items
    }

    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary::from_items(&self.state.items)
    }

    /// Applies `action`, persists the result, and notifies subscribers.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] if the new state could not be persisted. The
    /// in-memory state is updated and subscribers are notified regardless.
    pub fn dispatch(&mut self, action: CartAction) -> Result<(), CartError> {
        self.state = reduce(std::mem::take(&mut self.state), action);

        let persisted = save_items(&mut self.storage, &self.key, &self.state.items);
        if let Err(e) = &persisted {
            tracing::warn!(key = %self.key, error = %e, "failed to persist cart");
        }

        for (_, listener) in &mut self.listeners {
            listener(&self.state);
        }
        persisted
    }

    /// # Errors
    ///
    /// See [`CartStore::dispatch`].
    pub fn add_to_cart(&mut self, item: CartLineItem) -> Result<(), CartError> {
        self.dispatch(CartAction::Add(item))
    }

    /// # Errors
    ///
    /// See [`CartStore::dispatch`].
    pub fn remove_from_cart(&mut self, key: VariantKey) -> Result<(), CartError> {
        self.dispatch(CartAction::Remove(key))
    }

    /// # Errors
    ///
    /// See [`CartStore::dispatch`].
    pub fn update_quantity(&mut self, key: VariantKey, quantity: u32) -> Result<(), CartError> {
        self.dispatch(CartAction::UpdateQuantity { key, quantity })
    }

    /// # Errors
    ///
    /// See [`CartStore::dispatch`].
    pub fn clear(&mut self) -> Result<(), CartError> {
        self.dispatch(CartAction::Clear)
    }

    /// Registers a callback invoked with the new state after every dispatch.
    pub fn subscribe(&mut self, listener: impl FnMut(&CartState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}

impl<S: CartStorage + fmt::Debug> fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("state", &self.state)
            .field("storage", &self.storage)
            .field("key", &self.key)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
