use crate::modules::cart::core::product::Product;
use crate::shared::core::primitives::ProductId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Keys of the stored entry that belong to the cart, not to the catalog.
const RESERVED_KEYS: [&str; 1] = ["amount"];

/// A product in the cart together with the selected amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    #[serde(flatten)]
    pub product: Product,
    pub amount: u32,
}

impl CartEntry {
    /// Catalog fields that clash with the entry's own keys are dropped so the
    /// stored entry stays readable.
    pub fn new(mut product: Product, amount: u32) -> Self {
        for key in RESERVED_KEYS {
            product.extra.remove(key);
        }
        Self { product, amount }
    }

    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    pub fn line_total(&self) -> f64 {
        self.product.price * f64::from(self.amount)
    }
}

/// Ordered list of cart entries.
///
/// Holds at most one entry per product and never an entry with amount 0.
/// Every mutation returns a new cart so the previous state stays untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<CartEntry>", into = "Vec<CartEntry>")]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart from raw entries, keeping the first entry of each product
    /// and dropping entries without a positive amount.
    pub fn from_entries(entries: Vec<CartEntry>) -> Self {
        let mut seen = HashSet::new();
        let entries = entries
            .into_iter()
            .filter(|entry| entry.amount >= 1 && seen.insert(entry.product_id()))
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &CartEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, product_id: ProductId) -> Option<&CartEntry> {
        self.entries.iter().find(|e| e.product_id() == product_id)
    }

    pub fn position(&self, product_id: ProductId) -> Option<usize> {
        self.entries.iter().position(|e| e.product_id() == product_id)
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.position(product_id).is_some()
    }

    pub fn total_units(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.amount)).sum()
    }

    pub fn subtotal(&self) -> f64 {
        self.entries.iter().map(CartEntry::line_total).sum()
    }

    /// Appends a new entry. Callers must check the product is not already present.
    pub fn with_appended(&self, entry: CartEntry) -> Self {
        let mut entries = self.entries.clone();
        entries.push(entry);
        Self { entries }
    }

    /// Sets the amount of the matching entry. Other entries are left as they are;
    /// an unknown product leaves the cart unchanged.
    pub fn with_amount(&self, product_id: ProductId, amount: u32) -> Self {
        let entries = self
            .entries
            .iter()
            .cloned()
            .map(|mut entry| {
                if entry.product_id() == product_id {
                    entry.amount = amount;
                }
                entry
            })
            .collect();
        Self { entries }
    }

    pub fn without(&self, index: usize) -> Self {
        let mut entries = self.entries.clone();
        if index < entries.len() {
            entries.remove(index);
        }
        Self { entries }
    }

    /// Takes the entry of `product_id` from `source` and leaves every other
    /// entry as it is here. A product missing from `source` is removed; a
    /// product new to this cart is appended.
    pub fn with_entry_from(&self, product_id: ProductId, source: &Cart) -> Self {
        match (self.position(product_id), source.find(product_id)) {
            (Some(index), Some(entry)) => {
                let mut entries = self.entries.clone();
                entries[index] = entry.clone();
                Self { entries }
            }
            (None, Some(entry)) => self.with_appended(entry.clone()),
            (Some(index), None) => self.without(index),
            (None, None) => self.clone(),
        }
    }
}

impl From<Vec<CartEntry>> for Cart {
    fn from(entries: Vec<CartEntry>) -> Self {
        Self::from_entries(entries)
    }
}

impl From<Cart> for Vec<CartEntry> {
    fn from(cart: Cart) -> Self {
        cart.entries
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartEntry;
    type IntoIter = std::slice::Iter<'a, CartEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
