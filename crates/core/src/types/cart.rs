//! The cart list and its entries.
//!
//! A [`Cart`] is an ordered list of [`CartEntry`] values with at most one
//! entry per product and every amount at least one. Stock validation needs a
//! remote lookup and lives in the cart store, not here.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;
use super::product::ProductInfo;

/// One product and its selected amount.
///
/// On the wire the product fields are flattened next to `amount`:
/// `{"id":1,"title":"...","price":"179.90","image":"...","amount":2}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    #[serde(flatten)]
    product: ProductInfo,
    amount: u32,
}

impl CartEntry {
    /// Create an entry holding a single unit of `product`.
    #[must_use]
    pub const fn new(product: ProductInfo) -> Self {
        Self { product, amount: 1 }
    }

    /// Create an entry with an explicit amount.
    #[must_use]
    pub const fn with_amount(product: ProductInfo, amount: NonZeroU32) -> Self {
        Self {
            product,
            amount: amount.get(),
        }
    }

    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        self.product.id
    }

    #[must_use]
    pub const fn product(&self) -> &ProductInfo {
        &self.product
    }

    #[must_use]
    pub const fn amount(&self) -> u32 {
        self.amount
    }

    /// Price of this line (unit price times amount).
    #[must_use]
    pub fn line_price(&self) -> Price {
        self.product.price.times(self.amount)
    }
}

/// Ordered cart contents, unique per product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build a cart from untrusted entries (e.g. a persisted blob).
    ///
    /// Entries with a zero amount are dropped, and for duplicated products
    /// only the first occurrence is kept. Returns the cart and the number of
    /// entries discarded.
    #[must_use]
    pub fn repaired(entries: Vec<CartEntry>) -> (Self, usize) {
        let total = entries.len();
        let mut cart = Self::new();
        for entry in entries {
            if entry.amount > 0 && !cart.contains(entry.product_id()) {
                cart.entries.push(entry);
            }
        }
        let dropped = total - cart.entries.len();
        (cart, dropped)
    }

    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CartEntry> {
        self.entries.iter()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, product_id: ProductId) -> Option<&CartEntry> {
        self.entries.iter().find(|e| e.product_id() == product_id)
    }

    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Total number of units across all entries.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.amount)).sum()
    }

    /// Sum of all line prices.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.entries.iter().map(CartEntry::line_price).sum()
    }

    /// Append a new entry with amount 1.
    ///
    /// Returns `false` (and leaves the cart untouched) if the product is
    /// already present.
    pub fn insert(&mut self, product: ProductInfo) -> bool {
        if self.contains(product.id) {
            return false;
        }
        self.entries.push(CartEntry::new(product));
        true
    }

    /// Increase an entry's amount by one. Returns the new amount.
    pub fn increment(&mut self, product_id: ProductId) -> Option<u32> {
        let entry = self.entry_mut(product_id)?;
        entry.amount = entry.amount.saturating_add(1);
        Some(entry.amount)
    }

    /// Overwrite an entry's amount. Returns the previous amount.
    pub fn set_amount(&mut self, product_id: ProductId, amount: NonZeroU32) -> Option<u32> {
        let entry = self.entry_mut(product_id)?;
        Some(std::mem::replace(&mut entry.amount, amount.get()))
    }

    /// Delete an entry, keeping the relative order of the rest.
    pub fn remove(&mut self, product_id: ProductId) -> Option<CartEntry> {
        let index = self
            .entries
            .iter()
            .position(|e| e.product_id() == product_id)?;
        Some(self.entries.remove(index))
    }

    fn entry_mut(&mut self, product_id: ProductId) -> Option<&mut CartEntry> {
        self.entries
            .iter_mut()
            .find(|e| e.product_id() == product_id)
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartEntry;
    type IntoIter = std::slice::Iter<'a, CartEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: i32, price: &str) -> ProductInfo {
        ProductInfo {
            id: ProductId::new(id),
            title: format!("Shoe {id}"),
            price: price.parse().unwrap(),
            image: format!("https://example.com/{id}.jpg"),
        }
    }

    fn ids(cart: &Cart) -> Vec<i32> {
        cart.iter().map(|e| e.product_id().as_i32()).collect()
    }

    #[test]
    fn test_insert_is_unique_per_product() {
        let mut cart = Cart::new();
        assert!(cart.insert(product(1, "10")));
        assert!(!cart.insert(product(1, "10")));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(ProductId::new(1)).unwrap().amount(), 1);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut cart = Cart::new();
        for id in [3, 1, 2] {
            cart.insert(product(id, "1"));
        }
        let removed = cart.remove(ProductId::new(1)).unwrap();
        assert_eq!(removed.product_id(), ProductId::new(1));
        assert_eq!(ids(&cart), vec![3, 2]);
        assert!(cart.remove(ProductId::new(1)).is_none());
    }

    #[test]
    fn test_increment_and_set_amount() {
        let mut cart = Cart::new();
        cart.insert(product(1, "1"));
        assert_eq!(cart.increment(ProductId::new(1)), Some(2));
        let previous = cart.set_amount(ProductId::new(1), NonZeroU32::new(5).unwrap());
        assert_eq!(previous, Some(2));
        assert_eq!(cart.get(ProductId::new(1)).unwrap().amount(), 5);
        assert_eq!(cart.increment(ProductId::new(9)), None);
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        cart.insert(product(1, "179.90"));
        cart.insert(product(2, "20.05"));
        cart.increment(ProductId::new(2));
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.subtotal().display(), "$220.00");
    }

    #[test]
    fn test_repaired_drops_zero_and_duplicates() {
        let one = NonZeroU32::new(1).unwrap();
        let mut zero = CartEntry::new(product(2, "1"));
        zero.amount = 0;
        let entries = vec![
            CartEntry::with_amount(product(1, "1"), NonZeroU32::new(2).unwrap()),
            zero,
            CartEntry::with_amount(product(1, "1"), one),
            CartEntry::with_amount(product(3, "1"), one),
        ];
        let (cart, dropped) = Cart::repaired(entries);
        assert_eq!(dropped, 2);
        assert_eq!(ids(&cart), vec![1, 3]);
        assert_eq!(cart.get(ProductId::new(1)).unwrap().amount(), 2);
    }

    #[test]
    fn test_entry_wire_format_is_flat() {
        let entry = CartEntry::new(product(1, "179.90"));
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": 1,
                "title": "Shoe 1",
                "price": "179.90",
                "image": "https://example.com/1.jpg",
                "amount": 1
            })
        );
    }
}
