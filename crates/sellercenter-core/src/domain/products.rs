use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Product;

/// Ordered product collection keyed by seller SKU.
///
/// Adding a product whose SKU is already present replaces the stored entry
/// at its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Products {
    items: Vec<Product>,
    index: HashMap<String, usize>,
}

impl Products {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the replaced product, if any.
    pub fn add(&mut self, product: Product) -> Option<Product> {
        match self.index.get(product.seller_sku()) {
            Some(&position) => Some(std::mem::replace(&mut self.items[position], product)),
            None => {
                self.index
                    .insert(product.seller_sku().to_owned(), self.items.len());
                self.items.push(product);
                None
            }
        }
    }

    pub fn all(&self) -> &[Product] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, seller_sku: &str) -> bool {
        self.index.contains_key(seller_sku)
    }

    pub fn find_by_seller_sku(&self, seller_sku: &str) -> Option<&Product> {
        self.index
            .get(seller_sku)
            .map(|&position| &self.items[position])
    }

    /// Case-insensitive substring match on the product name.
    pub fn search_by_name(&self, needle: &str) -> Vec<&Product> {
        let needle = needle.to_lowercase();
        self.items
            .iter()
            .filter(|product| product.name().to_lowercase().contains(&needle))
            .collect()
    }

    pub fn remove(&mut self, seller_sku: &str) -> Option<Product> {
        let position = self.index.remove(seller_sku)?;
        let removed = self.items.remove(position);
        for slot in self.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    pub fn seller_skus(&self) -> Vec<String> {
        self.items
            .iter()
            .map(|product| product.seller_sku().to_owned())
            .collect()
    }
}

impl FromIterator<Product> for Products {
    fn from_iter<T: IntoIterator<Item = Product>>(iter: T) -> Self {
        let mut products = Self::new();
        for product in iter {
            products.add(product);
        }
        products
    }
}

impl Extend<Product> for Products {
    fn extend<T: IntoIterator<Item = Product>>(&mut self, iter: T) {
        for product in iter {
            self.add(product);
        }
    }
}

impl IntoIterator for Products {
    type Item = Product;
    type IntoIter = std::vec::IntoIter<Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Products {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl Serialize for Products {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.items.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Products {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<Product>::deserialize(deserializer).map(Self::from_iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn product(sku: &str, name: &str) -> Product {
        Product::new(sku, name, Decimal::ONE).expect("valid product")
    }

    #[test]
    fn duplicate_sku_replaces_in_place() {
        let mut products = Products::new();
        products.add(product("a", "First"));
        products.add(product("b", "Second"));

        let replaced = products.add(product("a", "First, revised"));

        assert_eq!(replaced.map(|p| p.name().to_owned()).as_deref(), Some("First"));
        assert_eq!(products.len(), 2);
        assert_eq!(products.all()[0].name(), "First, revised");
        assert_eq!(products.seller_skus(), vec!["a", "b"]);
    }

    #[test]
    fn sku_keys_are_case_sensitive() {
        let products: Products = [product("abc", "Lower"), product("ABC", "Upper")]
            .into_iter()
            .collect();
        assert_eq!(products.len(), 2);
    }

    #[test]
    fn remove_keeps_remaining_order_and_index() {
        let mut products: Products = [product("a", "A"), product("b", "B"), product("c", "C")]
            .into_iter()
            .collect();

        let removed = products.remove("a").expect("present");
        assert_eq!(removed.seller_sku(), "a");
        assert_eq!(products.seller_skus(), vec!["b", "c"]);
        assert_eq!(
            products.find_by_seller_sku("c").map(Product::name),
            Some("C")
        );
        assert!(products.remove("a").is_none());
    }

    #[test]
    fn search_by_name_is_case_insensitive() {
        let products: Products = [product("a", "Magic Product"), product("b", "Rare Item")]
            .into_iter()
            .collect();
        let found = products.search_by_name("magic");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].seller_sku(), "a");
    }

    #[test]
    fn serializes_as_plain_sequence() {
        let products: Products = [product("a", "A")].into_iter().collect();
        let json = serde_json::to_value(&products).expect("serialize");
        assert!(json.is_array());
        let back: Products = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, products);
    }
}
