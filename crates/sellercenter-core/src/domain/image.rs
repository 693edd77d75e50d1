use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Image reference attached to a product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Image(String);

impl Image {
    pub fn new(url: impl Into<String>) -> Result<Self, ValidationError> {
        let url: String = url.into();
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyImageUrl);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn url(&self) -> &str {
        &self.0
    }
}

impl Display for Image {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Image {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Image {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Image> for String {
    fn from(value: Image) -> Self {
        value.0
    }
}

/// Ordered image list; duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Images(Vec<Image>);

impl Images {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, image: Image) {
        self.0.push(image);
    }

    pub fn add_many(&mut self, images: impl IntoIterator<Item = Image>) {
        self.0.extend(images);
    }

    /// Builds a list from raw URLs, failing on the first blank one.
    pub fn from_urls<I, S>(urls: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        urls.into_iter()
            .map(Image::new)
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    pub fn all(&self) -> &[Image] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Image> {
        self.0.iter()
    }

    pub fn first(&self) -> Option<&Image> {
        self.0.first()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Image> for Images {
    fn from_iter<T: IntoIterator<Item = Image>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Images {
    type Item = Image;
    type IntoIter = std::vec::IntoIter<Image>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Images {
    type Item = &'a Image;
    type IntoIter = std::slice::Iter<'a, Image>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Image lists keyed by the product they attach to, in insertion order.
///
/// Keys are passed to the provider untouched; inserting an existing key
/// replaces its list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductImages {
    entries: Vec<(String, Images)>,
    index: HashMap<String, usize>,
}

impl ProductImages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, seller_sku: impl Into<String>, images: Images) {
        let seller_sku: String = seller_sku.into();
        match self.index.get(&seller_sku) {
            Some(&position) => self.entries[position].1 = images,
            None => {
                self.index.insert(seller_sku.clone(), self.entries.len());
                self.entries.push((seller_sku, images));
            }
        }
    }

    /// Convenience for raw URL lists.
    pub fn insert_urls<I, S>(
        &mut self,
        seller_sku: impl Into<String>,
        urls: I,
    ) -> Result<(), ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(seller_sku, Images::from_urls(urls)?);
        Ok(())
    }

    pub fn get(&self, seller_sku: &str) -> Option<&Images> {
        self.index
            .get(seller_sku)
            .map(|&position| &self.entries[position].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Images)> {
        self.entries
            .iter()
            .map(|(seller_sku, images)| (seller_sku.as_str(), images))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(seller_sku, _)| seller_sku.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
