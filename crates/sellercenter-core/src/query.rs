//! Product listing query parameters.
//!
//! [`ProductQuery`] gathers every criterion accepted by the `GetProducts`
//! action. Each field is optional and independent; [`ProductQuery::to_parameters`]
//! turns the populated ones into the flat wire parameter map.
//!
//! | Field | Wire name | Encoding |
//! |-------|-----------|----------|
//! | `created_after` | `CreatedAfter` | `YYYY-MM-DD HH:MM:SS` |
//! | `created_before` | `CreatedBefore` | `YYYY-MM-DD HH:MM:SS` |
//! | `updated_after` | `UpdatedAfter` | `YYYY-MM-DD HH:MM:SS` |
//! | `updated_before` | `UpdatedBefore` | `YYYY-MM-DD HH:MM:SS` |
//! | `search` | `Search` | verbatim |
//! | `filter` | `Filter` | see [`ProductFilter`] |
//! | `limit` | `Limit` | decimal |
//! | `offset` | `Offset` | decimal |
//! | `seller_skus` | `SkuSellerList` | JSON array |

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

use crate::domain::format_filter_timestamp;
use crate::Error;

/// Listing status filter.
///
/// Unknown values are kept in [`ProductFilter::Other`] and sent as-is; the
/// provider decides whether they are valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProductFilter {
    All,
    Live,
    Inactive,
    Deleted,
    ImageMissing,
    Pending,
    Rejected,
    SoldOut,
    Other(String),
}

impl ProductFilter {
    pub const KNOWN: [Self; 8] = [
        Self::All,
        Self::Live,
        Self::Inactive,
        Self::Deleted,
        Self::ImageMissing,
        Self::Pending,
        Self::Rejected,
        Self::SoldOut,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Live => "live",
            Self::Inactive => "inactive",
            Self::Deleted => "deleted",
            Self::ImageMissing => "image-missing",
            Self::Pending => "pending",
            Self::Rejected => "rejected",
            Self::SoldOut => "sold-out",
            Self::Other(value) => value,
        }
    }

    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl Display for ProductFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ProductFilter {
    fn from(value: &str) -> Self {
        match value {
            "all" => Self::All,
            "live" => Self::Live,
            "inactive" => Self::Inactive,
            "deleted" => Self::Deleted,
            "image-missing" => Self::ImageMissing,
            "pending" => Self::Pending,
            "rejected" => Self::Rejected,
            "sold-out" => Self::SoldOut,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for ProductFilter {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<ProductFilter> for String {
    fn from(value: ProductFilter) -> Self {
        value.as_str().to_owned()
    }
}

/// Criteria for a `GetProducts` call. The default value lists everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    /// Only products created after this instant.
    pub created_after: Option<PrimitiveDateTime>,
    /// Only products created before this instant.
    pub created_before: Option<PrimitiveDateTime>,
    /// Only products updated after this instant.
    pub updated_after: Option<PrimitiveDateTime>,
    /// Only products updated before this instant.
    pub updated_before: Option<PrimitiveDateTime>,
    /// Free-text search on name and SKU, evaluated remotely.
    pub search: Option<String>,
    /// Listing status filter.
    pub filter: Option<ProductFilter>,
    /// Page size.
    pub limit: Option<u32>,
    /// Number of records to skip.
    pub offset: Option<u32>,
    /// Direct lookup by seller SKU. Must not be empty when set.
    pub seller_skus: Option<Vec<String>>,
}

impl ProductQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct lookup query; rejects an empty list, which would otherwise
    /// match the whole catalog.
    pub fn by_seller_skus<I, S>(seller_skus: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let query = Self::new().with_seller_skus(seller_skus);
        query.validate()?;
        Ok(query)
    }

    pub fn with_created_after(mut self, value: PrimitiveDateTime) -> Self {
        self.created_after = Some(value);
        self
    }

    pub fn with_created_before(mut self, value: PrimitiveDateTime) -> Self {
        self.created_before = Some(value);
        self
    }

    pub fn with_updated_after(mut self, value: PrimitiveDateTime) -> Self {
        self.updated_after = Some(value);
        self
    }

    pub fn with_updated_before(mut self, value: PrimitiveDateTime) -> Self {
        self.updated_before = Some(value);
        self
    }

    pub fn with_search(mut self, value: impl Into<String>) -> Self {
        self.search = Some(value.into());
        self
    }

    pub fn with_filter(mut self, value: impl Into<ProductFilter>) -> Self {
        self.filter = Some(value.into());
        self
    }

    pub fn with_limit(mut self, value: u32) -> Self {
        self.limit = Some(value);
        self
    }

    pub fn with_offset(mut self, value: u32) -> Self {
        self.offset = Some(value);
        self
    }

    pub fn with_seller_skus<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.seller_skus = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        if let Some(seller_skus) = &self.seller_skus {
            if seller_skus.is_empty() {
                return Err(Error::invalid_argument(
                    "seller sku list must contain at least one sku",
                ));
            }
        }
        Ok(())
    }

    /// Wire parameters for the populated criteria, sorted by name.
    pub fn to_parameters(&self) -> Result<BTreeMap<String, String>, Error> {
        self.validate()?;

        let mut parameters = BTreeMap::new();
        let timestamps = [
            ("CreatedAfter", self.created_after),
            ("CreatedBefore", self.created_before),
            ("UpdatedAfter", self.updated_after),
            ("UpdatedBefore", self.updated_before),
        ];
        for (name, value) in timestamps {
            if let Some(value) = value {
                parameters.insert(name.to_owned(), format_filter_timestamp(value));
            }
        }

        if let Some(search) = &self.search {
            parameters.insert(String::from("Search"), search.clone());
        }
        if let Some(filter) = &self.filter {
            parameters.insert(String::from("Filter"), filter.as_str().to_owned());
        }
        if let Some(limit) = self.limit {
            parameters.insert(String::from("Limit"), limit.to_string());
        }
        if let Some(offset) = self.offset {
            parameters.insert(String::from("Offset"), offset.to_string());
        }
        if let Some(seller_skus) = &self.seller_skus {
            parameters.insert(
                String::from("SkuSellerList"),
                serde_json::to_string(seller_skus)?,
            );
        }

        Ok(parameters)
    }
}
