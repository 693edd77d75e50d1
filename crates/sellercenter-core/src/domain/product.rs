use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Brand, Categories, Category, Image, Images, ValidationError};

/// Condition and package measurements embedded in a product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductData {
    pub condition_type: String,
    pub package_height: u64,
    pub package_width: u64,
    pub package_length: u64,
    pub package_weight: u64,
}

impl ProductData {
    pub fn new(
        condition_type: impl Into<String>,
        package_height: u64,
        package_width: u64,
        package_length: u64,
        package_weight: u64,
    ) -> Self {
        Self {
            condition_type: condition_type.into(),
            package_height,
            package_width,
            package_length,
            package_weight,
        }
    }
}

/// Marketplace-side state reported by listing responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingDetails {
    pub shop_sku: Option<String>,
    pub parent_sku: Option<String>,
    pub status: Option<String>,
    pub quantity: Option<u64>,
    pub sale_price: Option<Decimal>,
    pub main_image: Option<Image>,
}

/// Single catalog item.
///
/// Identity and descriptive fields are fixed once built; categories, images
/// and listing details can be replaced afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProductFields")]
pub struct Product {
    seller_sku: String,
    name: String,
    variation: String,
    primary_category: Option<Category>,
    description: String,
    brand: Option<Brand>,
    price: Decimal,
    product_id: Option<String>,
    tax_class: String,
    product_data: ProductData,
    categories: Categories,
    images: Images,
    listing: ListingDetails,
}

impl Product {
    #[allow(clippy::too_many_arguments)]
    pub fn from_basic_data(
        seller_sku: impl Into<String>,
        name: impl Into<String>,
        variation: impl Into<String>,
        primary_category: Category,
        description: impl Into<String>,
        brand: Brand,
        price: Decimal,
        product_id: Option<String>,
        tax_class: impl Into<String>,
        product_data: ProductData,
    ) -> Result<Self, ValidationError> {
        let mut product = Self::new(seller_sku, name, price)?;
        product.variation = variation.into();
        product.primary_category = Some(primary_category);
        product.description = description.into();
        product.brand = Some(brand);
        product.product_id = product_id.filter(|id| !id.trim().is_empty());
        product.tax_class = tax_class.into();
        product.product_data = product_data;
        Ok(product)
    }

    /// Minimal product carrying only the required fields.
    pub fn new(
        seller_sku: impl Into<String>,
        name: impl Into<String>,
        price: Decimal,
    ) -> Result<Self, ValidationError> {
        let seller_sku: String = seller_sku.into();
        if seller_sku.trim().is_empty() {
            return Err(ValidationError::EmptySellerSku);
        }
        let name: String = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "Name" });
        }
        validate_price("Price", price)?;

        Ok(Self {
            seller_sku,
            name,
            variation: String::new(),
            primary_category: None,
            description: String::new(),
            brand: None,
            price,
            product_id: None,
            tax_class: String::new(),
            product_data: ProductData::default(),
            categories: Categories::new(),
            images: Images::new(),
            listing: ListingDetails::default(),
        })
    }

    pub(crate) fn with_descriptors(
        mut self,
        variation: Option<String>,
        primary_category: Option<Category>,
        description: Option<String>,
        brand: Option<Brand>,
        product_id: Option<String>,
        tax_class: Option<String>,
    ) -> Self {
        self.variation = variation.unwrap_or_default();
        self.primary_category = primary_category;
        self.description = description.unwrap_or_default();
        self.brand = brand;
        self.product_id = product_id;
        self.tax_class = tax_class.unwrap_or_default();
        self
    }

    pub(crate) fn with_product_data(mut self, product_data: ProductData) -> Self {
        self.product_data = product_data;
        self
    }

    pub fn seller_sku(&self) -> &str {
        &self.seller_sku
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variation(&self) -> &str {
        &self.variation
    }

    pub fn primary_category(&self) -> Option<&Category> {
        self.primary_category.as_ref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn brand(&self) -> Option<&Brand> {
        self.brand.as_ref()
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn product_id(&self) -> Option<&str> {
        self.product_id.as_deref()
    }

    pub fn tax_class(&self) -> &str {
        &self.tax_class
    }

    pub fn product_data(&self) -> &ProductData {
        &self.product_data
    }

    pub fn categories(&self) -> &Categories {
        &self.categories
    }

    pub fn set_categories(&mut self, categories: Categories) {
        self.categories = categories;
    }

    pub fn add_category(&mut self, category: Category) -> bool {
        self.categories.add(category)
    }

    pub fn images(&self) -> &Images {
        &self.images
    }

    pub fn images_mut(&mut self) -> &mut Images {
        &mut self.images
    }

    pub fn set_images(&mut self, images: Images) {
        self.images = images;
    }

    pub fn listing(&self) -> &ListingDetails {
        &self.listing
    }

    pub fn set_listing(&mut self, listing: ListingDetails) -> Result<(), ValidationError> {
        if let Some(sale_price) = listing.sale_price {
            validate_price("SalePrice", sale_price)?;
        }
        self.listing = listing;
        Ok(())
    }
}

/// Serialized shape of [`Product`]; deserialization goes through the same
/// checks as [`Product::new`] and [`Product::set_listing`].
#[derive(Deserialize)]
struct ProductFields {
    seller_sku: String,
    name: String,
    #[serde(default)]
    variation: String,
    #[serde(default)]
    primary_category: Option<Category>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    brand: Option<Brand>,
    price: Decimal,
    #[serde(default)]
    product_id: Option<String>,
    #[serde(default)]
    tax_class: String,
    #[serde(default)]
    product_data: ProductData,
    #[serde(default)]
    categories: Categories,
    #[serde(default)]
    images: Images,
    #[serde(default)]
    listing: ListingDetails,
}

impl TryFrom<ProductFields> for Product {
    type Error = ValidationError;

    fn try_from(fields: ProductFields) -> Result<Self, Self::Error> {
        let mut product = Self::new(fields.seller_sku, fields.name, fields.price)?;
        product.variation = fields.variation;
        product.primary_category = fields.primary_category;
        product.description = fields.description;
        product.brand = fields.brand;
        product.product_id = fields.product_id;
        product.tax_class = fields.tax_class;
        product.product_data = fields.product_data;
        product.categories = fields.categories;
        product.images = fields.images;
        product.set_listing(fields.listing)?;
        Ok(product)
    }
}

fn validate_price(field: &'static str, value: Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::NegativeValue {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}
