//! Listing document parsing.
//!
//! A listing is read record by record: a product node that fails validation
//! is reported in [`ParsedProducts::malformed`] and the rest of the document
//! is still returned.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use crate::feed::parse_error_document;
use crate::wire::{
    self, text, ProductDataNode, ProductNode, ERROR_ROOT, LISTING_PRODUCTS, PAYLOAD_PRODUCTS,
    REQUEST_ROOT, SUCCESS_ROOT,
};
use crate::{
    Brand, Categories, Category, Error, Image, Images, ListingDetails, Product, ProductData,
    Products, ValidationError,
};

/// Product node that could not be turned into a [`Product`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MalformedEntry {
    /// Zero-based position of the node in the document.
    pub index: usize,
    pub seller_sku: Option<String>,
    #[serde(serialize_with = "serialize_reason")]
    pub reason: ValidationError,
}

/// Result of reading a listing or a feed payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedProducts {
    pub products: Products,
    pub malformed: Vec<MalformedEntry>,
}

impl ParsedProducts {
    pub fn is_complete(&self) -> bool {
        self.malformed.is_empty()
    }
}

/// Parses a `GetProducts` response body.
///
/// An `ErrorResponse` document becomes [`Error::Request`].
pub fn parse_products(xml: &str) -> Result<ParsedProducts, Error> {
    match wire::root_element(xml)?.as_str() {
        SUCCESS_ROOT => Ok(collect(wire::product_fragments(xml, &LISTING_PRODUCTS)?)),
        ERROR_ROOT => Err(Error::Request(parse_error_document(xml)?)),
        other => Err(Error::Xml(format!(
            "unexpected root element '{other}' in product listing"
        ))),
    }
}

/// Reads back a create or update payload with the listing rules.
pub fn parse_feed_payload(xml: &str) -> Result<ParsedProducts, Error> {
    match wire::root_element(xml)?.as_str() {
        REQUEST_ROOT => Ok(collect(wire::product_fragments(xml, &PAYLOAD_PRODUCTS)?)),
        other => Err(Error::Xml(format!(
            "unexpected root element '{other}' in feed payload"
        ))),
    }
}

fn collect(fragments: Vec<&str>) -> ParsedProducts {
    let mut parsed = ParsedProducts::default();

    for (index, fragment) in fragments.into_iter().enumerate() {
        let (seller_sku, product) = match quick_xml::de::from_str::<ProductNode>(fragment) {
            Ok(node) => (text(node.seller_sku.clone()), product_from_node(node)),
            Err(err) => (
                text(wire::raw_text(fragment, &["Product", "SellerSku"])),
                Err(ValidationError::MalformedNode {
                    reason: err.to_string(),
                }),
            ),
        };
        match product {
            Ok(product) => {
                parsed.products.add(product);
            }
            Err(reason) => {
                warn!(
                    index,
                    seller_sku = seller_sku.as_deref().unwrap_or(""),
                    %reason,
                    "skipping malformed product entry"
                );
                parsed.malformed.push(MalformedEntry {
                    index,
                    seller_sku,
                    reason,
                });
            }
        }
    }

    parsed
}

fn product_from_node(node: ProductNode) -> Result<Product, ValidationError> {
    let seller_sku = text(node.seller_sku).ok_or(ValidationError::EmptySellerSku)?;
    let name = text(node.name).ok_or(ValidationError::MissingField { field: "Name" })?;
    let price = parse_decimal("Price", node.price)?.unwrap_or(Decimal::ZERO);

    let primary_category = text(node.primary_category)
        .map(|value| Category::parse(&value))
        .transpose()?;
    let brand = text(node.brand).map(Brand::from_name).transpose()?;
    let product_data = node
        .product_data
        .map(product_data_from_node)
        .transpose()?
        .unwrap_or_default();

    let mut product = Product::new(seller_sku, name, price)?
        .with_descriptors(
            text(node.variation),
            primary_category,
            text(node.description),
            brand,
            text(node.product_id),
            text(node.tax_class),
        )
        .with_product_data(product_data);

    if let Some(categories) = text(node.categories) {
        product.set_categories(Categories::parse_wire(&categories)?);
    }
    if let Some(images) = node.images {
        if let Some(stray) = text(images.text) {
            return Err(ValidationError::MalformedNode {
                reason: format!("<Images> holds text '{stray}' instead of <Image> elements"),
            });
        }
        product.set_images(Images::from_urls(
            images.items.into_iter().filter_map(|url| text(Some(url))),
        )?);
    }

    product.set_listing(ListingDetails {
        shop_sku: text(node.shop_sku),
        parent_sku: text(node.parent_sku),
        status: text(node.status),
        quantity: parse_count("Quantity", node.quantity)?,
        sale_price: parse_decimal("SalePrice", node.sale_price)?,
        main_image: text(node.main_image).map(Image::new).transpose()?,
    })?;

    Ok(product)
}

fn product_data_from_node(node: ProductDataNode) -> Result<ProductData, ValidationError> {
    Ok(ProductData {
        condition_type: text(node.condition_type).unwrap_or_default(),
        package_height: parse_count("PackageHeight", node.package_height)?.unwrap_or_default(),
        package_width: parse_count("PackageWidth", node.package_width)?.unwrap_or_default(),
        package_length: parse_count("PackageLength", node.package_length)?.unwrap_or_default(),
        package_weight: parse_count("PackageWeight", node.package_weight)?.unwrap_or_default(),
    })
}

fn parse_decimal(
    field: &'static str,
    value: Option<String>,
) -> Result<Option<Decimal>, ValidationError> {
    let Some(raw) = text(value) else {
        return Ok(None);
    };
    let parsed = Decimal::from_str(&raw).map_err(|_| ValidationError::InvalidNumber {
        field,
        value: raw.clone(),
    })?;
    if parsed.is_sign_negative() && !parsed.is_zero() {
        return Err(ValidationError::NegativeValue { field, value: raw });
    }
    Ok(Some(parsed))
}

/// Whole, non-negative counter. `"4.00"` is accepted, `"4.5"` is not.
fn parse_count(field: &'static str, value: Option<String>) -> Result<Option<u64>, ValidationError> {
    let Some(decimal) = parse_decimal(field, value.clone())? else {
        return Ok(None);
    };
    let invalid = || ValidationError::InvalidNumber {
        field,
        value: text(value.clone()).unwrap_or_default(),
    };
    if !decimal.fract().is_zero() {
        return Err(invalid());
    }
    decimal.to_u64().map(Some).ok_or_else(invalid)
}

fn serialize_reason<S>(reason: &ValidationError, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(reason)
}
