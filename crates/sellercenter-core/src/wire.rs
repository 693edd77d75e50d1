//! Raw XML shapes exchanged with the catalog API.
//!
//! Inbound nodes keep every field as optional text so that one bad record
//! cannot fail the whole document; typed validation happens afterwards.

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::{Deserialize, Serialize};

use crate::Error;

pub(crate) const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

pub(crate) const SUCCESS_ROOT: &str = "SuccessResponse";
pub(crate) const ERROR_ROOT: &str = "ErrorResponse";
pub(crate) const REQUEST_ROOT: &str = "Request";

/// Local name of the document's root element.
pub(crate) fn root_element(document: &str) -> Result<String, Error> {
    let mut reader = Reader::from_str(document);
    loop {
        match reader.read_event()? {
            Event::Start(element) | Event::Empty(element) => {
                return Ok(String::from_utf8_lossy(element.local_name().as_ref()).into_owned());
            }
            Event::Eof => {
                return Err(Error::Xml(String::from("document has no root element")));
            }
            _ => {}
        }
    }
}

/// Container paths holding `<Product>` elements.
pub(crate) const LISTING_PRODUCTS: [&str; 3] = [SUCCESS_ROOT, "Body", "Products"];
pub(crate) const PAYLOAD_PRODUCTS: [&str; 1] = [REQUEST_ROOT];

const PRODUCT: &[u8] = b"Product";

/// Raw `<Product>` elements found directly under `container`, in document
/// order.
///
/// Each slice is a complete element and is deserialized on its own, so a
/// structurally bad record only costs that record. The document itself
/// must still be well formed.
pub(crate) fn product_fragments<'a>(
    document: &'a str,
    container: &[&str],
) -> Result<Vec<&'a str>, Error> {
    let mut reader = Reader::from_str(document);
    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut fragments = Vec::new();

    loop {
        let start = position(&reader)?;
        match reader.read_event()? {
            Event::Start(element) => {
                if element.local_name().as_ref() == PRODUCT && inside(&path, container) {
                    reader.read_to_end(element.name())?;
                    fragments.push(&document[start..position(&reader)?]);
                } else {
                    path.push(element.local_name().as_ref().to_vec());
                }
            }
            Event::Empty(element) => {
                if element.local_name().as_ref() == PRODUCT && inside(&path, container) {
                    fragments.push(&document[start..position(&reader)?]);
                }
            }
            Event::End(_) => {
                path.pop();
            }
            Event::Eof if path.is_empty() => return Ok(fragments),
            Event::Eof => {
                return Err(Error::Xml(String::from(
                    "document ended before its elements were closed",
                )));
            }
            _ => {}
        }
    }
}

/// Text of the first element at `path` (root first), unescaped but
/// otherwise exactly as written. `None` when the element is absent or holds
/// child elements.
pub(crate) fn raw_text(document: &str, path: &[&str]) -> Option<String> {
    let mut reader = Reader::from_str(document);
    let mut open: Vec<Vec<u8>> = Vec::new();
    loop {
        match reader.read_event().ok()? {
            Event::Start(element) => {
                open.push(element.local_name().as_ref().to_vec());
                if inside(&open, path) {
                    return element_content(&mut reader);
                }
            }
            Event::End(_) => {
                open.pop();
            }
            Event::Eof => return None,
            _ => {}
        }
    }
}

fn element_content(reader: &mut Reader<&[u8]>) -> Option<String> {
    let mut value = String::new();
    loop {
        match reader.read_event().ok()? {
            Event::Text(content) => value.push_str(&content.unescape().ok()?),
            Event::CData(content) => value.push_str(&String::from_utf8_lossy(&content)),
            Event::Comment(_) => {}
            Event::End(_) => return Some(value),
            _ => return None,
        }
    }
}

fn inside(path: &[Vec<u8>], container: &[&str]) -> bool {
    path.len() == container.len()
        && path
            .iter()
            .zip(container)
            .all(|(open, expected)| open.as_slice() == expected.as_bytes())
}

fn position(reader: &Reader<&[u8]>) -> Result<usize, Error> {
    usize::try_from(reader.buffer_position())
        .map_err(|_| Error::Xml(String::from("document offset out of range")))
}

/// Trimmed text, `None` when absent or blank.
pub(crate) fn text(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}

// ============================================================================
// Inbound
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub(crate) struct HeadNode {
    pub request_id: Option<String>,
    pub request_action: Option<String>,
    pub response_type: Option<String>,
    pub timestamp: Option<String>,
    pub error_type: Option<String>,
    pub error_code: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub(crate) struct ProductNode {
    pub seller_sku: Option<String>,
    pub shop_sku: Option<String>,
    pub parent_sku: Option<String>,
    pub name: Option<String>,
    pub variation: Option<String>,
    pub primary_category: Option<String>,
    pub categories: Option<String>,
    pub description: Option<String>,
    pub brand: Option<String>,
    pub price: Option<String>,
    pub sale_price: Option<String>,
    pub product_id: Option<String>,
    pub tax_class: Option<String>,
    pub status: Option<String>,
    pub quantity: Option<String>,
    pub main_image: Option<String>,
    pub images: Option<ImageList>,
    pub product_data: Option<ProductDataNode>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ImageList {
    #[serde(rename = "Image")]
    pub items: Vec<String>,
    /// Text written straight into `<Images>` instead of `<Image>` children.
    #[serde(rename = "$text")]
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub(crate) struct ProductDataNode {
    pub condition_type: Option<String>,
    pub package_height: Option<String>,
    pub package_width: Option<String>,
    pub package_length: Option<String>,
    pub package_weight: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub(crate) struct ErrorDocument {
    pub head: HeadNode,
    pub body: ErrorBody,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ErrorBody {
    #[serde(rename = "ErrorDetail")]
    pub details: Vec<ErrorDetailNode>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub(crate) struct ErrorDetailNode {
    pub field: Option<String>,
    pub message: Option<String>,
    pub value: Option<String>,
    pub seller_sku: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub(crate) struct AcknowledgementDocument {
    pub head: HeadNode,
}

// ============================================================================
// Outbound
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename = "Request")]
pub(crate) struct ProductRequest<'a> {
    #[serde(rename = "Product")]
    pub items: Vec<ProductRecord<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ProductRecord<'a> {
    pub seller_sku: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_sku: Option<&'a str>,
    pub name: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub variation: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<String>,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<&'a str>,
    pub price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<&'a str>,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub tax_class: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_image: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<ImageRecords<'a>>,
    pub product_data: ProductDataRecord<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ImageRecords<'a> {
    #[serde(rename = "Image")]
    pub items: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ProductDataRecord<'a> {
    #[serde(skip_serializing_if = "str::is_empty")]
    pub condition_type: &'a str,
    pub package_height: u64,
    pub package_width: u64,
    pub package_length: u64,
    pub package_weight: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename = "Request")]
pub(crate) struct RemoveRequest<'a> {
    #[serde(rename = "Product")]
    pub items: Vec<RemoveRecord<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RemoveRecord<'a> {
    pub seller_sku: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename = "Request")]
pub(crate) struct ImageRequest<'a> {
    #[serde(rename = "ProductImage")]
    pub items: Vec<ProductImageRecord<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ProductImageRecord<'a> {
    pub seller_sku: &'a str,
    pub images: ImageRecords<'a>,
}
