use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::wire::{
    ImageRecords, ImageRequest, ProductDataRecord, ProductImageRecord, ProductRecord,
    ProductRequest, RemoveRecord, RemoveRequest, XML_DECLARATION,
};
use crate::{Brand, Error, Image, Product, ProductImages, Products};

/// Wire action of a feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedAction {
    ProductCreate,
    ProductUpdate,
    ProductRemove,
    Image,
}

impl FeedAction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ProductCreate => "ProductCreate",
            Self::ProductUpdate => "ProductUpdate",
            Self::ProductRemove => "ProductRemove",
            Self::Image => "Image",
        }
    }
}

impl Display for FeedAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Feed payload. The variant alone decides the action.
#[derive(Debug, Clone, Copy)]
pub enum FeedRequest<'a> {
    ProductCreate(&'a Products),
    ProductUpdate(&'a Products),
    ProductRemove(&'a Products),
    Image(&'a ProductImages),
}

impl FeedRequest<'_> {
    pub const fn action(&self) -> FeedAction {
        match self {
            Self::ProductCreate(_) => FeedAction::ProductCreate,
            Self::ProductUpdate(_) => FeedAction::ProductUpdate,
            Self::ProductRemove(_) => FeedAction::ProductRemove,
            Self::Image(_) => FeedAction::Image,
        }
    }

    /// SKUs in payload order.
    pub fn seller_skus(&self) -> Vec<String> {
        match self {
            Self::ProductCreate(products)
            | Self::ProductUpdate(products)
            | Self::ProductRemove(products) => products.seller_skus(),
            Self::Image(images) => images.keys().map(str::to_owned).collect(),
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        let empty = match self {
            Self::ProductCreate(products)
            | Self::ProductUpdate(products)
            | Self::ProductRemove(products) => products.is_empty(),
            Self::Image(images) => images.is_empty(),
        };
        if empty {
            return Err(Error::invalid_argument(format!(
                "{} feed must contain at least one record",
                self.action()
            )));
        }
        Ok(())
    }

    /// Serializes the payload, XML declaration included.
    pub fn to_xml(&self) -> Result<String, Error> {
        self.validate()?;

        match self {
            Self::ProductCreate(products) | Self::ProductUpdate(products) => {
                serialize(&ProductRequest {
                    items: products.iter().map(product_record).collect(),
                })
            }
            Self::ProductRemove(products) => serialize(&RemoveRequest {
                items: products
                    .iter()
                    .map(|product| RemoveRecord {
                        seller_sku: product.seller_sku(),
                    })
                    .collect(),
            }),
            Self::Image(images) => serialize(&ImageRequest {
                items: images
                    .iter()
                    .map(|(seller_sku, images)| ProductImageRecord {
                        seller_sku,
                        images: ImageRecords {
                            items: images.iter().map(Image::url).collect(),
                        },
                    })
                    .collect(),
            }),
        }
    }
}

fn product_record(product: &Product) -> ProductRecord<'_> {
    let listing = product.listing();
    let data = product.product_data();

    ProductRecord {
        seller_sku: product.seller_sku(),
        parent_sku: listing.parent_sku.as_deref(),
        name: product.name(),
        variation: product.variation(),
        primary_category: product.primary_category().map(ToString::to_string),
        categories: (!product.categories().is_empty()).then(|| product.categories().to_wire()),
        description: product.description(),
        brand: product.brand().map(Brand::name),
        price: product.price().to_string(),
        sale_price: listing.sale_price.map(|price| price.to_string()),
        product_id: product.product_id(),
        tax_class: product.tax_class(),
        status: listing.status.as_deref(),
        quantity: listing.quantity,
        main_image: listing.main_image.as_ref().map(Image::url),
        images: (!product.images().is_empty()).then(|| ImageRecords {
            items: product.images().iter().map(Image::url).collect(),
        }),
        product_data: ProductDataRecord {
            condition_type: &data.condition_type,
            package_height: data.package_height,
            package_width: data.package_width,
            package_length: data.package_length,
            package_weight: data.package_weight,
        },
    }
}

fn serialize<T: Serialize>(payload: &T) -> Result<String, Error> {
    let body = quick_xml::se::to_string(payload).map_err(|e| Error::Xml(e.to_string()))?;
    Ok(format!("{XML_DECLARATION}{body}"))
}
