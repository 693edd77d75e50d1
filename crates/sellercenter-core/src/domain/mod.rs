//! # Domain Models
//!
//! Catalog value objects and the product aggregate.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Category`] | Category addressed by name or numeric id |
//! | [`Categories`] | Ordered set of additional categories |
//! | [`Brand`] | Brand name |
//! | [`Image`] / [`Images`] | Image URL and ordered image list |
//! | [`ProductImages`] | Image lists keyed by seller SKU (add-image input) |
//! | [`ProductData`] | Condition and package measurements |
//! | [`Product`] | Catalog item |
//! | [`Products`] | Ordered collection keyed by seller SKU |
//!
//! Constructors validate what the provider would otherwise reject outright
//! (blank SKUs, blank image URLs, negative prices). Everything else is passed
//! through and left for the remote service to judge.

mod brand;
mod category;
mod image;
mod product;
mod products;
mod timestamp;

pub use brand::Brand;
pub use category::{Categories, Category};
pub use image::{Image, Images, ProductImages};
pub use product::{ListingDetails, Product, ProductData};
pub use products::Products;
pub use timestamp::{
    format_filter_timestamp, format_request_timestamp, parse_filter_timestamp,
    parse_provider_timestamp,
};
