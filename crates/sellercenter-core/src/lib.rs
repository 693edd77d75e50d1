//! # Seller Center Core
//!
//! Client-side marshalling for a marketplace catalog API that speaks XML and
//! accepts mutations as feeds.
//!
//! ## Overview
//!
//! - **Domain models** for products, categories, brands and images
//! - **Query builder** turning listing criteria into wire parameters
//! - **Response parser** reading listings record by record
//! - **Feed builder** serializing create, update, remove and image payloads
//! - **Feed response handler** for acknowledgements and provider errors
//! - **Transport seam** so the HTTP stack and request signing stay outside
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Account and endpoint settings |
//! | [`domain`] | Domain models (Product, Products, Category, Brand, Image) |
//! | [`error`] | Error types |
//! | [`feed`] | Feed payloads and acknowledgements |
//! | [`http_client`] | HTTP client abstraction |
//! | [`manager`] | Product endpoints |
//! | [`query`] | Listing criteria |
//! | [`response`] | Listing parser |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sellercenter_core::{Configuration, ProductManager, ProductFilter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let manager = ProductManager::new(Configuration::from_env()?);
//!
//!     let listing = manager.filter_products(ProductFilter::Live).await?;
//!     for product in &listing.products {
//!         println!("{} {}", product.seller_sku(), product.name());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Provider error documents surface as [`Error::Feed`] or [`Error::Request`]
//! and display the provider message verbatim:
//!
//! ```rust
//! use sellercenter_core::Error;
//!
//! fn report(error: &Error) {
//!     match error.error_response() {
//!         Some(response) => eprintln!("rejected ({}): {}", response.code(), response),
//!         None => eprintln!("{error}"),
//!     }
//! }
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod feed;
pub mod http_client;
pub mod manager;
pub mod query;
pub mod response;

mod wire;

pub use config::Configuration;

pub use domain::{
    format_filter_timestamp, format_request_timestamp, parse_filter_timestamp,
    parse_provider_timestamp, Brand, Categories, Category, Image, Images, ListingDetails, Product,
    ProductData, ProductImages, Products,
};

pub use error::{Error, ValidationError};

pub use feed::{
    parse_feed_response, ErrorDetail, ErrorResponse, ErrorType, FeedAction, FeedRequest,
    FeedResponse,
};

pub use http_client::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, NoopHttpClient,
    ReqwestHttpClient,
};

pub use manager::ProductManager;

pub use query::{ProductFilter, ProductQuery};

pub use response::{parse_feed_payload, parse_products, MalformedEntry, ParsedProducts};
