//! # Feeds
//!
//! Mutations are submitted as feeds: an XML payload tagged with an action.
//! The provider answers with an acknowledgement carrying a tracking id, or
//! with an error document.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`FeedAction`] | Wire action of a feed |
//! | [`FeedRequest`] | Payload to submit, one variant per action |
//! | [`FeedResponse`] | Accepted feed acknowledgement |
//! | [`ErrorResponse`] | Provider error document |

mod request;
mod response;

pub use request::{FeedAction, FeedRequest};
pub use response::{parse_feed_response, ErrorDetail, ErrorResponse, ErrorType, FeedResponse};

pub(crate) use response::parse_error_document;
