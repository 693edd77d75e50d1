use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::wire::{self, text, AcknowledgementDocument, ErrorDocument, ERROR_ROOT, SUCCESS_ROOT};
use crate::{parse_provider_timestamp, Error};

const ERROR_MESSAGE: [&str; 3] = [ERROR_ROOT, "Head", "ErrorMessage"];

/// Acknowledgement of an accepted feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedResponse {
    request_id: String,
    request_action: String,
    response_type: String,
    timestamp: String,
    parsed_timestamp: Option<OffsetDateTime>,
    seller_skus: Vec<String>,
}

impl FeedResponse {
    /// Feed tracking id.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn request_action(&self) -> &str {
        &self.request_action
    }

    pub fn response_type(&self) -> &str {
        &self.response_type
    }

    /// Timestamp as sent by the provider.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// `None` when the provider format was not recognised.
    pub fn parsed_timestamp(&self) -> Option<OffsetDateTime> {
        self.parsed_timestamp
    }

    /// SKUs that were part of the submitted payload.
    pub fn seller_skus(&self) -> &[String] {
        &self.seller_skus
    }
}

/// Side the provider blames for an error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ErrorType {
    Sender,
    Internal,
    Other(String),
}

impl ErrorType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Sender => "Sender",
            Self::Internal => "Internal",
            Self::Other(value) => value,
        }
    }
}

impl From<&str> for ErrorType {
    fn from(value: &str) -> Self {
        match value {
            "Sender" => Self::Sender,
            "Internal" => Self::Internal,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for ErrorType {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<ErrorType> for String {
    fn from(value: ErrorType) -> Self {
        value.as_str().to_owned()
    }
}

impl Display for ErrorType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-record detail from an error document body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub field: Option<String>,
    pub message: Option<String>,
    pub value: Option<String>,
    pub seller_sku: Option<String>,
}

/// Provider error document. Displays as the provider message, verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    action: String,
    code: u32,
    error_type: ErrorType,
    message: String,
    details: Vec<ErrorDetail>,
}

impl ErrorResponse {
    pub fn action(&self) -> &str {
        &self.action
    }

    pub const fn code(&self) -> u32 {
        self.code
    }

    pub fn error_type(&self) -> &ErrorType {
        &self.error_type
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> &[ErrorDetail] {
        &self.details
    }
}

impl Display for ErrorResponse {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ErrorResponse {}

/// Interprets the provider's answer to a submitted feed.
///
/// A success document becomes a [`FeedResponse`]; an error document becomes
/// [`Error::Feed`].
pub fn parse_feed_response(xml: &str, submitted_skus: Vec<String>) -> Result<FeedResponse, Error> {
    match wire::root_element(xml)?.as_str() {
        SUCCESS_ROOT => {
            let document: AcknowledgementDocument = quick_xml::de::from_str(xml)?;
            let head = document.head;
            let timestamp = text(head.timestamp).unwrap_or_default();

            let response = FeedResponse {
                request_id: text(head.request_id).unwrap_or_default(),
                request_action: text(head.request_action).unwrap_or_default(),
                response_type: text(head.response_type).unwrap_or_default(),
                parsed_timestamp: parse_provider_timestamp(&timestamp),
                timestamp,
                seller_skus: submitted_skus,
            };

            info!(
                action = %response.request_action,
                request_id = %response.request_id,
                skus = response.seller_skus.len(),
                "feed acknowledged"
            );
            Ok(response)
        }
        ERROR_ROOT => Err(Error::Feed(parse_error_document(xml)?)),
        other => Err(Error::Xml(format!(
            "unexpected root element '{other}' in feed response"
        ))),
    }
}

pub(crate) fn parse_error_document(xml: &str) -> Result<ErrorResponse, Error> {
    let document: ErrorDocument = quick_xml::de::from_str(xml)?;
    let head = document.head;

    let code = match text(head.error_code) {
        Some(raw) => raw.parse::<u32>().unwrap_or_else(|_| {
            warn!(code = %raw, "unrecognised provider error code");
            0
        }),
        None => 0,
    };

    let response = ErrorResponse {
        action: text(head.request_action).unwrap_or_default(),
        code,
        error_type: ErrorType::from(text(head.error_type).unwrap_or_default()),
        message: wire::raw_text(xml, &ERROR_MESSAGE)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_default(),
        details: document
            .body
            .details
            .into_iter()
            .map(|detail| ErrorDetail {
                field: text(detail.field),
                message: text(detail.message),
                value: text(detail.value),
                seller_sku: text(detail.seller_sku),
            })
            .collect(),
    };

    warn!(
        action = %response.action,
        code = response.code,
        error_type = %response.error_type,
        "provider rejected request"
    );
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACKNOWLEDGED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<SuccessResponse>
  <Head>
    <RequestId>cb106552-87f3-450b-aa8b-412246a24b34</RequestId>
    <RequestAction>ProductCreate</RequestAction>
    <ResponseType></ResponseType>
    <Timestamp>2016-06-22T04:40:14+0200</Timestamp>
  </Head>
  <Body/>
</SuccessResponse>"#;

    const REJECTED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ErrorResponse>
  <Head>
    <RequestAction>ProductCreate</RequestAction>
    <ErrorType>Sender</ErrorType>
    <ErrorCode>125</ErrorCode>
    <ErrorMessage>E0125: Test Error</ErrorMessage>
  </Head>
  <Body>
    <ErrorDetail>
      <Field>Price</Field>
      <Message>Field must contain a positive number</Message>
      <Value>-1</Value>
      <SellerSku>sku-1</SellerSku>
    </ErrorDetail>
  </Body>
</ErrorResponse>"#;

    #[test]
    fn acknowledgement_carries_feed_id_and_skus() {
        let response = parse_feed_response(ACKNOWLEDGED, vec![String::from("sku-1")])
            .expect("acknowledged");

        assert_eq!(response.request_id(), "cb106552-87f3-450b-aa8b-412246a24b34");
        assert_eq!(response.request_action(), "ProductCreate");
        assert_eq!(response.response_type(), "");
        assert_eq!(response.timestamp(), "2016-06-22T04:40:14+0200");
        assert_eq!(
            response.parsed_timestamp().map(|value| value.unix_timestamp()),
            Some(1_466_563_214)
        );
        assert_eq!(response.seller_skus(), ["sku-1"]);
    }

    #[test]
    fn error_document_displays_provider_message() {
        let err = parse_feed_response(REJECTED, Vec::new()).expect_err("must fail");
        assert_eq!(err.to_string(), "E0125: Test Error");

        let response = err.error_response().expect("error document");
        assert_eq!(response.code(), 125);
        assert_eq!(response.error_type(), &ErrorType::Sender);
        assert_eq!(response.action(), "ProductCreate");
        assert_eq!(response.details().len(), 1);
        assert_eq!(response.details()[0].seller_sku.as_deref(), Some("sku-1"));
    }

    #[test]
    fn unknown_error_type_and_code_are_kept_lenient() {
        let xml = r#"<ErrorResponse><Head><ErrorType>Throttle</ErrorType>
<ErrorCode>n/a</ErrorCode><ErrorMessage>slow down</ErrorMessage></Head></ErrorResponse>"#;

        let response = parse_error_document(xml).expect("error document");
        assert_eq!(response.code(), 0);
        assert_eq!(response.error_type(), &ErrorType::Other(String::from("Throttle")));
        assert_eq!(response.to_string(), "slow down");
    }

    #[test]
    fn error_message_is_kept_verbatim() {
        let xml = r#"<ErrorResponse><Head><ErrorCode>5</ErrorCode>
<ErrorMessage>  E005: Invalid Request Format &amp; encoding
</ErrorMessage></Head></ErrorResponse>"#;

        let response = parse_error_document(xml).expect("error document");
        assert_eq!(
            response.message(),
            "  E005: Invalid Request Format & encoding\n"
        );
    }

    #[test]
    fn blank_error_message_is_absent() {
        let xml = "<ErrorResponse><Head><ErrorMessage>   </ErrorMessage></Head></ErrorResponse>";

        let response = parse_error_document(xml).expect("error document");
        assert_eq!(response.message(), "");
    }

    #[test]
    fn non_xml_body_is_rejected() {
        let err = parse_feed_response("Bad Gateway", Vec::new()).expect_err("must fail");
        assert!(matches!(err, Error::Xml(_)));
    }
}
