use std::collections::BTreeMap;
use std::sync::Arc;

use time::{OffsetDateTime, PrimitiveDateTime};
use tracing::debug;

use crate::feed::{parse_feed_response, FeedRequest, FeedResponse};
use crate::http_client::{HttpClient, HttpRequest, HttpResponse, ReqwestHttpClient};
use crate::query::{ProductFilter, ProductQuery};
use crate::response::{parse_products, ParsedProducts};
use crate::{format_request_timestamp, Configuration, Error, ProductImages, Products};

const GET_PRODUCTS: &str = "GetProducts";

/// Product endpoints of the catalog API.
///
/// Each call sends exactly one request and returns the parsed answer; the
/// manager keeps no state between calls.
pub struct ProductManager {
    configuration: Configuration,
    http_client: Arc<dyn HttpClient>,
}

impl ProductManager {
    pub fn new(configuration: Configuration) -> Self {
        Self::with_http_client(configuration, Arc::new(ReqwestHttpClient::new()))
    }

    pub fn with_http_client(configuration: Configuration, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            configuration,
            http_client,
        }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub async fn get_all_products(&self) -> Result<ParsedProducts, Error> {
        self.get_products_from_parameters(ProductQuery::new()).await
    }

    pub async fn get_products_created_after(
        &self,
        value: PrimitiveDateTime,
    ) -> Result<ParsedProducts, Error> {
        self.get_products_from_parameters(ProductQuery::new().with_created_after(value))
            .await
    }

    pub async fn get_products_created_before(
        &self,
        value: PrimitiveDateTime,
    ) -> Result<ParsedProducts, Error> {
        self.get_products_from_parameters(ProductQuery::new().with_created_before(value))
            .await
    }

    pub async fn get_products_updated_after(
        &self,
        value: PrimitiveDateTime,
    ) -> Result<ParsedProducts, Error> {
        self.get_products_from_parameters(ProductQuery::new().with_updated_after(value))
            .await
    }

    pub async fn get_products_updated_before(
        &self,
        value: PrimitiveDateTime,
    ) -> Result<ParsedProducts, Error> {
        self.get_products_from_parameters(ProductQuery::new().with_updated_before(value))
            .await
    }

    /// Remote free-text search on name and SKU.
    pub async fn search_products(&self, search: impl Into<String>) -> Result<ParsedProducts, Error> {
        self.get_products_from_parameters(ProductQuery::new().with_search(search))
            .await
    }

    /// Unrecognised filter values are sent as given.
    pub async fn filter_products(
        &self,
        filter: impl Into<ProductFilter>,
    ) -> Result<ParsedProducts, Error> {
        self.get_products_from_parameters(ProductQuery::new().with_filter(filter))
            .await
    }

    /// Fails with [`Error::InvalidArgument`] for an empty list.
    pub async fn get_products_by_seller_sku<I, S>(
        &self,
        seller_skus: I,
    ) -> Result<ParsedProducts, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let query = ProductQuery::by_seller_skus(seller_skus)?;
        self.get_products_from_parameters(query).await
    }

    pub async fn get_products_from_parameters(
        &self,
        query: ProductQuery,
    ) -> Result<ParsedProducts, Error> {
        let mut parameters = self.base_parameters(GET_PRODUCTS);
        parameters.extend(query.to_parameters()?);

        let response = self.dispatch(GET_PRODUCTS, &parameters, None).await?;
        check_status(&response, parse_products(&response.body))
    }

    pub async fn product_create(&self, products: &Products) -> Result<FeedResponse, Error> {
        self.submit(FeedRequest::ProductCreate(products)).await
    }

    pub async fn product_update(&self, products: &Products) -> Result<FeedResponse, Error> {
        self.submit(FeedRequest::ProductUpdate(products)).await
    }

    pub async fn product_remove(&self, products: &Products) -> Result<FeedResponse, Error> {
        self.submit(FeedRequest::ProductRemove(products)).await
    }

    pub async fn add_image(&self, images: &ProductImages) -> Result<FeedResponse, Error> {
        self.submit(FeedRequest::Image(images)).await
    }

    /// Serializes and posts one feed. Nothing is sent when the payload is
    /// empty.
    pub async fn submit(&self, request: FeedRequest<'_>) -> Result<FeedResponse, Error> {
        let body = request.to_xml()?;
        let action = request.action().as_str();
        let parameters = self.base_parameters(action);

        let response = self.dispatch(action, &parameters, Some(body)).await?;
        check_status(
            &response,
            parse_feed_response(&response.body, request.seller_skus()),
        )
    }

    fn base_parameters(&self, action: &str) -> BTreeMap<String, String> {
        BTreeMap::from([
            (String::from("Action"), action.to_owned()),
            (String::from("Format"), String::from("XML")),
            (
                String::from("Timestamp"),
                format_request_timestamp(OffsetDateTime::now_utc()),
            ),
            (
                String::from("UserID"),
                self.configuration.username().to_owned(),
            ),
            (
                String::from("Version"),
                self.configuration.version().to_owned(),
            ),
        ])
    }

    fn build_url(&self, parameters: &BTreeMap<String, String>) -> String {
        let query = parameters
            .iter()
            .map(|(name, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(name),
                    urlencoding::encode(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&");
        format!("{}/?{query}", self.configuration.endpoint())
    }

    /// Feeds are posted with an XML body; listings are plain GETs.
    async fn dispatch(
        &self,
        action: &str,
        parameters: &BTreeMap<String, String>,
        body: Option<String>,
    ) -> Result<HttpResponse, Error> {
        let url = self.build_url(parameters);
        let request = match body {
            Some(body) => HttpRequest::post(url)
                .with_header("Content-Type", "application/xml")
                .with_body(body),
            None => HttpRequest::get(url),
        }
        .with_timeout_ms(self.configuration.timeout_ms());

        debug!(
            action,
            method = request.method.as_str(),
            parameters = parameters.len(),
            "dispatching catalog request"
        );

        Ok(self.http_client.execute(request).await?)
    }
}

/// Provider error documents win over the status code; any other failure on a
/// non-2xx answer is reported as an unexpected status.
fn check_status<T>(response: &HttpResponse, parsed: Result<T, Error>) -> Result<T, Error> {
    match parsed {
        Ok(value) if response.is_success() => Ok(value),
        Err(error @ (Error::Feed(_) | Error::Request(_))) => Err(error),
        Err(error) if response.is_success() => Err(error),
        _ => Err(Error::UnexpectedStatus {
            status: response.status,
            body: response.body.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Mutex;

    use rust_decimal::Decimal;
    use time::macros::datetime;

    use super::*;
    use crate::HttpMethod;
    use crate::http_client::HttpError;
    use crate::Product;

    const ACKNOWLEDGED: &str = concat!(
        r#"<?xml version="1.0" encoding="UTF-8"?>"#,
        "<SuccessResponse><Head><RequestId>feed-1</RequestId>",
        "<RequestAction>ProductCreate</RequestAction><ResponseType/>",
        "<Timestamp>2016-06-22T04:40:14+0200</Timestamp></Head><Body/></SuccessResponse>"
    );

    #[derive(Debug)]
    struct RecordingHttpClient {
        response: Result<HttpResponse, HttpError>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl RecordingHttpClient {
        fn answering(response: HttpResponse) -> Self {
            Self {
                response: Ok(response),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failing(error: HttpError) -> Self {
            Self {
                response: Err(error),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn recorded_requests(&self) -> Vec<HttpRequest> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .clone()
        }
    }

    impl HttpClient for RecordingHttpClient {
        fn execute<'a>(
            &'a self,
            request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .push(request);
            let response = self.response.clone();
            Box::pin(async move { response })
        }
    }

    fn manager(client: Arc<RecordingHttpClient>) -> ProductManager {
        ProductManager::with_http_client(
            Configuration::new("seller@example.com", "https://sellercenter.test/")
                .expect("valid configuration")
                .with_timeout_ms(2_500),
            client,
        )
    }

    fn products() -> Products {
        [Product::new("sku-1", "Magic Product", Decimal::ONE).expect("valid product")]
            .into_iter()
            .collect()
    }

    #[tokio::test]
    async fn listing_request_carries_base_and_filter_parameters() {
        let client = Arc::new(RecordingHttpClient::answering(HttpResponse::ok_xml(
            crate::NoopHttpClient::EMPTY_SUCCESS,
        )));
        let manager = manager(client.clone());

        let parsed = manager
            .get_products_created_after(datetime!(2018-09-01 00:00:00))
            .await
            .expect("listing should succeed");
        assert!(parsed.products.is_empty());

        let requests = client.recorded_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Get);
        assert_eq!(requests[0].timeout_ms, 2_500);
        assert!(requests[0].url.starts_with("https://sellercenter.test/?Action=GetProducts&"));

        let parameters = requests[0].query_parameters();
        assert_eq!(parameters["Action"], "GetProducts");
        assert_eq!(parameters["Format"], "XML");
        assert_eq!(parameters["UserID"], "seller@example.com");
        assert_eq!(parameters["Version"], "1.0");
        assert_eq!(parameters["CreatedAfter"], "2018-09-01 00:00:00");
        assert!(parameters.contains_key("Timestamp"));
    }

    #[tokio::test]
    async fn empty_sku_lookup_sends_nothing() {
        let client = Arc::new(RecordingHttpClient::answering(HttpResponse::ok_xml("")));
        let manager = manager(client.clone());

        let err = manager
            .get_products_by_seller_sku(Vec::<String>::new())
            .await
            .expect_err("must fail");

        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(client.recorded_requests().is_empty());
    }

    #[tokio::test]
    async fn feed_is_posted_with_action_and_xml_body() {
        let client = Arc::new(RecordingHttpClient::answering(HttpResponse::ok_xml(ACKNOWLEDGED)));
        let manager = manager(client.clone());
        let products = products();

        let response = manager
            .product_create(&products)
            .await
            .expect("feed should be acknowledged");
        assert_eq!(response.request_id(), "feed-1");
        assert_eq!(response.seller_skus(), ["sku-1"]);

        let requests = client.recorded_requests();
        assert_eq!(requests[0].method, HttpMethod::Post);
        assert_eq!(requests[0].query_parameters()["Action"], "ProductCreate");
        assert_eq!(
            requests[0].headers.get("content-type").map(String::as_str),
            Some("application/xml")
        );
        assert!(requests[0]
            .body
            .as_deref()
            .is_some_and(|body| body.contains("<SellerSku>sku-1</SellerSku>")));
    }

    #[tokio::test]
    async fn empty_feed_sends_nothing() {
        let client = Arc::new(RecordingHttpClient::answering(HttpResponse::ok_xml(ACKNOWLEDGED)));
        let manager = manager(client.clone());

        let err = manager
            .add_image(&ProductImages::new())
            .await
            .expect_err("must fail");

        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(client.recorded_requests().is_empty());
    }

    #[tokio::test]
    async fn error_document_with_400_is_a_feed_error() {
        let body = concat!(
            "<ErrorResponse><Head><RequestAction>ProductRemove</RequestAction>",
            "<ErrorType>Sender</ErrorType><ErrorCode>125</ErrorCode>",
            "<ErrorMessage>E0125: Test Error</ErrorMessage></Head><Body/></ErrorResponse>"
        );
        let client = Arc::new(RecordingHttpClient::answering(HttpResponse::new(400, body)));
        let manager = manager(client);

        let err = manager
            .product_remove(&products())
            .await
            .expect_err("must fail");

        assert!(matches!(err, Error::Feed(_)));
        assert_eq!(err.to_string(), "E0125: Test Error");
    }

    #[tokio::test]
    async fn unrecognised_body_on_failure_status_is_unexpected() {
        let client = Arc::new(RecordingHttpClient::answering(HttpResponse::new(
            503,
            "Service Unavailable",
        )));
        let manager = manager(client);

        let err = manager.get_all_products().await.expect_err("must fail");
        assert!(matches!(err, Error::UnexpectedStatus { status: 503, .. }));
    }

    #[tokio::test]
    async fn transport_errors_propagate_unchanged() {
        let client = Arc::new(RecordingHttpClient::failing(HttpError::new("connection reset")));
        let manager = manager(client);

        let err = manager
            .filter_products("live")
            .await
            .expect_err("must fail");

        match err {
            Error::Transport(error) => {
                assert_eq!(error.message(), "connection reset");
                assert!(error.retryable());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
