use sellercenter_core::{Error, HttpMethod, ParsedProducts, ProductFilter, ProductQuery};
use sellercenter_tests::{manager_with, RecordingHttpClient, PRODUCTS_RESPONSE};
use time::macros::datetime;

fn assert_fixture_listing(parsed: &ParsedProducts) {
    assert_eq!(
        parsed.products.seller_skus(),
        vec!["jasku-10001", "jasku-10002", "jasku-10004"]
    );
    assert_eq!(parsed.malformed.len(), 1);
    assert_eq!(parsed.malformed[0].seller_sku.as_deref(), Some("jasku-10003"));
}

#[tokio::test]
async fn test_get_all_products_returns_collection() {
    let client = RecordingHttpClient::answering(200, PRODUCTS_RESPONSE);
    let manager = manager_with(client.clone());

    let parsed = manager.get_all_products().await.expect("listing");
    assert_fixture_listing(&parsed);

    let requests = client.recorded_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, HttpMethod::Get);
    assert!(requests[0].body.is_none());

    let parameters = requests[0].query_parameters();
    assert_eq!(
        parameters.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["Action", "Format", "Timestamp", "UserID", "Version"]
    );
    assert_eq!(parameters["UserID"], "api@sellercenter.test");
}

#[tokio::test]
async fn test_timestamp_criteria_are_sent_in_wire_format() {
    let client = RecordingHttpClient::answering(200, PRODUCTS_RESPONSE);
    let manager = manager_with(client.clone());
    let instant = datetime!(2018-09-01 08:15:00);

    assert_fixture_listing(&manager.get_products_created_after(instant).await.expect("listing"));
    assert_fixture_listing(&manager.get_products_created_before(instant).await.expect("listing"));
    assert_fixture_listing(&manager.get_products_updated_after(instant).await.expect("listing"));
    assert_fixture_listing(&manager.get_products_updated_before(instant).await.expect("listing"));

    let requests = client.recorded_requests();
    let names = ["CreatedAfter", "CreatedBefore", "UpdatedAfter", "UpdatedBefore"];
    for (request, name) in requests.iter().zip(names) {
        let parameters = request.query_parameters();
        assert_eq!(parameters[name], "2018-09-01 08:15:00");
        assert_eq!(parameters.len(), 6);
    }
    assert!(requests[0].url.contains("CreatedAfter=2018-09-01%2008%3A15%3A00"));
}

#[tokio::test]
async fn test_search_products_sends_search_term() {
    let client = RecordingHttpClient::answering(200, PRODUCTS_RESPONSE);
    let manager = manager_with(client.clone());

    let parsed = manager.search_products("pila aa").await.expect("listing");
    assert_fixture_listing(&parsed);

    assert_eq!(client.recorded_requests()[0].query_parameters()["Search"], "pila aa");
}

#[tokio::test]
async fn test_every_filter_value_is_passed_through() {
    let filters = [
        "all",
        "live",
        "inactive",
        "deleted",
        "image-missing",
        "pending",
        "rejected",
        "sold-out",
        "",
        "invalid-filter",
    ];

    for filter in filters {
        let client = RecordingHttpClient::answering(200, PRODUCTS_RESPONSE);
        let manager = manager_with(client.clone());

        let parsed = manager.filter_products(filter).await.expect("lenient filter");
        assert_fixture_listing(&parsed);
        assert_eq!(client.recorded_requests()[0].query_parameters()["Filter"], filter);
    }
}

#[tokio::test]
async fn test_typed_filter_uses_wire_name() {
    let client = RecordingHttpClient::answering(200, PRODUCTS_RESPONSE);
    let manager = manager_with(client.clone());

    manager
        .filter_products(ProductFilter::ImageMissing)
        .await
        .expect("listing");

    assert_eq!(
        client.recorded_requests()[0].query_parameters()["Filter"],
        "image-missing"
    );
}

#[tokio::test]
async fn test_seller_sku_lookup_encodes_list() {
    let client = RecordingHttpClient::answering(200, PRODUCTS_RESPONSE);
    let manager = manager_with(client.clone());

    let parsed = manager
        .get_products_by_seller_sku(["jasku-10001", "jasku-10002"])
        .await
        .expect("listing");
    assert_fixture_listing(&parsed);

    assert_eq!(
        client.recorded_requests()[0].query_parameters()["SkuSellerList"],
        r#"["jasku-10001","jasku-10002"]"#
    );
}

#[tokio::test]
async fn test_empty_seller_sku_list_is_rejected_before_sending() {
    let client = RecordingHttpClient::answering(200, PRODUCTS_RESPONSE);
    let manager = manager_with(client.clone());

    let err = manager
        .get_products_by_seller_sku(Vec::<String>::new())
        .await
        .expect_err("must fail");
    assert!(matches!(err, Error::InvalidArgument(_)));

    let err = manager
        .get_products_from_parameters(ProductQuery::new().with_seller_skus(Vec::<String>::new()))
        .await
        .expect_err("must fail");
    assert!(matches!(err, Error::InvalidArgument(_)));

    assert!(client.recorded_requests().is_empty());
}

#[tokio::test]
async fn test_products_from_parameters_combines_every_criterion() {
    let client = RecordingHttpClient::answering(200, PRODUCTS_RESPONSE);
    let manager = manager_with(client.clone());
    let instant = datetime!(2019-01-23 00:00:00);

    let query = ProductQuery::new()
        .with_created_before(instant)
        .with_created_after(instant)
        .with_search("pil")
        .with_filter("invalidFilter")
        .with_limit(1)
        .with_offset(0)
        .with_seller_skus(["jasku-10001", "jasku-10002"])
        .with_updated_after(instant)
        .with_updated_before(instant);

    let parsed = manager
        .get_products_from_parameters(query)
        .await
        .expect("listing");
    assert_fixture_listing(&parsed);

    let parameters = client.recorded_requests()[0].query_parameters();
    assert_eq!(parameters["CreatedBefore"], "2019-01-23 00:00:00");
    assert_eq!(parameters["CreatedAfter"], "2019-01-23 00:00:00");
    assert_eq!(parameters["UpdatedAfter"], "2019-01-23 00:00:00");
    assert_eq!(parameters["UpdatedBefore"], "2019-01-23 00:00:00");
    assert_eq!(parameters["Search"], "pil");
    assert_eq!(parameters["Filter"], "invalidFilter");
    assert_eq!(parameters["Limit"], "1");
    assert_eq!(parameters["Offset"], "0");
    assert_eq!(parameters["SkuSellerList"], r#"["jasku-10001","jasku-10002"]"#);
    assert_eq!(parameters["Action"], "GetProducts");
}

#[tokio::test]
async fn test_listing_rejection_surfaces_provider_message() {
    let body = concat!(
        r#"<?xml version="1.0" encoding="UTF-8"?>"#,
        "<ErrorResponse><Head><RequestAction>GetProducts</RequestAction>",
        "<ErrorType>Sender</ErrorType><ErrorCode>7</ErrorCode>",
        "<ErrorMessage>E007: Login failed. Signature mismatching</ErrorMessage>",
        "</Head><Body/></ErrorResponse>"
    );
    let client = RecordingHttpClient::answering(403, body);
    let manager = manager_with(client);

    let err = manager.get_all_products().await.expect_err("must fail");

    assert!(matches!(err, Error::Request(_)));
    assert_eq!(err.to_string(), "E007: Login failed. Signature mismatching");
    assert_eq!(err.error_response().map(|response| response.code()), Some(7));
}
