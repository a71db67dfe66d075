//! Client operation tests against a recording mock transport.

mod common;

use common::{mock_client, BASE, GTIN};
use datakick_sdk::config::MAX_IMAGE_SIZE;
use datakick_sdk::{
    DatakickClient, DatakickError, HttpMethod, ProductUpdate, Quantity, RequestBody,
};
use serde_json::json;

// ---------------------------------------------------------------------------
// find_product
// ---------------------------------------------------------------------------

#[test]
fn find_product_requests_item_url() {
    let (client, transport) = mock_client();
    transport.respond_json(common::sample_product());

    client.find_product(GTIN).unwrap();

    let req = transport.last_request();
    assert_eq!(transport.call_count(), 1);
    assert_eq!(req.method, HttpMethod::Get);
    assert_eq!(req.url, "https://www.datakick.org/api/items/000000000000");
    assert!(req.query.is_empty());
    assert_eq!(req.body, RequestBody::Empty);
}

#[test]
fn find_product_returns_product() {
    let (client, transport) = mock_client();
    transport.respond_json(common::sample_product());

    let product = client.find_product(GTIN).unwrap();
    assert_eq!(product.name(), Some("MyName"));
    assert_eq!(product.images(), ["someurl_1", "someurl_2"]);
}

#[test]
fn find_product_not_found_is_status_error() {
    let (client, transport) = mock_client();
    transport.respond(404, r#"{"error":"not found"}"#);

    let err = client.find_product("123").unwrap_err();
    assert_eq!(err.status(), Some(404));
    match err {
        DatakickError::Status { status, body } => {
            assert_eq!(status, 404);
            assert!(body.contains("not found"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(transport.call_count(), 1);
}

#[test]
fn malformed_body_is_json_error() {
    let (client, transport) = mock_client();
    transport.respond(200, "<html>oops</html>");

    let err = client.find_product(GTIN).unwrap_err();
    assert!(matches!(err, DatakickError::Json(_)));
}

#[test]
fn array_body_for_single_product_is_rejected() {
    let (client, transport) = mock_client();
    transport.respond_json(json!([]));

    let err = client.find_product(GTIN).unwrap_err();
    assert!(matches!(err, DatakickError::InvalidResponse(_)));
}

// ---------------------------------------------------------------------------
// list_products
// ---------------------------------------------------------------------------

#[test]
fn list_products_requests_given_page() {
    let (client, transport) = mock_client();
    client.list_products(5).unwrap();
    assert_eq!(
        transport.last_request().url,
        "https://www.datakick.org/api/items?page=5"
    );
}

#[test]
fn list_products_clamps_page_to_one() {
    let (client, transport) = mock_client();
    for page in [0, -2, -5, i64::MIN] {
        client.list_products(page).unwrap();
    }
    client.list_products(1).unwrap();

    let urls: Vec<String> = transport.requests().into_iter().map(|r| r.url).collect();
    assert_eq!(urls.len(), 5);
    for url in urls {
        assert_eq!(url, "https://www.datakick.org/api/items?page=1");
    }
}

#[test]
fn list_products_wraps_every_element() {
    let (client, transport) = mock_client();
    transport.respond_json(json!([
        {"gtin14": "1", "name": "One"},
        {"gtin14": "2", "name": "Two"},
        {"gtin14": "3", "images": [{"url": "u"}]}
    ]));

    let products = client.list_products(1).unwrap();
    assert_eq!(products.len(), 3);
    assert_eq!(products[0].name(), Some("One"));
    assert_eq!(products[1].gtin14(), Some("2"));
    assert_eq!(products[2].images(), ["u"]);
}

#[test]
fn list_products_past_end_is_empty() {
    let (client, transport) = mock_client();
    transport.respond_json(json!([]));
    assert!(client.list_products(9999).unwrap().is_empty());
}

#[test]
fn list_products_rejects_object_body() {
    let (client, transport) = mock_client();
    transport.respond_json(json!({"name": "x"}));
    let err = client.list_products(1).unwrap_err();
    assert!(matches!(err, DatakickError::InvalidResponse(_)));
}

// ---------------------------------------------------------------------------
// search
// ---------------------------------------------------------------------------

#[test]
fn search_replaces_spaces_with_plus() {
    let (client, transport) = mock_client();
    client.search("Peanut Butter").unwrap();
    assert_eq!(
        transport.last_request().url,
        "https://www.datakick.org/api/items?query=Peanut+Butter"
    );
}

#[test]
fn search_leaves_other_characters_alone() {
    let (client, transport) = mock_client();
    client.search("a&b c").unwrap();
    assert_eq!(
        transport.last_request().url,
        "https://www.datakick.org/api/items?query=a&b+c"
    );
}

#[test]
fn search_returns_products() {
    let (client, transport) = mock_client();
    transport.respond_json(json!([common::sample_product(), {"name": "Other"}]));

    let hits = client.search("Peanut Butter").unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].brand_name(), Some("MyBrand"));
    assert_eq!(hits[1].name(), Some("Other"));
}

#[test]
fn search_server_error_propagates() {
    let (client, transport) = mock_client();
    transport.respond(500, "boom");
    let err = client.search("x").unwrap_err();
    assert_eq!(err.status(), Some(500));
}

// ---------------------------------------------------------------------------
// add_or_update_product
// ---------------------------------------------------------------------------

fn full_update() -> ProductUpdate {
    ProductUpdate {
        name: Some("MyName".into()),
        brand_name: Some("MyBrand".into()),
        size: Some("21oz".into()),
        ingredients: Some("Chocolate".into()),
        serving_size: Some("34g".into()),
        servings_per_container: Some(10.0.into()),
        calories: Some(200.0.into()),
        fat_calories: Some(5.0.into()),
        fat: Some(5.0.into()),
        saturated_fat: Some(5.0.into()),
        trans_fat: Some(5.0.into()),
        polyunsaturated_fat: Some(5.0.into()),
        monounsaturated_fat: Some(5.0.into()),
        cholesterol: Some(5.0.into()),
        sodium: Some(5.0.into()),
        potassium: Some(5.0.into()),
        carbohydrate: Some(5.0.into()),
        fiber: Some(5.0.into()),
        sugars: Some(5.0.into()),
        protein: Some(5.0.into()),
        author: Some("AuthName".into()),
        publisher: Some("MyPublisher".into()),
        pages: Some(5.0.into()),
        alcohol_by_volume: Some(5.0.into()),
    }
}

#[test]
fn add_product_sends_put_with_all_fields() {
    let (client, transport) = mock_client();
    transport.respond_json(common::sample_product());

    client.add_or_update_product(GTIN, &full_update()).unwrap();

    let req = transport.last_request();
    assert_eq!(req.method, HttpMethod::Put);
    assert_eq!(req.url, "https://www.datakick.org/api/items/000000000000");
    assert_eq!(req.query.len(), 24);
    assert!(req.query.contains(&("calories".to_string(), "200".to_string())));
    assert!(req.query.contains(&("pages".to_string(), "5".to_string())));
    assert!(req.query.contains(&("author".to_string(), "AuthName".to_string())));
}

#[test]
fn add_product_omits_falsy_fields() {
    let (client, transport) = mock_client();
    transport.respond_json(json!({"gtin14": GTIN, "name": "X"}));

    let update = ProductUpdate {
        name: Some("X".into()),
        calories: Some(0.0.into()),
        brand_name: Some(String::new()),
        ..Default::default()
    };
    client.add_or_update_product(GTIN, &update).unwrap();

    let req = transport.last_request();
    assert_eq!(req.query, vec![("name".to_string(), "X".to_string())]);
}

#[test]
fn add_product_returns_echoed_product() {
    let (client, transport) = mock_client();
    transport.respond_json(json!({"gtin14": GTIN, "name": "Echo", "calories": 90}));

    let product = client
        .add_or_update_product(GTIN, &ProductUpdate::default())
        .unwrap();
    assert_eq!(product.name(), Some("Echo"));
    assert_eq!(product.calories(), Some(&Quantity::Number(90.0)));
}

#[test]
fn add_product_invalid_gtin_is_status_error() {
    let (client, transport) = mock_client();
    transport.respond(400, "bad gtin");
    let err = client
        .add_or_update_product("abc", &full_update())
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
}

// ---------------------------------------------------------------------------
// add_image
// ---------------------------------------------------------------------------

#[test]
fn add_image_posts_multipart_file() {
    let (client, transport) = mock_client();
    transport.respond_json(json!({"id": 701, "image_url": "https://someimgurl.jpg"}));

    let file = common::image_file(".jpg", 1024);
    let url = client.add_image(GTIN, file.path()).unwrap();
    assert_eq!(url.as_deref(), Some("https://someimgurl.jpg"));

    let req = transport.last_request();
    assert_eq!(req.method, HttpMethod::Post);
    assert_eq!(
        req.url,
        "https://www.datakick.org/api/items/000000000000/images"
    );
    match req.body {
        RequestBody::Multipart {
            field,
            file_name,
            bytes,
        } => {
            assert_eq!(field, "image");
            assert!(file_name.ends_with(".jpg"));
            assert_eq!(bytes.len(), 1024);
            assert_eq!(&bytes[..3], &[0xFF, 0xD8, 0xFF]);
        }
        other => panic!("expected multipart body, got {other:?}"),
    }
}

#[test]
fn add_image_without_image_url_returns_none() {
    let (client, transport) = mock_client();
    transport.respond_json(json!({"id": 701}));
    let file = common::image_file(".jpeg", 10);
    assert_eq!(client.add_image(GTIN, file.path()).unwrap(), None);
}

#[test]
fn add_image_bad_extension_makes_no_request() {
    let (client, transport) = mock_client();
    let file = common::image_file(".png", 10);

    let err = client.add_image(GTIN, file.path()).unwrap_err();
    assert!(matches!(err, DatakickError::InvalidImageFormat { .. }));
    assert_eq!(transport.call_count(), 0);
}

#[test]
fn add_image_too_large_makes_no_request() {
    let (client, transport) = mock_client();
    let file = common::image_file(".jpg", 2 * MAX_IMAGE_SIZE);

    let err = client.add_image(GTIN, file.path()).unwrap_err();
    assert!(matches!(err, DatakickError::ImageTooLarge { .. }));
    assert_eq!(transport.call_count(), 0);
}

#[test]
fn add_image_missing_file_makes_no_request() {
    let (client, transport) = mock_client();
    let dir = tempfile::tempdir().unwrap();

    let err = client
        .add_image(GTIN, dir.path().join("gone.jpg"))
        .unwrap_err();
    assert!(matches!(err, DatakickError::Io(_)));
    assert_eq!(transport.call_count(), 0);
}

#[test]
fn free_add_image_rejects_bad_file_without_network() {
    let png = common::image_file(".png", 10);
    let err = datakick_sdk::add_image(GTIN, png.path()).unwrap_err();
    assert!(matches!(err, DatakickError::InvalidImageFormat { .. }));

    let big = common::image_file(".jpg", 2 * MAX_IMAGE_SIZE);
    let err = datakick_sdk::add_image(GTIN, big.path()).unwrap_err();
    assert!(matches!(err, DatakickError::ImageTooLarge { .. }));
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

#[test]
fn trailing_slash_on_base_is_stripped() {
    let transport = common::MockTransport::new();
    let client = DatakickClient::with_transport("http://localhost:3000/api/", transport.clone());
    client.find_product(GTIN).ok();
    assert_eq!(
        transport.last_request().url,
        "http://localhost:3000/api/items/000000000000"
    );
}

#[test]
fn builder_uses_public_base_by_default() {
    let client = DatakickClient::builder().build().unwrap();
    assert_eq!(client.base_url(), BASE);
    assert_eq!(client.to_string(), format!("DatakickClient(base_url={BASE})"));
}

#[test]
fn builder_rejects_empty_base_url() {
    let err = DatakickClient::builder().base_url("  ").build().unwrap_err();
    assert!(matches!(err, DatakickError::InvalidArgument(_)));
}
