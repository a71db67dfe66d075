//! Shared test fixtures for the Datakick SDK integration tests.
//!
//! Provides `MockTransport`, a scripted [`Transport`] that records every
//! request it receives, plus sample product payloads and on-disk images.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Arc, Mutex};

use datakick_sdk::{DatakickClient, HttpRequest, HttpResponse, Result, Transport};
use tempfile::NamedTempFile;

pub const BASE: &str = "https://www.datakick.org/api";
pub const GTIN: &str = "000000000000";

/// Scripted transport: answers with queued responses (or `200 []` when the
/// queue is empty) and keeps a log of requests.
#[derive(Clone, Default)]
pub struct MockTransport {
    responses: Arc<Mutex<VecDeque<HttpResponse>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, body: &str) -> &Self {
        self.responses.lock().unwrap().push_back(HttpResponse {
            status,
            body: body.to_string(),
        });
        self
    }

    pub fn respond_json(&self, body: serde_json::Value) -> &Self {
        self.respond(200, &body.to_string())
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

impl Transport for MockTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(request.clone());
        let next = self.responses.lock().unwrap().pop_front();
        Ok(next.unwrap_or(HttpResponse {
            status: 200,
            body: "[]".to_string(),
        }))
    }
}

/// A client against the public base URL whose requests go to a fresh mock.
pub fn mock_client() -> (DatakickClient<MockTransport>, MockTransport) {
    let transport = MockTransport::new();
    let client = DatakickClient::with_transport(BASE, transport.clone());
    (client, transport)
}

/// A full product payload as the service returns it.
pub fn sample_product() -> serde_json::Value {
    serde_json::json!({
        "gtin14": "000000000000",
        "brand_name": "MyBrand",
        "name": "MyName",
        "size": "21oz",
        "ingredients": "Chocolate",
        "serving_size": "34g",
        "servings_per_container": 10,
        "calories": 200,
        "fat_calories": 5,
        "fat": 5,
        "saturated_fat": 5,
        "trans_fat": 5,
        "polyunsaturated_fat": 5,
        "monounsaturated_fat": 5,
        "cholesterol": 5,
        "sodium": 5,
        "potassium": 5,
        "carbohydrate": 5,
        "fiber": 5,
        "sugars": 5,
        "protein": 5,
        "author": "AuthName",
        "publisher": "MyPublisher",
        "pages": 5,
        "alcohol_by_volume": 5,
        "images": [
            {"url": "someurl_1"},
            {"url": "someurl_2"}
        ]
    })
}

/// Create a temp file with the given suffix and logical size.
///
/// The file is extended with `set_len`, so large sizes cost no real disk.
pub fn image_file(suffix: &str, len: u64) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("datakick-image-")
        .suffix(suffix)
        .tempfile()
        .unwrap();
    file.write_all(&[0xFF, 0xD8, 0xFF]).unwrap();
    file.as_file().set_len(len).unwrap();
    file
}
