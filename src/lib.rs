//! Datakick SDK for Rust.
//!
//! Provides a blocking client for the Datakick open product database: look up
//! a product by barcode, page through or search the catalogue, create or edit
//! a product, and attach a photo to it.
//!
//! # Quick start
//!
//! ```no_run
//! use datakick_sdk::{DatakickClient, ProductUpdate};
//!
//! let client = DatakickClient::builder().build().unwrap();
//!
//! // Look up one product
//! let product = client.find_product("00000000000000").unwrap();
//! println!("{:?}", product.name());
//!
//! // Search
//! let hits = client.search("peanut butter").unwrap();
//!
//! // Edit, sending only the fields that are set
//! let update = ProductUpdate {
//!     brand_name: Some("Acme".into()),
//!     ..Default::default()
//! };
//! let product = client.add_or_update_product("00000000000000", &update).unwrap();
//! ```
//!
//! The crate-root functions ([`find_product`], [`search`], ...) do the same
//! against the public API with a default client.

#[cfg(feature = "async")]
pub mod async_client;
pub mod config;
pub mod error;
pub mod models;
pub mod transport;
pub mod validation;

#[cfg(feature = "async")]
pub use async_client::AsyncDatakickClient;
pub use error::{DatakickError, Result};
pub use models::{Product, ProductUpdate, Quantity};
pub use transport::{
    HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, RequestBody, Transport,
};

use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// DatakickClientBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`DatakickClient`].
///
/// Use [`DatakickClient::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](DatakickClientBuilder::build).
pub struct DatakickClientBuilder {
    base_url: String,
    timeout: Option<Duration>,
    user_agent: String,
}

impl Default for DatakickClientBuilder {
    fn default() -> Self {
        Self {
            base_url: config::API_BASE.to_string(),
            timeout: None,
            user_agent: config::USER_AGENT.to_string(),
        }
    }
}

impl DatakickClientBuilder {
    /// Point the client at a different API root (e.g. a staging server).
    ///
    /// Defaults to [`config::API_BASE`].
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    /// Set a request timeout. Unset by default, leaving reqwest's default in place.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    /// Build the client and its HTTP transport.
    pub fn build(self) -> Result<DatakickClient> {
        if self.base_url.trim().is_empty() {
            return Err(DatakickError::InvalidArgument("base_url must not be empty".into()));
        }
        let transport = ReqwestTransport::new(self.timeout, &self.user_agent)?;
        Ok(DatakickClient::with_transport(&self.base_url, transport))
    }
}

// ---------------------------------------------------------------------------
// DatakickClient
// ---------------------------------------------------------------------------

/// Client for the Datakick product API.
///
/// Holds only the API root and a [`Transport`]; each call is one independent
/// blocking round-trip with no retries.
#[derive(Debug, Clone)]
pub struct DatakickClient<T = ReqwestTransport> {
    base_url: String,
    transport: T,
}

impl DatakickClient<ReqwestTransport> {
    /// Create a new builder for configuring the client.
    pub fn builder() -> DatakickClientBuilder {
        DatakickClientBuilder::default()
    }

    /// A client for the public API with default settings.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }
}

impl<T: Transport> DatakickClient<T> {
    /// Create a client that sends its requests through `transport`.
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            base_url: config::normalize_base(base_url),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // -- Lookup ------------------------------------------------------------

    /// Fetch the product with the given barcode.
    ///
    /// A malformed or unknown barcode surfaces as [`DatakickError::Status`]
    /// with the service's status code (typically 404).
    pub fn find_product(&self, gtin14: &str) -> Result<Product> {
        let request = HttpRequest::get(config::product_url(&self.base_url, gtin14));
        Product::from_value(self.send(&request)?)
    }

    /// Fetch one page of the catalogue.
    ///
    /// Pages start at 1; anything lower is treated as 1. A page past the end
    /// yields an empty list.
    pub fn list_products(&self, page: i64) -> Result<Vec<Product>> {
        let page = page.max(1) as u64;
        let request = HttpRequest::get(config::list_url(&self.base_url, page));
        products_from(self.send(&request)?)
    }

    /// Search the catalogue. Spaces in `query` are sent as `+`.
    pub fn search(&self, query: &str) -> Result<Vec<Product>> {
        let request = HttpRequest::get(config::search_url(&self.base_url, query));
        products_from(self.send(&request)?)
    }

    // -- Edits -------------------------------------------------------------

    /// Create the product, or merge `update` into it if it already exists.
    ///
    /// Only fields returned by [`ProductUpdate::to_query_pairs`] are sent.
    /// Returns the product as the service stored it.
    pub fn add_or_update_product(&self, gtin14: &str, update: &ProductUpdate) -> Result<Product> {
        let request = HttpRequest {
            method: HttpMethod::Put,
            url: config::product_url(&self.base_url, gtin14),
            query: update
                .to_query_pairs()
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            body: RequestBody::Empty,
        };
        Product::from_value(self.send(&request)?)
    }

    /// Upload a JPEG image for the product and return its new URL.
    ///
    /// The extension and size checks in [`validation`] run first; if either
    /// fails nothing is sent. The file is read in full and closed before the
    /// request goes out. Returns `None` if the response has no `image_url`.
    pub fn add_image<P: AsRef<Path>>(
        &self,
        gtin14: &str,
        image_path: P,
    ) -> Result<Option<String>> {
        let path = image_path.as_ref();
        validation::validate_image(path)?;

        // Size was checked from metadata; a file that grows before this read
        // is uploaded as-is.
        let bytes = fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image.jpg".to_string());

        let request = HttpRequest {
            method: HttpMethod::Post,
            url: config::images_url(&self.base_url, gtin14),
            query: Vec::new(),
            body: RequestBody::Multipart {
                field: "image".to_string(),
                file_name,
                bytes,
            },
        };
        let data = self.send(&request)?;
        Ok(data
            .get("image_url")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string()))
    }

    /// Execute one request, reject non-2xx statuses, and decode the JSON body.
    fn send(&self, request: &HttpRequest) -> Result<Value> {
        debug!(
            method = %request.method,
            url = %request.url,
            params = request.query.len(),
            "datakick request"
        );
        let resp = self.transport.execute(request)?;
        debug!(status = resp.status, bytes = resp.body.len(), "datakick response");

        if !resp.is_success() {
            warn!(
                method = %request.method,
                url = %request.url,
                status = resp.status,
                "datakick request failed"
            );
            return Err(DatakickError::Status {
                status: resp.status,
                body: resp.body,
            });
        }
        Ok(serde_json::from_str(&resp.body)?)
    }
}

fn products_from(data: Value) -> Result<Vec<Product>> {
    match data {
        Value::Array(items) => items.into_iter().map(Product::from_value).collect(),
        other => Err(DatakickError::InvalidResponse(format!(
            "expected an array of products, got {}",
            models::product::json_kind(&other)
        ))),
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl<T> fmt::Display for DatakickClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DatakickClient(base_url={})", self.base_url)
    }
}

// ---------------------------------------------------------------------------
// Free functions against the public API
// ---------------------------------------------------------------------------

/// [`DatakickClient::find_product`] with a default client.
pub fn find_product(gtin14: &str) -> Result<Product> {
    DatakickClient::new()?.find_product(gtin14)
}

/// [`DatakickClient::list_products`] with a default client.
pub fn list_products(page: i64) -> Result<Vec<Product>> {
    DatakickClient::new()?.list_products(page)
}

/// [`DatakickClient::search`] with a default client.
pub fn search(query: &str) -> Result<Vec<Product>> {
    DatakickClient::new()?.search(query)
}

/// [`DatakickClient::add_or_update_product`] with a default client.
pub fn add_or_update_product(gtin14: &str, update: &ProductUpdate) -> Result<Product> {
    DatakickClient::new()?.add_or_update_product(gtin14, update)
}

/// [`DatakickClient::add_image`] with a default client.
///
/// Building the client opens no connection, so an image that fails the local
/// checks still leaves the service untouched.
pub fn add_image<P: AsRef<Path>>(gtin14: &str, image_path: P) -> Result<Option<String>> {
    DatakickClient::new()?.add_image(gtin14, image_path)
}
