//! Async wrapper around [`DatakickClient`] for use in async runtimes (Tokio, etc.).
//!
//! Runs every request on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free while
//! the underlying blocking client waits on the network.
//!
//! # Example
//!
//! ```no_run
//! use datakick_sdk::AsyncDatakickClient;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = AsyncDatakickClient::builder().build().await.unwrap();
//!
//!     let product = client.find_product("00000000000000").await.unwrap();
//!     let hits = client.search("peanut butter").await.unwrap();
//!
//!     // Anything else via closure
//!     let page = client.run(|c| c.list_products(3)).await.unwrap();
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::error::{DatakickError, Result};
use crate::models::{Product, ProductUpdate};
use crate::transport::{ReqwestTransport, Transport};
use crate::DatakickClient;

// ---------------------------------------------------------------------------
// AsyncDatakickClientBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncDatakickClient`].
#[derive(Default)]
pub struct AsyncDatakickClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl AsyncDatakickClientBuilder {
    /// Point the client at a different API root.
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(base_url.to_string());
        self
    }

    /// Set a request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = Some(user_agent.to_string());
        self
    }

    /// Build the async client.
    ///
    /// The blocking HTTP client is constructed on the blocking thread pool so
    /// it won't block the async event loop.
    pub async fn build(self) -> Result<AsyncDatakickClient> {
        let client = tokio::task::spawn_blocking(move || {
            let mut builder = DatakickClient::builder();
            if let Some(base_url) = &self.base_url {
                builder = builder.base_url(base_url);
            }
            if let Some(timeout) = self.timeout {
                builder = builder.timeout(timeout);
            }
            if let Some(user_agent) = &self.user_agent {
                builder = builder.user_agent(user_agent);
            }
            builder.build()
        })
        .await
        .map_err(join_error)??;
        Ok(AsyncDatakickClient::from_client(client))
    }
}

// ---------------------------------------------------------------------------
// AsyncDatakickClient
// ---------------------------------------------------------------------------

/// Async wrapper around [`DatakickClient`].
///
/// The client is stateless, so it is shared behind an [`Arc`] and cloning the
/// wrapper is cheap. Each operation is dispatched to
/// [`tokio::task::spawn_blocking`].
pub struct AsyncDatakickClient<T = ReqwestTransport> {
    inner: Arc<DatakickClient<T>>,
}

impl<T> Clone for AsyncDatakickClient<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl AsyncDatakickClient<ReqwestTransport> {
    /// Create a new builder for configuring the async client.
    pub fn builder() -> AsyncDatakickClientBuilder {
        AsyncDatakickClientBuilder::default()
    }
}

impl<T> AsyncDatakickClient<T>
where
    T: Transport + Send + Sync + 'static,
{
    /// Wrap an already-configured blocking client.
    pub fn from_client(client: DatakickClient<T>) -> Self {
        Self {
            inner: Arc::new(client),
        }
    }

    /// Run a blocking client operation on the blocking thread pool.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use datakick_sdk::AsyncDatakickClient;
    /// # async fn example() -> datakick_sdk::Result<()> {
    /// # let client = AsyncDatakickClient::builder().build().await?;
    /// let first = client.run(|c| c.list_products(1)).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&DatakickClient<T>) -> Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let client = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || f(&client))
            .await
            .map_err(join_error)?
    }

    pub async fn find_product(&self, gtin14: &str) -> Result<Product> {
        let gtin14 = gtin14.to_string();
        self.run(move |c| c.find_product(&gtin14)).await
    }

    pub async fn list_products(&self, page: i64) -> Result<Vec<Product>> {
        self.run(move |c| c.list_products(page)).await
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Product>> {
        let query = query.to_string();
        self.run(move |c| c.search(&query)).await
    }

    pub async fn add_or_update_product(
        &self,
        gtin14: &str,
        update: &ProductUpdate,
    ) -> Result<Product> {
        let gtin14 = gtin14.to_string();
        let update = update.clone();
        self.run(move |c| c.add_or_update_product(&gtin14, &update)).await
    }

    pub async fn add_image<P: AsRef<Path>>(
        &self,
        gtin14: &str,
        image_path: P,
    ) -> Result<Option<String>> {
        let gtin14 = gtin14.to_string();
        let path: PathBuf = image_path.as_ref().to_path_buf();
        self.run(move |c| c.add_image(&gtin14, &path)).await
    }
}

fn join_error(e: tokio::task::JoinError) -> DatakickError {
    DatakickError::InvalidArgument(format!("Task join error: {e}"))
}
