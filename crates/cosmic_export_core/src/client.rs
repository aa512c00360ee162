use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::errors::CosmicError;
use crate::models::{CatalogResponse, ObjectType, ObjectsPage, StatusFilter};

pub const DEFAULT_BASE_URL: &str = "https://api.cosmicjs.com";

/// Objects are requested in fixed-size pages; `skip` advances by this amount.
pub const PAGE_SIZE: u32 = 128;

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub timeout: Duration,
    pub base_url: Option<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            base_url: None,
        }
    }
}

/// Query parameters shared by every page request of one export run.
#[derive(Debug, Clone)]
pub struct ObjectQuery {
    pub bucket_slug: String,
    pub read_key: String,
    pub type_slug: String,
    pub status: StatusFilter,
}

#[derive(Clone)]
pub struct CosmicClient {
    client: Client,
    base_url: String,
}

impl CosmicClient {
    pub fn new(options: ClientOptions) -> Result<Self, CosmicError> {
        let client = Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(CosmicError::Request)?;
        let base_url = options
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Ok(Self { client, base_url })
    }

    /// One-shot catalog fetch; the catalog is assumed to fit in one response.
    pub async fn fetch_object_types(
        &self,
        bucket_slug: &str,
        read_key: &str,
    ) -> Result<Vec<ObjectType>, CosmicError> {
        let url = format!("{}/v1/{}/object-types", self.base_url, bucket_slug);
        let mut params = Vec::new();
        if !read_key.is_empty() {
            params.push(("read_key", read_key.to_string()));
        }
        let payload: CatalogResponse = self.request(&url, &params).await?;
        if let Some(message) = payload.error {
            return Err(CosmicError::Api { message });
        }
        Ok(payload.object_types)
    }

    pub async fn fetch_objects_page(
        &self,
        query: &ObjectQuery,
        page_index: u32,
    ) -> Result<ObjectsPage, CosmicError> {
        let url = format!("{}/v1/{}/objects", self.base_url, query.bucket_slug);
        let skip = u64::from(PAGE_SIZE) * u64::from(page_index);
        let mut params = vec![
            ("type", query.type_slug.clone()),
            ("limit", PAGE_SIZE.to_string()),
            ("skip", skip.to_string()),
        ];
        if let Some(status) = query.status.query_value() {
            params.push(("status", status.to_string()));
        }
        if !query.read_key.is_empty() {
            params.push(("read_key", query.read_key.clone()));
        }
        self.request(&url, &params).await
    }

    // The API reports failures through error/message fields in the JSON body,
    // so the body is decoded regardless of the HTTP status code.
    async fn request<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T, CosmicError> {
        let mut req = self.client.get(url);
        for (k, v) in params {
            req = req.query(&[(k, v.as_str())]);
        }
        let response = req.send().await.map_err(CosmicError::Request)?;
        let bytes = response.bytes().await.map_err(CosmicError::Request)?;
        serde_json::from_slice(&bytes).map_err(|err| CosmicError::InvalidJson(err.to_string()))
    }
}
