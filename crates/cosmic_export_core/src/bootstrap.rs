use url::Url;

use crate::errors::CosmicError;

/// Bucket access parameters, resolved once at session start and passed into
/// the exporter explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketCredentials {
    pub bucket_slug: String,
    pub read_key: String,
}

/// Extracts `bucket_slug` and `read_key` from the extension URL's query
/// string. The read key is optional; public buckets work without one.
pub fn parse_bucket_params(extension_url: &str) -> Result<BucketCredentials, CosmicError> {
    let url = Url::parse(extension_url)
        .map_err(|err| CosmicError::InvalidUrl(format!("failed to parse URL: {err}")))?;
    let mut bucket_slug = String::new();
    let mut read_key = String::new();
    if let Some(query) = url.query() {
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "bucket_slug" => bucket_slug = value.trim().to_string(),
                "read_key" => read_key = value.trim().to_string(),
                _ => {}
            }
        }
    }
    if bucket_slug.is_empty() {
        return Err(CosmicError::InvalidUrl(
            "no bucket_slug query parameter in extension URL".to_string(),
        ));
    }
    Ok(BucketCredentials {
        bucket_slug,
        read_key,
    })
}
