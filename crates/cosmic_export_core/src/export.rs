use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Builder;

use crate::client::{ClientOptions, CosmicClient, ObjectQuery};
use crate::csv_utils::{header_row, record_row};
use crate::errors::{CosmicError, ExportError};
use crate::models::{ObjectType, StatusFilter};
use crate::paginate::{PaginationStep, Paginator};
use crate::schema::derive_schema;
use crate::timestamp::current_timestamp;

#[derive(Debug, Clone)]
pub struct ExportProgress {
    pub fetched: u64,
    pub total: u64,
}

pub type ProgressCallback = Arc<dyn Fn(ExportProgress) + Send + Sync + 'static>;

#[derive(Clone)]
pub struct ExportOptions {
    pub bucket_slug: String,
    pub read_key: String,
    pub status: StatusFilter,
    pub timeout_secs: u64,
    pub timestamp: Option<String>,
    pub base_url: Option<String>,
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            bucket_slug: String::new(),
            read_key: String::new(),
            status: StatusFilter::All,
            timeout_secs: 10,
            timestamp: None,
            base_url: None,
            progress_callback: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CsvExport {
    pub filename: String,
    pub csv_data: String,
    pub total_rows: u64,
}

pub fn csv_filename(bucket_slug: &str, type_slug: &str, timestamp: &str) -> String {
    format!("{bucket_slug}-{type_slug}-{timestamp}.csv")
}

pub async fn fetch_bucket_catalog(options: &ExportOptions) -> Result<Vec<ObjectType>, ExportError> {
    let client = build_client(options)?;
    client
        .fetch_object_types(&options.bucket_slug, &options.read_key)
        .await
        .map_err(ExportError::from)
}

pub async fn export_object_type(
    options: &ExportOptions,
    object_type: &ObjectType,
) -> Result<CsvExport, ExportError> {
    let client = build_client(options)?;
    generate_csv(&client, options, object_type).await
}

pub async fn generate_csv(
    client: &CosmicClient,
    options: &ExportOptions,
    object_type: &ObjectType,
) -> Result<CsvExport, ExportError> {
    let query = ObjectQuery {
        bucket_slug: options.bucket_slug.clone(),
        read_key: options.read_key.clone(),
        type_slug: object_type.slug.clone(),
        status: options.status,
    };

    let first_page = client.fetch_objects_page(&query, 0).await?;
    let first_record = first_page
        .objects
        .as_ref()
        .and_then(|objects| objects.first());
    let Some(first_record) = first_record else {
        let message = first_page
            .remote_message()
            .unwrap_or("No objects returned")
            .to_string();
        return Err(ExportError::EmptyResult { message });
    };

    let schema = derive_schema(object_type, first_record);
    let heading = header_row(&schema);

    let mut paginator = Paginator::new(first_page.total, options.status);
    paginator.ingest(first_page)?;
    report_progress(options, &paginator);

    while let PaginationStep::Fetch(page_index) = paginator.next_step() {
        let page = client.fetch_objects_page(&query, page_index).await?;
        paginator.ingest(page)?;
        report_progress(options, &paginator);
    }

    let records = paginator.into_records();
    if records.is_empty() {
        return Err(ExportError::InsufficientData {
            title: object_type.title.clone(),
            status: options.status,
        });
    }

    let rows: Vec<String> = records
        .iter()
        .map(|record| record_row(record, &schema))
        .collect();
    let total_rows = rows.len() as u64;
    let timestamp = options
        .timestamp
        .clone()
        .unwrap_or_else(current_timestamp);

    Ok(CsvExport {
        filename: csv_filename(&options.bucket_slug, &object_type.slug, &timestamp),
        csv_data: format!("{heading}\n{}", rows.join("\n")),
        total_rows,
    })
}

pub fn fetch_bucket_catalog_blocking(
    options: &ExportOptions,
) -> Result<Vec<ObjectType>, ExportError> {
    build_runtime()?.block_on(fetch_bucket_catalog(options))
}

pub fn export_object_type_blocking(
    options: &ExportOptions,
    object_type: &ObjectType,
) -> Result<CsvExport, ExportError> {
    build_runtime()?.block_on(export_object_type(options, object_type))
}

fn build_client(options: &ExportOptions) -> Result<CosmicClient, ExportError> {
    CosmicClient::new(ClientOptions {
        timeout: Duration::from_secs(options.timeout_secs),
        base_url: options.base_url.clone(),
    })
    .map_err(ExportError::from)
}

fn build_runtime() -> Result<tokio::runtime::Runtime, ExportError> {
    Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| CosmicError::Runtime(err.to_string()).into())
}

fn report_progress(options: &ExportOptions, paginator: &Paginator) {
    if let Some(callback) = options.progress_callback.as_ref() {
        callback(ExportProgress {
            fetched: paginator.fetched(),
            total: paginator.expected_total(),
        });
    }
}
