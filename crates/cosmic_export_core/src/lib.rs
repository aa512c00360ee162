pub mod bootstrap;
pub mod client;
pub mod csv_utils;
pub mod errors;
pub mod export;
pub mod models;
pub mod paginate;
pub mod schema;
pub mod timestamp;

pub use bootstrap::{parse_bucket_params, BucketCredentials};
pub use client::{ClientOptions, CosmicClient, ObjectQuery, DEFAULT_BASE_URL, PAGE_SIZE};
pub use csv_utils::{header_row, record_row, serialize_value};
pub use errors::{CosmicError, ExportError};
pub use export::{
    csv_filename, export_object_type, export_object_type_blocking, fetch_bucket_catalog,
    fetch_bucket_catalog_blocking, generate_csv, CsvExport, ExportOptions, ExportProgress,
    ProgressCallback,
};
pub use models::{Metafield, ObjectType, ObjectsPage, RemoteRecord, StatusFilter};
pub use paginate::{PaginationStep, Paginator, MAX_MALFORMED_PAGES};
pub use schema::{derive_schema, ColumnSchema, EXCLUDED_KEYS};
pub use timestamp::current_timestamp;
