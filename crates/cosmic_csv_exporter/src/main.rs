use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use console::style;
use cosmic_export_core::{
    export_object_type_blocking, fetch_bucket_catalog_blocking, parse_bucket_params,
    ExportOptions, ExportProgress, ObjectType, StatusFilter,
};
use indicatif::{ProgressBar, ProgressStyle};

#[derive(Parser, Debug)]
#[command(author, version, about = "Export Cosmic JS bucket objects to CSV by object type", long_about = None)]
struct Cli {
    /// Extension URL carrying bucket_slug and read_key query parameters
    #[arg(long = "url", conflicts_with_all = ["bucket", "read_key"])]
    url: Option<String>,

    /// Bucket slug
    #[arg(short = 'b', long = "bucket")]
    bucket: Option<String>,

    /// Bucket read key (omit for public buckets)
    #[arg(short = 'k', long = "read-key", default_value = "")]
    read_key: String,

    /// Only export objects with this publication status (published, draft or all)
    #[arg(short = 's', long = "status", default_value = "all")]
    status: StatusFilter,

    /// Object type slugs to export (default: every type in the bucket)
    #[arg(short = 't', long = "type")]
    types: Vec<String>,

    /// Output directory for the generated CSV files
    #[arg(short = 'o', long = "output", default_value = ".")]
    output: PathBuf,

    /// Request timeout in seconds
    #[arg(long = "timeout", default_value_t = 10)]
    timeout: u64,

    /// List the bucket's object types and exit
    #[arg(long = "list")]
    list: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (bucket_slug, read_key) = resolve_credentials(&cli)?;

    let options = ExportOptions {
        bucket_slug,
        read_key,
        status: cli.status,
        timeout_secs: cli.timeout,
        ..ExportOptions::default()
    };

    println!(
        "{}",
        style(format!(
            "Fetching object types for bucket {}...",
            options.bucket_slug
        ))
        .cyan()
    );
    let object_types =
        fetch_bucket_catalog_blocking(&options).context("failed to load the bucket catalog")?;
    if object_types.is_empty() {
        bail!("the bucket has no object types");
    }

    if cli.list {
        for object_type in &object_types {
            println!(
                "{}  {}",
                style(&object_type.slug).green(),
                object_type.title
            );
        }
        return Ok(());
    }

    let selected = select_types(object_types, &cli.types)?;
    fs::create_dir_all(&cli.output)
        .with_context(|| format!("failed to create {}", cli.output.display()))?;

    let mut failures = 0usize;
    for object_type in &selected {
        match export_one(&options, object_type, &cli.output) {
            Ok((path, rows)) => println!(
                "{} {} rows -> {}",
                style(format!("Exported {}:", object_type.slug)).green().bold(),
                rows,
                path.display()
            ),
            Err(err) => {
                failures += 1;
                eprintln!(
                    "{} {err:#}",
                    style(format!("Failed to export {}.", object_type.slug))
                        .red()
                        .bold()
                );
            }
        }
    }

    if failures > 0 {
        bail!("{failures} of {} exports failed", selected.len());
    }
    Ok(())
}

fn resolve_credentials(cli: &Cli) -> Result<(String, String)> {
    if let Some(url) = &cli.url {
        let credentials = parse_bucket_params(url)?;
        return Ok((credentials.bucket_slug, credentials.read_key));
    }
    match &cli.bucket {
        Some(bucket) if !bucket.is_empty() => Ok((bucket.clone(), cli.read_key.clone())),
        _ => bail!("either --url or --bucket is required"),
    }
}

fn select_types(object_types: Vec<ObjectType>, requested: &[String]) -> Result<Vec<ObjectType>> {
    if requested.is_empty() {
        return Ok(object_types);
    }
    let mut selected = Vec::new();
    for slug in requested {
        match object_types.iter().find(|t| &t.slug == slug) {
            Some(object_type) => selected.push(object_type.clone()),
            None => bail!("object type {slug} does not exist in this bucket"),
        }
    }
    Ok(selected)
}

fn export_one(
    options: &ExportOptions,
    object_type: &ObjectType,
    output_dir: &Path,
) -> Result<(PathBuf, u64)> {
    let bar = ProgressBar::new(0);
    bar.set_style(ProgressStyle::with_template("{spinner} {msg} {pos}/{len} objects")?);
    bar.set_message(object_type.slug.clone());

    let bar_handle = bar.clone();
    let mut per_type = options.clone();
    per_type.progress_callback = Some(Arc::new(move |progress: ExportProgress| {
        bar_handle.set_length(progress.total);
        bar_handle.set_position(progress.fetched);
    }));

    let result = export_object_type_blocking(&per_type, object_type);
    bar.finish_and_clear();

    let export =
        result.with_context(|| format!("failed to generate the {} CSV", object_type.slug))?;
    let path = output_dir.join(&export.filename);
    fs::write(&path, export.csv_data)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok((path, export.total_rows))
}
