use anyhow::{Context, Result};
use clap::ValueEnum;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::record::Record;
use crate::ScraperError;

pub mod formatters;

/// Target export format.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    /// Pretty-printed JSON array of records
    Json,
    /// CSV with a unified header row
    Csv,
    /// Excel workbook with a "Transcripts" sheet
    Excel,
    /// Standalone HTML page with one table
    Html,
    /// XML with one <video> element per record
    Xml,
}

impl ExportFormat {
    /// Canonical file extension for the format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "xlsx",
            ExportFormat::Html => "html",
            ExportFormat::Xml => "xml",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Excel => write!(f, "excel"),
            ExportFormat::Html => write!(f, "html"),
            ExportFormat::Xml => write!(f, "xml"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ScraperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "excel" => Ok(ExportFormat::Excel),
            "html" => Ok(ExportFormat::Html),
            "xml" => Ok(ExportFormat::Xml),
            other => Err(ScraperError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Export records to a single file, returning the path actually written.
///
/// When the path has no extension the canonical one for the format is
/// appended; an existing extension is left untouched even if it does not
/// match the format. Parent directories are created as needed. Any I/O or
/// serialization failure aborts the export; there is no partial-write
/// recovery.
pub fn export_records(records: &[Record], path: &Path, format: ExportFormat) -> Result<PathBuf> {
    let path = ensure_extension(path, format);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs_err::create_dir_all(parent).context("Failed to create output directory")?;
        }
    }

    tracing::info!("Exporting {} record(s) to {} as {}", records.len(), path.display(), format);
    if records.is_empty() {
        tracing::warn!("No records to export; writing an empty {} file", format);
    }

    let field_names = formatters::unified_field_names(records);
    let bytes = match format {
        ExportFormat::Json => formatters::to_json(records)?.into_bytes(),
        ExportFormat::Csv => formatters::to_csv(records, &field_names)?,
        ExportFormat::Excel => formatters::to_excel(records, &field_names)?,
        ExportFormat::Html => formatters::to_html(records, &field_names).into_bytes(),
        ExportFormat::Xml => formatters::to_xml(records)?,
    };

    fs_err::write(&path, bytes).context("Failed to write output file")?;
    Ok(path)
}

fn ensure_extension(path: &Path, format: ExportFormat) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(format.extension())
    }
}
