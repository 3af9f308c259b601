//! Pure per-format serializers.
//!
//! Each formatter maps `(records, unified field order)` to bytes without
//! touching the filesystem, so formatting logic is testable on its own.

use anyhow::{Context, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use rust_xlsxwriter::Workbook;

use crate::record::Record;

/// Compute the unified field-name ordering: first occurrence across all
/// records, scanning records and their fields in order. Used as the column
/// order for the tabular formats (CSV, Excel, HTML).
pub fn unified_field_names(records: &[Record]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for record in records {
        for (name, _) in record.iter() {
            if !names.iter().any(|seen| seen == name) {
                names.push(name.to_string());
            }
        }
    }
    names
}

/// Pretty-printed JSON array; each record keeps its own key order and
/// non-ASCII characters are written literally.
pub fn to_json(records: &[Record]) -> Result<String> {
    serde_json::to_string_pretty(records).context("Failed to serialize records to JSON")
}

/// CSV with a header row from the unified field ordering; missing fields
/// render as empty cells. No records means a zero-byte file, not a bare
/// header.
pub fn to_csv(records: &[Record], field_names: &[String]) -> Result<Vec<u8>> {
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(field_names)
        .context("Failed to write CSV header")?;

    for record in records {
        writer
            .write_record(field_names.iter().map(|name| record.get(name).unwrap_or("")))
            .context("Failed to write CSV row")?;
    }

    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {e}"))
}

/// Excel workbook with a single sheet named "Transcripts". An empty batch
/// still produces a valid workbook with the empty sheet.
pub fn to_excel(records: &[Record], field_names: &[String]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet
        .set_name("Transcripts")
        .context("Failed to name worksheet")?;

    if !records.is_empty() {
        for (col, name) in field_names.iter().enumerate() {
            sheet
                .write_string(0, col as u16, name)
                .context("Failed to write worksheet header")?;
        }
        for (row, record) in records.iter().enumerate() {
            for (col, name) in field_names.iter().enumerate() {
                sheet
                    .write_string(row as u32 + 1, col as u16, record.get(name).unwrap_or(""))
                    .context("Failed to write worksheet cell")?;
            }
        }
    }

    workbook
        .save_to_buffer()
        .context("Failed to serialize workbook")
}

/// Standalone HTML page with one table. Cell text is escaped; field names
/// used as header text are not, since they come from the pipeline's fixed
/// schema rather than fetched data.
pub fn to_html(records: &[Record], field_names: &[String]) -> String {
    let mut parts: Vec<String> = vec![
        "<!DOCTYPE html>".to_string(),
        "<html>".to_string(),
        "<head>".to_string(),
        "  <meta charset=\"UTF-8\" />".to_string(),
        "  <title>YouTube Transcripts</title>".to_string(),
        "</head>".to_string(),
        "<body>".to_string(),
        "  <h1>YouTube Transcripts</h1>".to_string(),
    ];

    if records.is_empty() {
        parts.push("  <p>No data available.</p>".to_string());
        parts.push("</body></html>".to_string());
        return parts.join("\n");
    }

    parts.push("  <table border='1' cellspacing='0' cellpadding='4'>".to_string());
    parts.push("    <thead>".to_string());
    parts.push("      <tr>".to_string());
    for name in field_names {
        parts.push(format!("        <th>{name}</th>"));
    }
    parts.push("      </tr>".to_string());
    parts.push("    </thead>".to_string());
    parts.push("    <tbody>".to_string());

    for record in records {
        parts.push("      <tr>".to_string());
        for name in field_names {
            let value = record.get(name).unwrap_or("");
            parts.push(format!("        <td>{}</td>", escape_html(value)));
        }
        parts.push("      </tr>".to_string());
    }

    parts.push("    </tbody>".to_string());
    parts.push("  </table>".to_string());
    parts.push("</body>".to_string());
    parts.push("</html>".to_string());

    parts.join("\n")
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// XML document with a `<transcripts>` root and one `<video>` element per
/// record; each field becomes a child element named after the field key, in
/// the record's own field order. Keys are trusted to be valid element names.
pub fn to_xml(records: &[Record]) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .context("Failed to write XML declaration")?;

    if records.is_empty() {
        writer
            .write_event(Event::Empty(BytesStart::new("transcripts")))
            .context("Failed to write XML root")?;
        return Ok(writer.into_inner());
    }

    writer
        .write_event(Event::Start(BytesStart::new("transcripts")))
        .context("Failed to write XML root")?;

    for record in records {
        writer
            .write_event(Event::Start(BytesStart::new("video")))
            .context("Failed to write XML record")?;
        for (name, value) in record.iter() {
            writer
                .write_event(Event::Start(BytesStart::new(name)))
                .context("Failed to write XML field")?;
            writer
                .write_event(Event::Text(BytesText::new(value)))
                .context("Failed to write XML field")?;
            writer
                .write_event(Event::End(BytesEnd::new(name)))
                .context("Failed to write XML field")?;
        }
        writer
            .write_event(Event::End(BytesEnd::new("video")))
            .context("Failed to write XML record")?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("transcripts")))
        .context("Failed to write XML root")?;

    Ok(writer.into_inner())
}
