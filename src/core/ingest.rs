//! Uploaded file decoding: `.txt`, `.csv` and `.xlsx` into plain text.

use crate::utils::error::{FancyError, Result};
use regex::Regex;
use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::LazyLock;
use zip::ZipArchive;

static XLSX_CELL_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(?:t|v)(?:\s[^>]*)?>([^<]*)</(?:t|v)>").expect("xlsx cell pattern is valid")
});

/// Cap on the decompressed size of each XLSX part.
pub const DEFAULT_MAX_PART_BYTES: u64 = 20 * 1024 * 1024;

const SHARED_STRINGS: &str = "xl/sharedStrings.xml";
const WORKSHEETS_DIR: &str = "xl/worksheets/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Text,
    Csv,
    Xlsx,
    Unsupported,
}

impl FileKind {
    /// Chosen by extension, case-insensitively.
    pub fn from_file_name(file_name: &str) -> Self {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("txt") => Self::Text,
            Some("csv") => Self::Csv,
            Some("xlsx") => Self::Xlsx,
            _ => Self::Unsupported,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }
}

/// `max_part_bytes` bounds each decompressed XLSX part; plain formats are
/// already bounded by the upload size.
pub fn decode_to_text(
    kind: FileKind,
    file_name: &str,
    data: &[u8],
    max_part_bytes: u64,
) -> Result<String> {
    match kind {
        FileKind::Text => Ok(String::from_utf8_lossy(data).into_owned()),
        FileKind::Csv => csv_to_text(data),
        FileKind::Xlsx => xlsx_to_text(data, max_part_bytes),
        FileKind::Unsupported => Err(FancyError::UnsupportedFileError {
            file_name: file_name.to_string(),
        }),
    }
}

/// Every cell, header row included, one per line.
fn csv_to_text(data: &[u8]) -> Result<String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data);

    let mut cells = Vec::new();
    for record in reader.byte_records() {
        let record = record?;
        cells.extend(
            record
                .iter()
                .map(|field| String::from_utf8_lossy(field).into_owned()),
        );
    }

    tracing::debug!("Read {} CSV cells", cells.len());
    Ok(cells.join("\n"))
}

/// Shared strings and inline/numeric cell values of every worksheet.
fn xlsx_to_text(data: &[u8], max_part_bytes: u64) -> Result<String> {
    let mut archive = ZipArchive::new(Cursor::new(data))?;

    let mut parts: Vec<String> = archive
        .file_names()
        .filter(|name| {
            *name == SHARED_STRINGS || (name.starts_with(WORKSHEETS_DIR) && name.ends_with(".xml"))
        })
        .map(str::to_string)
        .collect();
    parts.sort_by_key(|name| part_order(name));

    if parts.is_empty() {
        return Err(FancyError::ProcessingError {
            message: "XLSX archive contains no worksheets".to_string(),
        });
    }

    let mut cells = Vec::new();
    for part in &parts {
        let entry = archive.by_name(part)?;
        if entry.size() > max_part_bytes {
            return Err(FancyError::FileTooLargeError {
                size: entry.size(),
                limit: max_part_bytes,
            });
        }

        // 宣告大小不可信，讀取時再設上限
        let mut raw = Vec::new();
        entry
            .take(max_part_bytes.saturating_add(1))
            .read_to_end(&mut raw)?;
        if raw.len() as u64 > max_part_bytes {
            return Err(FancyError::FileTooLargeError {
                size: raw.len() as u64,
                limit: max_part_bytes,
            });
        }
        let xml = String::from_utf8_lossy(&raw);

        cells.extend(
            XLSX_CELL_TEXT
                .captures_iter(&xml)
                .map(|caps| normalize_cell(&unescape_xml(&caps[1]))),
        );
    }

    tracing::debug!("Read {} XLSX cells from {} parts", cells.len(), parts.len());
    Ok(cells.join("\n"))
}

/// Shared strings first, then worksheets in workbook order (`sheet2` before `sheet10`).
fn part_order(name: &str) -> (u8, u64, String) {
    if name == SHARED_STRINGS {
        return (0, 0, String::new());
    }
    let stem = name
        .strip_prefix(WORKSHEETS_DIR)
        .and_then(|rest| rest.strip_suffix(".xml"))
        .unwrap_or(name);
    let digits_at = stem
        .rfind(|c: char| !c.is_ascii_digit())
        .map_or(0, |i| i + 1);
    match stem[digits_at..].parse::<u64>() {
        Ok(index) => (1, index, stem[..digits_at].to_string()),
        Err(_) => (2, 0, stem.to_string()),
    }
}

/// Numbers stored as `1.4155550132E+10` become `14155550132`.
fn normalize_cell(value: &str) -> String {
    if value.contains(['E', 'e']) {
        if let Ok(number) = value.parse::<f64>() {
            if number.is_finite() && number.fract() == 0.0 && number.abs() < 1e16 {
                return format!("{:.0}", number);
            }
        }
    }
    value.to_string()
}

fn unescape_xml(value: &str) -> String {
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
