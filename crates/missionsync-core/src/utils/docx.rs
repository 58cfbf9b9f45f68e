/// Plain-text extraction from `.docx` transcripts
use crate::error::SyncError;
use regex::{Captures, Regex};
use std::io::{Cursor, Read};
use std::sync::LazyLock;
use tracing::info;

const DOCUMENT_PART: &str = "word/document.xml";

// Only `<w:t>` runs carry visible text; `<w:delText>` and `<w:instrText>` are skipped
static DOCUMENT_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<w:t(?:\s[^>]*)?>(?P<text>[^<]*)</w:t>|(?P<tab><w:tab\b[^>]*/>)|(?P<br><w:(?:br|cr)\b[^>]*/>)|(?P<para></w:p>)").unwrap()
});
static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#(?P<dec>[0-9]+)|#[xX](?P<hex>[0-9a-fA-F]+)|(?P<name>lt|gt|quot|apos|amp));").unwrap()
});

/// Extracts the body text of a `.docx` file.
///
/// Only `<w:t>` text runs are read; paragraphs and line breaks become
/// newlines and tabs are kept. Fails on empty input, on archives without a
/// main document part, and on documents with no visible text.
pub fn extract_docx_text(content: &[u8]) -> Result<String, SyncError> {
    if content.is_empty() {
        return Err(SyncError::Document("The .docx file is empty.".to_string()));
    }

    let mut archive = zip::ZipArchive::new(Cursor::new(content))
        .map_err(|e| SyncError::Document(format!("Not a valid .docx archive: {}", e)))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| SyncError::Document(format!("Missing {}: {}", DOCUMENT_PART, e)))?
        .read_to_string(&mut xml)
        .map_err(|e| SyncError::Document(format!("Failed to read {}: {}", DOCUMENT_PART, e)))?;

    let text = document_xml_to_text(&xml);
    if text.trim().is_empty() {
        return Err(SyncError::Document(
            "No text content found in the .docx file.".to_string(),
        ));
    }

    info!("Extracted {} characters from .docx file", text.chars().count());
    Ok(text)
}

fn document_xml_to_text(xml: &str) -> String {
    let mut text = String::with_capacity(xml.len() / 4);

    for caps in DOCUMENT_TOKEN.captures_iter(xml) {
        if let Some(run) = caps.name("text") {
            text.push_str(&decode_entities(run.as_str()));
        } else if caps.name("tab").is_some() {
            text.push('\t');
        } else {
            text.push('\n');
        }
    }

    text
}

/// Decodes named, decimal and hex character references in one pass.
/// References to invalid code points are kept verbatim.
fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures| {
            let decoded = if let Some(dec) = caps.name("dec") {
                dec.as_str().parse::<u32>().ok().and_then(char::from_u32)
            } else if let Some(hex) = caps.name("hex") {
                u32::from_str_radix(hex.as_str(), 16).ok().and_then(char::from_u32)
            } else {
                match caps.name("name").map(|m| m.as_str()) {
                    Some("lt") => Some('<'),
                    Some("gt") => Some('>'),
                    Some("quot") => Some('"'),
                    Some("apos") => Some('\''),
                    _ => Some('&'),
                }
            };

            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}
