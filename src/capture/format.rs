//! Header and body dumps for recorded exchanges
//!
//! Turns an HTTP header map and a buffered body into the two strings an
//! `Exchange` message carries: a raw header block and a display-ready body.
//! Also renders the plain-text dump used by the raw exchange log.

use crate::model::Exchange;
use axum::http::{header, HeaderMap};
use quick_xml::{events::Event, Reader, Writer};

/// Content type assumed for bodies that are neither JSON, XML nor UTF-8
const OCTET_STREAM: &str = "application/octet-stream";

/// Dump headers as `Canonical-Name: value\r\n` lines, sorted by name
///
/// A header with several values produces one line per value, in the order
/// they were received.
pub fn dump_headers(headers: &HeaderMap) -> String {
    let mut names: Vec<_> = headers.keys().collect();
    names.sort_by(|a, b| a.as_str().cmp(b.as_str()));

    let mut out = String::new();
    for name in names {
        let canonical = canonical_name(name.as_str());
        for value in headers.get_all(name) {
            let value = String::from_utf8_lossy(value.as_bytes());
            // Keep one header per line
            let value = value.replace(['\r', '\n'], " ");
            out.push_str(&canonical);
            out.push_str(": ");
            out.push_str(value.trim());
            out.push_str("\r\n");
        }
    }
    out
}

/// `content-type` -> `Content-Type`
pub fn canonical_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

/// Display form of a body, chosen by its content type
///
/// Returns `None` for an empty body so the inspector shows its placeholder.
/// Without a `Content-Type` header the type is sniffed from the bytes.
pub fn dump_body(headers: &HeaderMap, body: &[u8]) -> Option<String> {
    if body.is_empty() {
        return None;
    }

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| sniff_content_type(body).to_string());

    let media = media_type(&content_type);
    let dump = if is_json(&media) {
        pretty_json(body)
    } else if is_xml(&media) {
        pretty_xml(body)
    } else if media == "text/plain" || media == "application/x-www-form-urlencoded" {
        String::from_utf8_lossy(body).into_owned()
    } else {
        format!("content-type {} preview not supported", content_type)
    };
    Some(dump)
}

/// Best guess at the content type of an unlabeled body
pub fn sniff_content_type(body: &[u8]) -> &'static str {
    if serde_json::from_slice::<serde_json::Value>(body).is_ok() {
        return "application/json";
    }
    match std::str::from_utf8(body) {
        Ok(text) if text.trim_start().starts_with("<?xml") => "text/xml; charset=utf-8",
        Ok(_) => "text/plain; charset=utf-8",
        Err(_) => OCTET_STREAM,
    }
}

/// Lowercased media type without parameters
fn media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

fn is_json(media: &str) -> bool {
    media == "application/json" || media.ends_with("+json")
}

fn is_xml(media: &str) -> bool {
    media == "text/xml" || media == "application/xml" || media.ends_with("+xml")
}

/// Two-space indented JSON, or the input unchanged if it does not parse
fn pretty_json(body: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or_else(|| String::from_utf8_lossy(body).into_owned())
}

/// Two-space indented XML, or the input unchanged if it is not well formed
fn pretty_xml(body: &[u8]) -> String {
    indent_xml(body).unwrap_or_else(|| String::from_utf8_lossy(body).into_owned())
}

fn indent_xml(body: &[u8]) -> Option<String> {
    let mut reader = Reader::from_reader(body);
    reader.config_mut().trim_text(true);
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf).ok()? {
            Event::Eof => break,
            event => writer.write_event(event).ok()?,
        }
        buf.clear();
    }
    String::from_utf8(writer.into_inner()).ok()
}

/// Plain-text dump of one exchange, request first
pub fn raw_dump(exchange: &Exchange) -> String {
    format!(
        "\n-------------------\n~ REQUEST:\n{} {}\n{}\n\n{}\n~ RESPONSE:\nStatus: {}\n{}\n\n{}\n-------------------",
        exchange.method,
        exchange.path,
        exchange.request.headers_display(),
        exchange.request.body_or(""),
        exchange.status,
        exchange.response.headers_display(),
        exchange.response.body_or(""),
    )
}
