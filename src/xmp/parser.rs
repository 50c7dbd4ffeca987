//! Streaming XMP packet parser
//!
//! The packet is read as a stream of quick-xml events and fed through a
//! small state machine: a stack of open element names plus the two output
//! maps of [`XmpDocument`].

use std::collections::HashSet;

use lazy_static::lazy_static;
use log::{debug, trace};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::errors::MetadataResult;
use crate::utils::string_utils::{capitalize_first, local_name, lowercase_first};
use crate::xmp::document::{upsert, XmpDocument, XmpValue};
use crate::xmp::locator;

lazy_static! {
    /// Structural elements whose names never become keys
    static ref ENVELOPE_TAGS: HashSet<&'static str> = [
        "x:xmpmeta",
        "rdf:RDF",
        "rdf:Description",
        "rdf:Bag",
        "rdf:Alt",
        "rdf:Seq",
        "rdf:li",
        "mwg-rs:RegionList",
    ]
    .into_iter()
    .collect();
}

/// Locates and parses the XMP packet embedded in `data`
///
/// A buffer without a complete packet yields an empty document. Markup
/// errors inside a located packet are returned to the caller.
pub fn parse_xmp(data: &[u8]) -> MetadataResult<XmpDocument> {
    match locator::locate_packet(data) {
        Some(packet) => parse_packet(&String::from_utf8_lossy(packet)),
        None => Ok(XmpDocument::default()),
    }
}

/// Parses an extracted XMP packet
pub fn parse_packet(xml: &str) -> MetadataResult<XmpDocument> {
    let mut reader = Reader::from_str(xml);
    let mut visitor = XmpVisitor::default();

    loop {
        match reader.read_event()? {
            Event::Start(element) => {
                visitor.attributes(&element)?;
                visitor.open(element_name(&element));
            }
            Event::Empty(element) => {
                visitor.attributes(&element)?;
                visitor.open(element_name(&element));
                visitor.close();
            }
            Event::End(_) => visitor.close(),
            Event::Text(text) => visitor.text(&text.unescape()?),
            Event::CData(data) => visitor.text(&String::from_utf8_lossy(&data.into_inner())),
            Event::Eof => break,
            _ => {}
        }
    }

    let document = visitor.finish();
    debug!(
        "Parsed XMP packet: {} raw keys, {} flattened keys",
        document.raw.len(),
        document.flattened.len()
    );
    Ok(document)
}

fn element_name(element: &BytesStart) -> String {
    String::from_utf8_lossy(element.name().as_ref()).into_owned()
}

/// Parser state threaded through the event stream
#[derive(Default)]
struct XmpVisitor {
    /// Names of the currently open elements
    path: Vec<String>,
    /// Name of the most recently opened element
    last_opened: Option<String>,
    document: XmpDocument,
}

impl XmpVisitor {
    fn open(&mut self, name: String) {
        self.last_opened = Some(name.clone());
        self.path.push(name);
    }

    fn close(&mut self) {
        self.path.pop();
    }

    fn attributes(&mut self, element: &BytesStart) -> MetadataResult<()> {
        for attribute in element.attributes() {
            let attribute = attribute?;
            let name = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            let value = attribute.unescape_value()?.into_owned();
            self.attribute(name, value);
        }
        Ok(())
    }

    fn attribute(&mut self, name: String, value: String) {
        trace!("XMP attribute {} = {:?}", name, value);
        let key = lowercase_first(local_name(&name));
        upsert(&mut self.document.raw, name, XmpValue::Text(value.clone()));
        upsert(&mut self.document.flattened, key, XmpValue::Text(value));
    }

    fn text(&mut self, text: &str) {
        if text.trim().is_empty() {
            return;
        }

        let element = self.last_opened.as_deref().unwrap_or_default();
        let value = coerce_value(element, text);
        trace!("XMP text in {} = {:?}", element, value);

        if let Some(raw_key) = raw_key(&self.path) {
            upsert(&mut self.document.raw, raw_key, value.clone());
        }

        let key = flattened_key(&self.path);
        if !key.is_empty() {
            upsert(&mut self.document.flattened, key, value);
        }
    }

    fn finish(self) -> XmpDocument {
        self.document
    }
}

fn is_envelope(name: &str) -> bool {
    ENVELOPE_TAGS.contains(name)
}

/// Last non-envelope element of the path
fn raw_key(path: &[String]) -> Option<String> {
    path.iter().rev().find(|name| !is_envelope(name)).cloned()
}

/// Non-envelope path segments without prefixes, joined in camel case
fn flattened_key(path: &[String]) -> String {
    path.iter()
        .filter(|name| !is_envelope(name))
        .enumerate()
        .map(|(i, name)| {
            let local = local_name(name);
            if i == 0 {
                lowercase_first(local)
            } else {
                capitalize_first(local)
            }
        })
        .collect()
}

/// Coerces element text by the element's name
///
/// Text that does not parse as the expected number stays text.
fn coerce_value(element: &str, text: &str) -> XmpValue {
    let coerced = match element {
        "stArea:x" | "stArea:y" | "stArea:w" | "stArea:h" => leading_float(text).map(XmpValue::Float),
        "xmp:Rating" => leading_integer(text).map(XmpValue::Integer),
        // 0-99 percentage scale mapped onto 1-5 stars
        "MicrosoftPhoto:Rating" => leading_integer(text).map(|v| XmpValue::Integer((v + 12).div_euclid(25) + 1)),
        _ => None,
    };

    coerced.unwrap_or_else(|| XmpValue::Text(text.to_string()))
}

/// Parses the integer at the start of `text`, ignoring anything after it
fn leading_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let digits_end = trimmed
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());
    trimmed[..digits_end].parse().ok()
}

/// Parses the decimal number at the start of `text`, ignoring anything after it
fn leading_float(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let candidate_end = trimmed
        .char_indices()
        .find(|&(_, c)| !(c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')))
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());

    // Longest prefix that is a complete number, so "1.5e" reads as 1.5
    (1..=candidate_end).rev().find_map(|end| trimmed[..end].parse().ok())
}
