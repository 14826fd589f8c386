//! XML parsing utilities for WordprocessingML parts
//! Provides the XML reader wrapper, text decoding and entity helpers

use encoding_rs::Encoding;
use encoding_rs::UTF_8;
use quick_xml::escape::resolve_xml_entity;
use quick_xml::events::BytesRef;
use quick_xml::events::BytesStart;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::borrow::Cow;
use std::io::BufRead;
use thiserror::Error;

/// Errors raised while decoding or parsing part markup
#[derive(Error, Debug)]
pub enum XmlError {
    #[error("{0}")]
    ParseError(#[from] quick_xml::Error),

    #[error("{0}")]
    EncodingError(#[from] quick_xml::encoding::EncodingError),

    #[error("{0}")]
    AttributeError(#[from] quick_xml::events::attributes::AttrError),

    #[error("Parse entity '{0}' failed")]
    ParseEntityError(String),

    #[error("Content is not valid {0} text")]
    TextDecodingError(&'static str),

    #[error("Expected root element <{expected}> but found <{found}>")]
    UnexpectedRootError { expected: String, found: String },

    #[error("Missing root element")]
    MissingRootError,

    #[error("Unexpected end of input with {0} unclosed element(s)")]
    UnclosedElementError(usize),
}

/// XML reader wrapper configured for part parsing
pub(crate) struct XmlReader<R: BufRead> {
    reader: Reader<R>,
    buffer: Vec<u8>,
}

impl<R: BufRead> XmlReader<R> {
    /// Creates a new XML reader; mismatched end tags are reported as errors
    pub(crate) fn new(buf_reader: R) -> XmlReader<R> {
        let mut reader = Reader::from_reader(buf_reader);
        let config = reader.config_mut();
        config.check_comments = false;
        config.check_end_names = true;
        config.expand_empty_elements = true;
        config.trim_text(false);

        let buffer = Vec::with_capacity(1024);
        XmlReader { reader, buffer }
    }

    /// Reads the next XML event from the reader
    pub(crate) fn next(&'_ mut self) -> Result<Option<Event<'_>>, XmlError> {
        self.buffer.clear();
        match self.reader.read_event_into(&mut self.buffer) {
            Ok(Event::Eof) => Ok(None),
            Ok(event) => Ok(Some(event)),
            Err(error) => Err(XmlError::ParseError(error)),
        }
    }
}

/// Helper trait for XML nodes providing attribute access
pub(crate) trait XmlNodeHelper<'a> {
    /// Gets the unescaped value of the attribute with the given qualified name
    fn get_attribute_value(&'a self, name: &str) -> Result<Option<Cow<'a, str>>, XmlError>;
}

impl<'a> XmlNodeHelper<'a> for BytesStart<'a> {
    fn get_attribute_value(&'a self, name: &str) -> Result<Option<Cow<'a, str>>, XmlError> {
        match self.try_get_attribute(name)? {
            Some(attribute) => Ok(Some(attribute.unescape_value()?)),
            None => Ok(None),
        }
    }
}

/// Helper trait for building text content from XML events
pub(crate) trait XmlTextContextHelper {
    /// Appends text content from BytesRef event (handles entities and character references)
    fn push_bytes_ref(&mut self, bytes: &BytesRef) -> Result<(), XmlError>;
}

impl XmlTextContextHelper for String {
    /// Appends text content from BytesRef event, handling XML entities and character references
    fn push_bytes_ref(&mut self, bytes: &BytesRef) -> Result<(), XmlError> {
        let raw = bytes.xml_content()?;
        if let Some(number) = raw.strip_prefix('#') {
            let code = match number.strip_prefix('x') {
                Some(hex) => u32::from_str_radix(hex, 16),
                None => number.parse::<u32>(),
            };
            match code.ok().and_then(std::char::from_u32) {
                Some(character) => self.push(character),
                None => Err(XmlError::ParseEntityError(raw.to_string()))?,
            }
        } else if let Some(entity) = resolve_xml_entity(&raw) {
            self.push_str(entity);
        } else {
            Err(XmlError::ParseEntityError(raw.to_string()))?;
        }

        Ok(())
    }
}

/// Decodes raw part bytes into text.
///
/// A byte order mark wins, then the `encoding` label of the XML declaration,
/// then UTF-8. Bytes that are invalid in the chosen encoding are an error.
pub(crate) fn decode_text(bytes: &[u8]) -> Result<String, XmlError> {
    let (encoding, bom_length) = Encoding::for_bom(bytes)
        .unwrap_or_else(|| (declared_encoding(bytes).unwrap_or(UTF_8), 0));
    encoding
        .decode_without_bom_handling_and_without_replacement(&bytes[bom_length..])
        .map(|text| text.into_owned())
        .ok_or(XmlError::TextDecodingError(encoding.name()))
}

/// Reads the encoding label from an ASCII-compatible XML declaration
fn declared_encoding(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = bytes.strip_prefix(b"<?xml")?;
    let end = head.windows(2).position(|window| window == b"?>")?;
    let declaration = std::str::from_utf8(&head[..end]).ok()?;
    let (_, rest) = declaration.split_once("encoding")?;
    let rest = rest.trim_start().strip_prefix('=')?.trim_start();
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let label = rest[1..].split(quote).next()?;
    // An ASCII-readable declaration cannot be UTF-16, so map those labels to UTF-8
    Encoding::for_label(label.as_bytes()).map(Encoding::output_encoding)
}

macro_rules! match_xml_events {
    ($reader:expr => { $($arms:tt)* }) => {
        while let Some(result) = $reader.next()? {
            match result {
                Event::Eof => break,
                $($arms)*
                _ => (),
            }
        }
    };
}

pub(crate) use match_xml_events;
