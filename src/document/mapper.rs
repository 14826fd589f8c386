//! Maps WordprocessingML markup onto the document model.
//!
//! Elements are matched by local name, so any namespace prefix is accepted.
//! Run text is the content of a `t` element directly inside an `r` element
//! that lies anywhere within a `p` element. Everything else is skipped.

use crate::document::model::Body;
use crate::document::model::Document;
use crate::document::model::Footer;
use crate::document::model::Header;
use crate::document::model::Table;
use crate::document::model::TableColumn;
use crate::document::model::TableRow;
use crate::helpers::xml::XmlError;
use crate::helpers::xml::XmlReader;
use crate::helpers::xml::XmlTextContextHelper;
use crate::helpers::xml::match_xml_events;
use quick_xml::events::Event;
use std::mem::take;
use std::str::FromStr;

// Root elements of the supported parts
const TAG_DOCUMENT: &[u8] = b"document";
const TAG_HEADER: &[u8] = b"hdr";
const TAG_FOOTER: &[u8] = b"ftr";

// Content elements
const TAG_PARAGRAPH: &[u8] = b"p";
const TAG_RUN: &[u8] = b"r";
const TAG_TEXT: &[u8] = b"t";
const TAG_TABLE: &[u8] = b"tbl";
const TAG_TABLE_ROW: &[u8] = b"tr";
const TAG_TABLE_CELL: &[u8] = b"tc";
const TAG_FALLBACK: &[u8] = b"Fallback";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Element {
    Paragraph,
    Run,
    Text,
    Table,
    TableRow,
    TableCell,
    Fallback,
    Other,
}

impl Element {
    fn from_local_name(name: &[u8]) -> Element {
        match name {
            TAG_PARAGRAPH => Element::Paragraph,
            TAG_RUN => Element::Run,
            TAG_TEXT => Element::Text,
            TAG_TABLE => Element::Table,
            TAG_TABLE_ROW => Element::TableRow,
            TAG_TABLE_CELL => Element::TableCell,
            TAG_FALLBACK => Element::Fallback,
            _ => Element::Other,
        }
    }
}

/// Receives the structure of a part as it is walked
trait PartVisitor {
    fn open(&mut self, _element: Element) {}
    fn close(&mut self, _element: Element) {}
    fn text(&mut self, text: &str);
}

/// Walks the markup of a part whose root element is `root`.
///
/// Walking stops once the root element closes; content after it is ignored.
fn walk<V: PartVisitor>(xml: &str, root: &[u8], visitor: &mut V) -> Result<(), XmlError> {
    let mut reader = XmlReader::new(xml.as_bytes());
    let mut stack = Vec::<Element>::new();
    let mut has_root = false;
    let mut reference = String::new();
    match_xml_events!(reader => {
        Event::Start(event) => {
            let name = event.local_name();
            if !has_root {
                if name.as_ref() != root {
                    Err(XmlError::UnexpectedRootError {
                        expected: String::from_utf8_lossy(root).into_owned(),
                        found: String::from_utf8_lossy(name.as_ref()).into_owned(),
                    })?;
                }
                has_root = true;
            }
            let element = Element::from_local_name(name.as_ref());
            stack.push(element);
            visitor.open(element);
        }
        Event::End(_) => {
            if let Some(element) = stack.pop() {
                visitor.close(element);
            }
            if stack.is_empty() {
                break;
            }
        }
        Event::Text(event) if is_run_text(&stack) => visitor.text(&event.xml_content()?),
        Event::CData(event) if is_run_text(&stack) => visitor.text(&event.xml_content()?),
        Event::GeneralRef(event) if is_run_text(&stack) => {
            reference.clear();
            reference.push_bytes_ref(&event)?;
            visitor.text(&reference);
        }
    });

    if !has_root {
        Err(XmlError::MissingRootError)?;
    }
    if !stack.is_empty() {
        Err(XmlError::UnclosedElementError(stack.len()))?;
    }
    Ok(())
}

fn is_run_text(stack: &[Element]) -> bool {
    // mc:Fallback repeats the content of the mc:Choice before it
    if stack.contains(&Element::Fallback) {
        return false;
    }
    match stack {
        [ancestors @ .., Element::Run, Element::Text] => ancestors.contains(&Element::Paragraph),
        _ => false,
    }
}

/// Collects body paragraphs and outermost tables
#[derive(Default)]
struct BodyBuilder {
    body: Body,
    paragraph_depth: usize,
    table_depth: usize,
    paragraph: String,
    table: Table,
    row: TableRow,
    cell: String,
}

impl PartVisitor for BodyBuilder {
    fn open(&mut self, element: Element) {
        match element {
            Element::Paragraph => {
                if self.paragraph_depth == 0 && self.table_depth == 0 {
                    self.paragraph.clear();
                }
                self.paragraph_depth += 1;
            }
            Element::Table => {
                self.table_depth += 1;
                if self.table_depth == 1 {
                    self.table = Table::default();
                }
            }
            Element::TableRow if self.table_depth == 1 => self.row = TableRow::default(),
            Element::TableCell if self.table_depth == 1 => self.cell.clear(),
            _ => (),
        }
    }

    fn close(&mut self, element: Element) {
        match element {
            Element::Paragraph => {
                self.paragraph_depth = self.paragraph_depth.saturating_sub(1);
                if self.paragraph_depth == 0 && self.table_depth == 0 {
                    self.body.paragraphs.push(take(&mut self.paragraph));
                }
            }
            Element::Table => {
                if self.table_depth == 1 {
                    self.body.tables.push(take(&mut self.table));
                }
                self.table_depth = self.table_depth.saturating_sub(1);
            }
            Element::TableRow if self.table_depth == 1 => self.table.rows.push(take(&mut self.row)),
            Element::TableCell if self.table_depth == 1 => self.row.columns.push(TableColumn {
                cell: take(&mut self.cell),
            }),
            _ => (),
        }
    }

    fn text(&mut self, text: &str) {
        if self.table_depth > 0 {
            self.cell.push_str(text);
        } else {
            self.paragraph.push_str(text);
        }
    }
}

/// Concatenates every run text of a part
#[derive(Default)]
struct FlatText(String);

impl PartVisitor for FlatText {
    fn text(&mut self, text: &str) {
        self.0.push_str(text);
    }
}

impl FromStr for Document {
    type Err = XmlError;

    fn from_str(xml: &str) -> Result<Self, Self::Err> {
        let mut builder = BodyBuilder::default();
        walk(xml, TAG_DOCUMENT, &mut builder)?;
        Ok(Document { body: builder.body })
    }
}

impl FromStr for Header {
    type Err = XmlError;

    fn from_str(xml: &str) -> Result<Self, Self::Err> {
        let mut text = FlatText::default();
        walk(xml, TAG_HEADER, &mut text)?;
        Ok(Header { text: text.0 })
    }
}

impl FromStr for Footer {
    type Err = XmlError;

    fn from_str(xml: &str) -> Result<Self, Self::Err> {
        let mut text = FlatText::default();
        walk(xml, TAG_FOOTER, &mut text)?;
        Ok(Footer { text: text.0 })
    }
}
