//! # Rusty Docx
//!
//! Read-only text extraction from WordprocessingML (`.docx`) packages.
//!
//! ## Features
//!
//! - **Body text**: paragraph texts in document order
//! - **Tables**: rows and cells, each cell flattened to a single string
//! - **Headers and footers**: the first header/footer by conventional path, or
//!   every header/footer the document references through its relationships
//! - **Typed failures**: missing, duplicated, unreadable and malformed parts
//!   are reported as distinct [`DocxError`] variants; nothing panics on bad input
//! - **Self-contained results**: returned values hold no file handles and can
//!   be sent across threads
//!
//! ## Example
//!
//! ```no_run
//! let document = rusty_docx::get_document("report.docx")?;
//! for paragraph in &document.body.paragraphs {
//!     println!("{paragraph}");
//! }
//! # Ok::<(), rusty_docx::DocxError>(())
//! ```

mod document;
mod error;
mod helpers;

pub use crate::document::get_document;
pub use crate::document::get_extraction;
pub use crate::document::get_footer;
pub use crate::document::get_footers;
pub use crate::document::get_header;
pub use crate::document::get_headers;
pub use crate::document::model::Body;
pub use crate::document::model::Document;
pub use crate::document::model::Extraction;
pub use crate::document::model::Footer;
pub use crate::document::model::Header;
pub use crate::document::model::Table;
pub use crate::document::model::TableColumn;
pub use crate::document::model::TableRow;
pub use crate::document::paths::PartPaths;
pub use crate::document::paths::DOCUMENT_PART;
pub use crate::document::paths::DOCUMENT_RELATIONSHIPS_PART;
pub use crate::document::paths::FOOTER_PART;
pub use crate::document::paths::HEADER_PART;
pub use crate::document::resolver::resolve_member;
pub use crate::document::DocxFile;
pub use crate::error::DocxError;
pub use crate::error::OptionalPart;
pub use crate::helpers::xml::XmlError;
pub use crate::helpers::zip::MemberRef;
pub use crate::helpers::zip::Package;
pub use crate::helpers::zip::PackageError;
