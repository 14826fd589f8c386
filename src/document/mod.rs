//! # Document Extraction
//!
//! Composes the package pipeline: open the archive, resolve a part by its
//! logical path, read and decode the part, then map its markup onto the model.
//! Each step surfaces its first failure; archive handles are released when
//! the owning [`DocxFile`] is dropped, whichever step failed.
use crate::error::DocxError;
use crate::error::OptionalPart;
use crate::helpers::xml::decode_text;
use crate::helpers::xml::XmlError;
use crate::helpers::zip::Package;
use log::debug;
use std::path::Path;
use std::str::FromStr;

pub(crate) mod mapper;
pub(crate) mod model;
pub(crate) mod paths;
pub(crate) mod relationships;
pub(crate) mod resolver;

#[cfg(test)]
pub(crate) mod testing;

use crate::document::model::Document;
use crate::document::model::Extraction;
use crate::document::model::Footer;
use crate::document::model::Header;
use crate::document::paths::PartPaths;
use crate::document::relationships::parse_relationships;
use crate::document::relationships::FOOTER_RELATIONSHIP;
use crate::document::relationships::HEADER_RELATIONSHIP;
use crate::document::resolver::resolve_member;

/// An open document package.
///
/// Holds one archive handle for any number of part retrievals. The handle is
/// closed when the value is dropped.
pub struct DocxFile {
    name: String,
    package: Package,
    paths: PartPaths,
}

impl DocxFile {
    /// Opens a package file with the conventional part paths
    pub fn open<P: AsRef<Path>>(path: P) -> Result<DocxFile, DocxError> {
        Self::open_with_paths(path, PartPaths::default())
    }

    /// Opens a package file, locating parts through `paths`
    pub fn open_with_paths<P: AsRef<Path>>(path: P, paths: PartPaths) -> Result<DocxFile, DocxError> {
        let name = path.as_ref().display().to_string();
        let package = Package::open(path.as_ref()).map_err(|source| DocxError::ArchiveOpenError {
            path: name.clone(),
            source,
        })?;
        debug!("Opened package '{}' with {} members", name, package.members().len());
        Ok(DocxFile { name, package, paths })
    }

    /// Opens a package held in memory with the conventional part paths
    pub fn from_bytes(bytes: Vec<u8>) -> Result<DocxFile, DocxError> {
        let name = "<memory>".to_owned();
        let package = Package::from_bytes(bytes).map_err(|source| DocxError::ArchiveOpenError {
            path: name.clone(),
            source,
        })?;
        Ok(DocxFile {
            name,
            package,
            paths: PartPaths::default(),
        })
    }

    /// Returns the paths used to locate parts
    pub fn paths(&self) -> &PartPaths {
        &self.paths
    }

    /// Reads the main document part
    pub fn document(&mut self) -> Result<Document, DocxError> {
        parse_part(&mut self.package, &self.paths.document)
    }

    /// Reads the first header part at its fixed path
    pub fn header(&mut self) -> Result<Header, DocxError> {
        parse_part(&mut self.package, &self.paths.header)
    }

    /// Reads the first footer part at its fixed path
    pub fn footer(&mut self) -> Result<Footer, DocxError> {
        parse_part(&mut self.package, &self.paths.footer)
    }

    /// Reads every header part the main document references, in relationship order
    pub fn headers(&mut self) -> Result<Vec<Header>, DocxError> {
        self.related_parts(HEADER_RELATIONSHIP)
    }

    /// Reads every footer part the main document references, in relationship order
    pub fn footers(&mut self) -> Result<Vec<Footer>, DocxError> {
        self.related_parts(FOOTER_RELATIONSHIP)
    }

    /// Reads the document together with the first header and footer, when present
    pub fn extract(&mut self) -> Result<Extraction, DocxError> {
        let document = self.document()?;
        let header = self.header().optional()?;
        let footer = self.footer().optional()?;
        debug!(
            "Extracted '{}': {} paragraphs, {} tables, header {}, footer {}",
            self.name,
            document.body.paragraphs.len(),
            document.body.tables.len(),
            if header.is_some() { "present" } else { "absent" },
            if footer.is_some() { "present" } else { "absent" },
        );
        Ok(Extraction { document, header, footer })
    }

    fn related_parts<T>(&mut self, kind: &str) -> Result<Vec<T>, DocxError>
    where
        T: FromStr<Err = XmlError>,
    {
        let path = &self.paths.relationships;
        let xml = read_part(&mut self.package, path)?;
        let relationships = parse_relationships(&xml, self.paths.relationship_base())
            .map_err(|source| DocxError::MalformedXmlError { part: path.to_owned(), source })?;
        relationships
            .iter()
            .filter(|relationship| relationship.kind.ends_with(kind))
            .map(|relationship| {
                debug!("Following relationship '{}' to '{}'", relationship.id, relationship.target);
                parse_part(&mut self.package, &relationship.target)
            })
            .collect()
    }
}

/// Resolves, reads and decodes one part
fn read_part(package: &mut Package, path: &str) -> Result<String, DocxError> {
    let member = resolve_member(package, path)?;
    let bytes = package.read_member(&member).map_err(|source| DocxError::MemberReadError {
        member: path.to_owned(),
        source,
    })?;
    decode_text(&bytes).map_err(|source| DocxError::MalformedXmlError { part: path.to_owned(), source })
}

/// Reads one part and maps it onto the model
fn parse_part<T>(package: &mut Package, path: &str) -> Result<T, DocxError>
where
    T: FromStr<Err = XmlError>,
{
    let xml = read_part(package, path)?;
    xml.parse()
        .map_err(|source| DocxError::MalformedXmlError { part: path.to_owned(), source })
}

/// Reads the main document part of the package at `path`
pub fn get_document<P: AsRef<Path>>(path: P) -> Result<Document, DocxError> {
    DocxFile::open(path)?.document()
}

/// Reads the first header part of the package at `path`
pub fn get_header<P: AsRef<Path>>(path: P) -> Result<Header, DocxError> {
    DocxFile::open(path)?.header()
}

/// Reads the first footer part of the package at `path`
pub fn get_footer<P: AsRef<Path>>(path: P) -> Result<Footer, DocxError> {
    DocxFile::open(path)?.footer()
}

/// Reads all header parts referenced by the package at `path`
pub fn get_headers<P: AsRef<Path>>(path: P) -> Result<Vec<Header>, DocxError> {
    DocxFile::open(path)?.headers()
}

/// Reads all footer parts referenced by the package at `path`
pub fn get_footers<P: AsRef<Path>>(path: P) -> Result<Vec<Footer>, DocxError> {
    DocxFile::open(path)?.footers()
}

/// Reads the document, first header and first footer of the package at `path`
pub fn get_extraction<P: AsRef<Path>>(path: P) -> Result<Extraction, DocxError> {
    DocxFile::open(path)?.extract()
}
