/// Logical path of the main document part
pub const DOCUMENT_PART: &str = "word/document.xml";
/// Logical path of the first header part
pub const HEADER_PART: &str = "word/header1.xml";
/// Logical path of the first footer part
pub const FOOTER_PART: &str = "word/footer1.xml";
/// Logical path of the main document's relationship part
pub const DOCUMENT_RELATIONSHIPS_PART: &str = "word/_rels/document.xml.rels";

/// Archive paths used to locate each part of a package.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartPaths {
    /// Main document part
    pub document: String,
    /// Header part read by fixed-path lookup
    pub header: String,
    /// Footer part read by fixed-path lookup
    pub footer: String,
    /// Relationship part listing every header and footer of the document
    pub relationships: String,
}

impl Default for PartPaths {
    fn default() -> Self {
        PartPaths {
            document: DOCUMENT_PART.to_owned(),
            header: HEADER_PART.to_owned(),
            footer: FOOTER_PART.to_owned(),
            relationships: DOCUMENT_RELATIONSHIPS_PART.to_owned(),
        }
    }
}

impl PartPaths {
    /// Directory that relative relationship targets are resolved against
    pub(crate) fn relationship_base(&self) -> &str {
        self.relationships
            .rsplit_once("_rels/")
            .map(|(base, _)| base)
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths() {
        let paths = PartPaths::default();
        assert_eq!(paths.document, "word/document.xml");
        assert_eq!(paths.header, "word/header1.xml");
        assert_eq!(paths.footer, "word/footer1.xml");
        assert_eq!(paths.relationship_base(), "word/");
    }

    #[test]
    fn relationship_base_at_root() {
        let paths = PartPaths {
            relationships: "_rels/document.xml.rels".to_owned(),
            ..PartPaths::default()
        };
        assert_eq!(paths.relationship_base(), "");
    }
}
