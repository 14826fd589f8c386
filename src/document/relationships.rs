//! Relationship part helpers
use crate::helpers::xml::XmlError;
use crate::helpers::xml::XmlReader;
use crate::helpers::xml::XmlNodeHelper;
use crate::helpers::xml::match_xml_events;
use quick_xml::events::Event;

/// XML tag name for relationship elements
const TAG_RELATIONSHIP: &[u8] = b"Relationship";

/// Relationship type suffix of header parts
pub(crate) const HEADER_RELATIONSHIP: &str = "/header";
/// Relationship type suffix of footer parts
pub(crate) const FOOTER_RELATIONSHIP: &str = "/footer";

/// One internal relationship of the main document
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Relationship {
    pub(crate) id: String,
    pub(crate) kind: String,
    /// Archive path of the target part
    pub(crate) target: String,
}

/// Parses a relationship part, resolving targets against `base`.
///
/// External targets are skipped; the remaining relationships keep their order.
pub(crate) fn parse_relationships(xml: &str, base: &str) -> Result<Vec<Relationship>, XmlError> {
    let mut reader = XmlReader::new(xml.as_bytes());
    let mut relationships = Vec::new();
    match_xml_events!(reader => {
        Event::Start(event) if event.local_name().as_ref() == TAG_RELATIONSHIP => {
            let external = event.get_attribute_value("TargetMode")?.is_some_and(|mode| mode == "External");
            let id = event.get_attribute_value("Id")?;
            let kind = event.get_attribute_value("Type")?;
            let target = event.get_attribute_value("Target")?;
            if let (false, Some(id), Some(kind), Some(target)) = (external, id, kind, target) {
                relationships.push(Relationship {
                    id: id.into_owned(),
                    kind: kind.into_owned(),
                    target: to_part_path(base, &target),
                });
            }
        }
    });
    Ok(relationships)
}

/// Normalizes a relationship target into an archive path
///
/// Absolute targets start at the package root; relative ones are resolved
/// against `base`, with `.` and `..` segments collapsed.
pub(crate) fn to_part_path(base: &str, target: &str) -> String {
    let joined = match target.strip_prefix('/') {
        Some(absolute) => absolute.to_owned(),
        None => format!("{base}{target}"),
    };
    let mut segments = Vec::<&str>::new();
    for segment in joined.split('/') {
        match segment {
            "" | "." => (),
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }
    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    const RELATIONSHIPS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
    <Relationship Id="rId8" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/header" Target="header2.xml"/>
    <Relationship Id="rId7" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/header" Target="/word/header1.xml"/>
    <Relationship Id="rId9" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.com/?a=1&amp;b=2" TargetMode="External"/>
    <Relationship Id="rId10" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/footer" Target="../word/./footer1.xml"/>
</Relationships>"#;

    #[test]
    fn parse_document_relationships() {
        let relationships = parse_relationships(RELATIONSHIPS, "word/").unwrap();
        let targets: Vec<&str> = relationships.iter().map(|it| it.target.as_str()).collect();
        assert_eq!(targets, vec!["word/styles.xml", "word/header2.xml", "word/header1.xml", "word/footer1.xml"]);

        let headers: Vec<&str> = relationships
            .iter()
            .filter(|it| it.kind.ends_with(HEADER_RELATIONSHIP))
            .map(|it| it.id.as_str())
            .collect();
        assert_eq!(headers, vec!["rId8", "rId7"]);
    }

    #[test]
    fn malformed_relationships() {
        let result = parse_relationships("<Relationships><Relationship Id=\"rId1\"></Other></Relationships>", "word/");
        assert!(result.is_err());
    }

    #[test]
    fn part_paths() {
        assert_eq!(to_part_path("word/", "header1.xml"), "word/header1.xml");
        assert_eq!(to_part_path("word/", "/word/footer1.xml"), "word/footer1.xml");
        assert_eq!(to_part_path("word/", "../customXml/item1.xml"), "customXml/item1.xml");
        assert_eq!(to_part_path("", "word/document.xml"), "word/document.xml");
    }
}
