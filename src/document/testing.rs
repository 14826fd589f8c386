//! Package fixtures built at test time
use std::io::Cursor;
use std::io::Write;
use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;
use zip::ZipWriter;

pub(crate) const SAMPLE_DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <w:body>
        <w:p><w:r><w:t>Start of page one</w:t></w:r></w:p>
        <w:tbl>
            <w:tblPr><w:tblW w:w="0" w:type="auto"/></w:tblPr>
            <w:tblGrid><w:gridCol w:w="2254"/><w:gridCol w:w="2254"/><w:gridCol w:w="2254"/><w:gridCol w:w="2254"/></w:tblGrid>
            <w:tr>
                <w:tc><w:tcPr><w:tcW w:w="2254" w:type="dxa"/></w:tcPr><w:p><w:r><w:t>1</w:t></w:r></w:p></w:tc>
                <w:tc><w:tcPr><w:tcW w:w="2254" w:type="dxa"/></w:tcPr><w:p><w:r><w:t>2</w:t></w:r></w:p></w:tc>
                <w:tc><w:tcPr><w:tcW w:w="2254" w:type="dxa"/></w:tcPr><w:p><w:r><w:t>3</w:t></w:r></w:p></w:tc>
                <w:tc><w:tcPr><w:tcW w:w="2254" w:type="dxa"/></w:tcPr><w:p><w:r><w:t>4</w:t></w:r></w:p></w:tc>
            </w:tr>
        </w:tbl>
        <w:p><w:r><w:t>End of page one</w:t></w:r></w:p>
        <w:sectPr><w:headerReference w:type="default" r:id="rId7"/><w:footerReference w:type="default" r:id="rId8"/></w:sectPr>
    </w:body>
</w:document>"#;

pub(crate) const SAMPLE_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:hdr xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:p><w:r><w:t>This is a header</w:t></w:r></w:p></w:hdr>"#;

pub(crate) const SAMPLE_FOOTER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:ftr xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:p><w:r><w:t>This is a footer</w:t></w:r></w:p></w:ftr>"#;

pub(crate) const SAMPLE_RELATIONSHIPS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId7" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/header" Target="header1.xml"/>
    <Relationship Id="rId8" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/footer" Target="footer1.xml"/>
</Relationships>"#;

/// Wraps body content in a namespaced document part
pub(crate) fn document_xml(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><w:body>{body}</w:body></w:document>"#
    )
}

/// Builds a deflated ZIP package holding the given parts in order
pub(crate) fn package_bytes(parts: &[(&str, &str)]) -> Vec<u8> {
    let parts: Vec<(&str, &[u8])> = parts.iter().map(|(name, content)| (*name, content.as_bytes())).collect();
    build(&parts, CompressionMethod::Deflated)
}

/// Builds a package with a single part of arbitrary bytes
pub(crate) fn package_bytes_raw(name: &str, content: &[u8]) -> Vec<u8> {
    build(&[(name, content)], CompressionMethod::Deflated)
}

/// Builds a package that stores `name` twice.
///
/// The writer refuses duplicate names, so the second entry is written under a
/// placeholder of equal length and renamed in the stored bytes afterwards.
pub(crate) fn package_bytes_with_duplicate(name: &str, first: &str, second: &str) -> Vec<u8> {
    let placeholder: String = "#".repeat(name.len());
    let mut bytes = build(
        &[(name, first.as_bytes()), (placeholder.as_str(), second.as_bytes())],
        CompressionMethod::Stored,
    );
    let (from, to) = (placeholder.as_bytes(), name.as_bytes());
    let mut position = 0;
    while let Some(offset) = bytes[position..].windows(from.len()).position(|window| window == from) {
        let start = position + offset;
        bytes[start..start + to.len()].copy_from_slice(to);
        position = start + to.len();
    }
    bytes
}

/// Builds a stored package with `count` empty members named `part/<n>.xml`
pub(crate) fn package_bytes_with_members(count: usize) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    for index in 0..count {
        writer.start_file(format!("part/{index}.xml"), options).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// The sample package: document, first header, first footer and relationships
pub(crate) fn sample_package_bytes() -> Vec<u8> {
    package_bytes(&[
        ("[Content_Types].xml", "<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\"/>"),
        ("word/document.xml", SAMPLE_DOCUMENT),
        ("word/header1.xml", SAMPLE_HEADER),
        ("word/footer1.xml", SAMPLE_FOOTER),
        ("word/_rels/document.xml.rels", SAMPLE_RELATIONSHIPS),
    ])
}

/// Writes package bytes to a temporary file that lives as long as the handle
pub(crate) fn temp_package(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

fn build(parts: &[(&str, &[u8])], method: CompressionMethod) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(method);
    for (name, content) in parts {
        writer.start_file(*name, options).unwrap();
        writer.write_all(content).unwrap();
    }
    writer.finish().unwrap().into_inner()
}
