//! Typed model of the text content extracted from a package.
//!
//! All values are plain snapshots: they hold no reference to the archive
//! they were read from and can be shared freely across threads.

/// Root of the main document part
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    pub body: Body,
}

/// Content of the document body.
///
/// Paragraphs and tables are kept in two independent sequences, each in
/// document order; their relative interleaving is not recorded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Body {
    /// Text of every paragraph outside tables, empty paragraphs included
    pub paragraphs: Vec<String>,
    /// Outermost tables of the body
    pub tables: Vec<Table>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<TableRow>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableRow {
    pub columns: Vec<TableColumn>,
}

/// A table cell
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableColumn {
    /// All run text of the cell concatenated without separators
    pub cell: String,
}

impl Table {
    /// Returns the cell texts row by row
    pub fn to_grid(&self) -> Vec<Vec<&str>> {
        self.rows
            .iter()
            .map(|row| row.columns.iter().map(|column| column.cell.as_str()).collect())
            .collect()
    }
}

/// Flattened text of a header part
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Header {
    pub text: String,
}

/// Flattened text of a footer part
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Footer {
    pub text: String,
}

/// Everything extracted from one package in a single pass
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Extraction {
    pub document: Document,
    /// `None` when the package has no first header part
    pub header: Option<Header>,
    /// `None` when the package has no first footer part
    pub footer: Option<Footer>,
}
