use crate::helpers::xml::XmlError;
use crate::helpers::zip::PackageError;
use thiserror::Error;

/// Main error type for document extraction.
/// Every variant is fatal to the call that produced it; no partial results are returned.
#[derive(Error, Debug)]
pub enum DocxError {
    /// The file is missing, unreadable or not a valid ZIP container
    #[error("Open package '{path}' failed: {source}")]
    ArchiveOpenError {
        path: String,
        #[source]
        source: PackageError,
    },

    /// No member is stored under the requested logical path
    #[error("Part '{0}' not found in package")]
    MemberNotFoundError(String),

    /// More than one member is stored under the requested logical path
    #[error("Part '{0}' found more than once in package")]
    AmbiguousMemberError(String),

    /// The member exists but its content could not be read
    #[error("Read part '{member}' failed: {source}")]
    MemberReadError {
        member: String,
        #[source]
        source: PackageError,
    },

    /// The member content is not decodable or not well-formed markup of the expected part
    #[error("Malformed XML in part '{part}': {source}")]
    MalformedXmlError {
        part: String,
        #[source]
        source: XmlError,
    },
}

/// Treats a missing part as absent rather than as a failure
pub trait OptionalPart<T> {
    /// Maps `MemberNotFoundError` to `Ok(None)`, keeping every other outcome
    fn optional(self) -> Result<Option<T>, DocxError>;
}

impl<T> OptionalPart<T> for Result<T, DocxError> {
    fn optional(self) -> Result<Option<T>, DocxError> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(DocxError::MemberNotFoundError(_)) => Ok(None),
            Err(error) => Err(error),
        }
    }
}
