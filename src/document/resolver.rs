use crate::error::DocxError;
use crate::helpers::zip::MemberRef;
use crate::helpers::zip::Package;

/// Finds the single member stored under `path`.
///
/// Names are compared exactly. No match is `MemberNotFoundError`; more than
/// one match is `AmbiguousMemberError`, since picking either would be a guess.
pub fn resolve_member(package: &Package, path: &str) -> Result<MemberRef, DocxError> {
    let mut matches = package.members().iter().filter(|member| member.name == path);
    match (matches.next(), matches.next()) {
        (Some(member), None) => Ok(member.clone()),
        (Some(_), Some(_)) => Err(DocxError::AmbiguousMemberError(path.to_owned())),
        (None, _) => Err(DocxError::MemberNotFoundError(path.to_owned())),
    }
}
