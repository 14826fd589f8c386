//! ZIP archive access for document packages
//! Enumerates every stored member name and reads member contents

use crate::helpers::reader::UnifiedReader;
use crate::helpers::string::to_u16;
use crate::helpers::string::to_u32;
use crate::helpers::string::to_u64;
use crate::helpers::string::to_usize;
use log::trace;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use std::path::Path;
use thiserror::Error;
use zip::ZipArchive;

const END_OF_CENTRAL_DIRECTORY: u32 = 0x06054b50;
const ZIP64_END_OF_CENTRAL_DIRECTORY_LOCATOR: u32 = 0x07064b50;
const ZIP64_END_OF_CENTRAL_DIRECTORY: u32 = 0x06064b50;
const CENTRAL_DIRECTORY_HEADER: u32 = 0x02014b50;

const END_OF_CENTRAL_DIRECTORY_SIZE: usize = 22;
const ZIP64_LOCATOR_SIZE: usize = 20;
const ZIP64_END_OF_CENTRAL_DIRECTORY_SIZE: usize = 56;
const CENTRAL_DIRECTORY_HEADER_SIZE: usize = 46;
const MAX_COMMENT_SIZE: usize = u16::MAX as usize;

/// General purpose flag marking UTF-8 encoded names
const FLAG_UTF8_NAME: u16 = 1 << 11;

/// Errors raised while opening a package or reading one of its members
#[derive(Error, Debug)]
pub enum PackageError {
    #[error("{0}")]
    IoError(#[from] std::io::Error),

    #[error("{0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("End of central directory record not found (not a ZIP archive?)")]
    EndOfCentralDirectoryError,

    #[error("The central directory is truncated or corrupted")]
    CentralDirectoryError,
}

/// Reference to one stored member of a package
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberRef {
    /// Raw position of the entry in the central directory, duplicates counted.
    /// This is not a `zip::ZipArchive` index, which merges duplicate names.
    pub index: usize,
    /// Stored name of the entry
    pub name: String,
}

/// Read-only, random-access view of a ZIP package.
///
/// The member list is taken from the raw central directory, so duplicate
/// entries stay visible to callers instead of being collapsed.
pub struct Package {
    source: UnifiedReader,
    members: Vec<MemberRef>,
}

impl Package {
    /// Opens a package file from disk
    pub fn open(path: &Path) -> Result<Package, PackageError> {
        Self::new(UnifiedReader::open(path)?)
    }

    /// Opens a package held in memory
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Package, PackageError> {
        Self::new(UnifiedReader::from_bytes(bytes))
    }

    fn new(mut source: UnifiedReader) -> Result<Package, PackageError> {
        let members = read_member_names(&mut source)?
            .into_iter()
            .enumerate()
            .map(|(index, name)| MemberRef { index, name })
            .collect();
        Ok(Package { source, members })
    }

    /// Returns all stored members in central directory order
    pub fn members(&self) -> &[MemberRef] {
        &self.members
    }

    /// Reads the complete, decompressed content of a member
    pub fn read_member(&mut self, member: &MemberRef) -> Result<Vec<u8>, PackageError> {
        let mut archive = ZipArchive::new(&mut self.source)?;
        let mut file = archive.by_name(&member.name)?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        trace!("Read {} bytes from member '{}'", bytes.len(), member.name);
        Ok(bytes)
    }
}

/// Lists the names of all central directory entries, duplicates included
fn read_member_names<RS: Read + Seek>(reader: &mut RS) -> Result<Vec<String>, PackageError> {
    let length = reader.seek(SeekFrom::End(0))?;
    let tail_length = length.min((END_OF_CENTRAL_DIRECTORY_SIZE + MAX_COMMENT_SIZE) as u64);
    let tail_start = length - tail_length;
    let tail = read_at(reader, tail_start, tail_length as usize)?;
    if tail.len() < END_OF_CENTRAL_DIRECTORY_SIZE {
        Err(PackageError::EndOfCentralDirectoryError)?;
    }

    let end = (0..=tail.len() - END_OF_CENTRAL_DIRECTORY_SIZE)
        .rev()
        .find(|&position| to_u32(&tail[position..]) == END_OF_CENTRAL_DIRECTORY)
        .ok_or(PackageError::EndOfCentralDirectoryError)?;
    let record = &tail[end..];
    let end_position = tail_start + end as u64;

    let mut entries = to_u16(&record[10..]) as u64;
    let mut size = to_u32(&record[12..]) as u64;
    let mut offset = to_u32(&record[16..]) as u64;
    if entries == u16::MAX as u64 || size == u32::MAX as u64 || offset == u32::MAX as u64 {
        let locator_position = end_position
            .checked_sub(ZIP64_LOCATOR_SIZE as u64)
            .ok_or(PackageError::CentralDirectoryError)?;
        let locator = read_at(reader, locator_position, ZIP64_LOCATOR_SIZE)?;
        if to_u32(&locator) != ZIP64_END_OF_CENTRAL_DIRECTORY_LOCATOR {
            Err(PackageError::CentralDirectoryError)?;
        }
        let record_position = to_u64(&locator[8..]);
        if record_position >= locator_position {
            Err(PackageError::CentralDirectoryError)?;
        }
        let record = read_at(reader, record_position, ZIP64_END_OF_CENTRAL_DIRECTORY_SIZE)?;
        if to_u32(&record) != ZIP64_END_OF_CENTRAL_DIRECTORY {
            Err(PackageError::CentralDirectoryError)?;
        }
        entries = to_u64(&record[32..]);
        size = to_u64(&record[40..]);
        offset = to_u64(&record[48..]);
    }

    if offset.checked_add(size).map_or(true, |directory_end| directory_end > end_position) {
        Err(PackageError::CentralDirectoryError)?;
    }
    let directory = read_at(reader, offset, size as usize)?;

    let mut names = Vec::with_capacity((entries as usize).min(directory.len() / CENTRAL_DIRECTORY_HEADER_SIZE));
    let mut position = 0usize;
    while (names.len() as u64) < entries {
        let header = directory
            .get(position..position + CENTRAL_DIRECTORY_HEADER_SIZE)
            .ok_or(PackageError::CentralDirectoryError)?;
        if to_u32(header) != CENTRAL_DIRECTORY_HEADER {
            Err(PackageError::CentralDirectoryError)?;
        }
        let flags = to_u16(&header[8..]);
        let name_length = to_usize(&header[28..]);
        let extra_length = to_usize(&header[30..]);
        let comment_length = to_usize(&header[32..]);
        let name_start = position + CENTRAL_DIRECTORY_HEADER_SIZE;
        let name = directory
            .get(name_start..name_start + name_length)
            .ok_or(PackageError::CentralDirectoryError)?;
        names.push(decode_name(name, flags));
        position = name_start + name_length + extra_length + comment_length;
    }

    trace!("Central directory lists {} members", names.len());
    Ok(names)
}

/// Decodes an entry name; non-ASCII names without the UTF-8 flag map one byte to one char
fn decode_name(name: &[u8], flags: u16) -> String {
    if flags & FLAG_UTF8_NAME != 0 || name.is_ascii() {
        String::from_utf8_lossy(name).into_owned()
    } else {
        name.iter().map(|&byte| byte as char).collect()
    }
}

fn read_at<RS: Read + Seek>(reader: &mut RS, position: u64, length: usize) -> Result<Vec<u8>, PackageError> {
    reader.seek(SeekFrom::Start(position))?;
    let mut data = vec![0u8; length];
    reader.read_exact(&mut data)?;
    Ok(data)
}
