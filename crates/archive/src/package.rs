//! Package capability: enumerating and reading entries of a downloaded
//! documentation archive.

use crate::error::{ErrorKind, Result};
use std::io::{Cursor, Read};
use tracing::instrument;
use zip::ZipArchive;

/// A downloaded documentation package, opened from raw ZIP bytes held in
/// memory.
///
/// Opening validates the container; a byte blob that is not a valid ZIP is
/// an [`Integrity`](ErrorKind::Integrity) failure, fatal to the refresh
/// attempt that downloaded it. Per-entry read problems are not: they
/// surface as entry-level errors the processor isolates.
pub struct DocPackage {
    archive: ZipArchive<Cursor<Vec<u8>>>,
}

impl DocPackage {
    /// Open a package from downloaded bytes.
    #[instrument(skip(bytes), fields(bytes = bytes.len()))]
    pub fn open(bytes: Vec<u8>) -> Result<Self> {
        match ZipArchive::new(Cursor::new(bytes)) {
            Ok(archive) => Ok(Self { archive }),
            Err(source) => exn::bail!(ErrorKind::Integrity(source.to_string())),
        }
    }

    /// Names of all file entries, excluding directory entries.
    pub fn file_names(&self) -> Vec<String> {
        self.archive
            .file_names()
            .filter(|name| !name.ends_with('/'))
            .map(str::to_string)
            .collect()
    }

    /// Read one entry's content as text.
    ///
    /// Invalid UTF-8 sequences are replaced with U+FFFD rather than
    /// failing the entry; corpus sources are expected to be UTF-8 but a
    /// stray byte should not cost a whole page.
    pub fn read_to_string(&mut self, name: &str) -> Result<String> {
        let mut entry = match self.archive.by_name(name) {
            Ok(entry) => entry,
            Err(zip::result::ZipError::FileNotFound) => {
                exn::bail!(ErrorKind::EntryNotFound(name.to_string()))
            },
            Err(source) => exn::bail!(ErrorKind::Integrity(source.to_string())),
        };
        let mut bytes = Vec::with_capacity(entry.size() as usize);
        if let Err(source) = entry.read_to_end(&mut bytes) {
            exn::bail!(ErrorKind::Integrity(source.to_string()));
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}


#[cfg(test)]
mod tests {
    use super::testutil::build_zip;
    use super::*;

    #[test]
    fn opens_and_lists_files() {
        let bytes = build_zip(&[
            ("content/en-us/guides/a.md", "alpha"),
            ("content/en-us/guides/b.md", "bravo"),
        ]);
        let package = DocPackage::open(bytes).unwrap();
        let mut names = package.file_names();
        names.sort_unstable();
        assert_eq!(names, ["content/en-us/guides/a.md", "content/en-us/guides/b.md"]);
    }

    #[test]
    fn reads_entry_text() {
        let bytes = build_zip(&[("content/en-us/guides/a.md", "alpha body")]);
        let mut package = DocPackage::open(bytes).unwrap();
        assert_eq!(package.read_to_string("content/en-us/guides/a.md").unwrap(), "alpha body");
    }

    #[test]
    fn invalid_bytes_are_an_integrity_failure() {
        let result = DocPackage::open(b"definitely not a zip".to_vec());
        let error = result.err().unwrap();
        assert!(matches!(*error, ErrorKind::Integrity(_)));
    }

    #[test]
    fn missing_entry_is_not_found() {
        let bytes = build_zip(&[("content/en-us/guides/a.md", "alpha")]);
        let mut package = DocPackage::open(bytes).unwrap();
        let error = package.read_to_string("content/en-us/guides/zzz.md").err().unwrap();
        assert!(matches!(*error, ErrorKind::EntryNotFound(_)));
    }
}
