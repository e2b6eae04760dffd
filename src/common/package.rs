//! In-memory ZIP package access shared by the archive-based parsers.
//!
//! OOXML, ODF and Keynote files are all ZIP archives. The parsers only need
//! a name-to-bytes lookup, so this wraps `zip::ZipArchive` over the caller's
//! buffer and reports missing or unreadable entries as `None`.

use crate::common::binary::reserve_hint;
use crate::common::xml::XmlDocument;
use crate::common::{Error, Result};
use std::cell::RefCell;
use std::io::{Cursor, Read};

/// A ZIP package held in memory.
pub struct ZipPackage<'a> {
    archive: RefCell<zip::ZipArchive<Cursor<&'a [u8]>>>,
    names: Vec<String>,
}

impl<'a> ZipPackage<'a> {
    /// Open a package from raw bytes.
    ///
    /// Fails when the bytes are not a readable ZIP archive.
    pub fn open(bytes: &'a [u8]) -> Result<Self> {
        let archive = zip::ZipArchive::new(Cursor::new(bytes))?;
        let names = archive.file_names().map(str::to_string).collect();
        Ok(Self {
            archive: RefCell::new(archive),
            names,
        })
    }

    /// Entry names in archive order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Check if an entry exists.
    pub fn has_file(&self, path: &str) -> bool {
        let path = path.trim_start_matches('/');
        self.names.iter().any(|n| n == path)
    }

    /// Read an entry as raw bytes.
    pub fn get_file(&self, path: &str) -> Result<Vec<u8>> {
        let path = path.trim_start_matches('/');
        let mut archive = self.archive.borrow_mut();
        let mut file = archive
            .by_name(path)
            .map_err(|_| Error::ComponentNotFound(path.to_string()))?;

        let mut content = Vec::with_capacity(reserve_hint(file.size()));
        file.read_to_end(&mut content)?;
        Ok(content)
    }

    /// Read an entry, logging and swallowing any failure.
    pub fn read_bytes(&self, path: &str) -> Option<Vec<u8>> {
        match self.get_file(path) {
            Ok(bytes) => Some(bytes),
            Err(Error::ComponentNotFound(_)) => None,
            Err(e) => {
                log::warn!("Failed to read package entry {}: {}", path, e);
                None
            },
        }
    }

    /// Read an entry as UTF-8 text (invalid sequences replaced).
    pub fn read_text(&self, path: &str) -> Option<String> {
        self.read_bytes(path)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Read and parse an XML entry.
    ///
    /// A missing entry and a malformed one both yield `None`.
    pub fn read_xml(&self, path: &str) -> Option<XmlDocument> {
        let bytes = self.read_bytes(path)?;
        let doc = XmlDocument::parse_bytes(&bytes);
        if doc.is_none() {
            log::warn!("Package entry {} is not well-formed XML", path);
        }
        doc
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    /// Build an in-memory ZIP with the given entries.
    pub(crate) fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        for (name, data) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_read_entries() {
        let bytes = build_zip(&[("a/b.xml", b"<r>x</r>"), ("bin", &[1, 2, 3])]);
        let package = ZipPackage::open(&bytes).unwrap();

        assert_eq!(package.names().len(), 2);
        assert!(package.has_file("/a/b.xml"));
        assert_eq!(package.read_bytes("bin"), Some(vec![1, 2, 3]));
        assert_eq!(package.read_xml("a/b.xml").map(|d| d.root.text()), Some("x".into()));
        assert!(package.read_bytes("missing").is_none());
    }

    #[test]
    fn test_not_a_zip() {
        assert!(ZipPackage::open(b"definitely not a zip").is_err());
        assert!(ZipPackage::open(&[]).is_err());
    }
}
