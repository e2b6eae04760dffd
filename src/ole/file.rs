//! OLE2 compound file access.
//!
//! The compound file layout itself (sectors, FAT, directory tree) is handled
//! by the `cfb` crate; this wrapper exposes the name-to-bytes view the
//! presentation parser needs.

use crate::common::binary::reserve_hint;
use crate::common::detection::OLE2_SIGNATURE;
use crate::common::{Error, Result};
use std::io::{Cursor, Read};

/// An OLE2 compound file held in memory.
pub struct OleFile<'a> {
    inner: cfb::CompoundFile<Cursor<&'a [u8]>>,
}

impl<'a> OleFile<'a> {
    /// Open a compound file from raw bytes.
    ///
    /// Returns [`Error::NotOleFile`] when the signature is missing or the
    /// header cannot be read.
    pub fn open(data: &'a [u8]) -> Result<Self> {
        if !is_ole_file(data) {
            return Err(Error::NotOleFile);
        }
        let inner = cfb::CompoundFile::open(Cursor::new(data)).map_err(|e| {
            log::debug!("Compound file header rejected: {}", e);
            Error::NotOleFile
        })?;
        Ok(Self { inner })
    }

    /// Paths of every stream, relative to the root storage, joined with `/`.
    ///
    /// Top-level streams appear as bare names such as `PowerPoint Document`.
    pub fn list_streams(&self) -> Vec<String> {
        self.inner
            .walk()
            .filter(|entry| entry.is_stream())
            .map(|entry| {
                entry
                    .path()
                    .to_string_lossy()
                    .trim_start_matches(['/', '\\'])
                    .replace('\\', "/")
            })
            .collect()
    }

    /// Read a stream in full.
    pub fn open_stream(&mut self, name: &str) -> Result<Vec<u8>> {
        let path = stream_path(name);
        if !self.inner.is_stream(&path) {
            return Err(Error::ComponentNotFound(name.to_string()));
        }
        let mut stream = self.inner.open_stream(&path)?;
        let mut buffer = Vec::with_capacity(reserve_hint(stream.len()));
        stream.read_to_end(&mut buffer)?;
        Ok(buffer)
    }
}

fn stream_path(name: &str) -> String {
    format!("/{}", name.trim_start_matches('/'))
}

/// Check whether bytes start with the OLE2 signature.
///
/// ```
/// use deckread::ole::is_ole_file;
/// assert!(is_ole_file(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1, 0x00]));
/// assert!(!is_ole_file(b"PK\x03\x04"));
/// ```
#[inline]
pub fn is_ole_file(data: &[u8]) -> bool {
    data.starts_with(OLE2_SIGNATURE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_roundtrip_streams() {
        let mut comp = cfb::CompoundFile::create(Cursor::new(Vec::new())).unwrap();
        comp.create_stream("/PowerPoint Document")
            .unwrap()
            .write_all(&[1, 2, 3, 4])
            .unwrap();
        comp.create_storage("/ObjectPool").unwrap();
        comp.create_stream("/ObjectPool/Ole").unwrap().write_all(b"x").unwrap();
        comp.flush().unwrap();
        let bytes = comp.into_inner().into_inner();

        let mut ole = OleFile::open(&bytes).unwrap();
        assert_eq!(ole.open_stream("PowerPoint Document").unwrap(), vec![1, 2, 3, 4]);
        assert!(matches!(ole.open_stream("Pictures"), Err(Error::ComponentNotFound(_))));

        let streams = ole.list_streams();
        assert!(streams.contains(&"PowerPoint Document".to_string()));
        assert!(streams.contains(&"ObjectPool/Ole".to_string()));
    }

    #[test]
    fn test_rejects_non_ole() {
        assert!(matches!(OleFile::open(b"not ole"), Err(Error::NotOleFile)));
        let mut truncated = OLE2_SIGNATURE.to_vec();
        truncated.extend_from_slice(&[0; 16]);
        assert!(matches!(OleFile::open(&truncated), Err(Error::NotOleFile)));
    }
}
