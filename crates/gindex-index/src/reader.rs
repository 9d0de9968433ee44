//! Access to a blob's bytes

use std::io;

/// Byte source of one blob.
///
/// `sniff` is used for classification, `read_all` only for blobs that turned
/// out to be text.
pub trait BlobReader {
    /// Returns at most `limit` leading bytes
    fn sniff(&self, limit: usize) -> io::Result<Vec<u8>>;

    /// Returns the complete content
    fn read_all(&self) -> io::Result<Vec<u8>>;
}

impl BlobReader for [u8] {
    fn sniff(&self, limit: usize) -> io::Result<Vec<u8>> {
        Ok(self[..self.len().min(limit)].to_vec())
    }

    fn read_all(&self) -> io::Result<Vec<u8>> {
        Ok(self.to_vec())
    }
}

impl BlobReader for Vec<u8> {
    fn sniff(&self, limit: usize) -> io::Result<Vec<u8>> {
        self.as_slice().sniff(limit)
    }

    fn read_all(&self) -> io::Result<Vec<u8>> {
        Ok(self.clone())
    }
}

impl BlobReader for git2::Blob<'_> {
    fn sniff(&self, limit: usize) -> io::Result<Vec<u8>> {
        self.content().sniff(limit)
    }

    fn read_all(&self) -> io::Result<Vec<u8>> {
        Ok(self.content().to_vec())
    }
}
