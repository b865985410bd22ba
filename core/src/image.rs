// Positional read access to a raw disk image
//
// Every read seeks to an absolute offset first, so callers never depend
// on cursor position left behind by an earlier operation.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use log::trace;

use crate::error::{Error, Result};

/// Read-only byte source for a disk image.
///
/// Wraps any `Read + Seek` source behind a single `read_at` contract
/// that fails explicitly when the image cannot supply the requested
/// byte count, instead of silently returning a partial buffer.
pub struct ImageReader<R: Read + Seek> {
    inner: R,
}

impl ImageReader<File> {
    /// Open a disk image from a filesystem path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::ImageOpen {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(file))
    }
}

impl<R: Read + Seek> ImageReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Read exactly `len` bytes at `offset`.
    ///
    /// Returns `TruncatedImage` when the source ends before `len` bytes
    /// could be read.
    pub fn read_at(&mut self, offset: u64, len: usize) -> Result<Vec<u8>> {
        if len == 0 {
            return Ok(Vec::new());
        }

        trace!("reading {} bytes at offset {:#x}", len, offset);

        self.inner.seek(SeekFrom::Start(offset))?;

        let mut buf = vec![0u8; len];
        let mut filled = 0;
        while filled < len {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        if filled < len {
            return Err(Error::TruncatedImage {
                offset,
                needed: len,
                available: filled,
            });
        }

        Ok(buf)
    }

    /// Read a fixed-size record at `offset`.
    ///
    /// Same contract as [`read_at`](Self::read_at), but the length is
    /// part of the type, so decoders of fixed layouts can take
    /// `&[u8; N]` and never see an undersized buffer.
    pub fn read_array<const N: usize>(&mut self, offset: u64) -> Result<[u8; N]> {
        let buf = self.read_at(offset, N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&buf);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn read_at_returns_exact_range() {
        let mut image = ImageReader::new(Cursor::new(vec![0u8, 1, 2, 3, 4, 5, 6, 7]));
        assert_eq!(image.read_at(2, 3).unwrap(), vec![2, 3, 4]);
        // Absolute offsets: an earlier read must not affect a later one.
        assert_eq!(image.read_at(0, 2).unwrap(), vec![0, 1]);
    }

    #[test]
    fn read_at_zero_length_is_empty() {
        let mut image = ImageReader::new(Cursor::new(vec![1u8, 2, 3]));
        assert!(image.read_at(1, 0).unwrap().is_empty());
    }

    #[test]
    fn read_array_returns_fixed_record() {
        let mut image = ImageReader::new(Cursor::new(vec![9u8, 8, 7, 6, 5]));
        let record: [u8; 3] = image.read_array(1).unwrap();
        assert_eq!(record, [8, 7, 6]);
    }

    #[test]
    fn read_array_past_end_is_truncated_image() {
        let mut image = ImageReader::new(Cursor::new(vec![0u8; 4]));
        let result: Result<[u8; 8]> = image.read_array(0);
        assert!(matches!(
            result,
            Err(Error::TruncatedImage {
                needed: 8,
                available: 4,
                ..
            })
        ));
    }

    #[test]
    fn read_past_end_is_truncated_image() {
        let mut image = ImageReader::new(Cursor::new(vec![0u8; 10]));
        match image.read_at(6, 8) {
            Err(Error::TruncatedImage {
                offset,
                needed,
                available,
            }) => {
                assert_eq!(offset, 6);
                assert_eq!(needed, 8);
                assert_eq!(available, 4);
            }
            other => panic!("expected TruncatedImage, got {:?}", other.map(|v| v.len())),
        }
    }
}
