//! Random-access sources that tag values are read from.
//!
//! A source is bound to one decode session. It knows the session's byte
//! order and can read any span of bytes by absolute offset. Tags only hold
//! offsets, so every decode borrows the source it came from.

use std::{
    io::{ErrorKind, Read, Seek, SeekFrom},
    sync::Arc,
};

use parking_lot::Mutex;

use exif_tags_types::exif::Endianness;

/// Something we can read tag values from.
pub trait ExifSource {
    /// Fills `buf` with bytes starting at the absolute `offset`.
    ///
    /// Returns how many bytes were written. Fewer than `buf.len()` means the
    /// source ran out of data.
    fn read_at(&self, offset: u32, buf: &mut [u8]) -> std::io::Result<usize>;

    /// The byte order every multi-byte value in this source uses.
    fn endianness(&self) -> Endianness;
}

impl<S: ExifSource + ?Sized> ExifSource for &S {
    fn read_at(&self, offset: u32, buf: &mut [u8]) -> std::io::Result<usize> {
        (**self).read_at(offset, buf)
    }

    fn endianness(&self) -> Endianness {
        (**self).endianness()
    }
}

impl<S: ExifSource + ?Sized> ExifSource for Arc<S> {
    fn read_at(&self, offset: u32, buf: &mut [u8]) -> std::io::Result<usize> {
        (**self).read_at(offset, buf)
    }

    fn endianness(&self) -> Endianness {
        (**self).endianness()
    }
}

/// An in-memory source.
///
/// The `base` lets the bytes stand in for a window of some larger file: an
/// offset of `base` reads the first byte. Offsets below `base` point into
/// space this source doesn't hold.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ByteSource<B> {
    bytes: B,
    base: u32,
    endianness: Endianness,
}

impl<B: AsRef<[u8]>> ByteSource<B> {
    /// Creates a source where offset zero is the first byte.
    pub fn new(bytes: B, endianness: Endianness) -> Self {
        Self::with_base(bytes, 0, endianness)
    }

    /// Creates a source where offset `base` is the first byte.
    pub fn with_base(bytes: B, base: u32, endianness: Endianness) -> Self {
        Self {
            bytes,
            base,
            endianness,
        }
    }

    /// The bytes held by this source.
    pub fn bytes(&self) -> &[u8] {
        self.bytes.as_ref()
    }

    /// The offset of the first held byte.
    pub fn base(&self) -> u32 {
        self.base
    }
}

impl<B: AsRef<[u8]>> ExifSource for ByteSource<B> {
    fn read_at(&self, offset: u32, buf: &mut [u8]) -> std::io::Result<usize> {
        let Some(start) = offset.checked_sub(self.base) else {
            log::error!(
                "Asked to read before this source's base. offset: `{offset}`, base: `{}`",
                self.base
            );
            return Err(std::io::Error::new(
                ErrorKind::InvalidInput,
                "offset is before the source's base",
            ));
        };

        let available: &[u8] = self.bytes().get(start as usize..).unwrap_or_default();
        let len = buf.len().min(available.len());
        buf[..len].copy_from_slice(&available[..len]);
        Ok(len)
    }

    fn endianness(&self) -> Endianness {
        self.endianness
    }
}

/// A source over anything that can `Read` and `Seek`, like a `File`.
///
/// Seeking needs exclusive access, so reads are serialized through a lock.
/// That makes it fine to share one `ReaderSource` between threads.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: Mutex<R>,
    endianness: Endianness,
}

impl<R: Read + Seek> ReaderSource<R> {
    pub fn new(reader: R, endianness: Endianness) -> Self {
        Self {
            reader: Mutex::new(reader),
            endianness,
        }
    }

    /// Gives the reader back.
    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }
}

impl<R: Read + Seek> ExifSource for ReaderSource<R> {
    fn read_at(&self, offset: u32, buf: &mut [u8]) -> std::io::Result<usize> {
        let mut reader = self.reader.lock();
        reader.seek(SeekFrom::Start(u64::from(offset)))?;

        let mut filled = 0_usize;
        while filled < buf.len() {
            match reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }

        log::trace!("Read `{filled}` bytes at offset `{offset}`.");
        Ok(filled)
    }

    fn endianness(&self) -> Endianness {
        self.endianness
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, ErrorKind};

    use exif_tags_types::exif::Endianness;

    use super::{ByteSource, ExifSource, ReaderSource};
    use crate::util::logger;

    #[test]
    fn byte_source_reads_what_it_has() {
        logger();

        let source = ByteSource::new([1_u8, 2, 3, 4, 5].as_slice(), Endianness::Big);
        let mut buf = [0_u8; 3];
        assert_eq!(source.read_at(1, &mut buf).unwrap(), 3);
        assert_eq!(buf, [2, 3, 4]);

        // running off the end is a short read, not an error
        let mut buf = [0_u8; 4];
        assert_eq!(source.read_at(3, &mut buf).unwrap(), 2);
        assert_eq!(source.read_at(100, &mut buf).unwrap(), 0);
    }

    #[test]
    fn based_source_shifts_offsets() {
        logger();

        let source = ByteSource::with_base(vec![10_u8, 20, 30], 1000, Endianness::Little);
        let mut buf = [0_u8; 2];
        assert_eq!(source.read_at(1001, &mut buf).unwrap(), 2);
        assert_eq!(buf, [20, 30]);

        let err = source.read_at(999, &mut buf).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn reader_source_seeks_and_reads() {
        logger();

        let source = ReaderSource::new(Cursor::new(vec![0_u8, 1, 2, 3, 4, 5]), Endianness::Big);
        let mut buf = [0_u8; 2];
        assert_eq!(source.read_at(4, &mut buf).unwrap(), 2);
        assert_eq!(buf, [4, 5]);

        // reads are independent of each other
        assert_eq!(source.read_at(0, &mut buf).unwrap(), 2);
        assert_eq!(buf, [0, 1]);

        let mut big = [0_u8; 8];
        assert_eq!(source.read_at(2, &mut big).unwrap(), 4);
        assert_eq!(source.endianness(), Endianness::Big);
    }
}
