use exif_tags_types::exif::{Endianness, primitives::ValueType};

use super::{
    error::{TagError, TagResult},
    source::ExifSource,
};

/// Values with an encoded length up to this many bytes live in the entry's
/// offset slot instead of being pointed to.
pub const INLINE_THRESHOLD: u32 = 4;

/// One tag as it appears in an IFD entry.
///
/// The descriptor doesn't hold the value itself. It holds what's needed to
/// find it: the type, the unit count, and the 4-byte offset slot. Small
/// values are packed straight into that slot; larger ones are read from a
/// source at the offset it holds.
///
/// Nothing is cached. Each accessor call resolves the value again.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TagDescriptor {
    /// A display name for the tag. The decoder never looks at it.
    pub name: String,

    /// The type of the stored values.
    pub value_type: ValueType,

    /// The logical path of the IFD holding this tag, like `["IFD0", "Exif"]`.
    pub ifd_path: Vec<String>,

    /// The tag's ID.
    pub tag_id: u16,

    /// How many values of `value_type` are stored.
    pub unit_count: u32,

    /// The offset slot, read as a `u32` in the source's byte order.
    pub value_offset: u32,

    inline: [u8; 4],
    inline_len: u8,
}

impl TagDescriptor {
    /// Creates a descriptor with no offset or inline bytes yet.
    pub fn new(
        name: impl Into<String>,
        value_type: ValueType,
        ifd_path: Vec<String>,
        tag_id: u16,
        unit_count: u32,
    ) -> Self {
        Self {
            name: name.into(),
            value_type,
            ifd_path,
            tag_id,
            unit_count,
            value_offset: 0,
            inline: [0; 4],
            inline_len: 0,
        }
    }

    /// Sets the offset slot.
    ///
    /// `raw_value_offset` holds the slot's bytes as stored on disk. Only the
    /// first four are kept.
    pub fn with_value_offset(mut self, value_offset: u32, raw_value_offset: &[u8]) -> Self {
        let len = raw_value_offset.len().min(self.inline.len());
        self.value_offset = value_offset;
        self.inline = [0; 4];
        self.inline[..len].copy_from_slice(&raw_value_offset[..len]);
        self.inline_len = len as u8;
        self
    }

    /// The raw bytes of the offset slot.
    pub fn raw_value_offset(&self) -> &[u8] {
        &self.inline[..self.inline_len as usize]
    }

    /// Replaces the value with one inline `Long`.
    ///
    /// Used to rewrite offsets that were stored against some other base.
    pub fn set_inline_long(&mut self, value: u32, endianness: Endianness) {
        self.value_type = ValueType::Long;
        self.unit_count = 1;
        self.value_offset = value;
        self.inline = endianness.u32_bytes(value);
        self.inline_len = 4;
    }

    /// The size of the encoded value, in bytes.
    pub fn encoded_len(&self) -> TagResult<u32> {
        let Some(unit_size) = self.value_type.unit_size() else {
            return Err(TagError::InvalidEmptyTag);
        };

        if self.unit_count == 0 {
            log::error!("Tag `{:#06x}` has a unit count of zero.", self.tag_id);
            return Err(TagError::InvalidUnitCount {
                ty: self.value_type,
                count: self.unit_count,
            });
        }

        u32::from(unit_size)
            .checked_mul(self.unit_count)
            .ok_or_else(|| {
                log::error!(
                    "Tag `{:#06x}` is too large! ty: `{}`, count: `{}`",
                    self.tag_id,
                    self.value_type,
                    self.unit_count
                );
                TagError::InvalidUnitCount {
                    ty: self.value_type,
                    count: self.unit_count,
                }
            })
    }

    /// Whether the value lives in the offset slot itself.
    pub fn is_inline(&self) -> TagResult<bool> {
        Ok(self.encoded_len()? <= INLINE_THRESHOLD)
    }

    /// Finds the encoded bytes of this tag's value.
    ///
    /// Inline values come from the offset slot and never touch `source`.
    /// Everything else is read from `source` at `value_offset`.
    pub fn resolve<S: ExifSource + ?Sized>(&self, source: &S) -> TagResult<Vec<u8>> {
        if !self.value_type.is_valid() {
            log::error!(
                "Can't resolve tag `{:#06x}` - its type is `{}`.",
                self.tag_id,
                self.value_type
            );
            return Err(TagError::InvalidEmptyTag);
        }

        let len: u32 = self.encoded_len()?;
        log::trace!("Tag `{:#06x}` has an encoded length of `{len}`.", self.tag_id);

        if len <= INLINE_THRESHOLD {
            let inline = self.raw_value_offset();
            return inline.get(..len as usize).map(<[u8]>::to_vec).ok_or_else(|| {
                log::error!(
                    "Tag `{:#06x}` is missing inline bytes! needed: `{len}`, have: `{}`",
                    self.tag_id,
                    inline.len()
                );
                TagError::InsufficientInlineData {
                    needed: len,
                    available: inline.len(),
                }
            });
        }

        log::trace!(
            "Reading tag `{:#06x}` from offset `{}`.",
            self.tag_id,
            self.value_offset
        );
        let mut buf = vec![0_u8; len as usize];
        let got: usize = source.read_at(self.value_offset, &mut buf).map_err(|e| {
            log::error!(
                "Source failed to read tag `{:#06x}`. offset: `{}`, len: `{len}`, err: {e}",
                self.tag_id,
                self.value_offset
            );
            TagError::SourceReadFailed {
                offset: self.value_offset,
                len,
                kind: e.kind(),
            }
        })?;

        if got < buf.len() {
            log::error!(
                "Source ran out of data for tag `{:#06x}`. wanted: `{len}`, got: `{got}`",
                self.tag_id
            );
            return Err(TagError::ShortRead {
                offset: self.value_offset,
                requested: len,
                got,
            });
        }

        Ok(buf)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::Cell;

    use exif_tags_types::exif::{Endianness, primitives::ValueType};

    use super::TagDescriptor;
    use crate::{
        exif::{
            error::TagError,
            source::{ByteSource, ExifSource},
        },
        util::logger,
    };

    /// A source that counts how often it's read.
    pub(crate) struct CountingSource<S> {
        pub inner: S,
        pub reads: Cell<usize>,
    }

    impl<S: ExifSource> ExifSource for CountingSource<S> {
        fn read_at(&self, offset: u32, buf: &mut [u8]) -> std::io::Result<usize> {
            self.reads.set(self.reads.get() + 1);
            self.inner.read_at(offset, buf)
        }

        fn endianness(&self) -> Endianness {
            self.inner.endianness()
        }
    }

    /// A source where every read fails.
    struct BrokenSource;

    impl ExifSource for BrokenSource {
        fn read_at(&self, _offset: u32, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk on fire"))
        }

        fn endianness(&self) -> Endianness {
            Endianness::Big
        }
    }

    fn tag(ty: ValueType, count: u32) -> TagDescriptor {
        TagDescriptor::new("test", ty, vec!["IFD0".into()], 0x1234, count)
    }

    fn counting(bytes: Vec<u8>) -> CountingSource<ByteSource<Vec<u8>>> {
        CountingSource {
            inner: ByteSource::new(bytes, Endianness::Big),
            reads: Cell::new(0),
        }
    }

    #[test]
    fn four_bytes_or_less_never_reads() {
        logger();

        for (ty, count) in [
            (ValueType::Byte, 1),
            (ValueType::Byte, 4),
            (ValueType::Ascii, 4),
            (ValueType::Short, 1),
            (ValueType::Short, 2),
            (ValueType::Long, 1),
            (ValueType::Undefined, 3),
        ] {
            let source = counting(vec![0xee; 64]);
            let t = tag(ty, count).with_value_offset(8, &[1, 2, 3, 4]);

            let bytes = t.resolve(&source).unwrap();
            assert_eq!(bytes, [1, 2, 3, 4][..bytes.len()].to_vec(), "{ty} x {count}");
            assert_eq!(source.reads.get(), 0, "{ty} x {count} shouldn't read");
        }
    }

    #[test]
    fn five_bytes_reads_from_the_offset() {
        logger();

        let source = counting((0_u8..32).collect());
        let t = tag(ValueType::Byte, 5).with_value_offset(8, &[1, 2, 3, 4]);

        assert_eq!(t.resolve(&source), Ok(vec![8, 9, 10, 11, 12]));
        assert_eq!(source.reads.get(), 1);
    }

    #[test]
    fn invalid_type_is_rejected_first() {
        logger();

        let source = counting(Vec::new());
        let t = tag(ValueType::Unknown(0), 0);
        assert_eq!(t.resolve(&source), Err(TagError::InvalidEmptyTag));
        assert_eq!(source.reads.get(), 0);
    }

    #[test]
    fn bad_counts_are_rejected() {
        logger();

        let source = counting(Vec::new());
        assert_eq!(
            tag(ValueType::Short, 0).resolve(&source),
            Err(TagError::InvalidUnitCount {
                ty: ValueType::Short,
                count: 0
            })
        );
        assert_eq!(
            tag(ValueType::Rational, u32::MAX).resolve(&source),
            Err(TagError::InvalidUnitCount {
                ty: ValueType::Rational,
                count: u32::MAX
            })
        );
    }

    #[test]
    fn missing_inline_bytes_fail_loudly() {
        logger();

        let source = counting(Vec::new());
        let t = tag(ValueType::Long, 1).with_value_offset(0, &[1, 2]);
        assert_eq!(
            t.resolve(&source),
            Err(TagError::InsufficientInlineData {
                needed: 4,
                available: 2
            })
        );
    }

    #[test]
    fn read_problems_are_reported() {
        logger();

        let t = tag(ValueType::Rational, 1).with_value_offset(6, &[0, 0, 0, 6]);

        assert_eq!(
            t.resolve(&ByteSource::new(vec![0_u8; 10], Endianness::Big)),
            Err(TagError::ShortRead {
                offset: 6,
                requested: 8,
                got: 4
            })
        );

        assert_eq!(
            t.resolve(&BrokenSource),
            Err(TagError::SourceReadFailed {
                offset: 6,
                len: 8,
                kind: std::io::ErrorKind::Other
            })
        );
    }

    #[test]
    fn inline_long_rewrites_the_slot() {
        logger();

        let mut t = tag(ValueType::Short, 1).with_value_offset(200, &[0, 200, 0, 0]);
        t.set_inline_long(1210, Endianness::Big);

        assert_eq!(t.value_type, ValueType::Long);
        assert_eq!(t.raw_value_offset(), &[0, 0, 0x04, 0xba]);
        assert_eq!(t.value_offset, 1210);
    }
}
