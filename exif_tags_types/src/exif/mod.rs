//! Shared Exif types: byte order, value types, IFD groups and their tags.

pub mod ifd;
pub mod primitives;
pub mod tags;

/// Each blob of Exif will start with a byte order marker - its endianness.
///
/// It's either `II` (Intel, for little-endian) or `MM` (Motorola, for
/// big-endian).
///
/// Every multi-byte scalar in the blob uses it, including those inside maker
/// notes that don't carry their own marker.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub enum Endianness {
    /// `II` for Intel, little-endian.
    Little,

    /// `MM` for Motorola. Big-endian.
    Big,
}

impl Endianness {
    /// Encodes a `u32` in this byte order.
    ///
    /// ```
    /// use exif_tags_types::exif::Endianness;
    ///
    /// assert_eq!(Endianness::Big.u32_bytes(1210), [0, 0, 0x04, 0xba]);
    /// assert_eq!(Endianness::Little.u32_bytes(1210), [0xba, 0x04, 0, 0]);
    /// ```
    pub const fn u32_bytes(&self, value: u32) -> [u8; 4] {
        match self {
            Endianness::Little => value.to_le_bytes(),
            Endianness::Big => value.to_be_bytes(),
        }
    }
}
