//! # `exif_tags`
//!
//! Lazy decoding of Exif tags and camera maker notes.
//!
//! Exif stores metadata as a tree of IFDs (Image File Directories). Each
//! entry in an IFD says what type its value has and how many values there
//! are. It then either holds the value directly, if it's small, or points to
//! where the value lives. This library reads those entries into
//! [`TagDescriptor`](exif::TagDescriptor)s, and only reads a value when you
//! ask for it.
//!
//! Some cameras store a second, private IFD tree inside the `MakerNote`
//! field. Those use their own offset rules, which the parsers in
//! [`makernote`] take care of.
//!
//! ```
//! use exif_tags::{exif::{Exif, ExifTags as _}, makernote::MakerNoteRegistry};
//!
//! // a big-endian blob with an empty IFD chain
//! let exif = Exif::new(b"MM\x00\x2a\x00\x00\x00\x08".as_slice()).unwrap();
//! assert!(exif.tags().is_empty());
//!
//! // no `Make` or `MakerNote`, so no vendor applies
//! assert!(MakerNoteRegistry::all().dispatch(&exif).is_empty());
//! ```
//!
//! ## License
//!
//! This project is dual-licensed under either the Apache License 2.0 or the MIT License at your option.

#![forbid(unsafe_code)]

pub mod exif;
pub mod makernote;

pub(crate) mod util {
    /// helper: init logging
    #[cfg(test)]
    pub fn logger() {
        _ = env_logger::builder()
            .is_test(true)
            .filter_level(log::LevelFilter::max())
            .format_file(true)
            .format_line_number(true)
            .try_init();
    }

    /// Helpers for building TIFF-structured blobs by hand.
    #[cfg(test)]
    pub mod tiff {
        use exif_tags_types::exif::Endianness;

        /// One IFD entry: tag ID, raw type, count, and the offset slot.
        pub type Entry = (u16, u16, u32, [u8; 4]);

        pub fn u16_bytes(e: Endianness, value: u16) -> [u8; 2] {
            match e {
                Endianness::Little => value.to_le_bytes(),
                Endianness::Big => value.to_be_bytes(),
            }
        }

        /// A `Short` packed into the start of an offset slot.
        pub fn short(e: Endianness, value: u16) -> [u8; 4] {
            let [a, b] = u16_bytes(e, value);
            [a, b, 0, 0]
        }

        /// An 8-byte TIFF header pointing at `first_ifd`.
        pub fn header(e: Endianness, first_ifd: u32) -> Vec<u8> {
            let mut v = Vec::new();
            v.extend_from_slice(match e {
                Endianness::Little => b"II",
                Endianness::Big => b"MM",
            });
            v.extend_from_slice(u16_bytes(e, 42).as_slice());
            v.extend_from_slice(e.u32_bytes(first_ifd).as_slice());
            v
        }

        /// An IFD holding `entries`, then a pointer to `next`.
        pub fn ifd(e: Endianness, entries: &[Entry], next: u32) -> Vec<u8> {
            let mut v = Vec::new();
            v.extend_from_slice(u16_bytes(e, entries.len() as u16).as_slice());
            for (tag_id, ty, count, slot) in entries {
                v.extend_from_slice(u16_bytes(e, *tag_id).as_slice());
                v.extend_from_slice(u16_bytes(e, *ty).as_slice());
                v.extend_from_slice(e.u32_bytes(*count).as_slice());
                v.extend_from_slice(slot.as_slice());
            }
            v.extend_from_slice(e.u32_bytes(next).as_slice());
            v
        }
    }
}
