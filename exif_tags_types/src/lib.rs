//! # `exif_tags_types`
//!
//! Static tables used by `exif_tags`: value types, IFD groups, and the tag
//! dictionaries for the standard Exif directories and the supported maker
//! notes.
//!
//! Nothing here performs I/O. Each table is plain `const` data, so it's safe
//! to share between any number of threads.

#[macro_use]
mod macros;

pub mod exif;
pub mod makernote;
