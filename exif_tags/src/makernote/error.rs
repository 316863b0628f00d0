use crate::exif::error::{DirectoryError, ExifFatalError, TagError};

pub type MakerNoteResult<T> = Result<T, MakerNoteError>;

/// A maker note was recognized, but couldn't be decoded.
///
/// Maker notes that don't belong to a vendor never produce this.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MakerNoteError {
    /// A tag's value couldn't be read.
    Tag(TagError),

    /// The vendor's IFD, or one of its sub-IFDs, failed to decode.
    Directory(DirectoryError),

    /// The embedded TIFF header was broken.
    Header(ExifFatalError),

    /// The payload ended before the vendor's IFD could start.
    PayloadTooShort { len: usize },

    /// Moving an offset onto the container's base overflowed.
    RebaseOverflow { tag_id: u16, raw: u32, base: u32 },
}

impl From<TagError> for MakerNoteError {
    fn from(value: TagError) -> Self {
        MakerNoteError::Tag(value)
    }
}

impl From<DirectoryError> for MakerNoteError {
    fn from(value: DirectoryError) -> Self {
        MakerNoteError::Directory(value)
    }
}

impl From<ExifFatalError> for MakerNoteError {
    fn from(value: ExifFatalError) -> Self {
        MakerNoteError::Header(value)
    }
}

impl core::fmt::Display for MakerNoteError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MakerNoteError::Tag(e) => write!(f, "Failed to read a maker note tag. err: {e}"),
            MakerNoteError::Directory(e) => {
                write!(f, "Failed to decode the maker note's IFD. err: {e}")
            }
            MakerNoteError::Header(e) => {
                write!(f, "The maker note's TIFF header was broken. err: {e}")
            }
            MakerNoteError::PayloadTooShort { len } => {
                write!(f, "The maker note was too short to hold an IFD. len: `{len}`")
            }
            MakerNoteError::RebaseOverflow { tag_id, raw, base } => write!(
                f,
                "Rebasing tag `{tag_id:#06x}` overflowed. raw: `{raw}`, base: `{base}`"
            ),
        }
    }
}

impl core::error::Error for MakerNoteError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            MakerNoteError::Tag(e) => Some(e),
            MakerNoteError::Directory(e) => Some(e),
            MakerNoteError::Header(e) => Some(e),
            _ => None,
        }
    }
}
