use exif_tags_types::exif::primitives::ValueType;

/// The result of resolving or decoding one tag's value.
pub type TagResult<T> = Result<T, TagError>;

/// The result of decoding one directory (IFD).
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// The result of building an [`IfdMapping`](crate::exif::mapping::IfdMapping).
pub type HierarchyResult<T> = Result<T, HierarchyError>;

/// This type describes the parsing result of a whole Exif blob.
///
/// If it's the `Err` variant, the parsing failed completely, and you aren't
/// getting any Exif data at all.
pub type ExifFatalResult<T> = Result<T, ExifFatalError>;

/// Something went wrong while resolving or decoding a tag's value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TagError {
    /// The tag's type is unset or unknown, so it can't be decoded.
    ///
    /// This is always checked before anything else.
    InvalidEmptyTag,

    /// The unit count was zero, or `unit size * count` doesn't fit in a
    /// `u32`.
    InvalidUnitCount { ty: ValueType, count: u32 },

    /// The value should be inline, but the descriptor holds fewer inline
    /// bytes than it needs.
    InsufficientInlineData { needed: u32, available: usize },

    /// The source failed to read the value.
    SourceReadFailed {
        offset: u32,
        len: u32,
        kind: std::io::ErrorKind,
    },

    /// The source returned fewer bytes than we asked for.
    ShortRead {
        offset: u32,
        requested: u32,
        got: usize,
    },

    /// The resolved bytes are shorter than `unit size * count`.
    NotEnoughData { needed: usize, got: usize },

    /// The accessor doesn't support this tag's type.
    UnsupportedConversion { ty: ValueType, wanted: &'static str },

    /// ASCII text had no NUL terminator within its unit count.
    MalformedText,
}

/// A directory (IFD) couldn't be decoded.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DirectoryError {
    /// The IFD didn't say how many entries it has.
    NoEntryCount { offset: u32 },

    /// The IFD was completely blank.
    ZeroEntries { offset: u32 },

    /// The IFD's entries ran past the end of the source.
    Truncated { offset: u32, entries: u16 },

    /// The IFD didn't give a pointer to the next IFD.
    NoNextPointer { offset: u32 },

    /// The source failed while reading the IFD.
    ReadFailed {
        offset: u32,
        kind: std::io::ErrorKind,
    },

    /// A sub-IFD pointer tag couldn't be read as an offset.
    BadSubIfdPointer { tag_id: u16, err: TagError },
}

/// The IFD hierarchy was configured incorrectly.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum HierarchyError {
    /// No IFD exists at the given parent placement.
    UnknownParent { placement: Vec<u16> },

    /// The tag ID is already mapped somewhere else.
    DuplicateDirectoryMapping {
        tag_id: u16,
        existing_parent: Vec<u16>,
        requested_parent: Vec<u16>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExifFatalError {
    /// The input was too short to provide a byte order marker.
    NoByteOrderMarker { len: usize },

    /// The byte order marker was weird - it's not one of the two expected
    /// values (in ASCII, should be either `II` or `MM`).
    WeirdByteOrderMarker { found: [u8; 2] },

    /// Didn't find the TIFF magic number.
    NoTiffMagicNumber,

    /// The magic number indexes had a weird value. It's not TIFF's.
    MagicNumberWasntTiff { found: u16 },

    /// No TIFF header offset was found.
    NoTiffHeaderOffset,

    /// The header offset would place us inside the header.
    HeaderOffsetBeforeHeader,

    /// Two IFDs in the chain pointed at each other.
    IfdLoop { offset: u32 },

    /// One of the IFDs failed to decode.
    Directory(DirectoryError),
}

impl From<DirectoryError> for ExifFatalError {
    fn from(value: DirectoryError) -> Self {
        ExifFatalError::Directory(value)
    }
}

impl core::fmt::Display for TagError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TagError::InvalidEmptyTag => {
                f.write_str("The tag's type is unset or unknown. It can't be decoded.")
            }
            TagError::InvalidUnitCount { ty, count } => write!(
                f,
                "The tag's unit count is invalid for its type. ty: `{ty}`, count: `{count}`"
            ),
            TagError::InsufficientInlineData { needed, available } => write!(
                f,
                "Not enough inline bytes for the value. needed: `{needed}`, available: `{available}`"
            ),
            TagError::SourceReadFailed { offset, len, kind } => write!(
                f,
                "Failed to read the value from its source. offset: `{offset}`, len: `{len}`, err: `{kind}`"
            ),
            TagError::ShortRead {
                offset,
                requested,
                got,
            } => write!(
                f,
                "The source ran out of data. offset: `{offset}`, requested: `{requested}`, got: `{got}`"
            ),
            TagError::NotEnoughData { needed, got } => write!(
                f,
                "The value is shorter than its type and count demand. needed: `{needed}`, got: `{got}`"
            ),
            TagError::UnsupportedConversion { ty, wanted } => {
                write!(f, "Can't decode a `{ty}` tag as {wanted}.")
            }
            TagError::MalformedText => {
                f.write_str("ASCII text had no NUL terminator within its unit count.")
            }
        }
    }
}

impl core::fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DirectoryError::NoEntryCount { offset } => {
                write!(f, "The IFD at `{offset}` didn't say how many entries it has.")
            }
            DirectoryError::ZeroEntries { offset } => {
                write!(f, "The IFD at `{offset}` told us it had zero entries.")
            }
            DirectoryError::Truncated { offset, entries } => write!(
                f,
                "The IFD at `{offset}` was cut short before its `{entries}` entries ended."
            ),
            DirectoryError::NoNextPointer { offset } => write!(
                f,
                "The IFD at `{offset}` didn't give a pointer to the next IFD."
            ),
            DirectoryError::ReadFailed { offset, kind } => {
                write!(f, "Failed to read the IFD at `{offset}`. err: `{kind}`")
            }
            DirectoryError::BadSubIfdPointer { tag_id, err } => write!(
                f,
                "Sub-IFD pointer tag `{tag_id:#06x}` couldn't be read. err: {err}"
            ),
        }
    }
}

impl core::fmt::Display for HierarchyError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HierarchyError::UnknownParent { placement } => {
                write!(f, "No IFD is mapped at placement `{placement:x?}`.")
            }
            HierarchyError::DuplicateDirectoryMapping {
                tag_id,
                existing_parent,
                requested_parent,
            } => write!(
                f,
                "Tag `{tag_id:#06x}` is already mapped under `{existing_parent:x?}`. \
                Can't map it again under `{requested_parent:x?}`."
            ),
        }
    }
}

impl core::fmt::Display for ExifFatalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoByteOrderMarker { len } => {
                write!(f, "No byte order marker was found. len: `{len}`")
            }
            Self::WeirdByteOrderMarker { found } => match core::str::from_utf8(found.as_slice()) {
                Ok(found_utf8_bom) => {
                    write!(f, "Got a weird byte-order marker: `{found_utf8_bom}`")
                }
                Err(_) => write!(f, "Got a weird byte-order marker - wasn't ASCII: {found:?}"),
            },
            Self::NoTiffMagicNumber => {
                f.write_str("No TIFF magic number found - the slice was likely cut short.")
            }
            Self::MagicNumberWasntTiff { found } => {
                write!(f, "Magic number was not TIFF! got: `{found}`")
            }
            Self::NoTiffHeaderOffset => f.write_str("No TIFF header offset was found."),
            Self::HeaderOffsetBeforeHeader => f.write_str(
                "TIFF header offset asked us to move into the header. Likely a \
                broken file - cannot continue parsing.",
            ),
            Self::IfdLoop { offset } => {
                write!(f, "The IFD chain loops back to offset `{offset}`.")
            }
            Self::Directory(e) => write!(f, "Failed to decode an IFD. err: {e}"),
        }
    }
}

impl core::error::Error for TagError {}
impl core::error::Error for DirectoryError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            DirectoryError::BadSubIfdPointer { err, .. } => Some(err),
            _ => None,
        }
    }
}
impl core::error::Error for HierarchyError {}
impl core::error::Error for ExifFatalError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            ExifFatalError::Directory(e) => Some(e),
            _ => None,
        }
    }
}
