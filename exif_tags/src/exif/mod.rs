//! Exif is a media metadata format primarily used by cameras.
//!
//! It's a structured binary format built on TIFF. Each field in an IFD
//! (Image File Directory) contains a tag ID, a value type, and a count saying
//! how many values are stored. Small values sit right inside the field;
//! larger ones are stored elsewhere and the field holds their offset.
//!
//! This module decodes the fields into [`TagDescriptor`]s without reading
//! their values. Values are resolved on demand through the [`ExifSource`]
//! the descriptors came from.

pub use exif_tags_types::exif::{
    Endianness,
    ifd::IfdGroup,
    primitives::{Rational, SRational, ValueType},
};

pub use self::{
    mapping::{IfdMapping, MappedIfd},
    source::{ByteSource, ExifSource, ReaderSource},
    tag::{INLINE_THRESHOLD, TagDescriptor},
};

use rustc_hash::FxHashSet;
use winnow::{
    Parser as _, Stateful,
    binary::{Endianness as WinnowEndianness, u16, u32},
    error::EmptyError,
    token::take,
};

use self::error::{DirectoryError, ExifFatalError, ExifFatalResult};

pub mod error;
pub mod ifd;
pub mod mapping;
pub mod source;
pub mod tag;
mod value;

/// The TIFF magic number, found right after the byte order marker.
const TIFF_MAGIC_NUMBER: u16 = 42;

/// The header is 8 bytes: marker, magic number, and the first IFD's offset.
const TIFF_HEADER_LEN: u32 = 8;

pub(crate) fn winnow_endianness(endianness: Endianness) -> WinnowEndianness {
    match endianness {
        Endianness::Little => WinnowEndianness::Little,
        Endianness::Big => WinnowEndianness::Big,
    }
}

/// What a TIFF header tells us.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TiffHeader {
    /// The byte order of everything after the marker.
    pub endianness: Endianness,

    /// Where IFD 0 starts, relative to the start of the header.
    pub first_ifd_offset: u32,
}

/// Reads the TIFF header at the start of `blob`.
pub fn read_header(blob: &[u8]) -> ExifFatalResult<TiffHeader> {
    let mut input = blob;

    // parse the endianness
    let endianness: Endianness = parse_blob_endianness.parse_next(&mut input)?;

    // from here on out, everything depends on the endianness
    let stream = &mut Stream {
        input,
        state: State {
            endianness: winnow_endianness(endianness),
        },
    };

    parse_tiff_magic_number(stream)?;
    let first_ifd_offset = parse_tiff_header_offset(stream)?;

    Ok(TiffHeader {
        endianness,
        first_ifd_offset,
    })
}

/// A decoded Exif blob.
///
/// Holds every tag found in the IFD chain and the sub-IFDs the mapping
/// names, in the order they were found. The source stays bound to the
/// session, since the tags' values are only read when asked for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Exif<S> {
    source: S,
    tags: Vec<TagDescriptor>,
    ifd_offsets: Vec<u32>,
}

impl<B: AsRef<[u8]>> Exif<ByteSource<B>> {
    /// Parses the given Exif blob, following the standard sub-IFDs.
    pub fn new(blob: B) -> ExifFatalResult<Self> {
        Self::with_mapping(blob, &IfdMapping::standard())
    }

    /// Parses the given Exif blob, following the sub-IFDs in `mapping`.
    pub fn with_mapping(blob: B, mapping: &IfdMapping) -> ExifFatalResult<Self> {
        let header = read_header(blob.as_ref())?;
        let source = ByteSource::new(blob, header.endianness);
        Self::with_source(source, header.first_ifd_offset, mapping)
    }
}

impl<S: ExifSource> Exif<S> {
    /// Walks the IFD chain starting at `first_ifd` in `source`.
    ///
    /// Each chained IFD is named `IFD0`, `IFD1`, and so on. Sub-IFDs get the
    /// names given by `mapping`, appended to their parent's path.
    pub fn with_source(source: S, first_ifd: u32, mapping: &IfdMapping) -> ExifFatalResult<Self> {
        let mut tags = Vec::new();
        let mut ifd_offsets = Vec::new();

        // if there are no IFDs, do an early return
        let mut probe = [0_u8; 1];
        match source.read_at(first_ifd, &mut probe) {
            Ok(0) => {
                log::trace!("There's no data at `{first_ifd}`. Assuming there are zero IFDs.");
                return Ok(Self {
                    source,
                    tags,
                    ifd_offsets,
                });
            }
            Ok(_) => (),
            Err(e) => {
                log::error!("Failed to read the first IFD. err: {e}");
                return Err(ExifFatalError::Directory(DirectoryError::ReadFailed {
                    offset: first_ifd,
                    kind: e.kind(),
                }));
            }
        }

        let mut seen: FxHashSet<u32> = FxHashSet::default();
        let mut maybe_next_ifd_ptr = Some(first_ifd);
        while let Some(offset) = maybe_next_ifd_ptr {
            if !seen.insert(offset) {
                log::error!("IFD chain looped back to `{offset}`! Can't continue parsing.");
                return Err(ExifFatalError::IfdLoop { offset });
            }

            let path = vec![format!("{}{}", IfdGroup::_0.name(), ifd_offsets.len())];
            log::trace!("At next IFD! path: `{path:?}`, offset: `{offset}`");

            maybe_next_ifd_ptr =
                ifd::walk(&source, offset, mapping.root(), Some(IfdGroup::_0), &path, &mut tags)
                    .inspect_err(|e| log::error!("Failed to parse IFD at `{offset}`. err: {e}"))?;
            ifd_offsets.push(offset);
        }

        Ok(Self {
            source,
            tags,
            ifd_offsets,
        })
    }

    /// Where each IFD in the main chain starts.
    pub fn ifd_offsets(&self) -> &[u32] {
        &self.ifd_offsets
    }

    /// Gives the source back.
    pub fn into_source(self) -> S {
        self.source
    }
}

/// A collection of decoded tags, plus the source their values come from.
///
/// Maker note parsers read the container's tags through this.
pub trait ExifTags {
    /// Every tag, in the order found.
    fn tags(&self) -> &[TagDescriptor];

    /// The source the tags' values are read from.
    fn source(&self) -> &dyn ExifSource;

    /// Finds a tag by its IFD path and ID.
    fn get(&self, ifd_path: &[&str], tag_id: u16) -> Option<&TagDescriptor> {
        self.tags().iter().find(|tag| {
            tag.tag_id == tag_id && tag.ifd_path.iter().map(String::as_str).eq(ifd_path.iter().copied())
        })
    }

    /// Finds the first tag with the given name.
    fn get_by_name(&self, name: &str) -> Option<&TagDescriptor> {
        self.tags().iter().find(|tag| tag.name == name)
    }

    /// The byte order of the source.
    fn endianness(&self) -> Endianness {
        self.source().endianness()
    }
}

impl<S: ExifSource> ExifTags for Exif<S> {
    fn tags(&self) -> &[TagDescriptor] {
        &self.tags
    }

    fn source(&self) -> &dyn ExifSource {
        &self.source
    }
}

/// Finds the endianness of the Exif blob.
fn parse_blob_endianness(input: &mut &[u8]) -> ExifFatalResult<Endianness> {
    let input_len = input.len();

    // ensure we've got two good bytes
    log::trace!("Looking for the BOM bytes...");
    let two_ascii_bytes: [u8; 2] = take(2_usize)
        .parse_next(input)
        .map_err(|_: EmptyError| {
            log::error!("Couldn't find endianness marker!");
            ExifFatalError::NoByteOrderMarker { len: input_len }
        })?
        .try_into()
        .unwrap_or_else(|e| unreachable!("winnow verified the size. but err: {e}"));

    match two_ascii_bytes {
        [b'I', b'I'] => Ok(Endianness::Little).inspect(|f| log::trace!("It's LE: {f:?}")),
        [b'M', b'M'] => Ok(Endianness::Big).inspect(|f| log::trace!("It's BE: {f:?}")),

        // found a weird bom!
        found => {
            let e = ExifFatalError::WeirdByteOrderMarker { found };
            log::error!("Couldn't parse out Exif! err: {e}");
            Err(e)
        }
    }
}

#[derive(Debug)]
struct State {
    endianness: WinnowEndianness,
}

/// The header, wrapped with its endianness.
type Stream<'s> = Stateful<&'s [u8], State>;

/// Ensures we're working with the correct kind of file.
fn parse_tiff_magic_number(input: &mut Stream) -> ExifFatalResult<()> {
    let endianness = input.state.endianness;

    log::trace!("Getting magic number...");
    let magic_number: u16 = u16(endianness)
        .parse_next(input)
        .map_err(|_: EmptyError| {
            log::error!("Couldn't find TIFF magic number!");
            ExifFatalError::NoTiffMagicNumber
        })?;

    if magic_number != TIFF_MAGIC_NUMBER {
        log::error!("Magic number wasn't for TIFF. got: `{magic_number}`");
        return Err(ExifFatalError::MagicNumberWasntTiff {
            found: magic_number,
        });
    }

    log::trace!("Magic number was good!");
    Ok(())
}

/// Grabs the offset of IFD 0.
///
/// It can't point back into the 8-byte header.
fn parse_tiff_header_offset(input: &mut Stream) -> ExifFatalResult<u32> {
    let endianness = input.state.endianness;

    let offset: u32 = u32(endianness)
        .parse_next(input)
        .map_err(|_: EmptyError| {
            log::error!("Didn't find a TIFF header offset!");
            ExifFatalError::NoTiffHeaderOffset
        })
        .inspect(|offset| log::trace!("found offset: `{offset}`"))?;

    if offset < TIFF_HEADER_LEN {
        log::error!("Exif blob placed offset inside the header! Can't continue parsing.");
        return Err(ExifFatalError::HeaderOffsetBeforeHeader);
    }

    Ok(offset)
}
