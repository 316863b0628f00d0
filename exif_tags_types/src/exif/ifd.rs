//! Contains stuff related to IFDs.
//!
//! For more info, see the [`IfdGroup`] enumeration.

use crate::{
    exif::{
        primitives::ValueType,
        tags::{ExifIfdTag, GpsIfdTag, Ifd0Tag, InteropIfdTag},
    },
    makernote::{CanonTag, NikonPreviewTag, NikonTag},
};

/// An IFD is a set of keys found within a media file's Exif metadata.
///
/// An IFD group is NOT an abstraction - they are _literally_ present in the
/// file. The group decides which dictionary names the tags inside it.
///
/// IFD 0 (and every IFD chained after it) will optionally contain keys
/// indicating the locations of sub-IFDs within the metadata slice. These are
/// like pointers, not direct embeds.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub enum IfdGroup {
    /// Refers to "IFD 0", and to any IFD chained after it (like the
    /// thumbnail's IFD 1).
    #[doc(alias = "IFD0")]
    #[doc(alias = "TIFF")]
    _0,

    /// The "Exif" IFD provides camera-based metadata.
    #[doc(alias = "ExifIFD")]
    Exif,

    /// The GPS IFD contains location metadata.
    #[doc(alias = "GPSIFD")]
    Gps,

    /// The interoperability IFD.
    #[doc(alias = "InteropIFD")]
    Interop,

    /// Canon's maker note directory.
    CanonMakerNote,

    /// Nikon's (type 3) maker note directory.
    NikonMakerNote,

    /// The preview image sub-IFD inside Nikon's maker note.
    NikonPreview,

    /// Any other directory, named by its path segment.
    ///
    /// These have no dictionary, so their tags are named by ID.
    Other(&'static str),
}

impl IfdGroup {
    /// The path segment used for this group.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::_0 => "IFD",
            Self::Exif => "Exif",
            Self::Gps => "GPSInfo",
            Self::Interop => "Iop",
            Self::CanonMakerNote => "MakerNoteCanon",
            Self::NikonMakerNote => "MakerNoteNikon",
            Self::NikonPreview => "NikonPreview",
            Self::Other(name) => *name,
        }
    }

    /// Finds the group using the given path segment.
    ///
    /// Only groups with a dictionary are found.
    ///
    /// ```
    /// use exif_tags_types::exif::ifd::IfdGroup;
    ///
    /// assert_eq!(IfdGroup::from_name("GPSInfo"), Some(IfdGroup::Gps));
    /// assert_eq!(IfdGroup::from_name("nope"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        [
            Self::_0,
            Self::Exif,
            Self::Gps,
            Self::Interop,
            Self::CanonMakerNote,
            Self::NikonMakerNote,
            Self::NikonPreview,
        ]
        .into_iter()
        .find(|group| group.name() == name)
    }

    /// Looks up the field name of a tag in this group.
    ///
    /// ```
    /// use exif_tags_types::exif::ifd::IfdGroup;
    ///
    /// assert_eq!(IfdGroup::_0.tag_name(0x010f), Some("Make"));
    /// assert_eq!(IfdGroup::Gps.tag_name(0x010f), None);
    /// assert_eq!(IfdGroup::Other("CanonCustom").tag_name(0x010f), None);
    /// ```
    pub fn tag_name(&self, tag_id: u16) -> Option<&'static str> {
        match self {
            Self::_0 => Ifd0Tag::try_from(tag_id).ok().map(|t| t.tag_name()),
            Self::Exif => ExifIfdTag::try_from(tag_id).ok().map(|t| t.tag_name()),
            Self::Gps => GpsIfdTag::try_from(tag_id).ok().map(|t| t.tag_name()),
            Self::Interop => InteropIfdTag::try_from(tag_id).ok().map(|t| t.tag_name()),
            Self::CanonMakerNote => CanonTag::try_from(tag_id).ok().map(|t| t.tag_name()),
            Self::NikonMakerNote => NikonTag::try_from(tag_id).ok().map(|t| t.tag_name()),
            Self::NikonPreview => NikonPreviewTag::try_from(tag_id).ok().map(|t| t.tag_name()),
            Self::Other(_) => None,
        }
    }

    /// Returns the type(s) a tag in this group is expected to have.
    pub fn tag_types(&self, tag_id: u16) -> Option<&'static [ValueType]> {
        match self {
            Self::_0 => Ifd0Tag::try_from(tag_id).ok().map(|t| t.types()),
            Self::Exif => ExifIfdTag::try_from(tag_id).ok().map(|t| t.types()),
            Self::Gps => GpsIfdTag::try_from(tag_id).ok().map(|t| t.types()),
            Self::Interop => InteropIfdTag::try_from(tag_id).ok().map(|t| t.types()),
            Self::CanonMakerNote => CanonTag::try_from(tag_id).ok().map(|t| t.types()),
            Self::NikonMakerNote => NikonTag::try_from(tag_id).ok().map(|t| t.types()),
            Self::NikonPreview => NikonPreviewTag::try_from(tag_id).ok().map(|t| t.types()),
            Self::Other(_) => None,
        }
    }
}

/// One edge in the standard IFD hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IfdDefinition {
    /// The tag IDs leading from the root to the parent IFD.
    pub parent_placement: &'static [u16],

    /// The pointer tag that holds this IFD's offset.
    pub tag_id: u16,

    /// Which group the IFD belongs to.
    pub group: IfdGroup,
}

/// The sub-IFDs reachable from any IFD in the main chain.
///
/// The root is the chained IFD itself (IFD 0, IFD 1, ...), so it isn't
/// listed here.
pub const STANDARD_IFDS: &[IfdDefinition] = &[
    IfdDefinition {
        parent_placement: &[],
        tag_id: Ifd0Tag::ExifIfdPointer.tag_id(),
        group: IfdGroup::Exif,
    },
    IfdDefinition {
        parent_placement: &[],
        tag_id: Ifd0Tag::GpsInfoIfdPointer.tag_id(),
        group: IfdGroup::Gps,
    },
    IfdDefinition {
        parent_placement: &[Ifd0Tag::ExifIfdPointer.tag_id()],
        tag_id: ExifIfdTag::InteroperabilityIfdPointer.tag_id(),
        group: IfdGroup::Interop,
    },
];
