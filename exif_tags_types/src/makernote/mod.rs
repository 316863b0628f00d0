//! Dictionaries and layout constants for the supported maker notes.
//!
//! Maker notes are blobs stored in the Exif IFD's `MakerNote` field. Each
//! vendor structures them differently, so the constants here describe where
//! the vendor's IFD lives and which of its sub-IFDs are understood.

use crate::exif::{
    ifd::{IfdDefinition, IfdGroup},
    primitives::ValueType as Vt,
};

/// Canon maker notes apply when the `Make` field is exactly this.
pub const CANON_MAKE: &str = "Canon";

/// Nikon (type 3) maker notes start with these bytes.
pub const NIKON_SIGNATURE: &[u8; 6] = b"Nikon\0";

/// Where the embedded TIFF structure starts inside a Nikon maker note.
///
/// The four bytes between the signature and this offset hold the maker note
/// version.
pub const NIKON_TIFF_START: u32 = 10;

/// Sub-IFDs followed inside Canon maker notes.
///
/// Canon's "camera settings" field is a packed array of shorts, not an IFD,
/// so nothing is followed by default.
pub const CANON_SUB_IFDS: &[IfdDefinition] = &[];

/// Sub-IFDs followed inside Nikon maker notes.
pub const NIKON_SUB_IFDS: &[IfdDefinition] = &[IfdDefinition {
    parent_placement: &[],
    tag_id: NikonTag::PreviewIfd.tag_id(),
    group: IfdGroup::NikonPreview,
}];

/// Nikon fields holding offsets into the *container*, stored relative to
/// the embedded TIFF structure instead.
pub const NIKON_REBASED_TAGS: &[(IfdGroup, u16)] = &[(
    IfdGroup::NikonPreview,
    NikonPreviewTag::PreviewImageStart.tag_id(),
)];

make_key_list_for_group!(enum CanonTag => IfdGroup::CanonMakerNote,
    CameraSettings = 0x0001 => { name: "CanonCameraSettings", types: &[Vt::Short], },
    FocalLength = 0x0002 => { name: "CanonFocalLength", types: &[Vt::Short], },
    ShotInfo = 0x0004 => { name: "CanonShotInfo", types: &[Vt::Short], },
    Panorama = 0x0005 => { name: "CanonPanorama", types: &[Vt::Short], },
    ImageType = 0x0006 => { name: "CanonImageType", types: &[Vt::Ascii], },
    FirmwareVersion = 0x0007 => { name: "CanonFirmwareVersion", types: &[Vt::Ascii], },
    FileNumber = 0x0008 => { name: "CanonFileNumber", types: &[Vt::Long], },
    OwnerName = 0x0009 => { name: "CanonOwnerName", types: &[Vt::Ascii], },
    SerialNumber = 0x000c => { name: "CanonSerialNumber", types: &[Vt::Long], },
    ModelId = 0x0010 => { name: "CanonModelID", types: &[Vt::Long], },
    LensModel = 0x0095 => { name: "CanonLensModel", types: &[Vt::Ascii], },
);

make_key_list_for_group!(enum NikonTag => IfdGroup::NikonMakerNote,
    Version = 0x0001 => { name: "NikonMakerNoteVersion", types: &[Vt::Undefined], },
    Iso = 0x0002 => { name: "NikonISO", types: &[Vt::Short], },
    ColorMode = 0x0003 => { name: "NikonColorMode", types: &[Vt::Ascii], },
    Quality = 0x0004 => { name: "NikonQuality", types: &[Vt::Ascii], },
    WhiteBalance = 0x0005 => { name: "NikonWhiteBalance", types: &[Vt::Ascii], },
    Sharpness = 0x0006 => { name: "NikonSharpness", types: &[Vt::Ascii], },
    FocusMode = 0x0007 => { name: "NikonFocusMode", types: &[Vt::Ascii], },
    FlashSetting = 0x0008 => { name: "NikonFlashSetting", types: &[Vt::Ascii], },
    PreviewIfd = 0x0011 => { name: "NikonPreviewIFD", types: &[Vt::Long, Vt::Undefined], },
    SerialNumber = 0x001d => { name: "NikonSerialNumber", types: &[Vt::Ascii], },
    LensType = 0x0083 => { name: "NikonLensType", types: &[Vt::Byte], },
    Lens = 0x0084 => { name: "NikonLens", types: &[Vt::Rational], },
    ShutterCount = 0x00a7 => { name: "NikonShutterCount", types: &[Vt::Long], },
);

make_key_list_for_group!(enum NikonPreviewTag => IfdGroup::NikonPreview,
    Compression = 0x0103 => { name: "NikonPreviewCompression", types: &[Vt::Short], },
    XResolution = 0x011a => { name: "NikonPreviewXResolution", types: &[Vt::Rational], },
    YResolution = 0x011b => { name: "NikonPreviewYResolution", types: &[Vt::Rational], },
    ResolutionUnit = 0x0128 => { name: "NikonPreviewResolutionUnit", types: &[Vt::Short], },
    PreviewImageStart = 0x0201 => { name: "NikonPreviewImageStart", types: &[Vt::Long], },
    PreviewImageLength = 0x0202 => { name: "NikonPreviewImageLength", types: &[Vt::Long], },
    YCbCrPositioning = 0x0213 => { name: "NikonPreviewYCbCrPositioning", types: &[Vt::Short], },
);
