//! Dictionaries for the standard IFD groups.
//!
//! Each group gets its own list, made through `make_key_list_for_group!`.
//! The names are the field names from the Exif standard; they're what
//! [`IfdGroup::tag_name`] hands out.
//!
//! Tags missing from these lists still decode fine. They just don't get a
//! name from the dictionary.

use crate::exif::{ifd::IfdGroup, primitives::ValueType as Vt};

/*
 *
 *
 *  TIFF Rev. 6.0 attributes, found in IFD 0 and IFD 1
 *
 *
 */
make_key_list_for_group!(enum Ifd0Tag => IfdGroup::_0,
    ImageWidth = 0x0100 => { name: "ImageWidth", types: &[Vt::Short, Vt::Long], },
    ImageLength = 0x0101 => { name: "ImageLength", types: &[Vt::Short, Vt::Long], },
    BitsPerSample = 0x0102 => { name: "BitsPerSample", types: &[Vt::Short], },
    Compression = 0x0103 => { name: "Compression", types: &[Vt::Short], },
    PhotometricInterpretation = 0x0106 => { name: "PhotometricInterpretation", types: &[Vt::Short], },
    ImageDescription = 0x010e => { name: "ImageDescription", types: &[Vt::Ascii], },
    Make = 0x010f => { name: "Make", types: &[Vt::Ascii], },
    Model = 0x0110 => { name: "Model", types: &[Vt::Ascii], },
    StripOffsets = 0x0111 => { name: "StripOffsets", types: &[Vt::Short, Vt::Long], },
    Orientation = 0x0112 => { name: "Orientation", types: &[Vt::Short], },
    SamplesPerPixel = 0x0115 => { name: "SamplesPerPixel", types: &[Vt::Short], },
    RowsPerStrip = 0x0116 => { name: "RowsPerStrip", types: &[Vt::Short, Vt::Long], },
    StripByteCounts = 0x0117 => { name: "StripByteCounts", types: &[Vt::Short, Vt::Long], },
    XResolution = 0x011a => { name: "XResolution", types: &[Vt::Rational], },
    YResolution = 0x011b => { name: "YResolution", types: &[Vt::Rational], },
    PlanarConfiguration = 0x011c => { name: "PlanarConfiguration", types: &[Vt::Short], },
    ResolutionUnit = 0x0128 => { name: "ResolutionUnit", types: &[Vt::Short], },
    TransferFunction = 0x012d => { name: "TransferFunction", types: &[Vt::Short], },
    Software = 0x0131 => { name: "Software", types: &[Vt::Ascii], },
    DateTime = 0x0132 => { name: "DateTime", types: &[Vt::Ascii], },
    Artist = 0x013b => { name: "Artist", types: &[Vt::Ascii], },
    WhitePoint = 0x013e => { name: "WhitePoint", types: &[Vt::Rational], },
    PrimaryChromaticities = 0x013f => { name: "PrimaryChromaticities", types: &[Vt::Rational], },
    JPEGInterchangeFormat = 0x0201 => { name: "JPEGInterchangeFormat", types: &[Vt::Long], },
    JPEGInterchangeFormatLength = 0x0202 => { name: "JPEGInterchangeFormatLength", types: &[Vt::Long], },
    YCbCrCoefficients = 0x0211 => { name: "YCbCrCoefficients", types: &[Vt::Rational], },
    YCbCrSubSampling = 0x0212 => { name: "YCbCrSubSampling", types: &[Vt::Short], },
    YCbCrPositioning = 0x0213 => { name: "YCbCrPositioning", types: &[Vt::Short], },
    ReferenceBlackWhite = 0x0214 => { name: "ReferenceBlackWhite", types: &[Vt::Rational], },
    Copyright = 0x8298 => { name: "Copyright", types: &[Vt::Ascii], },
    ExifIfdPointer = 0x8769 => { name: "ExifIfdPointer", types: &[Vt::Long], },
    GpsInfoIfdPointer = 0x8825 => { name: "GpsInfoIfdPointer", types: &[Vt::Long], },
);

/*
 *
 *
 *  Exif IFD attributes
 *
 *
 */
make_key_list_for_group!(enum ExifIfdTag => IfdGroup::Exif,
    ExposureTime = 0x829a => { name: "ExposureTime", types: &[Vt::Rational], },
    FNumber = 0x829d => { name: "FNumber", types: &[Vt::Rational], },
    ExposureProgram = 0x8822 => { name: "ExposureProgram", types: &[Vt::Short], },
    ISOSpeedRatings = 0x8827 => { name: "ISOSpeedRatings", types: &[Vt::Short], },
    ExifVersion = 0x9000 => { name: "ExifVersion", types: &[Vt::Undefined], },
    DateTimeOriginal = 0x9003 => { name: "DateTimeOriginal", types: &[Vt::Ascii], },
    DateTimeDigitized = 0x9004 => { name: "DateTimeDigitized", types: &[Vt::Ascii], },
    OffsetTime = 0x9010 => { name: "OffsetTime", types: &[Vt::Ascii], },
    ComponentsConfiguration = 0x9101 => { name: "ComponentsConfiguration", types: &[Vt::Undefined], },
    ShutterSpeedValue = 0x9201 => { name: "ShutterSpeedValue", types: &[Vt::SRational], },
    ApertureValue = 0x9202 => { name: "ApertureValue", types: &[Vt::Rational], },
    BrightnessValue = 0x9203 => { name: "BrightnessValue", types: &[Vt::SRational], },
    ExposureBiasValue = 0x9204 => { name: "ExposureBiasValue", types: &[Vt::SRational], },
    MaxApertureValue = 0x9205 => { name: "MaxApertureValue", types: &[Vt::Rational], },
    SubjectDistance = 0x9206 => { name: "SubjectDistance", types: &[Vt::Rational], },
    MeteringMode = 0x9207 => { name: "MeteringMode", types: &[Vt::Short], },
    LightSource = 0x9208 => { name: "LightSource", types: &[Vt::Short], },
    Flash = 0x9209 => { name: "Flash", types: &[Vt::Short], },
    FocalLength = 0x920a => { name: "FocalLength", types: &[Vt::Rational], },
    MakerNote = 0x927c => { name: "MakerNote", types: &[Vt::Undefined], },
    UserComment = 0x9286 => { name: "UserComment", types: &[Vt::Undefined], },
    SubSecTime = 0x9290 => { name: "SubSecTime", types: &[Vt::Ascii], },
    SubSecTimeOriginal = 0x9291 => { name: "SubSecTimeOriginal", types: &[Vt::Ascii], },
    FlashpixVersion = 0xa000 => { name: "FlashpixVersion", types: &[Vt::Undefined], },
    ColorSpace = 0xa001 => { name: "ColorSpace", types: &[Vt::Short], },
    PixelXDimension = 0xa002 => { name: "PixelXDimension", types: &[Vt::Short, Vt::Long], },
    PixelYDimension = 0xa003 => { name: "PixelYDimension", types: &[Vt::Short, Vt::Long], },
    InteroperabilityIfdPointer = 0xa005 => { name: "InteroperabilityIfdPointer", types: &[Vt::Long], },
    FocalPlaneXResolution = 0xa20e => { name: "FocalPlaneXResolution", types: &[Vt::Rational], },
    FocalPlaneYResolution = 0xa20f => { name: "FocalPlaneYResolution", types: &[Vt::Rational], },
    SensingMethod = 0xa217 => { name: "SensingMethod", types: &[Vt::Short], },
    FileSource = 0xa300 => { name: "FileSource", types: &[Vt::Undefined], },
    SceneType = 0xa301 => { name: "SceneType", types: &[Vt::Undefined], },
    CustomRendered = 0xa401 => { name: "CustomRendered", types: &[Vt::Short], },
    ExposureMode = 0xa402 => { name: "ExposureMode", types: &[Vt::Short], },
    WhiteBalance = 0xa403 => { name: "WhiteBalance", types: &[Vt::Short], },
    DigitalZoomRatio = 0xa404 => { name: "DigitalZoomRatio", types: &[Vt::Rational], },
    FocalLengthIn35mmFilm = 0xa405 => { name: "FocalLengthIn35mmFilm", types: &[Vt::Short], },
    SceneCaptureType = 0xa406 => { name: "SceneCaptureType", types: &[Vt::Short], },
    Contrast = 0xa408 => { name: "Contrast", types: &[Vt::Short], },
    Saturation = 0xa409 => { name: "Saturation", types: &[Vt::Short], },
    Sharpness = 0xa40a => { name: "Sharpness", types: &[Vt::Short], },
    ImageUniqueID = 0xa420 => { name: "ImageUniqueID", types: &[Vt::Ascii], },
    BodySerialNumber = 0xa431 => { name: "BodySerialNumber", types: &[Vt::Ascii], },
    LensSpecification = 0xa432 => { name: "LensSpecification", types: &[Vt::Rational], },
    LensMake = 0xa433 => { name: "LensMake", types: &[Vt::Ascii], },
    LensModel = 0xa434 => { name: "LensModel", types: &[Vt::Ascii], },
);

/*
 *
 *
 *  GPS attributes
 *
 *
 */
make_key_list_for_group!(enum GpsIfdTag => IfdGroup::Gps,
    GPSVersionID = 0x0000 => { name: "GPSVersionID", types: &[Vt::Byte], },
    GPSLatitudeRef = 0x0001 => { name: "GPSLatitudeRef", types: &[Vt::Ascii], },
    GPSLatitude = 0x0002 => { name: "GPSLatitude", types: &[Vt::Rational], },
    GPSLongitudeRef = 0x0003 => { name: "GPSLongitudeRef", types: &[Vt::Ascii], },
    GPSLongitude = 0x0004 => { name: "GPSLongitude", types: &[Vt::Rational], },
    GPSAltitudeRef = 0x0005 => { name: "GPSAltitudeRef", types: &[Vt::Byte], },
    GPSAltitude = 0x0006 => { name: "GPSAltitude", types: &[Vt::Rational], },
    GPSTimeStamp = 0x0007 => { name: "GPSTimeStamp", types: &[Vt::Rational], },
    GPSSatellites = 0x0008 => { name: "GPSSatellites", types: &[Vt::Ascii], },
    GPSStatus = 0x0009 => { name: "GPSStatus", types: &[Vt::Ascii], },
    GPSMeasureMode = 0x000a => { name: "GPSMeasureMode", types: &[Vt::Ascii], },
    GPSDOP = 0x000b => { name: "GPSDOP", types: &[Vt::Rational], },
    GPSSpeedRef = 0x000c => { name: "GPSSpeedRef", types: &[Vt::Ascii], },
    GPSSpeed = 0x000d => { name: "GPSSpeed", types: &[Vt::Rational], },
    GPSTrackRef = 0x000e => { name: "GPSTrackRef", types: &[Vt::Ascii], },
    GPSTrack = 0x000f => { name: "GPSTrack", types: &[Vt::Rational], },
    GPSImgDirectionRef = 0x0010 => { name: "GPSImgDirectionRef", types: &[Vt::Ascii], },
    GPSImgDirection = 0x0011 => { name: "GPSImgDirection", types: &[Vt::Rational], },
    GPSMapDatum = 0x0012 => { name: "GPSMapDatum", types: &[Vt::Ascii], },
    GPSProcessingMethod = 0x001b => { name: "GPSProcessingMethod", types: &[Vt::Undefined], },
    GPSDateStamp = 0x001d => { name: "GPSDateStamp", types: &[Vt::Ascii], },
    GPSDifferential = 0x001e => { name: "GPSDifferential", types: &[Vt::Short], },
);

/*
 *
 *
 *  Interoperability attributes
 *
 *
 */
make_key_list_for_group!(enum InteropIfdTag => IfdGroup::Interop,
    InteroperabilityIndex = 0x0001 => { name: "InteroperabilityIndex", types: &[Vt::Ascii], },
    InteroperabilityVersion = 0x0002 => { name: "InteroperabilityVersion", types: &[Vt::Undefined], },
);
