//! Vendor-specific maker notes.
//!
//! The Exif IFD's `MakerNote` field is an opaque blob, but most vendors
//! store an IFD in it. Each vendor places that IFD differently, and each
//! has its own rules for what its offsets are relative to.
//!
//! A [`MakerNoteParser`] recognizes one vendor's notes and decodes them into
//! a [`MakerNote`]. Parsers are grouped in a [`MakerNoteRegistry`], which
//! runs all of them against a set of Exif tags.

use std::sync::Arc;

use exif_tags_types::exif::tags::{ExifIfdTag, Ifd0Tag};

use crate::exif::{ByteSource, ExifSource, ExifTags, TagDescriptor};

pub use self::{
    canon::Canon,
    error::{MakerNoteError, MakerNoteResult},
    nikon::Nikon,
};

pub mod canon;
pub mod error;
pub mod nikon;

/// Where `Make` lives.
const IFD0_PATH: &[&str] = &["IFD0"];

/// Where `MakerNote` lives.
const EXIF_PATH: &[&str] = &["IFD0", "Exif"];

/// The tags decoded from one vendor's maker note.
///
/// The tags' values are read from the maker note's own source, not the
/// container's.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MakerNote {
    vendor: &'static str,
    source: ByteSource<Arc<[u8]>>,
    tags: Vec<TagDescriptor>,
}

impl MakerNote {
    /// The vendor whose parser produced this.
    pub fn vendor(&self) -> &'static str {
        self.vendor
    }

    /// The view of the payload the tags point into.
    pub fn payload(&self) -> &ByteSource<Arc<[u8]>> {
        &self.source
    }
}

impl ExifTags for MakerNote {
    fn tags(&self) -> &[TagDescriptor] {
        &self.tags
    }

    fn source(&self) -> &dyn ExifSource {
        &self.source
    }
}

/// Decodes one vendor's maker notes.
pub trait MakerNoteParser: core::fmt::Debug + Send + Sync {
    /// The vendor's name.
    fn vendor(&self) -> &'static str;

    /// Decodes the maker note in `exif`, if this vendor wrote it.
    ///
    /// Notes from other vendors (or no note at all) give `Ok(None)`. An
    /// error means the note was recognized but broken.
    fn parse(&self, exif: &dyn ExifTags) -> MakerNoteResult<Option<MakerNote>>;
}

/// A set of maker note parsers to try.
#[derive(Debug)]
pub struct MakerNoteRegistry {
    parsers: Vec<Box<dyn MakerNoteParser>>,
}

impl MakerNoteRegistry {
    /// Creates a registry holding exactly `parsers`.
    pub fn new(parsers: Vec<Box<dyn MakerNoteParser>>) -> Self {
        Self { parsers }
    }

    /// A registry with every built-in vendor.
    pub fn all() -> Self {
        Self::new(vec![Box::new(Canon::default()), Box::new(Nikon::default())])
    }

    /// The parsers, in the order they're tried.
    pub fn parsers(&self) -> impl Iterator<Item = &dyn MakerNoteParser> {
        self.parsers.iter().map(|p| p.as_ref())
    }

    /// Runs every parser against `exif`.
    ///
    /// Each vendor that recognized the note gets an entry, whether it
    /// decoded or not. A broken note doesn't stop the other vendors.
    pub fn dispatch(&self, exif: &dyn ExifTags) -> Vec<(&'static str, MakerNoteResult<MakerNote>)> {
        self.parsers
            .iter()
            .filter_map(|parser| {
                let vendor = parser.vendor();
                match parser.parse(exif) {
                    Ok(None) => {
                        log::trace!("Maker note isn't from `{vendor}`.");
                        None
                    }
                    Ok(Some(note)) => {
                        log::trace!("Decoded `{}` tags from `{vendor}`.", note.tags.len());
                        Some((vendor, Ok(note)))
                    }
                    Err(e) => {
                        log::warn!("`{vendor}` maker note failed to decode. err: {e}");
                        Some((vendor, Err(e)))
                    }
                }
            })
            .collect()
    }
}

/// Finds the container's `MakerNote` tag.
fn maker_note_tag(exif: &dyn ExifTags) -> Option<&TagDescriptor> {
    exif.get(EXIF_PATH, ExifIfdTag::MakerNote.tag_id())
}

/// Finds the container's `Make`, as text.
///
/// An unreadable `Make` is treated like a missing one.
fn make(exif: &dyn ExifTags) -> Option<String> {
    let tag = exif.get(IFD0_PATH, Ifd0Tag::Make.tag_id())?;
    tag.text(exif.source())
        .inspect_err(|e| log::warn!("Found `Make`, but couldn't read it. err: {e}"))
        .ok()
}
