//! Canon maker notes.
//!
//! Canon stores a bare IFD with no header. Its offsets are relative to the
//! container's TIFF header, not to the note, so the note is read through a
//! view that places its first byte at the note's own offset.

use std::sync::Arc;

use exif_tags_types::{
    exif::ifd::{IfdDefinition, IfdGroup},
    makernote::{CANON_MAKE, CANON_SUB_IFDS},
};

use super::{MakerNote, MakerNoteParser, MakerNoteResult, make, maker_note_tag};
use crate::exif::{ByteSource, ExifTags, IfdMapping, error::HierarchyResult, ifd};

/// Parses maker notes from cameras whose `Make` is `Canon`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canon {
    sub_ifds: IfdMapping,
}

impl Default for Canon {
    fn default() -> Self {
        Self {
            sub_ifds: IfdMapping::from_definitions(CANON_SUB_IFDS)
                .unwrap_or_else(|e| unreachable!("Canon's sub-IFD table is consistent. but err: {e}")),
        }
    }
}

impl Canon {
    /// Follows the given sub-IFDs inside the note, instead of the default
    /// ones.
    pub fn with_sub_ifds(definitions: &[IfdDefinition]) -> HierarchyResult<Self> {
        Ok(Self {
            sub_ifds: IfdMapping::from_definitions(definitions)?,
        })
    }
}

impl MakerNoteParser for Canon {
    fn vendor(&self) -> &'static str {
        "Canon"
    }

    fn parse(&self, exif: &dyn ExifTags) -> MakerNoteResult<Option<MakerNote>> {
        let Some(note) = maker_note_tag(exif) else {
            log::trace!("No maker note. Not Canon.");
            return Ok(None);
        };

        match make(exif) {
            Some(found) if found == CANON_MAKE => (),
            other => {
                log::trace!("Make was `{other:?}`. Not Canon.");
                return Ok(None);
            }
        }

        let payload = note.bytes(exif.source())?;
        log::trace!(
            "Decoding `{}` byte Canon maker note at `{}`.",
            payload.len(),
            note.value_offset
        );

        let source = ByteSource::with_base(
            Arc::<[u8]>::from(payload),
            note.value_offset,
            exif.endianness(),
        );

        let mut tags = Vec::new();
        let group = IfdGroup::CanonMakerNote;
        ifd::walk(
            &source,
            note.value_offset,
            self.sub_ifds.root(),
            Some(group),
            &[group.name().to_owned()],
            &mut tags,
        )?;

        Ok(Some(MakerNote {
            vendor: self.vendor(),
            source,
            tags,
        }))
    }
}
