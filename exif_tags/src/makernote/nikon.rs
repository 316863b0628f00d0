//! Nikon (type 3) maker notes.
//!
//! These start with `Nikon\0` and a version, then hold a complete TIFF
//! structure with its own byte order. Offsets inside it are relative to its
//! header, ten bytes into the note.

use std::sync::Arc;

use exif_tags_types::{
    exif::ifd::{IfdDefinition, IfdGroup},
    makernote::{NIKON_REBASED_TAGS, NIKON_SIGNATURE, NIKON_SUB_IFDS, NIKON_TIFF_START},
};

use super::{MakerNote, MakerNoteError, MakerNoteParser, MakerNoteResult, maker_note_tag};
use crate::exif::{
    ByteSource, ExifTags, IfdMapping, TagDescriptor, error::HierarchyResult, ifd, read_header,
};

/// Parses maker notes carrying the Nikon signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Nikon {
    sub_ifds: IfdMapping,
    rebased: Vec<(IfdGroup, u16)>,
}

impl Default for Nikon {
    fn default() -> Self {
        Self {
            sub_ifds: IfdMapping::from_definitions(NIKON_SUB_IFDS)
                .unwrap_or_else(|e| unreachable!("Nikon's sub-IFD table is consistent. but err: {e}")),
            rebased: NIKON_REBASED_TAGS.to_vec(),
        }
    }
}

impl Nikon {
    /// Uses other tables for the sub-IFDs to follow and the tags to rebase.
    ///
    /// Rebased tags are listed by the group of the IFD they're in.
    pub fn with_tables(
        sub_ifds: &[IfdDefinition],
        rebased: &[(IfdGroup, u16)],
    ) -> HierarchyResult<Self> {
        Ok(Self {
            sub_ifds: IfdMapping::from_definitions(sub_ifds)?,
            rebased: rebased.to_vec(),
        })
    }

    fn is_rebased(&self, tag: &TagDescriptor) -> bool {
        let Some(ifd_name) = tag.ifd_path.last() else {
            return false;
        };

        self.rebased
            .iter()
            .any(|(group, tag_id)| *tag_id == tag.tag_id && group.name() == ifd_name)
    }
}

impl MakerNoteParser for Nikon {
    fn vendor(&self) -> &'static str {
        "Nikon"
    }

    fn parse(&self, exif: &dyn ExifTags) -> MakerNoteResult<Option<MakerNote>> {
        let Some(note) = maker_note_tag(exif) else {
            log::trace!("No maker note. Not Nikon.");
            return Ok(None);
        };

        // the signature is in the payload, so it can't be recognized unread
        let payload = match note.bytes(exif.source()) {
            Ok(payload) => payload,
            Err(e) => {
                log::trace!("Couldn't read maker note to check for Nikon. err: {e}");
                return Ok(None);
            }
        };
        if payload.get(..NIKON_SIGNATURE.len()) != Some(NIKON_SIGNATURE.as_slice()) {
            log::trace!("Maker note has no Nikon signature.");
            return Ok(None);
        }

        let tiff = payload.get(NIKON_TIFF_START as usize..).ok_or_else(|| {
            log::error!("Nikon maker note ended before its TIFF header.");
            MakerNoteError::PayloadTooShort { len: payload.len() }
        })?;
        let header = read_header(tiff)?;
        log::trace!("Nikon maker note header: {header:?}");

        // offsets in here are zero-based from the TIFF header
        let source = ByteSource::new(Arc::<[u8]>::from(tiff), header.endianness);

        let mut tags = Vec::new();
        let group = IfdGroup::NikonMakerNote;
        ifd::walk(
            &source,
            header.first_ifd_offset,
            self.sub_ifds.root(),
            Some(group),
            &[group.name().to_owned()],
            &mut tags,
        )?;

        // some tags point into the container, but are stored relative to the
        // embedded header
        let base = note.value_offset.checked_add(NIKON_TIFF_START);
        for tag in tags.iter_mut().filter(|t| self.is_rebased(t)) {
            let raw = tag.integer(&source)?;
            let rebased = base.and_then(|b| raw.checked_add(b)).ok_or_else(|| {
                log::error!("Rebasing `{}` overflowed! raw: `{raw}`", tag.name);
                MakerNoteError::RebaseOverflow {
                    tag_id: tag.tag_id,
                    raw,
                    base: note.value_offset.wrapping_add(NIKON_TIFF_START),
                }
            })?;

            log::trace!("Rebased `{}` from `{raw}` to `{rebased}`.", tag.name);
            tag.set_inline_long(rebased, header.endianness);
        }

        Ok(Some(MakerNote {
            vendor: self.vendor(),
            source,
            tags,
        }))
    }
}

#[cfg(test)]
mod tests {
    use exif_tags_types::{
        exif::{Endianness, ifd::IfdGroup, primitives::ValueType, tags::ExifIfdTag},
        makernote::{NikonPreviewTag, NikonTag},
    };

    use super::Nikon;
    use crate::{
        exif::{
            ExifTags as _, TagDescriptor,
            error::{DirectoryError, ExifFatalError, TagError},
        },
        makernote::{MakerNoteError, MakerNoteParser as _, MakerNoteRegistry, tests::FakeExif},
        util::{logger, tiff},
    };

    /// A type 3 note, with a preview IFD whose image starts at `preview_start`.
    fn note(e: Endianness, preview_start: u32) -> Vec<u8> {
        let mut v = b"Nikon\0\x02\x10\x00\x00".to_vec();

        // offsets below are relative to the embedded header
        let preview_at: u32 = 8 + 2 + 2 * 12 + 4;
        v.extend(tiff::header(e, 8));
        v.extend(tiff::ifd(
            e,
            &[
                (NikonTag::Iso.tag_id(), 3, 2, [0, 0, 0, 0]),
                (NikonTag::PreviewIfd.tag_id(), 4, 1, e.u32_bytes(preview_at)),
            ],
            0,
        ));
        v.extend(tiff::ifd(
            e,
            &[
                (NikonPreviewTag::Compression.tag_id(), 3, 1, tiff::short(e, 6)),
                (
                    NikonPreviewTag::PreviewImageStart.tag_id(),
                    4,
                    1,
                    e.u32_bytes(preview_start),
                ),
                (
                    NikonPreviewTag::PreviewImageLength.tag_id(),
                    4,
                    1,
                    e.u32_bytes(4096),
                ),
            ],
            0,
        ));
        v
    }

    #[test]
    fn preview_start_is_rebased() {
        logger();

        // the container and note can disagree on byte order
        for (outer, inner) in [
            (Endianness::Big, Endianness::Big),
            (Endianness::Little, Endianness::Big),
            (Endianness::Big, Endianness::Little),
        ] {
            let exif = FakeExif::new(1000, outer).with_maker_note(&note(inner, 200), 1000);

            let parsed = Nikon::default().parse(&exif).unwrap().expect("applicable");
            assert_eq!(parsed.vendor(), "Nikon");
            assert_eq!(parsed.endianness(), inner);

            let start = parsed
                .get(
                    &["MakerNoteNikon", "NikonPreview"],
                    NikonPreviewTag::PreviewImageStart.tag_id(),
                )
                .unwrap();
            assert_eq!(start.value_type, ValueType::Long);
            assert_eq!(start.integer(parsed.source()), Ok(1210));

            // the rest are left alone
            let len = parsed.get_by_name("NikonPreviewImageLength").unwrap();
            assert_eq!(len.integer(parsed.source()), Ok(4096));
            let compression = parsed.get_by_name("NikonPreviewCompression").unwrap();
            assert_eq!(compression.integer(parsed.source()), Ok(6));
        }
    }

    #[test]
    fn tags_are_named_and_ordered() {
        logger();

        let exif = FakeExif::new(64, Endianness::Little)
            .with_maker_note(&note(Endianness::Little, 0), 64);
        let parsed = Nikon::default().parse(&exif).unwrap().unwrap();

        let names: Vec<&str> = parsed.tags().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "NikonISO",
                "NikonPreviewIFD",
                "NikonPreviewCompression",
                "NikonPreviewImageStart",
                "NikonPreviewImageLength",
            ]
        );
        assert_eq!(
            parsed.tags()[0].ifd_path,
            vec!["MakerNoteNikon".to_owned()]
        );
    }

    #[test]
    fn other_signatures_dont_apply() {
        logger();

        let nikon = Nikon::default();

        let mut wrong = note(Endianness::Big, 200);
        wrong[5] = b'!';
        let exif = FakeExif::new(16, Endianness::Big).with_maker_note(&wrong, 16);
        assert_eq!(nikon.parse(&exif), Ok(None));

        // too short to hold the signature
        let exif = FakeExif::new(16, Endianness::Big).with_maker_note(b"Nikon", 16);
        assert_eq!(nikon.parse(&exif), Ok(None));

        // no note at all
        let exif = FakeExif::new(16, Endianness::Big);
        assert_eq!(nikon.parse(&exif), Ok(None));
    }

    #[test]
    fn unreadable_notes_dont_apply() {
        logger();

        // the note points far past the end of the container
        let mut exif = FakeExif::new(64, Endianness::Big).with_make("Canon", 0);
        exif.tags.push(
            TagDescriptor::new(
                "MakerNote",
                ValueType::Undefined,
                vec!["IFD0".into(), "Exif".into()],
                ExifIfdTag::MakerNote.tag_id(),
                100,
            )
            .with_value_offset(5000, &Endianness::Big.u32_bytes(5000)),
        );
        assert_eq!(Nikon::default().parse(&exif), Ok(None));

        // only canon claims it
        let results = MakerNoteRegistry::all().dispatch(&exif);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].0, "Canon");
        assert_eq!(
            results[0].1,
            Err(MakerNoteError::Tag(TagError::ShortRead {
                offset: 5000,
                requested: 100,
                got: 0
            }))
        );
    }

    #[test]
    fn broken_notes_are_reported() {
        logger();

        let nikon = Nikon::default();

        // the signature's there, but not the header
        let exif = FakeExif::new(16, Endianness::Big).with_maker_note(b"Nikon\0\x02\x10", 16);
        assert_eq!(
            nikon.parse(&exif),
            Err(MakerNoteError::PayloadTooShort { len: 8 })
        );

        let exif =
            FakeExif::new(16, Endianness::Big).with_maker_note(b"Nikon\0\x02\x10\0\0XX\0\x2a", 16);
        assert_eq!(
            nikon.parse(&exif),
            Err(MakerNoteError::Header(ExifFatalError::WeirdByteOrderMarker {
                found: *b"XX"
            }))
        );

        // the preview IFD points past the end
        let mut truncated = note(Endianness::Big, 200);
        truncated.truncate(truncated.len() - 20);
        let exif = FakeExif::new(16, Endianness::Big).with_maker_note(&truncated, 16);
        assert_eq!(
            nikon.parse(&exif),
            Err(MakerNoteError::Directory(DirectoryError::Truncated {
                offset: 38,
                entries: 3
            }))
        );
    }

    #[test]
    fn rebasing_can_overflow() {
        logger();

        let exif = FakeExif::new(16, Endianness::Big)
            .with_maker_note(&note(Endianness::Big, u32::MAX - 20), 16);
        assert_eq!(
            Nikon::default().parse(&exif),
            Err(MakerNoteError::RebaseOverflow {
                tag_id: NikonPreviewTag::PreviewImageStart.tag_id(),
                raw: u32::MAX - 20,
                base: 26
            })
        );
    }

    #[test]
    fn tables_can_be_swapped() {
        logger();

        // don't follow anything, don't rebase anything
        let nikon = Nikon::with_tables(&[], &[]).unwrap();
        let exif = FakeExif::new(16, Endianness::Big).with_maker_note(&note(Endianness::Big, 200), 16);
        let parsed = nikon.parse(&exif).unwrap().unwrap();
        assert_eq!(parsed.tags().len(), 2);

        // rebasing a tag in the top-level IFD
        let nikon = Nikon::with_tables(
            &[],
            &[(IfdGroup::NikonMakerNote, NikonTag::PreviewIfd.tag_id())],
        )
        .unwrap();
        let parsed = nikon.parse(&exif).unwrap().unwrap();
        let pointer = parsed.get_by_name("NikonPreviewIFD").unwrap();
        assert_eq!(pointer.integer(parsed.source()), Ok(38 + 16 + 10));
    }
}
