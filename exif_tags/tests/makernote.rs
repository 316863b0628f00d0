use exif_tags::{
    exif::{Endianness, Exif, ExifTags as _, Rational},
    makernote::MakerNoteRegistry,
};
use exif_tags_types::{
    exif::tags::{ExifIfdTag, Ifd0Tag},
    makernote::{CanonTag, NikonPreviewTag, NikonTag},
};

fn logger() {
    _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::max())
        .format_file(true)
        .format_line_number(true)
        .try_init();
}

/// Appends one IFD. Entries are (tag, type, count, offset slot).
fn push_ifd(v: &mut Vec<u8>, entries: &[(u16, u16, u32, [u8; 4])]) {
    v.extend_from_slice((entries.len() as u16).to_be_bytes().as_slice());
    for (tag_id, ty, count, slot) in entries {
        v.extend_from_slice(tag_id.to_be_bytes().as_slice());
        v.extend_from_slice(ty.to_be_bytes().as_slice());
        v.extend_from_slice(count.to_be_bytes().as_slice());
        v.extend_from_slice(slot.as_slice());
    }
    v.extend_from_slice(0_u32.to_be_bytes().as_slice()); // no next IFD
}

/// A big-endian blob: IFD0 holds `Make`, the Exif IFD holds an exposure time
/// and the maker note.
fn blob(make: &str, maker_note: impl FnOnce(u32) -> Vec<u8>) -> Vec<u8> {
    let mut make = make.as_bytes().to_vec();
    make.push(0);

    let make_at: u32 = 8 + 2 + 2 * 12 + 4;
    let exif_at = make_at + make.len() as u32;
    let exposure_at = exif_at + 2 + 2 * 12 + 4;
    let note_at = exposure_at + 8;
    let note = maker_note(note_at);

    let mut v = Vec::new();
    v.extend_from_slice(b"MM");
    v.extend_from_slice(42_u16.to_be_bytes().as_slice());
    v.extend_from_slice(8_u32.to_be_bytes().as_slice());

    push_ifd(
        &mut v,
        &[
            (Ifd0Tag::Make.tag_id(), 2, make.len() as u32, make_at.to_be_bytes()),
            (Ifd0Tag::ExifIfdPointer.tag_id(), 4, 1, exif_at.to_be_bytes()),
        ],
    );
    v.extend_from_slice(&make);

    push_ifd(
        &mut v,
        &[
            (ExifIfdTag::ExposureTime.tag_id(), 5, 1, exposure_at.to_be_bytes()),
            (ExifIfdTag::MakerNote.tag_id(), 7, note.len() as u32, note_at.to_be_bytes()),
        ],
    );
    v.extend_from_slice(1_u32.to_be_bytes().as_slice());
    v.extend_from_slice(250_u32.to_be_bytes().as_slice());

    assert_eq!(v.len() as u32, note_at);
    v.extend(note);
    v
}

/// A Nikon type 3 note whose preview image starts at 200, relative to its
/// embedded header.
fn nikon_note(_note_at: u32) -> Vec<u8> {
    let mut v = b"Nikon\0\x02\x10\x00\x00".to_vec();
    v.extend_from_slice(b"II");
    v.extend_from_slice(42_u16.to_le_bytes().as_slice());
    v.extend_from_slice(8_u32.to_le_bytes().as_slice());

    let entry = |v: &mut Vec<u8>, tag_id: u16, ty: u16, count: u32, value: u32| {
        v.extend_from_slice(tag_id.to_le_bytes().as_slice());
        v.extend_from_slice(ty.to_le_bytes().as_slice());
        v.extend_from_slice(count.to_le_bytes().as_slice());
        v.extend_from_slice(value.to_le_bytes().as_slice());
    };

    // IFD at 8 points to the preview IFD right after it
    v.extend_from_slice(1_u16.to_le_bytes().as_slice());
    entry(&mut v, NikonTag::PreviewIfd.tag_id(), 4, 1, 8 + 2 + 12 + 4);
    v.extend_from_slice(0_u32.to_le_bytes().as_slice());

    v.extend_from_slice(2_u16.to_le_bytes().as_slice());
    entry(&mut v, NikonPreviewTag::PreviewImageStart.tag_id(), 4, 1, 200);
    entry(&mut v, NikonPreviewTag::PreviewImageLength.tag_id(), 4, 1, 1024);
    v.extend_from_slice(0_u32.to_le_bytes().as_slice());
    v
}

/// A Canon note. Its out-of-line value uses a container-relative offset.
fn canon_note(note_at: u32) -> Vec<u8> {
    let model_at = note_at + 2 + 12 + 4;
    let mut v = Vec::new();
    push_ifd(
        &mut v,
        &[(CanonTag::LensModel.tag_id(), 2, 9, model_at.to_be_bytes())],
    );
    v.extend_from_slice(b"EF50mm f\0");
    v
}

#[test]
fn nikon_preview_is_rebased_onto_the_container() {
    logger();

    let bytes = blob("NIKON CORPORATION", nikon_note);
    let exif = Exif::new(bytes.as_slice()).expect("blob should parse");
    assert_eq!(exif.endianness(), Endianness::Big);

    let make = exif.get(&["IFD0"], Ifd0Tag::Make.tag_id()).unwrap();
    assert_eq!(make.text(exif.source()), Ok("NIKON CORPORATION".to_owned()));

    let exposure = exif.get_by_name("ExposureTime").unwrap();
    assert_eq!(
        exposure.rational(exif.source()),
        Ok(Rational {
            numerator: 1,
            denominator: 250
        })
    );

    let note = exif.get_by_name("MakerNote").unwrap();
    let note_at = note.value_offset;

    let results = MakerNoteRegistry::all().dispatch(&exif);
    assert_eq!(results.len(), 1, "only nikon applies");

    let (vendor, nikon) = &results[0];
    assert_eq!(*vendor, "Nikon");
    let nikon = nikon.as_ref().expect("nikon note should decode");
    assert_eq!(nikon.endianness(), Endianness::Little);

    let start = nikon.get_by_name("NikonPreviewImageStart").unwrap();
    assert_eq!(start.integer(nikon.source()), Ok(200 + note_at + 10));
    assert_eq!(
        start.ifd_path,
        vec!["MakerNoteNikon".to_owned(), "NikonPreview".to_owned()]
    );
}

#[test]
fn canon_values_resolve_against_the_container() {
    logger();

    let bytes = blob("Canon", canon_note);
    let exif = Exif::new(bytes).expect("blob should parse");

    let results = MakerNoteRegistry::all().dispatch(&exif);
    assert_eq!(results.len(), 1, "only canon applies");

    let (vendor, canon) = &results[0];
    assert_eq!(*vendor, "Canon");
    let canon = canon.as_ref().expect("canon note should decode");

    let lens = canon.get(&["MakerNoteCanon"], CanonTag::LensModel.tag_id()).unwrap();
    assert_eq!(lens.name, "CanonLensModel");
    assert_eq!(lens.text(canon.source()), Ok("EF50mm f".to_owned()));
}

#[test]
fn broken_notes_dont_stop_the_walk() {
    logger();

    // the signature is right, but the header isn't
    let bytes = blob("NIKON CORPORATION", |_| b"Nikon\0\x02\x10\x00\x00MM\x00\x2b".to_vec());
    let exif = Exif::new(bytes).expect("the container itself is fine");
    assert_eq!(exif.tags().len(), 4);

    let results = MakerNoteRegistry::all().dispatch(&exif);
    assert_eq!(results.len(), 1);
    assert!(results[0].1.is_err());
}
