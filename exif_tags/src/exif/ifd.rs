use winnow::{
    Parser as _, Stateful,
    binary::{Endianness as WinnowEndianness, u16, u32},
    error::EmptyError,
    token::take,
};

use exif_tags_types::exif::{ifd::IfdGroup, primitives::ValueType};

use super::{
    error::{DirectoryError, DirectoryResult, TagError},
    mapping::MappedIfd,
    source::ExifSource,
    tag::TagDescriptor,
    winnow_endianness,
};

/// Each IFD entry is 12 bytes: tag, type, count, and the offset slot.
const ENTRY_LEN: u32 = 12;

/// An image file directory, decoded into descriptors.
///
/// Values aren't read here - only where to find them.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Directory {
    /// Where the directory starts in its source.
    pub offset: u32,

    /// Every entry, in the order they're stored.
    pub tags: Vec<TagDescriptor>,

    /// The offset of the next IFD in the chain, if any.
    pub next: Option<u32>,
}

#[derive(Debug)]
struct EntryState<'a> {
    endianness: WinnowEndianness,
    group: Option<IfdGroup>,
    ifd_path: &'a [String],
}

/// A stream of IFD entries, wrapped with what's needed to name them.
type EntryStream<'s> = Stateful<&'s [u8], EntryState<'s>>;

/// Decodes the directory found at `offset` in `source`.
///
/// `group` picks the dictionary used to name the tags. Tags it doesn't know
/// are named by their ID.
pub fn decode_dir<S: ExifSource + ?Sized>(
    source: &S,
    offset: u32,
    group: Option<IfdGroup>,
    ifd_path: &[String],
) -> DirectoryResult<Directory> {
    let endianness = winnow_endianness(source.endianness());

    // entry count (2 bytes)
    let count_bytes = read_exact(source, offset, 2, DirectoryError::NoEntryCount { offset })?;
    let entry_count: u16 = u16(endianness)
        .parse_next(&mut count_bytes.as_slice())
        .map_err(|_: EmptyError| DirectoryError::NoEntryCount { offset })?;

    if entry_count == 0 {
        log::error!("IFD at `{offset}` reported itself as having zero fields!");
        return Err(DirectoryError::ZeroEntries { offset });
    }

    // all the entries at once
    let entries_len = u32::from(entry_count) * ENTRY_LEN;
    let entries_at = offset.checked_add(2).ok_or(DirectoryError::Truncated {
        offset,
        entries: entry_count,
    })?;
    let entry_bytes = read_exact(
        source,
        entries_at,
        entries_len,
        DirectoryError::Truncated {
            offset,
            entries: entry_count,
        },
    )?;

    log::trace!("Parsing `{entry_count}` fields...");
    let stream = &mut EntryStream {
        input: entry_bytes.as_slice(),
        state: EntryState {
            endianness,
            group,
            ifd_path,
        },
    };
    let tags = (0..entry_count)
        .map(|_| parse_entry(stream))
        .collect::<Result<Vec<_>, EmptyError>>()
        .map_err(|_: EmptyError| DirectoryError::Truncated {
            offset,
            entries: entry_count,
        })?;
    log::trace!("Completed field parsing!");

    // pointer to the next IFD (4 bytes)
    let next_at = entries_at
        .checked_add(entries_len)
        .ok_or(DirectoryError::NoNextPointer { offset })?;
    let next_bytes = read_exact(source, next_at, 4, DirectoryError::NoNextPointer { offset })?;
    let raw_next: u32 = u32(endianness)
        .parse_next(&mut next_bytes.as_slice())
        .map_err(|_: EmptyError| DirectoryError::NoNextPointer { offset })?;

    let next = match raw_next {
        0 => {
            log::trace!("There won't be a next IFD.");
            None
        }
        n => {
            log::trace!("Another IFD was detected! index: `{n}`");
            Some(n)
        }
    };

    Ok(Directory { offset, tags, next })
}

/// Parses one 12-byte entry into a descriptor.
fn parse_entry(input: &mut EntryStream) -> Result<TagDescriptor, EmptyError> {
    let endianness = input.state.endianness;

    let tag_id: u16 = u16::<_, EmptyError>(endianness).parse_next(input)?;
    let raw_ty: u16 = u16::<_, EmptyError>(endianness).parse_next(input)?;
    let count: u32 = u32::<_, EmptyError>(endianness).parse_next(input)?;
    let raw_value_offset: &[u8] = take::<_, _, EmptyError>(4_usize).parse_next(input)?;
    let value_offset: u32 =
        u32::<_, EmptyError>(endianness).parse_next(&mut &raw_value_offset[..])?;

    let value_type = ValueType::from_raw(raw_ty);
    if !value_type.is_valid() {
        log::warn!("Encountered unknown field type `{raw_ty}` on tag `{tag_id:#06x}`.");
    }

    let group = input.state.group;
    let name: String = match group.and_then(|g| g.tag_name(tag_id)) {
        Some(known) => known.to_owned(),
        None => format!("{tag_id:#06x}"),
    };

    // warn if the real type isn't an expected type
    if let Some(expected) = group.and_then(|g| g.tag_types(tag_id))
        && !expected.contains(&value_type)
    {
        log::warn!(
            "Field `{name}` had a type mismatch! \
            Continuing parsing with wrong type anyway... \
            got: `{value_type}`, \
            expected: {expected:?}"
        );
    }

    log::trace!(
        "(field info...
    tag: {tag_id:#06x} ({name}),
    ty: {value_type},
    count: {count},
    value or offset: {value_offset}
)"
    );

    Ok(
        TagDescriptor::new(
            name,
            value_type,
            input.state.ifd_path.to_vec(),
            tag_id,
            count,
        )
        .with_value_offset(value_offset, raw_value_offset),
    )
}

/// Decodes an IFD and every sub-IFD `node` knows about, depth-first.
///
/// Tags land in `out` in the order they're found. The IFD's pointer to the
/// next one in its chain is returned. Sub-IFDs' own chain pointers are
/// ignored.
pub(crate) fn walk<S: ExifSource + ?Sized>(
    source: &S,
    offset: u32,
    node: &MappedIfd,
    group: Option<IfdGroup>,
    ifd_path: &[String],
    out: &mut Vec<TagDescriptor>,
) -> DirectoryResult<Option<u32>> {
    let dir = decode_dir(source, offset, group, ifd_path)?;
    let next = dir.next;

    // find sub-IFD pointers before handing the tags over
    let mut pointers = Vec::new();
    for tag in &dir.tags {
        if let Some(child) = node.child(tag.tag_id) {
            let sub_offset = sub_ifd_offset(tag, source).map_err(|err| {
                log::error!("Sub-IFD pointer `{}` was unreadable. err: {err}", tag.name);
                DirectoryError::BadSubIfdPointer {
                    tag_id: tag.tag_id,
                    err,
                }
            })?;
            pointers.push((child, sub_offset));
        }
    }
    out.extend(dir.tags);

    for (child, sub_offset) in pointers {
        log::trace!("Following sub-IFD `{}` to `{sub_offset}`.", child.name());
        let mut child_path = ifd_path.to_vec();
        child_path.push(child.name().to_owned());

        walk(
            source,
            sub_offset,
            child,
            IfdGroup::from_name(child.name()),
            &child_path,
            out,
        )?;
    }

    Ok(next)
}

/// Reads a sub-IFD pointer.
///
/// Pointers are usually a `Long`, but some writers store them as four
/// `Undefined` bytes.
fn sub_ifd_offset<S: ExifSource + ?Sized>(tag: &TagDescriptor, source: &S) -> Result<u32, TagError> {
    match tag.value_type {
        ValueType::Undefined if tag.unit_count == 4 => {
            let bytes = tag.bytes(source)?;
            u32(winnow_endianness(source.endianness()))
                .parse_next(&mut bytes.as_slice())
                .map_err(|_: EmptyError| TagError::NotEnoughData {
                    needed: 4,
                    got: bytes.len(),
                })
        }
        _ => tag.integer(source),
    }
}

/// Reads exactly `len` bytes, or fails with `short` if the source runs out.
fn read_exact<S: ExifSource + ?Sized>(
    source: &S,
    offset: u32,
    len: u32,
    short: DirectoryError,
) -> DirectoryResult<Vec<u8>> {
    let mut buf = vec![0_u8; len as usize];
    match source.read_at(offset, &mut buf) {
        Ok(got) if got == buf.len() => Ok(buf),
        Ok(got) => {
            log::error!("Ran out of IFD data at `{offset}`. wanted: `{len}`, got: `{got}`");
            Err(short)
        }
        Err(e) => {
            log::error!("Failed to read IFD data at `{offset}`. err: {e}");
            Err(DirectoryError::ReadFailed {
                offset,
                kind: e.kind(),
            })
        }
    }
}
