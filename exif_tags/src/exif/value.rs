//! Typed accessors for a [`TagDescriptor`]'s value.
//!
//! Every accessor checks the tag's type before doing anything else, then
//! resolves the bytes and makes sure there are enough of them for the type
//! and count. Only then does it look at whether the type fits.

use winnow::{Parser as _, binary, error::EmptyError};

use exif_tags_types::exif::primitives::{Rational, SRational, ValueType};

use super::{
    error::{TagError, TagResult},
    source::ExifSource,
    tag::TagDescriptor,
    winnow_endianness,
};

impl TagDescriptor {
    /// Resolves the value and checks its length against the type and count.
    fn checked_bytes<S: ExifSource + ?Sized>(&self, source: &S) -> TagResult<Vec<u8>> {
        if !self.value_type.is_valid() {
            log::error!(
                "Asked to decode tag `{:#06x}`, but its type is `{}`.",
                self.tag_id,
                self.value_type
            );
            return Err(TagError::InvalidEmptyTag);
        }

        let bytes = self.resolve(source)?;
        let needed = self.encoded_len()? as usize;
        if bytes.len() < needed {
            log::error!(
                "Tag `{:#06x}` resolved to too few bytes. needed: `{needed}`, got: `{}`",
                self.tag_id,
                bytes.len()
            );
            return Err(TagError::NotEnoughData {
                needed,
                got: bytes.len(),
            });
        }

        Ok(bytes)
    }

    fn unsupported<T>(&self, wanted: &'static str) -> TagResult<T> {
        log::error!(
            "Tag `{:#06x}` is a `{}` - it can't be read as {wanted}.",
            self.tag_id,
            self.value_type
        );
        Err(TagError::UnsupportedConversion {
            ty: self.value_type,
            wanted,
        })
    }

    /// The raw encoded bytes of any valid type.
    pub fn bytes<S: ExifSource + ?Sized>(&self, source: &S) -> TagResult<Vec<u8>> {
        self.checked_bytes(source)
    }

    /// Reads the value as text.
    ///
    /// - `Ascii` must have a NUL within its unit count. The text ends there.
    /// - `AsciiNoNul` is exactly `unit_count` bytes of text.
    /// - `Byte` values lose any NUL padding on either end.
    ///
    /// Bytes that aren't valid UTF-8 are replaced.
    pub fn text<S: ExifSource + ?Sized>(&self, source: &S) -> TagResult<String> {
        let bytes = self.checked_bytes(source)?;
        let data: &[u8] = &bytes[..self.unit_count as usize];

        match self.value_type {
            ValueType::Ascii => {
                let Some(nul) = data.iter().position(|b| *b == 0) else {
                    log::error!("ASCII tag `{:#06x}` has no terminator!", self.tag_id);
                    return Err(TagError::MalformedText);
                };
                Ok(String::from_utf8_lossy(&data[..nul]).into_owned())
            }

            ValueType::AsciiNoNul => Ok(String::from_utf8_lossy(data).into_owned()),

            ValueType::Byte => {
                let start = data.iter().position(|b| *b != 0).unwrap_or(data.len());
                let end = data.iter().rposition(|b| *b != 0).map_or(start, |i| i + 1);
                Ok(String::from_utf8_lossy(&data[start..end]).into_owned())
            }

            _ => self.unsupported("text"),
        }
    }

    /// Reads the first value as an unsigned integer.
    ///
    /// Works for `Byte`, `Short`, and `Long`.
    pub fn integer<S: ExifSource + ?Sized>(&self, source: &S) -> TagResult<u32> {
        let bytes = self.checked_bytes(source)?;
        let endianness = winnow_endianness(source.endianness());
        let input = &mut bytes.as_slice();
        let outta_data = |_: EmptyError| TagError::NotEnoughData {
            needed: self.value_type.unit_size().unwrap_or_default() as usize,
            got: bytes.len(),
        };

        match self.value_type {
            ValueType::Byte => binary::u8.parse_next(input).map(u32::from).map_err(outta_data),
            ValueType::Short => binary::u16(endianness)
                .parse_next(input)
                .map(u32::from)
                .map_err(outta_data),
            ValueType::Long => binary::u32(endianness)
                .parse_next(input)
                .map_err(outta_data),
            _ => self.unsupported("an integer"),
        }
    }

    /// Reads the first value as an unsigned fraction.
    ///
    /// Works for `Rational` and `SRational`. The storage is identical; a
    /// signed value just shows up as its two's-complement bits. Use
    /// [`TagDescriptor::signed_rational`] to get the signs back.
    pub fn rational<S: ExifSource + ?Sized>(&self, source: &S) -> TagResult<Rational> {
        let bytes = self.checked_bytes(source)?;

        match self.value_type {
            ValueType::Rational | ValueType::SRational => {
                parse_rational(&mut bytes.as_slice(), source)
            }
            _ => self.unsupported("a rational"),
        }
    }

    /// Reads the first value as a signed fraction.
    ///
    /// Works for `Rational` and `SRational`.
    pub fn signed_rational<S: ExifSource + ?Sized>(&self, source: &S) -> TagResult<SRational> {
        let bytes = self.checked_bytes(source)?;
        let endianness = winnow_endianness(source.endianness());
        let input = &mut bytes.as_slice();
        let outta_data = |_: EmptyError| TagError::NotEnoughData {
            needed: 8,
            got: bytes.len(),
        };

        match self.value_type {
            ValueType::Rational | ValueType::SRational => Ok(SRational {
                numerator: binary::i32(endianness)
                    .parse_next(input)
                    .map_err(outta_data)?,
                denominator: binary::i32(endianness)
                    .parse_next(input)
                    .map_err(outta_data)?,
            }),
            _ => self.unsupported("a signed rational"),
        }
    }

    /// Reads every value as an unsigned fraction, in order.
    ///
    /// Only works for `Rational`.
    pub fn rationals<S: ExifSource + ?Sized>(&self, source: &S) -> TagResult<Vec<Rational>> {
        let bytes = self.checked_bytes(source)?;

        if self.value_type != ValueType::Rational {
            return self.unsupported("a list of rationals");
        }

        let input = &mut bytes.as_slice();
        (0..self.unit_count)
            .map(|_| parse_rational(input, source))
            .collect()
    }

    /// Reads every value as a `u16`, in order.
    ///
    /// Only works for `Short`.
    pub fn shorts<S: ExifSource + ?Sized>(&self, source: &S) -> TagResult<Vec<u16>> {
        let bytes = self.checked_bytes(source)?;

        if self.value_type != ValueType::Short {
            return self.unsupported("a list of shorts");
        }

        let endianness = winnow_endianness(source.endianness());
        let input = &mut bytes.as_slice();
        (0..self.unit_count)
            .map(|_| {
                binary::u16(endianness)
                    .parse_next(input)
                    .map_err(|_: EmptyError| TagError::NotEnoughData {
                        needed: self.unit_count as usize * 2,
                        got: bytes.len(),
                    })
            })
            .collect()
    }
}

/// Parses one numerator/denominator pair.
fn parse_rational<S: ExifSource + ?Sized>(input: &mut &[u8], source: &S) -> TagResult<Rational> {
    let endianness = winnow_endianness(source.endianness());
    let got = input.len();
    let outta_data = |_: EmptyError| TagError::NotEnoughData { needed: 8, got };

    Ok(Rational {
        numerator: binary::u32(endianness)
            .parse_next(input)
            .map_err(outta_data)?,
        denominator: binary::u32(endianness)
            .parse_next(input)
            .map_err(outta_data)?,
    })
}
