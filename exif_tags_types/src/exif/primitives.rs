/// The type of the values stored in one tag.
///
/// Each one has a fixed per-unit size. A tag's encoded length is always that
/// size multiplied by the tag's unit count.
#[derive(Clone, Copy, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub enum ValueType {
    /// An 8-bit unsigned integer.
    Byte,

    /// 7-bit ASCII text, terminated by a single NUL.
    Ascii,

    /// A `u16`.
    Short,

    /// A `u32`.
    Long,

    /// Two `u32`s: numerator, then denominator.
    Rational,

    /// Opaque bytes. Maker notes are stored like this.
    Undefined,

    /// Two `i32`s: numerator, then denominator.
    SRational,

    /// ASCII text with no NUL terminator.
    ///
    /// This never appears on disk. Dictionaries assign it to fields whose
    /// writers are known to skip the terminator.
    AsciiNoNul,

    /// A type code we don't recognize, or `0` for "unset".
    ///
    /// These have no size and can't be decoded.
    Unknown(u16),
}

impl ValueType {
    /// Maps an on-disk type code to a `ValueType`.
    ///
    /// ```
    /// use exif_tags_types::exif::primitives::ValueType;
    ///
    /// assert_eq!(ValueType::from_raw(3), ValueType::Short);
    /// assert_eq!(ValueType::from_raw(0), ValueType::Unknown(0));
    /// ```
    pub const fn from_raw(raw: u16) -> Self {
        match raw {
            1 => Self::Byte,
            2 => Self::Ascii,
            3 => Self::Short,
            4 => Self::Long,
            5 => Self::Rational,
            7 => Self::Undefined,
            10 => Self::SRational,
            other => Self::Unknown(other),
        }
    }

    /// The on-disk type code, if this type has one.
    pub const fn raw(&self) -> Option<u16> {
        match self {
            Self::Byte => Some(1),
            Self::Ascii => Some(2),
            Self::Short => Some(3),
            Self::Long => Some(4),
            Self::Rational => Some(5),
            Self::Undefined => Some(7),
            Self::SRational => Some(10),
            Self::AsciiNoNul | Self::Unknown(_) => None,
        }
    }

    /// Grabs the size of one unit of this type, in bytes.
    ///
    /// ```
    /// use exif_tags_types::exif::primitives::ValueType;
    ///
    /// assert_eq!(ValueType::Rational.unit_size(), Some(8_u8));
    /// assert_eq!(ValueType::Unknown(0).unit_size(), None);
    /// ```
    pub const fn unit_size(&self) -> Option<u8> {
        match self {
            Self::Byte | Self::Ascii | Self::AsciiNoNul | Self::Undefined => Some(1),
            Self::Short => Some(2),
            Self::Long => Some(4),
            Self::Rational | Self::SRational => Some(8),
            Self::Unknown(_) => None,
        }
    }

    /// Whether values of this type can be decoded at all.
    pub const fn is_valid(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl core::fmt::Display for ValueType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Byte => f.write_str("BYTE"),
            Self::Ascii => f.write_str("ASCII"),
            Self::Short => f.write_str("SHORT"),
            Self::Long => f.write_str("LONG"),
            Self::Rational => f.write_str("RATIONAL"),
            Self::Undefined => f.write_str("UNDEFINED"),
            Self::SRational => f.write_str("SRATIONAL"),
            Self::AsciiNoNul => f.write_str("ASCII (no NUL)"),
            Self::Unknown(raw) => write!(f, "unknown type `{raw}`"),
        }
    }
}

/// A fraction that can't be negative.
///
/// Both the numerator (top number) and denominator (bottom number) are always
/// positive numbers.
#[derive(Clone, Copy, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub struct Rational {
    pub numerator: u32,
    pub denominator: u32,
}

/// A signed fraction.
///
/// Both the numerator (top number) and denominator (bottom number) can be
/// negative.
#[derive(Clone, Copy, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub struct SRational {
    pub numerator: i32,
    pub denominator: i32,
}

#[cfg(test)]
mod tests {
    use super::ValueType;

    #[test]
    fn unit_sizes_match_the_tiff_table() {
        let expected = [
            (ValueType::Byte, 1),
            (ValueType::Ascii, 1),
            (ValueType::AsciiNoNul, 1),
            (ValueType::Short, 2),
            (ValueType::Long, 4),
            (ValueType::Rational, 8),
            (ValueType::SRational, 8),
        ];

        for (ty, size) in expected {
            assert_eq!(ty.unit_size(), Some(size), "size of {ty}");
            assert!(ty.is_valid(), "{ty} should be valid");
        }
    }

    #[test]
    fn unknown_types_are_invalid() {
        for raw in [0_u16, 6, 8, 11, 0xf0, u16::MAX] {
            let ty = ValueType::from_raw(raw);
            assert_eq!(ty, ValueType::Unknown(raw));
            assert!(!ty.is_valid());
            assert_eq!(ty.unit_size(), None);
        }
    }

    #[test]
    fn raw_codes_survive_a_trip() {
        for raw in [1_u16, 2, 3, 4, 5, 7, 10] {
            assert_eq!(ValueType::from_raw(raw).raw(), Some(raw));
        }
        assert_eq!(ValueType::AsciiNoNul.raw(), None);
    }
}
