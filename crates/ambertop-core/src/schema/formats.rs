/// Kind of value a fixed-width column holds after parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Int,
    Float,
    Str,
}

/// The eleven Fortran-style record formats that appear in prmtop files.
///
/// Every block in the file is serialized with exactly one of these. The
/// descriptor fixes the column width, the number of values per line and the
/// numeric precision; none of this is ever inferred from the data itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKind {
    /// `10I8` - general integer arrays.
    IntArray,
    /// `1I8` - single-integer records (e.g. IPOL).
    OneInteger,
    /// `2I8` - two-integer records (CMAP_COUNT).
    TwoIntegers,
    /// `3I8` - three-integer records (SOLVENT_POINTERS).
    ThreeIntegers,
    /// `6I8` - six-integer records (CMAP_INDEX).
    SixIntegers,
    /// `20I4` - narrow integer arrays (CMAP_RESOLUTION).
    SmallIntArray,
    /// `1A80` - one whole-line string (TITLE body, RADIUS_SET).
    Sentence,
    /// `20A4` - fixed four-character string arrays.
    SmallStringArray,
    /// `5E16.8` - general float arrays in scientific notation.
    FloatArray,
    /// `1E16.8` - single-float records (LENNARD_JONES_DVALUE).
    OneFloat,
    /// `8F9.5` - CMAP surface values.
    CmapFloatArray,
}

impl FormatKind {
    /// The canonical (uppercase) Fortran specifier for this format.
    pub fn spec(self) -> &'static str {
        match self {
            FormatKind::IntArray => "10I8",
            FormatKind::OneInteger => "1I8",
            FormatKind::TwoIntegers => "2I8",
            FormatKind::ThreeIntegers => "3I8",
            FormatKind::SixIntegers => "6I8",
            FormatKind::SmallIntArray => "20I4",
            FormatKind::Sentence => "1A80",
            FormatKind::SmallStringArray => "20A4",
            FormatKind::FloatArray => "5E16.8",
            FormatKind::OneFloat => "1E16.8",
            FormatKind::CmapFloatArray => "8F9.5",
        }
    }

    /// The specifier as the reference writer emits it. LEaP lowercases the
    /// string formats and nothing else.
    pub fn written_spec(self) -> &'static str {
        match self {
            FormatKind::Sentence => "1a80",
            FormatKind::SmallStringArray => "20a4",
            other => other.spec(),
        }
    }

    /// Resolves a specifier found on a `%FORMAT(...)` line. Matching is
    /// case-insensitive since files carry both `20A4` and `20a4`.
    pub fn from_spec(spec: &str) -> Option<Self> {
        match spec.to_ascii_uppercase().as_str() {
            "10I8" => Some(FormatKind::IntArray),
            "1I8" => Some(FormatKind::OneInteger),
            "2I8" => Some(FormatKind::TwoIntegers),
            "3I8" => Some(FormatKind::ThreeIntegers),
            "6I8" => Some(FormatKind::SixIntegers),
            "20I4" => Some(FormatKind::SmallIntArray),
            "1A80" => Some(FormatKind::Sentence),
            "20A4" => Some(FormatKind::SmallStringArray),
            "5E16.8" => Some(FormatKind::FloatArray),
            "1E16.8" => Some(FormatKind::OneFloat),
            "8F9.5" => Some(FormatKind::CmapFloatArray),
            _ => None,
        }
    }

    pub fn value_kind(self) -> ValueKind {
        match self {
            FormatKind::IntArray
            | FormatKind::OneInteger
            | FormatKind::TwoIntegers
            | FormatKind::ThreeIntegers
            | FormatKind::SixIntegers
            | FormatKind::SmallIntArray => ValueKind::Int,
            FormatKind::FloatArray | FormatKind::OneFloat | FormatKind::CmapFloatArray => {
                ValueKind::Float
            }
            FormatKind::Sentence | FormatKind::SmallStringArray => ValueKind::Str,
        }
    }

    /// Width-8 integer formats, which all share one reader/writer path.
    pub fn is_wide_int(self) -> bool {
        matches!(
            self,
            FormatKind::IntArray
                | FormatKind::OneInteger
                | FormatKind::TwoIntegers
                | FormatKind::ThreeIntegers
                | FormatKind::SixIntegers
        )
    }

    /// Width-16 scientific-notation float formats.
    pub fn is_wide_float(self) -> bool {
        matches!(self, FormatKind::FloatArray | FormatKind::OneFloat)
    }

    /// Column width used when slicing data lines.
    pub fn column_width(self) -> usize {
        match self {
            f if f.is_wide_int() => 8,
            f if f.is_wide_float() => 16,
            FormatKind::SmallIntArray | FormatKind::SmallStringArray => 4,
            FormatKind::CmapFloatArray => 9,
            // Sentence: the whole 80-column line is one value.
            _ => 80,
        }
    }

    /// Values emitted per output line. The reference writer wraps every
    /// wide-integer format at 10 per line regardless of the declared count.
    pub fn values_per_line(self) -> usize {
        match self {
            f if f.is_wide_int() => 10,
            f if f.is_wide_float() => 5,
            FormatKind::SmallIntArray | FormatKind::SmallStringArray => 20,
            FormatKind::CmapFloatArray => 8,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [FormatKind; 11] = [
        FormatKind::IntArray,
        FormatKind::OneInteger,
        FormatKind::TwoIntegers,
        FormatKind::ThreeIntegers,
        FormatKind::SixIntegers,
        FormatKind::SmallIntArray,
        FormatKind::Sentence,
        FormatKind::SmallStringArray,
        FormatKind::FloatArray,
        FormatKind::OneFloat,
        FormatKind::CmapFloatArray,
    ];

    #[test]
    fn every_spec_resolves_back_to_its_format() {
        for format in ALL {
            assert_eq!(FormatKind::from_spec(format.spec()), Some(format));
            assert_eq!(FormatKind::from_spec(format.written_spec()), Some(format));
        }
    }

    #[test]
    fn unknown_spec_is_rejected() {
        assert_eq!(FormatKind::from_spec("7F10.3"), None);
        assert_eq!(FormatKind::from_spec(""), None);
    }

    #[test]
    fn only_string_formats_are_lowercased_on_write() {
        for format in ALL {
            if matches!(format, FormatKind::Sentence | FormatKind::SmallStringArray) {
                assert_ne!(format.spec(), format.written_spec());
            } else {
                assert_eq!(format.spec(), format.written_spec());
            }
        }
    }

    #[test]
    fn line_layout_matches_column_arithmetic() {
        assert_eq!(FormatKind::IntArray.column_width(), 8);
        assert_eq!(FormatKind::IntArray.values_per_line(), 10);
        assert_eq!(FormatKind::FloatArray.column_width(), 16);
        assert_eq!(FormatKind::FloatArray.values_per_line(), 5);
        assert_eq!(FormatKind::CmapFloatArray.column_width(), 9);
        assert_eq!(FormatKind::CmapFloatArray.values_per_line(), 8);
        // The singleton integer records still wrap at 10 per line.
        assert_eq!(FormatKind::SixIntegers.values_per_line(), 10);
    }

    #[test]
    fn width_groups_partition_the_numeric_formats() {
        for format in ALL {
            assert!(!(format.is_wide_int() && format.is_wide_float()));
            if format.is_wide_int() {
                assert_eq!(format.value_kind(), ValueKind::Int);
                assert_eq!(format.column_width(), 8);
                assert_eq!(format.values_per_line(), 10);
            }
            if format.is_wide_float() {
                assert_eq!(format.value_kind(), ValueKind::Float);
                assert_eq!(format.column_width(), 16);
                assert_eq!(format.values_per_line(), 5);
            }
        }
        assert!(!FormatKind::SmallIntArray.is_wide_int());
        assert!(!FormatKind::CmapFloatArray.is_wide_float());
    }
}
