//! Fixed-width field parsing and formatting.
//!
//! Data lines are sliced into fixed columns per the block's format
//! descriptor, never split on whitespace, so negative numbers butted
//! against their neighbor and significant spaces inside labels survive.

use thiserror::Error;

use crate::schema::{FormatKind, ValueKind};

#[derive(Debug, Error, PartialEq)]
pub enum ParseErrorKind {
    #[error("column {column} holds {token:?}, which is not an integer")]
    InvalidInteger { column: usize, token: String },

    #[error("column {column} holds {token:?}, which is not a number")]
    InvalidFloat { column: usize, token: String },
}

/// A single decoded value, typed by the owning block's format.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    Str(String),
}

fn pad_to_multiple(line: &str, width: usize) -> String {
    let remainder = line.len() % width;
    if remainder == 0 {
        line.to_string()
    } else {
        format!("{line}{}", " ".repeat(width - remainder))
    }
}

fn columns(line: &str, width: usize) -> impl Iterator<Item = &str> {
    line.as_bytes()
        .chunks(width)
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
}

/// Decodes one data line (newline already stripped) under the given format.
///
/// Trailing whitespace is dropped first, so a fully blank line yields no
/// values; fixed-width label columns are re-padded before slicing so a
/// trailing label keeps its width.
pub fn parse_data_line(line: &str, format: FormatKind) -> Result<Vec<FieldValue>, ParseErrorKind> {
    let line = line.trim_end();
    if line.is_empty() {
        return Ok(Vec::new());
    }

    let width = format.column_width();
    match format.value_kind() {
        ValueKind::Str if format == FormatKind::Sentence => {
            Ok(vec![FieldValue::Str(line.to_string())])
        }
        ValueKind::Str => {
            let padded = pad_to_multiple(line, width);
            Ok(columns(&padded, width)
                .map(|column| FieldValue::Str(column.to_string()))
                .collect())
        }
        ValueKind::Int => columns(line, width)
            .enumerate()
            .map(|(column, token)| {
                token
                    .trim()
                    .parse::<i64>()
                    .map(FieldValue::Int)
                    .map_err(|_| ParseErrorKind::InvalidInteger {
                        column,
                        token: token.to_string(),
                    })
            })
            .collect(),
        ValueKind::Float => columns(line, width)
            .enumerate()
            .map(|(column, token)| {
                token
                    .trim()
                    .parse::<f64>()
                    .map(FieldValue::Float)
                    .map_err(|_| ParseErrorKind::InvalidFloat {
                        column,
                        token: token.to_string(),
                    })
            })
            .collect(),
    }
}

/// Renders one float in Fortran scientific notation with a signed
/// two-digit exponent, e.g. `-6.67300626E+00`, right-aligned to `width`.
pub fn fortran_scientific(value: f64, width: usize, precision: usize) -> String {
    let formatted = format!("{value:.precision$e}");
    let rendered = match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}E{sign}{:0>2}", digits)
        }
        None => formatted,
    };
    format!("{rendered:>width$}")
}

/// Renders one value into its fixed-width column.
pub fn format_field(value: &FieldValue, format: FormatKind) -> String {
    let width = format.column_width();
    match value {
        FieldValue::Int(n) => format!("{n:>width$}"),
        FieldValue::Float(x) if format == FormatKind::CmapFloatArray => {
            format!("{x:>width$.5}")
        }
        FieldValue::Float(x) => fortran_scientific(*x, width, 8),
        FieldValue::Str(s) => format!("{s:<width$}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn wide_integers_split_on_eight_columns() {
        let values = parse_data_line("       7       1      -2", FormatKind::IntArray).unwrap();
        assert_eq!(
            values,
            vec![
                FieldValue::Int(7),
                FieldValue::Int(1),
                FieldValue::Int(-2)
            ]
        );
    }

    #[test]
    fn labels_keep_interior_padding() {
        let values = parse_data_line("O   H1  H2", FormatKind::SmallStringArray).unwrap();
        assert_eq!(
            values,
            vec![
                FieldValue::Str("O   ".to_string()),
                FieldValue::Str("H1  ".to_string()),
                FieldValue::Str("H2  ".to_string()),
            ]
        );
    }

    #[test]
    fn sentence_is_one_value_without_trailing_blank() {
        let values = parse_data_line("modified Bondi radii (mbondi)   ", FormatKind::Sentence)
            .unwrap();
        assert_eq!(
            values,
            vec![FieldValue::Str("modified Bondi radii (mbondi)".to_string())]
        );
    }

    #[test]
    fn blank_line_parses_to_nothing() {
        assert_eq!(parse_data_line("   ", FormatKind::FloatArray), Ok(Vec::new()));
    }

    #[test]
    fn garbage_integer_reports_its_column() {
        let err = parse_data_line("       1     2.5", FormatKind::IntArray).unwrap_err();
        assert_eq!(
            err,
            ParseErrorKind::InvalidInteger {
                column: 1,
                token: "     2.5".to_string()
            }
        );
    }

    #[test]
    fn scientific_floats_match_fortran_layout() {
        assert_eq!(fortran_scientific(-6.67300626, 16, 8), " -6.67300626E+00");
        assert_eq!(fortran_scientific(0.0, 16, 8), "  0.00000000E+00");
        assert_eq!(fortran_scientific(1.5e10, 16, 8), "  1.50000000E+10");
        assert_eq!(fortran_scientific(-2.0e-3, 16, 8), " -2.00000000E-03");
    }

    #[test]
    fn cmap_floats_use_fixed_point() {
        let field = format_field(&FieldValue::Float(-0.12345), FormatKind::CmapFloatArray);
        assert_eq!(field, " -0.12345");
    }

    proptest! {
        #[test]
        fn integers_survive_a_format_parse_cycle(n in -9_999_999i64..=9_999_999) {
            let column = format_field(&FieldValue::Int(n), FormatKind::IntArray);
            prop_assert_eq!(column.len(), 8);
            let parsed = parse_data_line(&column, FormatKind::IntArray).unwrap();
            prop_assert_eq!(parsed, vec![FieldValue::Int(n)]);
        }

        #[test]
        fn floats_survive_a_format_parse_cycle(x in -1.0e6f64..1.0e6) {
            let column = format_field(&FieldValue::Float(x), FormatKind::FloatArray);
            prop_assert_eq!(column.len(), 16);
            let parsed = parse_data_line(&column, FormatKind::FloatArray).unwrap();
            match &parsed[0] {
                FieldValue::Float(back) => prop_assert!((back - x).abs() <= x.abs() * 1e-8),
                other => prop_assert!(false, "unexpected value {:?}", other),
            }
        }

        // Surface values carry five decimals, so any such value fits the
        // nine-column field exactly.
        #[test]
        fn cmap_floats_survive_a_format_parse_cycle(n in -9_999_999i32..=9_999_999) {
            let x = f64::from(n) / 1.0e5;
            let column = format_field(&FieldValue::Float(x), FormatKind::CmapFloatArray);
            prop_assert_eq!(column.len(), 9);
            let parsed = parse_data_line(&column, FormatKind::CmapFloatArray).unwrap();
            prop_assert_eq!(parsed, vec![FieldValue::Float(x)]);
        }

        #[test]
        fn labels_survive_a_format_parse_cycle(s in "[A-Za-z0-9*+]{1,4}") {
            let column = format_field(&FieldValue::Str(s.clone()), FormatKind::SmallStringArray);
            prop_assert_eq!(column.len(), 4);
            let parsed = parse_data_line(&column, FormatKind::SmallStringArray).unwrap();
            // Labels come back re-padded to their full four columns.
            prop_assert_eq!(parsed, vec![FieldValue::Str(format!("{s:<4}"))]);
        }
    }
}
