//! Encoded cell constraints: `"x, y[, w, h][, hAlign, vAlign]"`.

use smallvec::SmallVec;

use gridform_core::{CellAlignment, CellConstraints, Orientation, ParseError};

use crate::lexer::positive_integer;

/// Decode cell constraints such as `"1, 3"`, `"1, 3, 5, 1"`,
/// `"1, 3, right, top"`, or `"1, 3, 5, 1, fill, center"`.
///
/// The result is validated, so origins and spans are at least 1.
pub fn parse_cell_constraints(encoded: &str) -> Result<CellConstraints, ParseError> {
    let lowered = encoded.trim().to_lowercase();
    let tokens: SmallVec<[&str; 6]> = lowered.split(',').map(str::trim).collect();
    let invalid = |reason: &str| ParseError::InvalidConstraints {
        encoded: encoded.to_string(),
        reason: reason.to_string(),
    };

    let number = |token: &str| -> Result<usize, ParseError> {
        nom::combinator::all_consuming(positive_integer)(token)
            .map(|(_, value)| value)
            .map_err(|_| ParseError::InvalidNumber { token: token.to_string() })
    };
    let alignment = |token: &str, orientation: Orientation| -> Result<CellAlignment, ParseError> {
        CellAlignment::decode(token, orientation).ok_or_else(|| ParseError::InvalidAlignment {
            token: token.to_string(),
            orientation,
        })
    };

    let cc = match tokens[..] {
        [x, y] => CellConstraints::xy(number(x)?, number(y)?),
        [x, y, third, fourth] => {
            let origin = CellConstraints::xy(number(x)?, number(y)?);
            if third.starts_with(|c: char| c.is_ascii_digit()) {
                CellConstraints::xywh(origin.grid_x, origin.grid_y, number(third)?, number(fourth)?)
            } else {
                origin.with_alignment(
                    alignment(third, Orientation::Horizontal)?,
                    alignment(fourth, Orientation::Vertical)?,
                )
            }
        }
        [x, y, w, h, h_align, v_align] => {
            CellConstraints::xywh(number(x)?, number(y)?, number(w)?, number(h)?).with_alignment(
                alignment(h_align, Orientation::Horizontal)?,
                alignment(v_align, Orientation::Vertical)?,
            )
        }
        _ => return Err(invalid("expected 2, 4, or 6 comma-separated values")),
    };
    cc.validate()?;
    Ok(cc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridform_core::ConfigurationError;

    #[test]
    fn test_origin_only() {
        assert_eq!(parse_cell_constraints("1, 3").unwrap(), CellConstraints::xy(1, 3));
    }

    #[test]
    fn test_origin_and_span() {
        assert_eq!(parse_cell_constraints("3,1,7,2").unwrap(), CellConstraints::xywh(3, 1, 7, 2));
    }

    #[test]
    fn test_origin_and_alignment() {
        let cc = parse_cell_constraints("1, 3, Right, Top").unwrap();
        assert_eq!(cc.h_align, CellAlignment::Right);
        assert_eq!(cc.v_align, CellAlignment::Top);
        assert_eq!(cc.grid_width, 1);
    }

    #[test]
    fn test_full_form() {
        let cc = parse_cell_constraints("1, 3, 5, 1, f, c").unwrap();
        assert_eq!(cc.grid_width, 5);
        assert_eq!(cc.h_align, CellAlignment::Fill);
        assert_eq!(cc.v_align, CellAlignment::Center);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(parse_cell_constraints("1"), Err(ParseError::InvalidConstraints { .. })));
        assert!(matches!(parse_cell_constraints("1, x"), Err(ParseError::InvalidNumber { .. })));
        assert!(matches!(
            parse_cell_constraints("1, 1, top, left"),
            Err(ParseError::InvalidAlignment { orientation: Orientation::Horizontal, .. })
        ));
        assert!(matches!(
            parse_cell_constraints("0, 1"),
            Err(ParseError::Configuration(ConfigurationError::InvalidCell { field: "grid_x", .. }))
        ));
    }
}
