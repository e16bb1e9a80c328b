//! Comma-separated spec lists with repeat multipliers.

use gridform_core::{FormSpec, LayoutMap, Orientation, ParseError};

use crate::grammar::decode_spec;
use crate::lexer::{multiplier, split_top_level};

/// Repeats may not grow a list beyond this many tracks.
pub const MAX_REPEATED_TRACKS: usize = 10_000;

/// Decode a comma-separated list of column specs.
pub fn parse_column_specs(encoded: &str, layout_map: &LayoutMap) -> Result<Vec<FormSpec>, ParseError> {
    parse_specs(encoded, Orientation::Horizontal, layout_map)
}

/// Decode a comma-separated list of row specs.
pub fn parse_row_specs(encoded: &str, layout_map: &LayoutMap) -> Result<Vec<FormSpec>, ParseError> {
    parse_specs(encoded, Orientation::Vertical, layout_map)
}

/// Decode a comma-separated list of specs.
///
/// Items may carry a repeat prefix: `3*pref` or `2*(pref, 4dlu)`. A single
/// trailing comma is accepted; any other empty item is an error.
pub fn parse_specs(
    encoded: &str,
    orientation: Orientation,
    layout_map: &LayoutMap,
) -> Result<Vec<FormSpec>, ParseError> {
    let lowered = encoded.trim().to_lowercase();
    if lowered.is_empty() {
        return Err(ParseError::Empty);
    }
    let body = lowered.strip_suffix(',').unwrap_or(&lowered);
    let mut specs = Vec::new();
    decode_list(body, orientation, layout_map, &mut specs)?;
    Ok(specs)
}

fn decode_list(
    list: &str,
    orientation: Orientation,
    layout_map: &LayoutMap,
    out: &mut Vec<FormSpec>,
) -> Result<(), ParseError> {
    let items = split_top_level(list, ',')
        .ok_or_else(|| ParseError::Unbalanced { input: list.to_string() })?;
    for item in items {
        decode_item(item.trim(), orientation, layout_map, out)?;
    }
    Ok(())
}

fn decode_item(
    item: &str,
    orientation: Orientation,
    layout_map: &LayoutMap,
    out: &mut Vec<FormSpec>,
) -> Result<(), ParseError> {
    if item.is_empty() {
        return Err(ParseError::Empty);
    }
    if !item.starts_with(|c: char| c.is_ascii_digit()) || !item.contains('*') {
        out.push(decode_spec(item, orientation, layout_map)?);
        return Ok(());
    }

    let (rest, count) =
        multiplier(item).map_err(|_| ParseError::InvalidMultiplier { token: item.to_string() })?;
    if count == 0 {
        return Err(ParseError::InvalidMultiplier { token: item.to_string() });
    }
    let rest = rest.trim();
    let mut repeated = Vec::new();
    match rest.strip_prefix('(') {
        Some(group) => {
            let inner = group
                .strip_suffix(')')
                .ok_or_else(|| ParseError::Unbalanced { input: item.to_string() })?;
            decode_list(inner, orientation, layout_map, &mut repeated)?;
        }
        None => decode_item(rest, orientation, layout_map, &mut repeated)?,
    }
    let expanded = repeated
        .len()
        .checked_mul(count)
        .and_then(|n| n.checked_add(out.len()))
        .filter(|&n| n <= MAX_REPEATED_TRACKS)
        .ok_or_else(|| ParseError::TooManyTracks {
            token: item.to_string(),
            limit: MAX_REPEATED_TRACKS,
        })?;
    out.reserve(expanded - out.len());
    for _ in 0..count {
        out.extend_from_slice(&repeated);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridform_core::{ConstantSize, DefaultAlignment, Size};

    fn columns(encoded: &str) -> Result<Vec<FormSpec>, ParseError> {
        parse_column_specs(encoded, &LayoutMap::with_defaults())
    }

    #[test]
    fn test_parse_simple_list() {
        let specs = columns("right:pref, 4dlu, 50dlu:grow").unwrap();
        assert_eq!(specs.len(), 3);
        assert_eq!(specs[0].default_alignment(), DefaultAlignment::Right);
        assert_eq!(specs[1].size(), Size::Constant(ConstantSize::dialog_units(4.0)));
        assert!(specs[2].can_grow());
    }

    #[test]
    fn test_bounded_sizes_keep_their_inner_separators() {
        let specs = columns("max(50dlu;pref), [10px;min;40px]").unwrap();
        assert_eq!(specs.len(), 2);
        assert!(matches!(specs[0].size(), Size::Bounded(_)));
        assert!(matches!(specs[1].size(), Size::Bounded(_)));
    }

    #[test]
    fn test_multipliers() {
        let specs = columns("pref, 3*(4dlu, min)").unwrap();
        assert_eq!(specs.len(), 7);
        assert_eq!(specs[1].size(), specs[3].size());
        assert_eq!(specs[2].size(), Size::MINIMUM);
        assert_eq!(specs[6].size(), Size::MINIMUM);

        assert_eq!(columns("2*pref").unwrap().len(), 2);
        assert_eq!(columns("2 * (pref, 2*(min, 1px))").unwrap().len(), 10);
    }

    #[test]
    fn test_trailing_comma() {
        assert_eq!(columns("pref, min,").unwrap().len(), 2);
        assert!(matches!(columns("pref,,min"), Err(ParseError::Empty)));
        assert!(matches!(columns("pref, min,,"), Err(ParseError::Empty)));
        assert!(matches!(columns(""), Err(ParseError::Empty)));
    }

    #[test]
    fn test_invalid_multipliers_and_brackets() {
        assert!(matches!(columns("0*pref"), Err(ParseError::InvalidMultiplier { .. })));
        assert!(matches!(columns("2*(pref, min"), Err(ParseError::Unbalanced { .. })));
        assert!(matches!(columns("pref)"), Err(ParseError::Unbalanced { .. })));
    }

    #[test]
    fn test_repeats_are_capped() {
        assert_eq!(columns("10000*pref").unwrap().len(), MAX_REPEATED_TRACKS);
        assert!(matches!(columns("10001*pref"), Err(ParseError::TooManyTracks { .. })));
        assert!(matches!(columns("4000000000*pref"), Err(ParseError::TooManyTracks { .. })));
        assert!(matches!(
            columns("100000*(100000*(pref, min))"),
            Err(ParseError::TooManyTracks { limit: MAX_REPEATED_TRACKS, .. })
        ));
        assert!(matches!(
            columns("18446744073709551615*(2*pref)"),
            Err(ParseError::TooManyTracks { .. })
        ));
    }

    #[test]
    fn test_variables_in_lists() {
        let specs = parse_row_specs("p, $lgap, p, ${pgap}, p", &LayoutMap::with_defaults()).unwrap();
        assert_eq!(specs.len(), 5);
        assert_eq!(specs[3].size(), Size::Constant(ConstantSize::dialog_units(9.0)));
    }
}
