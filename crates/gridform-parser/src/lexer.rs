//! Lexical helpers for encoded specs.

use nom::{
    bytes::complete::take_while1,
    character::complete::{alpha1, char, digit1, space0},
    combinator::{all_consuming, map_res, opt, recognize},
    number::complete::recognize_float,
    sequence::{pair, terminated},
    IResult,
};

/// Parse an unsigned decimal such as `4`, `2.5`, or `0.75`.
pub fn unsigned_decimal(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(pair(digit1, opt(pair(char('.'), digit1)))),
        |s: &str| s.parse::<f64>(),
    )(input)
}

/// Parse a decimal with an optional sign and exponent, e.g. `-2`, `.5`, or `1e2`.
pub fn signed_decimal(input: &str) -> IResult<&str, f64> {
    map_res(recognize_float, |s: &str| s.parse::<f64>())(input)
}

/// Parse a number immediately followed by a unit suffix, e.g. `50dlu`.
pub fn number_with_unit(input: &str) -> IResult<&str, (f64, &str)> {
    all_consuming(pair(unsigned_decimal, alpha1))(input)
}

/// Parse a positive integer.
pub fn positive_integer(input: &str) -> IResult<&str, usize> {
    map_res(digit1, |s: &str| s.parse::<usize>())(input)
}

/// Parse a repeat prefix such as `3*` or `3 *`, returning the count.
pub fn multiplier(input: &str) -> IResult<&str, usize> {
    terminated(positive_integer, pair(space0, char('*')))(input)
}

/// Parse a variable name (letters, digits, `-`, `_`).
pub fn variable_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '-' || c == '_')(input)
}

/// Split `input` on `separator` at nesting depth zero, treating `(...)`
/// and `[...]` as nested. Returns `None` if brackets are unbalanced.
pub fn split_top_level(input: &str, separator: char) -> Option<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (index, c) in input.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.checked_sub(1)?,
            c if c == separator && depth == 0 => {
                parts.push(&input[start..index]);
                start = index + c.len_utf8();
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    parts.push(&input[start..]);
    Some(parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimals() {
        assert_eq!(unsigned_decimal("2.5dlu"), Ok(("dlu", 2.5)));
        assert!(unsigned_decimal("-1").is_err());
        assert_eq!(signed_decimal("-1"), Ok(("", -1.0)));
        assert!(signed_decimal("nan").is_err());
        assert_eq!(signed_decimal(".5"), Ok(("", 0.5)));
        assert_eq!(signed_decimal("1e2"), Ok(("", 100.0)));
        assert_eq!(signed_decimal("+2.5"), Ok(("", 2.5)));
    }

    #[test]
    fn test_number_with_unit() {
        assert_eq!(number_with_unit("50dlu"), Ok(("", (50.0, "dlu"))));
        assert!(number_with_unit("50").is_err());
        assert!(number_with_unit("50 dlu").is_err());
    }

    #[test]
    fn test_multiplier() {
        assert_eq!(multiplier("3*(pref, 4dlu)"), Ok(("(pref, 4dlu)", 3)));
        assert_eq!(multiplier("2 * pref"), Ok((" pref", 2)));
        assert!(multiplier("3dlu").is_err());
    }

    #[test]
    fn test_split_top_level() {
        assert_eq!(
            split_top_level("pref, 2*(min, 4dlu), [1px;p;2px]", ','),
            Some(vec!["pref", " 2*(min, 4dlu)", " [1px;p;2px]"])
        );
        assert_eq!(split_top_level("max(50dlu;pref)", ';'), Some(vec!["max(50dlu;pref)"]));
        assert_eq!(split_top_level("2*(pref", ','), None);
        assert_eq!(split_top_level("pref)", ','), None);
    }
}
