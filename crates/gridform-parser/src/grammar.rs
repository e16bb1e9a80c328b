//! Grammar rules for decoding a single column or row spec.
//!
//! An encoded spec is `[alignment:]size[:resize]` or a `$variable`.
//! Decoding works on the lower-cased, trimmed string.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_till},
    character::complete::char,
    combinator::all_consuming,
    sequence::{delimited, preceded, terminated},
};
use smallvec::SmallVec;

use gridform_core::{
    BoundedSize, ComponentSize, ConstantSize, DefaultAlignment, FormSpec, LayoutMap, Orientation,
    ParseError, Size, Unit, DEFAULT_GROW, NO_GROW, VARIABLE_PREFIX,
};

use crate::lexer::{number_with_unit, signed_decimal, variable_name};

/// Decode one encoded column or row spec.
///
/// The input is lower-cased and trimmed first, so `"Right:Pref:Grow"`
/// and `"right:pref:grow"` are the same spec.
pub fn parse_spec(
    encoded: &str,
    orientation: Orientation,
    layout_map: &LayoutMap,
) -> Result<FormSpec, ParseError> {
    let lowered = encoded.trim().to_lowercase();
    decode_spec(&lowered, orientation, layout_map)
}

/// Decode an already lower-cased and trimmed spec.
pub(crate) fn decode_spec(
    spec: &str,
    orientation: Orientation,
    layout_map: &LayoutMap,
) -> Result<FormSpec, ParseError> {
    if spec.is_empty() {
        return Err(ParseError::Empty);
    }
    if let Some(reference) = spec.strip_prefix(VARIABLE_PREFIX) {
        return resolve_variable(reference, orientation, layout_map);
    }

    let tokens: SmallVec<[&str; 3]> = spec.split(':').map(str::trim).collect();
    let (alignment, size_token, resize_token) =
        match DefaultAlignment::decode(tokens[0], orientation) {
            Some(alignment) => {
                let size_token = match tokens.get(1) {
                    Some(token) if !token.is_empty() => *token,
                    _ => return Err(ParseError::MissingSize { spec: spec.to_string() }),
                };
                if tokens.len() > 3 {
                    return Err(ParseError::TooManyTokens { spec: spec.to_string() });
                }
                (alignment, size_token, tokens.get(2).copied())
            }
            None => {
                if tokens.len() > 2 {
                    return Err(ParseError::TooManyTokens { spec: spec.to_string() });
                }
                (
                    FormSpec::default_alignment_for(orientation),
                    tokens[0],
                    tokens.get(1).copied(),
                )
            }
        };

    let size = decode_size(size_token, orientation)?;
    let resize_weight = match resize_token {
        Some(token) => decode_resize(token)?,
        None => NO_GROW,
    };
    Ok(FormSpec::new(orientation, alignment, size, resize_weight)?)
}

/// Look up `name` or `{name}` in the map for `orientation`.
fn resolve_variable(
    reference: &str,
    orientation: Orientation,
    layout_map: &LayoutMap,
) -> Result<FormSpec, ParseError> {
    let name = if reference.starts_with('{') {
        let braced: nom::IResult<&str, &str> =
            all_consuming(delimited(char('{'), variable_name, char('}')))(reference);
        match braced {
            Ok((_, name)) => name,
            Err(_) => {
                return Err(ParseError::Unbalanced { input: format!("${}", reference) });
            }
        }
    } else {
        reference
    };
    layout_map
        .get(name, orientation)
        .copied()
        .ok_or_else(|| ParseError::UnmappedVariable { name: name.to_string() })
}

/// A size that is either a constant or a component size.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Atom {
    Constant(ConstantSize),
    Component(ComponentSize),
}

/// Decode a size token: bracketed bounds, legacy `max(..)`/`min(..)`, or
/// an atomic size.
pub(crate) fn decode_size(token: &str, orientation: Orientation) -> Result<Size, ParseError> {
    if let Some(inner) = token.strip_prefix('[') {
        let inner = inner
            .strip_suffix(']')
            .ok_or_else(|| ParseError::Unbalanced { input: token.to_string() })?;
        return decode_bracketed(token, inner, orientation);
    }
    if let Some(inner) = token.strip_prefix("max(").and_then(|t| t.strip_suffix(')')) {
        return decode_legacy_bounded(token, inner, true, orientation);
    }
    if let Some(inner) = token.strip_prefix("min(").and_then(|t| t.strip_suffix(')')) {
        return decode_legacy_bounded(token, inner, false, orientation);
    }
    Ok(match decode_atomic(token, orientation)? {
        Atom::Constant(size) => Size::Constant(size),
        Atom::Component(size) => Size::Component(size),
    })
}

/// `[lower;basis]`, `[basis;upper]`, or `[lower;basis;upper]`.
fn decode_bracketed(token: &str, inner: &str, orientation: Orientation) -> Result<Size, ParseError> {
    let parts = inner
        .split(';')
        .map(|part| decode_atomic(part.trim(), orientation))
        .collect::<Result<SmallVec<[Atom; 3]>, _>>()?;

    let bounded = match parts.as_slice() {
        [Atom::Constant(lower), Atom::Component(basis)] => BoundedSize::at_least(*lower, *basis),
        [Atom::Component(basis), Atom::Constant(upper)] => BoundedSize::at_most(*basis, *upper),
        [Atom::Constant(lower), Atom::Component(basis), Atom::Constant(upper)] => {
            BoundedSize::between(*lower, *basis, *upper)
        }
        _ => return Err(ParseError::IllegalBoundedSize { token: token.to_string() }),
    };
    Ok(Size::Bounded(bounded))
}

/// `max(a;b)` keeps the larger of the two, so its constant is a lower
/// bound; `min(a;b)` keeps the smaller, so its constant is an upper bound.
fn decode_legacy_bounded(
    token: &str,
    inner: &str,
    is_max: bool,
    orientation: Orientation,
) -> Result<Size, ParseError> {
    let (first, second) = inner
        .split_once(';')
        .ok_or_else(|| ParseError::IllegalBoundedSize { token: token.to_string() })?;
    let first = decode_atomic(first.trim(), orientation)?;
    let second = decode_atomic(second.trim(), orientation)?;

    let (constant, basis) = match (first, second) {
        (Atom::Constant(constant), Atom::Component(basis))
        | (Atom::Component(basis), Atom::Constant(constant)) => (constant, basis),
        (Atom::Constant(_), Atom::Constant(_)) => {
            return Err(ParseError::BothConstant { token: token.to_string() });
        }
        (Atom::Component(_), Atom::Component(_)) => {
            return Err(ParseError::BothLogical { token: token.to_string() });
        }
    };
    let bounded = if is_max {
        BoundedSize::at_least(constant, basis)
    } else {
        BoundedSize::at_most(basis, constant)
    };
    Ok(Size::Bounded(bounded))
}

/// A component size word, else a number with a unit suffix.
fn decode_atomic(token: &str, orientation: Orientation) -> Result<Atom, ParseError> {
    if let Some(size) = ComponentSize::decode(token) {
        return Ok(Atom::Component(size));
    }
    let (value, suffix) = number_with_unit(token)
        .map(|(_, parsed)| parsed)
        .map_err(|_| ParseError::InvalidSize { token: token.to_string() })?;
    let unit = Unit::from_abbreviation(suffix, orientation)
        .ok_or_else(|| ParseError::InvalidSize { token: token.to_string() })?;
    Ok(Atom::Constant(ConstantSize::new(value, unit)))
}

/// `grow`, `g`, `none`, `nogrow`, `n`, `grow(<number>)`, or `g(<number>)`.
pub(crate) fn decode_resize(token: &str) -> Result<f64, ParseError> {
    match token {
        "g" | "grow" => return Ok(DEFAULT_GROW),
        "n" | "nogrow" | "none" => return Ok(NO_GROW),
        _ => {}
    }
    let weighted: nom::IResult<&str, &str> = all_consuming(preceded(
        alt((tag("grow("), tag("g("))),
        terminated(take_till(|c: char| c == ')'), char(')')),
    ))(token);
    let (_, argument) =
        weighted.map_err(|_| ParseError::InvalidResize { token: token.to_string() })?;
    let argument = argument.trim();
    all_consuming(signed_decimal)(argument)
        .map(|(_, weight)| weight)
        .map_err(|_| ParseError::InvalidNumber { token: argument.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridform_core::ConfigurationError;

    fn column(encoded: &str) -> Result<FormSpec, ParseError> {
        parse_spec(encoded, Orientation::Horizontal, &LayoutMap::with_defaults())
    }

    fn row(encoded: &str) -> Result<FormSpec, ParseError> {
        parse_spec(encoded, Orientation::Vertical, &LayoutMap::with_defaults())
    }

    fn dlu(value: f64) -> ConstantSize {
        ConstantSize::dialog_units(value)
    }

    #[test]
    fn test_parse_plain_sizes() {
        let spec = column("pref").unwrap();
        assert_eq!(spec.size(), Size::PREFERRED);
        assert_eq!(spec.default_alignment(), DefaultAlignment::Fill);
        assert_eq!(spec.resize_weight(), NO_GROW);

        assert_eq!(column("4dlu").unwrap().size(), Size::Constant(dlu(4.0)));
        assert_eq!(column("m").unwrap().size(), Size::MINIMUM);
        assert_eq!(column("default").unwrap().size(), Size::DEFAULT);
        assert_eq!(row("p").unwrap().default_alignment(), DefaultAlignment::Center);
        assert_eq!(
            column("2.5mm").unwrap().size(),
            Size::Constant(ConstantSize::new(2.5, Unit::Millimeter))
        );
    }

    #[test]
    fn test_parse_alignment_and_resize() {
        let spec = column("Right:Pref:Grow").unwrap();
        assert_eq!(spec.default_alignment(), DefaultAlignment::Right);
        assert_eq!(spec.resize_weight(), DEFAULT_GROW);

        let spec = row("t : 10px : g(0.5)").unwrap();
        assert_eq!(spec.default_alignment(), DefaultAlignment::Top);
        assert_eq!(spec.resize_weight(), 0.5);

        assert_eq!(column("pref:none").unwrap().resize_weight(), NO_GROW);
        assert_eq!(column("pref:nogrow").unwrap().resize_weight(), NO_GROW);
        assert_eq!(column("pref:grow(2.5)").unwrap().resize_weight(), 2.5);
    }

    #[test]
    fn test_alignment_vocabulary_is_orientation_specific() {
        // "top" is no column alignment, so it is decoded as a size
        assert!(matches!(column("top:pref"), Err(ParseError::InvalidSize { .. })));
        assert!(matches!(row("left:pref"), Err(ParseError::InvalidSize { .. })));
        assert!(row("bottom:pref").is_ok());
    }

    #[test]
    fn test_legacy_bounded_sizes() {
        let spec = column("right:max(35dlu;min)").unwrap();
        assert_eq!(spec.default_alignment(), DefaultAlignment::Right);
        assert_eq!(
            spec.size(),
            Size::Bounded(BoundedSize::at_least(dlu(35.0), ComponentSize::Minimum))
        );

        let spec = column("max(pref; 50dlu)").unwrap();
        assert_eq!(
            spec.size(),
            Size::Bounded(BoundedSize::at_least(dlu(50.0), ComponentSize::Preferred))
        );

        let spec = column("min(pref;200px)").unwrap();
        assert_eq!(
            spec.size(),
            Size::Bounded(BoundedSize::at_most(
                ComponentSize::Preferred,
                ConstantSize::pixels(200.0)
            ))
        );
    }

    #[test]
    fn test_bracketed_bounded_sizes() {
        let lower = column("[50dlu;pref]").unwrap().size();
        assert_eq!(lower, Size::Bounded(BoundedSize::at_least(dlu(50.0), ComponentSize::Preferred)));

        let upper = column("[pref;200dlu]").unwrap().size();
        assert_eq!(upper, Size::Bounded(BoundedSize::at_most(ComponentSize::Preferred, dlu(200.0))));

        let both = column("[50dlu;pref;200dlu]").unwrap().size();
        assert_eq!(
            both,
            Size::Bounded(BoundedSize::between(dlu(50.0), ComponentSize::Preferred, dlu(200.0)))
        );
    }

    #[test]
    fn test_illegal_bound_combinations() {
        assert!(matches!(column("max(50dlu;60dlu)"), Err(ParseError::BothConstant { .. })));
        assert!(matches!(column("min(pref;min)"), Err(ParseError::BothLogical { .. })));
        assert!(matches!(column("max(50dlu)"), Err(ParseError::IllegalBoundedSize { .. })));
        for illegal in ["[pref;min]", "[50dlu;60dlu]", "[pref;50dlu;pref]", "[1px;pref;2px;3px]", "[pref]"] {
            assert!(
                matches!(column(illegal), Err(ParseError::IllegalBoundedSize { .. })),
                "{illegal} should be rejected"
            );
        }
        assert!(matches!(column("[50dlu;pref"), Err(ParseError::Unbalanced { .. })));
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(column(""), Err(ParseError::Empty)));
        assert!(matches!(column("   "), Err(ParseError::Empty)));
        assert!(matches!(column("left"), Err(ParseError::MissingSize { .. })));
        assert!(matches!(column("left:"), Err(ParseError::MissingSize { .. })));
        assert!(matches!(column("l:pref:grow:x"), Err(ParseError::TooManyTokens { .. })));
        assert!(matches!(column("huge"), Err(ParseError::InvalidSize { .. })));
        assert!(matches!(column("50"), Err(ParseError::InvalidSize { .. })));
        assert!(matches!(column("50em"), Err(ParseError::InvalidSize { .. })));
        assert!(matches!(column("pref:maybe"), Err(ParseError::InvalidResize { .. })));
        assert!(matches!(column("pref:grow(abc)"), Err(ParseError::InvalidNumber { .. })));
    }

    #[test]
    fn test_dialog_unit_suffix_depends_on_orientation() {
        assert!(column("4dlux").is_ok());
        assert!(matches!(column("4dluy"), Err(ParseError::InvalidSize { .. })));
        assert!(row("4dluy").is_ok());
    }

    #[test]
    fn test_negative_weight_fails_at_construction() {
        let err = column("p:g(-1)").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Configuration(ConfigurationError::InvalidResizeWeight { .. })
        ));
    }

    #[test]
    fn test_weight_forms() {
        assert_eq!(column("p:g(.5)").unwrap().resize_weight(), 0.5);
        assert_eq!(column("p:grow(1e2)").unwrap().resize_weight(), 100.0);
        let huge = format!("p:grow({})", "9".repeat(400));
        assert!(matches!(
            column(&huge),
            Err(ParseError::Configuration(ConfigurationError::InvalidResizeWeight { .. }))
        ));
    }

    #[test]
    fn test_variables() {
        let spec = column("$lcgap").unwrap();
        assert_eq!(spec.size(), Size::Constant(dlu(3.0)));
        let spec = row("${pgap}").unwrap();
        assert_eq!(spec.size(), Size::Constant(dlu(9.0)));
        assert!(column("$GLUE").unwrap().can_grow());

        let err = column("$nothing").unwrap_err();
        assert!(matches!(err, ParseError::UnmappedVariable { ref name } if name == "nothing"));
        assert!(matches!(column("$pgap"), Err(ParseError::UnmappedVariable { .. })));
        assert!(matches!(column("${lcgap"), Err(ParseError::Unbalanced { .. })));
    }

    #[test]
    fn test_custom_variables() {
        let mut map = LayoutMap::new();
        map.insert(
            "label",
            FormSpec::new(Orientation::Horizontal, DefaultAlignment::Right, Size::PREFERRED, 0.0).unwrap(),
        );
        let spec = parse_spec("$Label", Orientation::Horizontal, &map).unwrap();
        assert_eq!(spec.default_alignment(), DefaultAlignment::Right);
    }

    #[test]
    fn test_error_messages_name_the_token() {
        let err = column("pref:grow(x1)").unwrap_err();
        assert_eq!(err.to_string(), "Invalid number 'x1'");
        let err = column("[pref;pref]").unwrap_err();
        assert!(err.to_string().contains("'[pref;pref]'"));
        assert!(err.to_string().contains("[pref;200dlu]"));
    }
}
