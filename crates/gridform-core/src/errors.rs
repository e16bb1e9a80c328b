//! Error types for gridform.

use crate::types::{DefaultAlignment, Orientation};
use thiserror::Error;

/// Top-level error type for gridform.
#[derive(Debug, Error)]
pub enum FormsError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Arity(#[from] ArityError),
}

impl From<LayoutError> for FormsError {
    fn from(err: LayoutError) -> Self {
        match err {
            LayoutError::Configuration(err) => FormsError::Configuration(err),
            LayoutError::Arity(err) => FormsError::Arity(err),
        }
    }
}

const BOUNDED_SIZE_FORMS: &str = "\
[<constant size>;<logical size>]                 // lower bound
[<logical size>;<constant size>]                 // upper bound
[<constant size>;<logical size>;<constant size>] // lower and upper bound
Examples:
[50dlu;pref]                                     // lower bound
[pref;200dlu]                                    // upper bound
[50dlu;pref;200dlu]                              // lower and upper bound";

/// Errors while decoding an encoded spec or constraint string.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("The encoded form spec must not be empty.")]
    Empty,

    #[error("Unmapped layout variable: ${name}")]
    UnmappedVariable { name: String },

    #[error("The form spec '{spec}' must provide a size.")]
    MissingSize { spec: String },

    #[error("The form spec '{spec}' has more than three ':'-separated tokens.")]
    TooManyTokens { spec: String },

    #[error("Invalid size '{token}'. Must be a constant like 50dlu or 10px, or one of: m, min, p, pref, d, default")]
    InvalidSize { token: String },

    #[error("Invalid number '{token}'")]
    InvalidNumber { token: String },

    #[error("The resize argument '{token}' is invalid. Must be one of: grow, g, none, n, nogrow, grow(<double>), g(<double>)")]
    InvalidResize { token: String },

    #[error("Illegal bounded size '{token}'. Must be one of:\n{}", BOUNDED_SIZE_FORMS)]
    IllegalBoundedSize { token: String },

    #[error("Bounded sizes must not be both constants: '{token}'")]
    BothConstant { token: String },

    #[error("Bounded sizes must not be both logical: '{token}'")]
    BothLogical { token: String },

    #[error("Invalid {orientation} alignment '{token}'")]
    InvalidAlignment {
        token: String,
        orientation: Orientation,
    },

    #[error("Invalid repeat multiplier in '{token}'. Must be a positive integer followed by '*'")]
    InvalidMultiplier { token: String },

    #[error("The repeat in '{token}' expands to more than {limit} tracks")]
    TooManyTracks { token: String, limit: usize },

    #[error("Unbalanced brackets or parentheses in '{input}'")]
    Unbalanced { input: String },

    #[error("Invalid cell constraints '{encoded}': {reason}")]
    InvalidConstraints { encoded: String, reason: String },

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

/// Errors caused by an inconsistent configuration of specs, constraints,
/// or measurement inputs.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("The resize weight must be a finite, non-negative number, got {weight}.")]
    InvalidResizeWeight { weight: f64 },

    #[error("The alignment '{alignment}' is not valid for a {} spec.", .orientation.track_name())]
    AlignmentOrientation {
        alignment: DefaultAlignment,
        orientation: Orientation,
    },

    #[error("Cannot resolve component size '{size}' without a measurement context.")]
    MissingMeasureContext { size: String },

    #[error("No cell constraints set for component {component}.")]
    MissingConstraints { component: String },

    #[error("Invalid cell constraints: {field} must be at least 1, got {value}.")]
    InvalidCell { field: &'static str, value: usize },

    #[error("Invalid cell alignment '{alignment}' for the {orientation} axis.")]
    InvalidCellAlignment {
        alignment: String,
        orientation: Orientation,
    },

    #[error("Invalid {} group: {reason}", .orientation.track_name())]
    InvalidGroup {
        orientation: Orientation,
        reason: String,
    },

    #[error("Cannot remove {} {index}: {reason}", .orientation.track_name())]
    TrackInUse {
        orientation: Orientation,
        index: usize,
        reason: String,
    },
}

/// Grid coordinates outside the declared tracks.
#[derive(Debug, Error)]
pub enum ArityError {
    #[error("The {} origin {start} with span {span} exceeds the {count} declared {}s.", .orientation.track_name(), .orientation.track_name())]
    CellOutOfRange {
        orientation: Orientation,
        start: usize,
        span: usize,
        count: usize,
    },

    #[error("The {} index {index} must be within 1..={count}.", .orientation.track_name())]
    IndexOutOfRange {
        orientation: Orientation,
        index: usize,
        count: usize,
    },
}

/// Errors raised by a layout pass.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Arity(#[from] ArityError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_size_message_lists_legal_forms() {
        let err = ParseError::IllegalBoundedSize { token: "[pref;pref]".into() };
        let message = err.to_string();
        assert!(message.starts_with("Illegal bounded size '[pref;pref]'"));
        assert!(message.contains("[<constant size>;<logical size>]"));
        assert!(message.contains("[50dlu;pref;200dlu]"));
    }

    #[test]
    fn test_arity_message_names_tracks() {
        let err = ArityError::CellOutOfRange {
            orientation: Orientation::Horizontal,
            start: 3,
            span: 2,
            count: 3,
        };
        insta::assert_snapshot!(
            err.to_string(),
            @"The column origin 3 with span 2 exceeds the 3 declared columns."
        );
    }

    #[test]
    fn test_layout_error_flattens_into_forms_error() {
        let err: FormsError = LayoutError::from(ConfigurationError::MissingConstraints {
            component: "\"name\"".into(),
        })
        .into();
        assert!(matches!(
            err,
            FormsError::Configuration(ConfigurationError::MissingConstraints { .. })
        ));
    }
}
