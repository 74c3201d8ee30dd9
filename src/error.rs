use std::fmt;

use crate::TextPos;

macro_rules! impl_reason {
    ($(
        $(#[$doc:meta])*
        $string:literal <=> $variant:ident,
    )*) => {
        /// The category of a [`ValidationError`].
        #[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash)]
        pub enum ErrorReason {
            $(
                $(#[$doc])*
                $variant
            ),*
        }

        impl std::str::FromStr for ErrorReason {
            type Err = ();

            /// Parse a `kebab-case` reason code into an enum variant.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $string => Ok(Self::$variant), )*
                    _ => Err(())
                }
            }
        }

        impl ErrorReason {
            /// Convert an enum variant back into its `kebab-case` reason code.
            #[must_use]
            pub fn as_str(&self) -> &'static str {
                match *self {
                    $( Self::$variant => $string, )*
                }
            }
        }
    }
}

impl fmt::Display for ErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_str().fmt(f)
    }
}

impl_reason! {
    /// A start tag whose name is not in the schema.
    "unknown-tag" <=> UnknownTag,
    /// An attribute that neither the tag's own rule nor the global rule allows.
    "unknown-attribute" <=> UnknownAttribute,
    /// The same attribute written twice on one start tag.
    "duplicate-attribute" <=> DuplicateAttribute,
    /// A tag that was opened but never closed before the end of input.
    "unclosed-tag" <=> UnclosedTag,
    /// An end tag that does not close the most recently opened tag.
    "wrong-nesting" <=> WrongNesting,
}

/// One violation of the schema found by the [`crate::Validator`].
///
/// Errors are plain data. The validator keeps no reference to them after returning, so they can
/// be modified freely, for example by [`crate::resolve_positions`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidationError {
    /// What kind of violation this is.
    pub reason: ErrorReason,
    /// The tag the violation was found on.
    pub tag_name: String,
    /// The offending attribute, empty if the error is not about an attribute.
    pub attribute_name: String,
    /// The value of the offending attribute, empty if not applicable.
    pub attribute_value: String,
    /// Byte offset of the tag name in the input.
    pub offset: usize,
    /// Line and column of `offset`. `None` until [`crate::resolve_positions`] ran.
    pub text_pos: Option<TextPos>,
}

impl ValidationError {
    /// An error about a tag, without attribute information.
    #[must_use]
    pub fn new(reason: ErrorReason, tag_name: impl Into<String>, offset: usize) -> Self {
        ValidationError {
            reason,
            tag_name: tag_name.into(),
            attribute_name: String::new(),
            attribute_value: String::new(),
            offset,
            text_pos: None,
        }
    }

    /// Attach the attribute this error is about.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attribute_name = name.into();
        self.attribute_value = value.into();
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reason)?;
        if self.attribute_name.is_empty() {
            write!(f, ": <{}>", self.tag_name)?;
        } else {
            write!(f, ": `{}` on <{}>", self.attribute_name, self.tag_name)?;
        }
        match self.text_pos {
            Some(pos) => write!(f, " at {}", pos),
            None => write!(f, " at byte {}", self.offset),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_codes_roundtrip() {
        for reason in [
            ErrorReason::UnknownTag,
            ErrorReason::UnknownAttribute,
            ErrorReason::DuplicateAttribute,
            ErrorReason::UnclosedTag,
            ErrorReason::WrongNesting,
        ] {
            assert_eq!(reason.as_str().parse(), Ok(reason));
        }
        assert_eq!("no-such-reason".parse::<ErrorReason>(), Err(()));
    }

    #[test]
    fn display() {
        let error = ValidationError::new(ErrorReason::UnknownAttribute, "b", 17)
            .with_attribute("kkk", "kkk");
        assert_eq!(error.to_string(), "unknown-attribute: `kkk` on <b> at byte 17");

        let error = ValidationError {
            text_pos: Some(TextPos { line: 3, column: 2 }),
            ..ValidationError::new(ErrorReason::UnclosedTag, "b", 17)
        };
        assert_eq!(error.to_string(), "unclosed-tag: <b> at 3:2");
    }
}
