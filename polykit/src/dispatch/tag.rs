//! Type tags.
//!
//! A [`TypeTag`] names either the runtime type of an actual argument or the
//! type a registered implementation declares for a parameter. Tags are
//! written as tokens:
//!
//! | Token             | Tag                                       |
//! |-------------------|-------------------------------------------|
//! | `number`, ...     | a primitive tag                           |
//! | `promise`         | an asynchronous value                     |
//! | `promise<T>`      | an asynchronous value, payload not checked |
//! | `T[]`             | an array whose first element is `T`       |
//! | `...T`            | zero or more trailing `T` arguments       |
//!
//! Every token is lowercase; `Promise<number>` is an unknown token.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

const REST_MARKER: &str = "...";
const ARRAY_SUFFIX: &str = "[]";
const PROMISE: &str = "promise";

/// A canonical classification of a runtime value or declared parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeTag {
    String,
    Number,
    Boolean,
    Object,
    Function,
    /// Matches any single argument.
    Any,
    /// Declared alias of [`TypeTag::Any`].
    Unknown,
    Undefined,
    /// Declared alias of [`TypeTag::Undefined`].
    Void,
    Null,
    /// An asynchronous value with an optional, unchecked payload type.
    Promise(Option<Box<TypeTag>>),
    /// An array, tagged by its element.
    Array(Box<TypeTag>),
    /// A variadic tail. Only valid as the last declared parameter.
    Rest(Box<TypeTag>),
}

/// Errors from parsing a type token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagParseError {
    #[error("empty type token")]
    Empty,

    #[error("unknown type `{0}`")]
    Unknown(String),

    #[error("rest marker is only allowed at the start of a type token: `{0}`")]
    MisplacedRest(String),
}

impl TypeTag {
    pub fn array(element: TypeTag) -> Self {
        TypeTag::Array(Box::new(element))
    }

    pub fn rest(element: TypeTag) -> Self {
        TypeTag::Rest(Box::new(element))
    }

    /// A promise tag without a payload.
    pub fn promise() -> Self {
        TypeTag::Promise(None)
    }

    /// A promise tag carrying a payload type.
    pub fn promise_of(payload: TypeTag) -> Self {
        TypeTag::Promise(Some(Box::new(payload)))
    }

    /// Parses a type token.
    pub fn parse(token: &str) -> Result<Self, TagParseError> {
        if token.is_empty() {
            return Err(TagParseError::Empty);
        }
        match token.strip_prefix(REST_MARKER) {
            Some(element) => Ok(TypeTag::rest(parse_element(element, token)?)),
            None => parse_element(token, token),
        }
    }

    pub fn is_rest(&self) -> bool {
        matches!(self, TypeTag::Rest(_))
    }

    pub fn is_promise(&self) -> bool {
        matches!(self, TypeTag::Promise(_))
    }

    /// The element tag of a rest tag.
    pub fn rest_element(&self) -> Option<&TypeTag> {
        match self {
            TypeTag::Rest(element) => Some(element),
            _ => None,
        }
    }

    /// Rewrites the declared-only aliases into the classifier's vocabulary:
    /// `void` becomes `undefined` and `unknown` becomes `any`, at any depth.
    pub fn canonical(&self) -> TypeTag {
        match self {
            TypeTag::Void => TypeTag::Undefined,
            TypeTag::Unknown => TypeTag::Any,
            TypeTag::Promise(payload) => {
                TypeTag::Promise(payload.as_ref().map(|p| Box::new(p.canonical())))
            }
            TypeTag::Array(element) => TypeTag::array(element.canonical()),
            TypeTag::Rest(element) => TypeTag::rest(element.canonical()),
            other => other.clone(),
        }
    }
}

fn parse_element(text: &str, token: &str) -> Result<TypeTag, TagParseError> {
    if text.starts_with(REST_MARKER) {
        return Err(TagParseError::MisplacedRest(token.to_string()));
    }
    if let Some(element) = text.strip_suffix(ARRAY_SUFFIX) {
        return Ok(TypeTag::array(parse_element(element, token)?));
    }
    if let Some(rest) = text.strip_prefix(PROMISE) {
        if rest.is_empty() {
            return Ok(TypeTag::Promise(None));
        }
        if let Some(payload) = rest.strip_prefix('<').and_then(|r| r.strip_suffix('>')) {
            return Ok(TypeTag::promise_of(parse_element(payload, token)?));
        }
        return Err(TagParseError::Unknown(token.to_string()));
    }
    let tag = match text {
        "string" => TypeTag::String,
        "number" => TypeTag::Number,
        "boolean" => TypeTag::Boolean,
        "object" => TypeTag::Object,
        "function" => TypeTag::Function,
        "any" => TypeTag::Any,
        "unknown" => TypeTag::Unknown,
        "undefined" => TypeTag::Undefined,
        "void" => TypeTag::Void,
        "null" => TypeTag::Null,
        _ if text.contains(REST_MARKER) => {
            return Err(TagParseError::MisplacedRest(token.to_string()))
        }
        _ => return Err(TagParseError::Unknown(token.to_string())),
    };
    Ok(tag)
}

impl FromStr for TypeTag {
    type Err = TagParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TypeTag::parse(s)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::String => f.write_str("string"),
            TypeTag::Number => f.write_str("number"),
            TypeTag::Boolean => f.write_str("boolean"),
            TypeTag::Object => f.write_str("object"),
            TypeTag::Function => f.write_str("function"),
            TypeTag::Any => f.write_str("any"),
            TypeTag::Unknown => f.write_str("unknown"),
            TypeTag::Undefined => f.write_str("undefined"),
            TypeTag::Void => f.write_str("void"),
            TypeTag::Null => f.write_str("null"),
            TypeTag::Promise(None) => f.write_str(PROMISE),
            TypeTag::Promise(Some(payload)) => write!(f, "{PROMISE}<{payload}>"),
            TypeTag::Array(element) => write!(f, "{element}{ARRAY_SUFFIX}"),
            TypeTag::Rest(element) => write!(f, "{REST_MARKER}{element}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_primitives() {
        assert_eq!(TypeTag::parse("string"), Ok(TypeTag::String));
        assert_eq!(TypeTag::parse("void"), Ok(TypeTag::Void));
        assert_eq!(TypeTag::parse("null"), Ok(TypeTag::Null));
        assert_eq!(
            TypeTag::parse("integer"),
            Err(TagParseError::Unknown("integer".to_string()))
        );
        assert_eq!(TypeTag::parse(""), Err(TagParseError::Empty));
    }

    #[test]
    fn test_parse_compound() {
        assert_eq!(
            TypeTag::parse("number[][]"),
            Ok(TypeTag::array(TypeTag::array(TypeTag::Number)))
        );
        assert_eq!(TypeTag::parse("...string"), Ok(TypeTag::rest(TypeTag::String)));
        assert_eq!(
            TypeTag::parse("...boolean[]"),
            Ok(TypeTag::rest(TypeTag::array(TypeTag::Boolean)))
        );
    }

    #[test]
    fn test_parse_promise_forms() {
        assert_eq!(TypeTag::parse("promise"), Ok(TypeTag::promise()));
        assert_eq!(
            TypeTag::parse("promise<number>"),
            Ok(TypeTag::promise_of(TypeTag::Number))
        );
        assert_eq!(
            TypeTag::parse("promise<string>[]"),
            Ok(TypeTag::array(TypeTag::promise_of(TypeTag::String)))
        );
        assert!(TypeTag::parse("promise<").is_err());
        assert!(TypeTag::parse("promises").is_err());
    }

    #[test]
    fn test_promise_prefix_is_case_sensitive() {
        for token in ["Promise", "Promise<number>", "PROMISE", "Promise[]"] {
            assert_eq!(
                TypeTag::parse(token),
                Err(TagParseError::Unknown(token.to_string())),
                "{token}"
            );
        }
    }

    #[test]
    fn test_misplaced_rest() {
        assert_eq!(
            TypeTag::parse("......number"),
            Err(TagParseError::MisplacedRest("......number".to_string()))
        );
        assert_eq!(
            TypeTag::parse("promise<...number>"),
            Err(TagParseError::MisplacedRest("promise<...number>".to_string()))
        );
    }

    #[test]
    fn test_display_round_trips_tokens() {
        for token in ["any", "undefined[]", "...number", "promise", "promise<boolean>[]"] {
            assert_eq!(TypeTag::parse(token).unwrap().to_string(), token);
        }
    }

    #[test]
    fn test_canonical_rewrites_aliases() {
        assert_eq!(TypeTag::Void.canonical(), TypeTag::Undefined);
        assert_eq!(TypeTag::Unknown.canonical(), TypeTag::Any);
        assert_eq!(
            TypeTag::rest(TypeTag::Void).canonical(),
            TypeTag::rest(TypeTag::Undefined)
        );
        assert_eq!(
            TypeTag::array(TypeTag::Unknown).canonical(),
            TypeTag::array(TypeTag::Any)
        );
        assert_eq!(TypeTag::Number.canonical(), TypeTag::Number);
    }
}
