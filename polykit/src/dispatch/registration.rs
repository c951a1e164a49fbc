//! Registration shapes and their normalization.
//!
//! Three shapes are accepted, and all of them normalize to the same
//! [`Normalized`] form before the registry is touched:
//!
//! 1. an options record ([`RegisterOptions`]) with `func`, `types`,
//!    `return_type` (default `void`) and `match_func`;
//! 2. a function followed by type tokens ([`Registration::base`]);
//! 3. a function, a match predicate and type tokens
//!    ([`Registration::matched`]).
//!
//! In the positional shapes the last token is the return type. With no
//! tokens the signature is empty and returns `void`. A trailing rest token
//! can only describe parameters, so it stays a parameter and the return
//! type is `void`.

use crate::value::{Function, Value};

use super::classify::classify;
use super::error::ArgumentError;
use super::registry::MatchPredicate;
use super::tag::TypeTag;

const DEFAULT_RETURN_TYPE: &str = "void";

/// The options-record registration shape.
#[derive(Debug, Clone)]
pub struct RegisterOptions {
    pub func: Function,
    pub types: Vec<String>,
    pub return_type: Option<String>,
    pub match_func: Option<MatchPredicate>,
}

impl RegisterOptions {
    pub fn new(func: Function) -> Self {
        Self {
            func,
            types: Vec::new(),
            return_type: None,
            match_func: None,
        }
    }

    /// Sets the declared parameter type tokens.
    pub fn types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn return_type(mut self, token: impl Into<String>) -> Self {
        self.return_type = Some(token.into());
        self
    }

    /// Guards the implementation with a predicate, making it matcher-based.
    pub fn match_func(mut self, predicate: MatchPredicate) -> Self {
        self.match_func = Some(predicate);
        self
    }
}

/// A registration request in one of the accepted shapes.
#[derive(Debug, Clone)]
pub enum Registration {
    Options(RegisterOptions),
    Positional {
        func: Function,
        match_func: Option<MatchPredicate>,
        tokens: Vec<String>,
    },
}

impl Registration {
    /// A base implementation; the last token is the return type.
    pub fn base<I, S>(func: Function, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Registration::Positional {
            func,
            match_func: None,
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// A matcher-based implementation; the last token is the return type.
    pub fn matched<I, S>(func: Function, predicate: MatchPredicate, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Registration::Positional {
            func,
            match_func: Some(predicate),
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Interprets dynamic registration arguments.
    ///
    /// The first value is either a function or an options object with
    /// `func`, `types`, `returnType` and `matchFunc` members. After a
    /// function, a second function is the match predicate and a second
    /// `undefined` or `null` is skipped; the remaining values are type
    /// tokens and must be strings.
    pub fn from_values(args: &[Value]) -> Result<Self, ArgumentError> {
        let Some(first) = args.first() else {
            return Err(ArgumentError::NotCallable {
                found: TypeTag::Undefined,
            });
        };
        match first {
            Value::Function(func) => {
                let (match_func, rest) = match args.get(1) {
                    Some(Value::Function(predicate)) => {
                        (Some(MatchPredicate::from_function(predicate.clone())), &args[2..])
                    }
                    Some(Value::Undefined | Value::Null) => (None, &args[2..]),
                    _ => (None, &args[1..]),
                };
                let offset = args.len() - rest.len();
                let tokens = string_tokens(rest, offset)?;
                Ok(Registration::Positional {
                    func: func.clone(),
                    match_func,
                    tokens,
                })
            }
            Value::Object(options) => {
                let func = match options.get("func") {
                    Some(Value::Function(func)) => func.clone(),
                    other => {
                        return Err(ArgumentError::FuncNotCallable {
                            found: other.map_or(TypeTag::Undefined, classify),
                        })
                    }
                };
                let types = match options.get("types") {
                    None | Some(Value::Undefined) => Vec::new(),
                    Some(Value::Array(items)) => string_tokens(items, 0)?,
                    Some(other) => {
                        return Err(ArgumentError::TypesNotArray {
                            found: classify(other),
                        })
                    }
                };
                let return_type = match options.get("returnType") {
                    None | Some(Value::Undefined) => None,
                    Some(Value::String(token)) => Some(token.clone()),
                    Some(other) => {
                        return Err(ArgumentError::NonStringToken {
                            index: types.len(),
                            found: classify(other),
                        })
                    }
                };
                // A non-callable `matchFunc` registers a base implementation
                let match_func = options
                    .get("matchFunc")
                    .and_then(Value::as_function)
                    .cloned()
                    .map(MatchPredicate::from_function);
                Ok(Registration::Options(RegisterOptions {
                    func,
                    types,
                    return_type,
                    match_func,
                }))
            }
            other => Err(ArgumentError::NotCallable {
                found: classify(other),
            }),
        }
    }

    /// Validates and canonicalizes the request.
    pub(crate) fn normalize(self) -> Result<Normalized, ArgumentError> {
        let (func, predicate, mut tags, explicit_return) = match self {
            Registration::Options(options) => {
                let tags = parse_tokens(&options.types)?;
                let return_token = options
                    .return_type
                    .as_deref()
                    .unwrap_or(DEFAULT_RETURN_TYPE);
                let return_type = TypeTag::parse(return_token).map_err(|source| {
                    ArgumentError::InvalidToken {
                        index: options.types.len(),
                        source,
                    }
                })?;
                (options.func, options.match_func, tags, Some(return_type))
            }
            Registration::Positional {
                func,
                match_func,
                tokens,
            } => (func, match_func, parse_tokens(&tokens)?, None),
        };

        let return_type = match explicit_return {
            Some(tag) => tag,
            None => {
                let trailing_rest = tags.last().map_or(true, TypeTag::is_rest);
                if trailing_rest {
                    TypeTag::Void
                } else {
                    tags.pop().unwrap_or(TypeTag::Void)
                }
            }
        };
        if return_type.is_rest() {
            return Err(ArgumentError::MisplacedRest { tag: return_type });
        }
        if let Some(position) = tags.iter().position(TypeTag::is_rest) {
            if position + 1 != tags.len() {
                return Err(ArgumentError::MisplacedRest {
                    tag: tags[position].clone(),
                });
            }
        }

        Ok(Normalized {
            func,
            predicate,
            declared_types: tags.iter().map(TypeTag::canonical).collect(),
            return_type: return_type.canonical(),
        })
    }
}

impl From<RegisterOptions> for Registration {
    fn from(options: RegisterOptions) -> Self {
        Registration::Options(options)
    }
}

/// A validated registration ready for the registry.
#[derive(Debug)]
pub(crate) struct Normalized {
    pub func: Function,
    pub predicate: Option<MatchPredicate>,
    pub declared_types: Vec<TypeTag>,
    pub return_type: TypeTag,
}

fn string_tokens(values: &[Value], offset: usize) -> Result<Vec<String>, ArgumentError> {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| match value {
            Value::String(token) => Ok(token.clone()),
            other => Err(ArgumentError::NonStringToken {
                index: offset + i,
                found: classify(other),
            }),
        })
        .collect()
}

fn parse_tokens(tokens: &[String]) -> Result<Vec<TypeTag>, ArgumentError> {
    tokens
        .iter()
        .enumerate()
        .map(|(index, token)| {
            TypeTag::parse(token).map_err(|source| ArgumentError::InvalidToken { index, source })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn noop() -> Function {
        Function::new(|_| Ok(Value::Undefined))
    }

    #[test]
    fn test_positional_last_token_is_return_type() {
        let n = Registration::base(noop(), ["string", "number", "boolean"])
            .normalize()
            .unwrap();
        assert_eq!(n.declared_types, vec![TypeTag::String, TypeTag::Number]);
        assert_eq!(n.return_type, TypeTag::Boolean);
        assert!(n.predicate.is_none());
    }

    #[test]
    fn test_positional_without_tokens() {
        let n = Registration::base(noop(), Vec::<String>::new()).normalize().unwrap();
        assert!(n.declared_types.is_empty());
        assert_eq!(n.return_type, TypeTag::Undefined);
    }

    #[test]
    fn test_positional_trailing_rest_stays_a_parameter() {
        let n = Registration::base(noop(), ["...number"]).normalize().unwrap();
        assert_eq!(n.declared_types, vec![TypeTag::rest(TypeTag::Number)]);
        assert_eq!(n.return_type, TypeTag::Undefined);
    }

    #[test]
    fn test_options_default_return_type() {
        let n = Registration::from(RegisterOptions::new(noop()).types(["number"]))
            .normalize()
            .unwrap();
        assert_eq!(n.declared_types, vec![TypeTag::Number]);
        assert_eq!(n.return_type, TypeTag::Undefined);
    }

    #[test]
    fn test_canonicalizes_aliases() {
        let n = Registration::from(
            RegisterOptions::new(noop())
                .types(["unknown", "void"])
                .return_type("unknown"),
        )
        .normalize()
        .unwrap();
        assert_eq!(n.declared_types, vec![TypeTag::Any, TypeTag::Undefined]);
        assert_eq!(n.return_type, TypeTag::Any);
    }

    #[test]
    fn test_rejects_misplaced_rest() {
        let err = Registration::base(noop(), ["...number", "string", "void"])
            .normalize()
            .unwrap_err();
        assert_eq!(
            err,
            ArgumentError::MisplacedRest {
                tag: TypeTag::rest(TypeTag::Number)
            }
        );

        let err = Registration::from(RegisterOptions::new(noop()).return_type("...number"))
            .normalize()
            .unwrap_err();
        assert!(matches!(err, ArgumentError::MisplacedRest { .. }));
    }

    #[test]
    fn test_rejects_unknown_token() {
        let err = Registration::base(noop(), ["int", "void"]).normalize().unwrap_err();
        assert!(matches!(err, ArgumentError::InvalidToken { index: 0, .. }));
    }

    #[test]
    fn test_from_values_shapes() {
        let func = Value::from(noop());
        let pred = Value::from(Function::new(|_| Ok(Value::from(true))));

        let base = Registration::from_values(&[func.clone(), "number".into(), "void".into()]).unwrap();
        assert!(matches!(base, Registration::Positional { match_func: None, ref tokens, .. } if tokens.len() == 2));

        let matched =
            Registration::from_values(&[func.clone(), pred.clone(), "number".into()]).unwrap();
        assert!(matches!(matched, Registration::Positional { match_func: Some(_), ref tokens, .. } if tokens.len() == 1));

        for absent in [Value::Undefined, Value::Null] {
            let skipped =
                Registration::from_values(&[func.clone(), absent, "number".into(), "void".into()])
                    .unwrap();
            let Registration::Positional { match_func, tokens, .. } = skipped else {
                panic!("expected a positional registration");
            };
            assert!(match_func.is_none());
            assert_eq!(tokens, vec!["number".to_string(), "void".to_string()]);
        }

        let options = Value::object([
            ("func", func),
            ("types", Value::from(vec![Value::from("string")])),
            ("returnType", Value::from("number")),
            ("matchFunc", pred),
        ]);
        let n = Registration::from_values(&[options]).unwrap().normalize().unwrap();
        assert_eq!(n.declared_types, vec![TypeTag::String]);
        assert_eq!(n.return_type, TypeTag::Number);
        assert!(n.predicate.is_some());
    }

    #[test]
    fn test_from_values_argument_errors() {
        assert_eq!(
            Registration::from_values(&[]).unwrap_err(),
            ArgumentError::NotCallable {
                found: TypeTag::Undefined
            }
        );
        assert_eq!(
            Registration::from_values(&[Value::from("number")]).unwrap_err(),
            ArgumentError::NotCallable {
                found: TypeTag::String
            }
        );
        assert_eq!(
            Registration::from_values(&[Value::object([("func", Value::from(1))])]).unwrap_err(),
            ArgumentError::FuncNotCallable {
                found: TypeTag::Number
            }
        );
        assert_eq!(
            Registration::from_values(&[Value::from(noop()), Value::from("number"), Value::from(5)])
                .unwrap_err(),
            ArgumentError::NonStringToken {
                index: 2,
                found: TypeTag::Number
            }
        );
        assert_eq!(
            Registration::from_values(&[Value::from(noop()), Value::Null, Value::from(false)])
                .unwrap_err(),
            ArgumentError::NonStringToken {
                index: 2,
                found: TypeTag::Boolean
            }
        );
    }
}
