//! Registration and call errors.

use thiserror::Error;

use crate::value::Thrown;

use super::registry::{ImplKind, Signature};
use super::tag::{TagParseError, TypeTag};

/// A registration call had the wrong shape.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArgumentError {
    #[error("first argument must be a function or an options object with a `func` function, found {found}")]
    NotCallable { found: TypeTag },

    #[error("options field `func` must be a function, found {found}")]
    FuncNotCallable { found: TypeTag },

    #[error("options field `types` must be an array, found {found}")]
    TypesNotArray { found: TypeTag },

    #[error("type token #{index} must be a string, found {found}")]
    NonStringToken { index: usize, found: TypeTag },

    #[error("type token #{index} is invalid: {source}")]
    InvalidToken {
        index: usize,
        #[source]
        source: TagParseError,
    },

    #[error("rest parameter `{tag}` must be the last declared parameter")]
    MisplacedRest { tag: TypeTag },
}

/// A registration would overwrite an occupied implementation slot.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("a {kind} implementation is already registered for signature ({signature})")]
pub struct ConflictError {
    /// The canonical signature of the rejected registration.
    pub signature: Signature,
    /// The slot that was already occupied.
    pub kind: ImplKind,
}

/// Errors from [`DispatchEngine::register`](super::DispatchEngine::register).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegisterError {
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    #[error(transparent)]
    Conflict(#[from] ConflictError),
}

/// No implementation could serve a call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    #[error("no matching implementation for argument types ({})", tag_list(.arg_types))]
    NoMatch { arg_types: Vec<TypeTag> },

    #[error("no matching implementation: the matcher for ({signature}) declined and no base implementation is registered")]
    Declined { signature: Signature },
}

/// Errors from [`DispatchEngine::invoke`](super::DispatchEngine::invoke).
///
/// Errors raised by an implementation body are passed through as
/// [`CallError::Thrown`] without modification.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CallError {
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Thrown(#[from] Thrown),
}

impl From<CallError> for Thrown {
    fn from(err: CallError) -> Self {
        match err {
            CallError::Thrown(thrown) => thrown,
            CallError::Dispatch(err) => Thrown::error("DispatchError", err.to_string()),
        }
    }
}

fn tag_list(tags: &[TypeTag]) -> String {
    let parts: Vec<String> = tags.iter().map(ToString::to_string).collect();
    parts.join(", ")
}
