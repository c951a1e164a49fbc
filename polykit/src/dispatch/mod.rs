//! Runtime multiple dispatch.
//!
//! This module implements the resolution algorithm that selects which
//! registered implementation runs for a call, based on the runtime types
//! of all arguments.
//!
//! # Algorithm Overview
//!
//! 1. **Classify**: Map every actual argument to a [`TypeTag`]
//! 2. **Search**: Walk the registry in insertion order
//! 3. **Match**: Take the first record whose declared types structurally
//!    match the actual types (first match wins, there is no specificity
//!    ranking)
//! 4. **Select**: Try the record's matcher-based implementation, then its
//!    base implementation
//!
//! # Module Structure
//!
//! - [`tag`] - Type tags and token parsing
//! - [`classify`] - Runtime value classification
//! - [`matcher`] - Structural signature matching
//! - [`registry`] - Insertion-ordered signature registry
//! - [`registration`] - The accepted registration shapes and their normalization
//! - [`engine`] - The dispatch engine
//! - [`error`] - Registration and call errors

mod classify;
mod engine;
mod error;
mod matcher;
mod registration;
mod registry;
mod tag;


pub use tag::{TagParseError, TypeTag};

pub use classify::{classify, classify_args};

pub use matcher::{tags_equal, types_match};

pub use registry::{
    ImplKind,
    Implementation,
    ImplementationRecord,
    MatchPredicate,
    Signature,
    SignatureRegistry,
};

pub use registration::{RegisterOptions, Registration};

pub use engine::DispatchEngine;

pub use error::{
    ArgumentError,
    CallError,
    ConflictError,
    DispatchError,
    RegisterError,
};
