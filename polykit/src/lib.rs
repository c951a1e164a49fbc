//! Polykit: runtime multiple dispatch over dynamic values.
//!
//! A [`DispatchEngine`] holds several implementations under one callable
//! identity. Each implementation declares the parameter types it accepts,
//! and a call is routed to the first registration whose declared types
//! structurally match the runtime types of the actual arguments.
//!
//! # Example
//!
//! ```
//! use polykit::{DispatchEngine, Function, RegisterOptions, Value};
//!
//! let mut engine = DispatchEngine::new();
//! engine
//!     .register(
//!         RegisterOptions::new(Function::new(|args| Ok(Value::from(args.len()))))
//!             .types(["...number"])
//!             .return_type("number"),
//!     )
//!     .unwrap()
//!     .register(
//!         RegisterOptions::new(Function::new(|args| Ok(args[0].clone())))
//!             .types(["string"])
//!             .return_type("string"),
//!     )
//!     .unwrap();
//!
//! let count = engine.invoke(&[Value::from(1), Value::from(2)]).unwrap();
//! assert_eq!(count, Value::from(2));
//! ```
//!
//! # Crate Structure
//!
//! - [`value`] - The dynamic value model dispatched over
//! - [`dispatch`] - Type classification, signature matching and the engine

pub mod dispatch;
pub mod value;

pub use dispatch::{
    classify, classify_args, tags_equal, types_match, ArgumentError, CallError, ConflictError,
    DispatchEngine, DispatchError, ImplKind, Implementation, ImplementationRecord,
    MatchPredicate, RegisterError, RegisterOptions, Registration, Signature, SignatureRegistry,
    TagParseError, TypeTag,
};
pub use value::{
    to_source_string, FormatOptions, Function, Object, Pending, PendingState, Thrown, Value,
};
