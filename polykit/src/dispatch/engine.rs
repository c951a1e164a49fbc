//! The dispatch engine.
//!
//! A [`DispatchEngine`] is one callable identity with two operations:
//! [`register`](DispatchEngine::register) adds an implementation and
//! [`invoke`](DispatchEngine::invoke) routes a call to one of them.

use tracing::{debug, trace};

use crate::value::{Function, Thrown, Value};

use super::classify::classify_args;
use super::error::{CallError, DispatchError, RegisterError};
use super::registration::Registration;
use super::registry::{ImplementationRecord, SignatureRegistry};

/// Runtime multiple dispatch over a private registry.
///
/// Registration needs `&mut self` and invocation `&self`, so the borrow
/// checker keeps the two apart.
#[derive(Debug, Clone, Default)]
pub struct DispatchEngine {
    registry: SignatureRegistry,
}

impl DispatchEngine {
    /// Creates an engine with an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an implementation.
    ///
    /// The request is validated before anything is stored; a failed
    /// registration leaves the registry unchanged. Returns `self` so calls
    /// can be chained.
    pub fn register(
        &mut self,
        registration: impl Into<Registration>,
    ) -> Result<&mut Self, RegisterError> {
        let normalized = registration.into().normalize()?;
        let (signature, kind) = self.registry.insert(normalized)?;
        debug!(signature = %signature, kind = %kind, "registered implementation");
        Ok(self)
    }

    /// Registers an implementation described by dynamic values.
    ///
    /// See [`Registration::from_values`] for the accepted shapes.
    pub fn register_values(&mut self, args: &[Value]) -> Result<&mut Self, RegisterError> {
        let registration = Registration::from_values(args)?;
        self.register(registration)
    }

    /// Calls the implementation selected for the runtime types of `args`.
    ///
    /// The first record whose declared types match wins. Its matcher-based
    /// implementation runs if the predicate accepts, otherwise its base
    /// implementation runs. The callback result is returned as is, and a
    /// pending value is never awaited.
    pub fn invoke(&self, args: &[Value]) -> Result<Value, CallError> {
        let actual = classify_args(args);
        trace!(arg_types = ?actual, "dispatching call");

        let Some((signature, record)) = self.registry.find_match(&actual) else {
            debug!(arg_types = ?actual, "no matching signature");
            return Err(DispatchError::NoMatch { arg_types: actual }.into());
        };

        if let Some(matched) = record.matched() {
            if matched.accepts(args, record.declared_types())? {
                trace!(signature = %signature, "selected matcher-based implementation");
                return Ok(matched.callback().call(args)?);
            }
            trace!(signature = %signature, "matcher declined");
        }

        match record.base() {
            Some(base) => {
                trace!(signature = %signature, "selected base implementation");
                Ok(base.callback().call(args)?)
            }
            None => {
                debug!(signature = %signature, "matcher declined without a base implementation");
                Err(DispatchError::Declined {
                    signature: signature.clone(),
                }
                .into())
            }
        }
    }

    /// The record structural matching selects for `args`.
    ///
    /// No predicate is evaluated and nothing is called.
    pub fn resolve(&self, args: &[Value]) -> Option<&ImplementationRecord> {
        let actual = classify_args(args);
        self.registry.find_match(&actual).map(|(_, record)| record)
    }

    pub fn registry(&self) -> &SignatureRegistry {
        &self.registry
    }

    /// Turns the engine into a function value.
    ///
    /// Dispatch errors surface as thrown `DispatchError` objects; errors
    /// raised by implementations pass through unchanged.
    pub fn into_function(self) -> Function {
        Function::named("dispatch", move |args| self.invoke(args).map_err(Thrown::from))
    }
}
