//! Signature registry.
//!
//! The registry maps a canonical [`Signature`] to the implementations
//! registered for it. It is insertion ordered: dispatch walks records in
//! the order their signatures were first registered and stops at the first
//! structural match.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::value::{Function, Thrown, Value};

use super::error::ConflictError;
use super::matcher::types_match;
use super::registration::Normalized;
use super::tag::TypeTag;

const SIGNATURE_SEPARATOR: &str = "|";

/// A predicate over `(actual arguments, declared parameter types)` that
/// guards a matcher-based implementation.
#[derive(Clone)]
pub struct MatchPredicate(Rc<dyn Fn(&[Value], &[TypeTag]) -> Result<bool, Thrown>>);

impl MatchPredicate {
    pub fn new(predicate: impl Fn(&[Value], &[TypeTag]) -> bool + 'static) -> Self {
        Self(Rc::new(move |args, types| Ok(predicate(args, types))))
    }

    /// A predicate that may raise; the error propagates to the caller.
    pub fn fallible(
        predicate: impl Fn(&[Value], &[TypeTag]) -> Result<bool, Thrown> + 'static,
    ) -> Self {
        Self(Rc::new(predicate))
    }

    /// Wraps a dynamic function as a predicate.
    ///
    /// The function is called with two arguments, the array of actual
    /// arguments and the array of declared type tokens, and its result is
    /// judged by truthiness.
    pub fn from_function(func: Function) -> Self {
        Self::fallible(move |args, types| {
            let types = types.iter().map(|t| Value::from(t.to_string())).collect();
            let verdict = func.call(&[Value::Array(args.to_vec()), Value::Array(types)])?;
            Ok(verdict.truthy())
        })
    }

    pub fn test(&self, args: &[Value], types: &[TypeTag]) -> Result<bool, Thrown> {
        (self.0)(args, types)
    }
}

impl fmt::Debug for MatchPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MatchPredicate")
    }
}

/// Which slot of a record an implementation occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImplKind {
    /// Unconditional; runs whenever the signature matches.
    Base,
    /// Guarded by a [`MatchPredicate`]; tried before the base implementation.
    Matched,
}

impl fmt::Display for ImplKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImplKind::Base => f.write_str("base"),
            ImplKind::Matched => f.write_str("matcher-based"),
        }
    }
}

/// A registered callback and its optional guard.
#[derive(Debug, Clone)]
pub struct Implementation {
    callback: Function,
    predicate: Option<MatchPredicate>,
}

impl Implementation {
    pub(crate) fn new(callback: Function, predicate: Option<MatchPredicate>) -> Self {
        Self {
            callback,
            predicate,
        }
    }

    pub fn callback(&self) -> &Function {
        &self.callback
    }

    pub fn predicate(&self) -> Option<&MatchPredicate> {
        self.predicate.as_ref()
    }

    pub fn kind(&self) -> ImplKind {
        if self.predicate.is_some() {
            ImplKind::Matched
        } else {
            ImplKind::Base
        }
    }

    /// Evaluates the guard. Unguarded implementations always accept.
    pub(crate) fn accepts(&self, args: &[Value], types: &[TypeTag]) -> Result<bool, Thrown> {
        match &self.predicate {
            Some(predicate) => predicate.test(args, types),
            None => Ok(true),
        }
    }
}

/// Everything registered for one signature.
#[derive(Debug, Clone)]
pub struct ImplementationRecord {
    declared_types: Vec<TypeTag>,
    return_type: TypeTag,
    base: Option<Implementation>,
    matched: Option<Implementation>,
}

impl ImplementationRecord {
    fn new(declared_types: Vec<TypeTag>, return_type: TypeTag) -> Self {
        Self {
            declared_types,
            return_type,
            base: None,
            matched: None,
        }
    }

    /// Declared parameter types, canonicalized. Excludes the return type.
    pub fn declared_types(&self) -> &[TypeTag] {
        &self.declared_types
    }

    /// The declared return type. Recorded, never checked.
    pub fn return_type(&self) -> &TypeTag {
        &self.return_type
    }

    pub fn base(&self) -> Option<&Implementation> {
        self.base.as_ref()
    }

    pub fn matched(&self) -> Option<&Implementation> {
        self.matched.as_ref()
    }

    /// The implementation occupying the given slot.
    pub fn slot(&self, kind: ImplKind) -> Option<&Implementation> {
        match kind {
            ImplKind::Base => self.base.as_ref(),
            ImplKind::Matched => self.matched.as_ref(),
        }
    }

    fn slot_mut(&mut self, kind: ImplKind) -> &mut Option<Implementation> {
        match kind {
            ImplKind::Base => &mut self.base,
            ImplKind::Matched => &mut self.matched,
        }
    }
}

/// The canonical registry key: declared parameter tags joined by `|`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature(String);

impl Signature {
    /// Builds the key for a list of declared parameter types.
    pub fn of(types: &[TypeTag]) -> Self {
        let parts: Vec<String> = types.iter().map(ToString::to_string).collect();
        Self(parts.join(SIGNATURE_SEPARATOR))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Insertion-ordered mapping from signature to implementation record.
#[derive(Debug, Clone, Default)]
pub struct SignatureRegistry {
    records: IndexMap<Signature, ImplementationRecord>,
}

impl SignatureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, signature: &Signature) -> Option<&ImplementationRecord> {
        self.records.get(signature)
    }

    /// Exact lookup by declared parameter types.
    pub fn lookup(&self, declared: &[TypeTag]) -> Option<&ImplementationRecord> {
        let canonical: Vec<TypeTag> = declared.iter().map(TypeTag::canonical).collect();
        self.get(&Signature::of(&canonical))
    }

    /// Records in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&Signature, &ImplementationRecord)> {
        self.records.iter()
    }

    /// Finds the first record, in registration order, whose declared types
    /// structurally match the actual types.
    pub fn find_match(&self, actual: &[TypeTag]) -> Option<(&Signature, &ImplementationRecord)> {
        self.records
            .iter()
            .find(|(_, record)| types_match(&record.declared_types, actual))
    }

    /// Stores a normalized registration.
    ///
    /// A new signature is appended; an existing one keeps its position, gets
    /// the empty slot filled and its metadata refreshed. Filling an occupied
    /// slot is a conflict and leaves the registry untouched.
    pub(crate) fn insert(&mut self, entry: Normalized) -> Result<(Signature, ImplKind), ConflictError> {
        let signature = Signature::of(&entry.declared_types);
        let implementation = Implementation::new(entry.func, entry.predicate);
        let kind = implementation.kind();

        if let Some(existing) = self.records.get(&signature) {
            if existing.slot(kind).is_some() {
                return Err(ConflictError {
                    signature,
                    kind,
                });
            }
        }

        let record = self
            .records
            .entry(signature.clone())
            .or_insert_with(|| ImplementationRecord::new(Vec::new(), TypeTag::Undefined));
        record.declared_types = entry.declared_types;
        record.return_type = entry.return_type;
        *record.slot_mut(kind) = Some(implementation);

        Ok((signature, kind))
    }
}
