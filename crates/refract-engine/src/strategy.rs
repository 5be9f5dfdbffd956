//! # Conversion Strategies
//!
//! A [`ConversionStrategy`] is one typed conversion rule: a
//! side-effect-free applicability predicate over (source kind, target
//! descriptor) pairs plus the conversion function itself. Strategies
//! declare the target scope they serve, and the registry resolves the
//! best match per conversion.
//!
//! ## Contract
//!
//! Applicability must be decidable from the source kind and target
//! descriptor alone, with no side effects — the registry probes many
//! strategies per resolution. `apply` is invoked at most once per
//! conversion; its result, success or rejection, is final (the engine
//! never backtracks to try another strategy).

use std::fmt;

use refract_core::{
    ConversionContext, StrategyError, TypeDescriptor, TypeFamily, Value, ValueKind,
};

use crate::engine::ConversionEngine;

/// The set of target types a strategy serves.
///
/// Declared by the strategy itself (the registry queries it once at
/// registration). An `Exact` scope participates in the first resolution
/// phase for its precise descriptor and in the second phase for every
/// descriptor it sits above; a `Family` scope participates in the
/// second phase for every member of the family.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetScope {
    /// One precise target descriptor (and, via the supertype relation,
    /// everything below it).
    Exact(TypeDescriptor),
    /// Every descriptor in a family.
    Family(TypeFamily),
}

impl TargetScope {
    /// Whether this scope names exactly `target`.
    pub fn covers_exact(&self, target: &TypeDescriptor) -> bool {
        matches!(self, TargetScope::Exact(d) if d == target)
    }

    /// Whether this scope covers `target` from above without naming it
    /// exactly — a proper supertype, or a family containing it.
    pub fn covers_from_above(&self, target: &TypeDescriptor) -> bool {
        match self {
            TargetScope::Exact(d) => d != target && d.is_supertype_of(target),
            TargetScope::Family(family) => family.contains(target),
        }
    }
}

impl fmt::Display for TargetScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetScope::Exact(d) => write!(f, "{d}"),
            TargetScope::Family(family) => write!(f, "{family} family"),
        }
    }
}

/// A single registered conversion rule.
///
/// Stateless with respect to any one conversion: a strategy may hold
/// internal configuration fixed at construction time, but must not
/// mutate shared state during `applicable` or `apply`.
pub trait ConversionStrategy: fmt::Debug + Send + Sync {
    /// Short stable name, used in traces and fault details.
    fn name(&self) -> &str;

    /// The target scope this strategy serves.
    ///
    /// Defaults to the whole descriptor space, gated entirely by
    /// [`applicable`](Self::applicable) — the right choice for broadly
    /// applicable strategies; narrow strategies should override with
    /// their precise scope so exact registrations shadow correctly.
    fn target_scope(&self) -> TargetScope {
        TargetScope::Family(TypeFamily::Any)
    }

    /// Whether this strategy can attempt the given pair. Side-effect-free.
    fn applicable(&self, source: ValueKind, target: &TypeDescriptor) -> bool;

    /// Convert `value` to `target`.
    ///
    /// `context` is the declaration-site metadata handed to the engine,
    /// passed through unmodified. `engine` is a read-only recursion
    /// handle so composite strategies (element-wise collection
    /// conversion) can convert nested values through the same registry.
    fn apply(
        &self,
        value: &Value,
        target: &TypeDescriptor,
        context: Option<&ConversionContext>,
        engine: &ConversionEngine,
    ) -> Result<Value, StrategyError>;
}
