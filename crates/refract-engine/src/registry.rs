//! # Strategy Registry
//!
//! Holds registered conversion strategies plus the built-in defaults,
//! and resolves the best match for a (value, target) pair.
//!
//! ## Resolution Order
//!
//! 1. Registrations whose scope names the precise target descriptor,
//!    most recently registered first.
//! 2. Registrations whose scope covers the target from above — a proper
//!    supertype descriptor or a containing family — most recently
//!    registered first.
//! 3. Built-in defaults in fixed order (text parsing, numeric coercion,
//!    sequence conversion, mapping conversion, identity).
//!
//! The first strategy whose applicability check passes wins. Resolution
//! never returns more than one strategy, and registration recency is
//! the deterministic tie-break: registering B after A shadows A for
//! every pair both serve.
//!
//! ## Lifecycle
//!
//! One registry per owning session: configure it single-threaded via
//! [`register`](StrategyRegistry::register), then share it read-only.
//! Registration is append-only — strategies are shadowed by recency,
//! never removed.

use refract_core::{TypeDescriptor, Value};

use crate::defaults;
use crate::strategy::{ConversionStrategy, TargetScope};

/// Recency-ordered store of conversion strategies.
#[derive(Debug)]
pub struct StrategyRegistry {
    /// Explicit registrations in registration order; scanned backwards.
    registrations: Vec<Registration>,
    /// Built-in fallbacks, consulted after every registration.
    defaults: Vec<Box<dyn ConversionStrategy>>,
}

#[derive(Debug)]
struct Registration {
    /// Scope captured once at registration time.
    scope: TargetScope,
    strategy: Box<dyn ConversionStrategy>,
}

impl StrategyRegistry {
    /// A registry with no explicit registrations and the built-in
    /// default strategies in place.
    pub fn new() -> Self {
        Self {
            registrations: Vec::new(),
            defaults: defaults::built_in(),
        }
    }

    /// A registry with no registrations and no defaults.
    ///
    /// Every resolution fails until strategies are registered — useful
    /// for sessions that need full control over the conversion surface.
    pub fn empty() -> Self {
        Self {
            registrations: Vec::new(),
            defaults: Vec::new(),
        }
    }

    /// Register a strategy.
    ///
    /// Append-only: a later registration shadows earlier ones (and the
    /// defaults) for every pair both serve. The strategy's target scope
    /// is queried once here and cached for resolution.
    pub fn register(&mut self, strategy: Box<dyn ConversionStrategy>) {
        let scope = strategy.target_scope();
        self.registrations.push(Registration { scope, strategy });
    }

    /// Resolve the winning strategy for converting `value` to `target`.
    ///
    /// Returns `None` when no strategy's applicability check passes —
    /// the engine surfaces that as a `NotSupported` outcome.
    pub fn resolve<'r>(
        &'r self,
        value: &Value,
        target: &TypeDescriptor,
    ) -> Option<&'r dyn ConversionStrategy> {
        let source = value.kind();

        for registration in self.registrations.iter().rev() {
            if registration.scope.covers_exact(target)
                && registration.strategy.applicable(source, target)
            {
                return Some(registration.strategy.as_ref());
            }
        }

        for registration in self.registrations.iter().rev() {
            if registration.scope.covers_from_above(target)
                && registration.strategy.applicable(source, target)
            {
                return Some(registration.strategy.as_ref());
            }
        }

        self.defaults
            .iter()
            .find(|strategy| strategy.applicable(source, target))
            .map(|strategy| strategy.as_ref())
    }

    /// Number of explicit registrations (defaults not counted).
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Whether no strategy has been explicitly registered.
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::new()
    }
}
