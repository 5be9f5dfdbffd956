//! # Conversion Engine
//!
//! The public entry point. A [`ConversionEngine`] owns one
//! [`StrategyRegistry`] — never a process-wide singleton — and performs
//! single-pass, stateless conversions over it: narrow the target from
//! context, short-circuit identities, resolve one strategy, apply it
//! once, classify the outcome.
//!
//! ## Failure Semantics
//!
//! Nothing is retried. At most one strategy is invoked per call, and
//! its result — success or rejection — is final. Every failure surfaces
//! fully classified; the engine performs no local recovery. A strategy
//! that succeeds with a value not satisfying the target has violated
//! its contract, which surfaces as
//! [`ConversionError::Internal`], never as a mismatch.

use refract_core::{
    ConversionContext, ConversionError, StrategyError, TypeDescriptor, Value,
};

use crate::registry::StrategyRegistry;
use crate::strategy::ConversionStrategy;

/// Orchestrates conversions over an explicitly owned strategy registry.
///
/// Construct one per owning session: configure the registry
/// single-threaded (via [`register`](Self::register) or by passing a
/// pre-built registry to [`new`](Self::new)), then share the engine
/// read-only — it is `Send + Sync` and holds no per-call state.
#[derive(Debug)]
pub struct ConversionEngine {
    registry: StrategyRegistry,
}

impl ConversionEngine {
    /// Create an engine over an explicitly configured registry.
    pub fn new(registry: StrategyRegistry) -> Self {
        Self { registry }
    }

    /// The owned registry.
    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    /// Register a strategy on the owned registry.
    ///
    /// Later registrations shadow earlier ones and the defaults for
    /// every pair both serve.
    pub fn register(&mut self, strategy: Box<dyn ConversionStrategy>) {
        self.registry.register(strategy);
    }

    /// Convert `value` to `target` with no declaration context.
    pub fn convert(
        &self,
        value: Value,
        target: &TypeDescriptor,
    ) -> Result<Value, ConversionError> {
        self.do_convert(value, target, None)
    }

    /// Convert `value` to `target` on behalf of a declaration site.
    ///
    /// The context is passed through to the chosen strategy unmodified;
    /// its resolved type arguments narrow open (`any`) slots of the
    /// target before resolution.
    pub fn convert_with_context(
        &self,
        value: Value,
        target: &TypeDescriptor,
        context: &ConversionContext,
    ) -> Result<Value, ConversionError> {
        self.do_convert(value, target, Some(context))
    }

    /// Whether `value` could convert to `target` without attempting it:
    /// it already satisfies the target, null propagation applies, or
    /// some strategy's applicability check passes.
    pub fn can_convert(&self, value: &Value, target: &TypeDescriptor) -> bool {
        (value.is_null() && target.accepts_null())
            || value.satisfies(target)
            || self.registry.resolve(value, target).is_some()
    }

    fn do_convert(
        &self,
        value: Value,
        target: &TypeDescriptor,
        context: Option<&ConversionContext>,
    ) -> Result<Value, ConversionError> {
        let effective = match context {
            Some(ctx) if !ctx.type_arguments().is_empty() => {
                target.narrowed_by(ctx.type_arguments())
            }
            _ => target.clone(),
        };

        // Null propagation: null-accepting targets take null as-is.
        // Scalar targets fall through — a strategy may define a non-null
        // default for null input.
        if value.is_null() && effective.accepts_null() {
            return Ok(Value::Null);
        }

        // Identity short-circuit: already-correctly-typed input returns
        // unchanged, with no strategy invoked.
        if value.satisfies(&effective) {
            return Ok(value);
        }

        let Some(strategy) = self.registry.resolve(&value, &effective) else {
            return Err(ConversionError::not_supported(
                value,
                effective,
                context.cloned(),
            ));
        };
        tracing::trace!(
            strategy = strategy.name(),
            target = %effective,
            "selected conversion strategy"
        );

        match strategy.apply(&value, &effective, context, self) {
            Ok(converted) => {
                if converted.satisfies(&effective) {
                    Ok(converted)
                } else {
                    let detail = format!(
                        "strategy `{}` produced {} for target {effective}",
                        strategy.name(),
                        converted.kind(),
                    );
                    tracing::warn!(
                        strategy = strategy.name(),
                        target = %effective,
                        "conversion strategy violated its output contract"
                    );
                    Err(ConversionError::internal(
                        value,
                        effective,
                        context.cloned(),
                        detail,
                    ))
                }
            }
            Err(StrategyError::Unsupported) => Err(ConversionError::not_supported(
                value,
                effective,
                context.cloned(),
            )),
            Err(StrategyError::Rejected { reason }) => Err(ConversionError::mismatch(
                value,
                effective,
                context.cloned(),
                reason,
            )),
            Err(StrategyError::Fault { detail }) => {
                tracing::warn!(
                    strategy = strategy.name(),
                    target = %effective,
                    detail = %detail,
                    "conversion strategy faulted"
                );
                Err(ConversionError::internal(
                    value,
                    effective,
                    context.cloned(),
                    detail,
                ))
            }
        }
    }
}

impl Default for ConversionEngine {
    /// An engine over a registry carrying only the built-in defaults.
    fn default() -> Self {
        Self::new(StrategyRegistry::new())
    }
}
