//! # Error Hierarchy
//!
//! Structured error types for the conversion engine, built with
//! `thiserror`. No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! The load-bearing distinction is three-way:
//!
//! - [`ConversionError::NotSupported`] — no registered or default
//!   strategy claims the (source, target) pair;
//! - [`ConversionError::Mismatch`] — a strategy recognized the pair but
//!   the concrete value was invalid for it;
//! - [`ConversionError::Internal`] — a strategy failed outside its
//!   declared contract. Never merged into `Mismatch`, so a buggy
//!   strategy stays visibly distinguishable from invalid input.
//!
//! Every error carries the original value, the attempted target, and
//! the declaration context when one was supplied — callers branch on
//! [`ConversionError::kind`] programmatically, never on message text.

use thiserror::Error;

use crate::context::ConversionContext;
use crate::descriptor::TypeDescriptor;
use crate::value::Value;

// ---------------------------------------------------------------------------
// ConversionError
// ---------------------------------------------------------------------------

/// A classified conversion failure.
///
/// Each variant carries the full diagnostic triple — offending value,
/// attempted target, declaration context — so a caller can pinpoint the
/// failing assignment without re-deriving it from a stack trace.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// No registered or default strategy claims this (source, target) pair.
    #[error("no conversion strategy from {} to {target}{}", .value.kind(), context_suffix(.context))]
    NotSupported {
        /// The value that could not be converted.
        value: Value,
        /// The requested target type.
        target: TypeDescriptor,
        /// Declaration context, when the caller supplied one.
        context: Option<ConversionContext>,
    },

    /// A strategy recognized the pair but rejected this concrete value.
    #[error("cannot convert {value} to {target}: {reason}{}", context_suffix(.context))]
    Mismatch {
        /// The rejected value.
        value: Value,
        /// The requested target type.
        target: TypeDescriptor,
        /// Declaration context, when the caller supplied one.
        context: Option<ConversionContext>,
        /// Why the strategy rejected the value.
        reason: String,
    },

    /// A strategy failed outside its declared contract.
    #[error("conversion fault targeting {target}: {detail}{}", context_suffix(.context))]
    Internal {
        /// The value being converted when the fault occurred.
        value: Value,
        /// The requested target type.
        target: TypeDescriptor,
        /// Declaration context, when the caller supplied one.
        context: Option<ConversionContext>,
        /// Description of the fault.
        detail: String,
    },
}

impl ConversionError {
    /// Build a `NotSupported` failure.
    pub fn not_supported(
        value: Value,
        target: TypeDescriptor,
        context: Option<ConversionContext>,
    ) -> Self {
        Self::NotSupported {
            value,
            target,
            context,
        }
    }

    /// Build a `Mismatch` failure.
    pub fn mismatch(
        value: Value,
        target: TypeDescriptor,
        context: Option<ConversionContext>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Mismatch {
            value,
            target,
            context,
            reason: reason.into(),
        }
    }

    /// Build an `Internal` failure.
    pub fn internal(
        value: Value,
        target: TypeDescriptor,
        context: Option<ConversionContext>,
        detail: impl Into<String>,
    ) -> Self {
        Self::Internal {
            value,
            target,
            context,
            detail: detail.into(),
        }
    }

    /// The classification of this failure.
    pub fn kind(&self) -> ConversionErrorKind {
        match self {
            Self::NotSupported { .. } => ConversionErrorKind::NotSupported,
            Self::Mismatch { .. } => ConversionErrorKind::Mismatch,
            Self::Internal { .. } => ConversionErrorKind::Internal,
        }
    }

    /// The original value the conversion was attempted on.
    pub fn value(&self) -> &Value {
        match self {
            Self::NotSupported { value, .. }
            | Self::Mismatch { value, .. }
            | Self::Internal { value, .. } => value,
        }
    }

    /// The target type the conversion was attempted against.
    pub fn target(&self) -> &TypeDescriptor {
        match self {
            Self::NotSupported { target, .. }
            | Self::Mismatch { target, .. }
            | Self::Internal { target, .. } => target,
        }
    }

    /// The declaration context, when one was supplied.
    pub fn context(&self) -> Option<&ConversionContext> {
        match self {
            Self::NotSupported { context, .. }
            | Self::Mismatch { context, .. }
            | Self::Internal { context, .. } => context.as_ref(),
        }
    }
}

/// The three-way failure classification, as a standalone tag for
/// programmatic branching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionErrorKind {
    /// No mechanism exists for the requested conversion.
    NotSupported,
    /// A mechanism existed but the specific value was invalid for it.
    Mismatch,
    /// A strategy failed outside its declared contract.
    Internal,
}

impl std::fmt::Display for ConversionErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::NotSupported => "not_supported",
            Self::Mismatch => "mismatch",
            Self::Internal => "internal",
        };
        write!(f, "{s}")
    }
}

fn context_suffix(context: &Option<ConversionContext>) -> String {
    match context {
        Some(ctx) => format!(" (at {ctx})"),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// StrategyError
// ---------------------------------------------------------------------------

/// A failure reported by a single conversion strategy.
///
/// The variant determines the final classification the engine surfaces:
/// `Unsupported` becomes [`ConversionError::NotSupported`], `Rejected`
/// becomes [`ConversionError::Mismatch`], and `Fault` becomes
/// [`ConversionError::Internal`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StrategyError {
    /// The strategy does not know how to handle this (source, target) pair.
    #[error("strategy does not support this source/target pair")]
    Unsupported,

    /// The strategy recognized the pair but this concrete value is invalid.
    #[error("value rejected: {reason}")]
    Rejected {
        /// Why the value was rejected.
        reason: String,
    },

    /// The strategy failed in a way outside its declared contract.
    #[error("strategy fault: {detail}")]
    Fault {
        /// Description of the fault.
        detail: String,
    },
}

impl StrategyError {
    /// Build a `Rejected` error.
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }

    /// Build a `Fault` error.
    pub fn fault(detail: impl Into<String>) -> Self {
        Self::Fault {
            detail: detail.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// DescriptorError
// ---------------------------------------------------------------------------

/// Validation errors for type descriptor construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DescriptorError {
    /// Custom type names must be non-empty.
    #[error("invalid custom type name: must be non-empty")]
    EmptyTypeName,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn mismatch_with_context() -> ConversionError {
        ConversionError::mismatch(
            Value::Text("abc".into()),
            TypeDescriptor::Integer,
            Some(ConversionContext::for_field("AppConfig", "retries")),
            "\"abc\" is not a valid integer",
        )
    }

    // ── Classification ──────────────────────────────────────────────

    #[test]
    fn kind_matches_variant() {
        let ns = ConversionError::not_supported(Value::Int(1), TypeDescriptor::Bool, None);
        let mm = mismatch_with_context();
        let int = ConversionError::internal(
            Value::Int(1),
            TypeDescriptor::Bool,
            None,
            "strategy produced text for target bool",
        );
        assert_eq!(ns.kind(), ConversionErrorKind::NotSupported);
        assert_eq!(mm.kind(), ConversionErrorKind::Mismatch);
        assert_eq!(int.kind(), ConversionErrorKind::Internal);
    }

    #[test]
    fn accessors_expose_the_diagnostic_triple() {
        let err = mismatch_with_context();
        assert_eq!(err.value(), &Value::Text("abc".into()));
        assert_eq!(err.target(), &TypeDescriptor::Integer);
        assert_eq!(
            err.context().map(|c| c.declaring_type()),
            Some("AppConfig")
        );
    }

    // ── Display ─────────────────────────────────────────────────────

    #[test]
    fn not_supported_display_names_source_and_target() {
        let err = ConversionError::not_supported(
            Value::Text("42".into()),
            TypeDescriptor::Bool,
            None,
        );
        let msg = err.to_string();
        assert!(msg.contains("no conversion strategy"));
        assert!(msg.contains("text"));
        assert!(msg.contains("bool"));
    }

    #[test]
    fn mismatch_display_carries_value_reason_and_context() {
        let msg = mismatch_with_context().to_string();
        assert!(msg.contains("\"abc\""));
        assert!(msg.contains("integer"));
        assert!(msg.contains("not a valid integer"));
        assert!(msg.contains("field `retries` of `AppConfig`"));
    }

    #[test]
    fn internal_display_is_distinct_from_mismatch() {
        let err = ConversionError::internal(
            Value::Int(1),
            TypeDescriptor::Text,
            None,
            "strategy `broken` produced bytes for target text",
        );
        let msg = err.to_string();
        assert!(msg.contains("conversion fault"));
        assert!(!msg.contains("cannot convert"));
    }

    #[test]
    fn context_suffix_is_omitted_without_context() {
        let err =
            ConversionError::not_supported(Value::Null, TypeDescriptor::Text, None);
        assert!(!err.to_string().contains(" (at "));
    }

    // ── StrategyError ───────────────────────────────────────────────

    #[test]
    fn strategy_error_display() {
        assert_eq!(
            StrategyError::Unsupported.to_string(),
            "strategy does not support this source/target pair"
        );
        assert_eq!(
            StrategyError::rejected("bad format").to_string(),
            "value rejected: bad format"
        );
        assert_eq!(
            StrategyError::fault("poisoned state").to_string(),
            "strategy fault: poisoned state"
        );
    }

    #[test]
    fn descriptor_error_display() {
        assert!(DescriptorError::EmptyTypeName
            .to_string()
            .contains("non-empty"));
    }
}
