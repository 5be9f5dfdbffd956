//! # Built-in Default Strategies
//!
//! The fallback conversions every registry carries unless constructed
//! with [`StrategyRegistry::empty`](crate::registry::StrategyRegistry::empty).
//! Defaults are consulted after every explicit registration, in the
//! fixed order of [`built_in`].
//!
//! ## Classification Discipline
//!
//! Each strategy documents exactly which conditions it reports as
//! `Unsupported` (no mechanism — surfaces as `NotSupported`) and which
//! as `Rejected` (mechanism exists, value invalid — surfaces as
//! `Mismatch`). There is no umbrella rule; the enumeration per strategy
//! is the contract.

use std::collections::BTreeMap;

use refract_core::{
    ConversionContext, ConversionError, StrategyError, TypeDescriptor, Value, ValueKind,
};

use crate::engine::ConversionEngine;
use crate::strategy::ConversionStrategy;

/// The default strategies in resolution order: text parsing, numeric
/// coercion, sequence conversion, mapping conversion, identity.
pub fn built_in() -> Vec<Box<dyn ConversionStrategy>> {
    vec![
        Box::new(TextParseStrategy),
        Box::new(NumericCoercionStrategy),
        Box::new(SequenceStrategy),
        Box::new(MappingStrategy),
        Box::new(IdentityStrategy),
    ]
}

/// Map a nested conversion failure back into this strategy's own error,
/// preserving the classification: a nested mismatch is a rejection of
/// the composite value, a nested not-supported means the composite pair
/// has no mechanism, and a nested fault stays a fault.
fn nested_error(label: &str, error: ConversionError) -> StrategyError {
    match error {
        ConversionError::NotSupported { .. } => StrategyError::Unsupported,
        ConversionError::Mismatch { reason, .. } => {
            StrategyError::rejected(format!("{label}: {reason}"))
        }
        ConversionError::Internal { detail, .. } => {
            StrategyError::fault(format!("{label}: {detail}"))
        }
    }
}

// ---------------------------------------------------------------------------
// TextParseStrategy
// ---------------------------------------------------------------------------

/// Parses text into scalar targets.
///
/// Applicable to `Text` sources with a `Bool`, `Integer`, or `Float`
/// target. Input is trimmed before parsing.
///
/// `Rejected` when: the boolean token is not one of
/// `true/false/yes/no/on/off/1/0` (case-insensitive); the integer fails
/// a signed 64-bit parse; the float fails a 64-bit parse. Empty or
/// whitespace-only text is `Rejected` for all three targets.
/// Any other pair is `Unsupported`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextParseStrategy;

impl ConversionStrategy for TextParseStrategy {
    fn name(&self) -> &str {
        "text-parse"
    }

    fn applicable(&self, source: ValueKind, target: &TypeDescriptor) -> bool {
        source == ValueKind::Text
            && matches!(
                target,
                TypeDescriptor::Bool | TypeDescriptor::Integer | TypeDescriptor::Float
            )
    }

    fn apply(
        &self,
        value: &Value,
        target: &TypeDescriptor,
        _context: Option<&ConversionContext>,
        _engine: &ConversionEngine,
    ) -> Result<Value, StrategyError> {
        let Value::Text(raw) = value else {
            return Err(StrategyError::Unsupported);
        };
        let token = raw.trim();
        match target {
            TypeDescriptor::Bool => parse_bool_token(token).map(Value::Bool).ok_or_else(|| {
                StrategyError::rejected(format!("{raw:?} is not a recognized boolean token"))
            }),
            TypeDescriptor::Integer => token.parse::<i64>().map(Value::Int).map_err(|_| {
                StrategyError::rejected(format!("{raw:?} is not a valid integer"))
            }),
            TypeDescriptor::Float => token.parse::<f64>().map(Value::Float).map_err(|_| {
                StrategyError::rejected(format!("{raw:?} is not a valid number"))
            }),
            _ => Err(StrategyError::Unsupported),
        }
    }
}

/// Accepted boolean vocabulary, case-insensitive.
fn parse_bool_token(token: &str) -> Option<bool> {
    match token.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// NumericCoercionStrategy
// ---------------------------------------------------------------------------

/// Coerces between the numeric scalars.
///
/// Applicable to `Int` → `Float` (widening; may round to the nearest
/// representable 64-bit float) and `Float` → `Integer` (narrowing).
///
/// Narrowing is `Rejected` when the float is not finite, carries a
/// fractional part, or falls outside the signed 64-bit range — the
/// value must survive the round trip unchanged. Any other pair is
/// `Unsupported`; in particular booleans are not numbers here.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericCoercionStrategy;

impl ConversionStrategy for NumericCoercionStrategy {
    fn name(&self) -> &str {
        "numeric-coercion"
    }

    fn applicable(&self, source: ValueKind, target: &TypeDescriptor) -> bool {
        matches!(
            (source, target),
            (ValueKind::Int, TypeDescriptor::Float) | (ValueKind::Float, TypeDescriptor::Integer)
        )
    }

    fn apply(
        &self,
        value: &Value,
        target: &TypeDescriptor,
        _context: Option<&ConversionContext>,
        _engine: &ConversionEngine,
    ) -> Result<Value, StrategyError> {
        match (value, target) {
            (Value::Int(i), TypeDescriptor::Float) => Ok(Value::Float(*i as f64)),
            (Value::Float(x), TypeDescriptor::Integer) => {
                if !x.is_finite() {
                    return Err(StrategyError::rejected(format!("{x} is not a finite number")));
                }
                if x.fract() != 0.0 {
                    return Err(StrategyError::rejected(format!(
                        "{x} has a fractional part"
                    )));
                }
                // i64::MAX as f64 rounds up to 2^63, so >= keeps the cast exact.
                if *x < i64::MIN as f64 || *x >= i64::MAX as f64 {
                    return Err(StrategyError::rejected(format!(
                        "{x} is out of range for a 64-bit integer"
                    )));
                }
                Ok(Value::Int(*x as i64))
            }
            _ => Err(StrategyError::Unsupported),
        }
    }
}

// ---------------------------------------------------------------------------
// SequenceStrategy
// ---------------------------------------------------------------------------

/// Element-wise conversion into sequence targets.
///
/// Applicable to `List` and `Null` sources with a `Sequence` target.
/// Null converts to the empty sequence. Each element converts through
/// the engine against the element descriptor, so explicit registrations
/// apply to elements too; the declaration context is not forwarded —
/// it describes the outer declaration, not its elements.
///
/// Per-element failures keep their classification via [`nested_error`]:
/// element mismatch → `Rejected` naming the element index, element
/// not-supported → `Unsupported`, element fault → `Fault`. A non-list,
/// non-null source is `Unsupported`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceStrategy;

impl ConversionStrategy for SequenceStrategy {
    fn name(&self) -> &str {
        "sequence"
    }

    fn applicable(&self, source: ValueKind, target: &TypeDescriptor) -> bool {
        matches!(target, TypeDescriptor::Sequence(_))
            && matches!(source, ValueKind::List | ValueKind::Null)
    }

    fn apply(
        &self,
        value: &Value,
        target: &TypeDescriptor,
        _context: Option<&ConversionContext>,
        engine: &ConversionEngine,
    ) -> Result<Value, StrategyError> {
        let Some(element) = target.element_type() else {
            return Err(StrategyError::Unsupported);
        };
        match value {
            Value::Null => Ok(Value::List(Vec::new())),
            Value::List(items) => {
                let mut converted = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    match engine.convert(item.clone(), element) {
                        Ok(v) => converted.push(v),
                        Err(err) => {
                            return Err(nested_error(&format!("element {index}"), err))
                        }
                    }
                }
                Ok(Value::List(converted))
            }
            _ => Err(StrategyError::Unsupported),
        }
    }
}

// ---------------------------------------------------------------------------
// MappingStrategy
// ---------------------------------------------------------------------------

/// Entry-wise conversion into mapping targets.
///
/// Applicable to `Map` and `Null` sources with a `Mapping` target.
/// Null converts to the empty mapping. Keys are strings in this value
/// model, so a key descriptor other than `Text` or `Any` is
/// `Unsupported`. Entry values convert through the engine against the
/// value descriptor; per-entry failures keep their classification via
/// [`nested_error`], naming the entry key.
#[derive(Debug, Clone, Copy, Default)]
pub struct MappingStrategy;

impl ConversionStrategy for MappingStrategy {
    fn name(&self) -> &str {
        "mapping"
    }

    fn applicable(&self, source: ValueKind, target: &TypeDescriptor) -> bool {
        matches!(target, TypeDescriptor::Mapping { .. })
            && matches!(source, ValueKind::Map | ValueKind::Null)
    }

    fn apply(
        &self,
        value: &Value,
        target: &TypeDescriptor,
        _context: Option<&ConversionContext>,
        engine: &ConversionEngine,
    ) -> Result<Value, StrategyError> {
        let (Some(key), Some(value_descriptor)) = (target.key_type(), target.value_type())
        else {
            return Err(StrategyError::Unsupported);
        };
        if !matches!(key, TypeDescriptor::Text | TypeDescriptor::Any) {
            return Err(StrategyError::Unsupported);
        }
        match value {
            Value::Null => Ok(Value::Map(BTreeMap::new())),
            Value::Map(entries) => {
                let mut converted = BTreeMap::new();
                for (entry_key, entry_value) in entries {
                    match engine.convert(entry_value.clone(), value_descriptor) {
                        Ok(v) => {
                            converted.insert(entry_key.clone(), v);
                        }
                        Err(err) => {
                            return Err(nested_error(&format!("entry {entry_key:?}"), err))
                        }
                    }
                }
                Ok(Value::Map(converted))
            }
            _ => Err(StrategyError::Unsupported),
        }
    }
}

// ---------------------------------------------------------------------------
// IdentityStrategy
// ---------------------------------------------------------------------------

/// Passes through values that already satisfy the target.
///
/// Last of the defaults. The engine's identity short-circuit usually
/// returns such values before resolution ever runs; this strategy keeps
/// the registry complete for callers resolving strategies directly.
/// Applicability is kind-level (a `List` source is applicable to any
/// `Sequence` target); `apply` is `Unsupported` when the concrete value
/// does not satisfy the target. Never `Rejected`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityStrategy;

impl ConversionStrategy for IdentityStrategy {
    fn name(&self) -> &str {
        "identity"
    }

    fn applicable(&self, source: ValueKind, target: &TypeDescriptor) -> bool {
        match target {
            TypeDescriptor::Any => true,
            TypeDescriptor::Bool => source == ValueKind::Bool,
            TypeDescriptor::Integer => source == ValueKind::Int,
            TypeDescriptor::Float => source == ValueKind::Float,
            TypeDescriptor::Text => source == ValueKind::Text,
            TypeDescriptor::Bytes => source == ValueKind::Bytes,
            TypeDescriptor::Sequence(_) => source == ValueKind::List,
            TypeDescriptor::Mapping { .. } => source == ValueKind::Map,
            TypeDescriptor::Custom(_) => source == ValueKind::Record,
        }
    }

    fn apply(
        &self,
        value: &Value,
        target: &TypeDescriptor,
        _context: Option<&ConversionContext>,
        _engine: &ConversionEngine,
    ) -> Result<Value, StrategyError> {
        if value.satisfies(target) {
            Ok(value.clone())
        } else {
            Err(StrategyError::Unsupported)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
