//! # Runtime Values
//!
//! Dynamically typed values as they arrive at the conversion engine.
//! A [`Value`] is an opaque runtime representation with no structural
//! constraints — it may be null, a scalar, a collection, or a named
//! record. [`ValueKind`] is the corresponding kind tag used by
//! applicability checks, which must be decidable from the value's shape
//! alone without inspecting its contents.
//!
//! ## Assignability
//!
//! [`Value::satisfies`] decides whether a value already has the shape a
//! [`TypeDescriptor`] requires. This is the relation behind the engine's
//! identity short-circuit and its output postcondition: a conversion
//! only succeeds with a value for which `satisfies` holds.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::descriptor::TypeDescriptor;

// ---------------------------------------------------------------------------
// Value
// ---------------------------------------------------------------------------

/// A dynamically typed runtime value.
///
/// Values are immutable inputs to the conversion engine. Equality is
/// structural; floats compare by IEEE semantics (`NaN != NaN`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    /// Explicit null marker.
    Null,
    /// Boolean scalar.
    Bool(bool),
    /// Signed 64-bit integer scalar.
    Int(i64),
    /// 64-bit float scalar.
    Float(f64),
    /// UTF-8 text.
    Text(String),
    /// Opaque byte payload.
    Bytes(Vec<u8>),
    /// Ordered sequence of values.
    List(Vec<Value>),
    /// String-keyed mapping with deterministic iteration order.
    Map(BTreeMap<String, Value>),
    /// Named record with string-keyed fields.
    Record(RecordValue),
}

impl Value {
    /// The kind tag for this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Text(_) => ValueKind::Text,
            Value::Bytes(_) => ValueKind::Bytes,
            Value::List(_) => ValueKind::List,
            Value::Map(_) => ValueKind::Map,
            Value::Record(_) => ValueKind::Record,
        }
    }

    /// Whether this value is the explicit null marker.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether this value already has the shape `target` requires.
    ///
    /// Rules:
    /// - every value satisfies [`TypeDescriptor::Any`];
    /// - `Null` satisfies exactly the null-accepting targets
    ///   (see [`TypeDescriptor::accepts_null`]);
    /// - scalars satisfy their own descriptor only — an `Int` does not
    ///   satisfy `Float` (widening is a conversion, not an identity);
    /// - a `List` satisfies `Sequence(t)` when every element satisfies `t`;
    /// - a `Map` satisfies `Mapping { key, value }` when the key descriptor
    ///   is `Text` or `Any` (keys are strings in this value model) and
    ///   every entry value satisfies `value`;
    /// - a `Record` satisfies `Custom(c)` on exact type-name equality.
    ///   Parent chains affect strategy resolution, not assignability —
    ///   the value does not know its ancestors, the descriptor does.
    pub fn satisfies(&self, target: &TypeDescriptor) -> bool {
        match (self, target) {
            (_, TypeDescriptor::Any) => true,
            (Value::Null, t) => t.accepts_null(),
            (Value::Bool(_), TypeDescriptor::Bool) => true,
            (Value::Int(_), TypeDescriptor::Integer) => true,
            (Value::Float(_), TypeDescriptor::Float) => true,
            (Value::Text(_), TypeDescriptor::Text) => true,
            (Value::Bytes(_), TypeDescriptor::Bytes) => true,
            (Value::List(items), TypeDescriptor::Sequence(element)) => {
                items.iter().all(|item| item.satisfies(element))
            }
            (Value::Map(entries), TypeDescriptor::Mapping { key, value }) => {
                matches!(**key, TypeDescriptor::Text | TypeDescriptor::Any)
                    && entries.values().all(|entry| entry.satisfies(value))
            }
            (Value::Record(record), TypeDescriptor::Custom(custom)) => {
                record.type_name() == custom.name()
            }
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => write!(f, "{s:?}"),
            Value::Bytes(bytes) => write!(f, "<{} bytes>", bytes.len()),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key:?}: {value}")?;
                }
                write!(f, "}}")
            }
            Value::Record(record) => write!(f, "{record}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

// ---------------------------------------------------------------------------
// RecordValue
// ---------------------------------------------------------------------------

/// A named record value with string-keyed fields.
///
/// Records are how custom object representations enter the engine. The
/// type name is matched against [`CustomType`](crate::descriptor::CustomType)
/// descriptors during assignability checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordValue {
    type_name: String,
    fields: BTreeMap<String, Value>,
}

impl RecordValue {
    /// Create an empty record of the given type.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Add a field, replacing any existing field of the same name.
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// The record's type name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// All fields in deterministic (sorted) order.
    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }
}

impl fmt::Display for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.type_name)?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, " {name}: {value}")?;
        }
        write!(f, " }}")
    }
}

// ---------------------------------------------------------------------------
// ValueKind
// ---------------------------------------------------------------------------

/// The kind tag of a [`Value`].
///
/// Applicability checks operate on kinds, not full values — a strategy
/// decides whether it serves a (source kind, target descriptor) pair
/// before it ever sees the concrete value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// The null marker.
    Null,
    /// Boolean scalar.
    Bool,
    /// Signed integer scalar.
    Int,
    /// Float scalar.
    Float,
    /// UTF-8 text.
    Text,
    /// Byte payload.
    Bytes,
    /// Sequence of values.
    List,
    /// String-keyed mapping.
    Map,
    /// Named record.
    Record,
}

impl ValueKind {
    /// All value kinds as a slice, for exhaustive iteration in checks.
    pub fn all() -> &'static [ValueKind] {
        &[
            Self::Null,
            Self::Bool,
            Self::Int,
            Self::Float,
            Self::Text,
            Self::Bytes,
            Self::List,
            Self::Map,
            Self::Record,
        ]
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Text => "text",
            Self::Bytes => "bytes",
            Self::List => "list",
            Self::Map => "map",
            Self::Record => "record",
        };
        write!(f, "{s}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
