//! # Target Type Descriptors
//!
//! A [`TypeDescriptor`] identifies the type a conversion should produce.
//! Descriptors form a closed tagged union — there is no runtime type
//! inspection anywhere in the engine; everything dispatches over this
//! enum plus the strategies' own applicability checks.
//!
//! ## Supertype Relation
//!
//! [`TypeDescriptor::is_supertype_of`] defines the ordering used by the
//! second resolution phase (strategies registered "for a supertype"):
//! [`Any`](TypeDescriptor::Any) sits above everything, `Sequence` and
//! `Mapping` are covariant in their parameters, and [`CustomType`]
//! descriptors form parent chains by name. The relation is reflexive.
//!
//! ## Families
//!
//! [`TypeFamily`] groups descriptors the way interfaces group classes:
//! a strategy registered for a family serves every member. Families are
//! the coarse registration granularity; exact descriptors are the fine one.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DescriptorError;

// ---------------------------------------------------------------------------
// TypeDescriptor
// ---------------------------------------------------------------------------

/// Identifies a conversion target type.
///
/// Immutable once constructed. Equality and hashing are structural;
/// parameterized targets expose their element descriptors through
/// [`element_type`](Self::element_type), [`key_type`](Self::key_type)
/// and [`value_type`](Self::value_type).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeDescriptor {
    /// The top type — every value satisfies it.
    Any,
    /// Boolean scalar target.
    Bool,
    /// Signed 64-bit integer target.
    Integer,
    /// 64-bit float target.
    Float,
    /// UTF-8 text target.
    Text,
    /// Byte payload target.
    Bytes,
    /// Sequence target with an element descriptor.
    Sequence(Box<TypeDescriptor>),
    /// String-keyed mapping target with key and value descriptors.
    Mapping {
        /// Descriptor the keys must satisfy.
        key: Box<TypeDescriptor>,
        /// Descriptor the entry values must satisfy.
        value: Box<TypeDescriptor>,
    },
    /// A named custom type, optionally part of a parent chain.
    Custom(CustomType),
}

impl TypeDescriptor {
    /// Build a sequence descriptor.
    pub fn sequence_of(element: TypeDescriptor) -> Self {
        Self::Sequence(Box::new(element))
    }

    /// Build a mapping descriptor.
    pub fn mapping_of(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        Self::Mapping {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// The family this descriptor belongs to.
    pub fn family(&self) -> TypeFamily {
        match self {
            Self::Any => TypeFamily::Any,
            Self::Bool => TypeFamily::Boolean,
            Self::Integer | Self::Float => TypeFamily::Numeric,
            Self::Text => TypeFamily::Textual,
            Self::Bytes => TypeFamily::Binary,
            Self::Sequence(_) => TypeFamily::Sequence,
            Self::Mapping { .. } => TypeFamily::Mapping,
            Self::Custom(_) => TypeFamily::Custom,
        }
    }

    /// Whether a null value is a valid inhabitant of this target.
    ///
    /// Scalar `Bool`/`Integer`/`Float` targets do not accept null;
    /// everything else does.
    pub fn accepts_null(&self) -> bool {
        !matches!(self, Self::Bool | Self::Integer | Self::Float)
    }

    /// The element descriptor of a `Sequence` target.
    pub fn element_type(&self) -> Option<&TypeDescriptor> {
        match self {
            Self::Sequence(element) => Some(element),
            _ => None,
        }
    }

    /// The key descriptor of a `Mapping` target.
    pub fn key_type(&self) -> Option<&TypeDescriptor> {
        match self {
            Self::Mapping { key, .. } => Some(key),
            _ => None,
        }
    }

    /// The value descriptor of a `Mapping` target.
    pub fn value_type(&self) -> Option<&TypeDescriptor> {
        match self {
            Self::Mapping { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Whether this descriptor sits at or above `other` in the type order.
    ///
    /// Reflexive. `Any` is above everything; `Sequence` and `Mapping`
    /// are covariant in their parameters; a custom descriptor is above
    /// another when its name appears in the other's parent chain.
    pub fn is_supertype_of(&self, other: &TypeDescriptor) -> bool {
        if self == other {
            return true;
        }
        match (self, other) {
            (Self::Any, _) => true,
            (Self::Sequence(a), Self::Sequence(b)) => a.is_supertype_of(b),
            (
                Self::Mapping { key: ak, value: av },
                Self::Mapping { key: bk, value: bv },
            ) => ak.is_supertype_of(bk) && av.is_supertype_of(bv),
            (Self::Custom(a), Self::Custom(b)) => b.has_ancestor(a.name()),
            _ => false,
        }
    }

    /// Substitute resolved type arguments into `Any` parameter slots.
    ///
    /// This is how context-driven narrowing works: a declaration site that
    /// knows its element types hands them over as type arguments, and the
    /// engine narrows `sequence<any>` or `mapping<_, any>` targets before
    /// resolution. Only `Any` slots are filled; an argument list whose
    /// arity does not match the open slots leaves the descriptor unchanged.
    pub fn narrowed_by(&self, arguments: &[TypeDescriptor]) -> TypeDescriptor {
        match (self, arguments) {
            (Self::Sequence(element), [arg]) if **element == Self::Any => {
                Self::sequence_of(arg.clone())
            }
            (Self::Mapping { key, value }, [k, v])
                if **key == Self::Any && **value == Self::Any =>
            {
                Self::mapping_of(k.clone(), v.clone())
            }
            (Self::Mapping { key, value }, [v])
                if **key != Self::Any && **value == Self::Any =>
            {
                Self::Mapping {
                    key: key.clone(),
                    value: Box::new(v.clone()),
                }
            }
            _ => self.clone(),
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "any"),
            Self::Bool => write!(f, "bool"),
            Self::Integer => write!(f, "integer"),
            Self::Float => write!(f, "float"),
            Self::Text => write!(f, "text"),
            Self::Bytes => write!(f, "bytes"),
            Self::Sequence(element) => write!(f, "sequence<{element}>"),
            Self::Mapping { key, value } => write!(f, "mapping<{key}, {value}>"),
            Self::Custom(custom) => write!(f, "{}", custom.name()),
        }
    }
}

// ---------------------------------------------------------------------------
// CustomType
// ---------------------------------------------------------------------------

/// A named custom target type with an optional parent chain.
///
/// Names validate as non-empty at construction time, so an invalid
/// descriptor cannot enter the registry. The parent chain is the
/// supertype lookup path for custom types: a strategy registered for
/// `Animal` is found when the target is `Dog` with parent `Animal`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomType {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent: Option<Box<CustomType>>,
}

impl CustomType {
    /// Create a custom type with no parent.
    pub fn new(name: impl Into<String>) -> Result<Self, DescriptorError> {
        let name = name.into();
        if name.is_empty() {
            return Err(DescriptorError::EmptyTypeName);
        }
        Ok(Self { name, parent: None })
    }

    /// Create a custom type with a parent.
    pub fn with_parent(
        name: impl Into<String>,
        parent: CustomType,
    ) -> Result<Self, DescriptorError> {
        let mut custom = Self::new(name)?;
        custom.parent = Some(Box::new(parent));
        Ok(custom)
    }

    /// The type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The direct parent, if any.
    pub fn parent(&self) -> Option<&CustomType> {
        self.parent.as_deref()
    }

    /// Whether `name` names this type or any ancestor in the parent chain.
    pub fn has_ancestor(&self, name: &str) -> bool {
        if self.name == name {
            return true;
        }
        let mut current = self.parent.as_deref();
        while let Some(ancestor) = current {
            if ancestor.name == name {
                return true;
            }
            current = ancestor.parent.as_deref();
        }
        false
    }
}

// ---------------------------------------------------------------------------
// TypeFamily
// ---------------------------------------------------------------------------

/// Coarse grouping of target descriptors for family-scoped registrations.
///
/// A strategy registered for a family serves every descriptor in it —
/// the registry consults families during the second (supertype) phase of
/// resolution. [`TypeFamily::Any`] covers every descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeFamily {
    /// Every descriptor.
    Any,
    /// `Bool`.
    Boolean,
    /// `Integer` and `Float`.
    Numeric,
    /// `Text`.
    Textual,
    /// `Bytes`.
    Binary,
    /// All `Sequence` descriptors.
    Sequence,
    /// All `Mapping` descriptors.
    Mapping,
    /// All `Custom` descriptors.
    Custom,
}

impl TypeFamily {
    /// All families as a slice.
    pub fn all() -> &'static [TypeFamily] {
        &[
            Self::Any,
            Self::Boolean,
            Self::Numeric,
            Self::Textual,
            Self::Binary,
            Self::Sequence,
            Self::Mapping,
            Self::Custom,
        ]
    }

    /// Whether `descriptor` belongs to this family.
    pub fn contains(&self, descriptor: &TypeDescriptor) -> bool {
        *self == TypeFamily::Any || *self == descriptor.family()
    }
}

impl fmt::Display for TypeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Any => "any",
            Self::Boolean => "boolean",
            Self::Numeric => "numeric",
            Self::Textual => "textual",
            Self::Binary => "binary",
            Self::Sequence => "sequence",
            Self::Mapping => "mapping",
            Self::Custom => "custom",
        };
        write!(f, "{s}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn dog() -> CustomType {
        let animal = CustomType::new("Animal").unwrap();
        CustomType::with_parent("Dog", animal).unwrap()
    }

    // ── Construction ────────────────────────────────────────────────

    #[test]
    fn custom_type_rejects_empty_name() {
        assert_eq!(CustomType::new(""), Err(DescriptorError::EmptyTypeName));
        let parent = CustomType::new("Base").unwrap();
        assert_eq!(
            CustomType::with_parent("", parent),
            Err(DescriptorError::EmptyTypeName)
        );
    }

    #[test]
    fn ancestor_lookup_walks_the_full_chain() {
        let grandparent = CustomType::new("Entity").unwrap();
        let parent = CustomType::with_parent("Animal", grandparent).unwrap();
        let child = CustomType::with_parent("Dog", parent).unwrap();
        assert!(child.has_ancestor("Dog"));
        assert!(child.has_ancestor("Animal"));
        assert!(child.has_ancestor("Entity"));
        assert!(!child.has_ancestor("Plant"));
    }

    // ── Supertype relation ──────────────────────────────────────────

    #[test]
    fn supertype_is_reflexive() {
        let descriptors = [
            TypeDescriptor::Any,
            TypeDescriptor::Bool,
            TypeDescriptor::Integer,
            TypeDescriptor::Float,
            TypeDescriptor::Text,
            TypeDescriptor::Bytes,
            TypeDescriptor::sequence_of(TypeDescriptor::Integer),
            TypeDescriptor::mapping_of(TypeDescriptor::Text, TypeDescriptor::Any),
            TypeDescriptor::Custom(dog()),
        ];
        for d in &descriptors {
            assert!(d.is_supertype_of(d), "{d} should be a supertype of itself");
        }
    }

    #[test]
    fn any_is_above_everything() {
        let descriptors = [
            TypeDescriptor::Bool,
            TypeDescriptor::Integer,
            TypeDescriptor::sequence_of(TypeDescriptor::Text),
            TypeDescriptor::Custom(dog()),
        ];
        for d in &descriptors {
            assert!(TypeDescriptor::Any.is_supertype_of(d));
            assert!(!d.is_supertype_of(&TypeDescriptor::Any), "{d} is not above any");
        }
    }

    #[test]
    fn sequences_are_covariant() {
        let seq_any = TypeDescriptor::sequence_of(TypeDescriptor::Any);
        let seq_int = TypeDescriptor::sequence_of(TypeDescriptor::Integer);
        assert!(seq_any.is_supertype_of(&seq_int));
        assert!(!seq_int.is_supertype_of(&seq_any));
        assert!(!seq_int.is_supertype_of(&TypeDescriptor::Integer));
    }

    #[test]
    fn mappings_are_covariant_componentwise() {
        let broad = TypeDescriptor::mapping_of(TypeDescriptor::Text, TypeDescriptor::Any);
        let narrow = TypeDescriptor::mapping_of(TypeDescriptor::Text, TypeDescriptor::Integer);
        assert!(broad.is_supertype_of(&narrow));
        assert!(!narrow.is_supertype_of(&broad));
    }

    #[test]
    fn custom_supertype_follows_parent_chain() {
        let animal = TypeDescriptor::Custom(CustomType::new("Animal").unwrap());
        let dog = TypeDescriptor::Custom(dog());
        assert!(animal.is_supertype_of(&dog));
        assert!(!dog.is_supertype_of(&animal));
    }

    // ── Families ────────────────────────────────────────────────────

    #[test]
    fn family_assignment_is_total() {
        assert_eq!(TypeDescriptor::Integer.family(), TypeFamily::Numeric);
        assert_eq!(TypeDescriptor::Float.family(), TypeFamily::Numeric);
        assert_eq!(TypeDescriptor::Bool.family(), TypeFamily::Boolean);
        assert_eq!(TypeDescriptor::Text.family(), TypeFamily::Textual);
        assert_eq!(TypeDescriptor::Bytes.family(), TypeFamily::Binary);
        assert_eq!(
            TypeDescriptor::sequence_of(TypeDescriptor::Any).family(),
            TypeFamily::Sequence
        );
        assert_eq!(
            TypeDescriptor::mapping_of(TypeDescriptor::Text, TypeDescriptor::Any).family(),
            TypeFamily::Mapping
        );
        assert_eq!(TypeDescriptor::Custom(dog()).family(), TypeFamily::Custom);
        assert_eq!(TypeDescriptor::Any.family(), TypeFamily::Any);
    }

    #[test]
    fn any_family_contains_every_descriptor() {
        let descriptors = [
            TypeDescriptor::Bool,
            TypeDescriptor::Integer,
            TypeDescriptor::Custom(dog()),
        ];
        for d in &descriptors {
            assert!(TypeFamily::Any.contains(d));
        }
        assert!(!TypeFamily::Numeric.contains(&TypeDescriptor::Text));
        assert!(TypeFamily::Numeric.contains(&TypeDescriptor::Float));
    }

    // ── Null acceptance ─────────────────────────────────────────────

    #[test]
    fn scalar_targets_do_not_accept_null() {
        assert!(!TypeDescriptor::Bool.accepts_null());
        assert!(!TypeDescriptor::Integer.accepts_null());
        assert!(!TypeDescriptor::Float.accepts_null());
        assert!(TypeDescriptor::Text.accepts_null());
        assert!(TypeDescriptor::sequence_of(TypeDescriptor::Bool).accepts_null());
        assert!(TypeDescriptor::Any.accepts_null());
    }

    // ── Narrowing ───────────────────────────────────────────────────

    #[test]
    fn narrowing_fills_open_sequence_slot() {
        let open = TypeDescriptor::sequence_of(TypeDescriptor::Any);
        let narrowed = open.narrowed_by(&[TypeDescriptor::Integer]);
        assert_eq!(narrowed, TypeDescriptor::sequence_of(TypeDescriptor::Integer));
    }

    #[test]
    fn narrowing_fills_open_mapping_slots() {
        let open = TypeDescriptor::mapping_of(TypeDescriptor::Any, TypeDescriptor::Any);
        let narrowed =
            open.narrowed_by(&[TypeDescriptor::Text, TypeDescriptor::Integer]);
        assert_eq!(
            narrowed,
            TypeDescriptor::mapping_of(TypeDescriptor::Text, TypeDescriptor::Integer)
        );

        let value_open = TypeDescriptor::mapping_of(TypeDescriptor::Text, TypeDescriptor::Any);
        let narrowed = value_open.narrowed_by(&[TypeDescriptor::Float]);
        assert_eq!(
            narrowed,
            TypeDescriptor::mapping_of(TypeDescriptor::Text, TypeDescriptor::Float)
        );
    }

    #[test]
    fn narrowing_ignores_mismatched_arity_and_closed_slots() {
        let closed = TypeDescriptor::sequence_of(TypeDescriptor::Integer);
        assert_eq!(closed.narrowed_by(&[TypeDescriptor::Text]), closed);

        let open = TypeDescriptor::sequence_of(TypeDescriptor::Any);
        assert_eq!(open.narrowed_by(&[]), open);
        assert_eq!(
            open.narrowed_by(&[TypeDescriptor::Text, TypeDescriptor::Bool]),
            open
        );
    }

    // ── Display ─────────────────────────────────────────────────────

    #[test]
    fn display_renders_parameterized_targets() {
        assert_eq!(
            TypeDescriptor::sequence_of(TypeDescriptor::Integer).to_string(),
            "sequence<integer>"
        );
        assert_eq!(
            TypeDescriptor::mapping_of(TypeDescriptor::Text, TypeDescriptor::Any).to_string(),
            "mapping<text, any>"
        );
        assert_eq!(TypeDescriptor::Custom(dog()).to_string(), "Dog");
    }

    // ── Serde ───────────────────────────────────────────────────────

    #[test]
    fn serde_roundtrip() {
        let descriptors = [
            TypeDescriptor::Any,
            TypeDescriptor::sequence_of(TypeDescriptor::Integer),
            TypeDescriptor::mapping_of(TypeDescriptor::Text, TypeDescriptor::Float),
            TypeDescriptor::Custom(dog()),
        ];
        for d in &descriptors {
            let json = serde_json::to_string(d).unwrap();
            let back: TypeDescriptor = serde_json::from_str(&json).unwrap();
            assert_eq!(*d, back);
        }
    }
}
