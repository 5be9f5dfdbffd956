//! # Conversion Contexts
//!
//! A [`ConversionContext`] names where in a larger declaration a
//! conversion occurs: which type declares the assignment, which member
//! (field or method parameter) receives the value, and — for generic
//! targets — the resolved type arguments the declaration site knows.
//!
//! This is pure data threading. The engine passes the context through
//! to strategies opaquely and unmodified; strategies that do not need
//! it ignore it. A context is optional everywhere — its absence means
//! "direct value conversion, no surrounding declaration."

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::descriptor::TypeDescriptor;

/// Declaration-site metadata attached to a conversion request.
///
/// Immutable; equality is by value — a context has no identity beyond
/// its (declaring type, member, type arguments) content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionContext {
    declaring_type: String,
    member: Member,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    type_arguments: Vec<TypeDescriptor>,
}

impl ConversionContext {
    /// Context for a field assignment on `declaring_type`.
    pub fn for_field(declaring_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            declaring_type: declaring_type.into(),
            member: Member::Field { name: name.into() },
            type_arguments: Vec::new(),
        }
    }

    /// Context for a method parameter on `declaring_type`.
    pub fn for_parameter(
        declaring_type: impl Into<String>,
        method: impl Into<String>,
        index: usize,
    ) -> Self {
        Self {
            declaring_type: declaring_type.into(),
            member: Member::Parameter {
                method: method.into(),
                index,
            },
            type_arguments: Vec::new(),
        }
    }

    /// Attach resolved type arguments for a generic target.
    ///
    /// The engine uses these to narrow open (`any`) parameter slots of
    /// the target descriptor before resolution; see
    /// [`TypeDescriptor::narrowed_by`].
    pub fn with_type_arguments(mut self, arguments: Vec<TypeDescriptor>) -> Self {
        self.type_arguments = arguments;
        self
    }

    /// The type declaring the member being assigned.
    pub fn declaring_type(&self) -> &str {
        &self.declaring_type
    }

    /// The member receiving the converted value.
    pub fn member(&self) -> &Member {
        &self.member
    }

    /// Resolved type arguments for a generic target; empty when unknown.
    pub fn type_arguments(&self) -> &[TypeDescriptor] {
        &self.type_arguments
    }
}

impl fmt::Display for ConversionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.member {
            Member::Field { name } => {
                write!(f, "field `{name}` of `{}`", self.declaring_type)
            }
            Member::Parameter { method, index } => {
                write!(
                    f,
                    "parameter {index} of `{}::{method}`",
                    self.declaring_type
                )
            }
        }
    }
}

/// The member a conversion targets within its declaring type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Member {
    /// A named field.
    Field {
        /// The field name.
        name: String,
    },
    /// A positional method parameter.
    Parameter {
        /// The method name.
        method: String,
        /// Zero-based parameter position.
        index: usize,
    },
}
