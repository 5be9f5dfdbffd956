#![deny(missing_docs)]

//! # refract-core — Foundational Types for the Refract Conversion Engine
//!
//! This crate defines the types every other crate in the workspace
//! depends on. It has no internal crate dependencies — only `serde`
//! and `thiserror` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **A closed value model.** [`Value`] is the single dynamically
//!    typed runtime representation; [`ValueKind`] is its kind tag.
//!    Applicability checks dispatch over kinds and descriptors — there
//!    is no runtime type inspection anywhere in the engine.
//!
//! 2. **Descriptors are data.** [`TypeDescriptor`] is an immutable
//!    tagged union with structural equality, a supertype relation for
//!    resolution, and open (`any`) slots that declaration contexts can
//!    narrow.
//!
//! 3. **[`ConversionError`] hierarchy.** Structured errors with
//!    `thiserror` — no `Box<dyn Error>`, no `.unwrap()` outside tests.
//!    The three-way `NotSupported` / `Mismatch` / `Internal`
//!    classification is the contract downstream logic branches on.

pub mod context;
pub mod descriptor;
pub mod error;
pub mod value;

// Re-export primary types at crate root for ergonomic imports.
pub use context::{ConversionContext, Member};
pub use descriptor::{CustomType, TypeDescriptor, TypeFamily};
pub use error::{ConversionError, ConversionErrorKind, DescriptorError, StrategyError};
pub use value::{RecordValue, Value, ValueKind};
