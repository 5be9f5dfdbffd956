//! # refract-engine — The Refract Conversion Engine
//!
//! Converts dynamically typed [`Value`](refract_core::Value)s into
//! shapes named by [`TypeDescriptor`](refract_core::TypeDescriptor)s,
//! through a pluggable, recency-ordered registry of
//! [`ConversionStrategy`] implementations.
//!
//! ## Flow
//!
//! ```text
//! caller ──▶ ConversionEngine::convert(value, target, context?)
//!              │  narrow target from context type arguments
//!              │  null propagation / identity short-circuit
//!              ▼
//!            StrategyRegistry::resolve(value, target)
//!              │  exact scopes ▶ supertype & family scopes ▶ defaults
//!              ▼
//!            ConversionStrategy::apply(value, target, context, engine)
//!              │
//!              ▼
//!            Ok(converted)  or  classified ConversionError
//!            (NotSupported / Mismatch / Internal)
//! ```
//!
//! One registry per owning session, configured single-threaded and then
//! read many times — conversions are pure in-memory computations with
//! no retries, no I/O, and no internal concurrency.
//!
//! ## Example
//!
//! ```
//! use refract_core::{TypeDescriptor, Value};
//! use refract_engine::ConversionEngine;
//!
//! let engine = ConversionEngine::default();
//! let converted = engine
//!     .convert(Value::Text("42".into()), &TypeDescriptor::Integer)
//!     .unwrap();
//! assert_eq!(converted, Value::Int(42));
//! ```

pub mod defaults;
pub mod engine;
pub mod registry;
pub mod strategy;

// Re-export primary types.
pub use engine::ConversionEngine;
pub use registry::StrategyRegistry;
pub use strategy::{ConversionStrategy, TargetScope};
