//! Type catalog: the modeled subset of the registry schema
//!
//! Maps element tag names to static descriptors saying which fields a
//! record kind carries and how each one is populated. The catalog is a
//! compile-time table; the registry schema it mirrors is deliberately
//! partial, so `describe` returning `None` means "skip this element",
//! never an error.

mod descriptor;

pub use descriptor::{describe, FieldDescriptor, FieldKind, RecordKind, ScalarKind, TypeDescriptor};
