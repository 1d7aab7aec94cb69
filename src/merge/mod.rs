//! Merge engine: reconcile a freshly loaded graph with the registry
//!
//! Planning is pure: it compares a snapshot of the durable registry
//! with a candidate graph and decides, per identifier, whether to
//! insert, update, leave untouched, or remove. Only `apply` touches
//! durable state, and it does so as a single atomic batch.
//!
//! Lenient merges keep a dangling reference identifier as written and
//! list it in `MergeReport::dangling` instead of nulling the field:
//! references resolve lazily by identifier, so a later additive sync
//! can supply the missing target without rewriting the owning record.

mod engine;

pub use engine::{
    apply, merge, plan, ConflictPolicy, MergeError, MergeOptions, MergePlan, MergeReport,
};
