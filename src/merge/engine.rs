//! Plan and apply the per-identifier difference between graph and registry

use crate::record::{FieldValue, Record, RecordGraph, RecordId};
use crate::storage::{RegistryStore, StorageError, StoreOp};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;
use tracing::{debug, warn};

/// What to do when an identifier exists on both sides with different
/// field values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictPolicy {
    /// The new graph's record replaces the stored one
    #[default]
    Overwrite,
    /// The stored record is kept as-is
    SkipExisting,
}

/// Merge behavior toggles
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeOptions {
    /// Delete identifiers the new graph neither defines nor still
    /// references. Off by default: registry releases are additive.
    pub remove_missing: bool,
    pub on_conflict: ConflictPolicy,
    /// Fail when a reference resolves to neither a record defined by
    /// the graph nor one already in the registry. Lenient merges report
    /// such references in `MergeReport::dangling` instead.
    pub strict: bool,
}

impl MergeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remove_missing(mut self) -> Self {
        self.remove_missing = true;
        self
    }

    pub fn skip_existing(mut self) -> Self {
        self.on_conflict = ConflictPolicy::SkipExisting;
        self
    }

    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }
}

/// Errors raised while planning or applying a merge
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("{identifier}: reference target {target} exists neither in the graph nor the registry")]
    UnresolvedReference {
        identifier: RecordId,
        target: RecordId,
    },

    /// Storage failure; the batch was rolled back and the registry is
    /// unchanged
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Per-identifier outcome of a merge, with counts derivable from the
/// list lengths
#[derive(Debug, Default, Clone)]
pub struct MergeReport {
    pub inserted: Vec<RecordId>,
    pub updated: Vec<RecordId>,
    pub unchanged: Vec<RecordId>,
    pub removed: Vec<RecordId>,
    /// (owner, target) pairs whose target is known nowhere; empty in
    /// strict mode, which fails instead. The owner keeps the identifier
    /// as written so a later sync can supply the target.
    pub dangling: Vec<(RecordId, RecordId)>,
}

impl MergeReport {
    /// True when the merge wrote nothing
    pub fn is_noop(&self) -> bool {
        self.inserted.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }
}

/// A computed merge: the mutation batch plus the report describing it
#[derive(Debug)]
pub struct MergePlan {
    ops: Vec<StoreOp>,
    report: MergeReport,
}

impl MergePlan {
    pub fn report(&self) -> &MergeReport {
        &self.report
    }
}

/// Compute the difference between a registry snapshot and a candidate
/// graph.
///
/// Reference fields hold identifiers rather than pointers, so a
/// reference into the existing registry keeps resolving to the
/// registry's canonical record; nothing is repointed at transient graph
/// instances. Records the graph merely interned as placeholders are
/// never written and never clobber a stored record.
pub fn plan(
    snapshot: &BTreeMap<RecordId, Record>,
    graph: &RecordGraph,
    options: &MergeOptions,
) -> Result<MergePlan, MergeError> {
    let mut report = MergeReport::default();
    let mut ops = Vec::new();

    // removals are decided first so that reference checks run against
    // the registry as it will be after the merge. An identifier the
    // graph still references stays even when its defining element is
    // absent from the export.
    let mut removed: BTreeSet<&RecordId> = BTreeSet::new();
    if options.remove_missing {
        for id in snapshot.keys() {
            if !graph.contains(id) {
                removed.insert(id);
            }
        }
    }
    let resolvable = |target: &RecordId| {
        graph.is_defined(target) || (snapshot.contains_key(target) && !removed.contains(target))
    };

    for (id, record) in graph.iter() {
        if !record.populated {
            continue;
        }
        // every reference must have a target somewhere in the union of
        // graph and post-removal registry
        for target in reference_targets(record) {
            if !resolvable(target) {
                if options.strict {
                    return Err(MergeError::UnresolvedReference {
                        identifier: id.clone(),
                        target: target.clone(),
                    });
                }
                warn!(identifier = %id, %target, "dangling reference");
                report.dangling.push((id.clone(), target.clone()));
            }
        }

        match snapshot.get(id) {
            None => {
                report.inserted.push(id.clone());
                ops.push(StoreOp::Upsert(record.clone()));
            }
            Some(existing) if existing == record => {
                report.unchanged.push(id.clone());
            }
            Some(_) => match options.on_conflict {
                ConflictPolicy::Overwrite => {
                    report.updated.push(id.clone());
                    ops.push(StoreOp::Upsert(record.clone()));
                }
                ConflictPolicy::SkipExisting => {
                    report.unchanged.push(id.clone());
                }
            },
        }
    }

    // surviving records the graph did not redefine keep their stored
    // reference fields; removals must not strand those either. Gated on
    // remove_missing: without removals this merge cannot strand anyone,
    // and a reference left dangling by an earlier lenient sync is not
    // this merge's doing.
    if options.remove_missing {
        for (id, record) in snapshot {
            if removed.contains(id) || graph.is_defined(id) {
                continue;
            }
            for target in reference_targets(record) {
                if !resolvable(target) {
                    if options.strict {
                        return Err(MergeError::UnresolvedReference {
                            identifier: id.clone(),
                            target: target.clone(),
                        });
                    }
                    warn!(identifier = %id, %target, "removal strands a stored reference");
                    report.dangling.push((id.clone(), target.clone()));
                }
            }
        }
    }

    for id in removed {
        report.removed.push(id.clone());
        ops.push(StoreOp::Delete(id.clone()));
    }

    Ok(MergePlan { ops, report })
}

/// Commit a plan through the storage capability as one atomic batch.
///
/// On storage failure the batch rolls back and the registry keeps its
/// prior state; the error is surfaced, not retried.
pub fn apply(plan: MergePlan, store: &dyn RegistryStore) -> Result<MergeReport, MergeError> {
    if !plan.ops.is_empty() {
        store.apply(&plan.ops)?;
    }
    debug!(
        inserted = plan.report.inserted.len(),
        updated = plan.report.updated.len(),
        unchanged = plan.report.unchanged.len(),
        removed = plan.report.removed.len(),
        "merge applied"
    );
    Ok(plan.report)
}

/// Snapshot, plan, and apply in one step
pub fn merge(
    store: &dyn RegistryStore,
    graph: &RecordGraph,
    options: &MergeOptions,
) -> Result<MergeReport, MergeError> {
    let snapshot: BTreeMap<RecordId, Record> = store
        .all()?
        .into_iter()
        .map(|record| (record.id.clone(), record))
        .collect();
    let plan = plan(&snapshot, graph, options)?;
    apply(plan, store)
}

fn reference_targets(record: &Record) -> impl Iterator<Item = &RecordId> {
    record.fields.values().flat_map(|value| match value {
        FieldValue::Reference(id) => std::slice::from_ref(id),
        FieldValue::References(ids) => ids.as_slice(),
        _ => &[],
    })
}
