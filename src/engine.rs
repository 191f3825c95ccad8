//! Connectivity engine: breadth-first grouping over the implicit row graph.
//!
//! Rows are nodes; two rows share an edge when some column holds equal values in both.
//! The graph is never materialized. Instead the engine walks it through the
//! [`ColumnIndex`], pruning buckets as rows are absorbed:
//!
//! 1. take the lowest-index unassigned row as the seed of a new group;
//! 2. for each present cell of the row at the head of the queue, prune the matching
//!    bucket, taking every pending row whose value the domain confirms as equal;
//! 3. taken rows are assigned to the group and queued for their own expansion;
//! 4. when the queue drains the group is final; repeat until all rows are assigned.
//!
//! Rows with no present cells can never be reached and end up as singleton groups.

use crate::domain::NumericDomain;
use crate::index::{Candidate, ColumnIndex};
use crate::table::RowTable;
use log::debug;
use serde::Serialize;
use std::collections::VecDeque;

/// Identifier of a finalized group; discovery order, starting at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct GroupId(pub usize);

/// Partition of all row indices into groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grouping {
    groups: Vec<Vec<usize>>,
    assignment: Vec<GroupId>,
}

impl Grouping {
    /// Groups in discovery order; members in ascending row index.
    pub fn groups(&self) -> &[Vec<usize>] {
        &self.groups
    }

    /// Group of row `row`.
    ///
    /// # Panics
    /// Panics if `row` is out of range.
    pub fn group_of(&self, row: usize) -> GroupId {
        self.assignment[row]
    }

    /// Members of group `id`.
    pub fn members(&self, id: GroupId) -> &[usize] {
        &self.groups[id.0]
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn into_groups(self) -> Vec<Vec<usize>> {
        self.groups
    }
}

/// Partition the rows of `table` into transitively connected groups.
pub fn group_rows<D: NumericDomain>(domain: &D, table: &RowTable<D::Value>) -> Grouping {
    let mut index = ColumnIndex::build(domain, table);
    debug!(
        "column index: {} columns, {} buckets, {} entries",
        index.column_count(),
        index.bucket_count(),
        index.pending_count()
    );

    let mut assignment: Vec<Option<GroupId>> = vec![None; table.len()];
    let mut groups: Vec<Vec<usize>> = Vec::new();
    let mut queue: VecDeque<usize> = VecDeque::new();

    for seed in 0..table.len() {
        if assignment[seed].is_some() {
            continue;
        }
        let id = GroupId(groups.len());
        assignment[seed] = Some(id);
        let mut members = vec![seed];
        queue.push_back(seed);

        while let Some(current) = queue.pop_front() {
            for (column, value) in table.row(current).values() {
                let key = domain.key(value);
                index.prune(column, &key, |candidate| {
                    if assignment[candidate].is_some() {
                        return Candidate::Drop;
                    }
                    match table.row(candidate).get(column) {
                        Some(other) if domain.equals(other, value) => {
                            assignment[candidate] = Some(id);
                            members.push(candidate);
                            queue.push_back(candidate);
                            Candidate::Take
                        }
                        _ => Candidate::Keep,
                    }
                });
            }
        }

        members.sort_unstable();
        groups.push(members);
    }

    let assignment: Vec<GroupId> = assignment.into_iter().flatten().collect();
    debug_assert_eq!(assignment.len(), table.len());
    debug!("{} rows grouped into {} groups", table.len(), groups.len());
    Grouping { groups, assignment }
}
