//! Column index: per column, quantized key → rows holding that value and not yet grouped.
//!
//! The index is transient working state owned by the connectivity engine. Each lookup
//! goes through [`ColumnIndex::prune`], which lets the caller decide per candidate whether
//! it is taken into the current group, kept for later lookups, or dropped, and rewrites
//! the bucket to the kept members. Every row therefore leaves each of its buckets at most
//! once and total work stays proportional to the number of present cells.

use crate::domain::NumericDomain;
use crate::table::RowTable;
use std::collections::HashMap;
use std::hash::Hash;

/// What to do with one bucket member during [`ColumnIndex::prune`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate {
    /// Confirmed match; removed from the bucket.
    Take,
    /// Not a match (yet); stays in the bucket.
    Keep,
    /// Already grouped elsewhere; removed from the bucket.
    Drop,
}

#[derive(Debug, Clone)]
pub struct ColumnIndex<K> {
    columns: Vec<HashMap<K, Vec<usize>>>,
}

impl<K: Eq + Hash + Clone> ColumnIndex<K> {
    /// Index every present cell of `table`, scanning rows left to right.
    ///
    /// Buckets list row indices in ascending order.
    pub fn build<D>(domain: &D, table: &RowTable<D::Value>) -> Self
    where
        D: NumericDomain<Key = K>,
    {
        let mut columns: Vec<HashMap<K, Vec<usize>>> = Vec::new();
        for (row_index, row) in table.rows().iter().enumerate() {
            for (column, value) in row.values() {
                if columns.len() <= column {
                    columns.resize_with(column + 1, HashMap::new);
                }
                columns[column]
                    .entry(domain.key(value))
                    .or_default()
                    .push(row_index);
            }
        }
        Self { columns }
    }

    /// Rows still pending under `(column, key)`.
    pub fn pending(&self, column: usize, key: &K) -> &[usize] {
        self.columns
            .get(column)
            .and_then(|c| c.get(key))
            .map_or(&[], Vec::as_slice)
    }

    /// Run `decide` over the bucket `(column, key)` and keep only the
    /// [`Candidate::Keep`] members. Returns how many members were taken.
    ///
    /// Empty buckets are removed.
    pub fn prune<F>(&mut self, column: usize, key: &K, mut decide: F) -> usize
    where
        F: FnMut(usize) -> Candidate,
    {
        let Some(bucket) = self.columns.get_mut(column).and_then(|c| c.get_mut(key)) else {
            return 0;
        };
        let mut taken = 0;
        bucket.retain(|&row| match decide(row) {
            Candidate::Take => {
                taken += 1;
                false
            }
            Candidate::Keep => true,
            Candidate::Drop => false,
        });
        if bucket.is_empty() {
            self.columns[column].remove(key);
        }
        taken
    }

    /// Number of columns that received at least one value.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of non-empty buckets across all columns.
    pub fn bucket_count(&self) -> usize {
        self.columns.iter().map(HashMap::len).sum()
    }

    /// Total number of pending row entries across all buckets.
    pub fn pending_count(&self) -> usize {
        self.columns
            .iter()
            .flat_map(HashMap::values)
            .map(Vec::len)
            .sum()
    }
}
