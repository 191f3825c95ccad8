//! Group ordering: stable ascending sort by size, read back largest first.
//!
//! Ranks are 1-based from the largest group. Because iteration walks the ascending order
//! backwards, groups of equal size come out in reverse discovery order.

use crate::engine::Grouping;

/// One group as seen by a report: its rank and member row indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedGroup<'a> {
    pub rank: usize,
    pub members: &'a [usize],
}

impl RankedGroup<'_> {
    pub fn size(&self) -> usize {
        self.members.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedGroups {
    ascending: Vec<Vec<usize>>,
    first_multi: usize,
}

impl RankedGroups {
    /// Order `groups` (given in discovery order) by ascending size, keeping ties stable.
    pub fn new(mut groups: Vec<Vec<usize>>) -> Self {
        groups.sort_by_key(Vec::len);
        let first_multi = groups.partition_point(|g| g.len() <= 1);
        Self {
            ascending: groups,
            first_multi,
        }
    }

    pub fn from_grouping(grouping: Grouping) -> Self {
        Self::new(grouping.into_groups())
    }

    /// Groups in ascending size order.
    pub fn ascending(&self) -> &[Vec<usize>] {
        &self.ascending
    }

    /// Groups largest first, with ranks starting at 1.
    pub fn iter(&self) -> impl Iterator<Item = RankedGroup<'_>> + '_ {
        self.ascending
            .iter()
            .rev()
            .enumerate()
            .map(|(i, members)| RankedGroup {
                rank: i + 1,
                members,
            })
    }

    /// Number of groups with more than one member.
    pub fn multi_member_count(&self) -> usize {
        self.ascending.len() - self.first_multi
    }

    pub fn largest_size(&self) -> usize {
        self.ascending.last().map_or(0, Vec::len)
    }

    pub fn len(&self) -> usize {
        self.ascending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ascending.is_empty()
    }
}
