//! Ring layout ordering for the radial heatmap.
//!
//! The center group comes first, then rings alternating a block of left
//! group words and a block of right group words. Each ring holds
//! `capacity` cells, half per side, and the capacity grows after every ring.
//!
//! Side groups rarely fill their halves evenly, so outer rings drift out of
//! balance. That is accepted; the swap stage fixes visible misplacements.

use crate::defaults;
use crate::model::entry::HeatmapEntry;
use crate::model::group::Group;
use log::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingLayout {
    pub center: Group,
    pub left: Group,
    pub right: Group,
    /// Cells in the first ring.
    pub initial_capacity: usize,
    /// Cells added per ring.
    pub capacity_increment: usize,
}

impl Default for RingLayout {
    fn default() -> Self {
        Self {
            center: Group::JobsAndInvestments,
            left: Group::JobListings,
            right: Group::Investments,
            initial_capacity: defaults::RING_INITIAL_CAPACITY,
            capacity_increment: defaults::RING_CAPACITY_INCREMENT,
        }
    }
}

/// Reorders `entries` into ring layout, keeping relative order per group.
///
/// Entries whose group is not one of the layout's three groups are dropped.
pub fn ring_sort(entries: Vec<HeatmapEntry>, layout: &RingLayout) -> Vec<HeatmapEntry> {
    let total = entries.len();
    let mut center = Vec::new();
    let mut left = Vec::new();
    let mut right = Vec::new();
    for entry in entries {
        if entry.group == layout.center {
            center.push(entry);
        } else if entry.group == layout.left {
            left.push(entry);
        } else if entry.group == layout.right {
            right.push(entry);
        }
    }

    let mut sorted = Vec::with_capacity(total);
    sorted.append(&mut center);

    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    let mut capacity = layout.initial_capacity;
    let mut rings = 0usize;
    while left.peek().is_some() || right.peek().is_some() {
        // At least one cell per side so a zero-sized layout still terminates.
        let half = (capacity / 2).max(1);
        sorted.extend(left.by_ref().take(half));
        sorted.extend(right.by_ref().take(half));
        capacity += layout.capacity_increment;
        rings += 1;
    }

    info!(
        "event=ring_sort module=transform status=ok entries={} rings={}",
        sorted.len(),
        rings
    );
    sorted
}

#[cfg(test)]
mod tests {
    use super::{ring_sort, RingLayout};
    use crate::model::entry::HeatmapEntry;
    use crate::model::group::Group;

    fn entries(group: Group, prefix: &str, count: usize) -> Vec<HeatmapEntry> {
        (0..count)
            .map(|index| HeatmapEntry::new(format!("{prefix}{index}"), group, 1.0))
            .collect()
    }

    #[test]
    fn first_ring_takes_six_from_each_side() {
        let mut input = entries(Group::JobListings, "l", 8);
        input.extend(entries(Group::Investments, "r", 8));
        input.extend(entries(Group::JobsAndInvestments, "c", 2));

        let sorted = ring_sort(input, &RingLayout::default());
        let words: Vec<&str> = sorted.iter().map(|entry| entry.word.as_str()).collect();
        assert_eq!(
            words,
            vec![
                "c0", "c1", "l0", "l1", "l2", "l3", "l4", "l5", "r0", "r1", "r2", "r3", "r4",
                "r5", "l6", "l7", "r6", "r7"
            ]
        );
    }

    #[test]
    fn zero_capacity_layout_terminates() {
        let layout = RingLayout {
            initial_capacity: 0,
            capacity_increment: 0,
            ..RingLayout::default()
        };
        let sorted = ring_sort(entries(Group::JobListings, "l", 3), &layout);
        assert_eq!(sorted.len(), 3);
    }
}
