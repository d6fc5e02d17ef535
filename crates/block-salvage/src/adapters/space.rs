//! # Free Extent List
//!
//! In-memory `SpaceTracker`: a sorted list of disjoint free extents.
//! Adjacent extents are merged on insert, so a run of garbage units freed one
//! at a time ends up as a single extent. Freeing a region that already lies
//! inside one extent is a no-op; a partial overlap is an error.

use std::collections::BTreeMap;

use crate::domain::errors::SpaceError;
use crate::ports::outbound::SpaceTracker;

/// Sorted, coalesced free extents keyed by start offset.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExtentList {
    extents: BTreeMap<u64, u64>,
}

impl ExtentList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Free extents as `(offset, len)` in offset order.
    pub fn extents(&self) -> Vec<(u64, u64)> {
        self.extents.iter().map(|(&o, &l)| (o, l)).collect()
    }

    /// Sum of all free extent lengths.
    pub fn total_free(&self) -> u64 {
        self.extents.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.extents.is_empty()
    }

    /// Whether `offset` lies inside a free extent.
    pub fn contains(&self, offset: u64) -> bool {
        self.extents
            .range(..=offset)
            .next_back()
            .is_some_and(|(&start, &len)| offset < start + len)
    }
}

impl SpaceTracker for ExtentList {
    fn mark_free(&mut self, offset: u64, len: u64) -> Result<(), SpaceError> {
        if len == 0 {
            return Err(SpaceError::EmptyRegion { offset });
        }
        let end = offset + len;

        let prev = self
            .extents
            .range(..=offset)
            .next_back()
            .map(|(&o, &l)| (o, l));
        let next = self.extents.range(offset..).next().map(|(&o, &l)| (o, l));

        if let Some((p_off, p_len)) = prev {
            if p_off + p_len >= end {
                return Ok(());
            }
            if p_off + p_len > offset {
                return Err(SpaceError::Overlap { offset, len });
            }
        }
        if let Some((n_off, _)) = next {
            if n_off < end {
                return Err(SpaceError::Overlap { offset, len });
            }
        }

        let mut start = offset;
        let mut total = len;

        if let Some((p_off, p_len)) = prev {
            if p_off + p_len == offset {
                self.extents.remove(&p_off);
                start = p_off;
                total += p_len;
            }
        }
        if let Some((n_off, n_len)) = next {
            if n_off == end {
                self.extents.remove(&n_off);
                total += n_len;
            }
        }

        self.extents.insert(start, total);
        Ok(())
    }

    fn discard(&mut self) {
        self.extents.clear();
    }
}
