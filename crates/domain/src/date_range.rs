// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Closed day-range overlap detection.
//!
//! Used as the submission gate for whole calendars (pairwise over all
//! embedded events) and as a standalone single-candidate-vs-list check.
//!
//! ## Invariants
//!
//! - Ranges are closed: `[s1, e1]` and `[s2, e2]` overlap iff
//!   `s1 <= e2 && s2 <= e1`.
//! - Ranges with `end < start` are excluded defensively from every
//!   comparison rather than rejected.

use time::Date;

/// A closed, inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: Date,
    end: Date,
}

impl DateRange {
    /// Creates a range if it is well-formed.
    ///
    /// Returns `None` when `end < start`; malformed ranges take no part in
    /// overlap comparisons.
    #[must_use]
    pub fn new(start: Date, end: Date) -> Option<Self> {
        if end < start {
            return None;
        }
        Some(Self { start, end })
    }

    /// Returns the first day of the range.
    #[must_use]
    pub const fn start(&self) -> Date {
        self.start
    }

    /// Returns the last day of the range.
    #[must_use]
    pub const fn end(&self) -> Date {
        self.end
    }

    /// Returns whether two closed ranges share at least one day.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// Finds all overlapping pairs in a list of optional ranges.
///
/// Entries that are `None` (unparseable or inverted ranges) are skipped.
/// Returned pairs are indices into the input slice, first index strictly
/// less than the second.
#[must_use]
pub fn overlapping_pairs(ranges: &[Option<DateRange>]) -> Vec<(usize, usize)> {
    let mut conflicts: Vec<(usize, usize)> = Vec::new();

    for (i, first) in ranges.iter().enumerate() {
        let Some(first) = first else { continue };
        for (j, second) in ranges.iter().enumerate().skip(i + 1) {
            let Some(second) = second else { continue };
            if first.overlaps(second) {
                conflicts.push((i, j));
            }
        }
    }

    conflicts
}

/// Finds the indices of existing ranges a candidate conflicts with.
///
/// A `None` candidate conflicts with nothing; `None` entries in the list are
/// skipped.
#[must_use]
pub fn conflicts_with(candidate: Option<DateRange>, existing: &[Option<DateRange>]) -> Vec<usize> {
    let Some(candidate) = candidate else {
        return Vec::new();
    };

    existing
        .iter()
        .enumerate()
        .filter_map(|(i, range)| {
            range
                .as_ref()
                .filter(|range| candidate.overlaps(range))
                .map(|_| i)
        })
        .collect()
}
