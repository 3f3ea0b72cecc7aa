use std::fmt;

/// Integer range on a chromosome or on the linear plot axis
///
/// Segment ranges follow the bed file range convention: 0-indexed, half-closed, [start,end)
///
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct IntRange {
    pub start: i64,
    pub end: i64,
}

impl IntRange {
    pub fn from_pair(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    pub fn size(&self) -> i64 {
        self.end - self.start
    }

    /// Return true if the ranges intersect when both are treated as closed intervals [start,end]
    ///
    /// Under this test ranges which only share an endpoint are treated as intersecting, which is
    /// the convention used for plot layout collision checks.
    ///
    pub fn intersect_closed_range(&self, other: &IntRange) -> bool {
        other.start <= self.end && self.start <= other.end
    }
}

impl fmt::Debug for IntRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}-{})", self.start, self.end)
    }
}
