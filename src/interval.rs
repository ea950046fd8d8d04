use std::ops::Range;

/// A half-open interval `[begin, end)` over a totally ordered edge type.
///
/// An [`Interval`] contains every point `p` where `begin <= p < end`: a point
/// equal to `begin` is contained, a point equal to `end` is not.
///
/// Intervals are ordered by the lower bound, and tie-broken with the upper
/// bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval<R> {
    /// The inclusive lower bound.
    pub begin: R,
    /// The exclusive upper bound.
    pub end: R,
}

impl<R> Interval<R>
where
    R: Ord,
{
    /// Construct a new [`Interval`] covering `[begin, end)`.
    ///
    /// # Panics
    ///
    /// Panics if `begin >= end`.
    #[inline]
    pub fn new(begin: R, end: R) -> Self {
        assert!(begin < end, "invalid range");
        Self { begin, end }
    }

    /// Returns true if `point` lies within this half-open interval.
    #[inline]
    pub fn contains(&self, point: &R) -> bool {
        self.begin <= *point && *point < self.end
    }
}

impl<R> Interval<R> {
    /// Borrow the bounds of this interval.
    #[inline]
    pub fn as_ref(&self) -> Interval<&R> {
        Interval {
            begin: &self.begin,
            end: &self.end,
        }
    }
}

impl<R> From<Range<R>> for Interval<R>
where
    R: Ord,
{
    /// # Panics
    ///
    /// Panics if the range is empty or inverted.
    fn from(value: Range<R>) -> Self {
        Self::new(value.start, value.end)
    }
}
