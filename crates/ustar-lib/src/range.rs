use std::ops;

/// A half-open span of beats. `start == end` is a valid, empty range.
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Debug, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub start: i64,
    pub end: i64,
}

impl Range {
    pub const EMPTY: Self = Range { start: 0, end: 0 };

    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }
    pub fn from_start_length(start: i64, length: i64) -> Self {
        Self {
            start,
            end: start.checked_add(length).expect("start + length overflows i64"),
        }
    }
    pub fn at(pos: i64) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    pub fn length(&self) -> i64 {
        self.end - self.start
    }
    pub fn valid(&self) -> bool {
        self.length() >= 0
    }

    pub fn contains(&self, pos: i64) -> bool {
        pos >= self.start && pos < self.end
    }
    /// Whether `other` lies completely inside `self`. Empty ranges on the boundary count.
    pub fn covers(&self, other: Self) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    pub fn intersect(&self, other: Self) -> Self {
        Self {
            start: self.start.max(other.start),
            end: self.end.min(other.end),
        }
    }
    pub fn intersects(&self, other: Self) -> bool {
        self.start < other.end && self.end > other.start
    }
    /// Smallest range covering both.
    pub fn union(&self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn with_start_pos(self, start: i64) -> Self {
        self + (start - self.start)
    }
}

impl ops::Add<i64> for Range {
    type Output = Self;
    fn add(self, rhs: i64) -> Self::Output {
        Self {
            start: self.start + rhs,
            end: self.end + rhs,
        }
    }
}

impl ops::AddAssign<i64> for Range {
    fn add_assign(&mut self, rhs: i64) {
        *self = *self + rhs;
    }
}

impl ops::Sub<i64> for Range {
    type Output = Self;
    fn sub(self, rhs: i64) -> Self::Output {
        self + -rhs
    }
}

impl ops::SubAssign<i64> for Range {
    fn sub_assign(&mut self, rhs: i64) {
        *self = *self - rhs;
    }
}
