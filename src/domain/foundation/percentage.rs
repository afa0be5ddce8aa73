//! Whole-number progress percentage.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Progress of a page-by-page operation, 0 to 100.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Percentage(u8);

impl Percentage {
    pub const ZERO: Self = Self(0);
    pub const HUNDRED: Self = Self(100);

    /// Values above 100 saturate.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// `done` out of `total`, rounded half up.
    ///
    /// Nothing to do (`total == 0`) counts as finished.
    pub fn of(done: usize, total: usize) -> Self {
        match total {
            0 => Self::HUNDRED,
            _ => {
                let done = done.min(total) as u128;
                let total = total as u128;
                Self(((done * 200 + total) / (total * 2)) as u8)
            }
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_saturates() {
        assert_eq!(Percentage::new(101), Percentage::HUNDRED);
        assert_eq!(Percentage::new(42).value(), 42);
    }

    #[test]
    fn of_rounds_to_nearest() {
        assert_eq!(Percentage::of(1, 3).value(), 33);
        assert_eq!(Percentage::of(2, 3).value(), 67);
        assert_eq!(Percentage::of(1, 8).value(), 13);
    }

    #[test]
    fn of_edge_cases() {
        assert_eq!(Percentage::of(0, 0), Percentage::HUNDRED);
        assert_eq!(Percentage::of(9, 4), Percentage::HUNDRED);
        assert_eq!(Percentage::of(0, 7), Percentage::ZERO);
    }

    #[test]
    fn displays_with_sign() {
        assert_eq!(Percentage::new(75).to_string(), "75%");
    }

    proptest! {
        #[test]
        fn of_is_monotonic_in_done(total in 1usize..5000, a in 0usize..5000, b in 0usize..5000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(Percentage::of(lo, total) <= Percentage::of(hi, total));
            prop_assert!(Percentage::of(hi, total) <= Percentage::HUNDRED);
        }
    }
}
