//! Display-list index shared by the parser, commands and model views.

use std::fmt::{Display, Formatter};

/// Position in a filtered view.
///
/// Users address entries 1-based; views and vectors are 0-based. Keeping both
/// conversions on one type avoids off-by-one drift between layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Index {
    zero_based: usize,
}

impl Index {
    /// Builds an index from a 0-based offset.
    pub fn from_zero_based(zero_based: usize) -> Self {
        Self { zero_based }
    }

    /// Builds an index from a user-facing 1-based ordinal.
    ///
    /// Returns `None` for `0`, which has no 0-based counterpart.
    pub fn from_one_based(one_based: usize) -> Option<Self> {
        one_based
            .checked_sub(1)
            .map(|zero_based| Self { zero_based })
    }

    pub fn zero_based(self) -> usize {
        self.zero_based
    }

    pub fn one_based(self) -> usize {
        self.zero_based + 1
    }
}

impl Display for Index {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.one_based())
    }
}

#[cfg(test)]
mod tests {
    use super::Index;

    #[test]
    fn one_based_conversion_rejects_zero() {
        assert!(Index::from_one_based(0).is_none());
        let index = Index::from_one_based(3).expect("3 is a valid ordinal");
        assert_eq!(index.zero_based(), 2);
        assert_eq!(index.to_string(), "3");
    }
}
