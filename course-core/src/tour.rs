//! Visiting orders over the places of one request.
//!
//! A [`Tour`] is always a full permutation of `0..len`. The only ways to
//! obtain one are [`Tour::identity`], the checked [`Tour::from_order`], and
//! the permutation-preserving transforms below, each of which returns a new
//! tour rather than editing in place.

/// An ordered sequence of place indices visiting every place exactly once.
///
/// # Examples
/// ```
/// use course_core::Tour;
///
/// let tour = Tour::from_order(vec![2, 0, 1]).expect("permutation");
/// assert_eq!(tour.reversed(0, 2).as_slice(), &[1, 0, 2]);
/// assert_eq!(tour.swapped(0, 1).as_slice(), &[0, 2, 1]);
/// assert!(Tour::from_order(vec![0, 0, 1]).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tour {
    order: Vec<usize>,
}

impl Tour {
    /// The tour visiting places in input order.
    #[must_use]
    pub fn identity(len: usize) -> Self {
        Self {
            order: (0..len).collect(),
        }
    }

    /// Wrap `order` if it is a permutation of `0..order.len()`.
    #[must_use]
    pub fn from_order(order: Vec<usize>) -> Option<Self> {
        let mut seen = vec![false; order.len()];
        for &index in &order {
            let slot = seen.get_mut(index)?;
            if *slot {
                return None;
            }
            *slot = true;
        }
        Some(Self { order })
    }

    /// Place indices in visiting order.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }

    /// Number of stops.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the tour has no stops.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// A copy with positions `i..=j` reversed.
    ///
    /// Out-of-range or inverted bounds return an unchanged copy.
    #[must_use]
    pub fn reversed(&self, i: usize, j: usize) -> Self {
        let mut order = self.order.clone();
        if let Some(segment) = order.get_mut(i..=j) {
            segment.reverse();
        }
        Self { order }
    }

    /// A copy with the stops at positions `i` and `j` exchanged.
    ///
    /// Out-of-range positions return an unchanged copy.
    #[must_use]
    pub fn swapped(&self, i: usize, j: usize) -> Self {
        let mut order = self.order.clone();
        if i < order.len() && j < order.len() {
            order.swap(i, j);
        }
        Self { order }
    }

    /// Iterate over place indices in visiting order.
    pub fn iter(&self) -> std::slice::Iter<'_, usize> {
        self.order.iter()
    }
}

impl<'a> IntoIterator for &'a Tour {
    type Item = &'a usize;
    type IntoIter = std::slice::Iter<'a, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(vec![], true)]
    #[case(vec![0], true)]
    #[case(vec![1, 0, 2], true)]
    #[case(vec![0, 2], false)]
    #[case(vec![1, 1], false)]
    fn from_order_accepts_only_permutations(#[case] order: Vec<usize>, #[case] ok: bool) {
        assert_eq!(Tour::from_order(order).is_some(), ok);
    }

    #[rstest]
    fn transforms_leave_original_untouched() {
        let tour = Tour::identity(4);
        let reversed = tour.reversed(1, 3);
        let swapped = tour.swapped(0, 3);
        assert_eq!(tour.as_slice(), &[0, 1, 2, 3]);
        assert_eq!(reversed.as_slice(), &[0, 3, 2, 1]);
        assert_eq!(swapped.as_slice(), &[3, 1, 2, 0]);
    }

    #[rstest]
    fn out_of_range_transforms_are_no_ops() {
        let tour = Tour::identity(3);
        assert_eq!(tour.reversed(2, 5), tour);
        assert_eq!(tour.reversed(2, 1), tour);
        assert_eq!(tour.swapped(0, 9), tour);
    }
}
