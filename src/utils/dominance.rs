/// The Pareto dominance relationship between two points, assuming all coordinates are
/// minimised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dominance {
    /// The first point dominates the second one: it is smaller or equal in all the coordinates
    /// and strictly smaller in at least one.
    FirstDominates,
    /// The second point dominates the first one.
    SecondDominates,
    /// The two points have the same coordinates.
    Equal,
    /// Neither point dominates the other.
    NonDominated,
}

/// Get the dominance relationship between `first` and `second` using only their first
/// `dimensions` coordinates. This lets the WFG algorithm compare points on a slice of the
/// objective space.
///
/// # Arguments
///
/// * `first`: The first point.
/// * `second`: The second point.
/// * `dimensions`: The number of leading coordinates to compare. This must not exceed the size of
///   either point.
///
/// returns: `Dominance`
///
/// # Example
/// ```
/// use optivolume::utils::{dominance_compare, Dominance};
///
/// let a = [1.0, 2.0, 9.0];
/// let b = [2.0, 2.0, 0.0];
/// assert_eq!(dominance_compare(&a, &b, 2), Dominance::FirstDominates);
/// assert_eq!(dominance_compare(&a, &b, 3), Dominance::NonDominated);
/// ```
pub fn dominance_compare(first: &[f64], second: &[f64], dimensions: usize) -> Dominance {
    let mut first_better = false;
    let mut second_better = false;

    for (v1, v2) in first[..dimensions].iter().zip(&second[..dimensions]) {
        if v1 < v2 {
            first_better = true;
        } else if v2 < v1 {
            second_better = true;
        }
        if first_better && second_better {
            return Dominance::NonDominated;
        }
    }

    match (first_better, second_better) {
        (true, false) => Dominance::FirstDominates,
        (false, true) => Dominance::SecondDominates,
        _ => Dominance::Equal,
    }
}

#[cfg(test)]
mod test {
    use crate::utils::{dominance_compare, Dominance};

    #[test]
    fn test_dominance() {
        assert_eq!(
            dominance_compare(&[1.0, 1.0], &[2.0, 1.0], 2),
            Dominance::FirstDominates
        );
        assert_eq!(
            dominance_compare(&[2.0, 1.0], &[1.0, 1.0], 2),
            Dominance::SecondDominates
        );
        assert_eq!(
            dominance_compare(&[1.0, 3.0], &[2.0, 1.0], 2),
            Dominance::NonDominated
        );
        assert_eq!(
            dominance_compare(&[1.5, 0.5], &[1.5, 0.5], 2),
            Dominance::Equal
        );
    }

    #[test]
    /// Only the leading coordinates are compared
    fn test_sliced_dominance() {
        let a = [1.0, 4.0, 0.0];
        let b = [1.0, 4.0, 5.0];
        assert_eq!(dominance_compare(&a, &b, 2), Dominance::Equal);
        assert_eq!(dominance_compare(&a, &b, 3), Dominance::FirstDominates);
        assert_eq!(dominance_compare(&b, &a, 3), Dominance::SecondDominates);
        assert_eq!(dominance_compare(&a, &b, 0), Dominance::Equal);
    }
}
