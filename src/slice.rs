use rand::{Rng, RngExt};

/// Destructuring and shuffling helpers on slices.
///
/// The `first*_rest` family splits a slice into its leading elements and the
/// remainder, returning `None` when the slice is too short. The remainder may
/// be empty.
///
/// # Examples
///
/// ```
/// use rowfmt::slice::SliceExt;
///
/// let primes = [2, 3, 5, 7, 11];
/// let (first, second, rest) = primes.first2_rest().unwrap();
/// assert_eq!(*first, 2);
/// assert_eq!(*second, 3);
/// assert_eq!(rest, [5, 7, 11]);
/// ```
pub trait SliceExt<T> {
    /// Splits off the first element.
    fn first_rest(&self) -> Option<(&T, &[T])>;

    /// Splits off the first two elements.
    fn first2_rest(&self) -> Option<(&T, &T, &[T])>;

    /// Splits off the first three elements.
    fn first3_rest(&self) -> Option<(&T, &T, &T, &[T])>;

    /// Splits off the first four elements.
    fn first4_rest(&self) -> Option<(&T, &T, &T, &T, &[T])>;

    /// Splits off the first five elements.
    fn first5_rest(&self) -> Option<(&T, &T, &T, &T, &T, &[T])>;

    /// Shuffles the slice in place using the given random generator.
    ///
    /// Passing the generator explicitly keeps results reproducible: the same
    /// seeded generator always produces the same permutation.
    fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R);
}

impl<T> SliceExt<T> for [T] {
    fn first_rest(&self) -> Option<(&T, &[T])> {
        match self {
            [first, rest @ ..] => Some((first, rest)),
            _ => None,
        }
    }

    fn first2_rest(&self) -> Option<(&T, &T, &[T])> {
        match self {
            [first, second, rest @ ..] => Some((first, second, rest)),
            _ => None,
        }
    }

    fn first3_rest(&self) -> Option<(&T, &T, &T, &[T])> {
        match self {
            [first, second, third, rest @ ..] => Some((first, second, third, rest)),
            _ => None,
        }
    }

    fn first4_rest(&self) -> Option<(&T, &T, &T, &T, &[T])> {
        match self {
            [first, second, third, fourth, rest @ ..] => Some((first, second, third, fourth, rest)),
            _ => None,
        }
    }

    fn first5_rest(&self) -> Option<(&T, &T, &T, &T, &T, &[T])> {
        match self {
            [first, second, third, fourth, fifth, rest @ ..] => {
                Some((first, second, third, fourth, fifth, rest))
            }
            _ => None,
        }
    }

    fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        // Fisher-Yates, walking down from the end.
        for i in (1..self.len()).rev() {
            let j = rng.random_range(0..=i);
            self.swap(i, j);
        }
    }
}
