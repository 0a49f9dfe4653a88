/// Switches the per-row grid loops between rayon and plain iteration.
///
/// With the `parallel` feature (the default) this module is just
/// rayon's prelude. Without it, the trait below gives ranges an
/// `into_par_iter()` that is really `into_iter()`, so the diversity
/// map compiles unchanged in single-threaded builds.
#[cfg(feature = "parallel")]
pub use rayon::prelude::*;

#[cfg(not(feature = "parallel"))]
mod sequential {
    /// Single-threaded stand-in for rayon's `IntoParallelIterator`.
    ///
    /// Only the entry point needs faking: once `into_par_iter()` hands
    /// back an ordinary iterator, the rest of the chain (`flat_map`,
    /// `collect`, ...) resolves against `std::iter::Iterator`.
    pub trait IntoParallelIterator {
        type Iter;
        type Item;
        fn into_par_iter(self) -> Self::Iter;
    }

    impl<I: IntoIterator> IntoParallelIterator for I {
        type Iter = I::IntoIter;
        type Item = I::Item;
        fn into_par_iter(self) -> Self::Iter {
            self.into_iter()
        }
    }
}

#[cfg(not(feature = "parallel"))]
pub use sequential::*;
