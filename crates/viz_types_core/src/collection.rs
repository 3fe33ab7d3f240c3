use smallvec::SmallVec;

/// Number of elements the inline storage of a [`Collection`] can hold before
/// spilling to the heap.
pub const INLINE_CAPACITY: usize = 4;

/// An ordered, immutable sequence of same-typed values with explicit ownership.
///
/// A collection is always in exactly one of three ownership modes:
/// * [`Collection::Borrowed`]: a zero-copy view into caller-owned memory,
///   lifetime-checked by the compiler;
/// * [`Collection::Owned`]: exclusively owned heap storage;
/// * [`Collection::Inline`]: up to [`INLINE_CAPACITY`] elements stored inside
///   the collection itself, used by the single-element and small fixed-set
///   constructors.
///
/// `len`, indexed reads and iteration behave identically across all modes.
/// Cloning a borrowed collection copies the borrow (both collections reference
/// the same external memory); cloning owned storage deep-copies.
///
/// Collections are never mutated in place once constructed; only
/// whole-collection replacement is possible, and move semantics are enforced
/// by the language.
#[derive(Clone, Debug)]
pub enum Collection<'a, T: Clone> {
    Borrowed(&'a [T]),
    Owned(Vec<T>),
    Inline(SmallVec<[T; INLINE_CAPACITY]>),
}

impl<T: Clone> Default for Collection<'_, T> {
    #[inline]
    fn default() -> Self {
        Self::Borrowed(&[])
    }
}

impl<'a, T: Clone> Collection<'a, T> {
    /// Borrows the given slice without copying.
    ///
    /// The collection cannot outlive the borrowed memory; this is enforced at
    /// compile time, not by caller discipline.
    #[inline]
    pub fn borrowed(data: &'a [T]) -> Self {
        Self::Borrowed(data)
    }

    /// Takes exclusive ownership of the given vector, without copying.
    #[inline]
    pub fn take_ownership(data: Vec<T>) -> Self {
        Self::Owned(data)
    }

    /// Copies the given elements into the collection, using the inline
    /// small-buffer storage when they fit.
    #[inline]
    pub fn from_elements(data: impl IntoIterator<Item = T>) -> Self {
        let data: SmallVec<[T; INLINE_CAPACITY]> = data.into_iter().collect();
        if data.spilled() {
            Self::Owned(data.into_vec())
        } else {
            Self::Inline(data)
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// The elements, regardless of ownership mode.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        match self {
            Self::Borrowed(data) => data,
            Self::Owned(data) => data.as_slice(),
            Self::Inline(data) => data.as_slice(),
        }
    }

    #[inline]
    pub fn to_vec(&self) -> Vec<T> {
        self.as_slice().to_vec()
    }

    /// Converts into owned storage, copying only if currently borrowed or inline.
    #[inline]
    pub fn into_owned(self) -> Collection<'static, T> {
        match self {
            Self::Borrowed(data) => Collection::Owned(data.to_vec()),
            Self::Owned(data) => Collection::Owned(data),
            Self::Inline(data) => Collection::Inline(data),
        }
    }
}

impl<'a, T: Clone> From<&'a [T]> for Collection<'a, T> {
    #[inline]
    fn from(data: &'a [T]) -> Self {
        Self::Borrowed(data)
    }
}

impl<'a, T: Clone> From<&'a Vec<T>> for Collection<'a, T> {
    #[inline]
    fn from(data: &'a Vec<T>) -> Self {
        Self::Borrowed(data.as_slice())
    }
}

impl<'a, T: Clone, const N: usize> From<&'a [T; N]> for Collection<'a, T> {
    #[inline]
    fn from(data: &'a [T; N]) -> Self {
        Self::Borrowed(data.as_slice())
    }
}

impl<T: Clone> From<Vec<T>> for Collection<'_, T> {
    #[inline]
    fn from(data: Vec<T>) -> Self {
        Self::Owned(data)
    }
}

impl<T: Clone, const N: usize> From<[T; N]> for Collection<'_, T> {
    #[inline]
    fn from(data: [T; N]) -> Self {
        Self::from_elements(data)
    }
}

impl<T: Clone> From<T> for Collection<'_, T> {
    #[inline]
    fn from(value: T) -> Self {
        Self::from_elements(Some(value))
    }
}

impl<'c, T: Clone> IntoIterator for &'c Collection<'_, T> {
    type Item = &'c T;
    type IntoIter = std::slice::Iter<'c, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Clone + PartialEq> PartialEq for Collection<'_, T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Clone + Eq> Eq for Collection<'_, T> {}

// ---

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn borrow_is_zero_copy() {
        let data = vec![1, 2, 3, 4, 5];
        let collection = Collection::borrowed(&data);

        assert_eq!(collection.len(), 5);
        assert_eq!(collection.to_vec(), data);

        // Same backing memory: a true borrow, not a hidden copy.
        assert_eq!(collection.as_slice().as_ptr(), data.as_ptr());

        // Cloning a borrow copies the borrow.
        let clone = collection.clone();
        assert_eq!(clone.as_slice().as_ptr(), data.as_ptr());
    }

    #[test]
    fn ownership_round_trips() {
        let data = vec![1, 2, 3];

        assert_eq!(Collection::borrowed(&data).to_vec(), data);
        assert_eq!(Collection::take_ownership(data.clone()).to_vec(), data);
        assert_eq!(Collection::from_elements(data.clone()).to_vec(), data);
    }

    #[test]
    fn small_sets_are_inline() {
        let data = vec![1, 2, 3];
        let collection = Collection::from_elements(data.iter().copied());

        assert!(matches!(collection, Collection::Inline(_)));
        // The inline path copies: it must not alias the source.
        assert_ne!(collection.as_slice().as_ptr(), data.as_ptr());
        assert_eq!(collection.to_vec(), data);

        let single = Collection::from(42);
        assert!(matches!(single, Collection::Inline(_)));
        assert_eq!(single.to_vec(), vec![42]);
    }

    #[test]
    fn large_sets_spill_to_owned() {
        let data: Vec<i32> = (0..32).collect();
        let collection = Collection::from_elements(data.iter().copied());

        assert!(matches!(collection, Collection::Owned(_)));
        assert_eq!(collection.to_vec(), data);
    }

    #[test]
    fn reads_are_identical_across_modes() {
        let data = vec![10, 20, 30];

        let borrowed = Collection::borrowed(&data);
        let owned = Collection::take_ownership(data.clone());
        let inline = Collection::from_elements(data.clone());

        for collection in [&borrowed, &owned, &inline] {
            assert_eq!(collection.len(), 3);
            assert_eq!(collection.get(1), Some(&20));
            assert_eq!(collection.get(3), None);
            assert_eq!(collection.iter().copied().collect::<Vec<_>>(), data);
        }

        assert_eq!(borrowed, owned);
        assert_eq!(owned, inline);
    }

    #[test]
    fn into_owned_detaches_from_the_borrow() {
        let data = vec![1, 2, 3];
        let owned = Collection::borrowed(&data).into_owned();

        assert_ne!(owned.as_slice().as_ptr(), data.as_ptr());
        assert_eq!(owned.to_vec(), data);
    }
}
