//! Specialized collection types

use thiserror::Error;

/// Errors reported by fixed-capacity collections
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityError {
    /// The collection already holds `capacity` elements
    #[error("Array capacity exceeded: {capacity}")]
    Full {
        /// Maximum number of elements the collection can hold
        capacity: usize,
    },

    /// The index does not address a live element
    #[error("Index out of bounds: {index} (len {len})")]
    OutOfBounds {
        /// The requested index
        index: usize,
        /// Number of live elements at the time of the request
        len: usize,
    },
}

/// Fixed-capacity sequence stored inline
///
/// Elements live in a `[T; N]` buffer. Slots past `len` keep stale values and
/// are never observed. Every mutating operation is bounds-checked and reports
/// failure through [`CapacityError`] instead of panicking.
#[derive(Debug, Clone)]
pub struct CappedArray<T, const N: usize> {
    data: [T; N],
    len: usize,
}

impl<T: Copy + Default, const N: usize> CappedArray<T, N> {
    /// Create an empty array
    pub fn new() -> Self {
        Self {
            data: [T::default(); N],
            len: 0,
        }
    }

    /// Number of live elements
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no elements are stored
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Maximum number of elements
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Whether another append would fail
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// Push a value onto the end
    pub fn append(&mut self, value: T) -> Result<(), CapacityError> {
        if self.len >= N {
            return Err(CapacityError::Full { capacity: N });
        }
        self.data[self.len] = value;
        self.len += 1;
        Ok(())
    }

    /// Remove the element at `index`, shifting the tail down by one
    pub fn remove(&mut self, index: usize) -> Result<T, CapacityError> {
        self.check(index)?;
        let removed = self.data[index];
        self.data.copy_within(index + 1..self.len, index);
        self.len -= 1;
        Ok(removed)
    }

    /// Remove the element at `index` by moving the last element into its slot
    pub fn remove_swap(&mut self, index: usize) -> Result<T, CapacityError> {
        self.check(index)?;
        let removed = self.data[index];
        self.data[index] = self.data[self.len - 1];
        self.len -= 1;
        Ok(removed)
    }

    /// Copy out the element at `index`
    pub fn get(&self, index: usize) -> Result<T, CapacityError> {
        self.check(index)?;
        Ok(self.data[index])
    }

    /// Overwrite the element at `index`
    pub fn set(&mut self, index: usize, value: T) -> Result<(), CapacityError> {
        self.check(index)?;
        self.data[index] = value;
        Ok(())
    }

    /// Drop every element
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Live elements as a slice
    pub fn as_slice(&self) -> &[T] {
        &self.data[..self.len]
    }

    /// Iterate over live elements
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    fn check(&self, index: usize) -> Result<(), CapacityError> {
        if index < self.len {
            Ok(())
        } else {
            Err(CapacityError::OutOfBounds {
                index,
                len: self.len,
            })
        }
    }
}

impl<T: Copy + Default + PartialEq, const N: usize> CappedArray<T, N> {
    /// Whether any live element equals `value`
    pub fn contains(&self, value: &T) -> bool {
        self.as_slice().contains(value)
    }
}

impl<T: Copy + Default, const N: usize> Default for CappedArray<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: Copy + Default, const N: usize> IntoIterator for &'a CappedArray<T, N> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(values: &[u32]) -> CappedArray<u32, 4> {
        let mut array = CappedArray::new();
        for &value in values {
            array.append(value).unwrap();
        }
        array
    }

    #[test]
    fn test_append_until_full() {
        let mut array = filled(&[1, 2, 3, 4]);
        assert!(array.is_full());
        assert_eq!(array.append(5), Err(CapacityError::Full { capacity: 4 }));
        assert_eq!(array.as_slice(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut array = filled(&[1, 2, 3, 4]);
        assert_eq!(array.remove(1), Ok(2));
        assert_eq!(array.as_slice(), &[1, 3, 4]);
    }

    #[test]
    fn test_remove_swap_moves_last() {
        let mut array = filled(&[1, 2, 3, 4]);
        assert_eq!(array.remove_swap(0), Ok(1));
        assert_eq!(array.as_slice(), &[4, 2, 3]);

        assert_eq!(array.remove_swap(2), Ok(3));
        assert_eq!(array.as_slice(), &[4, 2]);
    }

    #[test]
    fn test_bounds_are_checked() {
        let mut array = filled(&[7]);
        let err = CapacityError::OutOfBounds { index: 1, len: 1 };
        assert_eq!(array.get(1), Err(err));
        assert_eq!(array.set(1, 9), Err(err));
        assert_eq!(array.remove(1), Err(err));
        assert_eq!(array.remove_swap(1), Err(err));
    }

    #[test]
    fn test_contains_ignores_stale_slots() {
        let mut array = filled(&[1, 2]);
        array.remove(1).unwrap();
        assert!(array.contains(&1));
        assert!(!array.contains(&2));
    }

    #[test]
    fn test_set_and_get() {
        let mut array = filled(&[1, 2]);
        array.set(0, 10).unwrap();
        assert_eq!(array.get(0), Ok(10));
        array.clear();
        assert!(array.is_empty());
    }
}
