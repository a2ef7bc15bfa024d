//! Indirect views over resolver buffers.
//!
//! An isolating run sequence is a non-contiguous selection of paragraph
//! positions. These views let the per-sequence rules address it with dense
//! indices `0..len` while reading and writing the paragraph-wide buffers.

use core::ops::{Index, IndexMut};

/// Read-only view of `data` through an index map.
#[derive(Debug, Clone, Copy)]
pub struct MappedSlice<'a, T> {
    data: &'a [T],
    map: &'a [usize],
}

impl<'a, T> MappedSlice<'a, T> {
    pub fn new(data: &'a [T], map: &'a [usize]) -> Self {
        debug_assert!(map.iter().all(|&i| i < data.len()));
        Self { data, map }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Position in the underlying buffer of mapped index `index`.
    pub fn source_index(&self, index: usize) -> usize {
        self.map[index]
    }
}

impl<T> Index<usize> for MappedSlice<'_, T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.data[self.map[index]]
    }
}

/// Mutable view of `data` through an index map.
#[derive(Debug)]
pub struct MappedSliceMut<'a, T> {
    data: &'a mut [T],
    map: &'a [usize],
}

impl<'a, T> MappedSliceMut<'a, T> {
    pub fn new(data: &'a mut [T], map: &'a [usize]) -> Self {
        debug_assert!(map.iter().all(|&i| i < data.len()));
        Self { data, map }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<T> Index<usize> for MappedSliceMut<'_, T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.data[self.map[index]]
    }
}

impl<T> IndexMut<usize> for MappedSliceMut<'_, T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[self.map[index]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_through_map() {
        let data = [10, 11, 12, 13, 14];
        let map = [1, 3, 4];
        let view = MappedSlice::new(&data, &map);
        assert_eq!(view.len(), 3);
        assert_eq!(view[0], 11);
        assert_eq!(view[2], 14);
        assert_eq!(view.source_index(1), 3);
    }

    #[test]
    fn writes_land_in_backing_buffer() {
        let mut data = [0u8; 5];
        let map = [0, 2, 4];
        {
            let mut view = MappedSliceMut::new(&mut data, &map);
            for i in 0..view.len() {
                view[i] = 7;
            }
            view[1] += 1;
        }
        assert_eq!(data, [7, 0, 8, 0, 7]);
    }

    #[test]
    #[should_panic]
    fn out_of_range_index_panics() {
        let data = [1, 2, 3];
        let map = [0, 1];
        let view = MappedSlice::new(&data, &map);
        let _ = view[2];
    }
}
