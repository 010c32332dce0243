use std::array;

use crate::Face;

/// An axis-aligned box of integer cell indices. Both `lo` and `hi` are inclusive, so
/// a box with `lo[axis] > hi[axis]` along any axis is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexBox<const N: usize> {
    pub lo: [isize; N],
    pub hi: [isize; N],
}

impl<const N: usize> IndexBox<N> {
    /// Constructs a new index box from inclusive bounds.
    pub const fn new(lo: [isize; N], hi: [isize; N]) -> Self {
        Self { lo, hi }
    }

    /// A box starting at the origin with the given number of cells along each axis.
    pub fn from_size(size: [usize; N]) -> Self {
        Self {
            lo: [0; N],
            hi: array::from_fn(|axis| size[axis] as isize - 1),
        }
    }

    /// Number of cells along the given axis.
    pub fn len(&self, axis: usize) -> usize {
        (self.hi[axis] - self.lo[axis] + 1).max(0) as usize
    }

    /// Number of cells along each axis.
    pub fn size(&self) -> [usize; N] {
        array::from_fn(|axis| self.len(axis))
    }

    /// Total number of cells in the box.
    pub fn num_cells(&self) -> usize {
        self.size().iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.num_cells() == 0
    }

    /// Returns true if the cell lies inside the box.
    pub fn contains(&self, cell: [isize; N]) -> bool {
        (0..N).all(|axis| cell[axis] >= self.lo[axis] && cell[axis] <= self.hi[axis])
    }

    /// Converts a cartesian cell index into a linear offset, with axis 0 varying fastest.
    pub fn linear_from_cartesian(&self, cell: [isize; N]) -> usize {
        debug_assert!(
            self.contains(cell),
            "cell {cell:?} lies outside of box {self:?}"
        );

        let mut result = 0;
        let mut stride = 1;

        for axis in 0..N {
            result += stride * (cell[axis] - self.lo[axis]) as usize;
            stride *= self.len(axis);
        }

        result
    }

    /// Expands the box by `amount` cells on every side.
    pub fn grow(&self, amount: isize) -> Self {
        Self {
            lo: array::from_fn(|axis| self.lo[axis] - amount),
            hi: array::from_fn(|axis| self.hi[axis] + amount),
        }
    }

    /// The one-cell-thick layer of ghost cells directly outside the given face.
    pub fn ghost_layer(&self, face: Face<N>) -> Self {
        let mut result = *self;
        let intercept = if face.side {
            self.hi[face.axis] + 1
        } else {
            self.lo[face.axis] - 1
        };
        result.lo[face.axis] = intercept;
        result.hi[face.axis] = intercept;
        result
    }

    /// The box of face-centered indices normal to `axis` bounding the cells of this box.
    pub fn surrounding_faces(&self, axis: usize) -> Self {
        let mut result = *self;
        result.hi[axis] += 1;
        result
    }

    /// Iterates all cells in the box, axis 0 varying fastest.
    pub fn iter(&self) -> CellIter<N> {
        CellIter {
            origin: self.lo,
            size: self.size(),
            cursor: [0; N],
        }
    }
}

impl<const N: usize> IntoIterator for IndexBox<N> {
    type Item = [isize; N];
    type IntoIter = CellIter<N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the cells of an `IndexBox`.
#[derive(Debug, Clone)]
pub struct CellIter<const N: usize> {
    origin: [isize; N],
    size: [usize; N],
    cursor: [usize; N],
}

impl<const N: usize> Iterator for CellIter<N> {
    type Item = [isize; N];

    fn next(&mut self) -> Option<Self::Item> {
        if N == 0 || self.size.contains(&0) {
            return None;
        }

        // Last index was incremented, iteration is complete
        if self.cursor[N - 1] == self.size[N - 1] {
            return None;
        }

        let result = array::from_fn(|axis| self.origin[axis] + self.cursor[axis] as isize);

        for i in 0..N {
            self.cursor[i] += 1;
            // Wrap unless this is the final axis, in which case the cursor stays
            // at `size` to mark the end of iteration.
            if self.cursor[i] == self.size[i] && i < N - 1 {
                self.cursor[i] = 0;
                continue;
            }

            break;
        }

        Some(result)
    }
}
