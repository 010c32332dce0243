use std::array;
use std::ops::{Index, IndexMut};

/// A face of a rectangular box in `N` dimensional index space.
///
/// `side == false` is the low face of `axis`, `side == true` the high face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Face<const N: usize> {
    pub axis: usize,
    pub side: bool,
}

impl<const N: usize> Face<N> {
    /// Face on negative side of axis.
    pub fn negative(axis: usize) -> Self {
        assert!(axis < N);
        Self { axis, side: false }
    }

    /// Face on positive side of axis.
    pub fn positive(axis: usize) -> Self {
        assert!(axis < N);
        Self { axis, side: true }
    }

    /// Direction pointing from the face into the box along `axis`: `+1` on
    /// the low side and `-1` on the high side.
    pub fn inward(self) -> isize {
        1 - 2 * self.side as isize
    }

    /// Shifts `cell` by `steps` cells in the inward direction of this face.
    pub fn step_inward(self, mut cell: [isize; N], steps: isize) -> [isize; N] {
        cell[self.axis] += steps * self.inward();
        cell
    }

    /// Index of the face-centered location separating the ghost `cell` from the
    /// first interior cell, using the convention that face `i` lies between cells
    /// `i - 1` and `i`.
    pub fn boundary_face_of(self, mut cell: [isize; N]) -> [isize; N] {
        if !self.side {
            cell[self.axis] += 1;
        }
        cell
    }
}

/// Iterator over all faces in a given number of dimensions.
#[derive(Debug)]
pub struct FaceIter<const N: usize> {
    axis: usize,
    side: bool,
}

impl<const N: usize> Iterator for FaceIter<N> {
    type Item = Face<N>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.axis >= N {
            return None;
        }

        let result = Face {
            axis: self.axis,
            side: self.side,
        };

        self.axis += self.side as usize;
        self.side = !self.side;

        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl<const N: usize> ExactSizeIterator for FaceIter<N> {
    fn len(&self) -> usize {
        (2 * N).saturating_sub(2 * self.axis + self.side as usize)
    }
}

/// Iterates over all faces in a given number of dimensions.
pub fn faces<const N: usize>() -> FaceIter<N> {
    FaceIter {
        axis: 0,
        side: false,
    }
}

/// Stores one value per face of an `N` dimensional box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceArray<const N: usize, T>([[T; 2]; N]);

impl<const N: usize, T> FaceArray<N, T> {
    /// Builds an array by invoking `f` once per face.
    pub fn from_fn<F: FnMut(Face<N>) -> T>(mut f: F) -> Self {
        Self(array::from_fn(|axis| {
            [f(Face::negative(axis)), f(Face::positive(axis))]
        }))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Face<N>, &T)> + '_ {
        faces::<N>().map(move |face| (face, &self[face]))
    }
}

impl<const N: usize, T: Default> Default for FaceArray<N, T> {
    fn default() -> Self {
        Self::from_fn(|_| T::default())
    }
}

impl<const N: usize, T> Index<Face<N>> for FaceArray<N, T> {
    type Output = T;

    fn index(&self, face: Face<N>) -> &T {
        &self.0[face.axis][face.side as usize]
    }
}

impl<const N: usize, T> IndexMut<Face<N>> for FaceArray<N, T> {
    fn index_mut(&mut self, face: Face<N>) -> &mut T {
        &mut self.0[face.axis][face.side as usize]
    }
}
