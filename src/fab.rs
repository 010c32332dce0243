//! Storage for grid functions: an index box, a number of components, and one value per
//! (cell, component) pair.
//!
//! Data is stored component-major: all cells of component 0, followed by all cells of
//! component 1, and so on. Within a component cells are ordered with axis 0 varying
//! fastest. Kernels never own grid data, they read through a [`FabRef`] and write
//! through a [`FabMut`], both of which can be reborrowed cheaply.

use mlbc_geometry::IndexBox;
use reborrow::{Reborrow, ReborrowMut};
use std::ops::{Index, IndexMut, Range};

/// An owned grid function over an index box.
#[derive(Clone, Debug, PartialEq)]
pub struct Fab<T, const N: usize> {
    bx: IndexBox<N>,
    ncomp: usize,
    data: Vec<T>,
}

impl<T: Copy + Default, const N: usize> Fab<T, N> {
    /// Allocates a grid function filled with `T::default()`.
    pub fn new(bx: IndexBox<N>, ncomp: usize) -> Self {
        Self {
            bx,
            ncomp,
            data: vec![T::default(); bx.num_cells() * ncomp],
        }
    }

    /// Allocates a grid function, initializing each value from its cell and component.
    pub fn from_fn<F: FnMut([isize; N], usize) -> T>(
        bx: IndexBox<N>,
        ncomp: usize,
        mut f: F,
    ) -> Self {
        let mut data = Vec::with_capacity(bx.num_cells() * ncomp);

        for comp in 0..ncomp {
            data.extend(bx.iter().map(|cell| f(cell, comp)));
        }

        Self { bx, ncomp, data }
    }

    /// Sets every value of every component.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }
}

impl<T, const N: usize> Fab<T, N> {
    /// Wraps existing component-major storage.
    pub fn from_storage(bx: IndexBox<N>, ncomp: usize, data: Vec<T>) -> Self {
        assert_eq!(data.len(), bx.num_cells() * ncomp);
        Self { bx, ncomp, data }
    }

    /// Transforms the grid function back into its underlying storage.
    pub fn into_storage(self) -> Vec<T> {
        self.data
    }

    pub fn storage(&self) -> &[T] {
        &self.data
    }

    pub fn bx(&self) -> IndexBox<N> {
        self.bx
    }

    pub fn num_comps(&self) -> usize {
        self.ncomp
    }

    pub fn comps(&self) -> Range<usize> {
        0..self.ncomp
    }

    pub fn view(&self) -> FabRef<'_, T, N> {
        FabRef {
            data: &self.data,
            bx: self.bx,
            ncomp: self.ncomp,
        }
    }

    pub fn view_mut(&mut self) -> FabMut<'_, T, N> {
        FabMut {
            data: &mut self.data,
            bx: self.bx,
            ncomp: self.ncomp,
        }
    }

    /// A single component viewed as a one component grid function.
    pub fn component(&self, comp: usize) -> FabRef<'_, T, N> {
        let stride = self.bx.num_cells();
        FabRef {
            data: &self.data[stride * comp..stride * (comp + 1)],
            bx: self.bx,
            ncomp: 1,
        }
    }

    /// Iterates each component as a disjoint, one component mutable view.
    pub fn components_mut(&mut self) -> impl Iterator<Item = FabMut<'_, T, N>> {
        let bx = self.bx;
        let stride = bx.num_cells().max(1);
        self.data
            .chunks_mut(stride)
            .map(move |data| FabMut { data, bx, ncomp: 1 })
    }

    /// Parallel version of [`Fab::components_mut`].
    #[cfg(feature = "parallel")]
    pub fn par_components_mut(
        &mut self,
    ) -> impl rayon::iter::IndexedParallelIterator<Item = FabMut<'_, T, N>>
    where
        T: Send,
    {
        use rayon::prelude::*;

        let bx = self.bx;
        let stride = bx.num_cells().max(1);
        self.data
            .par_chunks_mut(stride)
            .map(move |data| FabMut { data, bx, ncomp: 1 })
    }
}

impl<T, const N: usize> Index<([isize; N], usize)> for Fab<T, N> {
    type Output = T;

    fn index(&self, (cell, comp): ([isize; N], usize)) -> &T {
        &self.data[offset(&self.bx, self.ncomp, cell, comp)]
    }
}

impl<T, const N: usize> IndexMut<([isize; N], usize)> for Fab<T, N> {
    fn index_mut(&mut self, (cell, comp): ([isize; N], usize)) -> &mut T {
        &mut self.data[offset(&self.bx, self.ncomp, cell, comp)]
    }
}

fn offset<const N: usize>(bx: &IndexBox<N>, ncomp: usize, cell: [isize; N], comp: usize) -> usize {
    debug_assert!(
        comp < ncomp,
        "component {comp} out of range for {ncomp} components"
    );
    comp * bx.num_cells() + bx.linear_from_cartesian(cell)
}

/// A read-only view of a grid function.
#[derive(Debug)]
pub struct FabRef<'a, T, const N: usize> {
    data: &'a [T],
    bx: IndexBox<N>,
    ncomp: usize,
}

impl<T, const N: usize> Clone for FabRef<'_, T, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const N: usize> Copy for FabRef<'_, T, N> {}

impl<'a, T, const N: usize> FabRef<'a, T, N> {
    /// Builds a view from contiguous component-major storage.
    pub fn from_storage(data: &'a [T], bx: IndexBox<N>, ncomp: usize) -> Self {
        assert_eq!(data.len(), bx.num_cells() * ncomp);
        Self { data, bx, ncomp }
    }

    pub fn bx(&self) -> IndexBox<N> {
        self.bx
    }

    pub fn num_comps(&self) -> usize {
        self.ncomp
    }

    /// A single component viewed as a one component grid function.
    pub fn component(&self, comp: usize) -> FabRef<'a, T, N> {
        let stride = self.bx.num_cells();
        FabRef {
            data: &self.data[stride * comp..stride * (comp + 1)],
            bx: self.bx,
            ncomp: 1,
        }
    }
}

impl<T: Copy, const N: usize> FabRef<'_, T, N> {
    pub fn get(&self, cell: [isize; N], comp: usize) -> T {
        self.data[offset(&self.bx, self.ncomp, cell, comp)]
    }
}

impl<T, const N: usize> Index<([isize; N], usize)> for FabRef<'_, T, N> {
    type Output = T;

    fn index(&self, (cell, comp): ([isize; N], usize)) -> &T {
        &self.data[offset(&self.bx, self.ncomp, cell, comp)]
    }
}

impl<'short, T, const N: usize> Reborrow<'short> for FabRef<'_, T, N> {
    type Target = FabRef<'short, T, N>;

    fn rb(&'short self) -> Self::Target {
        *self
    }
}

impl<'a, T, const N: usize> From<&'a Fab<T, N>> for FabRef<'a, T, N> {
    fn from(value: &'a Fab<T, N>) -> Self {
        value.view()
    }
}

/// A mutable view of a grid function.
#[derive(Debug)]
pub struct FabMut<'a, T, const N: usize> {
    data: &'a mut [T],
    bx: IndexBox<N>,
    ncomp: usize,
}

impl<'a, T, const N: usize> FabMut<'a, T, N> {
    /// Builds a mutable view from contiguous component-major storage.
    pub fn from_storage(data: &'a mut [T], bx: IndexBox<N>, ncomp: usize) -> Self {
        assert_eq!(data.len(), bx.num_cells() * ncomp);
        Self { data, bx, ncomp }
    }

    pub fn bx(&self) -> IndexBox<N> {
        self.bx
    }

    pub fn num_comps(&self) -> usize {
        self.ncomp
    }
}

impl<T: Copy, const N: usize> FabMut<'_, T, N> {
    pub fn get(&self, cell: [isize; N], comp: usize) -> T {
        self.data[offset(&self.bx, self.ncomp, cell, comp)]
    }

    pub fn set(&mut self, cell: [isize; N], comp: usize, value: T) {
        self.data[offset(&self.bx, self.ncomp, cell, comp)] = value;
    }
}

impl<T, const N: usize> Index<([isize; N], usize)> for FabMut<'_, T, N> {
    type Output = T;

    fn index(&self, (cell, comp): ([isize; N], usize)) -> &T {
        &self.data[offset(&self.bx, self.ncomp, cell, comp)]
    }
}

impl<T, const N: usize> IndexMut<([isize; N], usize)> for FabMut<'_, T, N> {
    fn index_mut(&mut self, (cell, comp): ([isize; N], usize)) -> &mut T {
        &mut self.data[offset(&self.bx, self.ncomp, cell, comp)]
    }
}

impl<'short, T, const N: usize> Reborrow<'short> for FabMut<'_, T, N> {
    type Target = FabRef<'short, T, N>;

    fn rb(&'short self) -> Self::Target {
        FabRef {
            data: &*self.data,
            bx: self.bx,
            ncomp: self.ncomp,
        }
    }
}

impl<'short, T, const N: usize> ReborrowMut<'short> for FabMut<'_, T, N> {
    type Target = FabMut<'short, T, N>;

    fn rb_mut(&'short mut self) -> Self::Target {
        FabMut {
            data: &mut *self.data,
            bx: self.bx,
            ncomp: self.ncomp,
        }
    }
}

impl<'a, T, const N: usize> From<&'a mut Fab<T, N>> for FabMut<'a, T, N> {
    fn from(value: &'a mut Fab<T, N>) -> Self {
        value.view_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_major_layout() {
        let bx = IndexBox::new([-1, 0], [1, 1]);
        let fab = Fab::<f64, 2>::from_fn(bx, 2, |[i, j], comp| {
            100.0 * comp as f64 + 10.0 * j as f64 + i as f64
        });

        assert_eq!(fab.storage().len(), 12);
        assert_eq!(fab.storage()[0], -1.0);
        assert_eq!(fab.storage()[6], 99.0);
        assert_eq!(fab[([1, 1], 1)], 111.0);
        assert_eq!(fab.component(1).get([0, 1], 0), 110.0);
        assert_eq!(fab.view()[([0, 0], 1)], 100.0);
    }

    #[test]
    fn views_write_through() {
        let bx = IndexBox::<1>::from_size([4]);
        let mut fab = Fab::<f64, 1>::new(bx, 3);

        {
            let mut view = fab.view_mut();
            view.rb_mut().set([2], 1, 5.0);
            view[([3], 2)] = -1.0;
            assert_eq!(view.rb().get([2], 1), 5.0);
        }

        for (comp, mut view) in fab.components_mut().enumerate() {
            view[([0], 0)] = comp as f64;
        }

        assert_eq!(fab[([2], 1)], 5.0);
        assert_eq!(fab[([3], 2)], -1.0);
        assert_eq!(fab[([0], 2)], 2.0);
        assert_eq!(fab.components_mut().count(), 3);
    }

    #[test]
    fn caller_owned_storage() {
        let bx = IndexBox::<2>::new([0, -1], [2, 0]);
        let mut data = vec![0.0; 12];

        {
            let mut view = FabMut::from_storage(&mut data, bx, 2);
            assert_eq!(view.bx(), bx);
            view.set([2, 0], 1, 4.0);
        }

        let view = FabRef::from_storage(&data, bx, 2);
        assert_eq!(view.num_comps(), 2);
        assert_eq!(view[([2, 0], 1)], 4.0);

        let mut fab = Fab::from_storage(bx, 2, data);
        assert_eq!(fab.comps(), 0..2);
        assert_eq!(fab[([2, 0], 1)], 4.0);

        fab.fill(1.5);
        assert!(fab.into_storage().iter().all(|&v| v == 1.5));
    }
}
