//! Fixed-shape dense storage for solver state
//!
//! The generators keep their banned flags and support counters in lattices
//! of rank three and four. Shapes are immutable after construction; the
//! first axis varies fastest in the linear layout, with strides
//! `s_0 = 1`, `s_k = s_{k-1} * shape[k-1]`.

use num_traits::Zero;

/// Dense multi-dimensional array with an immutable shape
///
/// Access with the wrong number of coordinates, or with a coordinate
/// outside its axis, is a programmer error and aborts rather than
/// returning a recoverable error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lattice<T> {
    shape: Vec<usize>,
    data: Vec<T>,
}

impl<T> Lattice<T> {
    /// Allocate a lattice of the given shape filled with zeros
    ///
    /// # Panics
    ///
    /// Panics if `shape` has no axes.
    pub fn zeros(shape: &[usize]) -> Self
    where
        T: Zero + Clone,
    {
        Self::from_elem(shape, T::zero())
    }

    /// Allocate a lattice of the given shape filled with copies of `value`
    ///
    /// # Panics
    ///
    /// Panics if `shape` has no axes.
    pub fn from_elem(shape: &[usize], value: T) -> Self
    where
        T: Clone,
    {
        assert!(!shape.is_empty(), "lattice shape needs at least one axis");
        let size = shape.iter().product();
        Self {
            shape: shape.to_vec(),
            data: vec![value; size],
        }
    }

    /// Extent of every axis
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of axes
    pub fn dims(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Linear position of a coordinate tuple
    ///
    /// # Panics
    ///
    /// Panics when the number of coordinates differs from the number of
    /// axes, or when a coordinate is outside its axis extent.
    pub fn index(&self, coords: &[usize]) -> usize {
        assert_eq!(
            coords.len(),
            self.shape.len(),
            "got {} coordinates for a rank-{} lattice",
            coords.len(),
            self.shape.len()
        );
        let mut index = 0;
        let mut stride = 1;
        for (axis, (&coord, &extent)) in coords.iter().zip(self.shape.iter()).enumerate() {
            assert!(
                coord < extent,
                "coordinate {coord} exceeds extent {extent} on axis {axis}"
            );
            index += coord * stride;
            stride *= extent;
        }
        index
    }

    /// Coordinate tuple of a linear position
    ///
    /// # Panics
    ///
    /// Panics when `index` is outside the lattice.
    pub fn coords(&self, index: usize) -> Vec<usize> {
        assert!(
            index < self.data.len(),
            "linear index {index} exceeds lattice size {}",
            self.data.len()
        );
        let mut remaining = index;
        let mut stride = self.data.len();
        let mut coords = vec![0; self.shape.len()];
        for (coord, &extent) in coords.iter_mut().zip(self.shape.iter()).rev() {
            stride /= extent;
            *coord = remaining / stride;
            remaining -= *coord * stride;
        }
        coords
    }

    /// Read the element at a coordinate tuple
    ///
    /// # Panics
    ///
    /// Panics on coordinate arity or range misuse, as [`Lattice::index`].
    pub fn at(&self, coords: &[usize]) -> &T {
        let index = self.index(coords);
        self.data
            .get(index)
            .unwrap_or_else(|| unreachable!("validated index {index} out of range"))
    }

    /// Mutable access to the element at a coordinate tuple
    ///
    /// # Panics
    ///
    /// Panics on coordinate arity or range misuse, as [`Lattice::index`].
    pub fn at_mut(&mut self, coords: &[usize]) -> &mut T {
        let index = self.index(coords);
        self.data
            .get_mut(index)
            .unwrap_or_else(|| unreachable!("validated index {index} out of range"))
    }

    /// Overwrite the element at a coordinate tuple
    ///
    /// # Panics
    ///
    /// Panics on coordinate arity or range misuse, as [`Lattice::index`].
    pub fn set(&mut self, coords: &[usize], value: T) {
        *self.at_mut(coords) = value;
    }

    /// Elements in linear layout order
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}
