//! Dense square matrix indexed by vertex pairs.
//!
//! For undirected graphs only the lower triangle is stored, `(row, col)` and
//! `(col, row)` address the same cell, which halves the memory of the
//! inherently `O(V²)` structures (all-pairs distances) and keeps them
//! symmetric by construction.

use std::{
    marker::PhantomData,
    ops::{Index, IndexMut},
};

use crate::core::marker::EdgeType;

pub fn size_of<Ty: EdgeType>(size: usize) -> usize {
    if Ty::is_directed() {
        size * size
    } else {
        size * (size + 1) / 2
    }
}

pub fn index<Ty: EdgeType>(row: usize, col: usize, size: usize) -> usize {
    if Ty::is_directed() {
        row * size + col
    } else {
        // Make sure that the coordinates are in the lower triangle.
        let (row, col) = if row >= col { (row, col) } else { (col, row) };
        // The rows are 1 + 2 + 3 + ... + n = n (n + 1) / 2.
        row * (row + 1) / 2 + col
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T, Ty> {
    data: Vec<T>,
    size: usize,
    ty: PhantomData<fn() -> Ty>,
}

impl<T: Clone, Ty: EdgeType> Matrix<T, Ty> {
    /// Creates a `size × size` matrix filled with `value`.
    pub fn new(size: usize, value: T) -> Self {
        Self {
            data: vec![value; size_of::<Ty>(size)],
            size,
            ty: PhantomData,
        }
    }
}

impl<T, Ty: EdgeType> Matrix<T, Ty> {
    /// Number of rows (and columns).
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.size && col < self.size {
            self.data.get(index::<Ty>(row, col, self.size))
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> impl Iterator<Item = &T> + '_ {
        (0..self.size).map(move |col| &self[(row, col)])
    }
}

impl<T, Ty: EdgeType> Index<(usize, usize)> for Matrix<T, Ty> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.data[index::<Ty>(row, col, self.size)]
    }
}

impl<T, Ty: EdgeType> IndexMut<(usize, usize)> for Matrix<T, Ty> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.data[index::<Ty>(row, col, self.size)]
    }
}
